// ============================================================================
// STORAGE - Almacenamiento clave/valor inyectable (cookies, localStorage, memoria)
// ============================================================================

#[cfg(test)]
use std::{cell::RefCell, collections::HashMap, rc::Rc};
use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage write failed: {0}")]
    Write(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Opciones de escritura (las stores sin expiración las ignoran)
#[derive(Debug, Clone, PartialEq)]
pub struct CookieOptions {
    pub expires_days: Option<u32>,
    pub path: String,
    pub same_site: SameSite,
    pub secure: bool,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            expires_days: None,
            path: "/".to_string(),
            same_site: SameSite::Lax,
            secure: false,
        }
    }
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str, options: &CookieOptions) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// ----------------------------------------------------------------------------
// Cookies (document.cookie)
// ----------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct CookieStore;

impl CookieStore {
    pub fn new() -> Self {
        Self
    }

    fn document() -> Result<HtmlDocument, StorageError> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
            .ok_or_else(|| StorageError::Unavailable("No document".to_string()))
    }
}

impl KeyValueStore for CookieStore {
    fn get(&self, key: &str) -> Option<String> {
        let raw = Self::document().ok()?.cookie().ok()?;
        read_cookie(&raw, key)
    }

    fn set(&self, key: &str, value: &str, options: &CookieOptions) -> Result<(), StorageError> {
        Self::document()?
            .set_cookie(&format_cookie(key, value, options))
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::document()?
            .set_cookie(&format!("{}=; path=/; max-age=0", encode_cookie_value(key)))
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

pub fn format_cookie(key: &str, value: &str, options: &CookieOptions) -> String {
    let mut cookie = format!(
        "{}={}; path={}; SameSite={}",
        encode_cookie_value(key),
        encode_cookie_value(value),
        options.path,
        options.same_site.as_str()
    );
    if let Some(days) = options.expires_days {
        cookie.push_str(&format!("; max-age={}", u64::from(days) * 24 * 60 * 60));
    }
    if options.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn read_cookie(raw: &str, key: &str) -> Option<String> {
    let wanted = encode_cookie_value(key);
    raw.split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == wanted)
        .map(|(_, value)| decode_cookie_value(value))
        .filter(|v| !v.is_empty())
}

fn encode_cookie_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b';' | b',' | b' ' | b'%' | b'"' | b'\\' | b'=' | 0..=0x1f | 0x7f..=0xff => {
                out.push_str(&format!("%{:02X}", byte));
            }
            _ => out.push(byte as char),
        }
    }
    out
}

fn decode_cookie_value(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = |b: u8| (b as char).to_digit(16);
            if let (Some(hi), Some(lo)) = (hex(bytes[i + 1]), hex(bytes[i + 2])) {
                out.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

// ----------------------------------------------------------------------------
// localStorage (fallback de desarrollo)
// ----------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str, _options: &CookieOptions) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        LocalStorage::delete(key);
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Memoria (solo tests)
// ----------------------------------------------------------------------------

#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, (String, CookieOptions)>>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opciones con las que se escribió la clave
    pub fn options_of(&self, key: &str) -> Option<CookieOptions> {
        self.entries.borrow().get(key).map(|(_, o)| o.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).map(|(v, _)| v.clone())
    }

    fn set(&self, key: &str, value: &str, options: &CookieOptions) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), (value.to_string(), options.clone()));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_format_includes_policy() {
        let options = CookieOptions {
            expires_days: Some(7),
            secure: true,
            ..Default::default()
        };
        assert_eq!(
            format_cookie("token", "abc.def", &options),
            "token=abc.def; path=/; SameSite=Lax; max-age=604800; Secure"
        );
        let dev = CookieOptions::default();
        assert_eq!(format_cookie("token", "x", &dev), "token=x; path=/; SameSite=Lax");
    }

    #[test]
    fn read_cookie_finds_named_value() {
        let raw = "theme=dark; token=eyJhbGci.payload.sig; refresh_token=r%3B1";
        assert_eq!(read_cookie(raw, "token").as_deref(), Some("eyJhbGci.payload.sig"));
        assert_eq!(read_cookie(raw, "refresh_token").as_deref(), Some("r;1"));
        assert_eq!(read_cookie(raw, "missing"), None);
        assert_eq!(read_cookie("token=", "token"), None);
    }

    #[test]
    fn encoding_round_trips_special_chars() {
        let value = "a b;c=d%e";
        assert_eq!(decode_cookie_value(&encode_cookie_value(value)), value);
    }

    #[test]
    fn memory_store_keeps_options() {
        let store = MemoryStore::new();
        let options = CookieOptions { expires_days: Some(30), ..Default::default() };
        store.set("refresh_token", "r", &options).unwrap();
        assert_eq!(store.get("refresh_token").as_deref(), Some("r"));
        assert_eq!(store.options_of("refresh_token").and_then(|o| o.expires_days), Some(30));
        store.remove("refresh_token").unwrap();
        assert!(store.is_empty());
    }
}
