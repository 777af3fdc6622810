// ============================================================================
// SESSION STORE - Tokens en cookies (+ respaldo localStorage en desarrollo)
// ============================================================================

use std::rc::Rc;
use crate::config::AppConfig;
use crate::utils::constants::{DEBUG_REFRESH_TOKEN_KEY, DEBUG_TOKEN_KEY, REFRESH_TOKEN_COOKIE, TOKEN_COOKIE};
use crate::utils::storage::{CookieOptions, CookieStore, KeyValueStore, LocalStore, SameSite};

/// Política de cookies según entorno
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPolicy {
    pub access_token_days: u32,
    pub refresh_token_days: u32,
    pub secure: bool,
}

impl SessionPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            access_token_days: config.access_token_days,
            refresh_token_days: config.refresh_token_days,
            secure: config.is_production(),
        }
    }

    fn cookie_options(&self, days: u32) -> CookieOptions {
        CookieOptions {
            expires_days: Some(days),
            path: "/".to_string(),
            same_site: SameSite::Lax,
            secure: self.secure,
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    cookies: Rc<dyn KeyValueStore>,
    fallback: Option<Rc<dyn KeyValueStore>>,
    policy: SessionPolicy,
}

impl SessionStore {
    pub fn new(
        cookies: Rc<dyn KeyValueStore>,
        fallback: Option<Rc<dyn KeyValueStore>>,
        policy: SessionPolicy,
    ) -> Self {
        Self { cookies, fallback, policy }
    }

    /// Store del navegador: cookies, y localStorage solo fuera de producción
    pub fn browser(config: &AppConfig) -> Self {
        let fallback: Option<Rc<dyn KeyValueStore>> = if config.is_production() {
            None
        } else {
            Some(Rc::new(LocalStore::new()))
        };
        Self::new(Rc::new(CookieStore::new()), fallback, SessionPolicy::from_config(config))
    }

    pub fn save_tokens(&self, access_token: &str, refresh_token: Option<&str>) {
        let access_options = self.policy.cookie_options(self.policy.access_token_days);
        if let Err(e) = self.cookies.set(TOKEN_COOKIE, access_token, &access_options) {
            log::warn!("⚠️ [SESSION] No se pudo guardar el token: {}", e);
        }

        if let Some(refresh) = refresh_token.filter(|r| !r.is_empty()) {
            let refresh_options = self.policy.cookie_options(self.policy.refresh_token_days);
            if let Err(e) = self.cookies.set(REFRESH_TOKEN_COOKIE, refresh, &refresh_options) {
                log::warn!("⚠️ [SESSION] No se pudo guardar el refresh token: {}", e);
            }
        }

        if let Some(fallback) = &self.fallback {
            let plain = CookieOptions::default();
            let _ = fallback.set(DEBUG_TOKEN_KEY, access_token, &plain);
            if let Some(refresh) = refresh_token.filter(|r| !r.is_empty()) {
                let _ = fallback.set(DEBUG_REFRESH_TOKEN_KEY, refresh, &plain);
            }
        }
        log::debug!("💾 [SESSION] Tokens guardados");
    }

    pub fn get_token(&self) -> Option<String> {
        self.cookies.get(TOKEN_COOKIE)
    }

    pub fn get_refresh_token(&self) -> Option<String> {
        self.cookies.get(REFRESH_TOKEN_COOKIE).or_else(|| {
            self.fallback
                .as_ref()
                .and_then(|f| f.get(DEBUG_REFRESH_TOKEN_KEY))
        })
    }

    /// Cookie presente; en desarrollo restaura la cookie desde el respaldo
    pub fn is_authenticated(&self) -> bool {
        if self.get_token().is_some() {
            return true;
        }

        let Some(fallback) = &self.fallback else {
            return false;
        };
        match fallback.get(DEBUG_TOKEN_KEY) {
            Some(token) => {
                log::info!("🔄 [SESSION] Token restaurado desde localStorage");
                let options = self.policy.cookie_options(self.policy.access_token_days);
                if let Err(e) = self.cookies.set(TOKEN_COOKIE, &token, &options) {
                    log::warn!("⚠️ [SESSION] No se pudo restaurar la cookie: {}", e);
                }
                true
            }
            None => false,
        }
    }

    /// Borra todos los tokens locales
    pub fn clear(&self) {
        let _ = self.cookies.remove(TOKEN_COOKIE);
        let _ = self.cookies.remove(REFRESH_TOKEN_COOKIE);
        if let Some(fallback) = &self.fallback {
            let _ = fallback.remove(DEBUG_TOKEN_KEY);
            let _ = fallback.remove(DEBUG_REFRESH_TOKEN_KEY);
        }
        log::info!("🗑️ [SESSION] Sesión local limpiada");
    }
}
