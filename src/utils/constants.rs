/// Nombres de cookies de sesión
pub const TOKEN_COOKIE: &str = "token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Respaldo en localStorage (solo desarrollo)
pub const DEBUG_TOKEN_KEY: &str = "debug_token";
pub const DEBUG_REFRESH_TOKEN_KEY: &str = "debug_refresh_token";

/// Prefijos de rutas que requieren sesión
pub const AUTH_REQUIRED_PREFIXES: &[&str] = &["/onsen", "/profile"];

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
