// ============================================================================
// SERVICES - SOLO comunicación HTTP (sin estado de UI)
// ============================================================================

pub mod api_client;
pub mod auth_service;
pub mod onsen_image_service;
pub mod onsen_log_service;
pub mod session_store;
pub mod transport;

#[cfg(test)]
pub mod testing;

pub use api_client::{ApiClient, SessionEvent};
pub use auth_service::AuthService;
pub use onsen_image_service::OnsenImageService;
pub use onsen_log_service::OnsenLogService;
