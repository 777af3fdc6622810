// ============================================================================
// VIEWS - Renderizado DOM (sin lógica de negocio)
// ============================================================================

pub mod components;
pub mod layout;
pub mod pages;

pub use layout::render_layout;
pub use pages::Page;
