// ============================================================================
// COMPONENTS - Piezas de presentación reutilizables (solo DOM + clases CSS)
// ============================================================================

pub mod button;
pub mod card;
pub mod error_message;
pub mod footer;
pub mod header;
pub mod input_field;
pub mod link;
pub mod loading;
pub mod onsen_card;
pub mod select_field;
pub mod textarea_field;

pub use button::{render_button, ButtonProps, ButtonSize, ButtonVariant};
pub use card::{render_card, CardProps};
pub use error_message::{control_element_id, error_element_id, render_error_message};
pub use footer::render_footer;
pub use header::render_header;
pub use input_field::{render_input_field, InputProps};
pub use link::render_link;
pub use loading::{render_loading, LoadingSize};
pub use onsen_card::{format_visit_date, render_onsen_card, render_stars};
pub use select_field::{render_select_field, SelectProps};
pub use textarea_field::{render_textarea_field, TextareaProps};
