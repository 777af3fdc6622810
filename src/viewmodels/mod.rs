// ============================================================================
// VIEWMODELS - Lógica de pantalla sin DOM
// ============================================================================

pub mod auth_viewmodel;
pub mod form_controller;
pub mod onsen_detail_viewmodel;
pub mod onsen_form_viewmodel;
pub mod onsen_list_viewmodel;

pub use auth_viewmodel::{AuthViewModel, LoginValues, RegisterValues};
pub use form_controller::{FormController, PreventDefault, SubmitHandler, SubmitOutcome, Validator};
pub use onsen_detail_viewmodel::{DetailState, OnsenDetailViewModel};
pub use onsen_form_viewmodel::{CreateOutcome, OnsenFormValues, OnsenFormViewModel};
pub use onsen_list_viewmodel::{FilterForm, ListState, OnsenListViewModel};
