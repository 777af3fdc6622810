// ============================================================================
// FORM STATE - Valores, errores por campo y flag de envío
// ============================================================================

use std::collections::BTreeMap;

pub type FieldErrors = BTreeMap<String, String>;

/// Valores de formulario con setter por nombre de campo
pub trait FormValues: Clone {
    fn set_field(&mut self, name: &str, value: &str);
}

#[derive(Clone, PartialEq, Debug)]
pub struct FormState<T> {
    pub values: T,
    pub errors: FieldErrors,
    pub is_submitting: bool,
}

impl<T> FormState<T> {
    pub fn new(values: T) -> Self {
        Self {
            values,
            errors: FieldErrors::new(),
            is_submitting: false,
        }
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}
