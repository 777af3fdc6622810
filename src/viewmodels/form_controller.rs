// ============================================================================
// FORM CONTROLLER - Lógica genérica de formularios (sin DOM)
// ============================================================================
// Nunca se mantiene un borrow del estado durante el await del handler.
// ============================================================================

use std::rc::Rc;
use futures::future::LocalBoxFuture;
use crate::state::{FieldErrors, FormState, FormValues, ReactiveState};

/// Evento cuyo comportamiento por defecto se puede cancelar
pub trait PreventDefault {
    fn prevent_default(&self);
}

impl PreventDefault for web_sys::Event {
    fn prevent_default(&self) {
        web_sys::Event::prevent_default(self);
    }
}

pub type Validator<T> = Rc<dyn Fn(&T) -> FieldErrors>;
pub type SubmitHandler<T, R> = Rc<dyn Fn(T) -> LocalBoxFuture<'static, R>>;

/// Resultado de `handle_submit`
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<R> {
    Invalid(FieldErrors),
    Submitted(R),
}

impl<R> SubmitOutcome<R> {
    pub fn submitted(self) -> Option<R> {
        match self {
            SubmitOutcome::Submitted(r) => Some(r),
            SubmitOutcome::Invalid(_) => None,
        }
    }
}

pub struct FormController<T, R> {
    initial: T,
    state: ReactiveState<FormState<T>>,
    validator: Option<Validator<T>>,
    on_submit: SubmitHandler<T, R>,
}

impl<T, R> Clone for FormController<T, R>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            initial: self.initial.clone(),
            state: self.state.clone(),
            validator: self.validator.clone(),
            on_submit: self.on_submit.clone(),
        }
    }
}

impl<T, R> FormController<T, R>
where
    T: FormValues + 'static,
    R: 'static,
{
    pub fn new(initial: T, validator: Option<Validator<T>>, on_submit: SubmitHandler<T, R>) -> Self {
        Self {
            state: ReactiveState::new(FormState::new(initial.clone())),
            initial,
            validator,
            on_submit,
        }
    }

    pub fn state(&self) -> FormState<T> {
        self.state.get()
    }

    pub fn values(&self) -> T {
        self.state.with(|s| s.values.clone())
    }

    pub fn errors(&self) -> FieldErrors {
        self.state.with(|s| s.errors.clone())
    }

    pub fn error(&self, field: &str) -> Option<String> {
        self.state.with(|s| s.error(field).map(str::to_string))
    }

    pub fn is_submitting(&self) -> bool {
        self.state.with(|s| s.is_submitting)
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.state.subscribe(callback);
    }

    /// Como `subscribe`, recibiendo el estado del formulario
    pub fn watch<F>(&self, callback: F)
    where
        F: Fn(&FormState<T>) + 'static,
    {
        self.state.watch(callback);
    }

    /// Cambio desde un input: actualiza el campo y borra su error
    pub fn handle_change(&self, name: &str, value: &str) {
        self.state.update(|s| {
            s.values.set_field(name, value);
            s.errors.remove(name);
        });
    }

    pub fn set_field_value(&self, name: &str, value: &str) {
        self.handle_change(name, value);
    }

    /// Reemplaza los valores completos (p.ej. tras cargar un registro)
    pub fn set_values(&self, values: T) {
        self.state.update(|s| s.values = values);
    }

    pub fn set_errors(&self, errors: FieldErrors) {
        self.state.update(|s| s.errors = errors);
    }

    pub fn reset_form(&self) {
        let initial = self.initial.clone();
        self.state.set(FormState::new(initial));
    }

    pub async fn handle_submit<E>(&self, event: &E) -> SubmitOutcome<R>
    where
        E: PreventDefault + ?Sized,
    {
        event.prevent_default();
        let values = self.values();

        if let Some(validator) = &self.validator {
            let errors = validator(&values);
            if !errors.is_empty() {
                log::debug!("📝 [FORM] {} errores de validación", errors.len());
                self.set_errors(errors.clone());
                return SubmitOutcome::Invalid(errors);
            }
        }

        self.state.update(|s| {
            s.is_submitting = true;
            s.errors.clear();
        });
        let result = (self.on_submit)(values).await;
        self.state.update(|s| s.is_submitting = false);
        SubmitOutcome::Submitted(result)
    }
}
