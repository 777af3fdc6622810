// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::Route;
use crate::state::{AuthState, ReactiveState};

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub route: ReactiveState<Route>,
    // Mensaje para mostrar tras una navegación (p.ej. subida parcial de fotos)
    pub flash: Rc<RefCell<Option<String>>>,
}

impl AppState {
    pub fn new(initial_route: Route) -> Self {
        Self {
            auth: AuthState::new(),
            route: ReactiveState::new(initial_route),
            flash: Rc::new(RefCell::new(None)),
        }
    }

    pub fn current_route(&self) -> Route {
        self.route.get()
    }

    pub fn set_flash(&self, message: Option<String>) {
        *self.flash.borrow_mut() = message;
    }

    /// Lee y consume el mensaje pendiente
    pub fn take_flash(&self) -> Option<String> {
        self.flash.borrow_mut().take()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_is_consumed_once() {
        let state = AppState::default();
        state.set_flash(Some("x".into()));
        assert_eq!(state.take_flash().as_deref(), Some("x"));
        assert_eq!(state.take_flash(), None);
    }
}
