// ============================================================================
// AUTH STATE - Estado de autenticación observado por el router
// ============================================================================

use crate::state::reactivity::ReactiveState;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AuthStatus {
    pub is_logged_in: bool,
    pub loading: bool,
}

/// `loading` es true hasta la primera comprobación de sesión
#[derive(Clone)]
pub struct AuthState {
    status: ReactiveState<AuthStatus>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            status: ReactiveState::new(AuthStatus { is_logged_in: false, loading: true }),
        }
    }

    pub fn status(&self) -> AuthStatus {
        self.status.get()
    }

    pub fn get_logged_in(&self) -> bool {
        self.status.with(|s| s.is_logged_in)
    }

    pub fn is_loading(&self) -> bool {
        self.status.with(|s| s.loading)
    }

    /// Resultado de la comprobación de sesión (termina el loading)
    pub fn set_logged_in(&self, logged_in: bool) {
        if self.status() == (AuthStatus { is_logged_in: logged_in, loading: false }) {
            return;
        }
        self.status.set(AuthStatus { is_logged_in: logged_in, loading: false });
    }

    pub fn logout(&self) {
        self.set_logged_in(false);
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.status.subscribe(callback);
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn starts_loading_and_notifies_only_on_change() {
        let auth = AuthState::new();
        assert!(auth.is_loading());
        assert!(!auth.get_logged_in());

        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        auth.subscribe(move || counter.set(counter.get() + 1));

        auth.set_logged_in(true);
        auth.set_logged_in(true);
        assert!(!auth.is_loading());
        assert!(auth.get_logged_in());
        auth.logout();
        assert!(!auth.get_logged_in());
        assert_eq!(calls.get(), 2);
    }
}
