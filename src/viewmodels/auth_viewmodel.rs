// ============================================================================
// AUTH VIEWMODEL - Guard de rutas + login/register/logout
// ============================================================================
// Devuelve NavigationIntent; el router de app.rs decide cómo navegar.
// ============================================================================

use std::collections::BTreeMap;
use crate::models::{ClientError, NavigationIntent, Route};
use crate::services::AuthService;
use crate::state::{AuthState, FieldErrors, FormValues};
use crate::utils::error_handler::get_friendly_error_message;
use crate::utils::validation::{
    validate_email, validate_password, validate_password_confirmation, ValidationResult,
};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Decide la navegación para una ruta
pub fn guard(route: &Route, logged_in: bool, loading: bool) -> NavigationIntent {
    if loading {
        return NavigationIntent::Stay;
    }
    if route.requires_auth() && !logged_in {
        return NavigationIntent::Redirect(Route::Login);
    }
    if logged_in && route.is_auth_page() {
        return NavigationIntent::Redirect(Route::OnsenList);
    }
    NavigationIntent::Stay
}

// ----------------------------------------------------------------------------
// Formularios de autenticación
// ----------------------------------------------------------------------------

#[derive(Clone, PartialEq, Debug, Default)]
pub struct LoginValues {
    pub email: String,
    pub password: String,
}

impl FormValues for LoginValues {
    fn set_field(&mut self, name: &str, value: &str) {
        match name {
            "email" => self.email = value.to_string(),
            "password" => self.password = value.to_string(),
            _ => log::warn!("⚠️ [AUTH] Campo desconocido: {}", name),
        }
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct RegisterValues {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl FormValues for RegisterValues {
    fn set_field(&mut self, name: &str, value: &str) {
        match name {
            "email" => self.email = value.to_string(),
            "password" => self.password = value.to_string(),
            "confirm_password" => self.confirm_password = value.to_string(),
            _ => log::warn!("⚠️ [AUTH] Campo desconocido: {}", name),
        }
    }
}

fn collect(fields: &[(&str, ValidationResult)]) -> FieldErrors {
    fields
        .iter()
        .filter_map(|(name, result)| result.error.clone().map(|e| (name.to_string(), e)))
        .collect::<BTreeMap<_, _>>()
}

pub fn validate_login(values: &LoginValues) -> FieldErrors {
    collect(&[
        ("email", validate_email(&values.email)),
        ("password", validate_password(&values.password, MIN_PASSWORD_LENGTH)),
    ])
}

pub fn validate_register(values: &RegisterValues) -> FieldErrors {
    collect(&[
        ("email", validate_email(&values.email)),
        ("password", validate_password(&values.password, MIN_PASSWORD_LENGTH)),
        (
            "confirm_password",
            validate_password_confirmation(&values.password, &values.confirm_password),
        ),
    ])
}

/// Login/registro + estado de autenticación compartido
#[derive(Clone)]
pub struct AuthViewModel {
    service: AuthService,
    state: AuthState,
}

impl AuthViewModel {
    pub fn new(service: AuthService, state: AuthState) -> Self {
        Self { service, state }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Comprobación inicial (termina el loading)
    pub fn check_auth(&self) -> bool {
        let authenticated = self.service.is_authenticated();
        self.state.set_logged_in(authenticated);
        authenticated
    }

    pub fn guard(&self, route: &Route) -> NavigationIntent {
        let status = self.state.status();
        guard(route, status.is_logged_in, status.loading)
    }

    /// Éxito → lista; error → mensaje para mostrar en línea
    pub async fn login(&self, values: LoginValues) -> Result<NavigationIntent, String> {
        let result = self.service.login(&values.email, &values.password).await;
        self.after_auth(result.map(|_| ()))
    }

    pub async fn register(&self, values: RegisterValues) -> Result<NavigationIntent, String> {
        let result = self.service.register(&values.email, &values.password).await;
        self.after_auth(result.map(|_| ()))
    }

    fn after_auth(&self, result: Result<(), ClientError>) -> Result<NavigationIntent, String> {
        match result {
            Ok(()) => {
                let logged_in = self.check_auth();
                if logged_in {
                    Ok(NavigationIntent::Redirect(Route::OnsenList))
                } else {
                    Ok(NavigationIntent::Stay)
                }
            }
            Err(e) => {
                log::warn!("⚠️ [AUTH] {}", e);
                Err(get_friendly_error_message(&e))
            }
        }
    }

    pub async fn logout(&self) -> NavigationIntent {
        let intent = self.service.logout().await;
        self.state.logout();
        intent
    }
}
