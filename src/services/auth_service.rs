// ============================================================================
// AUTH SERVICE - register / login / logout
// ============================================================================

use crate::models::{AuthResponse, ClientError, LoginRequest, NavigationIntent, RegisterRequest, Route};
use crate::services::api_client::{ApiClient, ApiRequest};

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        log::info!("📝 [AUTH] Registro para {}", email);
        let response: AuthResponse = self
            .client
            .request(ApiRequest::post("/auth/register").json(&body)?)
            .await?;
        self.store_tokens(&response);
        Ok(response)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        log::info!("🔐 [AUTH] Login para {}", email);
        let response: AuthResponse = self
            .client
            .request(ApiRequest::post("/auth/login").json(&body)?)
            .await?;
        self.store_tokens(&response);
        Ok(response)
    }

    fn store_tokens(&self, response: &AuthResponse) {
        match response.tokens() {
            Some(tokens) => {
                self.client
                    .session()
                    .save_tokens(&tokens.access_token, tokens.refresh_token.as_deref());
                log::info!("✅ [AUTH] Sesión iniciada");
            }
            None => log::warn!("⚠️ [AUTH] Respuesta sin access_token"),
        }
    }

    /// Cierra la sesión; el fallo del servidor solo se registra.
    /// Un token caducado aquí no renueva la sesión ni la marca como expirada.
    pub async fn logout(&self) -> NavigationIntent {
        if let Err(e) = self
            .client
            .request::<serde::de::IgnoredAny>(ApiRequest::post("/auth/logout").without_refresh())
            .await
        {
            log::error!("❌ [AUTH] Error en /auth/logout: {}", e);
        }
        self.client.session().clear();
        log::info!("👋 [AUTH] Logout completado");
        NavigationIntent::Redirect(Route::Login)
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }

    pub fn get_token(&self) -> Option<String> {
        self.client.session().get_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;
    use crate::services::testing::{json_response, MockTransport};
    use std::cell::RefCell;
    use std::rc::Rc;
    use crate::services::transport::{HttpMethod, RequestBody, TransportError};
    use crate::services::SessionEvent;

    #[test]
    fn login_saves_tokens() {
        let mock = MockTransport::new();
        mock.push(json_response(200, json!({
            "data": {"access_token": "acc", "refresh_token": "ref"},
            "message": "ログインしました"
        })));
        let auth = AuthService::new(mock.client());

        let response = block_on(auth.login("user@example.com", "password1")).unwrap();
        assert_eq!(response.message.as_deref(), Some("ログインしました"));
        assert!(auth.is_authenticated());
        assert_eq!(auth.get_token().as_deref(), Some("acc"));
        assert_eq!(auth.client().session().get_refresh_token().as_deref(), Some("ref"));

        let sent = mock.requests();
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert!(sent[0].url.ends_with("/auth/login"));
        assert_eq!(
            sent[0].body,
            RequestBody::Json(json!({"email": "user@example.com", "password": "password1"}))
        );
    }

    #[test]
    fn register_without_token_leaves_session_empty() {
        let mock = MockTransport::new();
        mock.push(json_response(201, json!({"message": "確認メールを送信しました"})));
        let auth = AuthService::new(mock.client());
        block_on(auth.register("new@example.com", "password1")).unwrap();
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn failed_login_keeps_tokens_unset() {
        let mock = MockTransport::new();
        mock.push(json_response(400, json!({"error": {"code": "INVALID_INPUT", "message": "メールアドレスまたはパスワードが違います"}})));
        let auth = AuthService::new(mock.client());
        let err = block_on(auth.login("user@example.com", "wrong")).unwrap_err();
        assert_eq!(err.as_api().map(|e| e.message()), Some("メールアドレスまたはパスワードが違います"));
        assert!(auth.get_token().is_none());
    }

    #[test]
    fn logout_clears_even_when_server_fails() {
        let mock = MockTransport::new();
        mock.push_error(TransportError::Network("offline".into()));
        let auth = AuthService::new(mock.client());
        auth.client().session().save_tokens("acc", Some("ref"));

        let intent = block_on(auth.logout());
        assert_eq!(intent, NavigationIntent::Redirect(Route::Login));
        assert!(!auth.is_authenticated());
        assert!(auth.client().session().get_refresh_token().is_none());
        assert_eq!(mock.requests()[0].header("authorization"), Some("Bearer acc"));
    }

    #[test]
    fn logout_with_stale_token_does_not_refresh_or_publish() {
        let mock = MockTransport::new();
        mock.push(json_response(401, json!({"error": {"code": "TOKEN_EXPIRED", "message": "expired"}})));
        mock.push(json_response(401, json!({"error": {"code": "INVALID_TOKEN", "message": "invalid"}})));
        let auth = AuthService::new(mock.client());
        auth.client().session().save_tokens("stale", Some("ref"));

        let events: Rc<RefCell<Vec<SessionEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        auth.client().subscribe(move |event| sink.borrow_mut().push(event));

        let intent = block_on(auth.logout());
        assert_eq!(intent, NavigationIntent::Redirect(Route::Login));
        assert!(events.borrow().is_empty());
        assert_eq!(mock.requests().len(), 1);
        assert!(mock.requests()[0].url.ends_with("/auth/logout"));
        assert!(!auth.is_authenticated());
    }
}
