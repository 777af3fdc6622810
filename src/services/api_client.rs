// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP
// ============================================================================
// Bearer token, normalización de errores y refresh de sesión en 401.
// NO tiene lógica de negocio.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::config::AppConfig;
use crate::models::{codes, ApiError, AuthResponse, ClientError, RefreshRequest, ServerError, TokenPair};
use crate::services::session_store::SessionStore;
use crate::services::transport::{GlooTransport, HttpMethod, HttpRequest, HttpResponse, MultipartPart, RequestBody, Transport};
use crate::utils::error_handler::classify_error_body;
use crate::utils::i18n::tr;

/// Eventos de sesión publicados cuando el cliente pierde la autenticación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Expired,
    AuthenticationRequired,
}

type SessionObserver = Rc<dyn Fn(SessionEvent)>;

/// Configuración de una petición (ruta relativa a `api_url`)
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub retried: bool,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Un 401 se devuelve tal cual: sin refresh ni aviso a los observers
    pub fn without_refresh(mut self) -> Self {
        self.retried = true;
        self
    }

    pub fn query(mut self, params: Vec<(String, String)>) -> Self {
        self.query = params;
        self
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, parts: Vec<MultipartPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }
}

/// Cuerpo sin decodificar (export)
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn Transport>,
    session: SessionStore,
    observers: Rc<RefCell<Vec<SessionObserver>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Rc<dyn Transport>, session: SessionStore) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            session,
            observers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Cliente del navegador: gloo-net + cookies
    pub fn browser(config: &AppConfig) -> Self {
        Self::new(
            config.api_url.clone(),
            Rc::new(GlooTransport::new()),
            SessionStore::browser(config),
        )
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(SessionEvent) + 'static,
    {
        self.observers.borrow_mut().push(Rc::new(observer));
    }

    fn notify(&self, event: SessionEvent) {
        // Copia para que un observer pueda suscribir sin re-entrar en el borrow
        let observers: Vec<SessionObserver> = self.observers.borrow().clone();
        for observer in observers {
            observer(event);
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn build(&self, request: &ApiRequest) -> HttpRequest {
        let mut headers = Vec::new();
        if let RequestBody::Json(_) = request.body {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = self.session.get_token() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        HttpRequest {
            method: request.method,
            url: self.url(&request.path),
            query: request.query.clone(),
            headers,
            body: request.body.clone(),
        }
    }

    async fn execute(&self, mut request: ApiRequest) -> Result<HttpResponse, ClientError> {
        loop {
            log::debug!("🌐 [API] {} {}", request.method.as_str(), request.path);
            let response = self
                .transport
                .send(self.build(&request))
                .await
                .map_err(|e| {
                    log::error!("❌ [API] {} {}: {}", request.method.as_str(), request.path, e);
                    ClientError::Server(ServerError::unreachable(tr("err_unreachable")))
                })?;

            if response.ok() {
                return Ok(response);
            }

            if response.status == 401 && !request.retried {
                log::info!("🔄 [API] 401 en {}, renovando sesión", request.path);
                self.refresh_session().await?;
                request.retried = true;
                continue;
            }

            let error = error_from_response(&response);
            log::warn!("⚠️ [API] {} {} → {}", request.method.as_str(), request.path, error);
            return Err(error);
        }
    }

    /// Petición JSON; decodifica `T` del cuerpo
    pub async fn request<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let response = self.execute(request).await?;
        decode_body(&response.body)
    }

    /// Petición cuyo cuerpo no es JSON
    pub async fn request_raw(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        let response = self.execute(request).await?;
        Ok(RawResponse {
            content_type: response.content_type,
            bytes: response.body,
        })
    }

    async fn refresh_session(&self) -> Result<(), ClientError> {
        let Some(refresh_token) = self.session.get_refresh_token() else {
            log::warn!("🔐 [API] Sin refresh token, se requiere login");
            self.session.clear();
            self.notify(SessionEvent::AuthenticationRequired);
            return Err(ClientError::api(401, codes::AUTHENTICATION_REQUIRED, &tr("err_auth_required")));
        };

        match self.send_refresh(&refresh_token).await {
            Ok(tokens) => {
                let refresh = tokens.refresh_token.as_deref().unwrap_or(&refresh_token);
                self.session.save_tokens(&tokens.access_token, Some(refresh));
                log::info!("✅ [API] Sesión renovada");
                Ok(())
            }
            Err(e) => {
                log::warn!("🔐 [API] Refresh fallido: {}", e);
                self.session.clear();
                self.notify(SessionEvent::Expired);
                Err(ClientError::api(401, codes::SESSION_EXPIRED, &tr("err_session_expired")))
            }
        }
    }

    /// POST /auth/refresh directo por el transporte (sin reintentos)
    async fn send_refresh(&self, refresh_token: &str) -> Result<TokenPair, ClientError> {
        let body = RefreshRequest { refresh_token: refresh_token.to_string() };
        let request = HttpRequest {
            method: HttpMethod::Post,
            url: self.url("/auth/refresh"),
            query: Vec::new(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: RequestBody::Json(serde_json::to_value(&body)?),
        };
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| ClientError::Server(ServerError::unreachable(e.to_string())))?;
        if !response.ok() {
            return Err(error_from_response(&response));
        }
        let auth: AuthResponse = decode_body(&response.body)?;
        auth.tokens()
            .cloned()
            .ok_or_else(|| ClientError::Unexpected("refresh response without tokens".to_string()))
    }
}

/// Cuerpo vacío se decodifica como `null` (p.ej. 204 en DELETE)
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ClientError> {
    let is_blank = body.iter().all(|b| b.is_ascii_whitespace());
    let source: &[u8] = if is_blank { b"null" } else { body };
    Ok(serde_json::from_slice(source)?)
}

fn error_from_response(response: &HttpResponse) -> ClientError {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&response.body) {
        if let ClientError::Api(e) = classify_error_body(response.status, &value) {
            return ClientError::Api(e);
        }
    }
    let message = if response.status_text.is_empty() {
        format!("HTTP {}", response.status)
    } else {
        response.status_text.clone()
    };
    ClientError::Api(ApiError::new(
        response.status,
        &format!("HTTP_{}", response.status),
        &message,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use futures::executor::block_on;
    use serde_json::json;
    use crate::models::{Envelope, OnsenImage};
    use crate::services::testing::{json_response, MockTransport};
    use crate::services::transport::TransportError;

    fn client(mock: &MockTransport) -> ApiClient {
        ApiClient::new("http://api.test/api/", Rc::new(mock.clone()), crate::services::testing::memory_session())
    }

    #[test]
    fn attaches_bearer_and_json_content_type() {
        let mock = MockTransport::new();
        mock.push(json_response(200, json!({"data": {"image_id": "i1", "image_url": "/i1.jpg"}})));
        let api = client(&mock);
        api.session().save_tokens("tok", Some("ref"));

        let request = ApiRequest::post("/onsen_images").json(&json!({"x": 1})).unwrap();
        let image: Envelope<OnsenImage> = block_on(api.request(request)).unwrap();
        assert_eq!(image.into_data().image_id, "i1");

        let sent = mock.requests();
        assert_eq!(sent[0].url, "http://api.test/api/onsen_images");
        assert_eq!(sent[0].header("authorization"), Some("Bearer tok"));
        assert_eq!(sent[0].header("content-type"), Some("application/json"));
    }

    #[test]
    fn multipart_omits_content_type() {
        let mock = MockTransport::new();
        mock.push(json_response(201, json!({"image_id": "i1", "image_url": "/i1.jpg"})));
        let api = client(&mock);
        let request = ApiRequest::post("/onsen_images").multipart(vec![MultipartPart::Text {
            name: "onsen_id".into(),
            value: "o1".into(),
        }]);
        let _: OnsenImage = block_on(api.request(request)).unwrap();
        let sent = mock.requests();
        assert_eq!(sent[0].header("content-type"), None);
        assert_eq!(sent[0].header("authorization"), None);
    }

    #[test]
    fn refreshes_once_and_retries_original_request() {
        let mock = MockTransport::new();
        mock.push(json_response(401, json!({"error": {"code": "TOKEN_EXPIRED", "message": "expired"}})));
        mock.push(json_response(200, json!({"data": {"access_token": "new-access"}})));
        mock.push(json_response(200, json!({"image_id": "i1", "image_url": "/i1.jpg"})));
        let api = client(&mock);
        api.session().save_tokens("old-access", Some("old-refresh"));

        let image: OnsenImage = block_on(api.request(ApiRequest::get("/onsen_images/i1"))).unwrap();
        assert_eq!(image.image_id, "i1");

        let sent = mock.requests();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[1].url, "http://api.test/api/auth/refresh");
        assert_eq!(sent[1].body, RequestBody::Json(json!({"refresh_token": "old-refresh"})));
        assert_eq!(sent[1].header("authorization"), None);
        assert_eq!(sent[2].header("authorization"), Some("Bearer new-access"));
        assert_eq!(api.session().get_token().as_deref(), Some("new-access"));
        assert_eq!(api.session().get_refresh_token().as_deref(), Some("old-refresh"));
    }

    #[test]
    fn second_401_is_not_retried_again() {
        let mock = MockTransport::new();
        mock.push(json_response(401, json!({"error": {"code": "TOKEN_EXPIRED", "message": "expired"}})));
        mock.push(json_response(200, json!({"data": {"access_token": "a2", "refresh_token": "r2"}})));
        mock.push(json_response(401, json!({"error": {"code": "INVALID_TOKEN", "message": "still bad"}})));
        let api = client(&mock);
        api.session().save_tokens("a1", Some("r1"));

        let err = block_on(api.request::<OnsenImage>(ApiRequest::get("/onsen_images/i1"))).unwrap_err();
        assert_eq!(err.as_api().map(|e| e.code()), Some("INVALID_TOKEN"));
        assert_eq!(mock.requests().len(), 3);
        assert_eq!(api.session().get_refresh_token().as_deref(), Some("r2"));
    }

    #[test]
    fn failed_refresh_clears_session_and_publishes_expired() {
        let mock = MockTransport::new();
        mock.push(json_response(401, json!({})));
        mock.push(json_response(401, json!({"error": {"code": "INVALID_TOKEN", "message": "bad refresh"}})));
        let api = client(&mock);
        api.session().save_tokens("a", Some("r"));
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        api.subscribe(move |e| sink.borrow_mut().push(e));

        let err = block_on(api.request::<OnsenImage>(ApiRequest::get("/onsen_images/i1"))).unwrap_err();
        assert_eq!(err.as_api().map(|e| e.code()), Some(codes::SESSION_EXPIRED));
        assert_eq!(*events.borrow(), vec![SessionEvent::Expired]);
        assert!(api.session().get_token().is_none());
        assert!(api.session().get_refresh_token().is_none());
    }

    #[test]
    fn missing_refresh_token_requires_authentication() {
        let mock = MockTransport::new();
        mock.push(json_response(401, json!({"error": {"code": "AUTHENTICATION_REQUIRED", "message": "login"}})));
        let api = client(&mock);
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        api.subscribe(move |e| {
            assert_eq!(e, SessionEvent::AuthenticationRequired);
            counter.set(counter.get() + 1);
        });

        let err = block_on(api.request::<OnsenImage>(ApiRequest::get("/onsen_logs"))).unwrap_err();
        assert_eq!(err.as_api().map(|e| e.code()), Some(codes::AUTHENTICATION_REQUIRED));
        assert_eq!(calls.get(), 1);
        assert_eq!(mock.requests().len(), 1);
    }

    #[test]
    fn non_conforming_error_body_uses_http_status_code() {
        let mock = MockTransport::new();
        mock.push(HttpResponse {
            status: 502,
            status_text: "Bad Gateway".into(),
            content_type: Some("text/html".into()),
            body: b"<html>oops</html>".to_vec(),
        });
        let api = client(&mock);
        let err = block_on(api.request::<OnsenImage>(ApiRequest::get("/onsen_logs"))).unwrap_err();
        let api_err = err.as_api().unwrap();
        assert_eq!(api_err.code(), "HTTP_502");
        assert_eq!(api_err.message(), "Bad Gateway");
        assert_eq!(api_err.status, 502);
    }

    #[test]
    fn conforming_error_body_passes_through() {
        let mock = MockTransport::new();
        mock.push(json_response(404, json!({"error": {"code": "NOT_FOUND", "message": "見つかりません"}})));
        let api = client(&mock);
        let err = block_on(api.request::<OnsenImage>(ApiRequest::get("/onsen_logs/x"))).unwrap_err();
        assert_eq!(err, ClientError::api(404, "NOT_FOUND", "見つかりません"));
    }

    #[test]
    fn transport_failure_is_unreachable_server() {
        let mock = MockTransport::new();
        mock.push_error(TransportError::Network("Failed to fetch".into()));
        let api = client(&mock);
        let err = block_on(api.request::<OnsenImage>(ApiRequest::get("/onsen_logs"))).unwrap_err();
        assert_eq!(err.as_server().map(|s| s.status), Some(0));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn undecodable_success_body_is_unexpected() {
        let mock = MockTransport::new();
        mock.push(json_response(200, json!({"nothing": "useful"})));
        let api = client(&mock);
        let err = block_on(api.request::<OnsenImage>(ApiRequest::get("/onsen_images/i1"))).unwrap_err();
        assert!(matches!(err, ClientError::Unexpected(_)));
    }

    #[test]
    fn raw_request_keeps_bytes_and_content_type() {
        let mock = MockTransport::new();
        mock.push(HttpResponse {
            status: 200,
            status_text: "OK".into(),
            content_type: Some("text/csv".into()),
            body: b"id,name\n1,Kusatsu\n".to_vec(),
        });
        let api = client(&mock);
        let raw = block_on(api.request_raw(ApiRequest::get("/onsen_logs/export"))).unwrap();
        assert_eq!(raw.content_type.as_deref(), Some("text/csv"));
        assert!(raw.bytes.starts_with(b"id,name"));
    }

    #[test]
    fn empty_success_body_decodes_as_unit() {
        let mock = MockTransport::new();
        mock.push(HttpResponse {
            status: 204,
            status_text: "No Content".into(),
            content_type: None,
            body: Vec::new(),
        });
        let api = client(&mock);
        block_on(api.request::<()>(ApiRequest::delete("/onsen_logs/1"))).unwrap();
        assert_eq!(mock.requests()[0].method, HttpMethod::Delete);
    }
}
