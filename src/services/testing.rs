// ============================================================================
// TESTING - Transportes en memoria para tests nativos
// ============================================================================

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use crate::models::{parse_visit_date, OnsenImage, OnsenLog, OnsenLogCreateRequest, OnsenLogUpdateRequest};
use crate::services::api_client::ApiClient;
use crate::services::session_store::{SessionPolicy, SessionStore};
use crate::services::transport::{HttpMethod, HttpRequest, HttpResponse, MultipartPart, RequestBody, Transport, TransportError};
use crate::utils::storage::MemoryStore;

pub const TEST_API_URL: &str = "http://api.test/api";

pub fn memory_session() -> SessionStore {
    SessionStore::new(
        Rc::new(MemoryStore::new()),
        None,
        SessionPolicy { access_token_days: 7, refresh_token_days: 30, secure: false },
    )
}

pub fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse {
        status,
        status_text: String::new(),
        content_type: Some("application/json".to_string()),
        body: body.to_string().into_bytes(),
    }
}

// ----------------------------------------------------------------------------
// Respuestas guionizadas
// ----------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Rc<RefCell<VecDeque<Result<HttpResponse, TransportError>>>>,
    requests: Rc<RefCell<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: HttpResponse) {
        self.responses.borrow_mut().push_back(Ok(response));
    }

    pub fn push_error(&self, error: TransportError) {
        self.responses.borrow_mut().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(TEST_API_URL, Rc::new(self.clone()), memory_session())
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".to_string())))
    }
}

// ----------------------------------------------------------------------------
// Backend en memoria (onsen_logs + onsen_images)
// ----------------------------------------------------------------------------

#[derive(Default)]
struct BackendData {
    next_id: u32,
    logs: BTreeMap<String, OnsenLog>,
}

#[derive(Clone, Default)]
pub struct InMemoryBackend {
    data: Rc<RefCell<BackendData>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(&self) -> ApiClient {
        let client = ApiClient::new(TEST_API_URL, Rc::new(self.clone()), memory_session());
        client.session().save_tokens("backend-token", Some("backend-refresh"));
        client
    }

    pub fn log_count(&self) -> usize {
        self.data.borrow().logs.len()
    }

    fn not_found() -> HttpResponse {
        json_response(404, json!({"error": {"code": "NOT_FOUND", "message": "Onsen log not found"}}))
    }

    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        if request.header("authorization").is_none() {
            return json_response(401, json!({"error": {"code": "AUTHENTICATION_REQUIRED", "message": "login"}}));
        }
        let path = request.url.trim_start_matches(TEST_API_URL).to_string();
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        let mut data = self.data.borrow_mut();

        match (request.method, segments.as_slice()) {
            (HttpMethod::Get, ["onsen_logs"]) => {
                let logs: Vec<&OnsenLog> = data.logs.values().collect();
                json_response(200, json!({"data": {
                    "onsen_logs": logs,
                    "total_count": logs.len(),
                    "page": 1,
                    "limit": 10,
                }}))
            }
            (HttpMethod::Post, ["onsen_logs"]) => {
                let RequestBody::Json(body) = &request.body else {
                    return json_response(400, json!({"error": {"code": "INVALID_INPUT", "message": "json expected"}}));
                };
                let Ok(create) = serde_json::from_value::<OnsenLogCreateRequest>(body.clone()) else {
                    return json_response(400, json!({"error": {"code": "INVALID_INPUT", "message": "bad body"}}));
                };
                let Some(visit_date) = parse_visit_date(&create.visit_date) else {
                    return json_response(400, json!({"error": {"code": "INVALID_INPUT", "message": "bad visit_date"}}));
                };
                data.next_id += 1;
                let id = format!("log-{}", data.next_id);
                let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).single().unwrap_or_else(Utc::now);
                let log = OnsenLog {
                    id: id.clone(),
                    user_id: "user-1".to_string(),
                    name: create.name,
                    location: create.location,
                    spring_type: Some(create.spring_type).filter(|s| !s.is_empty()),
                    features: create.features.unwrap_or_default().into_iter().collect(),
                    visit_date,
                    rating: create.rating,
                    comment: create.comment,
                    created_at: now,
                    updated_at: now,
                    images: Vec::new(),
                };
                data.logs.insert(id, log.clone());
                json_response(201, json!({"data": log, "message": "created"}))
            }
            (HttpMethod::Get, ["onsen_logs", id]) => match data.logs.get(*id) {
                Some(log) => json_response(200, json!({"data": log})),
                None => Self::not_found(),
            },
            (HttpMethod::Put, ["onsen_logs", id]) => {
                let update = match &request.body {
                    RequestBody::Json(body) => serde_json::from_value::<OnsenLogUpdateRequest>(body.clone()).ok(),
                    _ => None,
                };
                let (Some(update), Some(log)) = (update, data.logs.get_mut(*id)) else {
                    return Self::not_found();
                };
                if let Some(name) = update.name {
                    log.name = name;
                }
                if let Some(rating) = update.rating {
                    log.rating = Some(rating);
                }
                if let Some(features) = update.features {
                    log.features = features.into_iter().collect();
                }
                json_response(200, json!({"data": log}))
            }
            (HttpMethod::Delete, ["onsen_logs", id]) => match data.logs.remove(*id) {
                Some(_) => json_response(200, json!({"message": "deleted"})),
                None => Self::not_found(),
            },
            (HttpMethod::Post, ["onsen_images"]) => {
                let RequestBody::Multipart(parts) = &request.body else {
                    return json_response(400, json!({"error": {"code": "INVALID_INPUT", "message": "multipart expected"}}));
                };
                let onsen_id = parts.iter().find_map(|p| match p {
                    MultipartPart::Text { name, value } if name == "onsen_id" => Some(value.clone()),
                    _ => None,
                });
                let file_name = parts.iter().find_map(|p| match p {
                    MultipartPart::File { name, file_name, .. } if name == "file" => Some(file_name.clone()),
                    _ => None,
                });
                let (Some(onsen_id), Some(file_name)) = (onsen_id, file_name) else {
                    return json_response(400, json!({"error": {"code": "INVALID_INPUT", "message": "missing parts"}}));
                };
                let Some(log) = data.logs.get_mut(&onsen_id) else {
                    return Self::not_found();
                };
                let image = OnsenImage {
                    image_id: format!("img-{}", log.images.len() + 1),
                    image_url: format!("/uploads/{}", file_name),
                };
                log.images.push(image.clone());
                json_response(201, json!({"data": image}))
            }
            (HttpMethod::Delete, ["onsen_images", id]) => {
                let owner = data.logs.values_mut().find(|l| l.images.iter().any(|i| i.image_id == *id));
                match owner {
                    Some(log) => {
                        log.images.retain(|i| i.image_id != *id);
                        json_response(200, json!({"message": "deleted"}))
                    }
                    None => Self::not_found(),
                }
            }
            _ => Self::not_found(),
        }
    }
}

#[async_trait(?Send)]
impl Transport for InMemoryBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Ok(self.handle(&request))
    }
}
