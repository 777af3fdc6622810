// ============================================================================
// ONSEN FORM VIEWMODEL - Alta y edición de registros
// ============================================================================

use std::collections::BTreeSet;
use chrono::NaiveDate;
use crate::models::{
    clamp_rating, parse_visit_date, ClientError, ImageUpload, NavigationIntent, OnsenLog,
    OnsenLogCreateRequest, OnsenLogUpdateRequest, Route,
};
use crate::services::{OnsenImageService, OnsenLogService};
use crate::state::{FieldErrors, FormValues};
use crate::utils::constants::MAX_IMAGE_BYTES;
use crate::utils::i18n::tr;

pub const DEFAULT_NEW_RATING: u8 = 3;

/// Valores del formulario (comunes a alta y edición)
#[derive(Clone, PartialEq, Debug, Default)]
pub struct OnsenFormValues {
    pub name: String,
    pub location: String,
    pub visit_date: String,
    pub rating: u8,
    pub spring_type: String,
    pub features: BTreeSet<String>,
    pub comment: String,
}

impl OnsenFormValues {
    /// Alta: fecha de hoy y valoración 3
    pub fn for_new(today: NaiveDate) -> Self {
        Self {
            visit_date: today.format("%Y-%m-%d").to_string(),
            rating: DEFAULT_NEW_RATING,
            ..Default::default()
        }
    }

    pub fn from_log(log: &OnsenLog) -> Self {
        Self {
            name: log.name.clone(),
            location: log.location.clone().unwrap_or_default(),
            visit_date: log.visit_date.format("%Y-%m-%d").to_string(),
            rating: log.rating.unwrap_or(0),
            spring_type: log.spring_type.clone().unwrap_or_default(),
            features: log.features.clone(),
            comment: log.comment.clone().unwrap_or_default(),
        }
    }

    pub fn toggle_feature(&mut self, feature: &str) {
        if !self.features.remove(feature) {
            self.features.insert(feature.to_string());
        }
    }

    pub fn to_create_request(&self) -> OnsenLogCreateRequest {
        OnsenLogCreateRequest {
            name: self.name.trim().to_string(),
            location: non_empty(&self.location),
            spring_type: self.spring_type.clone(),
            features: if self.features.is_empty() {
                None
            } else {
                Some(self.features.iter().cloned().collect())
            },
            visit_date: self.visit_date.clone(),
            rating: Some(self.rating),
            comment: non_empty(&self.comment),
        }
    }

    pub fn to_update_request(&self) -> OnsenLogUpdateRequest {
        OnsenLogUpdateRequest {
            name: Some(self.name.trim().to_string()),
            location: Some(self.location.trim().to_string()),
            spring_type: Some(self.spring_type.clone()),
            features: Some(self.features.iter().cloned().collect()),
            visit_date: Some(self.visit_date.clone()),
            rating: Some(self.rating),
            comment: Some(self.comment.clone()),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    Some(value.trim().to_string()).filter(|v| !v.is_empty())
}

impl FormValues for OnsenFormValues {
    fn set_field(&mut self, name: &str, value: &str) {
        match name {
            "name" => self.name = value.to_string(),
            "location" => self.location = value.to_string(),
            "visit_date" => self.visit_date = value.to_string(),
            "rating" => self.rating = clamp_rating(value),
            "spring_type" => self.spring_type = value.to_string(),
            "features" => self.toggle_feature(value),
            "comment" => self.comment = value.to_string(),
            _ => log::warn!("⚠️ [FORM] Campo desconocido: {}", name),
        }
    }
}

fn require(errors: &mut FieldErrors, field: &str, value: &str, key: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), tr(key));
    }
}

fn require_date(errors: &mut FieldErrors, value: &str) {
    if value.trim().is_empty() || parse_visit_date(value).is_none() {
        errors.insert("visit_date".to_string(), tr("visit_date_required"));
    }
}

/// Alta: nombre, lugar, fecha y tipo de manantial
pub fn validate_new(values: &OnsenFormValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "name", &values.name, "name_required");
    require(&mut errors, "location", &values.location, "location_required");
    require_date(&mut errors, &values.visit_date);
    require(&mut errors, "spring_type", &values.spring_type, "spring_type_required");
    errors
}

/// Edición: nombre y fecha
pub fn validate_edit(values: &OnsenFormValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "name", &values.name, "name_required");
    require_date(&mut errors, &values.visit_date);
    errors
}

/// Foto aceptable: tipo image/* y como mucho 5MB
pub fn validate_image(upload: &ImageUpload) -> Result<(), String> {
    if !upload.content_type.starts_with("image/") {
        return Err(tr("image_invalid_type"));
    }
    if upload.bytes.len() > MAX_IMAGE_BYTES {
        return Err(tr("image_too_large"));
    }
    Ok(())
}

/// Resultado del alta con fotos
#[derive(Clone, PartialEq, Debug)]
pub struct CreateOutcome {
    pub log: OnsenLog,
    pub uploaded: usize,
    /// Mensaje si alguna foto falló (el registro ya existe)
    pub upload_error: Option<String>,
}

impl CreateOutcome {
    pub fn intent(&self) -> NavigationIntent {
        NavigationIntent::Redirect(Route::OnsenDetail(self.log.id.clone()))
    }
}

fn submit_message(error: &ClientError, fallback_key: &str) -> String {
    match error {
        ClientError::Api(e) if !e.message().is_empty() => e.message().to_string(),
        _ => tr(fallback_key),
    }
}

#[derive(Clone)]
pub struct OnsenFormViewModel {
    logs: OnsenLogService,
    images: OnsenImageService,
}

impl OnsenFormViewModel {
    pub fn new(logs: OnsenLogService, images: OnsenImageService) -> Self {
        Self { logs, images }
    }

    /// Crea el registro y sube las fotos en orden; se detiene en el primer fallo
    pub async fn create_with_images(
        &self,
        values: OnsenFormValues,
        uploads: Vec<ImageUpload>,
    ) -> Result<CreateOutcome, String> {
        let log = self
            .logs
            .create(&values.to_create_request())
            .await
            .map_err(|e| submit_message(&e, "create_failed"))?;

        let mut uploaded = 0;
        for upload in &uploads {
            if let Err(e) = self.images.upload(&log.id, upload).await {
                log::error!("❌ [FORM] Subida de {} fallida: {}", upload.file_name, e);
                return Ok(CreateOutcome {
                    log,
                    uploaded,
                    upload_error: Some(tr("upload_partial")),
                });
            }
            uploaded += 1;
        }

        Ok(CreateOutcome { log, uploaded, upload_error: None })
    }

    pub async fn load(&self, id: &str) -> Result<OnsenFormValues, String> {
        self.logs
            .get(id)
            .await
            .map(|log| OnsenFormValues::from_log(&log))
            .map_err(|e| {
                log::error!("❌ [FORM] No se pudo cargar {}: {}", id, e);
                tr("fetch_failed")
            })
    }

    pub async fn update(&self, id: &str, values: OnsenFormValues) -> Result<NavigationIntent, String> {
        match self.logs.update(id, &values.to_update_request()).await {
            Ok(_) => Ok(NavigationIntent::Redirect(Route::OnsenDetail(id.to_string()))),
            Err(e) => {
                log::error!("❌ [FORM] Actualización fallida: {}", e);
                Err(tr("update_failed"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;
    use crate::services::testing::{json_response, InMemoryBackend, MockTransport};

    fn photo(name: &str) -> ImageUpload {
        ImageUpload { file_name: name.into(), content_type: "image/png".into(), bytes: vec![1, 2, 3] }
    }

    fn filled() -> OnsenFormValues {
        OnsenFormValues {
            name: "登別温泉".into(),
            location: "北海道".into(),
            spring_type: "硫黄泉".into(),
            ..OnsenFormValues::for_new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        }
    }

    fn view_model(client: crate::services::ApiClient) -> OnsenFormViewModel {
        OnsenFormViewModel::new(OnsenLogService::new(client.clone()), OnsenImageService::new(client))
    }

    #[test]
    fn rating_input_is_clamped() {
        let mut values = OnsenFormValues::default();
        values.set_field("rating", "7");
        assert_eq!(values.rating, 5);
        values.set_field("rating", "-2");
        assert_eq!(values.rating, 0);
        values.set_field("rating", "abc");
        assert_eq!(values.rating, 0);
        values.set_field("rating", "4");
        assert_eq!(values.rating, 4);
    }

    #[test]
    fn feature_checkbox_toggles() {
        let mut values = OnsenFormValues::default();
        values.set_field("features", "露天風呂");
        values.set_field("features", "秘湯");
        values.set_field("features", "露天風呂");
        assert_eq!(values.features.iter().collect::<Vec<_>>(), vec!["秘湯"]);
    }

    #[test]
    fn new_form_defaults_and_validation() {
        let values = OnsenFormValues::for_new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(values.visit_date, "2024-06-01");
        assert_eq!(values.rating, 3);

        let errors = validate_new(&values);
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["location", "name", "spring_type"]);
        assert!(validate_new(&filled()).is_empty());

        let edit = OnsenFormValues { name: "x".into(), visit_date: "not a date".into(), ..Default::default() };
        assert_eq!(validate_edit(&edit).get("visit_date").map(String::as_str), Some("訪問日は必須です。"));
    }

    #[test]
    fn images_are_checked_for_type_and_size() {
        assert_eq!(validate_image(&photo("a.png")), Ok(()));
        let text = ImageUpload { content_type: "text/plain".into(), ..photo("a.txt") };
        assert_eq!(validate_image(&text), Err("画像ファイルを選択してください。".to_string()));
        let huge = ImageUpload { bytes: vec![0; MAX_IMAGE_BYTES + 1], ..photo("big.png") };
        assert_eq!(validate_image(&huge), Err("画像サイズは5MB以下にしてください。".to_string()));
    }

    #[test]
    fn create_request_omits_empty_optionals() {
        let request = filled().to_create_request();
        assert_eq!(request.comment, None);
        assert_eq!(request.features, None);
        assert_eq!(request.rating, Some(3));
        assert_eq!(request.visit_date, "2024-06-01");
    }

    #[test]
    fn create_uploads_images_in_order() {
        let backend = InMemoryBackend::new();
        let vm = view_model(backend.client());
        let outcome = block_on(vm.create_with_images(filled(), vec![photo("a.png"), photo("b.png")])).unwrap();
        assert_eq!(outcome.uploaded, 2);
        assert_eq!(outcome.upload_error, None);
        assert_eq!(outcome.intent(), NavigationIntent::Redirect(Route::OnsenDetail(outcome.log.id.clone())));

        let stored = block_on(OnsenLogService::new(backend.client()).get(&outcome.log.id)).unwrap();
        let urls: Vec<&str> = stored.images.iter().map(|i| i.image_url.as_str()).collect();
        assert_eq!(urls, vec!["/uploads/a.png", "/uploads/b.png"]);
    }

    #[test]
    fn created_record_reads_back_as_submitted() {
        let backend = InMemoryBackend::new();
        let vm = view_model(backend.client());
        let mut submitted = OnsenFormValues {
            rating: 5,
            comment: "湯の花がすごい".into(),
            ..filled()
        };
        submitted.toggle_feature("露天風呂");
        submitted.toggle_feature("秘湯");

        let outcome = block_on(vm.create_with_images(submitted.clone(), Vec::new())).unwrap();
        let fetched = block_on(OnsenLogService::new(backend.client()).get(&outcome.log.id)).unwrap();

        assert_eq!(fetched.name, "登別温泉");
        assert_eq!(fetched.location.as_deref(), Some("北海道"));
        assert_eq!(fetched.visit_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(fetched.rating, Some(5));
        assert_eq!(fetched.spring_type.as_deref(), Some("硫黄泉"));
        assert_eq!(OnsenFormValues::from_log(&fetched), submitted);
        assert_eq!(block_on(vm.load(&outcome.log.id)), Ok(submitted));
    }

    #[test]
    fn first_upload_failure_stops_and_still_navigates() {
        let mock = MockTransport::new();
        mock.push(json_response(201, json!({"data": {
            "id": "log-9", "user_id": "u", "name": "登別温泉", "visit_date": "2024-06-01",
            "created_at": "2024-06-01T00:00:00Z", "updated_at": "2024-06-01T00:00:00Z"
        }})));
        mock.push(json_response(201, json!({"data": {"image_id": "i1", "image_url": "/a.png"}})));
        mock.push(json_response(413, json!({"error": {"code": "FILE_TOO_LARGE", "message": "too big"}})));
        let vm = view_model(mock.client());

        let photos = vec![photo("a.png"), photo("b.png"), photo("c.png")];
        let outcome = block_on(vm.create_with_images(filled(), photos)).unwrap();
        assert_eq!(outcome.uploaded, 1);
        assert_eq!(
            outcome.upload_error.as_deref(),
            Some("温泉メモは作成されましたが、画像のアップロードに失敗しました。")
        );
        assert_eq!(outcome.intent(), NavigationIntent::Redirect(Route::OnsenDetail("log-9".into())));
        assert_eq!(mock.requests().len(), 3);
    }

    #[test]
    fn create_failure_uses_server_message_or_fallback() {
        let mock = MockTransport::new();
        mock.push(json_response(400, json!({"error": {"code": "INVALID_INPUT", "message": "名前が長すぎます"}})));
        mock.push(json_response(500, json!({"error": {"code": "INTERNAL", "message": ""}})));
        let vm = view_model(mock.client());
        assert_eq!(block_on(vm.create_with_images(filled(), vec![])), Err("名前が長すぎます".to_string()));
        assert_eq!(
            block_on(vm.create_with_images(filled(), vec![])),
            Err("温泉メモの作成に失敗しました。もう一度お試しください。".to_string())
        );
    }

    #[test]
    fn edit_loads_and_updates() {
        let backend = InMemoryBackend::new();
        let vm = view_model(backend.client());
        let created = block_on(vm.create_with_images(filled(), vec![])).unwrap();

        let mut values = block_on(vm.load(&created.log.id)).unwrap();
        assert_eq!(values.name, "登別温泉");
        values.set_field("rating", "9");
        let intent = block_on(vm.update(&created.log.id, values)).unwrap();
        assert_eq!(intent, NavigationIntent::Redirect(Route::OnsenDetail(created.log.id.clone())));

        let stored = block_on(OnsenLogService::new(backend.client()).get(&created.log.id)).unwrap();
        assert_eq!(stored.rating, Some(5));
        assert_eq!(block_on(vm.load("missing")), Err("温泉メモの取得に失敗しました。もう一度お試しください。".to_string()));
    }
}
