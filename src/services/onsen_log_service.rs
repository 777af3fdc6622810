// ============================================================================
// ONSEN LOG SERVICE - CRUD de registros de visita + export
// ============================================================================

use crate::models::{
    ClientError, Envelope, ExportFormat, ExportedFile, ListQuery, MessageResponse, OnsenLog,
    OnsenLogCreateRequest, OnsenLogListBody, OnsenLogPage, OnsenLogUpdateRequest,
};
use crate::services::api_client::{ApiClient, ApiRequest};

#[derive(Clone)]
pub struct OnsenLogService {
    client: ApiClient,
}

impl OnsenLogService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<OnsenLogPage, ClientError> {
        let body: Envelope<OnsenLogListBody> = self
            .client
            .request(ApiRequest::get("/onsen_logs").query(query.to_params()))
            .await?;
        let page = body.into_data().into_page(query.page, query.limit);
        log::info!("📋 [LOGS] {} de {} registros (página {})", page.onsen_logs.len(), page.total_count, page.page);
        Ok(page)
    }

    pub async fn get(&self, id: &str) -> Result<OnsenLog, ClientError> {
        let body: Envelope<OnsenLog> = self
            .client
            .request(ApiRequest::get(format!("/onsen_logs/{}", id)))
            .await?;
        Ok(body.into_data())
    }

    pub async fn create(&self, request: &OnsenLogCreateRequest) -> Result<OnsenLog, ClientError> {
        let body: Envelope<OnsenLog> = self
            .client
            .request(ApiRequest::post("/onsen_logs").json(request)?)
            .await?;
        let log = body.into_data();
        log::info!("✅ [LOGS] Creado {}", log.id);
        Ok(log)
    }

    pub async fn update(&self, id: &str, request: &OnsenLogUpdateRequest) -> Result<OnsenLog, ClientError> {
        let body: Envelope<OnsenLog> = self
            .client
            .request(ApiRequest::put(format!("/onsen_logs/{}", id)).json(request)?)
            .await?;
        log::info!("✅ [LOGS] Actualizado {}", id);
        Ok(body.into_data())
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let _: Option<MessageResponse> = self
            .client
            .request(ApiRequest::delete(format!("/onsen_logs/{}", id)))
            .await?;
        log::info!("🗑️ [LOGS] Eliminado {}", id);
        Ok(())
    }

    pub async fn export(&self, format: ExportFormat) -> Result<ExportedFile, ClientError> {
        let raw = self
            .client
            .request_raw(
                ApiRequest::get("/onsen_logs/export")
                    .query(vec![("format".to_string(), format.as_str().to_string())]),
            )
            .await?;
        Ok(ExportedFile {
            file_name: format.file_name().to_string(),
            content_type: raw
                .content_type
                .unwrap_or_else(|| format.default_content_type().to_string()),
            bytes: raw.bytes,
        })
    }
}
