// ============================================================================
// ONSEN IMAGE SERVICE - Subida (multipart), listado y borrado de fotos
// ============================================================================

use crate::models::{ClientError, Envelope, ImageUpload, MessageResponse, OnsenImage};
use crate::services::api_client::{ApiClient, ApiRequest};
use crate::services::transport::MultipartPart;

#[derive(Clone)]
pub struct OnsenImageService {
    client: ApiClient,
}

impl OnsenImageService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn upload(&self, onsen_id: &str, file: &ImageUpload) -> Result<OnsenImage, ClientError> {
        let parts = vec![
            MultipartPart::Text {
                name: "onsen_id".to_string(),
                value: onsen_id.to_string(),
            },
            MultipartPart::File {
                name: "file".to_string(),
                file_name: file.file_name.clone(),
                content_type: file.content_type.clone(),
                bytes: file.bytes.clone(),
            },
        ];
        log::info!("📷 [IMAGES] Subiendo {} ({} bytes) a {}", file.file_name, file.bytes.len(), onsen_id);
        let body: Envelope<OnsenImage> = self
            .client
            .request(ApiRequest::post("/onsen_images").multipart(parts))
            .await?;
        Ok(body.into_data())
    }

    pub async fn list(&self, onsen_id: &str) -> Result<Vec<OnsenImage>, ClientError> {
        let body: Envelope<Option<Vec<OnsenImage>>> = self
            .client
            .request(ApiRequest::get(format!("/onsen_images/{}", onsen_id)))
            .await?;
        Ok(body.into_data().unwrap_or_default())
    }

    pub async fn delete(&self, image_id: &str) -> Result<(), ClientError> {
        let _: Option<MessageResponse> = self
            .client
            .request(ApiRequest::delete(format!("/onsen_images/{}", image_id)))
            .await?;
        log::info!("🗑️ [IMAGES] Eliminada {}", image_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;
    use crate::services::testing::{json_response, MockTransport};
    use crate::services::transport::RequestBody;

    fn photo() -> ImageUpload {
        ImageUpload {
            file_name: "rotenburo.jpg".into(),
            content_type: "image/jpeg".into(),
            bytes: vec![0xff, 0xd8, 0xff],
        }
    }

    #[test]
    fn upload_sends_multipart_fields() {
        let mock = MockTransport::new();
        mock.push(json_response(201, json!({"data": {"image_id": "img1", "image_url": "/uploads/rotenburo.jpg"}})));
        let service = OnsenImageService::new(mock.client());

        let image = block_on(service.upload("log-1", &photo())).unwrap();
        assert_eq!(image.image_id, "img1");

        let sent = &mock.requests()[0];
        assert!(sent.url.ends_with("/onsen_images"));
        assert_eq!(sent.header("content-type"), None);
        match &sent.body {
            RequestBody::Multipart(parts) => {
                assert_eq!(parts.len(), 2);
                assert_eq!(parts[0], MultipartPart::Text { name: "onsen_id".into(), value: "log-1".into() });
                assert!(matches!(&parts[1], MultipartPart::File { name, .. } if name == "file"));
            }
            other => panic!("expected multipart, got {:?}", other),
        }
    }

    #[test]
    fn list_accepts_envelope_bare_or_null() {
        let mock = MockTransport::new();
        mock.push(json_response(200, json!({"data": [{"image_id": "a", "image_url": "/a.jpg"}]})));
        mock.push(json_response(200, json!([{"image_id": "b", "image_url": "/b.jpg"}])));
        mock.push(json_response(200, json!({"data": null})));
        let service = OnsenImageService::new(mock.client());

        assert_eq!(block_on(service.list("log-1")).unwrap()[0].image_id, "a");
        assert_eq!(block_on(service.list("log-1")).unwrap()[0].image_id, "b");
        assert!(block_on(service.list("log-1")).unwrap().is_empty());
    }

    #[test]
    fn delete_targets_image_path() {
        let mock = MockTransport::new();
        mock.push(json_response(200, json!({"message": "deleted"})));
        let service = OnsenImageService::new(mock.client());
        block_on(service.delete("img1")).unwrap();
        assert!(mock.requests()[0].url.ends_with("/onsen_images/img1"));
    }
}
