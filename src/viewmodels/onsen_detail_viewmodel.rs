// ============================================================================
// ONSEN DETAIL VIEWMODEL - Ficha de un registro + borrado en dos pasos
// ============================================================================

use crate::models::{NavigationIntent, OnsenLog, Route};
use crate::services::{OnsenImageService, OnsenLogService};
use crate::state::ReactiveState;
use crate::utils::i18n::tr;

#[derive(Clone, PartialEq, Debug)]
pub struct DetailState {
    pub log: Option<OnsenLog>,
    pub loading: bool,
    pub error: Option<String>,
    /// Primer clic en "borrar" pide confirmación
    pub confirm_delete: bool,
    pub deleting: bool,
}

impl Default for DetailState {
    fn default() -> Self {
        Self {
            log: None,
            loading: true,
            error: None,
            confirm_delete: false,
            deleting: false,
        }
    }
}

#[derive(Clone)]
pub struct OnsenDetailViewModel {
    id: String,
    logs: OnsenLogService,
    images: OnsenImageService,
    state: ReactiveState<DetailState>,
}

impl OnsenDetailViewModel {
    pub fn new(id: impl Into<String>, logs: OnsenLogService, images: OnsenImageService) -> Self {
        Self {
            id: id.into(),
            logs,
            images,
            state: ReactiveState::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> DetailState {
        self.state.get()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.state.subscribe(callback);
    }

    pub fn watch<F>(&self, callback: F)
    where
        F: Fn(&DetailState) + 'static,
    {
        self.state.watch(callback);
    }

    pub async fn load(&self) {
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });
        match self.logs.get(&self.id).await {
            Ok(log) => self.state.update(|s| {
                s.log = Some(log);
                s.loading = false;
            }),
            Err(e) => {
                log::error!("❌ [DETAIL] {}: {}", self.id, e);
                self.state.update(|s| {
                    s.error = Some(tr("fetch_failed"));
                    s.loading = false;
                });
            }
        }
    }

    pub fn edit_intent(&self) -> NavigationIntent {
        NavigationIntent::Redirect(Route::OnsenEdit(self.id.clone()))
    }

    pub fn cancel_delete(&self) {
        self.state.update(|s| s.confirm_delete = false);
    }

    /// Primer llamada: pide confirmación. Segunda: borra y vuelve a la lista.
    pub async fn request_delete(&self) -> NavigationIntent {
        if !self.state.with(|s| s.confirm_delete) {
            self.state.update(|s| s.confirm_delete = true);
            return NavigationIntent::Stay;
        }

        self.state.update(|s| {
            s.deleting = true;
            s.error = None;
        });
        let result = self.logs.delete(&self.id).await;
        self.state.update(|s| {
            s.deleting = false;
            s.confirm_delete = false;
        });

        match result {
            Ok(()) => {
                log::info!("🗑️ [DETAIL] Registro {} borrado", self.id);
                NavigationIntent::Redirect(Route::OnsenList)
            }
            Err(e) => {
                log::error!("❌ [DETAIL] Borrado fallido: {}", e);
                self.state.update(|s| s.error = Some(tr("delete_failed")));
                NavigationIntent::Stay
            }
        }
    }

    pub async fn delete_image(&self, image_id: &str) {
        match self.images.delete(image_id).await {
            Ok(()) => self.state.update(|s| {
                if let Some(log) = s.log.as_mut() {
                    log.images.retain(|i| i.image_id != image_id);
                }
            }),
            Err(e) => {
                log::error!("❌ [DETAIL] Foto {}: {}", image_id, e);
                self.state.update(|s| s.error = Some(tr("delete_failed")));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;
    use crate::models::{ImageUpload, OnsenLogCreateRequest};
    use crate::services::testing::{json_response, InMemoryBackend, MockTransport};
    use crate::services::ApiClient;

    fn view_model(id: &str, client: ApiClient) -> OnsenDetailViewModel {
        OnsenDetailViewModel::new(id, OnsenLogService::new(client.clone()), OnsenImageService::new(client))
    }

    fn seed(backend: &InMemoryBackend) -> String {
        let logs = OnsenLogService::new(backend.client());
        let created = block_on(logs.create(&OnsenLogCreateRequest {
            name: "草津温泉".into(),
            location: Some("群馬県".into()),
            spring_type: "酸性泉".into(),
            features: None,
            visit_date: "2024-02-10".into(),
            rating: Some(4),
            comment: None,
        }))
        .unwrap();
        created.id
    }

    #[test]
    fn load_populates_log() {
        let backend = InMemoryBackend::new();
        let id = seed(&backend);
        let vm = view_model(&id, backend.client());
        block_on(vm.load());
        let state = vm.state();
        assert!(!state.loading);
        assert_eq!(state.log.map(|l| l.name), Some("草津温泉".to_string()));
        assert_eq!(vm.edit_intent(), NavigationIntent::Redirect(Route::OnsenEdit(id)));
    }

    #[test]
    fn load_failure_sets_message() {
        let vm = view_model("missing", InMemoryBackend::new().client());
        block_on(vm.load());
        let state = vm.state();
        assert_eq!(state.log, None);
        assert_eq!(state.error.as_deref(), Some("温泉メモの取得に失敗しました。もう一度お試しください。"));
    }

    #[test]
    fn delete_asks_for_confirmation_first() {
        let backend = InMemoryBackend::new();
        let id = seed(&backend);
        let vm = view_model(&id, backend.client());

        assert_eq!(block_on(vm.request_delete()), NavigationIntent::Stay);
        assert!(vm.state().confirm_delete);
        assert_eq!(backend.log_count(), 1);

        vm.cancel_delete();
        assert_eq!(block_on(vm.request_delete()), NavigationIntent::Stay);
        assert_eq!(block_on(vm.request_delete()), NavigationIntent::Redirect(Route::OnsenList));
        assert_eq!(backend.log_count(), 0);
    }

    #[test]
    fn delete_failure_stays_with_message() {
        let mock = MockTransport::new();
        mock.push(json_response(500, json!({"error": {"code": "INTERNAL", "message": "boom"}})));
        let vm = view_model("log-1", mock.client());
        block_on(vm.request_delete());
        assert_eq!(block_on(vm.request_delete()), NavigationIntent::Stay);
        let state = vm.state();
        assert_eq!(state.error.as_deref(), Some("削除に失敗しました。"));
        assert!(!state.confirm_delete);
        assert!(!state.deleting);
    }

    #[test]
    fn delete_image_removes_it_from_the_log() {
        let backend = InMemoryBackend::new();
        let id = seed(&backend);
        let images = OnsenImageService::new(backend.client());
        let upload = ImageUpload { file_name: "yu.jpg".into(), content_type: "image/jpeg".into(), bytes: vec![0] };
        let image = block_on(images.upload(&id, &upload)).unwrap();

        let vm = view_model(&id, backend.client());
        block_on(vm.load());
        assert_eq!(vm.state().log.map(|l| l.images.len()), Some(1));
        block_on(vm.delete_image(&image.image_id));
        assert_eq!(vm.state().log.map(|l| l.images.len()), Some(0));
    }
}
