// ============================================================================
// ONSEN LIST VIEWMODEL - Paginación, orden, búsqueda y filtros
// ============================================================================

use crate::models::{
    clamp_rating, parse_visit_date, ExportFormat, ExportedFile, ListQuery, OnsenLog, OnsenLogFilter,
    SortDirection, SortField,
};
use crate::models::onsen_log::{MAX_RATING, MIN_RATING};
use crate::services::OnsenLogService;
use crate::state::ReactiveState;
use crate::utils::i18n::tr;

/// Panel de filtros tal como lo edita el usuario
#[derive(Clone, PartialEq, Debug)]
pub struct FilterForm {
    pub name: String,
    pub location: String,
    pub min_rating: u8,
    pub max_rating: u8,
    pub from_date: String,
    pub to_date: String,
}

impl Default for FilterForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            location: String::new(),
            min_rating: MIN_RATING,
            max_rating: MAX_RATING,
            from_date: String::new(),
            to_date: String::new(),
        }
    }
}

impl FilterForm {
    pub fn set_field(&mut self, name: &str, value: &str) {
        match name {
            "name" => self.name = value.to_string(),
            "location" => self.location = value.to_string(),
            "min_rating" => self.min_rating = clamp_rating(value),
            "max_rating" => self.max_rating = clamp_rating(value),
            "from_date" => self.from_date = value.to_string(),
            "to_date" => self.to_date = value.to_string(),
            _ => log::warn!("⚠️ [LIST] Filtro desconocido: {}", name),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct ListState {
    pub logs: Vec<OnsenLog>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub search: String,
    pub filters: FilterForm,
    pub show_filters: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl ListState {
    pub fn new(limit: u32) -> Self {
        Self {
            logs: Vec::new(),
            page: 1,
            limit: limit.max(1),
            total: 0,
            sort_field: SortField::VisitDate,
            sort_direction: SortDirection::Desc,
            search: String::new(),
            filters: FilterForm::default(),
            show_filters: false,
            loading: true,
            error: None,
        }
    }

    pub fn total_pages(&self) -> u32 {
        let limit = u64::from(self.limit.max(1));
        ((self.total + limit - 1) / limit) as u32
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn show_pager(&self) -> bool {
        self.total > u64::from(self.limit)
    }

    /// Query para el servicio; los rangos por defecto (0..5) no se envían
    pub fn query(&self) -> ListQuery {
        let f = &self.filters;
        ListQuery {
            page: self.page,
            limit: self.limit,
            sort_by: Some(self.sort_field),
            sort_direction: Some(self.sort_direction),
            filter: OnsenLogFilter {
                keyword: Some(self.search.clone()),
                name: Some(f.name.clone()),
                location: Some(f.location.clone()),
                spring_type: None,
                min_rating: Some(f.min_rating).filter(|r| *r > MIN_RATING),
                max_rating: Some(f.max_rating).filter(|r| *r < MAX_RATING),
                start_date: parse_visit_date(&f.from_date),
                end_date: parse_visit_date(&f.to_date),
            },
        }
    }
}

#[derive(Clone)]
pub struct OnsenListViewModel {
    service: OnsenLogService,
    state: ReactiveState<ListState>,
}

impl OnsenListViewModel {
    pub fn new(service: OnsenLogService, page_size: u32) -> Self {
        Self {
            service,
            state: ReactiveState::new(ListState::new(page_size)),
        }
    }

    pub fn state(&self) -> ListState {
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
        F: Fn(&ListState) + 'static,
    {
        self.state.watch(callback);
    }

    pub async fn fetch(&self) {
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });
        let query = self.state.with(ListState::query);

        match self.service.list(&query).await {
            Ok(page) => self.state.update(|s| {
                s.logs = page.onsen_logs;
                s.total = page.total_count;
                s.loading = false;
            }),
            Err(e) => {
                log::error!("❌ [LIST] {}", e);
                self.state.update(|s| {
                    s.error = Some(tr("fetch_list_failed"));
                    s.loading = false;
                });
            }
        }
    }

    pub fn set_search(&self, keyword: &str) {
        self.state.update(|s| s.search = keyword.to_string());
    }

    pub async fn search(&self) {
        self.state.update(|s| s.page = 1);
        self.fetch().await;
    }

    pub fn toggle_filters(&self) {
        self.state.update(|s| s.show_filters = !s.show_filters);
    }

    pub fn set_filter_field(&self, name: &str, value: &str) {
        self.state.update(|s| s.filters.set_field(name, value));
    }

    pub fn reset_filters(&self) {
        self.state.update(|s| s.filters = FilterForm::default());
    }

    /// Aplicar filtros vuelve a la primera página
    pub async fn apply_filters(&self) {
        self.state.update(|s| {
            s.page = 1;
            s.show_filters = false;
        });
        self.fetch().await;
    }

    pub async fn set_sort_field(&self, field: SortField) {
        self.state.update(|s| s.sort_field = field);
        self.fetch().await;
    }

    pub async fn toggle_sort_direction(&self) {
        self.state.update(|s| s.sort_direction = s.sort_direction.toggled());
        self.fetch().await;
    }

    pub async fn next_page(&self) {
        if !self.state.with(ListState::has_next) {
            return;
        }
        self.state.update(|s| s.page += 1);
        self.fetch().await;
    }

    pub async fn prev_page(&self) {
        if !self.state.with(ListState::has_prev) {
            return;
        }
        self.state.update(|s| s.page -= 1);
        self.fetch().await;
    }

    pub async fn export(&self, format: ExportFormat) -> Option<ExportedFile> {
        match self.service.export(format).await {
            Ok(file) => Some(file),
            Err(e) => {
                log::error!("❌ [LIST] Export {}: {}", format.as_str(), e);
                self.state.update(|s| s.error = Some(tr("export_failed")));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;
    use crate::services::testing::{json_response, MockTransport};

    fn page_response(total: u64, page: u32) -> crate::services::transport::HttpResponse {
        json_response(200, json!({"data": {"onsen_logs": [], "total_count": total, "page": page, "limit": 10}}))
    }

    fn param(mock: &MockTransport, index: usize, key: &str) -> Option<String> {
        mock.requests()[index]
            .query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    #[test]
    fn pagination_math() {
        let mut state = ListState::new(10);
        state.total = 23;
        assert_eq!(state.total_pages(), 3);
        assert!(state.show_pager());
        assert!(!state.has_prev());
        assert!(state.has_next());
        state.page = 3;
        assert!(state.has_prev());
        assert!(!state.has_next());

        state.total = 10;
        assert!(!state.show_pager());
        state.total = 0;
        assert_eq!(state.total_pages(), 0);
    }

    #[test]
    fn default_query_sorts_by_visit_date_desc() {
        let query = ListState::new(10).query();
        let params = query.to_params();
        assert!(params.contains(&("sort_by".to_string(), "visit_date".to_string())));
        assert!(params.contains(&("sort_direction".to_string(), "desc".to_string())));
        assert!(!params.iter().any(|(k, _)| k == "min_rating" || k == "max_rating" || k == "keyword"));
    }

    #[test]
    fn apply_filters_resets_to_first_page() {
        let mock = MockTransport::new();
        mock.push(page_response(35, 1));
        mock.push(page_response(35, 2));
        mock.push(page_response(4, 1));
        let vm = OnsenListViewModel::new(OnsenLogService::new(mock.client()), 10);

        block_on(vm.fetch());
        block_on(vm.next_page());
        assert_eq!(vm.state().page, 2);

        vm.toggle_filters();
        vm.set_filter_field("location", "箱根");
        vm.set_filter_field("min_rating", "9");
        block_on(vm.apply_filters());

        let state = vm.state();
        assert_eq!(state.page, 1);
        assert!(!state.show_filters);
        assert_eq!(state.total, 4);
        assert_eq!(param(&mock, 2, "page").as_deref(), Some("1"));
        assert_eq!(param(&mock, 2, "location").as_deref(), Some("箱根"));
        assert_eq!(param(&mock, 2, "min_rating").as_deref(), Some("5"));
    }

    #[test]
    fn expired_token_refreshes_and_retries_list() {
        let mock = MockTransport::new();
        mock.push(json_response(401, json!({"error": {"code": "TOKEN_EXPIRED", "message": "expired"}})));
        mock.push(json_response(200, json!({"data": {"access_token": "new", "refresh_token": "r2"}})));
        mock.push(page_response(12, 1));
        let client = mock.client();
        client.session().save_tokens("old", Some("r1"));
        let vm = OnsenListViewModel::new(OnsenLogService::new(client.clone()), 10);

        block_on(vm.fetch());

        let sent = mock.requests();
        assert_eq!(sent.len(), 3);
        assert!(sent[0].url.ends_with("/onsen_logs"));
        assert!(sent[1].url.ends_with("/auth/refresh"));
        assert!(sent[2].url.ends_with("/onsen_logs"));
        assert_eq!(sent[0].header("authorization"), Some("Bearer old"));
        assert_eq!(sent[2].header("authorization"), Some("Bearer new"));
        assert_eq!(client.session().get_refresh_token().as_deref(), Some("r2"));

        let state = vm.state();
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.total, 12);
    }

    #[test]
    fn sort_toggle_refetches_ascending() {
        let mock = MockTransport::new();
        mock.push(page_response(1, 1));
        let vm = OnsenListViewModel::new(OnsenLogService::new(mock.client()), 10);
        block_on(vm.toggle_sort_direction());
        assert_eq!(vm.state().sort_direction, SortDirection::Asc);
        assert_eq!(param(&mock, 0, "sort_direction").as_deref(), Some("asc"));
    }

    #[test]
    fn prev_on_first_page_does_nothing() {
        let mock = MockTransport::new();
        let vm = OnsenListViewModel::new(OnsenLogService::new(mock.client()), 10);
        block_on(vm.prev_page());
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn fetch_failure_sets_message() {
        let mock = MockTransport::new();
        mock.push(json_response(500, json!({"error": {"code": "INTERNAL", "message": "boom"}})));
        let vm = OnsenListViewModel::new(OnsenLogService::new(mock.client()), 10);
        block_on(vm.fetch());
        let state = vm.state();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("温泉メモの取得に失敗しました。もう一度お試しください。"));
    }

    #[test]
    fn export_failure_sets_message() {
        let mock = MockTransport::new();
        mock.push(json_response(500, json!({})));
        let vm = OnsenListViewModel::new(OnsenLogService::new(mock.client()), 10);
        assert!(block_on(vm.export(ExportFormat::Json)).is_none());
        assert_eq!(vm.state().error.as_deref(), Some("エクスポートに失敗しました。"));
    }
}
