use crate::utils::constants::AUTH_REQUIRED_PREFIXES;

/// Rutas de la aplicación
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Route {
    Home,
    Login,
    Register,
    OnsenList,
    OnsenNew,
    OnsenDetail(String),
    OnsenEdit(String),
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["auth", "login"] => Route::Login,
            ["auth", "register"] => Route::Register,
            ["onsen"] => Route::OnsenList,
            ["onsen", "new"] => Route::OnsenNew,
            ["onsen", "edit", id] => Route::OnsenEdit(id.to_string()),
            ["onsen", id] => Route::OnsenDetail(id.to_string()),
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/auth/login".to_string(),
            Route::Register => "/auth/register".to_string(),
            Route::OnsenList => "/onsen".to_string(),
            Route::OnsenNew => "/onsen/new".to_string(),
            Route::OnsenDetail(id) => format!("/onsen/{}", id),
            Route::OnsenEdit(id) => format!("/onsen/edit/{}", id),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Prefijo de ruta protegida (`/onsen`, `/profile`)
    pub fn requires_auth(&self) -> bool {
        let path = self.path();
        AUTH_REQUIRED_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
    }

    /// Páginas solo para usuarios sin sesión
    pub fn is_auth_page(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

/// Resultado de una decisión de navegación; el router lo ejecuta
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NavigationIntent {
    Stay,
    Redirect(Route),
}

impl NavigationIntent {
    pub fn target(&self) -> Option<&Route> {
        match self {
            NavigationIntent::Stay => None,
            NavigationIntent::Redirect(route) => Some(route),
        }
    }
}
