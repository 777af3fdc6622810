// ============================================================================
// APP - Router + montaje de páginas + re-render
// ============================================================================
// Cada cambio de ruta, de autenticación o de estado de página programa un
// re-render completo del contenedor #app en el siguiente tick.
// ============================================================================

use std::cell::Cell;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{append_child, clear_children, get_element_by_id, on_event, window};
use crate::models::{NavigationIntent, Route};
use crate::services::{ApiClient, AuthService, OnsenImageService, OnsenLogService, SessionEvent};
use crate::state::AppState;
use crate::utils::i18n::tr;
use crate::viewmodels::AuthViewModel;
use crate::views::{render_layout, Page};

thread_local! {
    static RENDER_PENDING: Cell<bool> = Cell::new(false);
}

/// Programa un re-render; varias notificaciones en el mismo tick se agrupan
pub fn schedule_render() {
    if RENDER_PENDING.with(|p| p.replace(true)) {
        return;
    }
    Timeout::new(0, || {
        RENDER_PENDING.with(|p| p.set(false));
        crate::rerender_app();
    })
    .forget();
}

fn current_path() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn write_history(route: &Route, replace: bool) {
    let Some(history) = window().and_then(|w| w.history().ok()) else {
        return;
    };
    let path = route.path();
    let result = if replace {
        history.replace_state_with_url(&JsValue::NULL, "", Some(&path))
    } else {
        history.push_state_with_url(&JsValue::NULL, "", Some(&path))
    };
    if let Err(e) = result {
        log::warn!("⚠️ [ROUTER] history {}: {:?}", path, e);
    }
}

/// Lo que necesitan las vistas: estado global, auth y servicios
#[derive(Clone)]
pub struct AppContext {
    pub state: AppState,
    pub auth: AuthViewModel,
    pub logs: OnsenLogService,
    pub images: OnsenImageService,
}

impl AppContext {
    pub fn new(client: ApiClient, state: AppState) -> Self {
        Self {
            auth: AuthViewModel::new(AuthService::new(client.clone()), state.auth.clone()),
            logs: OnsenLogService::new(client.clone()),
            images: OnsenImageService::new(client),
            state,
        }
    }

    pub fn navigate(&self, route: Route) {
        log::debug!("🧭 [ROUTER] → {}", route.path());
        write_history(&route, false);
        self.state.route.set(route);
    }

    fn replace(&self, route: Route) {
        write_history(&route, true);
        self.state.route.set(route);
    }

    pub fn apply(&self, intent: NavigationIntent) {
        if let NavigationIntent::Redirect(route) = intent {
            self.navigate(route);
        }
    }

    /// Navegación diferida (tras mostrar un mensaje)
    pub fn apply_later(&self, intent: NavigationIntent, delay_ms: u32) {
        let ctx = self.clone();
        Timeout::new(delay_ms, move || ctx.apply(intent)).forget();
    }
}

pub struct App {
    ctx: AppContext,
    root: Element,
    page: Option<(Route, Page)>,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app").ok_or_else(|| JsValue::from_str("No #app element found"))?;
        let client = ApiClient::browser(&CONFIG);
        let ctx = AppContext::new(client.clone(), AppState::new(Route::parse(&current_path())));

        // Sesión caducada o ausente: fuera de las rutas protegidas
        {
            let ctx = ctx.clone();
            client.subscribe(move |event: SessionEvent| {
                log::warn!("🔐 [ROUTER] {:?}", event);
                if event == SessionEvent::Expired {
                    ctx.state.set_flash(Some(tr("err_session_expired")));
                }
                ctx.state.auth.set_logged_in(false);
                let intent = ctx.auth.guard(&ctx.state.current_route());
                ctx.apply(intent);
            });
        }

        ctx.state.route.subscribe(schedule_render);
        ctx.state.auth.subscribe(schedule_render);

        // Botones atrás/adelante del navegador (listener global, una sola vez)
        if let Some(win) = window() {
            let ctx = ctx.clone();
            on_event(&win, "popstate", move |_| ctx.state.route.set(Route::parse(&current_path())))?;
        }

        let logged_in = ctx.auth.check_auth();
        log::info!("🔐 [APP] Sesión inicial: {}", if logged_in { "activa" } else { "ninguna" });

        Ok(Self { ctx, root, page: None })
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        let route = self.ctx.state.current_route();

        if let NavigationIntent::Redirect(target) = self.ctx.auth.guard(&route) {
            log::info!("🧭 [ROUTER] {} → {}", route.path(), target.path());
            self.ctx.replace(target);
            return Ok(());
        }

        let mounted = matches!(&self.page, Some((current, _)) if *current == route);
        if !mounted {
            log::debug!("📄 [APP] Montando {}", route.path());
            self.page = Some((route.clone(), Page::mount(&self.ctx, &route)));
        }

        clear_children(&self.root);
        let page = self.page.as_ref().map(|(_, page)| page);
        let view = render_layout(&self.ctx, page)?;
        append_child(&self.root, &view)?;
        Ok(())
    }
}

/// Retardo de la redirección tras crear un registro (doble si hubo fallos de subida)
pub fn redirect_delay(partial_failure: bool) -> u32 {
    if partial_failure {
        CONFIG.redirect_delay_ms * 2
    } else {
        CONFIG.redirect_delay_ms
    }
}
