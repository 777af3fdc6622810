// ============================================================================
// PAGES - Una página por ruta; cada una guarda su viewmodel mientras está montada
// ============================================================================

pub mod home;
pub mod login;
pub mod not_found;
pub mod onsen_detail;
pub mod onsen_edit;
pub mod onsen_fields;
pub mod onsen_list;
pub mod onsen_new;
pub mod register;

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event};
use crate::app::{schedule_render, AppContext};
use crate::dom::{get_element_by_id, on_event, remove_class};
use crate::models::{NavigationIntent, Route};
use crate::state::{FieldErrors, FormState, FormValues, ReactiveState};
use crate::viewmodels::FormController;
use crate::views::components::{control_element_id, error_element_id};

pub use login::LoginPage;
pub use onsen_detail::OnsenDetailPage;
pub use onsen_edit::OnsenEditPage;
pub use onsen_list::OnsenListPage;
pub use onsen_new::OnsenNewPage;
pub use register::RegisterPage;

pub enum Page {
    Home,
    Login(LoginPage),
    Register(RegisterPage),
    OnsenList(OnsenListPage),
    OnsenNew(OnsenNewPage),
    OnsenDetail(OnsenDetailPage),
    OnsenEdit(OnsenEditPage),
    NotFound(String),
}

impl Page {
    pub fn mount(ctx: &AppContext, route: &Route) -> Self {
        match route {
            Route::Home => Page::Home,
            Route::Login => Page::Login(LoginPage::mount(ctx)),
            Route::Register => Page::Register(RegisterPage::mount(ctx)),
            Route::OnsenList => Page::OnsenList(OnsenListPage::mount(ctx)),
            Route::OnsenNew => Page::OnsenNew(OnsenNewPage::mount(ctx)),
            Route::OnsenDetail(id) => Page::OnsenDetail(OnsenDetailPage::mount(ctx, id)),
            Route::OnsenEdit(id) => Page::OnsenEdit(OnsenEditPage::mount(ctx, id)),
            Route::NotFound(path) => Page::NotFound(path.clone()),
        }
    }

    pub fn render(&self, ctx: &AppContext) -> Result<Element, JsValue> {
        match self {
            Page::Home => home::render_home(ctx),
            Page::Login(page) => page.render(ctx),
            Page::Register(page) => page.render(ctx),
            Page::OnsenList(page) => page.render(ctx),
            Page::OnsenNew(page) => page.render(ctx),
            Page::OnsenDetail(page) => page.render(ctx),
            Page::OnsenEdit(page) => page.render(ctx),
            Page::NotFound(path) => not_found::render_not_found(ctx, path),
        }
    }
}

/// Re-render solo si cambia el envío o aparecen errores nuevos.
/// Los errores que se borran al escribir se quitan en sitio (el input conserva el foco).
pub(crate) fn watch_form<T, R>(form: &FormController<T, R>)
where
    T: FormValues + 'static,
    R: 'static,
{
    let last: Rc<RefCell<(bool, FieldErrors)>> = Rc::new(RefCell::new((false, FieldErrors::new())));
    form.watch(move |state: &FormState<T>| {
        let mut last = last.borrow_mut();
        let (was_submitting, old_errors) = &*last;
        let new_error = state.errors.keys().any(|k| !old_errors.contains_key(k));

        if state.is_submitting != *was_submitting || new_error {
            schedule_render();
        } else {
            for field in old_errors.keys().filter(|k| !state.errors.contains_key(*k)) {
                if let Some(message) = get_element_by_id(&error_element_id(field)) {
                    message.remove();
                }
                if let Some(control) = get_element_by_id(&control_element_id(field)) {
                    let _ = remove_class(&control, "form-input-error");
                }
            }
        }
        *last = (state.is_submitting, state.errors.clone());
    });
}

/// Mensaje a nivel de página (error del servidor, avisos); re-renderiza al cambiar
pub(crate) fn page_message() -> ReactiveState<Option<String>> {
    let message = ReactiveState::new(None);
    message.subscribe(schedule_render);
    message
}

/// Envío de los formularios de login/registro: navega o muestra el mensaje
pub(crate) fn bind_auth_submit<T>(
    form_el: &Element,
    ctx: &AppContext,
    form: &FormController<T, Result<NavigationIntent, String>>,
    message: &ReactiveState<Option<String>>,
) -> Result<(), JsValue>
where
    T: FormValues + 'static,
{
    let (ctx, form, message) = (ctx.clone(), form.clone(), message.clone());
    on_event(form_el, "submit", move |e: Event| {
        e.prevent_default();
        let (ctx, form, message) = (ctx.clone(), form.clone(), message.clone());
        spawn_local(async move {
            if message.with(Option::is_some) {
                message.set(None);
            }
            if let Some(result) = form.handle_submit(&e).await.submitted() {
                match result {
                    Ok(intent) => ctx.apply(intent),
                    Err(error) => message.set(Some(error)),
                }
            }
        });
    })
}
