// ============================================================================
// LOGIN PAGE
// ============================================================================

use std::rc::Rc;
use futures::FutureExt;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::app::AppContext;
use crate::dom::{append_child, ElementBuilder};
use crate::models::{NavigationIntent, Route};
use crate::state::ReactiveState;
use crate::viewmodels::auth_viewmodel::validate_login;
use crate::viewmodels::{FormController, LoginValues, SubmitHandler, Validator};
use crate::views::components::{
    render_button, render_card, render_error_message, render_input_field, render_link, ButtonProps, CardProps,
    InputProps,
};
use crate::views::pages::{bind_auth_submit, page_message, watch_form};
use crate::utils::i18n::tr;

pub struct LoginPage {
    form: FormController<LoginValues, Result<NavigationIntent, String>>,
    message: ReactiveState<Option<String>>,
}

impl LoginPage {
    pub fn mount(ctx: &AppContext) -> Self {
        let auth = ctx.auth.clone();
        let validator: Validator<LoginValues> = Rc::new(validate_login);
        let on_submit: SubmitHandler<LoginValues, Result<NavigationIntent, String>> = Rc::new(move |values| {
            let auth = auth.clone();
            async move { auth.login(values).await }.boxed_local()
        });
        let form = FormController::new(LoginValues::default(), Some(validator), on_submit);
        watch_form(&form);
        Self { form, message: page_message() }
    }

    pub fn render(&self, ctx: &AppContext) -> Result<Element, JsValue> {
        let state = self.form.state();
        let form_el = ElementBuilder::new("form")?.class("auth-form").attr("novalidate", "")?.build();

        if let Some(message) = self.message.get() {
            if let Some(error) = render_error_message(&message, None)? {
                append_child(&form_el, &error)?;
            }
        }

        let email = {
            let form = self.form.clone();
            let props = InputProps::new("email", "email", &state.values.email)
                .label(tr("email"))
                .attr("autocomplete", "email")
                .required()
                .error(state.errors.get("email").cloned());
            render_input_field(&props, move |v| form.handle_change("email", &v))?
        };
        let password = {
            let form = self.form.clone();
            let props = InputProps::new("password", "password", &state.values.password)
                .label(tr("password"))
                .attr("autocomplete", "current-password")
                .required()
                .error(state.errors.get("password").cloned());
            render_input_field(&props, move |v| form.handle_change("password", &v))?
        };
        append_child(&form_el, &email)?;
        append_child(&form_el, &password)?;

        let submit = ButtonProps::submit(tr("login_button"))
            .full_width()
            .loading(state.is_submitting, Some(tr("login_loading")));
        append_child(&form_el, &render_button(&submit)?)?;
        bind_auth_submit(&form_el, ctx, &self.form, &self.message)?;

        let footer = ElementBuilder::new("p")?
            .class("auth-switch")
            .text(&tr("no_account"))
            .child(render_link(ctx, Route::Register, &tr("nav_register"), "auth-switch-link")?)?
            .build();

        let props = CardProps {
            title: Some(tr("login_title")),
            subtitle: Some(tr("login_subtitle")),
            class: Some("auth-card".to_string()),
            aria_label: None,
        };
        render_card(&props, form_el, Some(footer))
    }
}
