use std::rc::Rc;
use futures::FutureExt;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::app::AppContext;
use crate::dom::{append_child, ElementBuilder};
use crate::models::{NavigationIntent, Route};
use crate::state::ReactiveState;
use crate::viewmodels::auth_viewmodel::{validate_register, MIN_PASSWORD_LENGTH};
use crate::viewmodels::{FormController, RegisterValues, SubmitHandler, Validator};
use crate::views::components::{
    render_button, render_card, render_error_message, render_input_field, render_link, ButtonProps, CardProps,
    InputProps,
};
use crate::views::pages::{bind_auth_submit, page_message, watch_form};
use crate::utils::i18n::tr;

pub struct RegisterPage {
    form: FormController<RegisterValues, Result<NavigationIntent, String>>,
    message: ReactiveState<Option<String>>,
}

impl RegisterPage {
    pub fn mount(ctx: &AppContext) -> Self {
        let auth = ctx.auth.clone();
        let validator: Validator<RegisterValues> = Rc::new(validate_register);
        let on_submit: SubmitHandler<RegisterValues, Result<NavigationIntent, String>> = Rc::new(move |values| {
            let auth = auth.clone();
            async move { auth.register(values).await }.boxed_local()
        });
        let form = FormController::new(RegisterValues::default(), Some(validator), on_submit);
        watch_form(&form);
        Self { form, message: page_message() }
    }

    fn field(&self, name: &'static str, input_type: &str, value: &str, props: InputProps) -> Result<Element, JsValue> {
        let form = self.form.clone();
        let props = InputProps {
            name: name.to_string(),
            input_type: input_type.to_string(),
            value: value.to_string(),
            ..props
        };
        render_input_field(&props, move |v| form.handle_change(name, &v))
    }

    pub fn render(&self, ctx: &AppContext) -> Result<Element, JsValue> {
        let state = self.form.state();
        let values = &state.values;
        let error = |field: &str| state.errors.get(field).cloned();
        let form_el = ElementBuilder::new("form")?.class("auth-form").attr("novalidate", "")?.build();

        if let Some(message) = self.message.get() {
            if let Some(element) = render_error_message(&message, None)? {
                append_child(&form_el, &element)?;
            }
        }

        let base = InputProps::default().required();
        append_child(
            &form_el,
            &self.field("email", "email", &values.email, base.clone().label(tr("email")).error(error("email")))?,
        )?;
        append_child(
            &form_el,
            &self.field(
                "password",
                "password",
                &values.password,
                base.clone()
                    .label(tr("password"))
                    .attr("autocomplete", "new-password")
                    .helper(format!("{}+", MIN_PASSWORD_LENGTH))
                    .error(error("password")),
            )?,
        )?;
        append_child(
            &form_el,
            &self.field(
                "confirm_password",
                "password",
                &values.confirm_password,
                base.label(tr("password_confirm"))
                    .attr("autocomplete", "new-password")
                    .error(error("confirm_password")),
            )?,
        )?;

        let submit = ButtonProps::submit(tr("register_button"))
            .full_width()
            .loading(state.is_submitting, Some(tr("register_loading")));
        append_child(&form_el, &render_button(&submit)?)?;
        bind_auth_submit(&form_el, ctx, &self.form, &self.message)?;

        let footer = ElementBuilder::new("p")?
            .class("auth-switch")
            .text(&tr("have_account"))
            .child(render_link(ctx, Route::Login, &tr("nav_login"), "auth-switch-link")?)?
            .build();

        let props = CardProps {
            title: Some(tr("register_title")),
            subtitle: Some(tr("register_subtitle")),
            class: Some("auth-card".to_string()),
            aria_label: None,
        };
        render_card(&props, form_el, Some(footer))
    }
}
