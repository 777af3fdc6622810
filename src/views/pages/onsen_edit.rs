// ============================================================================
// ONSEN EDIT PAGE - Edición de un registro existente (sin fotos)
// ============================================================================

use std::rc::Rc;
use futures::FutureExt;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event};
use crate::app::{schedule_render, AppContext};
use crate::dom::{append_child, ElementBuilder};
use crate::models::{NavigationIntent, Route};
use crate::state::ReactiveState;
use crate::viewmodels::onsen_form_viewmodel::validate_edit;
use crate::viewmodels::{FormController, OnsenFormValues, OnsenFormViewModel, SubmitHandler, SubmitOutcome, Validator};
use crate::views::components::{render_button, render_link, render_loading, ButtonProps, LoadingSize};
use crate::views::pages::onsen_fields::{render_form_message, render_onsen_fields};
use crate::views::pages::{page_message, watch_form};
use crate::utils::i18n::tr;

#[derive(Clone)]
pub struct OnsenEditPage {
    id: String,
    form: FormController<OnsenFormValues, Result<NavigationIntent, String>>,
    loading: ReactiveState<bool>,
    message: ReactiveState<Option<String>>,
}

impl OnsenEditPage {
    pub fn mount(ctx: &AppContext, id: &str) -> Self {
        let vm = OnsenFormViewModel::new(ctx.logs.clone(), ctx.images.clone());

        let validator: Validator<OnsenFormValues> = Rc::new(validate_edit);
        let on_submit: SubmitHandler<OnsenFormValues, Result<NavigationIntent, String>> = {
            let (vm, id) = (vm.clone(), id.to_string());
            Rc::new(move |values| {
                let (vm, id) = (vm.clone(), id.clone());
                async move { vm.update(&id, values).await }.boxed_local()
            })
        };
        let form = FormController::new(OnsenFormValues::default(), Some(validator), on_submit);
        watch_form(&form);

        let loading = ReactiveState::new(true);
        loading.subscribe(schedule_render);
        let page = Self { id: id.to_string(), form, loading, message: page_message() };

        let this = page.clone();
        spawn_local(async move {
            match vm.load(&this.id).await {
                Ok(values) => this.form.set_values(values),
                Err(error) => this.message.set(Some(error)),
            }
            this.loading.set(false);
        });
        page
    }

    fn submit(&self, ctx: &AppContext, event: Event) {
        let (ctx, form, message) = (ctx.clone(), self.form.clone(), self.message.clone());
        spawn_local(async move {
            match form.handle_submit(&event).await {
                SubmitOutcome::Invalid(_) => message.set(Some(tr("required_fields"))),
                SubmitOutcome::Submitted(Ok(intent)) => ctx.apply(intent),
                SubmitOutcome::Submitted(Err(error)) => message.set(Some(error)),
            }
        });
    }

    pub fn render(&self, ctx: &AppContext) -> Result<Element, JsValue> {
        let page = ElementBuilder::new("div")?
            .class("onsen-form-page")
            .child(ElementBuilder::new("h1")?.text(&tr("edit_title")).build())?
            .build();

        if self.loading.get() {
            append_child(&page, &render_loading(LoadingSize::Medium, Some(&tr("loading")))?)?;
            return Ok(page);
        }

        let state = self.form.state();
        let form_el = ElementBuilder::new("form")?.class("onsen-form").attr("novalidate", "")?.build();
        if let Some(message) = render_form_message(self.message.get().as_deref())? {
            append_child(&form_el, &message)?;
        }
        for field in render_onsen_fields(ctx, &self.form, &state, false)? {
            append_child(&form_el, &field)?;
        }

        let cancel = render_link(ctx, Route::OnsenDetail(self.id.clone()), &tr("cancel"), "btn btn-outline btn-md")?;
        let save = render_button(&ButtonProps::submit(tr("save")).loading(state.is_submitting, Some(tr("saving"))))?;
        let actions = ElementBuilder::new("div")?.class("form-actions").child(cancel)?.child(save)?.build();
        append_child(&form_el, &actions)?;

        let (page_ctx, this) = (ctx.clone(), self.clone());
        let form_el = ElementBuilder::from_element(form_el)
            .on("submit", move |e: Event| {
                e.prevent_default();
                this.submit(&page_ctx, e);
            })?
            .build();
        append_child(&page, &form_el)?;
        Ok(page)
    }
}
