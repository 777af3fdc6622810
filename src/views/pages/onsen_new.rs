// ============================================================================
// ONSEN NEW PAGE - Alta de registro con fotos
// ============================================================================

use std::rc::Rc;
use chrono::Local;
use futures::FutureExt;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event};
use crate::app::{redirect_delay, schedule_render, AppContext};
use crate::dom::{append_child, event_files, read_upload, set_event_value, window, ElementBuilder};
use crate::models::ImageUpload;
use crate::state::ReactiveState;
use crate::viewmodels::onsen_form_viewmodel::{validate_image, validate_new};
use crate::viewmodels::{
    CreateOutcome, FormController, OnsenFormValues, OnsenFormViewModel, SubmitHandler, SubmitOutcome, Validator,
};
use crate::views::components::{render_button, ButtonProps, ButtonSize, ButtonVariant};
use crate::views::pages::onsen_fields::{render_form_message, render_onsen_fields};
use crate::views::pages::{page_message, watch_form};
use crate::utils::i18n::tr;

#[derive(Clone)]
pub struct OnsenNewPage {
    form: FormController<OnsenFormValues, Result<CreateOutcome, String>>,
    uploads: ReactiveState<Vec<ImageUpload>>,
    message: ReactiveState<Option<String>>,
}

pub(crate) fn history_back() {
    if let Some(history) = window().and_then(|w| w.history().ok()) {
        if let Err(e) = history.back() {
            log::warn!("⚠️ [ROUTER] history.back: {:?}", e);
        }
    }
}

impl OnsenNewPage {
    pub fn mount(ctx: &AppContext) -> Self {
        let vm = OnsenFormViewModel::new(ctx.logs.clone(), ctx.images.clone());
        let uploads: ReactiveState<Vec<ImageUpload>> = ReactiveState::new(Vec::new());
        uploads.subscribe(schedule_render);

        let validator: Validator<OnsenFormValues> = Rc::new(validate_new);
        let on_submit: SubmitHandler<OnsenFormValues, Result<CreateOutcome, String>> = {
            let uploads = uploads.clone();
            Rc::new(move |values| {
                let (vm, files) = (vm.clone(), uploads.get());
                async move { vm.create_with_images(values, files).await }.boxed_local()
            })
        };

        let today = Local::now().date_naive();
        let form = FormController::new(OnsenFormValues::for_new(today), Some(validator), on_submit);
        watch_form(&form);
        Self { form, uploads, message: page_message() }
    }

    fn submit(&self, ctx: &AppContext, event: Event) {
        let (ctx, form, message) = (ctx.clone(), self.form.clone(), self.message.clone());
        spawn_local(async move {
            match form.handle_submit(&event).await {
                SubmitOutcome::Invalid(_) => message.set(Some(tr("required_fields"))),
                SubmitOutcome::Submitted(Err(error)) => message.set(Some(error)),
                SubmitOutcome::Submitted(Ok(outcome)) => {
                    log::info!("♨️ [FORM] Registro {} creado ({} fotos)", outcome.log.id, outcome.uploaded);
                    let partial = outcome.upload_error.is_some();
                    if let Some(warning) = outcome.upload_error.clone() {
                        ctx.state.set_flash(Some(warning.clone()));
                        message.set(Some(warning));
                    }
                    ctx.apply_later(outcome.intent(), redirect_delay(partial));
                }
            }
        });
    }

    fn render_photos(&self) -> Result<Element, JsValue> {
        let input = {
            let (uploads, message) = (self.uploads.clone(), self.message.clone());
            ElementBuilder::new("input")?
                .id("field-photos")?
                .attr("type", "file")?
                .attr("accept", "image/*")?
                .flag("multiple", true)?
                .class("form-file")
                .on("change", move |e: Event| {
                    let files = event_files(&e);
                    set_event_value(&e, "");
                    let (uploads, message) = (uploads.clone(), message.clone());
                    spawn_local(async move {
                        for file in files {
                            let upload = match read_upload(&file).await {
                                Ok(upload) => upload,
                                Err(e) => {
                                    log::error!("❌ [FORM] No se pudo leer {}: {:?}", file.name(), e);
                                    continue;
                                }
                            };
                            match validate_image(&upload) {
                                Ok(()) => uploads.update(|list| list.push(upload)),
                                Err(error) => message.set(Some(format!("{}: {}", upload.file_name, error))),
                            }
                        }
                    });
                })?
                .build()
        };

        let list = ElementBuilder::new("ul")?.class("photo-list").build();
        for (index, upload) in self.uploads.get().iter().enumerate() {
            let uploads = self.uploads.clone();
            let remove = ElementBuilder::from_element(render_button(
                &ButtonProps::new(tr("remove")).variant(ButtonVariant::Outline).size(ButtonSize::Small),
            )?)
            .on_click(move |_| {
                uploads.update(|list| {
                    if index < list.len() {
                        list.remove(index);
                    }
                })
            })?
            .build();
            let item = ElementBuilder::new("li")?
                .child(ElementBuilder::new("span")?.text(&upload.file_name).build())?
                .child(remove)?
                .build();
            append_child(&list, &item)?;
        }

        Ok(ElementBuilder::new("div")?
            .class("form-group")
            .child(ElementBuilder::new("label")?.attr("for", "field-photos")?.class("form-label").text(&tr("photos")).build())?
            .child(input)?
            .child(ElementBuilder::new("p")?.class("form-helper").text(&tr("photo_hint")).build())?
            .child(list)?
            .build())
    }

    pub fn render(&self, ctx: &AppContext) -> Result<Element, JsValue> {
        let state = self.form.state();
        let form_el = ElementBuilder::new("form")?.class("onsen-form").attr("novalidate", "")?.build();

        if let Some(message) = render_form_message(self.message.get().as_deref())? {
            append_child(&form_el, &message)?;
        }
        for field in render_onsen_fields(ctx, &self.form, &state, true)? {
            append_child(&form_el, &field)?;
        }
        append_child(&form_el, &self.render_photos()?)?;

        let cancel = ElementBuilder::from_element(render_button(
            &ButtonProps::new(tr("cancel")).variant(ButtonVariant::Outline).disabled(state.is_submitting),
        )?)
        .on_click(|_| history_back())?
        .build();
        let save = render_button(&ButtonProps::submit(tr("save")).loading(state.is_submitting, Some(tr("saving"))))?;
        let actions = ElementBuilder::new("div")?.class("form-actions").child(cancel)?.child(save)?.build();
        append_child(&form_el, &actions)?;

        let page = ElementBuilder::new("div")?
            .class("onsen-form-page")
            .child(ElementBuilder::new("h1")?.text(&tr("new_title")).build())?
            .build();
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
