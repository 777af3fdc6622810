// ============================================================================
// ONSEN DETAIL PAGE
// ============================================================================

use chrono::{DateTime, Local, Utc};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::app::{schedule_render, AppContext};
use crate::config::CONFIG;
use crate::dom::{append_child, ElementBuilder};
use crate::models::{OnsenLog, Route};
use crate::viewmodels::{DetailState, OnsenDetailViewModel};
use crate::views::components::{
    format_visit_date, render_button, render_error_message, render_link, render_loading, render_stars, ButtonProps,
    ButtonSize, ButtonVariant, LoadingSize,
};
use crate::utils::i18n::tr;

pub struct OnsenDetailPage {
    vm: OnsenDetailViewModel,
    /// Aviso que deja la página anterior (p. ej. fotos que no se subieron)
    notice: Option<String>,
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y/%m/%d %H:%M").to_string()
}

fn info_row(label: &str, value: Element) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("detail-row")
        .child(ElementBuilder::new("dt")?.text(label).build())?
        .child(ElementBuilder::new("dd")?.child(value)?.build())?
        .build())
}

fn text(value: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("span")?.text(value).build())
}

impl OnsenDetailPage {
    pub fn mount(ctx: &AppContext, id: &str) -> Self {
        let vm = OnsenDetailViewModel::new(id, ctx.logs.clone(), ctx.images.clone());
        vm.subscribe(schedule_render);

        let load_vm = vm.clone();
        spawn_local(async move { load_vm.load().await });
        Self { vm, notice: ctx.state.take_flash() }
    }

    pub fn render(&self, ctx: &AppContext) -> Result<Element, JsValue> {
        let state = self.vm.state();
        let page = ElementBuilder::new("div")?.class("onsen-detail").build();

        if let Some(notice) = &self.notice {
            if let Some(message) = render_error_message(notice, None)? {
                append_child(&page, &message)?;
            }
        }
        if let Some(error) = &state.error {
            if let Some(message) = render_error_message(error, None)? {
                append_child(&page, &message)?;
            }
        }

        if state.loading {
            append_child(&page, &render_loading(LoadingSize::Medium, Some(&tr("loading")))?)?;
            return Ok(page);
        }

        append_child(&page, &self.render_actions(ctx, &state)?)?;
        if let Some(log) = &state.log {
            append_child(&page, &self.render_log(ctx, log)?)?;
        }
        Ok(page)
    }

    fn render_actions(&self, ctx: &AppContext, state: &DetailState) -> Result<Element, JsValue> {
        let bar = ElementBuilder::new("div")?.class("detail-actions").build();
        append_child(&bar, &render_link(ctx, Route::OnsenList, &tr("back_to_list"), "btn btn-outline btn-sm")?)?;
        if state.log.is_none() {
            return Ok(bar);
        }

        let edit = {
            let (ctx, vm) = (ctx.clone(), self.vm.clone());
            ElementBuilder::from_element(render_button(
                &ButtonProps::new(tr("edit")).variant(ButtonVariant::Secondary).size(ButtonSize::Small),
            )?)
            .on_click(move |_| ctx.apply(vm.edit_intent()))?
            .build()
        };
        append_child(&bar, &edit)?;

        if state.confirm_delete {
            append_child(&bar, &ElementBuilder::new("span")?.class("delete-confirm").text(&tr("delete_confirm")).build())?;
        }

        let delete_label = if state.confirm_delete { "delete_confirm_button" } else { "delete" };
        let delete = {
            let (ctx, vm) = (ctx.clone(), self.vm.clone());
            ElementBuilder::from_element(render_button(
                &ButtonProps::new(tr(delete_label))
                    .variant(ButtonVariant::Danger)
                    .size(ButtonSize::Small)
                    .loading(state.deleting, None),
            )?)
            .on_click(move |_| {
                let (ctx, vm) = (ctx.clone(), vm.clone());
                spawn_local(async move {
                    let intent = vm.request_delete().await;
                    ctx.apply(intent);
                });
            })?
            .build()
        };
        append_child(&bar, &delete)?;

        if state.confirm_delete && !state.deleting {
            let vm = self.vm.clone();
            let cancel = ElementBuilder::from_element(render_button(
                &ButtonProps::new(tr("cancel")).variant(ButtonVariant::Outline).size(ButtonSize::Small),
            )?)
            .on_click(move |_| vm.cancel_delete())?
            .build();
            append_child(&bar, &cancel)?;
        }
        Ok(bar)
    }

    fn render_log(&self, ctx: &AppContext, log: &OnsenLog) -> Result<Element, JsValue> {
        let article = ElementBuilder::new("article")?
            .class("detail-card")
            .child(ElementBuilder::new("h1")?.text(&log.name).build())?
            .child(render_stars(log.rating.unwrap_or(0))?)?
            .build();

        let info = ElementBuilder::new("dl")?.class("detail-info").build();
        if let Some(location) = &log.location {
            append_child(&info, &info_row(&tr("field_location"), text(location)?)?)?;
        }
        if let Some(spring_type) = &log.spring_type {
            append_child(&info, &info_row(&tr("field_spring_type"), text(spring_type)?)?)?;
        }
        append_child(&info, &info_row(&tr("field_visit_date"), text(&format_visit_date(log.visit_date))?)?)?;
        if !log.features.is_empty() {
            let tags = ElementBuilder::new("ul")?.class("feature-tags").build();
            for feature in &log.features {
                append_child(&tags, &ElementBuilder::new("li")?.class("feature-tag").text(feature).build())?;
            }
            append_child(&info, &info_row(&tr("field_features"), tags)?)?;
        }
        append_child(&article, &info)?;

        if let Some(comment) = &log.comment {
            let section = ElementBuilder::new("section")?
                .class("detail-comment")
                .child(ElementBuilder::new("h2")?.text(&tr("comment")).build())?
                .child(ElementBuilder::new("p")?.text(comment).build())?
                .build();
            append_child(&article, &section)?;
        }

        if !log.images.is_empty() {
            append_child(&article, &self.render_images(log)?)?;
        }

        let meta = ElementBuilder::new("footer")?
            .class("detail-meta")
            .child(text(&format!("{}: {}", tr("created_at"), format_timestamp(&log.created_at)))?)?
            .child(text(&format!("{}: {}", tr("updated_at"), format_timestamp(&log.updated_at)))?)?
            .build();
        append_child(&article, &meta)?;
        Ok(article)
    }

    fn render_images(&self, log: &OnsenLog) -> Result<Element, JsValue> {
        let gallery = ElementBuilder::new("div")?.class("detail-gallery").build();
        for image in &log.images {
            let vm = self.vm.clone();
            let image_id = image.image_id.clone();
            let remove = ElementBuilder::from_element(render_button(
                &ButtonProps::new(tr("delete_image")).variant(ButtonVariant::Danger).size(ButtonSize::Small),
            )?)
            .on_click(move |_| {
                let (vm, image_id) = (vm.clone(), image_id.clone());
                spawn_local(async move { vm.delete_image(&image_id).await });
            })?
            .build();

            let figure = ElementBuilder::new("figure")?
                .class("detail-image")
                .child(
                    ElementBuilder::new("img")?
                        .attr("src", &image.resolved_url(&CONFIG.api_url))?
                        .attr("alt", &log.name)?
                        .attr("loading", "lazy")?
                        .build(),
                )?
                .child(remove)?
                .build();
            append_child(&gallery, &figure)?;
        }

        Ok(ElementBuilder::new("section")?
            .class("detail-images")
            .child(ElementBuilder::new("h2")?.text(&tr("photos")).build())?
            .child(gallery)?
            .build())
    }
}
