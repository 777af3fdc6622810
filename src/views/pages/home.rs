use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::app::AppContext;
use crate::dom::{append_child, ElementBuilder};
use crate::models::Route;
use crate::views::components::render_link;
use crate::utils::i18n::tr;

fn feature(icon: &str, title_key: &str, body_key: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("home-feature")
        .child(ElementBuilder::new("div")?.class("home-feature-icon").text(icon).build())?
        .child(ElementBuilder::new("h3")?.text(&tr(title_key)).build())?
        .child(ElementBuilder::new("p")?.text(&tr(body_key)).build())?
        .build())
}

pub fn render_home(ctx: &AppContext) -> Result<Element, JsValue> {
    let logged_in = ctx.state.auth.get_logged_in();
    let page = ElementBuilder::new("div")?.class("home").build();

    let actions = ElementBuilder::new("div")?.class("home-actions").build();
    if logged_in {
        append_child(&actions, &render_link(ctx, Route::OnsenList, &tr("home_view_logs"), "btn btn-primary btn-lg")?)?;
    } else {
        append_child(&actions, &render_link(ctx, Route::Register, &tr("home_start_free"), "btn btn-primary btn-lg")?)?;
        append_child(&actions, &render_link(ctx, Route::Login, &tr("nav_login"), "btn btn-outline btn-lg")?)?;
    }

    let hero = ElementBuilder::new("section")?
        .class("home-hero")
        .child(ElementBuilder::new("h1")?.text(&tr("home_headline")).build())?
        .child(ElementBuilder::new("p")?.class("home-lead").text(&tr("home_lead")).build())?
        .child(actions)?
        .build();
    append_child(&page, &hero)?;

    let features = ElementBuilder::new("section")?
        .class("home-features")
        .child(ElementBuilder::new("h2")?.text(&tr("home_features_title")).build())?
        .child(
            ElementBuilder::new("div")?
                .class("home-feature-grid")
                .child(feature("📖", "home_feature_record", "home_feature_record_body")?)?
                .child(feature("📊", "home_feature_review", "home_feature_review_body")?)?
                .child(feature("📥", "home_feature_export", "home_feature_export_body")?)?
                .build(),
        )?
        .build();
    append_child(&page, &features)?;

    if !logged_in {
        let cta = ElementBuilder::new("section")?
            .class("home-cta")
            .child(ElementBuilder::new("h2")?.text(&tr("home_cta_title")).build())?
            .child(render_link(ctx, Route::Register, &tr("home_cta_button"), "btn btn-primary btn-lg")?)?
            .build();
        append_child(&page, &cta)?;
    }
    Ok(page)
}
