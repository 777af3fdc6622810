use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::app::AppContext;
use crate::dom::ElementBuilder;
use crate::models::Route;
use crate::views::components::render_link;
use crate::utils::i18n::tr;

pub fn render_not_found(ctx: &AppContext, path: &str) -> Result<Element, JsValue> {
    log::warn!("🧭 [ROUTER] Ruta desconocida: {}", path);
    Ok(ElementBuilder::new("div")?
        .class("not-found")
        .child(ElementBuilder::new("h1")?.text("404").build())?
        .child(ElementBuilder::new("p")?.text(&tr("not_found")).build())?
        .child(render_link(ctx, Route::Home, &tr("back"), "btn btn-outline btn-md")?)?
        .build())
}
