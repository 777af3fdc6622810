use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::app::AppContext;
use crate::dom::ElementBuilder;
use crate::models::Route;

/// Enlace interno: href real + navegación sin recarga
pub fn render_link(ctx: &AppContext, route: Route, text: &str, class: &str) -> Result<Element, JsValue> {
    let ctx = ctx.clone();
    let href = route.path();
    Ok(ElementBuilder::new("a")?
        .attr("href", &href)?
        .class(class)
        .text(text)
        .on_click(move |e| {
            e.prevent_default();
            ctx.navigate(route.clone());
        })?
        .build())
}
