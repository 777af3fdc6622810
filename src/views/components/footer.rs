use chrono::Datelike;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;
use crate::utils::i18n::tr;

pub fn render_footer() -> Result<Element, JsValue> {
    let year = chrono::Local::now().year();
    Ok(ElementBuilder::new("footer")?
        .class("app-footer")
        .child(ElementBuilder::new("p")?.text(&format!("© {} {}", year, tr("footer_text"))).build())?
        .build())
}
