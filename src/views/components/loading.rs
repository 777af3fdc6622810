use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, ElementBuilder};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LoadingSize {
    Small,
    Medium,
    Large,
}

impl LoadingSize {
    fn class_name(&self) -> &'static str {
        match self {
            LoadingSize::Small => "spinner spinner-sm",
            LoadingSize::Medium => "spinner spinner-md",
            LoadingSize::Large => "spinner spinner-lg",
        }
    }
}

/// Spinner con texto opcional
pub fn render_loading(size: LoadingSize, text: Option<&str>) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .class("loading")
        .attr("role", "status")?
        .child(ElementBuilder::new("span")?.class(size.class_name()).build())?
        .build();
    if let Some(text) = text.filter(|t| !t.is_empty()) {
        append_child(&container, &ElementBuilder::new("span")?.class("loading-text").text(text).build())?;
    }
    Ok(container)
}
