use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, ElementBuilder};

#[derive(Clone, PartialEq, Debug, Default)]
pub struct CardProps {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub class: Option<String>,
    pub aria_label: Option<String>,
}

/// Tarjeta con cabecera opcional, cuerpo y pie
pub fn render_card(props: &CardProps, body: Element, footer: Option<Element>) -> Result<Element, JsValue> {
    let class = match &props.class {
        Some(extra) => format!("card {}", extra),
        None => "card".to_string(),
    };
    let mut card = ElementBuilder::new("div")?.class(&class);
    if let Some(label) = &props.aria_label {
        card = card.attr("aria-label", label)?.attr("role", "region")?;
    }
    let card = card.build();

    if props.title.is_some() || props.subtitle.is_some() {
        let header = ElementBuilder::new("div")?.class("card-header").build();
        if let Some(title) = &props.title {
            append_child(&header, &ElementBuilder::new("h3")?.class("card-title").text(title).build())?;
        }
        if let Some(subtitle) = &props.subtitle {
            append_child(&header, &ElementBuilder::new("p")?.class("card-subtitle").text(subtitle).build())?;
        }
        append_child(&card, &header)?;
    }

    append_child(&card, &ElementBuilder::new("div")?.class("card-body").child(body)?.build())?;

    if let Some(footer) = footer {
        append_child(&card, &ElementBuilder::new("div")?.class("card-footer").child(footer)?.build())?;
    }
    Ok(card)
}
