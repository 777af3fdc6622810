use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, ElementBuilder};
use crate::views::components::{control_element_id, render_error_message};

#[derive(Clone, PartialEq, Debug, Default)]
pub struct TextareaProps {
    pub name: String,
    pub label: Option<String>,
    pub value: String,
    pub placeholder: Option<String>,
    pub rows: u32,
    pub error: Option<String>,
    pub disabled: bool,
}

impl TextareaProps {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            rows: 4,
            ..Default::default()
        }
    }
}

pub fn render_textarea_field<F>(props: &TextareaProps, on_input: F) -> Result<Element, JsValue>
where
    F: FnMut(String) + 'static,
{
    let id = control_element_id(&props.name);
    let group = ElementBuilder::new("div")?.class("form-group").build();

    if let Some(label) = &props.label {
        append_child(&group, &ElementBuilder::new("label")?.attr("for", &id)?.class("form-label").text(label).build())?;
    }

    let mut area = ElementBuilder::new("textarea")?
        .id(&id)?
        .attr("name", &props.name)?
        .attr("rows", &props.rows.to_string())?
        .class(if props.error.is_some() { "form-textarea form-input-error" } else { "form-textarea" })
        .flag("disabled", props.disabled)?
        .text(&props.value);
    if let Some(placeholder) = &props.placeholder {
        area = area.attr("placeholder", placeholder)?;
    }
    append_child(&group, &area.on_input(on_input)?.build())?;

    if let Some(message) = render_error_message(props.error.as_deref().unwrap_or_default(), Some(&props.name))? {
        append_child(&group, &message)?;
    }
    Ok(group)
}
