use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, ElementBuilder};
use crate::views::components::{control_element_id, render_error_message};

#[derive(Clone, PartialEq, Debug, Default)]
pub struct SelectProps {
    pub name: String,
    pub label: Option<String>,
    pub value: String,
    /// (value, label)
    pub options: Vec<(String, String)>,
    /// Opción vacía inicial
    pub placeholder: Option<String>,
    pub required: bool,
    pub disabled: bool,
    pub error: Option<String>,
}

impl SelectProps {
    pub fn new(name: &str, value: &str, options: Vec<(String, String)>) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            options,
            ..Default::default()
        }
    }

    /// Opciones cuyo valor y texto coinciden
    pub fn plain_options(values: &[&str]) -> Vec<(String, String)> {
        values.iter().map(|v| (v.to_string(), v.to_string())).collect()
    }
}

pub fn render_select_field<F>(props: &SelectProps, on_change: F) -> Result<Element, JsValue>
where
    F: FnMut(String) + 'static,
{
    let group = ElementBuilder::new("div")?.class("form-group").build();

    let id = control_element_id(&props.name);
    if let Some(label) = &props.label {
        let label = ElementBuilder::new("label")?.attr("for", &id)?.class("form-label").text(label);
        let label = if props.required {
            label.child(ElementBuilder::new("span")?.class("required-mark").text(" *").build())?
        } else {
            label
        };
        append_child(&group, &label.build())?;
    }

    let select = ElementBuilder::new("select")?
        .id(&id)?
        .attr("name", &props.name)?
        .class(if props.error.is_some() { "form-select form-input-error" } else { "form-select" })
        .flag("required", props.required)?
        .flag("disabled", props.disabled)?
        .build();

    if let Some(placeholder) = &props.placeholder {
        let option = ElementBuilder::new("option")?.attr("value", "")?.text(placeholder).build();
        append_child(&select, &option)?;
    }
    for (value, label) in &props.options {
        let option = ElementBuilder::new("option")?
            .attr("value", value)?
            .flag("selected", *value == props.value)?
            .text(label)
            .build();
        append_child(&select, &option)?;
    }

    let mut on_change = on_change;
    let select = ElementBuilder::from_element(select)
        .on("change", move |e| {
            if let Some(value) = crate::dom::event_value(&e) {
                on_change(value);
            }
        })?
        .build();
    append_child(&group, &select)?;

    if let Some(message) = render_error_message(props.error.as_deref().unwrap_or_default(), Some(&props.name))? {
        append_child(&group, &message)?;
    }
    Ok(group)
}
