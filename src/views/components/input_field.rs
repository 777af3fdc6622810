// ============================================================================
// INPUT FIELD - label + input + error/ayuda
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, ElementBuilder};
use crate::views::components::{control_element_id, render_error_message};

#[derive(Clone, PartialEq, Debug, Default)]
pub struct InputProps {
    pub name: String,
    pub label: Option<String>,
    pub input_type: String,
    pub value: String,
    pub placeholder: Option<String>,
    pub error: Option<String>,
    pub helper_text: Option<String>,
    pub required: bool,
    pub disabled: bool,
    /// Atributos extra (min, max, accept, autocomplete...)
    pub attrs: Vec<(&'static str, String)>,
}

impl InputProps {
    pub fn new(name: &str, input_type: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            input_type: input_type.to_string(),
            value: value.to_string(),
            ..Default::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    pub fn helper(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn input_class(&self) -> &'static str {
        if self.error.is_some() {
            "form-input form-input-error"
        } else {
            "form-input"
        }
    }
}

pub fn render_input_field<F>(props: &InputProps, on_input: F) -> Result<Element, JsValue>
where
    F: FnMut(String) + 'static,
{
    let id = control_element_id(&props.name);
    let group = ElementBuilder::new("div")?.class("form-group").build();

    if let Some(label) = &props.label {
        let label = ElementBuilder::new("label")?.attr("for", &id)?.class("form-label").text(label).build();
        append_child(&group, &label)?;
    }

    let mut input = ElementBuilder::new("input")?
        .id(&id)?
        .attr("name", &props.name)?
        .attr("type", &props.input_type)?
        .attr("value", &props.value)?
        .class(props.input_class())
        .flag("required", props.required)?
        .flag("disabled", props.disabled)?;
    if let Some(placeholder) = &props.placeholder {
        input = input.attr("placeholder", placeholder)?;
    }
    for (name, value) in &props.attrs {
        input = input.attr(name, value)?;
    }
    append_child(&group, &input.on_input(on_input)?.build())?;

    match &props.error {
        Some(error) => {
            if let Some(message) = render_error_message(error, Some(&props.name))? {
                append_child(&group, &message)?;
            }
        }
        None => {
            if let Some(helper) = &props.helper_text {
                append_child(&group, &ElementBuilder::new("p")?.class("form-helper").text(helper).build())?;
            }
        }
    }
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_switches_input_class() {
        let props = InputProps::new("email", "email", "").label("メールアドレス").required();
        assert_eq!(props.input_class(), "form-input");
        let props = props.error(Some("必須です".into()));
        assert_eq!(props.input_class(), "form-input form-input-error");
    }
}
