// ============================================================================
// BUTTON
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, ElementBuilder};
use crate::views::components::{render_loading, LoadingSize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Danger,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Clone, PartialEq, Debug)]
pub struct ButtonProps {
    pub label: String,
    pub variant: ButtonVariant,
    pub size: ButtonSize,
    pub button_type: &'static str,
    pub is_loading: bool,
    pub loading_text: Option<String>,
    pub full_width: bool,
    pub disabled: bool,
    pub icon: Option<&'static str>,
}

impl ButtonProps {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: ButtonVariant::Primary,
            size: ButtonSize::Medium,
            button_type: "button",
            is_loading: false,
            loading_text: None,
            full_width: false,
            disabled: false,
            icon: None,
        }
    }

    pub fn submit(label: impl Into<String>) -> Self {
        Self { button_type: "submit", ..Self::new(label) }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn loading(mut self, is_loading: bool, text: Option<String>) -> Self {
        self.is_loading = is_loading;
        self.loading_text = text;
        self
    }

    pub fn full_width(mut self) -> Self {
        self.full_width = true;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled || self.is_loading
    }

    pub fn class_name(&self) -> String {
        let variant = match self.variant {
            ButtonVariant::Primary => "btn-primary",
            ButtonVariant::Secondary => "btn-secondary",
            ButtonVariant::Outline => "btn-outline",
            ButtonVariant::Danger => "btn-danger",
        };
        let size = match self.size {
            ButtonSize::Small => "btn-sm",
            ButtonSize::Medium => "btn-md",
            ButtonSize::Large => "btn-lg",
        };
        let mut classes = vec!["btn", variant, size];
        if self.full_width {
            classes.push("btn-full");
        }
        if self.is_disabled() {
            classes.push("btn-disabled");
        }
        classes.join(" ")
    }
}

/// Botón; durante la carga muestra un spinner y el texto de carga
pub fn render_button(props: &ButtonProps) -> Result<Element, JsValue> {
    let button = ElementBuilder::new("button")?
        .attr("type", props.button_type)?
        .class(&props.class_name())
        .flag("disabled", props.is_disabled())?
        .build();

    if props.is_loading {
        append_child(&button, &render_loading(LoadingSize::Small, None)?)?;
        let text = props.loading_text.as_deref().unwrap_or(&props.label);
        append_child(&button, &ElementBuilder::new("span")?.class("btn-label").text(text).build())?;
    } else {
        if let Some(icon) = props.icon {
            append_child(&button, &ElementBuilder::new("span")?.class("btn-icon").text(icon).build())?;
        }
        append_child(&button, &ElementBuilder::new("span")?.class("btn-label").text(&props.label).build())?;
    }
    Ok(button)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_follow_variant_size_and_state() {
        let props = ButtonProps::new("保存");
        assert_eq!(props.class_name(), "btn btn-primary btn-md");

        let props = ButtonProps::submit("削除")
            .variant(ButtonVariant::Danger)
            .size(ButtonSize::Small)
            .full_width()
            .loading(true, Some("削除中...".into()));
        assert_eq!(props.button_type, "submit");
        assert!(props.is_disabled());
        assert_eq!(props.class_name(), "btn btn-danger btn-sm btn-full btn-disabled");
    }
}
