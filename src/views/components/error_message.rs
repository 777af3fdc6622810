use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;

/// id del mensaje de error de un campo (para ocultarlo sin re-render)
pub fn error_element_id(field: &str) -> String {
    format!("error-{}", field)
}

/// id del control de un campo (input, textarea o select)
pub fn control_element_id(field: &str) -> String {
    format!("field-{}", field)
}

/// Mensaje de error en línea; sin mensaje no se renderiza nada
pub fn render_error_message(message: &str, field: Option<&str>) -> Result<Option<Element>, JsValue> {
    if message.is_empty() {
        return Ok(None);
    }
    let mut builder = ElementBuilder::new("div")?
        .class("error-message")
        .attr("role", "alert")?
        .child(ElementBuilder::new("span")?.class("error-icon").text("⚠").build())?
        .child(ElementBuilder::new("span")?.text(message).build())?;
    if let Some(field) = field {
        builder = builder.id(&error_element_id(field))?;
    }
    Ok(Some(builder.build()))
}
