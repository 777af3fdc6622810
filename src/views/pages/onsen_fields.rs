// ============================================================================
// ONSEN FIELDS - Campos comunes de los formularios de alta y edición
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};
use crate::app::AppContext;
use crate::dom::{append_child, event_value, set_event_value, ElementBuilder};
use crate::models::{clamp_rating, FEATURES, SPRING_TYPES};
use crate::state::FormState;
use crate::viewmodels::{FormController, OnsenFormValues};
use crate::views::components::{
    control_element_id, render_error_message, render_input_field, render_select_field, render_textarea_field,
    InputProps, SelectProps, TextareaProps,
};
use crate::utils::i18n::tr;

/// Valoración 0-5: el valor se clampa y se reescribe en el propio input
fn render_rating<R: 'static>(
    form: &FormController<OnsenFormValues, R>,
    value: u8,
) -> Result<Element, JsValue> {
    let id = control_element_id("rating");
    let form = form.clone();
    let input = ElementBuilder::new("input")?
        .id(&id)?
        .attr("name", "rating")?
        .attr("type", "number")?
        .attr("min", "0")?
        .attr("max", "5")?
        .attr("value", &value.to_string())?
        .class("form-input")
        .on("input", move |e: Event| {
            let Some(raw) = event_value(&e) else { return };
            let rating = clamp_rating(&raw).to_string();
            if raw != rating {
                set_event_value(&e, &rating);
            }
            form.handle_change("rating", &rating);
        })?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(ElementBuilder::new("label")?.attr("for", &id)?.class("form-label").text(&tr("field_rating")).build())?
        .child(input)?
        .build())
}

fn render_features<R: 'static>(
    form: &FormController<OnsenFormValues, R>,
    values: &OnsenFormValues,
) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("fieldset")?
        .class("form-group feature-group")
        .child(ElementBuilder::new("legend")?.class("form-label").text(&tr("field_features")).build())?
        .build();

    for feature in FEATURES {
        let form = form.clone();
        let checkbox = ElementBuilder::new("input")?
            .attr("type", "checkbox")?
            .attr("name", "features")?
            .attr("value", feature)?
            .flag("checked", values.features.contains(*feature))?
            .on("change", move |_| form.handle_change("features", feature))?
            .build();
        let label = ElementBuilder::new("label")?
            .class("feature-option")
            .child(checkbox)?
            .child(ElementBuilder::new("span")?.text(feature).build())?
            .build();
        append_child(&group, &label)?;
    }
    Ok(group)
}

/// `strict`: el alta exige lugar y tipo de manantial
pub fn render_onsen_fields<R: 'static>(
    ctx: &AppContext,
    form: &FormController<OnsenFormValues, R>,
    state: &FormState<OnsenFormValues>,
    strict: bool,
) -> Result<Vec<Element>, JsValue> {
    let values = &state.values;
    let error = |field: &str| state.errors.get(field).cloned();
    let on = |name: &'static str| {
        let form = form.clone();
        move |v: String| form.handle_change(name, &v)
    };

    let name = InputProps::new("name", "text", &values.name)
        .label(tr("field_name"))
        .placeholder(tr("name_placeholder"))
        .required()
        .error(error("name"));

    let location_label = if strict { "field_location_required" } else { "field_location" };
    let mut location = InputProps::new("location", "text", &values.location)
        .label(tr(location_label))
        .placeholder(tr("location_placeholder"))
        .error(error("location"));
    if strict {
        location = location.required();
    }

    let visit_date = InputProps::new("visit_date", "date", &values.visit_date)
        .label(tr("field_visit_date"))
        .required()
        .error(error("visit_date"));

    let spring_label = if strict { "field_spring_type_required" } else { "field_spring_type" };
    let spring_type = SelectProps {
        label: Some(tr(spring_label)),
        placeholder: Some(tr("select_placeholder")),
        required: strict,
        error: error("spring_type"),
        ..SelectProps::new("spring_type", &values.spring_type, SelectProps::plain_options(SPRING_TYPES))
    };

    let comment = TextareaProps {
        label: Some(tr("field_comment")),
        placeholder: Some(tr("comment_placeholder")),
        error: error("comment"),
        ..TextareaProps::new("comment", &values.comment)
    };

    Ok(vec![
        render_input_field(&name, on("name"))?,
        render_input_field(&location, on("location"))?,
        render_input_field(&visit_date, on("visit_date"))?,
        render_rating(form, values.rating)?,
        render_select_field(&spring_type, on("spring_type"))?,
        render_features(form, values)?,
        render_textarea_field(&comment, on("comment"))?,
    ])
}

/// Mensaje general encima del formulario
pub fn render_form_message(message: Option<&str>) -> Result<Option<Element>, JsValue> {
    match message {
        Some(text) => render_error_message(text, None),
        None => Ok(None),
    }
}
