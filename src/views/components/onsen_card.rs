// ============================================================================
// ONSEN CARD - Resumen de un registro en la lista
// ============================================================================

use chrono::{Datelike, NaiveDate};
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::app::AppContext;
use crate::dom::{append_child, ElementBuilder};
use crate::models::onsen_log::MAX_RATING;
use crate::models::{OnsenLog, Route};

/// Fecha larga en japonés: 2024年6月1日
pub fn format_visit_date(date: NaiveDate) -> String {
    format!("{}年{}月{}日", date.year(), date.month(), date.day())
}

/// Cinco estrellas, las primeras `rating` llenas
pub fn render_stars(rating: u8) -> Result<Element, JsValue> {
    let stars = ElementBuilder::new("div")?
        .class("rating")
        .attr("aria-label", &format!("{}/{}", rating, MAX_RATING))?
        .build();
    for i in 0..MAX_RATING {
        let class = if i < rating { "star star-filled" } else { "star" };
        append_child(&stars, &ElementBuilder::new("span")?.class(class).text("★").build())?;
    }
    append_child(&stars, &ElementBuilder::new("span")?.class("rating-value").text(&rating.to_string()).build())?;
    Ok(stars)
}

fn info_row(icon: &str, text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("onsen-info")
        .child(ElementBuilder::new("span")?.class("onsen-info-icon").text(icon).build())?
        .child(ElementBuilder::new("span")?.text(text).build())?
        .build())
}

pub fn render_onsen_card(ctx: &AppContext, log: &OnsenLog) -> Result<Element, JsValue> {
    let route = Route::OnsenDetail(log.id.clone());
    let ctx = ctx.clone();
    let href = route.path();
    let card = ElementBuilder::new("a")?
        .attr("href", &href)?
        .class("onsen-card")
        .on_click(move |e| {
            e.prevent_default();
            ctx.navigate(route.clone());
        })?
        .build();

    let title = ElementBuilder::new("div")?
        .class("onsen-card-header")
        .child(ElementBuilder::new("h3")?.class("onsen-card-title").text(&log.name).build())?
        .build();
    if let Some(rating) = log.rating {
        append_child(&title, &render_stars(rating)?)?;
    }
    append_child(&card, &title)?;

    if let Some(location) = &log.location {
        append_child(&card, &info_row("📍", location)?)?;
    }
    append_child(&card, &info_row("📅", &format_visit_date(log.visit_date))?)?;
    if let Some(spring_type) = &log.spring_type {
        append_child(&card, &info_row("♨", spring_type)?)?;
    }

    if !log.features.is_empty() {
        let chips = ElementBuilder::new("div")?.class("onsen-features").build();
        for feature in &log.features {
            append_child(&chips, &ElementBuilder::new("span")?.class("feature-chip").text(feature).build())?;
        }
        append_child(&card, &chips)?;
    }

    if let Some(comment) = &log.comment {
        append_child(&card, &ElementBuilder::new("p")?.class("onsen-comment line-clamp-2").text(comment).build())?;
    }
    Ok(card)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_render_in_japanese_long_form() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(format_visit_date(date), "2024年6月1日");
    }
}
