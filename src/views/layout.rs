use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::app::AppContext;
use crate::dom::{append_child, ElementBuilder};
use crate::views::components::{render_footer, render_header, render_loading, LoadingSize};
use crate::views::Page;
use crate::utils::i18n::tr;

/// Cabecera + página actual + pie
pub fn render_layout(ctx: &AppContext, page: Option<&Page>) -> Result<Element, JsValue> {
    let layout = ElementBuilder::new("div")?.class("app-layout").build();
    append_child(&layout, &render_header(ctx)?)?;

    let main = ElementBuilder::new("main")?.class("app-main container").build();
    let content = match page {
        Some(page) if !ctx.state.auth.is_loading() => page.render(ctx)?,
        _ => render_loading(LoadingSize::Large, Some(&tr("loading")))?,
    };
    append_child(&main, &content)?;
    append_child(&layout, &main)?;

    append_child(&layout, &render_footer()?)?;
    Ok(layout)
}
