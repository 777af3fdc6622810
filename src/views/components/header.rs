// ============================================================================
// HEADER - Logo + navegación según sesión (menú móvil plegable)
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::app::AppContext;
use crate::dom::{append_child, has_class, add_class, remove_class, ElementBuilder};
use crate::models::Route;
use crate::views::components::render_link;
use crate::utils::i18n::tr;

fn nav_class(active: bool) -> &'static str {
    if active {
        "nav-link nav-link-active"
    } else {
        "nav-link"
    }
}

fn render_nav(ctx: &AppContext, route: &Route) -> Result<Element, JsValue> {
    let nav = ElementBuilder::new("nav")?.class("header-nav").build();

    if ctx.state.auth.get_logged_in() {
        let active = route.path().starts_with("/onsen");
        append_child(&nav, &render_link(ctx, Route::OnsenList, &tr("nav_list"), nav_class(active))?)?;

        let auth = ctx.auth.clone();
        let ctx_logout = ctx.clone();
        let logout = ElementBuilder::new("button")?
            .attr("type", "button")?
            .class("nav-link nav-logout")
            .text(&tr("nav_logout"))
            .on_click(move |_| {
                let auth = auth.clone();
                let ctx = ctx_logout.clone();
                spawn_local(async move {
                    let intent = auth.logout().await;
                    log::info!("👋 [AUTH] Sesión cerrada");
                    ctx.apply(intent);
                });
            })?
            .build();
        append_child(&nav, &logout)?;
    } else {
        append_child(&nav, &render_link(ctx, Route::Login, &tr("nav_login"), nav_class(*route == Route::Login))?)?;
        append_child(&nav, &render_link(ctx, Route::Register, &tr("nav_register"), nav_class(*route == Route::Register))?)?;
    }
    Ok(nav)
}

pub fn render_header(ctx: &AppContext) -> Result<Element, JsValue> {
    let route = ctx.state.current_route();
    let header = ElementBuilder::new("header")?.class("app-header").build();

    let logo = render_link(ctx, Route::Home, &tr("app_title"), "header-logo")?;
    let nav = render_nav(ctx, &route)?;

    // El menú móvil se pliega en el DOM directamente, sin estado
    let nav_toggle = nav.clone();
    let toggle = ElementBuilder::new("button")?
        .attr("type", "button")?
        .attr("aria-label", "menu")?
        .class("header-menu-toggle")
        .text("☰")
        .on_click(move |_| {
            let result = if has_class(&nav_toggle, "open") {
                remove_class(&nav_toggle, "open")
            } else {
                add_class(&nav_toggle, "open")
            };
            if let Err(e) = result {
                log::warn!("⚠️ [HEADER] {:?}", e);
            }
        })?
        .build();

    append_child(&header, &logo)?;
    append_child(&header, &toggle)?;
    append_child(&header, &nav)?;
    Ok(header)
}
