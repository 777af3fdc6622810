// ============================================================================
// ONSEN LIST PAGE - Búsqueda, filtros, orden, paginación y exportación
// ============================================================================
// Escribir en la búsqueda o en los filtros no re-renderiza (el input perdería
// el foco); solo lo hacen los cambios de datos, carga, orden o página.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event};
use crate::app::{schedule_render, AppContext};
use crate::config::CONFIG;
use crate::dom::{append_child, download, ElementBuilder};
use crate::models::{ExportFormat, Route, SortDirection, SortField};
use crate::viewmodels::{FilterForm, ListState, OnsenListViewModel};
use crate::views::components::{
    render_button, render_error_message, render_input_field, render_link, render_loading, render_onsen_card,
    render_select_field, ButtonProps, ButtonSize, ButtonVariant, InputProps, LoadingSize, SelectProps,
};
use crate::utils::i18n::tr;

pub struct OnsenListPage {
    vm: OnsenListViewModel,
}

/// Lo que se ve en pantalla, sin lo que el usuario está tecleando
fn visible(state: &ListState) -> ListState {
    ListState {
        search: String::new(),
        filters: FilterForm::default(),
        ..state.clone()
    }
}

impl OnsenListPage {
    pub fn mount(ctx: &AppContext) -> Self {
        let vm = OnsenListViewModel::new(ctx.logs.clone(), CONFIG.page_size);

        let last = Rc::new(RefCell::new(visible(&vm.state())));
        vm.watch(move |state: &ListState| {
            let next = visible(state);
            if *last.borrow() != next {
                *last.borrow_mut() = next;
                schedule_render();
            }
        });

        let fetch_vm = vm.clone();
        spawn_local(async move { fetch_vm.fetch().await });
        Self { vm }
    }

    pub fn render(&self, ctx: &AppContext) -> Result<Element, JsValue> {
        let state = self.vm.state();
        let page = ElementBuilder::new("div")?.class("onsen-list").build();

        append_child(&page, &self.render_toolbar(ctx)?)?;
        append_child(&page, &self.render_search(&state)?)?;
        append_child(&page, &self.render_controls(&state)?)?;
        if state.show_filters {
            append_child(&page, &self.render_filters(&state)?)?;
        }

        if let Some(error) = &state.error {
            if let Some(message) = render_error_message(error, None)? {
                append_child(&page, &message)?;
            }
        }

        if state.loading {
            append_child(&page, &render_loading(LoadingSize::Medium, Some(&tr("loading")))?)?;
        } else if state.logs.is_empty() {
            let empty = ElementBuilder::new("div")?
                .class("empty-state")
                .child(ElementBuilder::new("p")?.text(&tr("empty_list")).build())?
                .child(render_link(ctx, Route::OnsenNew, &tr("create_first"), "btn btn-primary btn-md")?)?
                .build();
            append_child(&page, &empty)?;
        } else {
            let grid = ElementBuilder::new("div")?.class("onsen-grid").build();
            for log in &state.logs {
                append_child(&grid, &render_onsen_card(ctx, log)?)?;
            }
            append_child(&page, &grid)?;
        }

        if state.show_pager() {
            append_child(&page, &self.render_pager(ctx, &state)?)?;
        }
        Ok(page)
    }

    fn render_toolbar(&self, ctx: &AppContext) -> Result<Element, JsValue> {
        let actions = ElementBuilder::new("div")?.class("list-actions").build();
        for (format, key) in [(ExportFormat::Json, "export_json"), (ExportFormat::Csv, "export_csv")] {
            let vm = self.vm.clone();
            let button = ElementBuilder::from_element(render_button(
                &ButtonProps::new(tr(key)).variant(ButtonVariant::Outline).size(ButtonSize::Small).icon("📥"),
            )?)
            .on_click(move |_| {
                let vm = vm.clone();
                spawn_local(async move {
                    if let Some(file) = vm.export(format).await {
                        if let Err(e) = download(&file) {
                            log::error!("❌ [LIST] Descarga {}: {:?}", file.file_name, e);
                        }
                    }
                });
            })?
            .build();
            append_child(&actions, &button)?;
        }
        append_child(&actions, &render_link(ctx, Route::OnsenNew, &tr("new_log"), "btn btn-primary btn-sm")?)?;

        Ok(ElementBuilder::new("div")?
            .class("list-header")
            .child(ElementBuilder::new("h1")?.text(&tr("list_title")).build())?
            .child(actions)?
            .build())
    }

    fn render_search(&self, state: &ListState) -> Result<Element, JsValue> {
        let form = ElementBuilder::new("form")?.class("list-search").build();
        let input = {
            let vm = self.vm.clone();
            let props = InputProps::new("search", "search", &state.search).placeholder(tr("search_placeholder"));
            render_input_field(&props, move |v| vm.set_search(&v))?
        };
        append_child(&form, &input)?;
        append_child(&form, &render_button(&ButtonProps::submit(tr("search")).size(ButtonSize::Small))?)?;

        let vm = self.vm.clone();
        Ok(ElementBuilder::from_element(form)
            .on("submit", move |e: Event| {
                e.prevent_default();
                let vm = vm.clone();
                spawn_local(async move { vm.search().await });
            })?
            .build())
    }

    fn render_controls(&self, state: &ListState) -> Result<Element, JsValue> {
        let toggle = {
            let vm = self.vm.clone();
            ElementBuilder::from_element(render_button(
                &ButtonProps::new(tr("filters")).variant(ButtonVariant::Secondary).size(ButtonSize::Small),
            )?)
            .on_click(move |_| vm.toggle_filters())?
            .build()
        };

        let sort = {
            let vm = self.vm.clone();
            let options = vec![
                (SortField::VisitDate.as_str().to_string(), tr("sort_visit_date")),
                (SortField::Rating.as_str().to_string(), tr("sort_rating")),
            ];
            let props = SelectProps::new("sort", state.sort_field.as_str(), options);
            render_select_field(&props, move |value| {
                let field = if value == SortField::Rating.as_str() { SortField::Rating } else { SortField::VisitDate };
                let vm = vm.clone();
                spawn_local(async move { vm.set_sort_field(field).await });
            })?
        };

        let direction = {
            let vm = self.vm.clone();
            let label = match state.sort_direction {
                SortDirection::Asc => tr("sort_asc"),
                SortDirection::Desc => tr("sort_desc"),
            };
            ElementBuilder::from_element(render_button(
                &ButtonProps::new(label).variant(ButtonVariant::Outline).size(ButtonSize::Small),
            )?)
            .on_click(move |_| {
                let vm = vm.clone();
                spawn_local(async move { vm.toggle_sort_direction().await });
            })?
            .build()
        };

        Ok(ElementBuilder::new("div")?
            .class("list-controls")
            .child(toggle)?
            .child(sort)?
            .child(direction)?
            .build())
    }

    fn filter_input(&self, name: &'static str, props: InputProps) -> Result<Element, JsValue> {
        let vm = self.vm.clone();
        render_input_field(&props, move |v| vm.set_filter_field(name, &v))
    }

    fn render_filters(&self, state: &ListState) -> Result<Element, JsValue> {
        let f = &state.filters;
        let panel = ElementBuilder::new("div")?.class("filter-panel").build();

        let fields = [
            (
                "name",
                InputProps::new("name", "text", &f.name)
                    .label(tr("filter_name"))
                    .placeholder(tr("filter_name_placeholder")),
            ),
            (
                "location",
                InputProps::new("location", "text", &f.location)
                    .label(tr("filter_location"))
                    .placeholder(tr("filter_location_placeholder")),
            ),
            (
                "min_rating",
                InputProps::new("min_rating", "number", &f.min_rating.to_string())
                    .label(tr("filter_min_rating"))
                    .attr("min", "0")
                    .attr("max", "5"),
            ),
            (
                "max_rating",
                InputProps::new("max_rating", "number", &f.max_rating.to_string())
                    .label(tr("filter_max_rating"))
                    .attr("min", "0")
                    .attr("max", "5"),
            ),
            ("from_date", InputProps::new("from_date", "date", &f.from_date).label(tr("filter_from"))),
            ("to_date", InputProps::new("to_date", "date", &f.to_date).label(tr("filter_to"))),
        ];
        for (name, props) in fields {
            append_child(&panel, &self.filter_input(name, props)?)?;
        }

        let reset = {
            let vm = self.vm.clone();
            ElementBuilder::from_element(render_button(
                &ButtonProps::new(tr("reset")).variant(ButtonVariant::Outline).size(ButtonSize::Small),
            )?)
            .on_click(move |_| {
                vm.reset_filters();
                // los campos del panel deben vaciarse
                schedule_render();
            })?
            .build()
        };
        let apply = {
            let vm = self.vm.clone();
            ElementBuilder::from_element(render_button(&ButtonProps::new(tr("apply")).size(ButtonSize::Small))?)
                .on_click(move |_| {
                    let vm = vm.clone();
                    spawn_local(async move { vm.apply_filters().await });
                })?
                .build()
        };
        let buttons = ElementBuilder::new("div")?.class("filter-actions").child(reset)?.child(apply)?.build();
        append_child(&panel, &buttons)?;
        Ok(panel)
    }

    fn render_pager(&self, ctx: &AppContext, state: &ListState) -> Result<Element, JsValue> {
        let prev = {
            let vm = self.vm.clone();
            ElementBuilder::from_element(render_button(
                &ButtonProps::new(tr("prev"))
                    .variant(ButtonVariant::Outline)
                    .size(ButtonSize::Small)
                    .disabled(!state.has_prev()),
            )?)
            .on_click(move |_| {
                let vm = vm.clone();
                spawn_local(async move { vm.prev_page().await });
            })?
            .build()
        };
        let next = {
            let vm = self.vm.clone();
            ElementBuilder::from_element(render_button(
                &ButtonProps::new(tr("next"))
                    .variant(ButtonVariant::Outline)
                    .size(ButtonSize::Small)
                    .disabled(!state.has_next()),
            )?)
            .on_click(move |_| {
                let vm = vm.clone();
                spawn_local(async move { vm.next_page().await });
            })?
            .build()
        };
        let label = tr("page_of")
            .replace("{page}", &state.page.to_string())
            .replace("{total}", &state.total_pages().to_string());

        Ok(ElementBuilder::new("nav")?
            .class("pager")
            .child(prev)?
            .child(ElementBuilder::new("span")?.class("pager-label").text(&label).build())?
            .child(next)?
            .build())
    }
}
