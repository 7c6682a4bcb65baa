//! Browser tests: the live `ElementProbe` against real elements.

#![cfg(target_arch = "wasm32")]

use folio_core::config::CursorConfig;
use folio_core::model::Color;
use folio_interact::{CursorMode, ElementProbe, HoverContext, nav_link_color, select_color, select_mode};
use folio_wasm::dom::{self, DomElement};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn mount(tag: &str, parent: Option<&Element>) -> Element {
    let document = dom::document().expect("document available");
    let el = document.create_element(tag).expect("create element");
    match parent {
        Some(p) => p.append_child(&el).expect("append"),
        None => document
            .body()
            .expect("body")
            .append_child(&el)
            .expect("append"),
    };
    el
}

#[wasm_bindgen_test]
fn probe_reads_tag_classes_and_parent() {
    let tile = mount("div", None);
    tile.set_class_name("draggable-box");
    let caption = mount("span", Some(&tile));

    let probe = DomElement(caption.clone());
    assert_eq!(probe.tag_name(), "SPAN");
    assert!(probe.parent().is_some_and(|p| p.has_class("draggable-box")));
    assert!(DomElement(tile.clone()).contains(&probe));
    assert_eq!(
        nav_link_color(Some(&probe), &CursorConfig::default().palette),
        Color::WHITE
    );
    tile.remove();
}

#[wasm_bindgen_test]
fn button_hovers_and_div_dots() {
    let button = mount("button", None);
    let div = mount("div", None);
    let mode = |el: &Element| select_mode(&HoverContext::new(Some(DomElement(el.clone())), None));
    assert_eq!(mode(&button), CursorMode::Hover);
    assert_eq!(mode(&div), CursorMode::Default);
    button.remove();
    div.remove();
}

#[wasm_bindgen_test]
fn computed_background_drives_color() {
    let light = mount("div", None);
    light
        .dyn_ref::<HtmlElement>()
        .expect("html element")
        .style()
        .set_property("background-color", "rgb(220, 220, 220)")
        .expect("set style");
    let config = CursorConfig::default();
    assert_eq!(
        select_color(Some(&DomElement(light.clone())), &config),
        config.palette.accent
    );
    light.remove();
}

#[wasm_bindgen_test]
fn inline_style_helpers_round_trip() {
    let el = mount("div", None);
    dom::set_style(&el, "cursor", "pointer");
    assert_eq!(dom::inline_style(&el, "cursor").as_deref(), Some("pointer"));
    assert!(dom::is_attached(&el));
    el.remove();
    assert!(!dom::is_attached(&el));
}

#[wasm_bindgen_test]
fn only_permanent_failures_force_native_cursor() {
    use folio_core::error::InitError;

    let document = dom::document().expect("document available");
    let installed = || document.get_element_by_id("cursor-fallback");
    if let Some(stale) = installed() {
        stale.remove();
    }

    folio_wasm::native_fallback(&InitError::MissingElement("body"));
    assert!(installed().is_none());

    folio_wasm::native_fallback(&InitError::Unsupported("touch device".into()));
    let style = installed().expect("fallback stylesheet");
    assert!(
        style
            .text_content()
            .is_some_and(|css| css.contains("cursor: auto !important"))
    );
    let body = document.body().expect("body");
    assert_eq!(body.style().get_property_value("cursor").ok().as_deref(), Some("auto"));
    style.remove();
}

#[wasm_bindgen_test]
fn tiles_take_document_wheel_and_contain_covers() {
    use web_sys::{WheelEvent, WheelEventInit};

    let container = mount("div", None);
    container.set_class_name("projects-container");
    dom::set_style(&container, "height", "100px");
    dom::set_style(&container, "overflow-y", "auto");
    let tile = mount("div", Some(&container));
    tile.set_class_name("draggable-box");
    let filler = mount("div", Some(&container));
    dom::set_style(&filler, "height", "1000px");

    let page = folio_wasm::start_with_config(
        r#"{ "projects": [{ "title": "Only", "hero_image": "missing-cover.png" }] }"#,
    )
    .expect("page starts");
    assert_eq!(
        dom::inline_style(&tile, "background-size").as_deref(),
        Some("contain")
    );

    let init = WheelEventInit::new();
    init.set_delta_y(40.0);
    init.set_cancelable(true);
    let wheel = WheelEvent::new_with_event_init_dict("wheel", &init).expect("wheel event");
    let document = dom::document().expect("document available");
    document.dispatch_event(&wheel).expect("dispatch");
    assert_eq!(container.scroll_top(), 40);

    page.destroy();
    container.remove();
}
