//! DOM access for the widgets.
//!
//! Thin helpers over `web_sys` that turn missing globals and elements into
//! [`InitError`]s, plus the [`ElementProbe`] implementation the cursor
//! selection rules run against.

use folio_core::error::InitError;
use folio_core::layout::Viewport;
use folio_interact::{DeviceCaps, ElementProbe};
use kurbo::Point;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, Node, Window};

pub fn js_error(e: JsValue) -> InitError {
    InitError::Js(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

pub fn window() -> Result<Window, InitError> {
    web_sys::window().ok_or_else(|| InitError::Unsupported("no global window".into()))
}

pub fn document() -> Result<Document, InitError> {
    window()?
        .document()
        .ok_or_else(|| InitError::Unsupported("no document".into()))
}

/// First element matching `selector`, or `MissingElement`.
pub fn query(selector: &'static str) -> Result<Element, InitError> {
    document()?
        .query_selector(selector)
        .map_err(js_error)?
        .ok_or(InitError::MissingElement(selector))
}

pub fn query_optional(selector: &str) -> Option<Element> {
    document().ok()?.query_selector(selector).ok().flatten()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(list) = document()
        .ok()
        .and_then(|d| d.query_selector_all(selector).ok())
    else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Like [`query_all`], but an empty result is `MissingElement`.
pub fn query_all_required(selector: &'static str) -> Result<Vec<Element>, InitError> {
    let found = query_all(selector);
    if found.is_empty() {
        return Err(InitError::MissingElement(selector));
    }
    Ok(found)
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(el) = element.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property(property, value);
    }
}

pub fn inline_style(element: &Element, property: &str) -> Option<String> {
    let el = element.dyn_ref::<HtmlElement>()?;
    el.style()
        .get_property_value(property)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let _ = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
}

pub fn viewport() -> Viewport {
    let Ok(win) = window() else {
        return Viewport::default();
    };
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64());
    Viewport {
        width: dim(win.inner_width()).unwrap_or(0.0),
        height: dim(win.inner_height()).unwrap_or(0.0),
    }
}

/// A generator seeded from the JS PRNG.
pub fn browser_rng() -> StdRng {
    StdRng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64)
}

pub fn device_pixel_ratio() -> f64 {
    window()
        .map(|w| w.device_pixel_ratio())
        .ok()
        .filter(|r| *r > 0.0)
        .unwrap_or(1.0)
}

pub fn element_at(point: Point) -> Option<Element> {
    document()
        .ok()?
        .element_from_point(point.x as f32, point.y as f32)
}

pub fn device_caps() -> DeviceCaps {
    let Ok(win) = window() else {
        return DeviceCaps::default();
    };
    DeviceCaps {
        touch_events: js_sys::Reflect::has(&win, &JsValue::from_str("ontouchstart"))
            .unwrap_or(false),
        max_touch_points: win.navigator().max_touch_points(),
        coarse_pointer: win
            .match_media("(pointer: coarse)")
            .ok()
            .flatten()
            .is_some_and(|m| m.matches()),
    }
}

/// Whether the element is still attached to the document.
pub fn is_attached(element: &Element) -> bool {
    element.is_connected()
}

// ─── Probe ───────────────────────────────────────────────────────────────

/// A live DOM element seen through [`ElementProbe`].
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement(pub Element);

impl DomElement {
    fn computed(&self) -> Option<CssStyleDeclaration> {
        window().ok()?.get_computed_style(&self.0).ok().flatten()
    }

    fn computed_property(&self, name: &str) -> Option<String> {
        self.computed()?
            .get_property_value(name)
            .ok()
            .filter(|v| !v.is_empty())
    }
}

impl ElementProbe for DomElement {
    fn tag_name(&self) -> String {
        self.0.tag_name().to_ascii_uppercase()
    }

    fn id(&self) -> Option<String> {
        Some(self.0.id()).filter(|id| !id.is_empty())
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_element().map(DomElement)
    }

    fn contains(&self, other: &Self) -> bool {
        let node: &Node = other.0.as_ref();
        self.0.contains(Some(node))
    }

    fn has_text(&self) -> bool {
        self.0
            .text_content()
            .is_some_and(|t| !t.trim().is_empty())
    }

    fn computed_color(&self) -> Option<String> {
        self.computed_property("color")
    }

    fn computed_background(&self) -> Option<String> {
        self.computed_property("background-color")
    }

    fn computed_cursor(&self) -> Option<String> {
        self.computed_property("cursor")
    }

    fn inline_cursor(&self) -> Option<String> {
        inline_style(&self.0, "cursor")
    }

    fn has_background_image(&self) -> bool {
        inline_style(&self.0, "background-image").is_some_and(|v| v != "none")
    }

    fn has_click_handler(&self) -> bool {
        self.0
            .dyn_ref::<HtmlElement>()
            .is_some_and(|el| el.onclick().is_some())
    }
}
