//! Read-only view of a DOM element.
//!
//! The cursor logic only ever asks a handful of questions about the
//! element under the pointer and its ancestors. `ElementProbe` captures
//! exactly those, so the selection rules run against the browser DOM in
//! the WASM crate and against an in-memory tree in tests.

pub trait ElementProbe: Clone {
    /// Upper-case tag name (`"DIV"`, `"A"`).
    fn tag_name(&self) -> String;

    fn id(&self) -> Option<String>;

    fn has_class(&self, class: &str) -> bool;

    fn attribute(&self, name: &str) -> Option<String>;

    fn parent(&self) -> Option<Self>;

    /// Whether `other` is this element or one of its descendants.
    fn contains(&self, other: &Self) -> bool;

    /// Whether the element's text content has any non-whitespace.
    fn has_text(&self) -> bool;

    /// Computed `color`.
    fn computed_color(&self) -> Option<String>;

    /// Computed `background-color`.
    fn computed_background(&self) -> Option<String>;

    /// Computed `cursor`.
    fn computed_cursor(&self) -> Option<String>;

    /// Inline `style.cursor`.
    fn inline_cursor(&self) -> Option<String>;

    /// Whether an inline `background-image` other than `none` is set.
    fn has_background_image(&self) -> bool;

    /// Whether an `onclick` handler property is set.
    fn has_click_handler(&self) -> bool;
}

/// The element and its ancestors, innermost first.
pub fn ancestors<E: ElementProbe>(element: &E) -> impl Iterator<Item = E> {
    std::iter::successors(Some(element.clone()), |e| e.parent())
}

/// Nearest element (self included) matching `pred`.
pub fn closest<E: ElementProbe>(element: &E, pred: impl Fn(&E) -> bool) -> Option<E> {
    ancestors(element).find(|e| pred(e))
}
