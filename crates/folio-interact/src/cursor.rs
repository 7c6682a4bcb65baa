//! Cursor color and display-mode selection.
//!
//! Both are evaluated every frame from the element under the pointer.
//! Nothing here touches the DOM directly; everything goes through
//! [`ElementProbe`].

use crate::probe::{ElementProbe, ancestors, closest};
use folio_core::config::CursorConfig;
use folio_core::css::parse_css_color;
use folio_core::model::Color;

const INTERACTIVE_TAGS: &[&str] = &[
    "A", "BUTTON", "INPUT", "TEXTAREA", "SELECT", "LABEL", "SUMMARY",
];
const INTERACTIVE_ROLES: &[&str] = &[
    "button", "link", "tab", "switch", "checkbox", "radio", "menuitem",
];

// ─── Color ───────────────────────────────────────────────────────────────

/// Pick the cursor color for the element under the pointer.
pub fn select_color<E: ElementProbe>(element: Option<&E>, config: &CursorConfig) -> Color {
    let palette = &config.palette;
    let Some(element) = element else {
        return palette.fallback;
    };

    if element.has_class("draggable-box") && element.has_background_image() {
        return palette.media;
    }
    if element.has_class("work") || element.has_class("scatter") {
        return palette.media;
    }

    for candidate in ancestors(element).take(config.ancestor_depth) {
        let tag = candidate.tag_name();
        if tag == "BODY" || tag == "HTML" || !candidate.has_text() {
            continue;
        }
        let color = candidate.computed_color().as_deref().and_then(parse_css_color);
        if let Some(color) = color.filter(|c| !c.is_transparent()) {
            return color;
        }
    }

    let own = element
        .computed_background()
        .as_deref()
        .and_then(parse_css_color)
        .unwrap_or(Color::TRANSPARENT);
    let background = if own.is_transparent() {
        element
            .parent()
            .and_then(|p| p.computed_background())
            .as_deref()
            .and_then(parse_css_color)
            .unwrap_or(own)
    } else {
        own
    };

    if !background.is_transparent() && background.is_light(config.light_threshold) {
        palette.accent
    } else {
        palette.fallback
    }
}

// ─── Display mode ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    /// Chevron over the enlarged viewer image.
    Arrow(Direction),
    /// X inside the viewer, off the image.
    Close,
    /// Double arrow + hand over a drag-scroll strip.
    Grab { grabbing: bool },
    /// Ring with press progress over a gallery photo.
    GalleryHold,
    /// Ring over anything clickable.
    Hover,
    /// Filled dot.
    Default,
}

impl CursorMode {
    /// Arrow and close glyphs draw without the trail.
    pub fn shows_trail(self) -> bool {
        !matches!(self, Self::Arrow(_) | Self::Close)
    }
}

/// What the pointer is over this frame.
#[derive(Debug, Clone)]
pub struct HoverContext<E> {
    /// Element under the pointer.
    pub element: Option<E>,
    /// The open image viewer (`.image-viewer.active`), if any.
    pub viewer: Option<E>,
}

impl<E> HoverContext<E> {
    pub fn new(element: Option<E>, viewer: Option<E>) -> Self {
        Self { element, viewer }
    }
}

/// Pick the display mode. First match wins.
pub fn select_mode<E: ElementProbe>(ctx: &HoverContext<E>) -> CursorMode {
    let Some(element) = ctx.element.as_ref() else {
        return CursorMode::Default;
    };

    let in_viewer = ctx.viewer.as_ref().filter(|v| v.contains(element));
    if let Some(viewer) = in_viewer {
        let over_image = element.id().as_deref() == Some("viewerImage");
        if !over_image {
            return CursorMode::Close;
        }
        if viewer.has_class("cursor-left") {
            return CursorMode::Arrow(Direction::Left);
        }
        if viewer.has_class("cursor-right") {
            return CursorMode::Arrow(Direction::Right);
        }
    }

    if let Some(strip) = closest(element, |e| {
        e.attribute("data-drag-scroll").as_deref() == Some("true")
    }) {
        let grabbing = strip.attribute("data-drag-state").as_deref() == Some("grabbing");
        return CursorMode::Grab { grabbing };
    }

    if element.has_class("gallery-photo") {
        return CursorMode::GalleryHold;
    }

    if is_hoverable(element) {
        return CursorMode::Hover;
    }
    CursorMode::Default
}

/// Interactive tag, interactive role, click handler, or pointer cursor.
pub fn is_hoverable<E: ElementProbe>(element: &E) -> bool {
    INTERACTIVE_TAGS.contains(&element.tag_name().as_str())
        || element
            .attribute("role")
            .is_some_and(|r| INTERACTIVE_ROLES.contains(&r.as_str()))
        || element.has_click_handler()
        || element.computed_cursor().as_deref() == Some("pointer")
}

/// Whether a click on `target` should wipe the trail.
pub fn click_clears_trail<E: ElementProbe>(target: &E) -> bool {
    let tag = target.tag_name();
    tag != "A"
        && tag != "BUTTON"
        && !target.has_click_handler()
        && target.inline_cursor().as_deref() != Some("pointer")
}

// ─── Gallery hold ────────────────────────────────────────────────────────

/// Timing for the press-and-hold affordance on gallery photos.
#[derive(Debug, Clone)]
pub struct HoldTracker {
    press_delay: f64,
    fill: f64,
    hint_delay: f64,
    hover_start: Option<f64>,
    press_start: Option<f64>,
}

impl HoldTracker {
    pub fn new(config: &CursorConfig) -> Self {
        Self {
            press_delay: config.hold_press_delay_ms,
            fill: config.hold_fill_ms.max(1.0),
            hint_delay: config.hold_hint_delay_ms,
            hover_start: None,
            press_start: None,
        }
    }

    /// Report whether the pointer is over a photo this frame.
    pub fn hover(&mut self, over_photo: bool, now: f64) {
        match (over_photo, self.hover_start) {
            (true, None) => self.hover_start = Some(now),
            (false, Some(_)) => {
                self.hover_start = None;
                self.press_start = None;
            }
            _ => {}
        }
    }

    pub fn press(&mut self, now: f64) {
        if self.hover_start.is_some() {
            self.press_start = Some(now);
        }
    }

    pub fn release(&mut self) {
        self.press_start = None;
    }

    /// Arc fill in `[0, 1]`, or `None` until the press delay has passed.
    pub fn progress(&self, now: f64) -> Option<f64> {
        let held = now - self.press_start?;
        (held >= self.press_delay).then(|| ((held - self.press_delay) / self.fill).min(1.0))
    }

    pub fn is_complete(&self, now: f64) -> bool {
        self.progress(now).is_some_and(|p| p >= 1.0)
    }

    /// Whether the text hint is due.
    pub fn show_hint(&self, now: f64) -> bool {
        self.hover_start
            .is_some_and(|start| now - start >= self.hint_delay)
    }
}
