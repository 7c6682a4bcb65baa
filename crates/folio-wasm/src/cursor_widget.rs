//! Canvas-drawn cursor.
//!
//! A transparent full-viewport canvas sits above the page with pointer
//! events disabled. Each animation frame the element under the pointer is
//! probed to pick a display mode and color, then the trail and the cursor
//! glyph are painted. The native cursor is hidden shortly after mount and
//! restored whenever the overlay cannot be kept alive.

use crate::dom::{self, DomElement, js_error};
use crate::render2d;
use folio_core::config::CursorConfig;
use folio_core::error::InitError;
use folio_core::layout::Viewport;
use folio_core::trail::Trail;
use folio_interact::cursor::click_clears_trail;
use folio_interact::{
    CursorMode, Health, HoldTracker, HoverContext, OverlayWatchdog, select_color, select_mode,
};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::timers::callback::{Interval, Timeout};
use kurbo::Point;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, Event, HtmlCanvasElement, MouseEvent};

const OVERLAY_ID: &str = "cursor-canvas";
const FALLBACK_STYLE_ID: &str = "cursor-fallback";
const FALLBACK_CSS: &str = "* { cursor: auto !important; } body { cursor: auto !important; }";

#[derive(Clone)]
struct Overlay {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

struct CursorState {
    pointer: Option<Point>,
    trail: Trail,
    hold: HoldTracker,
    viewport: Viewport,
}

pub struct CursorWidget {
    config: CursorConfig,
    overlay: RefCell<Option<Overlay>>,
    state: RefCell<CursorState>,
    watchdog: RefCell<OverlayWatchdog>,
    listeners: RefCell<Vec<EventListener>>,
    frame: RefCell<Option<AnimationFrame>>,
    hide_timer: RefCell<Option<Timeout>>,
    check_timer: RefCell<Option<Interval>>,
    running: Cell<bool>,
}

impl CursorWidget {
    pub fn mount(config: &CursorConfig) -> Result<Rc<Self>, InitError> {
        if dom::device_caps().is_touch() {
            return Err(InitError::Unsupported("touch device".into()));
        }
        let overlay = match create_overlay() {
            Ok(overlay) => overlay,
            Err(e) => {
                native_fallback(&e);
                return Err(e);
            }
        };

        let viewport = dom::viewport();
        render2d::fit_canvas(&overlay.canvas, &overlay.ctx, viewport, dom::device_pixel_ratio());

        let widget = Rc::new(Self {
            config: config.clone(),
            overlay: RefCell::new(Some(overlay)),
            state: RefCell::new(CursorState {
                pointer: None,
                trail: Trail::new(config.trail_capacity),
                hold: HoldTracker::new(config),
                viewport,
            }),
            watchdog: RefCell::new(OverlayWatchdog::new(config.reinit_attempts)),
            listeners: RefCell::new(Vec::new()),
            frame: RefCell::new(None),
            hide_timer: RefCell::new(None),
            check_timer: RefCell::new(None),
            running: Cell::new(true),
        });

        if let Err(e) = widget.bind_events() {
            widget.destroy();
            return Err(e);
        }

        let weak = Rc::downgrade(&widget);
        *widget.hide_timer.borrow_mut() = Some(Timeout::new(config.hide_native_delay_ms, move || {
            if weak.upgrade().is_some_and(|w| w.overlay.borrow().is_some()) {
                hide_native_cursor();
            }
        }));

        let weak = Rc::downgrade(&widget);
        *widget.check_timer.borrow_mut() =
            Some(Interval::new(config.watchdog_interval_ms, move || {
                if let Some(w) = weak.upgrade() {
                    w.self_check();
                }
            }));

        widget.schedule_frame();
        log::info!("custom cursor mounted");
        Ok(widget)
    }

    fn bind_events(self: &Rc<Self>) -> Result<(), InitError> {
        let document = dom::document()?;
        let window = dom::window()?;
        let mut listeners = self.listeners.borrow_mut();

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&document, "mousemove", move |event| {
            let (Some(w), Some(e)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>()) else {
                return;
            };
            let p = Point::new(e.client_x() as f64, e.client_y() as f64);
            let mut st = w.state.borrow_mut();
            st.pointer = Some(p);
            st.trail.push(p, event.time_stamp());
        }));

        if let Some(root) = document.document_element() {
            let weak = Rc::downgrade(self);
            listeners.push(EventListener::new(&root, "mouseleave", move |_| {
                if let Some(w) = weak.upgrade() {
                    w.state.borrow_mut().trail.clear();
                }
            }));
        }

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&document, "click", move |event| {
            let Some(w) = weak.upgrade() else { return };
            let target = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map(DomElement);
            if target.is_some_and(|t| click_clears_trail(&t)) {
                w.state.borrow_mut().trail.clear();
            }
        }));

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&document, "mousedown", move |event| {
            if let Some(w) = weak.upgrade() {
                w.state.borrow_mut().hold.press(event.time_stamp());
            }
        }));

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&document, "mouseup", move |_| {
            if let Some(w) = weak.upgrade() {
                w.state.borrow_mut().hold.release();
            }
        }));

        listeners.push(EventListener::new_with_options(
            &document,
            "contextmenu",
            EventListenerOptions::enable_prevent_default(),
            |event: &Event| event.prevent_default(),
        ));

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&window, "resize", move |_| {
            if let Some(w) = weak.upgrade() {
                w.resize();
            }
        }));
        Ok(())
    }

    fn resize(&self) {
        let viewport = dom::viewport();
        self.state.borrow_mut().viewport = viewport;
        if let Some(o) = self.overlay.borrow().as_ref() {
            render2d::fit_canvas(&o.canvas, &o.ctx, viewport, dom::device_pixel_ratio());
        }
    }

    fn schedule_frame(self: &Rc<Self>) {
        if !self.running.get() {
            return;
        }
        let weak: Weak<Self> = Rc::downgrade(self);
        let handle = request_animation_frame(move |timestamp| {
            if let Some(w) = weak.upgrade() {
                w.frame.borrow_mut().take();
                w.draw(timestamp);
                w.schedule_frame();
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn draw(&self, now: f64) {
        let Some(Overlay { ctx, .. }) = self.overlay.borrow().clone() else {
            return;
        };
        let mut st = self.state.borrow_mut();
        render2d::clear(&ctx, st.viewport);
        let Some(pointer) = st.pointer else {
            return;
        };

        let element = dom::element_at(pointer).map(DomElement);
        let viewer = dom::query_optional(".image-viewer.active").map(DomElement);
        let mode = select_mode(&HoverContext::new(element.clone(), viewer));
        st.hold.hover(mode == CursorMode::GalleryHold, now);

        if mode.shows_trail() {
            for segment in st.trail.segments() {
                let under = dom::element_at(segment.midpoint()).map(DomElement);
                let color = select_color(under.as_ref(), &self.config);
                render2d::draw_segment(&ctx, segment.from, segment.to, color);
            }
        }

        let color = select_color(element.as_ref(), &self.config);
        let glyph = self.config.glyph_size;
        match mode {
            CursorMode::Arrow(direction) => render2d::draw_chevron(&ctx, pointer, direction, glyph),
            CursorMode::Close => render2d::draw_close(&ctx, pointer, glyph),
            CursorMode::Grab { grabbing } => {
                render2d::draw_grab(&ctx, pointer, grabbing, glyph, color)
            }
            CursorMode::GalleryHold => {
                let hint = st
                    .hold
                    .show_hint(now)
                    .then_some(self.config.hold_hint_text.as_str());
                render2d::draw_hold(
                    &ctx,
                    pointer,
                    self.config.ring_radius * 1.5,
                    st.hold.progress(now),
                    hint,
                    color,
                );
            }
            CursorMode::Hover => render2d::draw_ring(&ctx, pointer, self.config.ring_radius, color),
            CursorMode::Default => render2d::draw_dot(&ctx, pointer, self.config.dot_radius, color),
        }
    }

    fn self_check(self: &Rc<Self>) {
        let attached = self
            .overlay
            .borrow()
            .as_ref()
            .is_some_and(|o| dom::is_attached(&o.canvas));
        let health = self.watchdog.borrow_mut().check(attached);
        match health {
            Health::Healthy => {}
            Health::Reinitialize => match create_overlay() {
                Ok(overlay) => {
                    let viewport = dom::viewport();
                    render2d::fit_canvas(
                        &overlay.canvas,
                        &overlay.ctx,
                        viewport,
                        dom::device_pixel_ratio(),
                    );
                    *self.overlay.borrow_mut() = Some(overlay);
                    self.state.borrow_mut().viewport = viewport;
                }
                Err(e) => {
                    log::warn!("cursor reinitialization failed: {e}");
                    self.watchdog.borrow_mut().give_up();
                    self.fall_back();
                }
            },
            Health::FallBack => {
                if self.running.get() {
                    self.fall_back();
                }
            }
        }
    }

    /// Stop drawing and hand the page back to the native cursor for good.
    fn fall_back(&self) {
        self.teardown();
        install_fallback_style();
    }

    fn teardown(&self) {
        self.running.set(false);
        self.frame.borrow_mut().take();
        self.hide_timer.borrow_mut().take();
        self.listeners.borrow_mut().clear();
        if let Some(o) = self.overlay.borrow_mut().take() {
            o.canvas.remove();
        }
        restore_native_cursor();
    }

    /// Remove the overlay and restore the native cursor.
    pub fn destroy(&self) {
        self.teardown();
        self.check_timer.borrow_mut().take();
    }
}

fn create_overlay() -> Result<Overlay, InitError> {
    let document = dom::document()?;
    if let Some(stale) = document.get_element_by_id(OVERLAY_ID) {
        stale.remove();
    }
    let body = document.body().ok_or(InitError::MissingElement("body"))?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| InitError::Unsupported("canvas element".into()))?;
    canvas.set_id(OVERLAY_ID);
    let style = canvas.style();
    for (property, value) in [
        ("position", "fixed"),
        ("top", "0"),
        ("left", "0"),
        ("z-index", "100001"),
        ("pointer-events", "none"),
    ] {
        style.set_property(property, value).map_err(js_error)?;
    }

    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or_else(|| InitError::Unsupported("no 2D canvas context".into()))?;
    body.append_child(&canvas).map_err(js_error)?;
    Ok(Overlay { canvas, ctx })
}

fn hide_native_cursor() {
    if let Some(body) = dom::document().ok().and_then(|d| d.body()) {
        let _ = body.style().set_property("cursor", "none");
    }
}

pub fn restore_native_cursor() {
    let Ok(document) = dom::document() else { return };
    if let Some(body) = document.body() {
        let _ = body.style().set_property("cursor", "auto");
    }
    if let Some(root) = document.document_element() {
        dom::set_style(&root, "cursor", "auto");
    }
}

/// Give the pointer back after a failed mount. Failures that a retry
/// cannot fix also force it with the fallback stylesheet.
pub fn native_fallback(error: &InitError) {
    restore_native_cursor();
    if !error.is_retryable() {
        install_fallback_style();
    }
}

/// Force the native cursor everywhere with a stylesheet.
pub fn install_fallback_style() {
    let Ok(document) = dom::document() else { return };
    if document.get_element_by_id(FALLBACK_STYLE_ID).is_some() {
        return;
    }
    let (Ok(style), Some(head)) = (document.create_element("style"), document.head()) else {
        return;
    };
    style.set_id(FALLBACK_STYLE_ID);
    style.set_text_content(Some(FALLBACK_CSS));
    let _ = head.append_child(&style);
}
