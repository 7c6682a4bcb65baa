//! Drag-to-scroll for the horizontal photo galleries.
//!
//! Each `.photo-gallery` is one strip: its `.gallery-container` takes the
//! pointer events and the gallery itself is what scrolls. Strips are
//! independent, each with its own gesture, momentum loop, and scrollbar
//! linger timer.

use crate::dom;
use folio_core::config::ScrollConfig;
use folio_core::error::InitError;
use folio_interact::{DragScroll, InputEvent, Momentum, ScrollAction};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent};

const SHOW_SCROLLBARS: &str = "show-scrollbars";

struct Strip {
    /// The scrolling element.
    gallery: Element,
    /// Receives the pointer events.
    container: Element,
    gesture: RefCell<DragScroll>,
    momentum: RefCell<Option<Momentum>>,
    frame: RefCell<Option<AnimationFrame>>,
    linger: RefCell<Option<Timeout>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl Strip {
    fn offset(&self) -> f64 {
        self.gallery.scroll_left() as f64
    }

    fn max_offset(&self) -> f64 {
        (self.gallery.scroll_width() - self.gallery.client_width()).max(0) as f64
    }

    fn scroll_to(&self, offset: f64) {
        self.gallery.set_scroll_left(offset.round() as i32);
    }

    fn bind(self: &Rc<Self>) {
        let mut listeners = self.listeners.borrow_mut();
        let active = EventListenerOptions::enable_prevent_default();

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new_with_options(
            &self.container,
            "mousedown",
            active,
            move |event: &Event| {
                let (Some(s), Some(e)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>()) else {
                    return;
                };
                let input = InputEvent::PointerDown {
                    x: e.page_x() as f64,
                    y: e.page_y() as f64,
                    button: e.button(),
                    timestamp: event.time_stamp(),
                };
                if s.feed(&input) {
                    event.prevent_default();
                }
            },
        ));

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new_with_options(
            &self.container,
            "mousemove",
            active,
            move |event: &Event| {
                let (Some(s), Some(e)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>()) else {
                    return;
                };
                let input =
                    InputEvent::moved(e.page_x() as f64, e.page_y() as f64, event.time_stamp());
                if s.feed(&input) {
                    event.prevent_default();
                }
            },
        ));

        for name in ["mouseup", "mouseleave"] {
            let weak = Rc::downgrade(self);
            listeners.push(EventListener::new(&self.container, name, move |event| {
                if let Some(s) = weak.upgrade() {
                    s.feed(&InputEvent::PointerLeave {
                        timestamp: event.time_stamp(),
                    });
                }
            }));
        }

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new_with_options(
            &self.container,
            "contextmenu",
            active,
            move |event: &Event| {
                if weak
                    .upgrade()
                    .is_some_and(|s| s.gesture.borrow().is_dragging())
                {
                    event.prevent_default();
                }
            },
        ));
    }

    /// Run one event through the gesture. Returns whether the event was
    /// consumed (its default should be prevented).
    fn feed(self: &Rc<Self>, input: &InputEvent) -> bool {
        let action = self
            .gesture
            .borrow_mut()
            .handle(input, self.offset(), self.max_offset());
        match action {
            ScrollAction::Ignored => false,
            ScrollAction::Grabbed => {
                self.stop_momentum();
                self.linger.borrow_mut().take();
                let _ = self.container.set_attribute("data-drag-state", "grabbing");
                dom::set_class(&self.gallery, SHOW_SCROLLBARS, true);
                true
            }
            ScrollAction::Pending => true,
            ScrollAction::ScrollTo(offset) => {
                self.scroll_to(offset);
                true
            }
            ScrollAction::Released { momentum } => {
                let _ = self.container.set_attribute("data-drag-state", "grab");
                self.start_linger();
                if let Some(m) = momentum {
                    *self.momentum.borrow_mut() = Some(m);
                    self.schedule_frame();
                }
                false
            }
        }
    }

    /// Keep the scrollbars up for a while after release.
    fn start_linger(&self) {
        dom::set_class(&self.gallery, SHOW_SCROLLBARS, true);
        let gallery = self.gallery.clone();
        let delay = self.gesture.borrow().config().scrollbar_linger_ms;
        *self.linger.borrow_mut() = Some(Timeout::new(delay, move || {
            dom::set_class(&gallery, SHOW_SCROLLBARS, false);
        }));
    }

    fn schedule_frame(self: &Rc<Self>) {
        let weak: Weak<Self> = Rc::downgrade(self);
        let handle = request_animation_frame(move |_| {
            if let Some(s) = weak.upgrade() {
                s.frame.borrow_mut().take();
                if s.step_momentum() {
                    s.schedule_frame();
                }
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    /// Advance momentum one frame. Returns whether it is still running.
    fn step_momentum(&self) -> bool {
        let (offset, max) = (self.offset(), self.max_offset());
        let mut slot = self.momentum.borrow_mut();
        let Some(momentum) = slot.as_mut() else {
            return false;
        };
        match momentum.step(offset, max) {
            Some(next) => {
                self.scroll_to(next);
                true
            }
            None => {
                *slot = None;
                false
            }
        }
    }

    fn stop_momentum(&self) {
        self.momentum.borrow_mut().take();
        self.frame.borrow_mut().take();
    }

    fn destroy(&self) {
        self.stop_momentum();
        self.linger.borrow_mut().take();
        self.listeners.borrow_mut().clear();
        let _ = self.container.remove_attribute("data-drag-scroll");
        let _ = self.container.remove_attribute("data-drag-state");
        dom::set_class(&self.gallery, SHOW_SCROLLBARS, false);
    }
}

pub struct ScrollWidget {
    strips: Vec<Rc<Strip>>,
}

impl ScrollWidget {
    /// Attach to every gallery on the page. Touch devices keep native
    /// scrolling.
    pub fn mount(config: &ScrollConfig) -> Result<Self, InitError> {
        if dom::device_caps().is_touch() {
            return Err(InitError::Unsupported("touch device".into()));
        }
        let galleries = dom::query_all_required(".photo-gallery")?;

        let strips: Vec<Rc<Strip>> = galleries
            .into_iter()
            .filter_map(|gallery| {
                let container = gallery.query_selector(".gallery-container").ok().flatten()?;
                Some((gallery, container))
            })
            .map(|(gallery, container)| {
                dom::set_style(&container, "user-select", "none");
                let _ = container.set_attribute("data-drag-scroll", "true");
                let _ = container.set_attribute("data-drag-state", "grab");
                let strip = Rc::new(Strip {
                    gallery,
                    container,
                    gesture: RefCell::new(DragScroll::new(config.clone())),
                    momentum: RefCell::new(None),
                    frame: RefCell::new(None),
                    linger: RefCell::new(None),
                    listeners: RefCell::new(Vec::new()),
                });
                strip.bind();
                strip
            })
            .collect();

        log::info!("drag scroll attached to {} galleries", strips.len());
        Ok(Self { strips })
    }

    pub fn is_dragging(&self) -> bool {
        self.strips.iter().any(|s| s.gesture.borrow().is_dragging())
    }

    pub fn destroy(&self) {
        for strip in &self.strips {
            strip.destroy();
        }
    }
}
