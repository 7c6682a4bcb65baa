//! Project tiles: stacked column, scatter toggle, dragging, tooltips.
//!
//! Tile geometry lives in a [`TileSet`]; this widget loads cover images,
//! forwards pointer events to a [`TileDrag`], and writes the resulting
//! geometry back to each tile element as inline styles.

use crate::dom::{self, js_error};
use folio_core::config::{SiteConfig, TileConfig};
use folio_core::error::InitError;
use folio_core::layout::{ImageOutcome, TileSet};
use folio_core::model::{LayoutMode, Tile};
use folio_interact::{DragOutcome, TileDrag, place_tooltip};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use kurbo::{Point, Size};
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlImageElement, MouseEvent, WheelEvent};

struct TilesState {
    set: TileSet,
    drag: TileDrag,
    rng: StdRng,
    tooltips: bool,
    hovered: Option<usize>,
}

pub struct TilesWidget {
    config: TileConfig,
    container: Element,
    boxes: Vec<Element>,
    toggle: Option<Element>,
    tooltip: Option<Element>,
    state: RefCell<TilesState>,
    listeners: RefCell<Vec<EventListener>>,
    /// Cover images in flight, kept alive with their load/error listeners.
    loads: RefCell<Vec<(HtmlImageElement, EventListener, EventListener)>>,
    navigate: RefCell<Option<Timeout>>,
}

impl TilesWidget {
    pub fn mount(site: &SiteConfig) -> Result<Rc<Self>, InitError> {
        let container = dom::query(".projects-container")?;
        let boxes = dom::query_all_required(".draggable-box")?;
        let toggle = dom::query_optional(".scatter");
        let tooltip = dom::query_optional("#tooltip");

        let widget = Rc::new(Self {
            config: site.tiles.clone(),
            container,
            state: RefCell::new(TilesState {
                set: TileSet::new(site, boxes.len()),
                drag: TileDrag::new(site.tiles.click_threshold),
                rng: dom::browser_rng(),
                tooltips: false,
                hovered: None,
            }),
            boxes,
            toggle,
            tooltip,
            listeners: RefCell::new(Vec::new()),
            loads: RefCell::new(Vec::new()),
            navigate: RefCell::new(None),
        });

        widget.bind_events()?;
        widget.load_images()?;
        log::info!(
            "tiles mounted: {} visible of {}",
            widget.state.borrow().set.visible_count(),
            widget.boxes.len()
        );
        Ok(widget)
    }

    fn load_images(self: &Rc<Self>) -> Result<(), InitError> {
        let tiles: Vec<Tile> = self.state.borrow().set.tiles().to_vec();
        let mut immediate = Vec::new();

        for tile in &tiles {
            let el = &self.boxes[tile.index];
            if tile.hidden {
                dom::set_style(el, "display", "none");
                continue;
            }
            let Some(src) = tile.image.as_deref() else {
                immediate.push(tile.index);
                continue;
            };
            dom::set_style(el, "background-image", &format!("url(\"{src}\")"));
            dom::set_style(el, "background-size", "contain");
            dom::set_style(el, "background-repeat", "no-repeat");
            dom::set_style(el, "background-position", "center");

            let img = HtmlImageElement::new().map_err(js_error)?;
            let index = tile.index;
            let weak = Rc::downgrade(self);
            let on_load = EventListener::once(&img, "load", move |event| {
                let Some(w) = weak.upgrade() else { return };
                let outcome = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlImageElement>().ok())
                    .map(|img| ImageOutcome::Loaded {
                        width: img.natural_width() as f64,
                        height: img.natural_height() as f64,
                    })
                    .unwrap_or(ImageOutcome::Failed);
                w.resolve(index, outcome);
            });
            let weak = Rc::downgrade(self);
            let on_error = EventListener::once(&img, "error", move |_| {
                if let Some(w) = weak.upgrade() {
                    w.resolve(index, ImageOutcome::Failed);
                }
            });
            img.set_src(src);
            self.loads.borrow_mut().push((img, on_load, on_error));
        }

        for index in immediate {
            self.resolve(index, ImageOutcome::Missing);
        }
        Ok(())
    }

    fn resolve(&self, index: usize, outcome: ImageOutcome) {
        let viewport = dom::viewport();
        let complete = self
            .state
            .borrow_mut()
            .set
            .resolve_image(index, outcome, viewport);
        if complete {
            self.loads.borrow_mut().clear();
            self.apply_all();
        }
    }

    fn bind_events(self: &Rc<Self>) -> Result<(), InitError> {
        let document = dom::document()?;
        let window = dom::window()?;
        let mut listeners = self.listeners.borrow_mut();
        let active = EventListenerOptions::enable_prevent_default();

        for (index, el) in self.boxes.iter().enumerate() {
            let weak = Rc::downgrade(self);
            listeners.push(EventListener::new_with_options(
                el,
                "mousedown",
                active,
                move |event: &Event| {
                    let (Some(w), Some(e)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>()) else {
                        return;
                    };
                    event.prevent_default();
                    event.stop_propagation();
                    w.start_drag(index, pointer_of(e));
                },
            ));

            let weak = Rc::downgrade(self);
            listeners.push(EventListener::new(el, "mouseenter", move |_| {
                if let Some(w) = weak.upgrade() {
                    w.show_tooltip(index);
                }
            }));

            let weak = Rc::downgrade(self);
            listeners.push(EventListener::new(el, "mouseleave", move |_| {
                if let Some(w) = weak.upgrade() {
                    w.hide_tooltip();
                }
            }));
        }

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new_with_options(
            &document,
            "mousemove",
            active,
            move |event: &Event| {
                let (Some(w), Some(e)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>()) else {
                    return;
                };
                if w.drag_to(pointer_of(e)) {
                    event.prevent_default();
                }
                w.move_tooltip(pointer_of(e));
            },
        ));

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&document, "mouseup", move |_| {
            if let Some(w) = weak.upgrade() {
                w.end_drag();
            }
        }));

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new_with_options(
            &document,
            "wheel",
            active,
            move |event: &Event| {
                let (Some(w), Some(e)) = (weak.upgrade(), event.dyn_ref::<WheelEvent>()) else {
                    return;
                };
                if w.state.borrow().drag.is_dragging() {
                    return;
                }
                event.prevent_default();
                let top = w.container.scroll_top() as f64 + e.delta_y();
                w.container.set_scroll_top(top.round() as i32);
            },
        ));

        if let Some(toggle) = &self.toggle {
            let weak = Rc::downgrade(self);
            listeners.push(EventListener::new(toggle, "click", move |_| {
                if let Some(w) = weak.upgrade() {
                    w.toggle_layout();
                }
            }));
        }

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&window, "resize", move |_| {
            if let Some(w) = weak.upgrade() {
                w.state.borrow_mut().set.relayout(dom::viewport());
                w.apply_all();
            }
        }));
        Ok(())
    }

    fn start_drag(&self, index: usize, pointer: Point) {
        let mut st = self.state.borrow_mut();
        let Some(position) = st.set.tile(index).map(|t| t.position) else {
            return;
        };
        let scroll_top = self.container.scroll_top() as f64;
        st.drag.press(index, pointer, position, scroll_top);
        if let Some(z) = st.set.bring_to_front(index) {
            dom::set_style(&self.boxes[index], "z-index", &z.to_string());
        }
        dom::set_style(&self.boxes[index], "cursor", "grabbing");
        dom::set_class(&self.boxes[index], "dragging", true);
    }

    /// Returns whether a tile is being dragged.
    fn drag_to(&self, pointer: Point) -> bool {
        let mut st = self.state.borrow_mut();
        if !st.drag.is_dragging() {
            return false;
        }
        let scroll_top = self.container.scroll_top() as f64;
        if let Some((index, position)) = st.drag.drag(pointer, scroll_top) {
            st.set.move_to(index, position);
            if let Some(tile) = st.set.tile(index) {
                apply_tile(&self.boxes[index], tile);
            }
        }
        true
    }

    fn end_drag(&self) {
        let outcome = self.state.borrow_mut().drag.release();
        let index = match outcome {
            Some(DragOutcome::Click { index }) => {
                self.navigate_to(index);
                index
            }
            Some(DragOutcome::Dropped { index }) => {
                self.update_toggle_label();
                index
            }
            None => return,
        };
        dom::set_style(&self.boxes[index], "cursor", "grab");
        dom::set_class(&self.boxes[index], "dragging", false);
    }

    fn navigate_to(&self, index: usize) {
        let destination = self.config.destination(index);
        log::debug!("tile {index} clicked, navigating to {destination}");
        *self.navigate.borrow_mut() = Some(Timeout::new(self.config.navigate_delay_ms, move || {
            if let Ok(window) = dom::window() {
                let _ = window.location().set_href(&destination);
            }
        }));
    }

    /// Switch between stacked and scattered. Returns the new mode.
    pub fn toggle_layout(&self) -> LayoutMode {
        let viewport = dom::viewport();
        let mode = {
            let mut st = self.state.borrow_mut();
            let st = &mut *st;
            if !st.set.needs_cleanup(viewport) {
                // scatter targets the visible area
                self.container.set_scroll_top(0);
            }
            st.set.toggle(viewport, &mut st.rng)
        };
        self.apply_all();
        log::debug!("tiles now {}", mode.as_str());
        mode
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.state.borrow().set.mode()
    }

    pub fn tiles_json(&self) -> String {
        serde_json::to_string(self.state.borrow().set.tiles()).unwrap_or_else(|_| "[]".into())
    }

    pub fn enable_tooltips(&self) {
        self.state.borrow_mut().tooltips = true;
    }

    fn show_tooltip(&self, index: usize) {
        let mut st = self.state.borrow_mut();
        let (Some(tooltip), true) = (&self.tooltip, st.tooltips) else {
            return;
        };
        if st.drag.is_dragging() {
            return;
        }
        let Some(tile) = st.set.tile(index) else { return };
        tooltip.set_text_content(Some(&tile.title));
        dom::set_class(tooltip, "visible", true);
        st.hovered = Some(index);
    }

    fn hide_tooltip(&self) {
        self.state.borrow_mut().hovered = None;
        if let Some(tooltip) = &self.tooltip {
            dom::set_class(tooltip, "visible", false);
        }
    }

    fn move_tooltip(&self, pointer: Point) {
        let Some(tooltip) = &self.tooltip else { return };
        if self.state.borrow().hovered.is_none() {
            return;
        }
        let rect = tooltip.get_bounding_client_rect();
        let at = place_tooltip(
            pointer,
            Size::new(rect.width(), rect.height()),
            dom::viewport(),
            self.config.tooltip_offset,
        );
        dom::set_style(tooltip, "left", &format!("{}px", at.x));
        dom::set_style(tooltip, "top", &format!("{}px", at.y));
    }

    fn update_toggle_label(&self) {
        let Some(toggle) = &self.toggle else { return };
        let label = self.state.borrow().set.toggle_label(dom::viewport());
        toggle.set_text_content(Some(label));
    }

    fn apply_all(&self) {
        {
            let st = self.state.borrow();
            for tile in st.set.tiles().iter().filter(|t| t.is_ready()) {
                apply_tile(&self.boxes[tile.index], tile);
            }
        }
        self.update_toggle_label();
    }

    pub fn destroy(&self) {
        self.listeners.borrow_mut().clear();
        self.loads.borrow_mut().clear();
        self.navigate.borrow_mut().take();
    }
}

fn pointer_of(e: &MouseEvent) -> Point {
    Point::new(e.client_x() as f64, e.client_y() as f64)
}

/// Write a tile's geometry to its element.
fn apply_tile(el: &Element, tile: &Tile) {
    dom::set_style(el, "left", &format!("{}px", tile.position.x));
    dom::set_style(el, "top", &format!("{}px", tile.position.y));
    dom::set_style(el, "width", &format!("{}px", tile.size.width));
    dom::set_style(el, "height", &format!("{}px", tile.size.height));
    dom::set_style(el, "transform", &tile.css_transform());
    dom::set_style(el, "z-index", &tile.z_index.to_string());
}
