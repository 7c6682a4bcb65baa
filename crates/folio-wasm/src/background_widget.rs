//! Animated blob background on `#background-canvas`.

use crate::dom::{self, js_error};
use crate::render2d;
use folio_core::config::BackgroundConfig;
use folio_core::error::InitError;
use folio_core::layout::Viewport;
use folio_core::noise::{BlobField, apply_grain, outline_path};
use gloo::events::EventListener;
use gloo::render::{AnimationFrame, request_animation_frame};
use kurbo::Point;
use rand::rngs::StdRng;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, ImageData, MouseEvent};

struct Scene {
    field: BlobField,
    pointer: Option<Point>,
    viewport: Viewport,
    rng: StdRng,
}

pub struct BackgroundWidget {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    scene: RefCell<Scene>,
    listeners: RefCell<Vec<EventListener>>,
    frame: RefCell<Option<AnimationFrame>>,
    running: Cell<bool>,
}

impl BackgroundWidget {
    pub fn mount(config: &BackgroundConfig) -> Result<Rc<Self>, InitError> {
        let canvas: HtmlCanvasElement = dom::query("#background-canvas")?
            .dyn_into()
            .map_err(|_| InitError::Unsupported("#background-canvas is not a canvas".into()))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| InitError::Unsupported("no 2D context".into()))?
            .dyn_into()
            .map_err(|_| InitError::Unsupported("no 2D context".into()))?;

        let mut rng = dom::browser_rng();
        let field = BlobField::new(config.clone(), &mut rng);
        let widget = Rc::new(Self {
            canvas,
            ctx,
            scene: RefCell::new(Scene {
                field,
                pointer: None,
                viewport: Viewport::default(),
                rng,
            }),
            listeners: RefCell::new(Vec::new()),
            frame: RefCell::new(None),
            running: Cell::new(true),
        });
        widget.resize();
        widget.bind_events()?;
        widget.schedule_frame();
        log::info!("background mounted with {} blobs", config.blobs.len());
        Ok(widget)
    }

    fn bind_events(self: &Rc<Self>) -> Result<(), InitError> {
        let document = dom::document()?;
        let window = dom::window()?;
        let mut listeners = self.listeners.borrow_mut();

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&document, "mousemove", move |event: &Event| {
            let (Some(w), Some(e)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>()) else {
                return;
            };
            w.scene.borrow_mut().pointer =
                Some(Point::new(e.client_x() as f64, e.client_y() as f64));
        }));

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&window, "resize", move |_| {
            if let Some(w) = weak.upgrade() {
                w.resize();
            }
        }));
        Ok(())
    }

    /// The backing store matches the viewport one to one; grain is per
    /// backing pixel.
    fn resize(&self) {
        let viewport = dom::viewport();
        self.canvas.set_width(viewport.width.max(0.0) as u32);
        self.canvas.set_height(viewport.height.max(0.0) as u32);
        self.scene.borrow_mut().viewport = viewport;
    }

    fn schedule_frame(self: &Rc<Self>) {
        if !self.running.get() {
            return;
        }
        let weak: Weak<Self> = Rc::downgrade(self);
        let handle = request_animation_frame(move |_| {
            if let Some(w) = weak.upgrade() {
                w.frame.borrow_mut().take();
                w.draw();
                w.schedule_frame();
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn draw(&self) {
        let mut scene = self.scene.borrow_mut();
        scene.field.tick();
        let viewport = scene.viewport;
        let config = scene.field.config();

        render2d::fill_background(&self.ctx, viewport, config.clear_color);
        for (blob, (center, outline)) in scene
            .field
            .blobs
            .iter()
            .zip(scene.field.frame(viewport, scene.pointer))
        {
            render2d::fill_blob(
                &self.ctx,
                &outline_path(&outline),
                center,
                blob.radius,
                blob.color,
                blob.edge_color(config),
                blob.opacity,
            );
        }

        let amplitude = config.grain_amplitude;
        self.add_grain(amplitude, &mut scene.rng);
    }

    fn add_grain(&self, amplitude: f64, rng: &mut StdRng) {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        if w == 0 || h == 0 {
            return;
        }
        let Ok(image) = self.ctx.get_image_data(0.0, 0.0, w as f64, h as f64) else {
            return;
        };
        let mut data = image.data().0;
        apply_grain(&mut data, amplitude, rng);
        if let Ok(grained) = ImageData::new_with_u8_clamped_array_and_sh(Clamped(data.as_slice()), w, h) {
            let _ = self.ctx.put_image_data(&grained, 0.0, 0.0);
        }
    }

    pub fn destroy(&self) {
        self.running.set(false);
        self.frame.borrow_mut().take();
        self.listeners.borrow_mut().clear();
    }
}
