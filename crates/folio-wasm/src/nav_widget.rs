//! Header chrome: navigation link contrast and the clock.

use crate::dom::{self, DomElement};
use folio_core::config::CursorPalette;
use folio_core::error::InitError;
use folio_interact::{ClockFields, format_clock, nav_link_color};
use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use kurbo::Point;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::Element;

const CLOCK_PERIOD_MS: u32 = 30_000;

/// Recolors the top-right links against what lies behind them.
pub struct NavContrast {
    links: Vec<Element>,
    palette: CursorPalette,
    listeners: RefCell<Vec<EventListener>>,
}

impl NavContrast {
    pub fn mount(palette: CursorPalette) -> Result<Rc<Self>, InitError> {
        let links = dom::query_all_required(".right-top-bar a")?;
        let document = dom::document()?;
        let widget = Rc::new(Self {
            links,
            palette,
            listeners: RefCell::new(Vec::new()),
        });

        {
            let mut listeners = widget.listeners.borrow_mut();
            for name in ["mousemove", "scroll"] {
                let weak = Rc::downgrade(&widget);
                listeners.push(EventListener::new(&document, name, move |_| {
                    if let Some(w) = weak.upgrade() {
                        w.update();
                    }
                }));
            }
        }
        widget.update();
        Ok(widget)
    }

    /// Sample behind each link's center with the link pushed below the
    /// page, then restore its stacking.
    pub fn update(&self) {
        for link in &self.links {
            let rect = link.get_bounding_client_rect();
            let center = Point::new(
                rect.left() + rect.width() / 2.0,
                rect.top() + rect.height() / 2.0,
            );
            let z = dom::inline_style(link, "z-index").unwrap_or_default();
            dom::set_style(link, "z-index", "-1");
            let behind = dom::element_at(center).map(DomElement);
            dom::set_style(link, "z-index", &z);

            let color = nav_link_color(behind.as_ref(), &self.palette);
            dom::set_style(link, "color", &color.to_css());
        }
    }

    pub fn destroy(&self) {
        self.listeners.borrow_mut().clear();
    }
}

/// Writes the local date and time into `#clock`.
pub struct Clock {
    timer: RefCell<Option<Interval>>,
}

impl Clock {
    pub fn mount() -> Result<Self, InitError> {
        let element = dom::query("#clock")?;
        let tick = move || {
            if let Some(text) = now_text() {
                element.set_text_content(Some(&text));
            }
        };
        tick();
        Ok(Self {
            timer: RefCell::new(Some(Interval::new(CLOCK_PERIOD_MS, tick))),
        })
    }

    pub fn destroy(&self) {
        self.timer.borrow_mut().take();
    }
}

fn now_text() -> Option<String> {
    let now = js_sys::Date::new_0();
    let fields = ClockFields {
        year: now.get_full_year() as i32,
        month: now.get_month(),
        day: now.get_date(),
        hours: now.get_hours(),
        minutes: now.get_minutes(),
    };
    fields.to_datetime().map(format_clock)
}
