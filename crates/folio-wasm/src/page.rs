//! Page controller: owns every widget, waits for DOM-ready once, and
//! retries widgets whose elements are not mounted yet.

use crate::background_widget::BackgroundWidget;
use crate::cursor_widget::{self, CursorWidget};
use crate::dom;
use crate::nav_widget::{Clock, NavContrast};
use crate::scroll_widget::ScrollWidget;
use crate::tiles_widget::TilesWidget;
use folio_core::config::SiteConfig;
use folio_core::error::InitError;
use folio_core::retry::Backoff;
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Widgets in mount order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Background,
    Cursor,
    Tiles,
    Scroll,
    Nav,
    Clock,
}

impl WidgetKind {
    pub const ALL: [Self; 6] = [
        Self::Background,
        Self::Cursor,
        Self::Tiles,
        Self::Scroll,
        Self::Nav,
        Self::Clock,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Cursor => "cursor",
            Self::Tiles => "tiles",
            Self::Scroll => "drag scroll",
            Self::Nav => "nav contrast",
            Self::Clock => "clock",
        }
    }
}

#[derive(Default)]
struct Widgets {
    background: Option<Rc<BackgroundWidget>>,
    cursor: Option<Rc<CursorWidget>>,
    tiles: Option<Rc<TilesWidget>>,
    scroll: Option<ScrollWidget>,
    nav: Option<Rc<NavContrast>>,
    clock: Option<Clock>,
}

pub struct PageController {
    config: SiteConfig,
    widgets: RefCell<Widgets>,
    retries: RefCell<HashMap<WidgetKind, Timeout>>,
    ready: RefCell<Option<EventListener>>,
}

impl PageController {
    pub fn new(config: SiteConfig) -> Rc<Self> {
        Rc::new(Self {
            config,
            widgets: RefCell::new(Widgets::default()),
            retries: RefCell::new(HashMap::new()),
            ready: RefCell::new(None),
        })
    }

    /// Mount everything now, or once the document has been parsed.
    pub fn start(self: &Rc<Self>) -> Result<(), InitError> {
        let document = dom::document()?;
        if document.ready_state() == "loading" {
            let weak = Rc::downgrade(self);
            *self.ready.borrow_mut() =
                Some(EventListener::once(&document, "DOMContentLoaded", move |_| {
                    if let Some(page) = weak.upgrade() {
                        page.ready.borrow_mut().take();
                        page.mount_all();
                    }
                }));
        } else {
            self.mount_all();
        }
        Ok(())
    }

    fn mount_all(self: &Rc<Self>) {
        for kind in WidgetKind::ALL {
            self.attempt(kind, Backoff::new(self.config.retry));
        }
    }

    fn attempt(self: &Rc<Self>, kind: WidgetKind, mut backoff: Backoff) {
        self.retries.borrow_mut().remove(&kind);
        let error = match self.mount(kind) {
            Ok(()) => {
                log::debug!("{} ready after {} retries", kind.name(), backoff.attempts());
                return;
            }
            Err(e) => e,
        };

        if error.is_retryable() {
            match backoff.next_delay() {
                Some(delay) => {
                    log::debug!("{}: {error}, retrying in {delay} ms", kind.name());
                    let weak = Rc::downgrade(self);
                    let timer = Timeout::new(delay, move || {
                        if let Some(page) = weak.upgrade() {
                            page.attempt(kind, backoff);
                        }
                    });
                    self.retries.borrow_mut().insert(kind, timer);
                }
                None => log::info!("{}: {error}, giving up", kind.name()),
            }
            return;
        }

        match (&error, kind) {
            (InitError::Unsupported(_), WidgetKind::Cursor) => {
                log::info!("custom cursor disabled: {error}");
                cursor_widget::native_fallback(&error);
            }
            (InitError::Unsupported(_), _) => log::info!("{} disabled: {error}", kind.name()),
            _ => log::warn!("{} failed: {error}", kind.name()),
        }
    }

    fn mount(&self, kind: WidgetKind) -> Result<(), InitError> {
        let mut w = self.widgets.borrow_mut();
        match kind {
            WidgetKind::Background => {
                w.background = Some(BackgroundWidget::mount(&self.config.background)?)
            }
            WidgetKind::Cursor => w.cursor = Some(CursorWidget::mount(&self.config.cursor)?),
            WidgetKind::Tiles => w.tiles = Some(TilesWidget::mount(&self.config)?),
            WidgetKind::Scroll => w.scroll = Some(ScrollWidget::mount(&self.config.scroll)?),
            WidgetKind::Nav => w.nav = Some(NavContrast::mount(self.config.cursor.palette)?),
            WidgetKind::Clock => w.clock = Some(Clock::mount()?),
        }
        Ok(())
    }

    pub fn tiles(&self) -> Option<Rc<TilesWidget>> {
        self.widgets.borrow().tiles.clone()
    }

    /// Drop the custom cursor and hand the page back to the native one.
    pub fn restore_cursor(&self) {
        if let Some(cursor) = self.widgets.borrow_mut().cursor.take() {
            cursor.destroy();
        }
        self.retries.borrow_mut().remove(&WidgetKind::Cursor);
        cursor_widget::restore_native_cursor();
        cursor_widget::install_fallback_style();
    }

    pub fn destroy(&self) {
        self.ready.borrow_mut().take();
        self.retries.borrow_mut().clear();
        let w = std::mem::take(&mut *self.widgets.borrow_mut());
        if let Some(x) = w.background {
            x.destroy();
        }
        if let Some(x) = w.cursor {
            x.destroy();
        }
        if let Some(x) = w.tiles {
            x.destroy();
        }
        if let Some(x) = w.scroll {
            x.destroy();
        }
        if let Some(x) = w.nav {
            x.destroy();
        }
        if let Some(x) = w.clock {
            x.destroy();
        }
        log::info!("page widgets destroyed");
    }
}
