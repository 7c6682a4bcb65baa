//! WASM bridge for Folio — mounts the decoration widgets on the portfolio
//! page and exposes a small control handle to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`; the page calls `start()`
//! (or `start_with_config(json)`) once from its module script.

mod background_widget;
mod cursor_widget;
pub mod dom;
mod logger;
mod nav_widget;
mod page;
mod render2d;
mod scroll_widget;
mod tiles_widget;

use folio_core::config::SiteConfig;
use page::PageController;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

pub use cursor_widget::native_fallback;

/// Handle to the running page widgets.
#[wasm_bindgen]
pub struct FolioPage {
    page: Rc<PageController>,
}

#[wasm_bindgen]
impl FolioPage {
    /// Switch the tiles between stacked and scattered. Returns the new
    /// mode, or `None` if the tiles are not mounted.
    pub fn toggle_layout(&self) -> Option<String> {
        let tiles = self.page.tiles()?;
        Some(tiles.toggle_layout().as_str().to_string())
    }

    /// Show project titles in `#tooltip` while hovering tiles.
    pub fn enable_tooltips(&self) {
        if let Some(tiles) = self.page.tiles() {
            tiles.enable_tooltips();
        }
    }

    pub fn layout_mode(&self) -> Option<String> {
        Some(self.page.tiles()?.layout_mode().as_str().to_string())
    }

    /// Current tile geometry as a JSON array.
    pub fn tiles_json(&self) -> String {
        self.page
            .tiles()
            .map(|t| t.tiles_json())
            .unwrap_or_else(|| "[]".to_string())
    }

    pub fn restore_cursor(&self) {
        self.page.restore_cursor();
    }

    /// Remove every listener, overlay, and animation loop.
    pub fn destroy(&self) {
        self.page.destroy();
    }
}

/// Mount the widgets with the built-in site configuration.
#[wasm_bindgen]
pub fn start() -> Result<FolioPage, JsValue> {
    launch(SiteConfig::default())
}

/// Mount the widgets with `json` overriding parts of the built-in
/// configuration. An unreadable override falls back to the defaults.
#[wasm_bindgen]
pub fn start_with_config(json: &str) -> Result<FolioPage, JsValue> {
    logger::init(log::Level::Info);
    let config = SiteConfig::from_json(json).unwrap_or_else(|e| {
        log::warn!("{e}; using the default configuration");
        SiteConfig::default()
    });
    launch(config)
}

fn launch(config: SiteConfig) -> Result<FolioPage, JsValue> {
    logger::init(log::Level::Info);
    let page = PageController::new(config);
    page.start()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(FolioPage { page })
}
