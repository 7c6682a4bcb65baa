//! Navigation link contrast against whatever lies behind the links.

use crate::probe::{ElementProbe, closest};
use folio_core::config::CursorPalette;
use folio_core::model::Color;

/// Class marking a project tile.
pub const TILE_CLASS: &str = "draggable-box";

/// Link color for a link whose center sits over `behind`: the fallback
/// color over a project tile, the accent color over the page column.
pub fn nav_link_color<E: ElementProbe>(behind: Option<&E>, palette: &CursorPalette) -> Color {
    let over_tile = behind.is_some_and(|el| closest(el, |e| e.has_class(TILE_CLASS)).is_some());
    if over_tile {
        palette.fallback
    } else {
        palette.accent
    }
}
