//! Tile title tooltip placement.

use folio_core::layout::Viewport;
use kurbo::{Point, Size};

/// Top-left of a tooltip of `size` for `pointer`: centered under the
/// pointer by `offset`, clamped horizontally to the viewport, and moved
/// above the pointer when it would run off the bottom.
pub fn place_tooltip(pointer: Point, size: Size, viewport: Viewport, offset: f64) -> Point {
    let mut x = pointer.x - size.width / 2.0;
    if x < 0.0 {
        x = 0.0;
    } else if x + size.width > viewport.width {
        x = viewport.width - size.width;
    }

    let mut y = pointer.y + offset;
    if y + size.height > viewport.height {
        y = pointer.y - size.height - offset;
    }
    Point::new(x, y)
}
