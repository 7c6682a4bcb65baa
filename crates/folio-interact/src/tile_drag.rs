//! Click-versus-drag gesture on a single tile.
//!
//! A press grabs a tile. Until the pointer travels more than the click
//! threshold on either axis nothing moves; a release in that window is a
//! click. Past the threshold the tile follows the pointer, keeping the
//! offset at which it was grabbed and compensating for the container's
//! vertical scroll.

use kurbo::{Point, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Grab {
    index: usize,
    press: Point,
    /// Pointer minus the tile anchor, in viewport coordinates.
    offset: Vec2,
    moved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Released within the threshold: navigate.
    Click { index: usize },
    /// Released after moving: the tile stays where it was dropped.
    Dropped { index: usize },
}

#[derive(Debug, Clone)]
pub struct TileDrag {
    threshold: f64,
    grab: Option<Grab>,
}

impl TileDrag {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            grab: None,
        }
    }

    /// Grab tile `index` whose anchor (center x, top) is `tile_position`
    /// in container coordinates, with the container scrolled by `scroll_top`.
    pub fn press(&mut self, index: usize, pointer: Point, tile_position: Point, scroll_top: f64) {
        let anchor = Point::new(tile_position.x, tile_position.y - scroll_top);
        self.grab = Some(Grab {
            index,
            press: pointer,
            offset: pointer - anchor,
            moved: false,
        });
    }

    /// New tile position for a pointer move, once past the threshold.
    pub fn drag(&mut self, pointer: Point, scroll_top: f64) -> Option<(usize, Point)> {
        let grab = self.grab.as_mut()?;
        if !grab.moved {
            let delta = pointer - grab.press;
            if delta.x.abs() <= self.threshold && delta.y.abs() <= self.threshold {
                return None;
            }
            grab.moved = true;
        }
        let anchor = pointer - grab.offset;
        Some((grab.index, Point::new(anchor.x, anchor.y + scroll_top)))
    }

    pub fn release(&mut self) -> Option<DragOutcome> {
        let grab = self.grab.take()?;
        Some(if grab.moved {
            DragOutcome::Dropped { index: grab.index }
        } else {
            DragOutcome::Click { index: grab.index }
        })
    }

    /// Index of the grabbed tile.
    pub fn active(&self) -> Option<usize> {
        self.grab.map(|g| g.index)
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_without_press_is_nothing() {
        let mut drag = TileDrag::new(5.0);
        assert_eq!(drag.release(), None);
        assert_eq!(drag.drag(Point::new(1.0, 1.0), 0.0), None);
    }

    #[test]
    fn movement_is_sticky_once_past_threshold() {
        let mut drag = TileDrag::new(5.0);
        drag.press(2, Point::new(100.0, 100.0), Point::new(120.0, 80.0), 0.0);
        assert!(drag.drag(Point::new(120.0, 100.0), 0.0).is_some());
        // back near the press point: still a drag
        assert!(drag.drag(Point::new(101.0, 100.0), 0.0).is_some());
        assert_eq!(drag.release(), Some(DragOutcome::Dropped { index: 2 }));
        assert!(!drag.is_dragging());
    }
}
