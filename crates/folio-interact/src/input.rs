//! Input abstraction layer.
//!
//! Normalizes DOM mouse and wheel events into a unified `InputEvent`
//! consumed by the gesture state machines. Coordinates are viewport CSS
//! pixels; timestamps are milliseconds from any monotonic clock.

use kurbo::Point;

/// Primary (usually left) mouse button.
pub const PRIMARY_BUTTON: i16 = 0;

/// A normalized pointer event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Button pressed.
    PointerDown {
        x: f64,
        y: f64,
        button: i16,
        timestamp: f64,
    },

    PointerMove { x: f64, y: f64, timestamp: f64 },

    PointerUp { x: f64, y: f64, timestamp: f64 },

    /// Pointer left the tracked element or the document.
    PointerLeave { timestamp: f64 },

    /// Wheel / trackpad scroll.
    Wheel { dx: f64, dy: f64 },
}

impl InputEvent {
    pub fn down(x: f64, y: f64, timestamp: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            button: PRIMARY_BUTTON,
            timestamp,
        }
    }

    pub fn moved(x: f64, y: f64, timestamp: f64) -> Self {
        Self::PointerMove { x, y, timestamp }
    }

    pub fn up(x: f64, y: f64, timestamp: f64) -> Self {
        Self::PointerUp { x, y, timestamp }
    }

    /// Extract position if this is a positioned pointer event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }

    pub fn timestamp(&self) -> Option<f64> {
        match self {
            Self::PointerDown { timestamp, .. }
            | Self::PointerMove { timestamp, .. }
            | Self::PointerUp { timestamp, .. }
            | Self::PointerLeave { timestamp } => Some(*timestamp),
            Self::Wheel { .. } => None,
        }
    }

    /// Whether this is a press of the primary button.
    pub fn is_primary_press(&self) -> bool {
        matches!(self, Self::PointerDown { button, .. } if *button == PRIMARY_BUTTON)
    }
}

/// What the browser reports about its pointing hardware.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeviceCaps {
    /// `'ontouchstart' in window`.
    pub touch_events: bool,
    /// `navigator.maxTouchPoints`.
    pub max_touch_points: i32,
    /// `matchMedia('(pointer: coarse)').matches`.
    pub coarse_pointer: bool,
}

impl DeviceCaps {
    /// Touch devices keep the native cursor and native scrolling.
    pub fn is_touch(&self) -> bool {
        self.touch_events || self.max_touch_points > 0 || self.coarse_pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_of_pointer_events_only() {
        assert_eq!(
            InputEvent::moved(3.0, 4.0, 0.0).position(),
            Some(Point::new(3.0, 4.0))
        );
        assert_eq!(InputEvent::Wheel { dx: 0.0, dy: 5.0 }.position(), None);
        assert_eq!(InputEvent::PointerLeave { timestamp: 1.0 }.position(), None);
    }

    #[test]
    fn secondary_press_is_not_primary() {
        let right = InputEvent::PointerDown {
            x: 0.0,
            y: 0.0,
            button: 2,
            timestamp: 0.0,
        };
        assert!(!right.is_primary_press());
        assert!(InputEvent::down(0.0, 0.0, 0.0).is_primary_press());
    }

    #[test]
    fn any_touch_signal_means_touch() {
        assert!(!DeviceCaps::default().is_touch());
        let caps = DeviceCaps {
            max_touch_points: 5,
            ..Default::default()
        };
        assert!(caps.is_touch());
    }
}
