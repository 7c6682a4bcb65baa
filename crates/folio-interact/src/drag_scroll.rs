//! Drag-to-scroll with momentum for horizontal gallery strips.

use crate::input::InputEvent;
use folio_core::config::ScrollConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Gesture {
    start_x: f64,
    /// Scroll offset at press.
    origin: f64,
    last_x: f64,
    last_time: f64,
    /// Pointer velocity of the last move, px/ms.
    velocity: f64,
}

/// What the widget should do in response to an event.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollAction {
    Ignored,
    /// Press accepted: show `grabbing` and the scrollbars.
    Grabbed,
    /// Still inside the drag threshold.
    Pending,
    ScrollTo(f64),
    /// Gesture over. Momentum is present when the release was fast enough.
    Released { momentum: Option<Momentum> },
}

#[derive(Debug, Clone)]
pub struct DragScroll {
    config: ScrollConfig,
    gesture: Option<Gesture>,
}

impl DragScroll {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            gesture: None,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Feed one event. `offset` is the strip's current scroll offset and
    /// `max_offset` its scroll range (`scrollWidth - clientWidth`).
    pub fn handle(&mut self, event: &InputEvent, offset: f64, max_offset: f64) -> ScrollAction {
        match *event {
            InputEvent::PointerDown { x, timestamp, .. } => {
                if !event.is_primary_press() {
                    return ScrollAction::Ignored;
                }
                self.gesture = Some(Gesture {
                    start_x: x,
                    origin: offset,
                    last_x: x,
                    last_time: timestamp,
                    velocity: 0.0,
                });
                ScrollAction::Grabbed
            }
            InputEvent::PointerMove { x, timestamp, .. } => {
                let Some(g) = self.gesture.as_mut() else {
                    return ScrollAction::Ignored;
                };
                let dt = timestamp - g.last_time;
                if dt > 0.0 {
                    g.velocity = (x - g.last_x) / dt;
                }
                g.last_x = x;
                g.last_time = timestamp;

                let travel = x - g.start_x;
                if travel.abs() < self.config.drag_threshold {
                    return ScrollAction::Pending;
                }
                let target = g.origin - travel * self.config.sensitivity;
                ScrollAction::ScrollTo(target.clamp(0.0, max_offset.max(0.0)))
            }
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave { .. } => {
                let Some(g) = self.gesture.take() else {
                    return ScrollAction::Ignored;
                };
                ScrollAction::Released {
                    momentum: Momentum::start(g.velocity, &self.config),
                }
            }
            InputEvent::Wheel { .. } => ScrollAction::Ignored,
        }
    }
}

/// Post-release inertia: exponential decay, stopping dead at the bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Momentum {
    velocity: f64,
    friction: f64,
    stop_velocity: f64,
    frame_ms: f64,
}

impl Momentum {
    /// Momentum for a release at `velocity` (px/ms), if fast enough.
    pub fn start(velocity: f64, config: &ScrollConfig) -> Option<Self> {
        (velocity.abs() > config.min_velocity).then_some(Self {
            velocity,
            friction: config.friction,
            stop_velocity: config.stop_velocity,
            frame_ms: config.frame_ms,
        })
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Advance one frame from `offset`. Returns the new offset, or `None`
    /// once the velocity has decayed (the animation should stop).
    pub fn step(&mut self, offset: f64, max_offset: f64) -> Option<f64> {
        if self.velocity.abs() < self.stop_velocity {
            self.velocity = 0.0;
            return None;
        }
        let max_offset = max_offset.max(0.0);
        let mut next = offset - self.velocity * self.frame_ms;
        if next < 0.0 {
            next = 0.0;
            self.velocity = 0.0;
        } else if next > max_offset {
            next = max_offset;
            self.velocity = 0.0;
        }
        self.velocity *= self.friction;
        Some(next)
    }

    /// Upper bound on the frames an unobstructed momentum from `v0` runs:
    /// `⌈log(stop / |v0|) / log(friction)⌉`.
    pub fn frame_bound(v0: f64, config: &ScrollConfig) -> usize {
        let v0 = v0.abs();
        if v0 < config.stop_velocity || config.friction <= 0.0 {
            return 0;
        }
        ((config.stop_velocity / v0).ln() / config.friction.ln()).ceil() as usize
    }
}
