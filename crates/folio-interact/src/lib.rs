//! Interaction state machines for the portfolio decoration layer.
//!
//! Everything here is plain Rust: the WASM crate feeds DOM events in as
//! [`InputEvent`]s and exposes elements through [`ElementProbe`].

pub mod clock;
pub mod contrast;
pub mod cursor;
pub mod drag_scroll;
pub mod input;
pub mod probe;
pub mod tile_drag;
pub mod tooltip;
pub mod watchdog;

pub use clock::{ClockFields, format_clock};
pub use contrast::nav_link_color;
pub use cursor::{CursorMode, Direction, HoldTracker, HoverContext, select_color, select_mode};
pub use drag_scroll::{DragScroll, Momentum, ScrollAction};
pub use input::{DeviceCaps, InputEvent};
pub use probe::ElementProbe;
pub use tile_drag::{DragOutcome, TileDrag};
pub use tooltip::place_tooltip;
pub use watchdog::{Health, OverlayWatchdog};
