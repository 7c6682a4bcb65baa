//! Console logging and panic reporting.

use log::Level;

/// Route `log` records and panics to the browser console. Later calls are
/// no-ops.
pub fn init(level: Level) {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    // Err only when a logger is already installed.
    console_log::init_with_level(level).ok();
}
