//! Periodic overlay self-check.
//!
//! Page scripts or extensions can remove the cursor canvas from the
//! document. The watchdog allows a bounded number of reinitializations,
//! then settles on the native cursor for the rest of the session.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Healthy,
    /// Overlay lost; rebuild it.
    Reinitialize,
    /// Out of retries; restore the native cursor and stop checking.
    FallBack,
}

#[derive(Debug, Clone)]
pub struct OverlayWatchdog {
    reinits_left: u32,
    fallen_back: bool,
}

impl OverlayWatchdog {
    pub fn new(reinit_attempts: u32) -> Self {
        Self {
            reinits_left: reinit_attempts,
            fallen_back: false,
        }
    }

    /// Evaluate one tick given whether the overlay is still in the document.
    pub fn check(&mut self, attached: bool) -> Health {
        if self.fallen_back {
            return Health::FallBack;
        }
        if attached {
            return Health::Healthy;
        }
        if self.reinits_left > 0 {
            self.reinits_left -= 1;
            log::warn!("cursor overlay detached, reinitializing");
            Health::Reinitialize
        } else {
            self.fallen_back = true;
            log::warn!("cursor overlay detached again, restoring native cursor");
            Health::FallBack
        }
    }

    /// Force the terminal state (e.g. reinitialization itself failed).
    pub fn give_up(&mut self) {
        self.fallen_back = true;
    }

    pub fn is_fallen_back(&self) -> bool {
        self.fallen_back
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_reinit_then_fallback() {
        let mut dog = OverlayWatchdog::new(1);
        assert_eq!(dog.check(true), Health::Healthy);
        assert_eq!(dog.check(false), Health::Reinitialize);
        assert_eq!(dog.check(true), Health::Healthy);
        assert_eq!(dog.check(false), Health::FallBack);
        assert_eq!(dog.check(true), Health::FallBack);
        assert!(dog.is_fallen_back());
    }

    #[test]
    fn zero_attempts_fall_back_immediately() {
        let mut dog = OverlayWatchdog::new(0);
        assert_eq!(dog.check(false), Health::FallBack);
    }
}
