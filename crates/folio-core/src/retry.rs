//! Bounded exponential backoff for widget initialization.

use crate::config::RetryConfig;

#[derive(Debug, Clone)]
pub struct Backoff {
    config: RetryConfig,
    attempts: u32,
}

impl Backoff {
    pub fn new(config: RetryConfig) -> Self {
        Self {
            config,
            attempts: 0,
        }
    }

    /// Delay before the next attempt, or `None` once attempts are exhausted.
    pub fn next_delay(&mut self) -> Option<u32> {
        if self.attempts >= self.config.max_attempts {
            return None;
        }
        let delay = self.config.base_delay_ms as f64 * self.config.factor.powi(self.attempts as i32);
        self.attempts += 1;
        Some(delay.min(self.config.max_delay_ms as f64).round() as u32)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn exhausted(&self) -> bool {
        self.attempts >= self.config.max_attempts
    }
}
