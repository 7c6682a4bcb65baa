//! Error taxonomy for widget initialization.
//!
//! Nothing here is ever shown to the visitor: every variant degrades to
//! "behave like a plain page" and is reported through `log` only.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InitError {
    /// A required element is not mounted yet. Retried with backoff.
    #[error("missing element `{0}`")]
    MissingElement(&'static str),

    /// The environment cannot run the widget (no 2D context, touch device).
    /// The widget falls back to native behavior permanently.
    #[error("unsupported environment: {0}")]
    Unsupported(String),

    /// An overlay owned by the widget was removed from the document.
    #[error("overlay detached from the document")]
    Detached,

    /// The JSON configuration override could not be read.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Any other failed DOM call.
    #[error("DOM call failed: {0}")]
    Js(String),
}

impl InitError {
    /// Whether waiting and trying again can fix the error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::MissingElement(_))
    }
}

impl From<serde_json::Error> for InitError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_elements_retry() {
        assert!(InitError::MissingElement(".scatter").is_retryable());
        assert!(!InitError::Detached.is_retryable());
        assert!(!InitError::Unsupported("touch".into()).is_retryable());
    }

    #[test]
    fn messages_name_the_selector() {
        let e = InitError::MissingElement(".projects-container");
        assert_eq!(e.to_string(), "missing element `.projects-container`");
    }
}
