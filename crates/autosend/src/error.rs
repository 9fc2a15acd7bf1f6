use autosend_feedback::FeedbackError;
use autosend_gate::GateError;
use thiserror::Error;

/// Errors raised while loading configuration or wiring components from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("invalid decision engine settings: {0}")]
    Gate(#[from] GateError),

    #[error("invalid feedback settings: {0}")]
    Feedback(#[from] FeedbackError),

    #[error("failed to install tracing subscriber: {0}")]
    Logging(String),
}
