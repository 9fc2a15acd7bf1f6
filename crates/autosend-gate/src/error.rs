use thiserror::Error;

/// Errors raised while assembling the gate engine.
///
/// Evaluation itself never fails; these only surface at construction time.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("gate pipeline is empty")]
    EmptyPipeline,

    #[error("duplicate gate id in pipeline: {0}")]
    DuplicateGate(String),

    #[error("invalid forbidden-topic pattern {id}: {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid rate limit: {0}")]
    InvalidRateLimit(String),

    #[error("invalid hard-block threshold: {0}")]
    InvalidThreshold(f64),
}
