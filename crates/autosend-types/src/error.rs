use thiserror::Error;

/// Errors raised while decoding a decision context from the wire.
///
/// A caller receiving one of these must route the draft to a human.
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("malformed decision context: {0}")]
    Malformed(#[from] serde_json::Error),
}
