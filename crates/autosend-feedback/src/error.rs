use thiserror::Error;

/// Errors from feedback configuration.
#[derive(Error, Debug, PartialEq)]
pub enum FeedbackError {
    #[error("delta thresholds must lie in [0, 1]: negligible_below {negligible_below}, full_rewrite_above {full_rewrite_above}")]
    ThresholdOutOfRange {
        negligible_below: f64,
        full_rewrite_above: f64,
    },

    #[error("negligible_below {negligible_below} exceeds full_rewrite_above {full_rewrite_above}")]
    InvertedThresholds {
        negligible_below: f64,
        full_rewrite_above: f64,
    },
}
