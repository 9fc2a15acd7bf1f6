//! # autosend-feedback
//!
//! Measures how much a human changed an AI draft before sending it.
//!
//! The normalized edit distance between draft and final text is classified
//! as negligible, partial or a full rewrite. Full rewrites are flagged for the
//! external tone-learning pipeline; partial edits are kept for analytics.

pub mod delta;
pub mod distance;
pub mod error;

pub use delta::{
    analyze, DeltaAnalyzer, DeltaClassification, DeltaResult, DeltaThresholds, FeedbackAction,
    FeedbackSignal,
};
pub use distance::edit_distance;
pub use error::FeedbackError;
