use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::distance::edit_distance;
use crate::error::FeedbackError;

pub const DEFAULT_NEGLIGIBLE_BELOW: f64 = 0.05;
pub const DEFAULT_FULL_REWRITE_ABOVE: f64 = 0.80;

/// Ratio cut-offs for classifying a human edit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeltaThresholds {
    /// Ratios strictly below this are negligible.
    pub negligible_below: f64,
    /// Ratios strictly above this are full rewrites.
    pub full_rewrite_above: f64,
}

impl DeltaThresholds {
    pub fn new(negligible_below: f64, full_rewrite_above: f64) -> Result<Self, FeedbackError> {
        let in_range = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !in_range(negligible_below) || !in_range(full_rewrite_above) {
            return Err(FeedbackError::ThresholdOutOfRange {
                negligible_below,
                full_rewrite_above,
            });
        }
        if negligible_below > full_rewrite_above {
            return Err(FeedbackError::InvertedThresholds {
                negligible_below,
                full_rewrite_above,
            });
        }
        Ok(Self {
            negligible_below,
            full_rewrite_above,
        })
    }

    pub fn validate(&self) -> Result<(), FeedbackError> {
        Self::new(self.negligible_below, self.full_rewrite_above).map(|_| ())
    }
}

impl Default for DeltaThresholds {
    fn default() -> Self {
        Self {
            negligible_below: DEFAULT_NEGLIGIBLE_BELOW,
            full_rewrite_above: DEFAULT_FULL_REWRITE_ABOVE,
        }
    }
}

/// Magnitude of the human correction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaClassification {
    Negligible,
    Partial,
    FullRewrite,
}

/// What the learning pipeline should do with a delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackAction {
    None,
    /// Keep for analytics only.
    RecordAnalytics,
    /// Feed the final text back as an exemplar and refresh the tone profile.
    UpdateToneProfile,
}

impl DeltaClassification {
    pub fn action(&self) -> FeedbackAction {
        match self {
            DeltaClassification::Negligible => FeedbackAction::None,
            DeltaClassification::Partial => FeedbackAction::RecordAnalytics,
            DeltaClassification::FullRewrite => FeedbackAction::UpdateToneProfile,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeltaResult {
    pub distance: usize,
    /// Length of the longer text, in characters.
    pub longer_len: usize,
    /// `distance / longer_len`, or 0 when both texts are empty.
    pub ratio: f64,
    pub classification: DeltaClassification,
}

/// Delta plus routing, as handed to the learning pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSignal {
    pub user_id: String,
    pub delta: DeltaResult,
    pub action: FeedbackAction,
    pub observed_at: DateTime<Utc>,
}

/// Measures how far a human moved an AI draft before sending it.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeltaAnalyzer {
    thresholds: DeltaThresholds,
}

impl DeltaAnalyzer {
    /// Fails on thresholds outside [0, 1] or with the negligible cut-off above
    /// the rewrite cut-off.
    pub fn new(thresholds: DeltaThresholds) -> Result<Self, FeedbackError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &DeltaThresholds {
        &self.thresholds
    }

    pub fn classify(&self, ratio: f64) -> DeltaClassification {
        if ratio < self.thresholds.negligible_below {
            DeltaClassification::Negligible
        } else if ratio > self.thresholds.full_rewrite_above {
            DeltaClassification::FullRewrite
        } else {
            DeltaClassification::Partial
        }
    }

    pub fn analyze(&self, ai_draft: &str, human_final: &str) -> DeltaResult {
        let distance = edit_distance(ai_draft, human_final);
        let longer_len = ai_draft.chars().count().max(human_final.chars().count());
        let ratio = if longer_len == 0 {
            0.0
        } else {
            distance as f64 / longer_len as f64
        };
        let classification = self.classify(ratio);

        debug!(distance, longer_len, ratio, ?classification, "Draft delta computed");

        DeltaResult {
            distance,
            longer_len,
            ratio,
            classification,
        }
    }

    /// Analyze and package the result for the learning pipeline.
    pub fn signal(&self, user_id: &str, ai_draft: &str, human_final: &str) -> FeedbackSignal {
        let delta = self.analyze(ai_draft, human_final);
        let action = delta.classification.action();
        if action == FeedbackAction::UpdateToneProfile {
            info!(
                user = user_id,
                ratio = delta.ratio,
                "Full rewrite detected; flagging for tone-profile update"
            );
        }

        FeedbackSignal {
            user_id: user_id.to_string(),
            delta,
            action,
            observed_at: Utc::now(),
        }
    }
}

/// Analyze with the default thresholds.
pub fn analyze(ai_draft: &str, human_final: &str) -> DeltaResult {
    DeltaAnalyzer::default().analyze(ai_draft, human_final)
}
