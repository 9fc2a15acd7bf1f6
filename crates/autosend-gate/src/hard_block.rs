use autosend_types::Contact;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::GateError;

/// Default sentiment floor. Scores strictly below it block.
pub const DEFAULT_SENTIMENT_FLOOR: f64 = 0.30;

/// Why a contact is off-limits for autonomous sending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HardBlockReason {
    VipManualOverride,
    NegativeSentimentDetected,
}

impl HardBlockReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            HardBlockReason::VipManualOverride => "VIP_MANUAL_OVERRIDE",
            HardBlockReason::NegativeSentimentDetected => "NEGATIVE_SENTIMENT_DETECTED",
        }
    }
}

/// Result of the hard-block pre-check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardBlockResult {
    pub blocked: bool,
    pub reason: Option<HardBlockReason>,
}

impl HardBlockResult {
    pub fn clear() -> Self {
        Self {
            blocked: false,
            reason: None,
        }
    }

    pub fn blocked(reason: HardBlockReason) -> Self {
        Self {
            blocked: true,
            reason: Some(reason),
        }
    }
}

/// Unconditional override consulted ahead of the gates.
///
/// VIP contacts always need a human. Otherwise a strained relationship
/// (sentiment below the floor) does too. A hard block is dispositive no
/// matter what the gates say.
#[derive(Clone, Copy, Debug)]
pub struct HardBlock {
    sentiment_floor: f64,
}

impl HardBlock {
    pub fn new(sentiment_floor: f64) -> Result<Self, GateError> {
        if !sentiment_floor.is_finite() || !(0.0..=1.0).contains(&sentiment_floor) {
            return Err(GateError::InvalidThreshold(sentiment_floor));
        }
        Ok(Self { sentiment_floor })
    }

    pub fn sentiment_floor(&self) -> f64 {
        self.sentiment_floor
    }

    pub fn check(&self, contact: &Contact) -> HardBlockResult {
        if contact.is_vip {
            warn!("Hard block: VIP contact requires manual handling");
            return HardBlockResult::blocked(HardBlockReason::VipManualOverride);
        }

        // NaN never compares below the floor, so reject it explicitly.
        if contact.sentiment_score.is_nan() || contact.sentiment_score < self.sentiment_floor {
            warn!(
                sentiment = contact.sentiment_score,
                floor = self.sentiment_floor,
                "Hard block: negative sentiment detected"
            );
            return HardBlockResult::blocked(HardBlockReason::NegativeSentimentDetected);
        }

        HardBlockResult::clear()
    }
}

impl Default for HardBlock {
    fn default() -> Self {
        Self {
            sentiment_floor: DEFAULT_SENTIMENT_FLOOR,
        }
    }
}

/// Hard-block check with the default sentiment floor.
pub fn check_hard_block(contact: &Contact) -> HardBlockResult {
    HardBlock::default().check(contact)
}
