use serde::{Deserialize, Serialize};

/// Profile of the third party the draft is addressed to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Messages previously exchanged with this contact.
    pub message_count: u32,
    pub is_new: bool,
    pub is_vip: bool,
    /// Relationship sentiment in [0, 1]; low values mean a strained thread.
    pub sentiment_score: f64,
}

impl Contact {
    /// A contact we have corresponded with before, with neutral sentiment.
    pub fn established(message_count: u32) -> Self {
        Self {
            message_count,
            is_new: false,
            is_vip: false,
            sentiment_score: 0.5,
        }
    }

    /// Whether there is any prior history with this contact.
    pub fn has_history(&self) -> bool {
        self.message_count > 0 && !self.is_new
    }
}
