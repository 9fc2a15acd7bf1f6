use serde::{Deserialize, Serialize};

/// Intent class assigned by the supervisor classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    Acknowledgement,
    Confirmation,
    Information,
    Complex,
}

impl MessageType {
    /// Simple enough to dispatch without review.
    pub fn is_simple(&self) -> bool {
        matches!(self, MessageType::Acknowledgement | MessageType::Confirmation)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Acknowledgement => "ACKNOWLEDGEMENT",
            MessageType::Confirmation => "CONFIRMATION",
            MessageType::Information => "INFORMATION",
            MessageType::Complex => "COMPLEX",
        }
    }
}

/// Tri-state answer to "is the scheduling in this thread unambiguous?".
///
/// `Unknown` means the supervisor did not form an opinion, which is distinct
/// from an explicit "ambiguous".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingClarity {
    Unambiguous,
    Ambiguous,
    #[default]
    Unknown,
}

impl From<Option<bool>> for SchedulingClarity {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => SchedulingClarity::Unambiguous,
            Some(false) => SchedulingClarity::Ambiguous,
            None => SchedulingClarity::Unknown,
        }
    }
}

/// Structured safety and intent verdict produced by the upstream supervisor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupervisorVerdict {
    pub confidence_score: f64,
    pub safe_to_send: bool,
    pub message_type: MessageType,
    pub has_forbidden_topics: bool,
    pub forbidden_topics_found: Vec<String>,
    pub scheduling: SchedulingClarity,
    pub contains_new_commitments: bool,
    pub sender_requested_attachment: bool,
    pub reasoning: String,
}

impl SupervisorVerdict {
    /// The most permissive verdict: confident, safe, simple acknowledgement.
    pub fn clean(confidence_score: f64) -> Self {
        Self {
            confidence_score,
            safe_to_send: true,
            message_type: MessageType::Acknowledgement,
            has_forbidden_topics: false,
            forbidden_topics_found: Vec::new(),
            scheduling: SchedulingClarity::Unknown,
            contains_new_commitments: false,
            sender_requested_attachment: false,
            reasoning: String::new(),
        }
    }
}
