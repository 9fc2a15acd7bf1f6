//! Wire-shaped inputs with fail-closed resolution.
//!
//! Every field is optional. A field that is absent, null, non-finite or out of
//! range resolves to the value that keeps the draft away from autonomous
//! dispatch. The one exception is `isSchedulingUnambiguous`, whose absence is
//! its defined "unknown" state.

use serde::{Deserialize, Serialize};

use crate::contact::Contact;
use crate::context::DecisionContext;
use crate::error::ContextError;
use crate::settings::{ChannelSettings, UserSettings, WorkingHours};
use crate::verdict::{MessageType, SupervisorVerdict};

/// Threshold used when the configured one is missing or malformed. No finite
/// confidence reaches it.
pub const UNREACHABLE_THRESHOLD: f64 = f64::INFINITY;

/// Hour recorded when the caller supplied none or an invalid one. Lies outside
/// every working-hours window.
pub const UNKNOWN_HOUR: u8 = u8::MAX;

fn unit_interval(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && (0.0..=1.0).contains(v))
}

fn hour(value: Option<i64>) -> Option<u8> {
    value
        .and_then(|v| u8::try_from(v).ok())
        .filter(|h| *h <= 23)
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserSettingsInput {
    pub auto_send_enabled: Option<bool>,
    pub confidence_threshold: Option<f64>,
    pub working_hours_start: Option<i64>,
    pub working_hours_end: Option<i64>,
    pub allow_after_hours: Option<bool>,
}

impl UserSettingsInput {
    pub fn into_settings(self) -> UserSettings {
        let working_hours = match (
            hour(self.working_hours_start),
            hour(self.working_hours_end),
        ) {
            (Some(start), Some(end)) => WorkingHours::new(start, end),
            _ => None,
        };

        UserSettings {
            auto_send_enabled: self.auto_send_enabled.unwrap_or(false),
            confidence_threshold: unit_interval(self.confidence_threshold)
                .unwrap_or(UNREACHABLE_THRESHOLD),
            working_hours,
            allow_after_hours: self.allow_after_hours.unwrap_or(false),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelSettingsInput {
    pub auto_send_enabled: Option<bool>,
}

impl ChannelSettingsInput {
    pub fn into_settings(self) -> ChannelSettings {
        ChannelSettings {
            auto_send_enabled: self.auto_send_enabled.unwrap_or(false),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactInput {
    pub message_count: Option<i64>,
    pub is_new: Option<bool>,
    #[serde(rename = "isVIP", alias = "isVip")]
    pub is_vip: Option<bool>,
    pub sentiment_score: Option<f64>,
}

impl ContactInput {
    pub fn into_contact(self) -> Contact {
        let message_count = match self.message_count {
            Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
            _ => 0,
        };

        Contact {
            message_count,
            is_new: self.is_new.unwrap_or(true),
            is_vip: self.is_vip.unwrap_or(true),
            sentiment_score: unit_interval(self.sentiment_score).unwrap_or(0.0),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SupervisorVerdictInput {
    pub confidence_score: Option<f64>,
    pub safe_to_send: Option<bool>,
    pub message_type: Option<String>,
    pub has_forbidden_topics: Option<bool>,
    pub forbidden_topics_found: Option<Vec<String>>,
    pub is_scheduling_unambiguous: Option<bool>,
    pub contains_new_commitments: Option<bool>,
    pub sender_requested_attachment: Option<bool>,
    pub reasoning: Option<String>,
}

fn parse_message_type(raw: Option<&str>) -> MessageType {
    match raw.map(|s| s.trim().to_ascii_uppercase()).as_deref() {
        Some("ACKNOWLEDGEMENT") => MessageType::Acknowledgement,
        Some("CONFIRMATION") => MessageType::Confirmation,
        Some("INFORMATION") => MessageType::Information,
        _ => MessageType::Complex,
    }
}

impl SupervisorVerdictInput {
    pub fn into_verdict(self) -> SupervisorVerdict {
        SupervisorVerdict {
            confidence_score: unit_interval(self.confidence_score).unwrap_or(0.0),
            safe_to_send: self.safe_to_send.unwrap_or(false),
            message_type: parse_message_type(self.message_type.as_deref()),
            has_forbidden_topics: self.has_forbidden_topics.unwrap_or(true),
            forbidden_topics_found: self.forbidden_topics_found.unwrap_or_default(),
            scheduling: self.is_scheduling_unambiguous.into(),
            contains_new_commitments: self.contains_new_commitments.unwrap_or(true),
            sender_requested_attachment: self.sender_requested_attachment.unwrap_or(true),
            reasoning: self.reasoning.unwrap_or_default(),
        }
    }
}

/// Whole decision context as it arrives from the orchestrator.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecisionContextInput {
    pub user_settings: UserSettingsInput,
    pub channel_settings: ChannelSettingsInput,
    pub contact: ContactInput,
    pub supervisor: SupervisorVerdictInput,
    pub current_hour: Option<i64>,
}

impl DecisionContextInput {
    /// Decode and resolve a JSON payload. Only structurally invalid JSON is an
    /// error; missing fields resolve fail-closed.
    pub fn from_json(json: &str) -> Result<DecisionContext, ContextError> {
        let input: DecisionContextInput = serde_json::from_str(json)?;
        Ok(input.into_context())
    }

    pub fn into_context(self) -> DecisionContext {
        DecisionContext {
            user_settings: self.user_settings.into_settings(),
            channel_settings: self.channel_settings.into_settings(),
            contact: self.contact.into_contact(),
            supervisor: self.supervisor.into_verdict(),
            current_hour: hour(self.current_hour).unwrap_or(UNKNOWN_HOUR),
        }
    }
}
