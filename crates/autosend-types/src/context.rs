use serde::{Deserialize, Serialize};

use crate::contact::Contact;
use crate::settings::{ChannelSettings, UserSettings};
use crate::verdict::SupervisorVerdict;

/// Everything the gates look at, assembled fresh per evaluation.
///
/// Immutable once built; the engine never persists it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionContext {
    pub user_settings: UserSettings,
    pub channel_settings: ChannelSettings,
    pub contact: Contact,
    pub supervisor: SupervisorVerdict,
    /// Hour of day in the user's timezone (0..=23). Resolving the timezone is
    /// the caller's job.
    pub current_hour: u8,
}

impl DecisionContext {
    pub fn new(
        user_settings: UserSettings,
        channel_settings: ChannelSettings,
        contact: Contact,
        supervisor: SupervisorVerdict,
        current_hour: u8,
    ) -> Self {
        Self {
            user_settings,
            channel_settings,
            contact,
            supervisor,
            current_hour,
        }
    }
}
