//! # autosend-types
//!
//! Data model consumed by the autonomous-send decision engine.
//!
//! Everything here is read-only input assembled by the caller from
//! already-fetched collaborator data: user and channel settings, the contact
//! profile, the upstream supervisor verdict and the wall-clock hour.
//!
//! ## Fail-Closed Inputs
//!
//! The `*Input` types in [`input`] mirror the wire shape with every field
//! optional. Converting them resolves each missing or malformed field to the
//! value that blocks autonomous sending, never to the permissive one.

pub mod contact;
pub mod context;
pub mod error;
pub mod input;
pub mod settings;
pub mod verdict;

pub use contact::Contact;
pub use context::DecisionContext;
pub use error::ContextError;
pub use input::{
    ChannelSettingsInput, ContactInput, DecisionContextInput, SupervisorVerdictInput,
    UserSettingsInput,
};
pub use settings::{ChannelSettings, UserSettings, WorkingHours};
pub use verdict::{MessageType, SchedulingClarity, SupervisorVerdict};
