//! # autosend
//!
//! Authorization core for autonomous replies. Re-exports the decision engine,
//! the input model and the feedback analyzer, and wires them from layered
//! configuration.
//!
//! ```no_run
//! use autosend::{AutoSendConfig, DecisionContextInput};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AutoSendConfig::load(Some("autosend.toml"))?;
//! autosend::init_tracing(&config.logging)?;
//!
//! let engine = config.build_engine()?;
//! let ctx = DecisionContextInput::from_json(r#"{"userSettings":{"autoSendEnabled":true}}"#)?;
//! let decision = engine.decide("user-1", "Thanks, Tuesday works.", &ctx);
//! if !decision.is_auto_send() {
//!     // hand the draft to a human
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;

pub use config::{AutoSendConfig, HardBlockConfig, LoggingConfig, RateLimitConfig};
pub use error::ConfigError;
pub use logging::init_tracing;

pub use autosend_feedback::{
    edit_distance, DeltaAnalyzer, DeltaClassification, DeltaResult, DeltaThresholds,
    FeedbackAction, FeedbackError, FeedbackSignal,
};
pub use autosend_gate::{
    check_hard_block, AutoSendDecision, AutoSendEngine, AutoSendEngineBuilder, Clock,
    Disposition, EvaluationOutcome, GateError, GateId, GatePipeline, GateResult, HardBlock,
    HardBlockReason, HardBlockResult, InMemoryRateLimitStore, ManualClock, QuotaPolicy,
    RateLimitDecision, RateLimitPolicy, RateLimitStore, RateLimiter, SystemClock, TopicPattern,
    RATE_LIMIT_EXCEEDED,
};
pub use autosend_types::{
    ChannelSettings, Contact, ContextError, DecisionContext, DecisionContextInput, MessageType,
    SchedulingClarity, SupervisorVerdict, UserSettings, WorkingHours,
};
