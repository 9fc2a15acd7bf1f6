//! # autosend-gate
//!
//! Autonomous-send decision engine: decides whether a machine-drafted reply
//! may go to a third party without human review.
//!
//! ## Invariants
//!
//! - **Fail-closed**: anything missing or malformed resolves to "route to a
//!   human", never to "send".
//! - **Complete audit trail**: every gate runs on every evaluation; there is
//!   no short-circuit. The standard pipeline always yields ten results in
//!   G1..G10 order.
//! - **Hard block is dispositive**: a VIP contact or negative sentiment
//!   routes to a human regardless of gate outcomes.
//! - **Bounded autonomy**: at most `max_per_window` autonomous sends per user
//!   per fixed window, with atomic per-user check-and-consume.
//!
//! ## Control Flow
//!
//! 1. **Hard block**: VIP, then sentiment floor
//! 2. **Gate pipeline**: ten pure predicates folded into a report
//! 3. **Rate limiter**: fixed window per user, charged per [`QuotaPolicy`]
//! 4. **Decision**: [`AutoSendDecision`] for the orchestrator and audit log

pub mod clock;
pub mod engine;
pub mod error;
pub mod gate;
pub mod gates;
pub mod hard_block;
pub mod outcome;
pub mod ratelimit;
pub mod topics;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{AutoSendDecision, AutoSendEngine, AutoSendEngineBuilder, Disposition, QuotaPolicy};
pub use error::GateError;
pub use gate::{Gate, GateDetail, GateId, GateInput, GatePipeline, GatePredicate, GateReport, GateResult};
pub use hard_block::{check_hard_block, HardBlock, HardBlockReason, HardBlockResult};
pub use outcome::EvaluationOutcome;
pub use ratelimit::{
    InMemoryRateLimitStore, RateLimitDecision, RateLimitEntry, RateLimitPolicy, RateLimitStore,
    RateLimiter, RATE_LIMIT_EXCEEDED,
};
pub use topics::{default_patterns, ForbiddenTopicScanner, MatcherKind, TopicHit, TopicPattern};
