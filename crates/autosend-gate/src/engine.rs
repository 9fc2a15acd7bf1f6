use std::sync::Arc;

use autosend_types::DecisionContext;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::GateError;
use crate::gate::GatePipeline;
use crate::hard_block::{HardBlock, HardBlockResult};
use crate::outcome::EvaluationOutcome;
use crate::ratelimit::{InMemoryRateLimitStore, RateLimitPolicy, RateLimitStore, RateLimiter};
use crate::topics::{ForbiddenTopicScanner, TopicPattern};

/// When an evaluation is charged against the user's send quota.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaPolicy {
    /// Every evaluation that reaches the limiter costs one unit, whether or
    /// not the gates pass. Blocked attempts can exhaust the quota.
    #[default]
    ConsumeOnAttempt,
    /// Only evaluations that clear the hard block and every gate cost a unit.
    ConsumeOnSuccess,
}

/// Final routing for a draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    AutoSend,
    RouteToHuman,
}

/// Everything the orchestrator and audit log need about one decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AutoSendDecision {
    pub decision_id: String,
    pub user_id: String,
    pub decided_at: DateTime<Utc>,
    pub hard_block: HardBlockResult,
    pub outcome: EvaluationOutcome,
    pub disposition: Disposition,
    /// Hard-block reason if blocked, otherwise the outcome's risk reason.
    pub reason: Option<String>,
}

impl AutoSendDecision {
    pub fn is_auto_send(&self) -> bool {
        self.disposition == Disposition::AutoSend
    }
}

/// The autonomous-send decision engine.
///
/// Combines the hard-block pre-check, the gate pipeline and the rate limiter
/// into one allow/deny decision. The engine holds no mutable state of its
/// own; the limiter's store is the only shared resource.
pub struct AutoSendEngine {
    pipeline: GatePipeline,
    scanner: ForbiddenTopicScanner,
    hard_block: HardBlock,
    limiter: RateLimiter,
    quota_policy: QuotaPolicy,
    clock: Arc<dyn Clock>,
}

impl AutoSendEngine {
    pub fn builder() -> AutoSendEngineBuilder {
        AutoSendEngineBuilder::default()
    }

    pub fn pipeline(&self) -> &GatePipeline {
        &self.pipeline
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn quota_policy(&self) -> QuotaPolicy {
        self.quota_policy
    }

    /// Hard-block pre-check for a contact.
    pub fn check_hard_block(&self, context: &DecisionContext) -> HardBlockResult {
        self.hard_block.check(&context.contact)
    }

    /// Run all gates and consult the rate limiter.
    ///
    /// Does not look at the hard block; see [`AutoSendEngine::decide`].
    pub fn evaluate(
        &self,
        user_id: &str,
        draft: &str,
        context: &DecisionContext,
    ) -> EvaluationOutcome {
        self.evaluate_with(user_id, draft, context, true)
    }

    fn evaluate_with(
        &self,
        user_id: &str,
        draft: &str,
        context: &DecisionContext,
        may_consume: bool,
    ) -> EvaluationOutcome {
        let report = self.pipeline.evaluate(draft, context, &self.scanner);

        let consume = may_consume
            && match self.quota_policy {
                QuotaPolicy::ConsumeOnAttempt => true,
                QuotaPolicy::ConsumeOnSuccess => report.all_passed(),
            };
        let rate_limit = self.limiter.acquire(user_id, consume);

        EvaluationOutcome::fold(report, rate_limit)
    }

    /// Full decision: hard block, then all gates, then the rate limiter.
    ///
    /// A hard block is dispositive. The gates still run so the audit trail is
    /// complete, but the limiter is only peeked and no quota is charged.
    pub fn decide(
        &self,
        user_id: &str,
        draft: &str,
        context: &DecisionContext,
    ) -> AutoSendDecision {
        let hard_block = self.check_hard_block(context);
        let outcome = self.evaluate_with(user_id, draft, context, !hard_block.blocked);

        let (disposition, reason) = match hard_block.reason {
            Some(block) => (Disposition::RouteToHuman, Some(block.as_str().to_string())),
            None if outcome.passed => (Disposition::AutoSend, None),
            None => (Disposition::RouteToHuman, outcome.risk_reason.clone()),
        };

        let decision = AutoSendDecision {
            decision_id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            decided_at: self.clock.now(),
            hard_block,
            outcome,
            disposition,
            reason,
        };

        match decision.disposition {
            Disposition::AutoSend => info!(
                decision_id = %decision.decision_id,
                user = user_id,
                "Draft approved for autonomous send"
            ),
            Disposition::RouteToHuman => warn!(
                decision_id = %decision.decision_id,
                user = user_id,
                reason = decision.reason.as_deref().unwrap_or("unspecified"),
                "Draft routed to human review"
            ),
        }

        decision
    }
}

/// Builder for [`AutoSendEngine`]. Unset parts fall back to the standard
/// pipeline, default topic patterns, default hard-block floor, an in-memory
/// limiter and the system clock.
#[derive(Default)]
pub struct AutoSendEngineBuilder {
    pipeline: Option<GatePipeline>,
    topic_patterns: Option<Vec<TopicPattern>>,
    hard_block: Option<HardBlock>,
    rate_limit_policy: Option<RateLimitPolicy>,
    store: Option<Arc<dyn RateLimitStore>>,
    clock: Option<Arc<dyn Clock>>,
    quota_policy: QuotaPolicy,
}

impl AutoSendEngineBuilder {
    pub fn pipeline(mut self, pipeline: GatePipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    pub fn topic_patterns(mut self, patterns: Vec<TopicPattern>) -> Self {
        self.topic_patterns = Some(patterns);
        self
    }

    pub fn hard_block(mut self, hard_block: HardBlock) -> Self {
        self.hard_block = Some(hard_block);
        self
    }

    pub fn rate_limit_policy(mut self, policy: RateLimitPolicy) -> Self {
        self.rate_limit_policy = Some(policy);
        self
    }

    pub fn store(mut self, store: Arc<dyn RateLimitStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn quota_policy(mut self, policy: QuotaPolicy) -> Self {
        self.quota_policy = policy;
        self
    }

    pub fn build(self) -> Result<AutoSendEngine, GateError> {
        let scanner = match self.topic_patterns {
            Some(patterns) => ForbiddenTopicScanner::new(&patterns)?,
            None => ForbiddenTopicScanner::with_defaults()?,
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryRateLimitStore::new()));
        let limiter = RateLimiter::new(
            store,
            self.rate_limit_policy.unwrap_or_default(),
            clock.clone(),
        );

        debug!(
            topics = scanner.len(),
            quota_policy = ?self.quota_policy,
            "Auto-send engine assembled"
        );

        Ok(AutoSendEngine {
            pipeline: self.pipeline.unwrap_or_default(),
            scanner,
            hard_block: self.hard_block.unwrap_or_default(),
            limiter,
            quota_policy: self.quota_policy,
            clock,
        })
    }
}
