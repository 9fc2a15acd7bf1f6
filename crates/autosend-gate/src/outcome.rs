use serde::{Deserialize, Serialize};

use crate::gate::{GateReport, GateResult};
use crate::ratelimit::{RateLimitDecision, RATE_LIMIT_EXCEEDED};

/// Folded result of the gates plus the rate limiter.
///
/// `passed` holds exactly when every gate passed and the limiter allowed the
/// call. The risk reason prefers the rate limit, then the first failed gate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub passed: bool,
    pub gate_results: Vec<GateResult>,
    pub risk_reason: Option<String>,
    pub rate_limit: RateLimitDecision,
}

impl EvaluationOutcome {
    pub fn fold(report: GateReport, rate_limit: RateLimitDecision) -> Self {
        let risk_reason = if rate_limit.exceeded() {
            Some(RATE_LIMIT_EXCEEDED.to_string())
        } else {
            report.first_failure().map(|r| r.detail.clone())
        };
        let passed = report.all_passed() && rate_limit.allowed;

        Self {
            passed,
            gate_results: report.results,
            risk_reason,
            rate_limit,
        }
    }

    pub fn failed_gates(&self) -> impl Iterator<Item = &GateResult> {
        self.gate_results.iter().filter(|r| !r.passed)
    }
}
