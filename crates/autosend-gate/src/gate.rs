use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use autosend_types::DecisionContext;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GateError;
use crate::gates;
use crate::topics::{ForbiddenTopicScanner, TopicHit};

/// Stable identifier of a gate, as it appears in audit records.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateId(Cow<'static, str>);

impl GateId {
    pub const FEATURE_FLAG: GateId = GateId(Cow::Borrowed("G1_FEATURE_FLAG"));
    pub const CONFIDENCE: GateId = GateId(Cow::Borrowed("G2_CONFIDENCE"));
    pub const SUPERVISOR_SAFETY: GateId = GateId(Cow::Borrowed("G3_SUPERVISOR_SAFETY"));
    pub const FIRST_TOUCH: GateId = GateId(Cow::Borrowed("G4_FIRST_TOUCH"));
    pub const COMPLEXITY: GateId = GateId(Cow::Borrowed("G5_COMPLEXITY"));
    pub const FORBIDDEN_TOPICS: GateId = GateId(Cow::Borrowed("G6_FORBIDDEN_TOPICS"));
    pub const SCHEDULING_AMBIGUITY: GateId = GateId(Cow::Borrowed("G7_SCHEDULING_AMBIGUITY"));
    pub const NO_NEW_COMMITMENTS: GateId = GateId(Cow::Borrowed("G8_NO_NEW_COMMITMENTS"));
    pub const TIME_WINDOW: GateId = GateId(Cow::Borrowed("G9_TIME_WINDOW"));
    pub const ATTACHMENT_REQUEST: GateId = GateId(Cow::Borrowed("G10_ATTACHMENT_REQUEST"));

    /// Identifier for a gate defined outside this crate.
    pub fn custom(id: impl Into<String>) -> Self {
        GateId(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a single gate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateResult {
    pub id: GateId,
    pub passed: bool,
    pub detail: String,
}

/// What a gate predicate sees: the draft, the context, and the scanner hits
/// computed once for the draft.
#[derive(Clone, Copy, Debug)]
pub struct GateInput<'a> {
    pub draft: &'a str,
    pub context: &'a DecisionContext,
    pub topic_hits: &'a [TopicHit],
}

pub type GatePredicate = fn(&GateInput<'_>) -> bool;
pub type GateDetail = fn(&GateInput<'_>, bool) -> String;

/// A named pure predicate with a detail formatter.
#[derive(Clone)]
pub struct Gate {
    id: GateId,
    predicate: GatePredicate,
    detail: GateDetail,
}

impl Gate {
    pub const fn new(id: GateId, predicate: GatePredicate, detail: GateDetail) -> Self {
        Self {
            id,
            predicate,
            detail,
        }
    }

    pub fn id(&self) -> &GateId {
        &self.id
    }

    pub fn check(&self, input: &GateInput<'_>) -> GateResult {
        let passed = (self.predicate)(input);
        GateResult {
            id: self.id.clone(),
            passed,
            detail: (self.detail)(input, passed),
        }
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate").field("id", &self.id).finish()
    }
}

/// Per-gate diagnostics from one pipeline run, in pipeline order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateReport {
    pub results: Vec<GateResult>,
}

impl GateReport {
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// First failing gate, in pipeline order.
    pub fn first_failure(&self) -> Option<&GateResult> {
        self.results.iter().find(|r| !r.passed)
    }

    pub fn failed(&self) -> impl Iterator<Item = &GateResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    pub fn get(&self, id: &GateId) -> Option<&GateResult> {
        self.results.iter().find(|r| &r.id == id)
    }
}

/// Ordered list of gates evaluated as a fold.
///
/// Every gate runs on every call, so the report is always a complete audit
/// trail. A pipeline is never empty and never holds two gates with one id.
#[derive(Clone, Debug)]
pub struct GatePipeline {
    gates: Vec<Gate>,
}

impl GatePipeline {
    /// Build a pipeline from an explicit ordered list.
    pub fn new(gates: Vec<Gate>) -> Result<Self, GateError> {
        if gates.is_empty() {
            return Err(GateError::EmptyPipeline);
        }
        let mut seen = HashSet::new();
        for gate in &gates {
            if !seen.insert(gate.id.clone()) {
                return Err(GateError::DuplicateGate(gate.id.to_string()));
            }
        }
        Ok(Self { gates })
    }

    /// The ten standard gates, G1 through G10.
    pub fn standard() -> Self {
        Self {
            gates: gates::standard_gates(),
        }
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn ids(&self) -> Vec<GateId> {
        self.gates.iter().map(|g| g.id.clone()).collect()
    }

    /// Run every gate against the draft and context.
    pub fn evaluate(
        &self,
        draft: &str,
        context: &DecisionContext,
        scanner: &ForbiddenTopicScanner,
    ) -> GateReport {
        let topic_hits = scanner.scan(draft);
        let input = GateInput {
            draft,
            context,
            topic_hits: &topic_hits,
        };

        let results = self
            .gates
            .iter()
            .fold(Vec::with_capacity(self.gates.len()), |mut acc, gate| {
                let result = gate.check(&input);
                debug!(gate = %result.id, passed = result.passed, "Gate evaluated");
                acc.push(result);
                acc
            });

        GateReport { results }
    }
}

impl Default for GatePipeline {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autosend_types::{ChannelSettings, Contact, SupervisorVerdict, UserSettings};

    fn context() -> DecisionContext {
        DecisionContext::new(
            UserSettings {
                auto_send_enabled: true,
                ..UserSettings::default()
            },
            ChannelSettings {
                auto_send_enabled: true,
            },
            Contact::established(3),
            SupervisorVerdict::clean(0.95),
            10,
        )
    }

    fn always(_: &GateInput<'_>) -> bool {
        true
    }

    fn never(_: &GateInput<'_>) -> bool {
        false
    }

    fn describe(_: &GateInput<'_>, passed: bool) -> String {
        if passed {
            "ok".into()
        } else {
            "nope".into()
        }
    }

    #[test]
    fn empty_pipeline_rejected() {
        assert!(matches!(GatePipeline::new(vec![]), Err(GateError::EmptyPipeline)));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let gates = vec![
            Gate::new(GateId::custom("X"), always, describe),
            Gate::new(GateId::custom("X"), never, describe),
        ];
        assert!(matches!(
            GatePipeline::new(gates),
            Err(GateError::DuplicateGate(id)) if id == "X"
        ));
    }

    #[test]
    fn custom_pipeline_evaluates_every_gate_in_order() {
        let pipeline = GatePipeline::new(vec![
            Gate::new(GateId::custom("A"), never, describe),
            Gate::new(GateId::custom("B"), always, describe),
            Gate::new(GateId::custom("C"), never, describe),
        ])
        .unwrap();

        let report = pipeline.evaluate("hi", &context(), &ForbiddenTopicScanner::empty());
        let ids: Vec<&str> = report.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert!(!report.all_passed());
        assert_eq!(report.first_failure().unwrap().id, GateId::custom("A"));
        assert_eq!(report.failed().count(), 2);
    }

    #[test]
    fn standard_pipeline_has_ten_gates() {
        let pipeline = GatePipeline::standard();
        assert_eq!(pipeline.len(), 10);
        assert_eq!(pipeline.ids()[0], GateId::FEATURE_FLAG);
        assert_eq!(pipeline.ids()[9], GateId::ATTACHMENT_REQUEST);
    }

    #[test]
    fn gate_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&GateId::CONFIDENCE).unwrap();
        assert_eq!(json, "\"G2_CONFIDENCE\"");
        let back: GateId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GateId::CONFIDENCE);
    }
}
