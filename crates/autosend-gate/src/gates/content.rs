//! G5–G8 and G10: what the draft and the inbound thread actually say.

use autosend_types::SchedulingClarity;

use crate::gate::{Gate, GateId, GateInput};

/// G5: only acknowledgements and confirmations go out unattended.
pub fn complexity() -> Gate {
    fn check(input: &GateInput<'_>) -> bool {
        input.context.supervisor.message_type.is_simple()
    }

    fn detail(input: &GateInput<'_>, passed: bool) -> String {
        let kind = input.context.supervisor.message_type.as_str();
        if passed {
            format!("message type {kind} is simple")
        } else {
            format!("message type {kind} requires review")
        }
    }

    Gate::new(GateId::COMPLEXITY, check, detail)
}

/// G6: neither the configured matchers nor the supervisor found a forbidden
/// topic.
pub fn forbidden_topics() -> Gate {
    fn check(input: &GateInput<'_>) -> bool {
        input.topic_hits.is_empty() && !input.context.supervisor.has_forbidden_topics
    }

    fn detail(input: &GateInput<'_>, passed: bool) -> String {
        if passed {
            return "no forbidden topics".into();
        }
        let mut found: Vec<String> = input
            .topic_hits
            .iter()
            .map(|hit| format!("{} ({})", hit.id, hit.matched))
            .collect();
        found.extend(input.context.supervisor.forbidden_topics_found.iter().cloned());

        if found.is_empty() {
            "forbidden topics flagged by supervisor".into()
        } else {
            format!("forbidden topics found: {}", found.join(", "))
        }
    }

    Gate::new(GateId::FORBIDDEN_TOPICS, check, detail)
}

/// G7: scheduling is not explicitly ambiguous. Unknown passes.
pub fn scheduling_ambiguity() -> Gate {
    fn check(input: &GateInput<'_>) -> bool {
        input.context.supervisor.scheduling != SchedulingClarity::Ambiguous
    }

    fn detail(input: &GateInput<'_>, passed: bool) -> String {
        match (passed, input.context.supervisor.scheduling) {
            (false, _) => "scheduling request is ambiguous".into(),
            (true, SchedulingClarity::Unknown) => "no scheduling ambiguity reported".into(),
            (true, _) => "scheduling is unambiguous".into(),
        }
    }

    Gate::new(GateId::SCHEDULING_AMBIGUITY, check, detail)
}

/// G8: the draft makes no promise the user has not made before.
pub fn no_new_commitments() -> Gate {
    fn check(input: &GateInput<'_>) -> bool {
        !input.context.supervisor.contains_new_commitments
    }

    fn detail(_input: &GateInput<'_>, passed: bool) -> String {
        if passed {
            "no new commitments".into()
        } else {
            "draft introduces new commitments".into()
        }
    }

    Gate::new(GateId::NO_NEW_COMMITMENTS, check, detail)
}

/// G10: the sender did not ask for a file we would have to pick.
pub fn attachment_request() -> Gate {
    fn check(input: &GateInput<'_>) -> bool {
        !input.context.supervisor.sender_requested_attachment
    }

    fn detail(_input: &GateInput<'_>, passed: bool) -> String {
        if passed {
            "no attachment requested".into()
        } else {
            "sender requested an attachment".into()
        }
    }

    Gate::new(GateId::ATTACHMENT_REQUEST, check, detail)
}
