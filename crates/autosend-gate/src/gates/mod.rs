//! The ten standard gates.
//!
//! | id  | passes when |
//! |-----|-------------|
//! | G1  | auto-send enabled for both user and channel |
//! | G2  | supervisor confidence >= user threshold (inclusive) |
//! | G3  | supervisor marked the draft safe to send |
//! | G4  | contact has prior history and is not new |
//! | G5  | message is an acknowledgement or confirmation |
//! | G6  | no forbidden-topic matcher hits and supervisor found none |
//! | G7  | scheduling is not explicitly ambiguous |
//! | G8  | draft makes no new commitments |
//! | G9  | current hour inside working hours, or after-hours allowed |
//! | G10 | sender did not ask for an attachment |

pub mod content;
pub mod eligibility;
pub mod timing;

use crate::gate::{Gate, GateId};

pub use content::{
    attachment_request, complexity, forbidden_topics, no_new_commitments, scheduling_ambiguity,
};
pub use eligibility::{confidence, feature_flag, first_touch, supervisor_safety};
pub use timing::time_window;

/// G1..G10 in table order.
pub fn standard_gates() -> Vec<Gate> {
    vec![
        feature_flag(),
        confidence(),
        supervisor_safety(),
        first_touch(),
        complexity(),
        forbidden_topics(),
        scheduling_ambiguity(),
        no_new_commitments(),
        time_window(),
        attachment_request(),
    ]
}

/// Ids of the standard gates, in order.
pub fn standard_ids() -> [GateId; 10] {
    [
        GateId::FEATURE_FLAG,
        GateId::CONFIDENCE,
        GateId::SUPERVISOR_SAFETY,
        GateId::FIRST_TOUCH,
        GateId::COMPLEXITY,
        GateId::FORBIDDEN_TOPICS,
        GateId::SCHEDULING_AMBIGUITY,
        GateId::NO_NEW_COMMITMENTS,
        GateId::TIME_WINDOW,
        GateId::ATTACHMENT_REQUEST,
    ]
}
