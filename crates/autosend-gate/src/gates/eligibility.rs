//! G1–G4: is this user, channel, verdict and contact eligible at all.

use crate::gate::{Gate, GateId, GateInput};

/// G1: auto-send switched on for both the user and the channel.
pub fn feature_flag() -> Gate {
    fn check(input: &GateInput<'_>) -> bool {
        input.context.user_settings.auto_send_enabled
            && input.context.channel_settings.auto_send_enabled
    }

    fn detail(input: &GateInput<'_>, passed: bool) -> String {
        if passed {
            return "auto-send enabled for user and channel".into();
        }
        format!(
            "auto-send disabled (user: {}, channel: {})",
            input.context.user_settings.auto_send_enabled,
            input.context.channel_settings.auto_send_enabled
        )
    }

    Gate::new(GateId::FEATURE_FLAG, check, detail)
}

/// G2: supervisor confidence meets the user's threshold. Inclusive.
pub fn confidence() -> Gate {
    fn check(input: &GateInput<'_>) -> bool {
        input.context.supervisor.confidence_score >= input.context.user_settings.confidence_threshold
    }

    fn detail(input: &GateInput<'_>, passed: bool) -> String {
        let score = input.context.supervisor.confidence_score;
        let threshold = input.context.user_settings.confidence_threshold;
        if passed {
            format!("confidence {score:.4} meets threshold {threshold:.4}")
        } else {
            format!("confidence {score:.4} below threshold {threshold:.4}")
        }
    }

    Gate::new(GateId::CONFIDENCE, check, detail)
}

/// G3: supervisor judged the draft safe to send.
pub fn supervisor_safety() -> Gate {
    fn check(input: &GateInput<'_>) -> bool {
        input.context.supervisor.safe_to_send
    }

    fn detail(input: &GateInput<'_>, passed: bool) -> String {
        if passed {
            return "supervisor marked draft safe to send".into();
        }
        let reasoning = &input.context.supervisor.reasoning;
        if reasoning.is_empty() {
            "supervisor flagged draft as unsafe".into()
        } else {
            format!("supervisor flagged draft as unsafe: {reasoning}")
        }
    }

    Gate::new(GateId::SUPERVISOR_SAFETY, check, detail)
}

/// G4: never auto-send the first message to a contact.
pub fn first_touch() -> Gate {
    fn check(input: &GateInput<'_>) -> bool {
        input.context.contact.has_history()
    }

    fn detail(input: &GateInput<'_>, passed: bool) -> String {
        let contact = &input.context.contact;
        if passed {
            format!("established contact ({} prior messages)", contact.message_count)
        } else {
            format!(
                "first touch with contact (new: {}, prior messages: {})",
                contact.is_new, contact.message_count
            )
        }
    }

    Gate::new(GateId::FIRST_TOUCH, check, detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gates::fixtures::passing_context;
    use autosend_types::{Contact, DecisionContext};

    fn run(gate: &Gate, context: &DecisionContext) -> crate::gate::GateResult {
        gate.check(&GateInput {
            draft: "ok",
            context,
            topic_hits: &[],
        })
    }

    #[test]
    fn feature_flag_needs_both_switches() {
        let mut ctx = passing_context();
        assert!(run(&feature_flag(), &ctx).passed);

        ctx.channel_settings.auto_send_enabled = false;
        let result = run(&feature_flag(), &ctx);
        assert!(!result.passed);
        assert!(result.detail.contains("channel: false"));

        ctx.channel_settings.auto_send_enabled = true;
        ctx.user_settings.auto_send_enabled = false;
        assert!(!run(&feature_flag(), &ctx).passed);
    }

    #[test]
    fn confidence_boundary_is_inclusive() {
        let mut ctx = passing_context();
        ctx.user_settings.confidence_threshold = 0.85;

        ctx.supervisor.confidence_score = 0.85;
        assert!(run(&confidence(), &ctx).passed);

        ctx.supervisor.confidence_score = 0.8499;
        let result = run(&confidence(), &ctx);
        assert!(!result.passed);
        assert!(result.detail.contains("below threshold"));
    }

    #[test]
    fn unsafe_verdict_reports_reasoning() {
        let mut ctx = passing_context();
        ctx.supervisor.safe_to_send = false;
        ctx.supervisor.reasoning = "hostile tone".into();
        let result = run(&supervisor_safety(), &ctx);
        assert!(!result.passed);
        assert!(result.detail.ends_with("hostile tone"));
    }

    #[test]
    fn first_touch_blocks_new_contacts() {
        let mut ctx = passing_context();
        ctx.contact = Contact {
            message_count: 0,
            is_new: true,
            ..Contact::established(0)
        };
        assert!(!run(&first_touch(), &ctx).passed);

        ctx.contact = Contact::established(0);
        assert!(!run(&first_touch(), &ctx).passed);

        ctx.contact = Contact::established(1);
        assert!(run(&first_touch(), &ctx).passed);
    }
}
