use crate::gate::{Gate, GateId, GateInput};

/// G9: inside the user's working hours, unless after-hours sends are allowed.
///
/// An unknown window or an out-of-range hour only passes via
/// `allow_after_hours`.
pub fn time_window() -> Gate {
    fn check(input: &GateInput<'_>) -> bool {
        let settings = &input.context.user_settings;
        let in_window = settings
            .working_hours
            .map(|hours| hours.contains(input.context.current_hour))
            .unwrap_or(false);
        in_window || settings.allow_after_hours
    }

    fn detail(input: &GateInput<'_>, passed: bool) -> String {
        let settings = &input.context.user_settings;
        let hour = input.context.current_hour;
        let window = match settings.working_hours {
            Some(hours) => format!("{:02}:00-{:02}:59", hours.start, hours.end),
            None => "unknown".into(),
        };
        match (passed, settings.allow_after_hours) {
            (true, true) => format!("hour {hour} allowed (after-hours sends enabled)"),
            (true, false) => format!("hour {hour} within working hours {window}"),
            (false, _) => format!("hour {hour} outside working hours {window}"),
        }
    }

    Gate::new(GateId::TIME_WINDOW, check, detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gates::fixtures::passing_context;
    use autosend_types::input::UNKNOWN_HOUR;
    use autosend_types::WorkingHours;

    fn passes(ctx: &autosend_types::DecisionContext) -> bool {
        time_window()
            .check(&GateInput {
                draft: "ok",
                context: ctx,
                topic_hits: &[],
            })
            .passed
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let mut ctx = passing_context();
        ctx.user_settings.working_hours = WorkingHours::new(9, 17);
        for (hour, expected) in [(8, false), (9, true), (17, true), (18, false)] {
            ctx.current_hour = hour;
            assert_eq!(passes(&ctx), expected, "hour {hour}");
        }
    }

    #[test]
    fn after_hours_flag_overrides_window() {
        let mut ctx = passing_context();
        ctx.current_hour = 23;
        assert!(!passes(&ctx));
        ctx.user_settings.allow_after_hours = true;
        assert!(passes(&ctx));
    }

    #[test]
    fn inverted_window_fails_unless_after_hours_allowed() {
        let mut ctx = passing_context();
        ctx.user_settings.working_hours = WorkingHours::new(22, 6);
        for hour in [23, 0, 6, 12] {
            ctx.current_hour = hour;
            assert!(!passes(&ctx), "hour {hour}");
        }

        ctx.user_settings.allow_after_hours = true;
        ctx.current_hour = 23;
        assert!(passes(&ctx));
    }

    #[test]
    fn unknown_window_or_hour_fails_closed() {
        let mut ctx = passing_context();
        ctx.user_settings.working_hours = None;
        assert!(!passes(&ctx));

        let mut ctx = passing_context();
        ctx.current_hour = UNKNOWN_HOUR;
        assert!(!passes(&ctx));
    }
}
