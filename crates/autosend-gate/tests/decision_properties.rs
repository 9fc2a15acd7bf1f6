use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use autosend_gate::gates::standard_ids;
use autosend_gate::{
    check_hard_block, AutoSendEngine, Clock, Disposition, GateId, HardBlockReason,
    InMemoryRateLimitStore, ManualClock, QuotaPolicy, RateLimitPolicy, RateLimitStore,
    RATE_LIMIT_EXCEEDED,
};
use autosend_types::{
    ChannelSettings, Contact, DecisionContext, DecisionContextInput, MessageType,
    SchedulingClarity, SupervisorVerdict, UserSettings, WorkingHours,
};
use chrono::Duration;

fn passing_context() -> DecisionContext {
    DecisionContext::new(
        UserSettings {
            auto_send_enabled: true,
            confidence_threshold: 0.85,
            working_hours: WorkingHours::new(9, 17),
            allow_after_hours: false,
        },
        ChannelSettings {
            auto_send_enabled: true,
        },
        Contact::established(8),
        SupervisorVerdict::clean(0.9),
        14,
    )
}

fn engine_with_clock() -> (AutoSendEngine, Arc<ManualClock>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("autosend_gate=debug")
        .with_test_writer()
        .try_init();
    let clock = Arc::new(ManualClock::default());
    let engine = AutoSendEngine::builder()
        .clock(clock.clone())
        .build()
        .unwrap();
    (engine, clock)
}

fn gate_passed(engine: &AutoSendEngine, draft: &str, ctx: &DecisionContext, id: &GateId) -> bool {
    let outcome = engine.evaluate("prop-user", draft, ctx);
    outcome
        .gate_results
        .iter()
        .find(|r| &r.id == id)
        .map(|r| r.passed)
        .unwrap()
}

#[test]
fn always_ten_results_in_fixed_order() {
    let (engine, _) = engine_with_clock();
    let blocked_everywhere = DecisionContextInput::default().into_context();

    for ctx in [passing_context(), blocked_everywhere] {
        let outcome = engine.evaluate("alice", "Sounds good.", &ctx);
        let ids: Vec<GateId> = outcome.gate_results.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, standard_ids().to_vec());
    }
}

#[test]
fn passed_iff_all_gates_and_rate_allowed() {
    let (engine, _) = engine_with_clock();

    let outcome = engine.evaluate("alice", "Confirmed.", &passing_context());
    assert!(outcome.passed);
    assert!(outcome.gate_results.iter().all(|r| r.passed));

    let mut ctx = passing_context();
    ctx.supervisor.sender_requested_attachment = true;
    let outcome = engine.evaluate("alice", "Confirmed.", &ctx);
    assert!(!outcome.passed);
    assert_eq!(outcome.risk_reason.as_deref(), Some("sender requested an attachment"));
}

#[test]
fn confidence_boundary() {
    let (engine, _) = engine_with_clock();
    let mut ctx = passing_context();
    ctx.user_settings.confidence_threshold = 0.85;

    ctx.supervisor.confidence_score = 0.85;
    assert!(gate_passed(&engine, "ok", &ctx, &GateId::CONFIDENCE));

    ctx.supervisor.confidence_score = 0.8499;
    assert!(!gate_passed(&engine, "ok", &ctx, &GateId::CONFIDENCE));
}

#[test]
fn first_touch_fails_regardless_of_other_fields() {
    let (engine, _) = engine_with_clock();
    let mut ctx = passing_context();
    ctx.contact = Contact {
        is_new: true,
        message_count: 0,
        is_vip: false,
        sentiment_score: 1.0,
    };

    let outcome = engine.evaluate("alice", "ok", &ctx);
    let failed: Vec<&GateId> = outcome.failed_gates().map(|r| &r.id).collect();
    assert_eq!(failed, vec![&GateId::FIRST_TOUCH]);
}

#[test]
fn dollar_amount_fails_forbidden_topics() {
    let (engine, _) = engine_with_clock();
    let ctx = passing_context();
    assert!(!ctx.supervisor.has_forbidden_topics);
    assert!(!gate_passed(&engine, "That comes to $50 total.", &ctx, &GateId::FORBIDDEN_TOPICS));
}

#[test]
fn scheduling_unknown_passes() {
    let (engine, _) = engine_with_clock();
    let mut ctx = passing_context();
    for (clarity, expected) in [
        (SchedulingClarity::Unknown, true),
        (SchedulingClarity::Ambiguous, false),
        (SchedulingClarity::Unambiguous, true),
    ] {
        ctx.supervisor.scheduling = clarity;
        assert_eq!(
            gate_passed(&engine, "ok", &ctx, &GateId::SCHEDULING_AMBIGUITY),
            expected
        );
    }
}

#[test]
fn eleventh_call_is_rate_limited_then_window_resets() {
    let (engine, clock) = engine_with_clock();
    let mut failing = passing_context();
    failing.supervisor.message_type = MessageType::Complex;

    // Rate allowance does not depend on gate outcomes.
    for i in 0..10 {
        let ctx = if i % 2 == 0 { passing_context() } else { failing.clone() };
        let outcome = engine.evaluate("alice", "ok", &ctx);
        assert!(outcome.rate_limit.allowed, "call {i}");
    }

    let outcome = engine.evaluate("alice", "ok", &passing_context());
    assert!(!outcome.passed);
    assert!(outcome.gate_results.iter().all(|r| r.passed));
    assert_eq!(outcome.risk_reason.as_deref(), Some(RATE_LIMIT_EXCEEDED));

    clock.advance(Duration::hours(1) + Duration::seconds(1));
    let outcome = engine.evaluate("alice", "ok", &passing_context());
    assert!(outcome.passed);
    assert_eq!(outcome.rate_limit.count, 1);
}

#[test]
fn hard_block_properties() {
    let vip = Contact {
        is_vip: true,
        sentiment_score: 0.9,
        ..Contact::established(3)
    };
    let result = check_hard_block(&vip);
    assert!(result.blocked);
    assert_eq!(result.reason, Some(HardBlockReason::VipManualOverride));

    let sour = Contact {
        sentiment_score: 0.29,
        ..Contact::established(3)
    };
    assert_eq!(
        check_hard_block(&sour).reason,
        Some(HardBlockReason::NegativeSentimentDetected)
    );

    let borderline = Contact {
        sentiment_score: 0.30,
        ..Contact::established(3)
    };
    assert!(!check_hard_block(&borderline).blocked);
}

#[test]
fn empty_context_routes_to_human() {
    let (engine, _) = engine_with_clock();
    let ctx = DecisionContextInput::from_json("{}").unwrap();
    let decision = engine.decide("alice", "ok", &ctx);
    assert_eq!(decision.disposition, Disposition::RouteToHuman);
    assert!(decision.hard_block.blocked);
    assert!(!decision.outcome.passed);
}

#[test]
fn concurrent_same_user_never_exceeds_limit() {
    let store = Arc::new(InMemoryRateLimitStore::new());
    let engine = Arc::new(
        AutoSendEngine::builder()
            .store(store.clone())
            .build()
            .unwrap(),
    );
    let threads = 32;
    let barrier = Arc::new(Barrier::new(threads));
    let allowed = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let engine = engine.clone();
            let barrier = barrier.clone();
            let allowed = allowed.clone();
            thread::spawn(move || {
                barrier.wait();
                if engine.limiter().check_and_consume("shared-user") {
                    allowed.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(allowed.load(Ordering::SeqCst), 10);
    assert_eq!(store.snapshot("shared-user").unwrap().count, 10);
}

#[test]
fn concurrent_distinct_users_each_get_full_quota() {
    let clock = Arc::new(ManualClock::default());
    let store = InMemoryRateLimitStore::new();
    let policy = RateLimitPolicy::default();
    let now = clock.now();

    thread::scope(|scope| {
        for user in 0..8 {
            let store = &store;
            scope.spawn(move || {
                let key = format!("user-{user}");
                let granted = (0..15)
                    .filter(|_| store.acquire(&key, now, &policy, true).allowed)
                    .count();
                assert_eq!(granted, 10);
            });
        }
    });

    assert_eq!(store.len(), 8);
}

#[test]
fn consume_on_success_policy_is_explicit() {
    let engine = AutoSendEngine::builder()
        .quota_policy(QuotaPolicy::ConsumeOnSuccess)
        .build()
        .unwrap();
    assert_eq!(engine.quota_policy(), QuotaPolicy::ConsumeOnSuccess);

    let mut ctx = passing_context();
    ctx.channel_settings.auto_send_enabled = false;
    for _ in 0..20 {
        engine.evaluate("alice", "ok", &ctx);
    }
    assert!(engine.evaluate("alice", "ok", &passing_context()).passed);
}
