//! Fixed-window per-user rate limiting for autonomous sends.
//!
//! Windows reset lazily on access. State lives behind [`RateLimitStore`] so
//! the evaluator stays stateless and a shared backend can replace the
//! in-process map for multi-instance deployments.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::GateError;

/// Risk reason reported when the window is exhausted.
pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";

pub const DEFAULT_MAX_PER_WINDOW: u32 = 10;
pub const DEFAULT_WINDOW_SECS: i64 = 3600;
/// Longest accepted window: one leap year.
pub const MAX_WINDOW_SECS: i64 = 366 * 24 * 3600;

/// Window size and allowance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitPolicy {
    max_per_window: u32,
    window: Duration,
}

impl RateLimitPolicy {
    pub fn new(max_per_window: u32, window: Duration) -> Result<Self, GateError> {
        if max_per_window == 0 {
            return Err(GateError::InvalidRateLimit(
                "max_per_window must be at least 1".into(),
            ));
        }
        if window <= Duration::zero() {
            return Err(GateError::InvalidRateLimit(format!(
                "window must be positive, got {}s",
                window.num_seconds()
            )));
        }
        if window > Duration::seconds(MAX_WINDOW_SECS) {
            return Err(GateError::InvalidRateLimit(format!(
                "window must be at most {MAX_WINDOW_SECS}s, got {}s",
                window.num_seconds()
            )));
        }
        Ok(Self {
            max_per_window,
            window,
        })
    }

    pub fn max_per_window(&self) -> u32 {
        self.max_per_window
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_per_window: DEFAULT_MAX_PER_WINDOW,
            window: Duration::seconds(DEFAULT_WINDOW_SECS),
        }
    }
}

/// Counter state for one user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitEntry {
    pub count: u32,
    pub reset_at: DateTime<Utc>,
}

impl RateLimitEntry {
    fn fresh(now: DateTime<Utc>, policy: &RateLimitPolicy) -> Self {
        Self {
            count: 0,
            reset_at: now
                .checked_add_signed(policy.window)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}

/// Result of one limiter consultation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Sends charged in the current window after this call.
    pub count: u32,
    pub limit: u32,
    pub reset_at: DateTime<Utc>,
}

impl RateLimitDecision {
    pub fn exceeded(&self) -> bool {
        !self.allowed
    }
}

/// Backing store for per-user counters.
///
/// `acquire` must perform the window reset, the limit check and the optional
/// increment as one atomic step per key. Calls for different keys must not
/// wait on each other beyond what the store's internal sharding requires.
pub trait RateLimitStore: Send + Sync {
    /// Check the key's window and, when `consume` is set and the window has
    /// room, charge one send.
    fn acquire(
        &self,
        key: &str,
        now: DateTime<Utc>,
        policy: &RateLimitPolicy,
        consume: bool,
    ) -> RateLimitDecision;

    /// Current entry for a key, if any.
    fn snapshot(&self, key: &str) -> Option<RateLimitEntry>;

    /// Drop entries whose window has elapsed. Returns how many were removed.
    fn purge_expired(&self, now: DateTime<Utc>) -> usize;
}

/// Process-local store on a sharded concurrent map.
///
/// State is lost on restart and not shared between instances.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    entries: DashMap<String, RateLimitEntry>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    fn acquire(
        &self,
        key: &str,
        now: DateTime<Utc>,
        policy: &RateLimitPolicy,
        consume: bool,
    ) -> RateLimitDecision {
        // The entry guard holds the shard write lock until it drops, which
        // makes reset + check + increment atomic for this key.
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| RateLimitEntry::fresh(now, policy));

        if now >= entry.reset_at {
            *entry = RateLimitEntry::fresh(now, policy);
        }

        let allowed = entry.count < policy.max_per_window;
        if allowed && consume {
            entry.count += 1;
        }

        RateLimitDecision {
            allowed,
            count: entry.count,
            limit: policy.max_per_window,
            reset_at: entry.reset_at,
        }
    }

    fn snapshot(&self, key: &str) -> Option<RateLimitEntry> {
        self.entries.get(key).map(|e| *e)
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, e| now < e.reset_at);
        before.saturating_sub(self.entries.len())
    }
}

/// Per-user limiter: a store, a policy and a clock.
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    policy: RateLimitPolicy,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(
        store: Arc<dyn RateLimitStore>,
        policy: RateLimitPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            policy,
            clock,
        }
    }

    /// In-memory store, default policy, system clock.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryRateLimitStore::new()),
            RateLimitPolicy::default(),
            Arc::new(SystemClock),
        )
    }

    pub fn policy(&self) -> &RateLimitPolicy {
        &self.policy
    }

    pub fn store(&self) -> &Arc<dyn RateLimitStore> {
        &self.store
    }

    /// Charge one send for `user_id` if the window has room.
    pub fn check_and_consume(&self, user_id: &str) -> bool {
        self.acquire(user_id, true).allowed
    }

    /// Consult the window, charging a send only when `consume` is set.
    pub fn acquire(&self, user_id: &str, consume: bool) -> RateLimitDecision {
        let now = self.clock.now();
        let decision = self.store.acquire(user_id, now, &self.policy, consume);

        if decision.allowed {
            debug!(
                user = user_id,
                count = decision.count,
                limit = decision.limit,
                consumed = consume,
                "Rate limit check passed"
            );
        } else {
            warn!(
                user = user_id,
                limit = decision.limit,
                reset_at = %decision.reset_at,
                "Rate limit exceeded"
            );
        }
        decision
    }

    /// Drop elapsed windows from the store.
    pub fn purge_expired(&self) -> usize {
        self.store.purge_expired(self.clock.now())
    }
}
