//! Attempt state stored per identifier, and the views derived from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{LockoutConfig, LockoutExtension};

/// Failure bookkeeping for one normalized identifier.
///
/// `locked_until` is set once `failure_count` reaches the configured
/// threshold and stays set until the entry is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptState {
    pub failure_count: u32,
    pub locked_until: Option<DateTime<Utc>>,
    pub first_failed_at: DateTime<Utc>,
    pub last_failed_at: DateTime<Utc>,
}

impl AttemptState {
    /// A fresh state with no failures counted yet.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            failure_count: 0,
            locked_until: None,
            first_failed_at: now,
            last_failed_at: now,
        }
    }

    /// Count one failure and apply the lock rule.
    ///
    /// A deadline past the representable range saturates at
    /// `DateTime::<Utc>::MAX_UTC`.
    ///
    /// # Returns
    ///
    /// `true` if this failure took the state from unlocked to locked,
    /// including a relock after an expired lock nobody cleared.
    pub fn register_failure(&mut self, now: DateTime<Utc>, config: &LockoutConfig) -> bool {
        let was_locked = self.is_locked_at(now);
        self.failure_count = self.failure_count.saturating_add(1);
        self.last_failed_at = now;

        if self.failure_count < config.max_failed_attempts {
            return false;
        }

        let keep_deadline = config.extension == LockoutExtension::Fixed && was_locked;
        if !keep_deadline {
            let until = now
                .checked_add_signed(config.lockout_period)
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            self.locked_until = Some(until);
        }

        !was_locked && self.is_locked_at(now)
    }

    pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }

    /// True once a lock has been engaged and its deadline has passed.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| now >= until)
    }

    /// Whole seconds until the lock lifts, rounded up. Zero when unlocked.
    pub fn remaining_lockout_seconds(&self, now: DateTime<Utc>) -> u64 {
        let Some(until) = self.locked_until else {
            return 0;
        };

        let millis = (until - now).num_milliseconds();
        if millis <= 0 {
            0
        } else {
            (millis as u64).div_ceil(1000)
        }
    }

    pub fn remaining_attempts(&self, max_failed_attempts: u32) -> u32 {
        max_failed_attempts.saturating_sub(self.failure_count)
    }
}

/// Result of counting one failure against an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFailure {
    /// The entry after the failure was counted.
    pub state: AttemptState,
    /// Whether this failure engaged the lock.
    pub lock_engaged: bool,
}

/// Outcome of a lazy-expiry check on one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryCheck {
    /// No entry exists for the key.
    Absent,
    /// Failures are being counted but no lock is set.
    Unlocked(AttemptState),
    /// The lock is active.
    Locked(AttemptState),
    /// The lock had expired; the entry was removed and is returned here.
    Expired(AttemptState),
}

impl ExpiryCheck {
    pub fn is_locked(&self) -> bool {
        matches!(self, ExpiryCheck::Locked(_))
    }
}

/// Point-in-time lockout status for an identifier.
///
/// An entry whose lock has already expired is reported the way the next
/// lockout check will leave it: unlocked with a full attempt budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockoutStatus {
    /// The normalized identifier.
    pub identifier: String,
    pub failed_attempts: u32,
    pub remaining_attempts: u32,
    pub is_locked: bool,
    pub locked_until: Option<DateTime<Utc>>,
    /// Seconds until the lock lifts, zero when unlocked.
    pub retry_after_seconds: u64,
}

impl LockoutStatus {
    /// Status of an identifier with nothing recorded against it.
    pub fn unlocked(identifier: String, config: &LockoutConfig) -> Self {
        Self {
            identifier,
            failed_attempts: 0,
            remaining_attempts: config.max_failed_attempts,
            is_locked: false,
            locked_until: None,
            retry_after_seconds: 0,
        }
    }

    pub fn from_state(
        identifier: String,
        state: Option<&AttemptState>,
        config: &LockoutConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let state = match state {
            Some(state) if !state.is_expired_at(now) => state,
            _ => return Self::unlocked(identifier, config),
        };

        let is_locked = state.is_locked_at(now);
        Self {
            identifier,
            failed_attempts: state.failure_count,
            remaining_attempts: if is_locked {
                0
            } else {
                state.remaining_attempts(config.max_failed_attempts)
            },
            is_locked,
            locked_until: state.locked_until,
            retry_after_seconds: state.remaining_lockout_seconds(now),
        }
    }
}
