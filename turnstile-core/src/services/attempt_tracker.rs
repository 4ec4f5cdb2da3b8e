//! Failed login attempt tracking with temporary account lockout.
//!
//! The tracker counts consecutive failed attempts per account identifier and
//! locks the identifier once the configured threshold is reached. Locks are
//! lifted lazily: the next lockout check that observes an expired lock
//! removes the entry, which also resets the failure count. There is no
//! background sweep.
//!
//! # Example
//!
//! ```rust
//! use turnstile_core::{AttemptTracker, LockoutConfig};
//!
//! let tracker = AttemptTracker::in_memory(LockoutConfig::default());
//!
//! // Before checking credentials
//! if tracker.is_locked_out("user@example.com") {
//!     let retry_after = tracker.remaining_lockout_seconds("user@example.com");
//!     // reject the attempt
//! }
//!
//! // After a failed credential check
//! tracker.record_failure("user@example.com");
//!
//! // After a successful one
//! tracker.reset_attempts("user@example.com");
//! ```

use std::sync::Arc;

use crate::{
    clock::{Clock, SystemClock},
    config::LockoutConfig,
    identifier::normalize_identifier,
    repositories::{AttemptRepository, InMemoryAttemptRepository},
    storage::{ExpiryCheck, LockoutStatus, RecordedFailure},
};

/// Tracks failed attempts per identifier and decides lockouts.
///
/// # Thread Safety
///
/// The tracker is `Send + Sync` and meant to be shared behind an `Arc`.
/// Each operation is a single atomic repository call per identifier, so
/// concurrent failures for one account are never lost.
pub struct AttemptTracker<R: AttemptRepository = InMemoryAttemptRepository> {
    repository: Arc<R>,
    config: LockoutConfig,
    clock: Arc<dyn Clock>,
}

impl AttemptTracker<InMemoryAttemptRepository> {
    /// Create a tracker over a fresh in-memory table.
    pub fn in_memory(config: LockoutConfig) -> Self {
        Self::new(Arc::new(InMemoryAttemptRepository::new()), config)
    }
}

impl Default for AttemptTracker<InMemoryAttemptRepository> {
    fn default() -> Self {
        Self::in_memory(LockoutConfig::default())
    }
}

impl<R: AttemptRepository> AttemptTracker<R> {
    /// Create a new AttemptTracker reading time from the system clock.
    ///
    /// The configuration is used as given; [`LockoutConfig::validate`] is
    /// not called here.
    ///
    /// # Arguments
    ///
    /// * `repository` - The repository implementation for storing attempt data
    /// * `config` - Configuration for lockout behavior
    pub fn new(repository: Arc<R>, config: LockoutConfig) -> Self {
        Self {
            repository,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source.
    ///
    /// # Arguments
    ///
    /// * `clock` - The clock every operation reads the current time from
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &LockoutConfig {
        &self.config
    }

    /// Check if lockout is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Get the repository holding the attempt table.
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Record a failed authentication attempt.
    ///
    /// Reaching the threshold sets the lock deadline to now plus the lockout
    /// period. Under the default sliding policy every further failure moves
    /// the deadline again.
    ///
    /// # Returns
    ///
    /// The status after the failure was counted. Callers that only need the
    /// side effect may ignore it.
    pub fn record_failure(&self, identifier: &str) -> LockoutStatus {
        let key = normalize_identifier(identifier);
        if !self.config.enabled {
            return LockoutStatus::unlocked(key, &self.config);
        }

        let now = self.clock.now();
        let RecordedFailure {
            state,
            lock_engaged,
        } = self.repository.increment(&key, now, &self.config);

        if lock_engaged {
            tracing::warn!(
                identifier = %key,
                failed_attempts = state.failure_count,
                locked_until = ?state.locked_until,
                "Account locked after repeated failed login attempts"
            );
        } else {
            tracing::debug!(
                identifier = %key,
                failed_attempts = state.failure_count,
                locked_until = ?state.locked_until,
                "Recorded failed login attempt"
            );
        }

        LockoutStatus::from_state(key, Some(&state), &self.config, now)
    }

    /// Forget every failure recorded for an identifier.
    ///
    /// Called after a successful login. Resetting an unknown identifier is a
    /// no-op.
    pub fn reset_attempts(&self, identifier: &str) {
        let key = normalize_identifier(identifier);
        if self.repository.remove(&key).is_some() {
            tracing::debug!(identifier = %key, "Reset failed login attempts");
        }
    }

    /// Check whether an identifier is currently locked.
    ///
    /// An expired lock is removed here together with its failure count, so
    /// this call may mutate the table.
    pub fn is_locked_out(&self, identifier: &str) -> bool {
        if !self.config.enabled {
            return false;
        }

        let key = normalize_identifier(identifier);
        match self.repository.remove_expired(&key, self.clock.now()) {
            ExpiryCheck::Locked(_) => true,
            ExpiryCheck::Expired(state) => {
                tracing::debug!(
                    identifier = %key,
                    failed_attempts = state.failure_count,
                    "Lockout expired, attempts reset"
                );
                false
            }
            ExpiryCheck::Absent | ExpiryCheck::Unlocked(_) => false,
        }
    }

    /// Seconds until the lock on an identifier lifts, rounded up.
    ///
    /// Returns zero when nothing is locked. Unlike [`Self::is_locked_out`]
    /// this never removes an expired entry.
    pub fn remaining_lockout_seconds(&self, identifier: &str) -> u64 {
        if !self.config.enabled {
            return 0;
        }

        let key = normalize_identifier(identifier);
        self.repository
            .get(&key)
            .map_or(0, |state| state.remaining_lockout_seconds(self.clock.now()))
    }

    /// Attempts left before the identifier locks.
    ///
    /// Zero while locked. This goes through [`Self::is_locked_out`], so an
    /// expired lock is cleared and the full budget reported.
    pub fn remaining_attempts(&self, identifier: &str) -> u32 {
        let max = self.config.max_failed_attempts;
        if !self.config.enabled {
            return max;
        }

        if self.is_locked_out(identifier) {
            return 0;
        }

        let key = normalize_identifier(identifier);
        self.repository
            .get(&key)
            .map_or(max, |state| state.remaining_attempts(max))
    }

    /// Snapshot of the lockout status for an identifier. Never mutates.
    pub fn lockout_status(&self, identifier: &str) -> LockoutStatus {
        let key = normalize_identifier(identifier);
        if !self.config.enabled {
            return LockoutStatus::unlocked(key, &self.config);
        }

        let state = self.repository.get(&key);
        LockoutStatus::from_state(key, state.as_ref(), &self.config, self.clock.now())
    }

    /// Administratively unlock an identifier.
    ///
    /// # Returns
    ///
    /// `true` if the identifier was locked when it was cleared.
    pub fn unlock_account(&self, identifier: &str) -> bool {
        let key = normalize_identifier(identifier);
        let now = self.clock.now();
        let was_locked = self
            .repository
            .remove(&key)
            .is_some_and(|state| state.is_locked_at(now));

        if was_locked {
            tracing::info!(identifier = %key, "Account unlocked");
        }
        was_locked
    }

    /// Remove every entry whose lock has expired.
    ///
    /// Lazy expiry already handles correctness; this only bounds memory for
    /// identifiers that are never checked again. It runs only when called.
    pub fn purge_expired(&self) -> usize {
        let count = self.repository.purge_expired(self.clock.now());
        if count > 0 {
            tracing::info!(count = count, "Purged expired lockout records");
        }
        count
    }

    /// Number of identifiers with recorded failures.
    pub fn tracked_identifiers(&self) -> usize {
        self.repository.len()
    }

    /// Drop all tracked state, e.g. at shutdown.
    pub fn clear(&self) {
        self.repository.clear();
        tracing::info!("Cleared all tracked login attempts");
    }
}
