//! Repository trait for per-identifier attempt state.

use chrono::{DateTime, Utc};

use crate::{
    config::LockoutConfig,
    storage::{AttemptState, ExpiryCheck, RecordedFailure},
};

/// Storage for failed attempt state, keyed by normalized identifier.
///
/// Keys reach the repository already normalized. Each method must be atomic
/// with respect to a single key: concurrent calls for the same key may not
/// lose an increment, and an expired entry may only be removed once.
pub trait AttemptRepository: Send + Sync + 'static {
    /// Count one failure against `key`.
    ///
    /// Looks up or creates the entry, applies
    /// [`AttemptState::register_failure`] and writes it back in one step.
    ///
    /// # Arguments
    ///
    /// * `key` - The normalized identifier
    /// * `now` - The time of the failure
    /// * `config` - The lockout policy to apply
    ///
    /// # Returns
    ///
    /// The updated state and whether this failure engaged the lock.
    fn increment(
        &self,
        key: &str,
        now: DateTime<Utc>,
        config: &LockoutConfig,
    ) -> RecordedFailure;

    /// Read the entry for `key` without modifying it.
    ///
    /// # Returns
    ///
    /// A copy of the stored state, or `None` if nothing is recorded.
    fn get(&self, key: &str) -> Option<AttemptState>;

    /// Remove the entry for `key`, returning what was stored.
    fn remove(&self, key: &str) -> Option<AttemptState>;

    /// Classify the entry for `key`, removing it if its lock expired at or
    /// before `now`.
    fn remove_expired(&self, key: &str, now: DateTime<Utc>) -> ExpiryCheck;

    /// Remove every entry whose lock has expired. Returns the number removed.
    fn purge_expired(&self, now: DateTime<Utc>) -> usize;

    /// Number of identifiers with an entry.
    fn len(&self) -> usize;

    /// Whether no identifier has an entry.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry.
    fn clear(&self);
}
