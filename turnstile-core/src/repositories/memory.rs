//! In-process attempt repository backed by [`DashMap`].

use chrono::{DateTime, Utc};
use dashmap::{DashMap, mapref::entry::Entry};

use crate::{
    config::LockoutConfig,
    repositories::AttemptRepository,
    storage::{AttemptState, ExpiryCheck, RecordedFailure},
};

/// Attempt table held in process memory.
///
/// Every read-modify-write runs under the shard lock of the key it touches,
/// and that lock is released before the method returns.
#[derive(Debug, Default)]
pub struct InMemoryAttemptRepository {
    attempts: DashMap<String, AttemptState>,
}

impl InMemoryAttemptRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttemptRepository for InMemoryAttemptRepository {
    fn increment(
        &self,
        key: &str,
        now: DateTime<Utc>,
        config: &LockoutConfig,
    ) -> RecordedFailure {
        let mut entry = self
            .attempts
            .entry(key.to_string())
            .or_insert_with(|| AttemptState::new(now));
        let lock_engaged = entry.register_failure(now, config);
        RecordedFailure {
            state: entry.value().clone(),
            lock_engaged,
        }
    }

    fn get(&self, key: &str) -> Option<AttemptState> {
        self.attempts.get(key).map(|entry| entry.value().clone())
    }

    fn remove(&self, key: &str) -> Option<AttemptState> {
        self.attempts.remove(key).map(|(_, state)| state)
    }

    fn remove_expired(&self, key: &str, now: DateTime<Utc>) -> ExpiryCheck {
        match self.attempts.entry(key.to_string()) {
            Entry::Vacant(_) => ExpiryCheck::Absent,
            Entry::Occupied(entry) => {
                if entry.get().is_expired_at(now) {
                    ExpiryCheck::Expired(entry.remove())
                } else if entry.get().locked_until.is_some() {
                    ExpiryCheck::Locked(entry.get().clone())
                } else {
                    ExpiryCheck::Unlocked(entry.get().clone())
                }
            }
        }
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut removed = 0;
        self.attempts.retain(|_, state| {
            let expired = state.is_expired_at(now);
            if expired {
                removed += 1;
            }
            !expired
        });
        removed
    }

    fn len(&self) -> usize {
        self.attempts.len()
    }

    fn clear(&self) {
        self.attempts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_increment_creates_and_counts() {
        let repo = InMemoryAttemptRepository::new();
        let config = LockoutConfig::default();
        let now = Utc::now();

        assert!(repo.get("a").is_none());
        let state = repo.increment("a", now, &config).state;
        assert_eq!(state.failure_count, 1);
        assert_eq!(state.first_failed_at, now);

        let state = repo.increment("a", now, &config).state;
        assert_eq!(state.failure_count, 2);
        assert_eq!(repo.get("a"), Some(state));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_remove_expired_classifies_entries() {
        let repo = InMemoryAttemptRepository::new();
        let config = LockoutConfig {
            max_failed_attempts: 2,
            ..Default::default()
        };
        let now = Utc::now();

        assert_eq!(repo.remove_expired("a", now), ExpiryCheck::Absent);

        repo.increment("a", now, &config);
        assert!(matches!(
            repo.remove_expired("a", now),
            ExpiryCheck::Unlocked(state) if state.failure_count == 1
        ));

        assert!(repo.increment("a", now, &config).lock_engaged);
        assert!(repo.remove_expired("a", now).is_locked());
        assert_eq!(repo.len(), 1);

        let later = now + Duration::minutes(15);
        assert!(matches!(
            repo.remove_expired("a", later),
            ExpiryCheck::Expired(state) if state.failure_count == 2
        ));
        assert!(repo.is_empty());
        assert_eq!(repo.remove_expired("a", later), ExpiryCheck::Absent);
    }

    #[test]
    fn test_remove_vacant_key() {
        let repo = InMemoryAttemptRepository::new();
        assert!(repo.remove("missing").is_none());
        // Checking a missing key must not create an entry.
        repo.remove_expired("missing", Utc::now());
        assert!(repo.is_empty());
    }

    #[test]
    fn test_purge_expired_keeps_active_entries() {
        let repo = InMemoryAttemptRepository::new();
        let config = LockoutConfig {
            max_failed_attempts: 1,
            ..Default::default()
        };
        let start = Utc::now();

        repo.increment("old", start, &config);
        repo.increment("fresh", start + Duration::minutes(10), &config);
        repo.increment(
            "counting",
            start,
            &LockoutConfig {
                max_failed_attempts: 3,
                ..Default::default()
            },
        );

        let removed = repo.purge_expired(start + Duration::minutes(16));
        assert_eq!(removed, 1);
        assert!(repo.get("old").is_none());
        assert!(repo.get("fresh").is_some());
        assert!(repo.get("counting").is_some());

        repo.clear();
        assert!(repo.is_empty());
    }
}
