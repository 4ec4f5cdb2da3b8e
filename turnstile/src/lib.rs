//! # Turnstile
//!
//! Turnstile slows down credential guessing by tracking failed login
//! attempts per account and locking an account for a while once too many
//! consecutive attempts fail.
//!
//! It does not authenticate anyone itself. An authentication flow asks
//! turnstile before checking credentials and reports the outcome afterwards:
//!
//! - before checking credentials, [`Turnstile::check`] rejects locked accounts
//! - after a failed check, [`Turnstile::on_failure`] counts the failure
//! - after a successful check, [`Turnstile::on_success`] clears the count
//!
//! [`Turnstile::guard`] wraps all three around a verification closure.
//!
//! ## Example
//!
//! ```rust
//! use turnstile::{LockoutError, TurnstileBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let turnstile = TurnstileBuilder::new().max_failed_attempts(3).build()?;
//!
//!     for _ in 0..3 {
//!         let accepted = turnstile.guard("user@example.com", || false)?;
//!         assert!(!accepted);
//!     }
//!
//!     let err = turnstile.guard("user@example.com", || true).unwrap_err();
//!     assert!(matches!(err, LockoutError::Locked { .. }));
//!     Ok(())
//! }
//! ```
use std::sync::Arc;

pub mod builder;

pub use builder::{BuilderError, TurnstileBuilder};

/// Re-export core types from turnstile_core
pub use turnstile_core::{
    AttemptRepository, AttemptState, AttemptTracker, Clock, ConfigError, Error, ExpiryCheck,
    InMemoryAttemptRepository, LockoutConfig, LockoutError, LockoutExtension, LockoutStatus,
    ManualClock, RecordedFailure, SystemClock, normalize_identifier,
};

/// Lockout gate for an authentication flow.
///
/// `Turnstile` is cheap to clone; clones share one attempt table.
pub struct Turnstile<R: AttemptRepository = InMemoryAttemptRepository> {
    tracker: Arc<AttemptTracker<R>>,
}

impl<R: AttemptRepository> Clone for Turnstile<R> {
    fn clone(&self) -> Self {
        Self {
            tracker: Arc::clone(&self.tracker),
        }
    }
}

impl Turnstile<InMemoryAttemptRepository> {
    /// Start configuring a turnstile backed by an in-memory table.
    pub fn builder() -> TurnstileBuilder {
        TurnstileBuilder::new()
    }
}

impl<R: AttemptRepository> Turnstile<R> {
    pub fn new(tracker: Arc<AttemptTracker<R>>) -> Self {
        Self { tracker }
    }

    /// The underlying tracker, for queries such as remaining attempts.
    pub fn tracker(&self) -> &Arc<AttemptTracker<R>> {
        &self.tracker
    }

    /// Reject the attempt if the identifier is locked.
    ///
    /// An expired lock is cleared by this check.
    pub fn check(&self, identifier: &str) -> Result<(), LockoutError> {
        if self.tracker.is_locked_out(identifier) {
            let retry_after_seconds = self.tracker.remaining_lockout_seconds(identifier);
            tracing::debug!(
                identifier = %normalize_identifier(identifier),
                retry_after_seconds,
                "Rejected attempt for locked account"
            );
            return Err(LockoutError::Locked {
                retry_after_seconds,
            });
        }
        Ok(())
    }

    /// Report a failed credential check.
    pub fn on_failure(&self, identifier: &str) -> LockoutStatus {
        self.tracker.record_failure(identifier)
    }

    /// Report a successful credential check.
    pub fn on_success(&self, identifier: &str) {
        self.tracker.reset_attempts(identifier);
    }

    /// Run a credential check behind the lockout gate.
    ///
    /// `verify` is not called while the identifier is locked. Its result is
    /// recorded as a success or a failure and passed back.
    pub fn guard<F>(&self, identifier: &str, verify: F) -> Result<bool, LockoutError>
    where
        F: FnOnce() -> bool,
    {
        self.check(identifier)?;

        let accepted = verify();
        if accepted {
            self.on_success(identifier);
        } else {
            self.on_failure(identifier);
        }
        Ok(accepted)
    }
}
