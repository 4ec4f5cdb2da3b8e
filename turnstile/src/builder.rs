//! Builder for [`Turnstile`] instances
//!
//! # Example
//!
//! ```rust
//! use chrono::Duration;
//! use turnstile::{LockoutExtension, TurnstileBuilder};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let turnstile = TurnstileBuilder::new()
//!     .max_failed_attempts(3)
//!     .lockout_period(Duration::minutes(30))
//!     .extension(LockoutExtension::Fixed)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use chrono::Duration;
use turnstile_core::{
    AttemptRepository, AttemptTracker, Clock, ConfigError, InMemoryAttemptRepository,
    LockoutConfig, LockoutExtension,
};

use crate::Turnstile;

/// Errors that can occur when building a Turnstile instance.
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    /// Invalid configuration provided
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// Builder for [`Turnstile`].
///
/// # Defaults
///
/// - Repository: in-memory
/// - Lockout: enabled, 5 attempts, 15 minute sliding lockout
/// - Clock: system clock
pub struct TurnstileBuilder<R: AttemptRepository = InMemoryAttemptRepository> {
    repository: Arc<R>,
    config: LockoutConfig,
    clock: Option<Arc<dyn Clock>>,
}

impl Default for TurnstileBuilder<InMemoryAttemptRepository> {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnstileBuilder<InMemoryAttemptRepository> {
    pub fn new() -> Self {
        Self {
            repository: Arc::new(InMemoryAttemptRepository::new()),
            config: LockoutConfig::default(),
            clock: None,
        }
    }
}

impl<R: AttemptRepository> TurnstileBuilder<R> {
    /// Store attempts in `repository` instead of the default in-memory table.
    pub fn with_repository<S: AttemptRepository>(
        self,
        repository: Arc<S>,
    ) -> TurnstileBuilder<S> {
        TurnstileBuilder {
            repository,
            config: self.config,
            clock: self.clock,
        }
    }

    /// Replace the whole lockout configuration.
    pub fn with_config(mut self, config: LockoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Failures that engage the lock. Default: 5
    pub fn max_failed_attempts(mut self, max_failed_attempts: u32) -> Self {
        self.config.max_failed_attempts = max_failed_attempts;
        self
    }

    /// How long a lock lasts. Default: 15 minutes
    pub fn lockout_period(mut self, lockout_period: Duration) -> Self {
        self.config.lockout_period = lockout_period;
        self
    }

    /// Whether failures during a lock push its deadline out. Default: sliding
    pub fn extension(mut self, extension: LockoutExtension) -> Self {
        self.config.extension = extension;
        self
    }

    /// Turn lockout off. Failures are then neither recorded nor enforced.
    pub fn disabled(mut self) -> Self {
        self.config.enabled = false;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Validate the configuration and build the [`Turnstile`].
    pub fn build(self) -> Result<Turnstile<R>, BuilderError> {
        self.config.validate()?;

        let mut tracker = AttemptTracker::new(self.repository, self.config);
        if let Some(clock) = self.clock {
            tracker = tracker.with_clock(clock);
        }

        tracing::debug!(
            enabled = tracker.config().enabled,
            max_failed_attempts = tracker.config().max_failed_attempts,
            lockout_seconds = tracker.config().lockout_period.num_seconds(),
            extension = ?tracker.config().extension,
            "Built turnstile"
        );

        Ok(Turnstile::new(Arc::new(tracker)))
    }
}
