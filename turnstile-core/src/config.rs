//! Lockout policy configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Failures tolerated before an identifier is locked.
pub const DEFAULT_MAX_FAILED_ATTEMPTS: u32 = 5;

/// Length of a lockout, in minutes.
pub const DEFAULT_LOCKOUT_MINUTES: i64 = 15;

/// Longest accepted lockout, in days.
pub const MAX_LOCKOUT_DAYS: i64 = 365;

/// How failures recorded during an active lockout affect its deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockoutExtension {
    /// Every failure at or past the threshold restarts the lockout from the
    /// time of that failure. A sustained attack keeps the account locked.
    #[default]
    Sliding,
    /// The deadline is fixed when the lock engages. Failures while locked
    /// are still counted but do not move it.
    Fixed,
}

/// Configuration for account lockout.
///
/// # Example
///
/// ```rust
/// use chrono::Duration;
/// use turnstile_core::LockoutConfig;
///
/// let config = LockoutConfig {
///     max_failed_attempts: 3,
///     lockout_period: Duration::minutes(30),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockoutConfig {
    /// When false, failures are not recorded and nothing is ever locked.
    pub enabled: bool,
    /// Consecutive failures that engage the lock.
    pub max_failed_attempts: u32,
    /// How long a lock lasts once engaged.
    pub lockout_period: Duration,
    pub extension: LockoutExtension,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
            lockout_period: Duration::minutes(DEFAULT_LOCKOUT_MINUTES),
            extension: LockoutExtension::default(),
        }
    }
}

impl LockoutConfig {
    /// A configuration that turns lockout off entirely.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Check the configuration before it is put to use.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroThreshold`] if `max_failed_attempts` is zero
    /// - [`ConfigError::NonPositiveLockoutPeriod`] if `lockout_period` is zero
    ///   or negative
    /// - [`ConfigError::LockoutPeriodTooLong`] if `lockout_period` exceeds
    ///   [`MAX_LOCKOUT_DAYS`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_failed_attempts == 0 {
            return Err(ConfigError::ZeroThreshold);
        }

        if self.lockout_period <= Duration::zero() {
            return Err(ConfigError::NonPositiveLockoutPeriod(self.lockout_period));
        }

        if self.lockout_period > Duration::days(MAX_LOCKOUT_DAYS) {
            return Err(ConfigError::LockoutPeriodTooLong(self.lockout_period));
        }

        Ok(())
    }
}
