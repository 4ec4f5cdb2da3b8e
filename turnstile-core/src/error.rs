//! Error types
//!
//! Tracker operations never fail. Errors only appear at the edges: invalid
//! configuration, and the rejection handed to a caller when an account is
//! locked.

use chrono::Duration;
use thiserror::Error;

/// Top-level error for turnstile.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Lockout error: {0}")]
    Lockout(#[from] LockoutError),
}

/// Rejected [`LockoutConfig`](crate::LockoutConfig) values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_failed_attempts must be at least 1")]
    ZeroThreshold,

    #[error("lockout_period must be positive, got {0}")]
    NonPositiveLockoutPeriod(Duration),

    #[error(
        "lockout_period must not exceed {max} days, got {0}",
        max = crate::config::MAX_LOCKOUT_DAYS
    )]
    LockoutPeriodTooLong(Duration),
}

/// Rejection handed back to an authentication flow when an account is locked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockoutError {
    #[error("Account temporarily locked, retry after {retry_after_seconds} seconds")]
    Locked { retry_after_seconds: u64 },
}

impl Error {
    pub fn is_lockout(&self) -> bool {
        matches!(self, Error::Lockout(LockoutError::Locked { .. }))
    }

    /// Seconds until the lockout lifts, if this error is a lockout rejection.
    pub fn retry_after_seconds(&self) -> Option<u64> {
        match self {
            Error::Lockout(LockoutError::Locked {
                retry_after_seconds,
            }) => Some(*retry_after_seconds),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lockout_error_helpers() {
        let err: Error = LockoutError::Locked {
            retry_after_seconds: 42,
        }
        .into();
        assert!(err.is_lockout());
        assert_eq!(err.retry_after_seconds(), Some(42));
        assert_eq!(
            err.to_string(),
            "Lockout error: Account temporarily locked, retry after 42 seconds"
        );
    }

    #[test]
    fn test_config_error_is_not_lockout() {
        let err: Error = ConfigError::ZeroThreshold.into();
        assert!(!err.is_lockout());
        assert_eq!(err.retry_after_seconds(), None);
    }
}
