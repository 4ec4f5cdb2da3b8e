//! Core functionality for turnstile
//!
//! This crate tracks failed authentication attempts per account identifier
//! and enforces a temporary lockout once too many consecutive failures pile
//! up, slowing down credential guessing.
//!
//! See [`AttemptTracker`] for the service, [`LockoutConfig`] for the policy
//! and [`AttemptRepository`] for the storage seam.
//!
//! State lives in memory for the lifetime of the tracker. Nothing is
//! persisted and nothing is shared between processes.
pub mod clock;
pub mod config;
pub mod error;
pub mod identifier;
pub mod repositories;
pub mod services;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{LockoutConfig, LockoutExtension};
pub use error::{ConfigError, Error, LockoutError};
pub use identifier::normalize_identifier;
pub use repositories::{AttemptRepository, InMemoryAttemptRepository};
pub use services::AttemptTracker;
pub use storage::{AttemptState, ExpiryCheck, LockoutStatus, RecordedFailure};
