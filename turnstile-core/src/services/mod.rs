//! Service layer
//!
//! Services hold the lockout policy and delegate storage to a repository.

pub mod attempt_tracker;

pub use attempt_tracker::AttemptTracker;
