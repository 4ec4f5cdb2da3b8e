//! Repository traits for the attempt table.
//!
//! Services only talk to storage through [`AttemptRepository`]. The crate
//! ships [`InMemoryAttemptRepository`]; a shared store can be plugged in by
//! implementing the same trait with atomic increment-and-check semantics.

pub mod attempt;
pub mod memory;

pub use attempt::AttemptRepository;
pub use memory::InMemoryAttemptRepository;
