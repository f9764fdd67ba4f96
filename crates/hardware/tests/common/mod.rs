//! Shared test infrastructure.


/// Hart test harness.
pub mod harness;
