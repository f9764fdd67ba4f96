//! Guest memory.
//!
//! This module organizes the memory side of the interpreter: the [`Bus`]
//! trait harts consume and [`GuestMemory`], a flat RAM implementation with
//! LR/SC reservation tracking that several harts can share.

/// Flat guest RAM with reservation tracking.
pub mod memory;

/// Bus trait definition.
pub mod traits;

pub use self::memory::GuestMemory;
pub use self::traits::Bus;
