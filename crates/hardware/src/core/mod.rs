//! Hart implementation.
//!
//! This module contains everything one hardware thread needs to execute
//! instructions: its architectural state, the execution units its handlers
//! call into, and the hart itself with its batch loop.

/// Architectural state (CSRs, integer and FP register files).
pub mod arch;

/// Hart state, execution loop, memory helpers, traps, and the event flag.
pub mod hart;

/// Execution units (ALU, FPU, LSU).
pub mod units;

pub use self::hart::{BatchExit, BatchOutcome, Hart, HartEvent, HartSignal};
