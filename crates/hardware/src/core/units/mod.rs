//! Execution units.
//!
//! Stateless functional units used by the instruction handlers: the integer
//! ALU, the floating-point unit, and the load/store helpers.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Floating-Point Unit for IEEE 754 operations.
pub mod fpu;

/// Load/Store Unit for memory access operations.
pub mod lsu;
