//! Common types used throughout the interpreter.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Width Abstraction:** The `Xlen` trait with its `Rv32` and `Rv64` instantiations.
//! 2. **Constants:** Instruction sizes, table dimensions, and reservation granularity.
//! 3. **Memory Access:** Access types and widths handed to the bus.
//! 4. **Error Handling:** Guest traps, bus errors, and configuration errors.
//! 5. **Register Management:** A unified interface for GPR and FPR access.

/// Common constants used throughout the interpreter.
pub mod constants;

/// Memory access type and width definitions.
pub mod data;

/// Trap and error definitions.
pub mod error;

/// Register file implementation.
pub mod reg;

/// Integer register width abstraction.
pub mod xlen;

pub use data::{AccessType, MemWidth};
pub use error::{BusError, ConfigError, Trap};
pub use reg::RegisterFile;
pub use xlen::{Rv32, Rv64, Xlen};
