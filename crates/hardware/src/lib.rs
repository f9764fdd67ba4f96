//! RISC-V hart decode-and-dispatch engine.
//!
//! This crate interprets RV32 and RV64 code with the I, M, A, F, D and C
//! extensions. It is organized as follows:
//! 1. **Core:** Hart state, the batch loop, the host event flag, and the ALU,
//!    FPU and LSU helpers handlers compute with.
//! 2. **ISA:** Per-hart dispatch tables (a 512-entry full table and a 32-entry
//!    compressed table), the decoder, and one handler module per extension.
//! 3. **Memory:** The `Bus` trait harts consume and a flat shared RAM with
//!    LR/SC reservation tracking.
//! 4. **Configuration:** Serde-backed hart configuration and a width-erased
//!    `Machine` wrapper.
//!
//! Guest faults never surface as host errors: they are delivered through the
//! CSR interface and reported in the [`BatchOutcome`] of the batch that raised
//! them.

/// Common types and constants (widths, access types, traps, registers).
pub mod common;
/// Hart configuration (width, reset PC, extensions).
pub mod config;
/// Hart state, batch loop, and execution units.
pub mod core;
/// Dispatch tables, decoder, and extension handlers.
pub mod isa;
/// Width-erased hart wrapper.
pub mod sim;
/// Memory interface and reference guest RAM.
pub mod soc;

/// Guest-visible exception, bus error, and configuration error types.
pub use crate::common::{BusError, ConfigError, Rv32, Rv64, Trap, Xlen};
/// Hart configuration; deserialize from JSON or use `HartConfig::default()`.
pub use crate::config::{ExtensionConfig, HartConfig};
/// The hart and its batch results.
pub use crate::core::{BatchExit, BatchOutcome, Hart, HartEvent, HartSignal};
/// Runtime-width hart.
pub use crate::sim::Machine;
/// Memory interface and its reference implementation.
pub use crate::soc::{Bus, GuestMemory};
