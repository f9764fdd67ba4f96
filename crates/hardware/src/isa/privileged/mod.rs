//! Privileged Architecture Definitions.
//!
//! Exception cause codes and the SYSTEM opcode: environment calls, breakpoints,
//! WFI, and Zicsr accesses routed through the hart's CSR interface.
//!
//! # Modules
//!
//! - `cause`: Synchronous exception codes.
//! - `opcodes`: SYSTEM dispatch identifier and fixed encodings.
//! - `system`: The SYSTEM handler.

/// Exception cause codes.
pub mod cause;

/// System instruction encodings.
pub mod opcodes;

/// ECALL, EBREAK, WFI and CSR access handler.
pub mod system;

use crate::common::xlen::Xlen;
use crate::isa::table::Slot;

/// Registrations of the SYSTEM opcode. Always installed.
pub fn slots<X: Xlen>() -> [Slot<X>; 1] {
    [Slot::uj(opcodes::SYSTEM, "system", system::system::<X>)]
}
