//! RISC-V Atomic (A) dispatch identifiers.
//!
//! LR, SC and every AMO share one slot per width; `funct5` selects the
//! operation inside the handler.

/// AMO opcode with funct3 = 010 (word operations).
pub const ATOMIC_W: usize = 0x4B;

/// AMO opcode with funct3 = 011 (doubleword operations, RV64).
pub const ATOMIC_D: usize = 0x6B;
