//! RISC-V Multiply/Divide (M) dispatch identifiers.
//!
//! All share the OP (or OP-32) opcode with the base arithmetic; bit 25 of the
//! instruction (funct7 = 1) lifts them into the upper half of the table.

/// Multiply (low half).
pub const MUL: usize = 0x10C;
/// Multiply high, signed × signed.
pub const MULH: usize = 0x12C;
/// Multiply high, signed × unsigned.
pub const MULHSU: usize = 0x14C;
/// Multiply high, unsigned × unsigned.
pub const MULHU: usize = 0x16C;
/// Divide, signed.
pub const DIV: usize = 0x18C;
/// Divide, unsigned.
pub const DIVU: usize = 0x1AC;
/// Remainder, signed.
pub const REM: usize = 0x1CC;
/// Remainder, unsigned.
pub const REMU: usize = 0x1EC;

/// Multiply word (RV64).
pub const MULW: usize = 0x10E;
/// Divide word, signed (RV64).
pub const DIVW: usize = 0x18E;
/// Divide word, unsigned (RV64).
pub const DIVUW: usize = 0x1AE;
/// Remainder word, signed (RV64).
pub const REMW: usize = 0x1CE;
/// Remainder word, unsigned (RV64).
pub const REMUW: usize = 0x1EE;

/// funct7 shared by every M instruction.
pub const FUNCT7_MULDIV: u32 = 0b000_0001;
