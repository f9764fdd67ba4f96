//! Read-modify-write arithmetic for the A extension.
//!
//! The bus hands the current memory value to [`atomic_alu`], which returns
//! the value to write back. Word operations work on sign-extended operands,
//! so the result is already in register form.

use crate::common::data::MemWidth;
use crate::common::xlen::sext32;

/// Atomic operation selected by `funct5` of an AMO-major-opcode instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AtomicOp {
    /// Load-reserved.
    Lr,
    /// Store-conditional.
    Sc,
    /// AMOSWAP.
    Swap,
    /// AMOADD.
    Add,
    /// AMOXOR.
    Xor,
    /// AMOAND.
    And,
    /// AMOOR.
    Or,
    /// AMOMIN (signed).
    Min,
    /// AMOMAX (signed).
    Max,
    /// AMOMINU.
    Minu,
    /// AMOMAXU.
    Maxu,
}

impl AtomicOp {
    /// Decodes `funct5` (instruction bits 31:27).
    ///
    /// Returns `None` for encodings that are not part of the A extension.
    pub const fn from_funct5(funct5: u32) -> Option<Self> {
        Some(match funct5 {
            0b00010 => Self::Lr,
            0b00011 => Self::Sc,
            0b00001 => Self::Swap,
            0b00000 => Self::Add,
            0b00100 => Self::Xor,
            0b01100 => Self::And,
            0b01000 => Self::Or,
            0b10000 => Self::Min,
            0b10100 => Self::Max,
            0b11000 => Self::Minu,
            0b11100 => Self::Maxu,
            _ => return None,
        })
    }
}

/// Combines the value read from memory with the register operand.
///
/// `Lr` and `Sc` have no read-modify-write form and return `mem_val`
/// (sign-extended for words).
pub fn atomic_alu(op: AtomicOp, mem_val: u64, reg_val: u64, width: MemWidth) -> u64 {
    let word = matches!(width, MemWidth::Word);
    let (a, b) = if word {
        (sext32(mem_val), sext32(reg_val))
    } else {
        (mem_val, reg_val)
    };
    // Sign extension preserves unsigned order, so MINU/MAXU compare
    // the extended forms directly.
    let res = match op {
        AtomicOp::Swap => b,
        AtomicOp::Add => a.wrapping_add(b),
        AtomicOp::Xor => a ^ b,
        AtomicOp::And => a & b,
        AtomicOp::Or => a | b,
        AtomicOp::Min => (a as i64).min(b as i64) as u64,
        AtomicOp::Max => (a as i64).max(b as i64) as u64,
        AtomicOp::Minu => a.min(b),
        AtomicOp::Maxu => a.max(b),
        AtomicOp::Lr | AtomicOp::Sc => a,
    };
    if word { sext32(res) } else { res }
}
