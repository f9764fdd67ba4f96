//! ALU shift operations.
//!
//! Implements shift-left logical (SLL), shift-right logical (SRL), and
//! shift-right arithmetic (SRA) at the native width and in the RV64 word form.
//!
//! Shift amounts are masked to `X::SHAMT_MASK` (5 bits on RV32, 6 on RV64).
//! Word-form amounts are always masked to 5 bits and the result is
//! sign-extended from bit 31.

use super::AluOp;
use crate::common::xlen::{Xlen, sext32};

/// Bit mask for the word-form shift amount (5 bits: 0-31).
const SHAMT_MASK_WORD: u32 = 0x1f;

/// Executes a shift operation at width `X`.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be a shift variant).
/// * `a`  - The value to be shifted, zero-extended.
/// * `b`  - The shift amount (low bits used, upper bits ignored).
///
/// # Returns
///
/// The result truncated to `X::VALUE` bits. Returns `0` for non-shift opcodes.
pub fn execute<X: Xlen>(op: AluOp, a: u64, b: u64) -> u64 {
    let sh = b as u32 & X::SHAMT_MASK;
    match op {
        AluOp::Sll => X::truncate(a.wrapping_shl(sh)),
        AluOp::Srl => X::truncate(a).wrapping_shr(sh),
        AluOp::Sra => X::truncate((X::to_signed(a) >> sh) as u64),
        _ => 0,
    }
}

/// Executes the RV64 word form of a shift.
pub fn execute_word(op: AluOp, a: u64, b: u64) -> u64 {
    let sh = b as u32 & SHAMT_MASK_WORD;
    match op {
        AluOp::Sll => sext32(u64::from((a as u32).wrapping_shl(sh))),
        AluOp::Srl => sext32(u64::from((a as u32).wrapping_shr(sh))),
        AluOp::Sra => ((a as i32) >> sh) as i64 as u64,
        _ => 0,
    }
}
