//! ALU logical and comparison operations.
//!
//! Implements bitwise OR, AND, XOR, and set-less-than (signed and unsigned).
//! Operands are already canonical at width `X`, so bitwise results need no
//! truncation. Signed comparisons sign-extend through `X::to_signed` first.
//! The comparison result is always 0 or 1.

use super::AluOp;
use crate::common::xlen::Xlen;

/// Executes a logical or comparison operation at width `X`.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be a logic/comparison variant).
/// * `a`  - First operand, zero-extended.
/// * `b`  - Second operand, zero-extended.
///
/// # Returns
///
/// The result at width `X`. Returns `0` for non-logic opcodes.
pub fn execute<X: Xlen>(op: AluOp, a: u64, b: u64) -> u64 {
    match op {
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::Xor => a ^ b,
        AluOp::Slt => u64::from(X::to_signed(a) < X::to_signed(b)),
        AluOp::Sltu => u64::from(X::truncate(a) < X::truncate(b)),
        _ => 0,
    }
}
