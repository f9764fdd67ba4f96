//! ALU arithmetic operations.
//!
//! Implements integer addition, subtraction, multiplication, and division at
//! the native register width, plus the RV64 word (`*W`) forms. Includes the
//! full M-extension multiply/divide family.
//!
//! Division never traps:
//! - divide by zero yields all ones (quotient) and the dividend (remainder);
//! - signed overflow (`MIN / -1`) yields the dividend (quotient) and 0 (remainder).

use super::AluOp;
use crate::common::xlen::{Xlen, sext32};

/// Number of bits in a 32-bit word (used for high-multiply shift).
const WORD_BITS: u32 = 32;

/// Executes an integer arithmetic operation at width `X`.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be an arithmetic variant).
/// * `a`  - First operand, zero-extended.
/// * `b`  - Second operand, zero-extended.
///
/// # Returns
///
/// The result truncated to `X::VALUE` bits. Returns `0` for non-arithmetic opcodes.
pub fn execute<X: Xlen>(op: AluOp, a: u64, b: u64) -> u64 {
    let sa = X::to_signed(a);
    let sb = X::to_signed(b);
    match op {
        AluOp::Add => X::truncate(a.wrapping_add(b)),
        AluOp::Sub => X::truncate(a.wrapping_sub(b)),
        AluOp::Mul => X::truncate(a.wrapping_mul(b)),
        AluOp::Mulh => X::truncate(((sa as i128 * sb as i128) >> X::VALUE) as u64),
        // Operand a is signed, b is unsigned.
        AluOp::Mulhsu => X::truncate(((sa as i128 * b as i128) >> X::VALUE) as u64),
        AluOp::Mulhu => X::truncate(((a as u128 * b as u128) >> X::VALUE) as u64),
        AluOp::Div => {
            if b == 0 {
                X::all_ones()
            } else if a == X::SIGNED_MIN && sb == -1 {
                a
            } else {
                X::truncate((sa / sb) as u64)
            }
        }
        AluOp::Divu => {
            if b == 0 {
                X::all_ones()
            } else {
                a / b
            }
        }
        AluOp::Rem => {
            if b == 0 {
                a
            } else if a == X::SIGNED_MIN && sb == -1 {
                0
            } else {
                X::truncate((sa % sb) as u64)
            }
        }
        AluOp::Remu => {
            if b == 0 {
                a
            } else {
                a % b
            }
        }
        _ => 0,
    }
}

/// Executes the RV64 word form of an arithmetic operation.
///
/// Operands are taken from the low 32 bits; the 32-bit result is sign-extended.
pub fn execute_word(op: AluOp, a: u64, b: u64) -> u64 {
    let wa = a as u32;
    let wb = b as u32;
    match op {
        AluOp::Add => sext32(u64::from(wa.wrapping_add(wb))),
        AluOp::Sub => sext32(u64::from(wa.wrapping_sub(wb))),
        AluOp::Mul => sext32(u64::from(wa.wrapping_mul(wb))),
        AluOp::Div => {
            if wb == 0 {
                u64::MAX
            } else {
                (wa as i32).wrapping_div(wb as i32) as i64 as u64
            }
        }
        AluOp::Divu => {
            if wb == 0 {
                u64::MAX
            } else {
                sext32(u64::from(wa / wb))
            }
        }
        // Divide-by-zero returns dividend[31:0] sign-extended, not the raw 64-bit a.
        AluOp::Rem => {
            if wb == 0 {
                sext32(a)
            } else {
                (wa as i32).wrapping_rem(wb as i32) as i64 as u64
            }
        }
        AluOp::Remu => {
            if wb == 0 {
                sext32(a)
            } else {
                sext32(u64::from(wa % wb))
            }
        }
        AluOp::Mulh | AluOp::Mulhsu | AluOp::Mulhu => {
            sext32(((i64::from(wa as i32) * i64::from(wb as i32)) >> WORD_BITS) as u64)
        }
        _ => 0,
    }
}
