//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU shared by the base-integer,
//! compressed, and multiply/divide handlers. Every operation is generic over
//! the register width: operands arrive as zero-extended `u64` and results are
//! truncated back to `X::VALUE` bits. The RV64 `*W` instructions use the
//! separate `execute_word` entry point, whose results are sign-extended from
//! bit 31.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Mulh, Mulhsu, Mulhu, Div, Divu, Rem, Remu
//! - [`logic`]:      Or, And, Xor, Slt, Sltu
//! - [`shifts`]:     Sll, Srl, Sra

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical and comparison operations (or, and, xor, slt).
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

use crate::common::xlen::Xlen;

/// Integer ALU operation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Low half of the product.
    Mul,
    /// High half of the signed × signed product.
    Mulh,
    /// High half of the signed × unsigned product.
    Mulhsu,
    /// High half of the unsigned × unsigned product.
    Mulhu,
    /// Signed division.
    Div,
    /// Unsigned division.
    Divu,
    /// Signed remainder.
    Rem,
    /// Unsigned remainder.
    Remu,
    /// Shift left logical.
    Sll,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Bitwise OR.
    Or,
    /// Bitwise AND.
    And,
    /// Bitwise XOR.
    Xor,
    /// Signed set-less-than.
    Slt,
    /// Unsigned set-less-than.
    Sltu,
}

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation at the native width `X`.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand, zero-extended
    /// * `b`  - Second operand, zero-extended (shift amount for shifts)
    ///
    /// # Returns
    ///
    /// The result truncated to `X::VALUE` bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvhart_core::common::{Rv32, Rv64};
    /// use rvhart_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute::<Rv32>(AluOp::Add, 0xFFFF_FFFF, 1), 0);
    /// assert_eq!(Alu::execute::<Rv64>(AluOp::Add, 0xFFFF_FFFF, 1), 0x1_0000_0000);
    /// assert_eq!(Alu::execute::<Rv32>(AluOp::Sll, 1, 40), 0x100);
    /// assert_eq!(Alu::execute::<Rv64>(AluOp::Div, 5, 0), u64::MAX);
    /// ```
    #[inline(always)]
    pub fn execute<X: Xlen>(op: AluOp, a: u64, b: u64) -> u64 {
        match op {
            AluOp::Add
            | AluOp::Sub
            | AluOp::Mul
            | AluOp::Mulh
            | AluOp::Mulhsu
            | AluOp::Mulhu
            | AluOp::Div
            | AluOp::Divu
            | AluOp::Rem
            | AluOp::Remu => arithmetic::execute::<X>(op, a, b),

            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt | AluOp::Sltu => {
                logic::execute::<X>(op, a, b)
            }

            AluOp::Sll | AluOp::Srl | AluOp::Sra => shifts::execute::<X>(op, a, b),
        }
    }

    /// Executes the 32-bit (`*W`) variant of an operation.
    ///
    /// Only meaningful on RV64; the result is sign-extended from bit 31.
    /// Logical operations and comparisons have no word form and fall back to
    /// the 64-bit result.
    #[inline(always)]
    pub fn execute_word(op: AluOp, a: u64, b: u64) -> u64 {
        match op {
            AluOp::Sll | AluOp::Srl | AluOp::Sra => shifts::execute_word(op, a, b),
            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt | AluOp::Sltu => {
                logic::execute::<crate::common::xlen::Rv64>(op, a, b)
            }
            _ => arithmetic::execute_word(op, a, b),
        }
    }
}
