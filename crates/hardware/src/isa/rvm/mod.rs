//! RISC-V Multiply/Divide Extension (M).
//!
//! The 'M' extension adds instructions for integer multiplication and division.
//! These instructions share the OP opcode with base integer arithmetic but are
//! distinguished by the `funct7` field being set to 1. Division by zero and
//! signed overflow produce the fixed results defined by the ISA; neither traps.
//!
//! # Structure
//!
//! - `opcodes`: Dispatch identifiers.
//! - [`slots`]: Registrations; RV64 adds the `*W` forms.

/// Multiply/divide dispatch identifiers.
pub mod opcodes;

use self::opcodes as op;
use crate::common::xlen::Xlen;
use crate::core::Hart;
use crate::core::units::alu::{Alu, AluOp};
use crate::isa::instruction::InstructionBits;
use crate::isa::table::{Slot, illegal_insn};

/// Registrations of the M extension for width `X`.
pub fn slots<X: Xlen>() -> Vec<Slot<X>> {
    let mut slots = vec![
        Slot::r(op::MUL, "mul", |h, i| muldiv(h, i, AluOp::Mul)),
        Slot::r(op::MULH, "mulh", |h, i| muldiv(h, i, AluOp::Mulh)),
        Slot::r(op::MULHSU, "mulhsu", |h, i| muldiv(h, i, AluOp::Mulhsu)),
        Slot::r(op::MULHU, "mulhu", |h, i| muldiv(h, i, AluOp::Mulhu)),
        Slot::r(op::DIV, "div", |h, i| muldiv(h, i, AluOp::Div)),
        Slot::r(op::DIVU, "divu", |h, i| muldiv(h, i, AluOp::Divu)),
        Slot::r(op::REM, "rem", |h, i| muldiv(h, i, AluOp::Rem)),
        Slot::r(op::REMU, "remu", |h, i| muldiv(h, i, AluOp::Remu)),
    ];
    if X::VALUE == 64 {
        slots.extend([
            Slot::r(op::MULW, "mulw", |h, i| muldiv_word(h, i, AluOp::Mul)),
            Slot::r(op::DIVW, "divw", |h, i| muldiv_word(h, i, AluOp::Div)),
            Slot::r(op::DIVUW, "divuw", |h, i| muldiv_word(h, i, AluOp::Divu)),
            Slot::r(op::REMW, "remw", |h, i| muldiv_word(h, i, AluOp::Rem)),
            Slot::r(op::REMUW, "remuw", |h, i| muldiv_word(h, i, AluOp::Remu)),
        ]);
    }
    slots
}

#[inline(always)]
fn muldiv<X: Xlen>(hart: &mut Hart<X>, insn: u32, op: AluOp) {
    if insn.funct7() != op::FUNCT7_MULDIV {
        illegal_insn(hart, insn);
        return;
    }
    let res = Alu::execute::<X>(op, hart.x(insn.rs1()), hart.x(insn.rs2()));
    hart.set_x(insn.rd(), res);
}

#[inline(always)]
fn muldiv_word<X: Xlen>(hart: &mut Hart<X>, insn: u32, op: AluOp) {
    if insn.funct7() != op::FUNCT7_MULDIV {
        illegal_insn(hart, insn);
        return;
    }
    let res = Alu::execute_word(op, hart.x(insn.rs1()), hart.x(insn.rs2()));
    hart.set_x(insn.rd(), res);
}
