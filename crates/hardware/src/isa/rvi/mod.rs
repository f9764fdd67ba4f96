//! RISC-V Base Integer Instruction Set (I).
//!
//! Handlers for RV32I and RV64I. Every hart installs these when its decoder
//! is initialized.
//!
//! # Structure
//!
//! - `opcodes`: Dispatch identifiers.
//! - [`slots`]: The registrations for a given width. RV64 adds the `*W`
//!   instructions, LWU/LD/SD, and installs the shift immediates with both
//!   values of bit 25 (which holds `shamt[5]`).

/// Base integer dispatch identifiers.
pub mod opcodes;

use self::opcodes as op;
use crate::common::data::MemWidth;
use crate::common::xlen::{Xlen, sext32};
use crate::core::Hart;
use crate::core::units::alu::{Alu, AluOp};
use crate::core::units::lsu::Lsu;
use crate::core::units::lsu::ordering::Fence;
use crate::isa::decode::{b_imm, i_imm, j_imm, s_imm, u_imm};
use crate::isa::instruction::InstructionBits;
use crate::isa::table::{Slot, illegal_insn};

/// Registrations of the base integer set for width `X`.
pub fn slots<X: Xlen>() -> Vec<Slot<X>> {
    let mut slots = vec![
        Slot::uj(op::LUI, "lui", lui::<X>),
        Slot::uj(op::AUIPC, "auipc", auipc::<X>),
        Slot::uj(op::JAL, "jal", jal::<X>),
        Slot::isb(op::JALR, "jalr", jalr::<X>),
        Slot::isb(op::BEQ, "beq", |h, i| branch(h, i, |a, b| a == b)),
        Slot::isb(op::BNE, "bne", |h, i| branch(h, i, |a, b| a != b)),
        Slot::isb(op::BLT, "blt", |h, i| {
            branch(h, i, |a, b| X::to_signed(a) < X::to_signed(b));
        }),
        Slot::isb(op::BGE, "bge", |h, i| {
            branch(h, i, |a, b| X::to_signed(a) >= X::to_signed(b));
        }),
        Slot::isb(op::BLTU, "bltu", |h, i| branch(h, i, |a, b| a < b)),
        Slot::isb(op::BGEU, "bgeu", |h, i| branch(h, i, |a, b| a >= b)),
        Slot::isb(op::LB, "lb", |h, i| load(h, i, MemWidth::Byte, true)),
        Slot::isb(op::LH, "lh", |h, i| load(h, i, MemWidth::Half, true)),
        Slot::isb(op::LW, "lw", |h, i| load(h, i, MemWidth::Word, true)),
        Slot::isb(op::LBU, "lbu", |h, i| load(h, i, MemWidth::Byte, false)),
        Slot::isb(op::LHU, "lhu", |h, i| load(h, i, MemWidth::Half, false)),
        Slot::isb(op::SB, "sb", |h, i| store(h, i, MemWidth::Byte)),
        Slot::isb(op::SH, "sh", |h, i| store(h, i, MemWidth::Half)),
        Slot::isb(op::SW, "sw", |h, i| store(h, i, MemWidth::Word)),
        Slot::isb(op::ADDI, "addi", |h, i| op_imm(h, i, AluOp::Add)),
        Slot::isb(op::SLTI, "slti", |h, i| op_imm(h, i, AluOp::Slt)),
        Slot::isb(op::SLTIU, "sltiu", |h, i| op_imm(h, i, AluOp::Sltu)),
        Slot::isb(op::XORI, "xori", |h, i| op_imm(h, i, AluOp::Xor)),
        Slot::isb(op::ORI, "ori", |h, i| op_imm(h, i, AluOp::Or)),
        Slot::isb(op::ANDI, "andi", |h, i| op_imm(h, i, AluOp::And)),
        Slot::r(op::ADD_SUB, "add/sub", |h, i| op_reg_pair(h, i, AluOp::Add, AluOp::Sub)),
        Slot::r(op::SLL, "sll", |h, i| op_reg(h, i, AluOp::Sll)),
        Slot::r(op::SLT, "slt", |h, i| op_reg(h, i, AluOp::Slt)),
        Slot::r(op::SLTU, "sltu", |h, i| op_reg(h, i, AluOp::Sltu)),
        Slot::r(op::XOR, "xor", |h, i| op_reg(h, i, AluOp::Xor)),
        Slot::r(op::SRL_SRA, "srl/sra", |h, i| op_reg_pair(h, i, AluOp::Srl, AluOp::Sra)),
        Slot::r(op::OR, "or", |h, i| op_reg(h, i, AluOp::Or)),
        Slot::r(op::AND, "and", |h, i| op_reg(h, i, AluOp::And)),
        Slot::isb(op::FENCE, "fence", fence::<X>),
        Slot::isb(op::FENCE_I, "fence.i", fence_i::<X>),
    ];

    if X::VALUE == 64 {
        slots.extend([
            Slot::isb(op::SLLI, "slli", slli::<X>),
            Slot::isb(op::SRLI_SRAI, "srli/srai", srli_srai::<X>),
            Slot::isb(op::LWU, "lwu", |h, i| load(h, i, MemWidth::Word, false)),
            Slot::isb(op::LD, "ld", |h, i| load(h, i, MemWidth::Double, true)),
            Slot::isb(op::SD, "sd", |h, i| store(h, i, MemWidth::Double)),
            Slot::isb(op::ADDIW, "addiw", addiw::<X>),
            Slot::r(op::SLLIW, "slliw", |h, i| op_word_pair(h, i, AluOp::Sll, None, true)),
            Slot::r(op::SRLIW_SRAIW, "srliw/sraiw", |h, i| {
                op_word_pair(h, i, AluOp::Srl, Some(AluOp::Sra), true);
            }),
            Slot::r(op::ADDW_SUBW, "addw/subw", |h, i| {
                op_word_pair(h, i, AluOp::Add, Some(AluOp::Sub), false);
            }),
            Slot::r(op::SLLW, "sllw", |h, i| op_word_pair(h, i, AluOp::Sll, None, false)),
            Slot::r(op::SRLW_SRAW, "srlw/sraw", |h, i| {
                op_word_pair(h, i, AluOp::Srl, Some(AluOp::Sra), false);
            }),
        ]);
    } else {
        // Bit 25 is shamt[5] here, so the 0x124/0x1A4 twins stay illegal.
        slots.extend([
            Slot::r(op::SLLI, "slli", slli::<X>),
            Slot::r(op::SRLI_SRAI, "srli/srai", srli_srai::<X>),
        ]);
    }
    slots
}

/// LUI: `rd = imm << 12`.
pub fn lui<X: Xlen>(hart: &mut Hart<X>, insn: u32) {
    hart.set_x(insn.rd(), u_imm(insn) as u64);
}

/// AUIPC: `rd = pc + (imm << 12)`.
pub fn auipc<X: Xlen>(hart: &mut Hart<X>, insn: u32) {
    let val = hart.pc().wrapping_add(u_imm(insn) as u64);
    hart.set_x(insn.rd(), val);
}

/// JAL: link and jump PC-relative.
pub fn jal<X: Xlen>(hart: &mut Hart<X>, insn: u32) {
    let link = hart.next_pc();
    let target = hart.pc().wrapping_add(j_imm(insn) as u64);
    if hart.jump(target) {
        hart.set_x(insn.rd(), link);
    }
}

/// JALR: link and jump to `rs1 + imm` with bit 0 cleared.
pub fn jalr<X: Xlen>(hart: &mut Hart<X>, insn: u32) {
    if insn.funct3() != 0 {
        illegal_insn(hart, insn);
        return;
    }
    let link = hart.next_pc();
    let target = hart.x(insn.rs1()).wrapping_add(i_imm(insn) as u64) & !1;
    if hart.jump(target) {
        hart.set_x(insn.rd(), link);
    }
}

/// Conditional branch; `taken` compares the zero-extended sources.
#[inline(always)]
fn branch<X: Xlen>(hart: &mut Hart<X>, insn: u32, taken: impl Fn(u64, u64) -> bool) {
    if taken(hart.x(insn.rs1()), hart.x(insn.rs2())) {
        let target = hart.pc().wrapping_add(b_imm(insn) as u64);
        let _ = hart.jump(target);
    }
}

#[inline(always)]
fn load<X: Xlen>(hart: &mut Hart<X>, insn: u32, width: MemWidth, signed: bool) {
    let addr = hart.x(insn.rs1()).wrapping_add(i_imm(insn) as u64);
    if let Some(val) = hart.load(addr, width) {
        hart.set_x(insn.rd(), Lsu::extend(val, width, signed));
    }
}

#[inline(always)]
fn store<X: Xlen>(hart: &mut Hart<X>, insn: u32, width: MemWidth) {
    let addr = hart.x(insn.rs1()).wrapping_add(s_imm(insn) as u64);
    let val = hart.x(insn.rs2());
    let _ = hart.store(addr, width, val);
}

#[inline(always)]
fn op_imm<X: Xlen>(hart: &mut Hart<X>, insn: u32, op: AluOp) {
    let res = Alu::execute::<X>(op, hart.x(insn.rs1()), i_imm(insn) as u64);
    hart.set_x(insn.rd(), res);
}

/// SLLI. The upper six bits must be clear (five on RV32, where the slot
/// already excludes bit 25).
pub fn slli<X: Xlen>(hart: &mut Hart<X>, insn: u32) {
    if insn >> 26 != 0 {
        illegal_insn(hart, insn);
        return;
    }
    let shamt = u64::from((insn >> 20) & X::SHAMT_MASK);
    let res = Alu::execute::<X>(AluOp::Sll, hart.x(insn.rs1()), shamt);
    hart.set_x(insn.rd(), res);
}

/// SRLI / SRAI, selected by bit 30.
pub fn srli_srai<X: Xlen>(hart: &mut Hart<X>, insn: u32) {
    let op = match insn >> 26 {
        0 => AluOp::Srl,
        op::FUNCT6_SRAI => AluOp::Sra,
        _ => {
            illegal_insn(hart, insn);
            return;
        }
    };
    let shamt = u64::from((insn >> 20) & X::SHAMT_MASK);
    let res = Alu::execute::<X>(op, hart.x(insn.rs1()), shamt);
    hart.set_x(insn.rd(), res);
}

/// Register-register operation with a single encoding (funct7 must be zero).
#[inline(always)]
fn op_reg<X: Xlen>(hart: &mut Hart<X>, insn: u32, op: AluOp) {
    if insn.funct7() != 0 {
        illegal_insn(hart, insn);
        return;
    }
    let res = Alu::execute::<X>(op, hart.x(insn.rs1()), hart.x(insn.rs2()));
    hart.set_x(insn.rd(), res);
}

/// Register-register pair sharing a slot: funct7 zero selects `base`,
/// `0100000` selects `alt`, anything else is illegal.
#[inline(always)]
fn op_reg_pair<X: Xlen>(hart: &mut Hart<X>, insn: u32, base: AluOp, alt: AluOp) {
    let op = match insn.funct7() {
        0 => base,
        op::FUNCT7_ALT => alt,
        _ => {
            illegal_insn(hart, insn);
            return;
        }
    };
    let res = Alu::execute::<X>(op, hart.x(insn.rs1()), hart.x(insn.rs2()));
    hart.set_x(insn.rd(), res);
}

/// ADDIW: 32-bit add, sign-extended.
pub fn addiw<X: Xlen>(hart: &mut Hart<X>, insn: u32) {
    let res = sext32(hart.x(insn.rs1()).wrapping_add(i_imm(insn) as u64));
    hart.set_x(insn.rd(), res);
}

/// RV64 `*W` operation. `imm` takes the second operand from the 5-bit shamt field.
#[inline(always)]
fn op_word_pair<X: Xlen>(hart: &mut Hart<X>, insn: u32, base: AluOp, alt: Option<AluOp>, imm: bool) {
    let op = match (insn.funct7(), alt) {
        (0, _) => base,
        (op::FUNCT7_ALT, Some(alt)) => alt,
        _ => {
            illegal_insn(hart, insn);
            return;
        }
    };
    let b = if imm {
        u64::from((insn >> 20) & 0x1F)
    } else {
        hart.x(insn.rs2())
    };
    let res = Alu::execute_word(op, hart.x(insn.rs1()), b);
    hart.set_x(insn.rd(), res);
}

/// FENCE: any non-empty predecessor/successor pair is a full fence.
pub fn fence<X: Xlen>(_hart: &mut Hart<X>, insn: u32) {
    Fence::decode(insn).issue();
}

/// FENCE.I: instruction memory is always coherent in an interpreter.
pub const fn fence_i<X: Xlen>(_hart: &mut Hart<X>, _insn: u32) {}
