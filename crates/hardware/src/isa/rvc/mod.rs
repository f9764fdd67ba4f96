//! RISC-V Compressed Extension (C).
//!
//! The C extension provides 16-bit compressed instructions to improve code
//! density. Compressed handlers execute directly on the 16-bit encoding
//! rather than expanding to a 32-bit instruction first. Reserved encodings
//! raise an illegal-instruction trap carrying the 16 instruction bits.
//!
//! # Structure
//!
//! - `opcodes`: Compressed dispatch identifiers.
//! - [`slots`]: Integer registrations for a given width. The compressed FP
//!   loads and stores are owned by the F and D modules.

/// Compressed dispatch identifiers.
pub mod opcodes;

use self::opcodes as op;
use crate::common::data::MemWidth;
use crate::common::error::Trap;
use crate::common::xlen::{Xlen, sext32};
use crate::core::Hart;
use crate::core::units::alu::{Alu, AluOp};
use crate::core::units::lsu::Lsu;
use crate::isa::abi::{REG_RA, REG_SP, REG_ZERO};
use crate::isa::decode::{
    cb_offset, ci_addi16sp_imm, ci_imm, ci_ldsp_offset, ci_lui_imm, ci_lwsp_offset, ci_shamt,
    ciw_imm, cj_offset, cl_double_offset, cl_word_offset, css_double_offset, css_word_offset,
};
use crate::isa::instruction::CompressedBits;
use crate::isa::table::{CompressedSlot, c_illegal_insn};

/// Bit 12 of a compressed encoding (`imm[5]`, `shamt[5]`, or a selector).
const BIT12: u16 = 1 << 12;

/// Registrations of the integer compressed instructions for width `X`.
pub fn slots<X: Xlen>() -> Vec<CompressedSlot<X>> {
    let mut slots = vec![
        CompressedSlot::new(op::C_ADDI4SPN, "c.addi4spn", c_addi4spn::<X>),
        CompressedSlot::new(op::C_LW, "c.lw", |h, i| {
            c_load(h, i.rd_p(), i.rs1_p(), cl_word_offset(i), MemWidth::Word);
        }),
        CompressedSlot::new(op::C_SW, "c.sw", |h, i| {
            c_store(h, i.rs2_p(), i.rs1_p(), cl_word_offset(i), MemWidth::Word);
        }),
        CompressedSlot::new(op::C_ADDI, "c.addi", c_addi::<X>),
        CompressedSlot::new(op::C_LI, "c.li", c_li::<X>),
        CompressedSlot::new(op::C_LUI_ADDI16SP, "c.lui/c.addi16sp", c_lui_addi16sp::<X>),
        CompressedSlot::new(op::C_MISC_ALU, "c.alu", c_misc_alu::<X>),
        CompressedSlot::new(op::C_J, "c.j", c_j::<X>),
        CompressedSlot::new(op::C_BEQZ, "c.beqz", |h, i| c_branch(h, i, true)),
        CompressedSlot::new(op::C_BNEZ, "c.bnez", |h, i| c_branch(h, i, false)),
        CompressedSlot::new(op::C_SLLI, "c.slli", c_slli::<X>),
        CompressedSlot::new(op::C_LWSP, "c.lwsp", |h, i| {
            c_load_sp(h, i, ci_lwsp_offset(i), MemWidth::Word);
        }),
        CompressedSlot::new(op::C_JR_MV_ADD, "c.jr/c.mv/c.add", c_jr_mv_add::<X>),
        CompressedSlot::new(op::C_SWSP, "c.swsp", |h, i| {
            c_store(h, i.c_rs2(), REG_SP, css_word_offset(i), MemWidth::Word);
        }),
    ];

    if X::VALUE == 64 {
        slots.extend([
            CompressedSlot::new(op::C_LD, "c.ld", |h, i| {
                c_load(h, i.rd_p(), i.rs1_p(), cl_double_offset(i), MemWidth::Double);
            }),
            CompressedSlot::new(op::C_SD, "c.sd", |h, i| {
                c_store(h, i.rs2_p(), i.rs1_p(), cl_double_offset(i), MemWidth::Double);
            }),
            CompressedSlot::new(op::C_ADDIW, "c.addiw", c_addiw::<X>),
            CompressedSlot::new(op::C_LDSP, "c.ldsp", |h, i| {
                c_load_sp(h, i, ci_ldsp_offset(i), MemWidth::Double);
            }),
            CompressedSlot::new(op::C_SDSP, "c.sdsp", |h, i| {
                c_store(h, i.c_rs2(), REG_SP, css_double_offset(i), MemWidth::Double);
            }),
        ]);
    } else {
        slots.push(CompressedSlot::new(op::C_JAL, "c.jal", c_jal::<X>));
    }
    slots
}

/// C.ADDI4SPN: `rd' = sp + nzuimm`. A zero immediate (including the
/// all-zero parcel) is reserved.
pub fn c_addi4spn<X: Xlen>(hart: &mut Hart<X>, insn: u16) {
    let imm = ciw_imm(insn);
    if imm == 0 {
        c_illegal_insn(hart, insn);
        return;
    }
    let val = hart.x(REG_SP).wrapping_add(imm);
    hart.set_x(insn.rd_p(), val);
}

/// Integer load; word loads sign-extend.
#[inline(always)]
fn c_load<X: Xlen>(hart: &mut Hart<X>, rd: usize, base: usize, offset: u64, width: MemWidth) {
    let addr = hart.x(base).wrapping_add(offset);
    if let Some(val) = hart.load(addr, width) {
        hart.set_x(rd, Lsu::extend(val, width, true));
    }
}

/// C.LWSP / C.LDSP; `rd = x0` is reserved.
#[inline(always)]
fn c_load_sp<X: Xlen>(hart: &mut Hart<X>, insn: u16, offset: u64, width: MemWidth) {
    let rd = insn.c_rd();
    if rd == REG_ZERO {
        c_illegal_insn(hart, insn);
        return;
    }
    c_load(hart, rd, REG_SP, offset, width);
}

#[inline(always)]
fn c_store<X: Xlen>(hart: &mut Hart<X>, rs2: usize, base: usize, offset: u64, width: MemWidth) {
    let addr = hart.x(base).wrapping_add(offset);
    let val = hart.x(rs2);
    let _ = hart.store(addr, width, val);
}

/// C.ADDI. `rd = x0` is C.NOP.
pub fn c_addi<X: Xlen>(hart: &mut Hart<X>, insn: u16) {
    let rd = insn.c_rd();
    let val = hart.x(rd).wrapping_add(ci_imm(insn) as u64);
    hart.set_x(rd, val);
}

/// C.ADDIW (RV64). `rd = x0` is reserved.
pub fn c_addiw<X: Xlen>(hart: &mut Hart<X>, insn: u16) {
    let rd = insn.c_rd();
    if rd == REG_ZERO {
        c_illegal_insn(hart, insn);
        return;
    }
    let val = sext32(hart.x(rd).wrapping_add(ci_imm(insn) as u64));
    hart.set_x(rd, val);
}

/// C.LI.
pub fn c_li<X: Xlen>(hart: &mut Hart<X>, insn: u16) {
    hart.set_x(insn.c_rd(), ci_imm(insn) as u64);
}

/// C.ADDI16SP when `rd = x2`, C.LUI otherwise. Zero immediates are reserved.
pub fn c_lui_addi16sp<X: Xlen>(hart: &mut Hart<X>, insn: u16) {
    let rd = insn.c_rd();
    if rd == REG_SP {
        let imm = ci_addi16sp_imm(insn);
        if imm == 0 {
            c_illegal_insn(hart, insn);
            return;
        }
        let val = hart.x(REG_SP).wrapping_add(imm as u64);
        hart.set_x(REG_SP, val);
    } else {
        let imm = ci_lui_imm(insn);
        if imm == 0 {
            c_illegal_insn(hart, insn);
            return;
        }
        hart.set_x(rd, imm as u64);
    }
}

/// Shift amount of C.SLLI/C.SRLI/C.SRAI, or `None` when `shamt[5]` is set on RV32.
#[inline(always)]
fn c_shamt<X: Xlen>(insn: u16) -> Option<u64> {
    let shamt = ci_shamt(insn);
    (shamt <= X::SHAMT_MASK).then_some(u64::from(shamt))
}

/// The CB/CA arithmetic group selected by bits 11:10 (and 12, 6:5).
pub fn c_misc_alu<X: Xlen>(hart: &mut Hart<X>, insn: u16) {
    let rd = insn.rs1_p();
    let a = hart.x(rd);
    let res = match (insn >> 10) & 0x3 {
        0b00 | 0b01 => {
            let Some(shamt) = c_shamt::<X>(insn) else {
                c_illegal_insn(hart, insn);
                return;
            };
            let op = if (insn >> 10) & 0x3 == 0 { AluOp::Srl } else { AluOp::Sra };
            Alu::execute::<X>(op, a, shamt)
        }
        0b10 => Alu::execute::<X>(AluOp::And, a, ci_imm(insn) as u64),
        _ => {
            let b = hart.x(insn.rs2_p());
            let word = insn & BIT12 != 0;
            match ((insn >> 5) & 0x3, word) {
                (0b00, false) => Alu::execute::<X>(AluOp::Sub, a, b),
                (0b01, false) => Alu::execute::<X>(AluOp::Xor, a, b),
                (0b10, false) => Alu::execute::<X>(AluOp::Or, a, b),
                (0b11, false) => Alu::execute::<X>(AluOp::And, a, b),
                (0b00, true) if X::VALUE == 64 => Alu::execute_word(AluOp::Sub, a, b),
                (0b01, true) if X::VALUE == 64 => Alu::execute_word(AluOp::Add, a, b),
                _ => {
                    c_illegal_insn(hart, insn);
                    return;
                }
            }
        }
    };
    hart.set_x(rd, res);
}

/// C.JAL (RV32): `ra = pc + 2`, jump PC-relative.
pub fn c_jal<X: Xlen>(hart: &mut Hart<X>, insn: u16) {
    let link = hart.next_pc();
    let target = hart.pc().wrapping_add(cj_offset(insn) as u64);
    if hart.jump(target) {
        hart.set_x(REG_RA, link);
    }
}

/// C.J.
pub fn c_j<X: Xlen>(hart: &mut Hart<X>, insn: u16) {
    let target = hart.pc().wrapping_add(cj_offset(insn) as u64);
    let _ = hart.jump(target);
}

/// C.BEQZ (`if_zero`) / C.BNEZ.
#[inline(always)]
fn c_branch<X: Xlen>(hart: &mut Hart<X>, insn: u16, if_zero: bool) {
    if (hart.x(insn.rs1_p()) == 0) == if_zero {
        let target = hart.pc().wrapping_add(cb_offset(insn) as u64);
        let _ = hart.jump(target);
    }
}

/// C.SLLI. `shamt[5]` set on RV32 is reserved.
pub fn c_slli<X: Xlen>(hart: &mut Hart<X>, insn: u16) {
    let Some(shamt) = c_shamt::<X>(insn) else {
        c_illegal_insn(hart, insn);
        return;
    };
    let rd = insn.c_rd();
    let val = Alu::execute::<X>(AluOp::Sll, hart.x(rd), shamt);
    hart.set_x(rd, val);
}

/// Quadrant-2 register group:
///
/// | bit 12 | rs1 | rs2 | instruction |
/// |--------|-----|-----|-------------|
/// | 0      | ≠0  | 0   | C.JR        |
/// | 0      | any | ≠0  | C.MV        |
/// | 1      | 0   | 0   | C.EBREAK    |
/// | 1      | ≠0  | 0   | C.JALR      |
/// | 1      | any | ≠0  | C.ADD       |
///
/// C.JR with `rs1 = x0` is reserved.
pub fn c_jr_mv_add<X: Xlen>(hart: &mut Hart<X>, insn: u16) {
    let rs1 = insn.c_rd();
    let rs2 = insn.c_rs2();
    let link_form = insn & BIT12 != 0;
    match (link_form, rs1, rs2) {
        (false, REG_ZERO, REG_ZERO) => c_illegal_insn(hart, insn),
        (false, _, REG_ZERO) => {
            let target = hart.x(rs1) & !1;
            let _ = hart.jump(target);
        }
        (false, _, _) => {
            let val = hart.x(rs2);
            hart.set_x(rs1, val);
        }
        (true, REG_ZERO, REG_ZERO) => {
            let pc = hart.pc();
            hart.raise(Trap::Breakpoint(pc));
        }
        (true, _, REG_ZERO) => {
            let link = hart.next_pc();
            let target = hart.x(rs1) & !1;
            if hart.jump(target) {
                hart.set_x(REG_RA, link);
            }
        }
        (true, _, _) => {
            let val = hart.x(rs1).wrapping_add(hart.x(rs2));
            hart.set_x(rs1, val);
        }
    }
}
