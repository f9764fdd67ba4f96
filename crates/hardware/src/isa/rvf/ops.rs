//! Precision-generic FP handlers shared by the F and D extensions.
//!
//! Every handler raises an illegal-instruction trap while `mstatus.FS` is Off,
//! and every FP register write dirties FS through [`Hart::set_fpr`].

use super::opcodes as op;
use crate::common::data::MemWidth;
use crate::common::xlen::Xlen;
use crate::core::Hart;
use crate::core::units::fpu::rounding_modes::RoundingMode;
use crate::core::units::fpu::{FpOp, Fpu, Precision};
use crate::isa::decode::{i_imm, s_imm};
use crate::isa::instruction::InstructionBits;
use crate::isa::table::{c_illegal_insn, illegal_insn};

/// Value of the `fmt` field for `prec`.
const fn fmt_code(prec: Precision) -> u32 {
    match prec {
        Precision::Single => 0,
        Precision::Double => 1,
    }
}

const fn access_width(prec: Precision) -> MemWidth {
    match prec {
        Precision::Single => MemWidth::Word,
        Precision::Double => MemWidth::Double,
    }
}

/// True when `funct3` holds a rounding mode rather than an operation selector.
const fn is_rounded(op: FpOp) -> bool {
    !matches!(
        op,
        FpOp::SgnJ
            | FpOp::SgnJN
            | FpOp::SgnJX
            | FpOp::Min
            | FpOp::Max
            | FpOp::Eq
            | FpOp::Lt
            | FpOp::Le
            | FpOp::Class
            | FpOp::MvXF
            | FpOp::MvFX
    )
}

/// True when the first operand comes from an integer register.
const fn reads_integer(op: FpOp) -> bool {
    matches!(op, FpOp::CvtFW | FpOp::CvtFWu | FpOp::CvtFL | FpOp::CvtFLu | FpOp::MvFX)
}

/// Writes a loaded value into FP register `rd`.
#[inline(always)]
fn write_loaded<X: Xlen>(hart: &mut Hart<X>, rd: usize, val: u64, prec: Precision) {
    match prec {
        Precision::Single => hart.set_f32_bits(rd, val as u32),
        Precision::Double => hart.set_fpr(rd, val),
    }
}

/// FLW / FLD.
pub(crate) fn load<X: Xlen>(hart: &mut Hart<X>, insn: u32, prec: Precision) {
    if !hart.fp_enabled() {
        illegal_insn(hart, insn);
        return;
    }
    let addr = hart.x(insn.rs1()).wrapping_add(i_imm(insn) as u64);
    if let Some(val) = hart.load(addr, access_width(prec)) {
        write_loaded(hart, insn.rd(), val, prec);
    }
}

/// FSW / FSD. FSW stores the low 32 bits of the slot without checking the box.
pub(crate) fn store<X: Xlen>(hart: &mut Hart<X>, insn: u32, prec: Precision) {
    if !hart.fp_enabled() {
        illegal_insn(hart, insn);
        return;
    }
    let addr = hart.x(insn.rs1()).wrapping_add(s_imm(insn) as u64);
    let val = hart.f64_bits(insn.rs2());
    let _ = hart.store(addr, access_width(prec), val);
}

/// Compressed FP load from `base + offset` into `rd`.
pub(crate) fn c_load<X: Xlen>(
    hart: &mut Hart<X>,
    insn: u16,
    rd: usize,
    base: usize,
    offset: u64,
    prec: Precision,
) {
    if !hart.fp_enabled() {
        c_illegal_insn(hart, insn);
        return;
    }
    let addr = hart.x(base).wrapping_add(offset);
    if let Some(val) = hart.load(addr, access_width(prec)) {
        write_loaded(hart, rd, val, prec);
    }
}

/// Compressed FP store of `rs2` to `base + offset`.
pub(crate) fn c_store<X: Xlen>(
    hart: &mut Hart<X>,
    insn: u16,
    rs2: usize,
    base: usize,
    offset: u64,
    prec: Precision,
) {
    if !hart.fp_enabled() {
        c_illegal_insn(hart, insn);
        return;
    }
    let addr = hart.x(base).wrapping_add(offset);
    let val = hart.f64_bits(rs2);
    let _ = hart.store(addr, access_width(prec), val);
}

/// FMADD / FMSUB / FNMSUB / FNMADD. The slot covers every rounding mode.
pub(crate) fn fused<X: Xlen>(hart: &mut Hart<X>, insn: u32, op: FpOp, prec: Precision) {
    if !hart.fp_enabled() || insn.fmt() != fmt_code(prec) {
        illegal_insn(hart, insn);
        return;
    }
    let Some(rm) = hart.rounding_mode(insn.funct3()) else {
        illegal_insn(hart, insn);
        return;
    };
    let a = hart.f64_bits(insn.rs1());
    let b = hart.f64_bits(insn.rs2());
    let c = hart.f64_bits(insn.rs3());
    let (res, flags) = Fpu::execute(op, prec, a, b, c, rm);
    hart.set_fpr(insn.rd(), res);
    hart.accrue(flags);
}

/// Decodes the OP-FP group for `prec`.
///
/// Returns the operation and the precision its source operands are read at,
/// which differs from `prec` only for FCVT.S.D and FCVT.D.S.
fn decode_other<X: Xlen>(hart: &Hart<X>, insn: u32, prec: Precision) -> Option<(FpOp, Precision)> {
    let funct3 = insn.funct3();
    let rs2 = insn.rs2();
    let rv64 = X::VALUE == 64;
    let op = match insn.funct5() {
        op::FADD => FpOp::Add,
        op::FSUB => FpOp::Sub,
        op::FMUL => FpOp::Mul,
        op::FDIV => FpOp::Div,
        op::FSQRT if rs2 == 0 => FpOp::Sqrt,
        op::FSGNJ => match funct3 {
            0 => FpOp::SgnJ,
            1 => FpOp::SgnJN,
            2 => FpOp::SgnJX,
            _ => return None,
        },
        op::FMIN_MAX => match funct3 {
            0 => FpOp::Min,
            1 => FpOp::Max,
            _ => return None,
        },
        op::FCVT_FP => {
            return match (prec, rs2) {
                // FCVT.S.D sits in the single-precision slot but needs D.
                (Precision::Single, 1) if hart.extensions().d => {
                    Some((FpOp::CvtSD, Precision::Double))
                }
                (Precision::Double, 0) => Some((FpOp::CvtDS, Precision::Single)),
                _ => None,
            };
        }
        op::FCMP => match funct3 {
            0 => FpOp::Le,
            1 => FpOp::Lt,
            2 => FpOp::Eq,
            _ => return None,
        },
        op::FCVT_INT_FP => match rs2 {
            0 => FpOp::CvtWF,
            1 => FpOp::CvtWuF,
            2 if rv64 => FpOp::CvtLF,
            3 if rv64 => FpOp::CvtLuF,
            _ => return None,
        },
        op::FCVT_FP_INT => match rs2 {
            0 => FpOp::CvtFW,
            1 => FpOp::CvtFWu,
            2 if rv64 => FpOp::CvtFL,
            3 if rv64 => FpOp::CvtFLu,
            _ => return None,
        },
        // FMV.X.D and FMV.D.X need a 64-bit integer register.
        op::FMV_X_FCLASS if rs2 == 0 => match funct3 {
            0 if prec == Precision::Single || rv64 => FpOp::MvXF,
            1 => FpOp::Class,
            _ => return None,
        },
        op::FMV_FP_X if rs2 == 0 && funct3 == 0 && (prec == Precision::Single || rv64) => {
            FpOp::MvFX
        }
        _ => return None,
    };
    Some((op, prec))
}

/// The OP-FP group: arithmetic, sign injection, min/max, compares,
/// classification, conversions and moves.
pub(crate) fn other<X: Xlen>(hart: &mut Hart<X>, insn: u32, prec: Precision) {
    if !hart.fp_enabled() || insn.fmt() != fmt_code(prec) {
        illegal_insn(hart, insn);
        return;
    }
    let Some((op, src_prec)) = decode_other(hart, insn, prec) else {
        illegal_insn(hart, insn);
        return;
    };
    let rm = if is_rounded(op) {
        match hart.rounding_mode(insn.funct3()) {
            Some(rm) => rm,
            None => {
                illegal_insn(hart, insn);
                return;
            }
        }
    } else {
        RoundingMode::Rne
    };

    let a = if reads_integer(op) {
        hart.x(insn.rs1())
    } else {
        hart.f64_bits(insn.rs1())
    };
    let b = hart.f64_bits(insn.rs2());
    let (res, flags) = Fpu::execute(op, src_prec, a, b, 0, rm);
    if op.writes_integer() {
        hart.set_x(insn.rd(), res);
    } else {
        hart.set_fpr(insn.rd(), res);
    }
    hart.accrue(flags);
}
