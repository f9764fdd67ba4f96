//! RISC-V Single-Precision Floating-Point Extension (F).
//!
//! Single-precision values live NaN-boxed in the 64-bit FP registers. The
//! handlers themselves are shared with D and live in [`ops`]; this module
//! only binds them to the single-precision slots.
//!
//! # Structure
//!
//! - `opcodes`: Dispatch identifiers and `funct5` operation codes.
//! - `ops`: Precision-generic FP handlers.

/// Single-precision dispatch identifiers and operation codes.
pub mod opcodes;

/// FP handlers shared with the D extension.
pub(crate) mod ops;

use self::opcodes as op;
use crate::common::xlen::Xlen;
use crate::core::units::fpu::{FpOp, Precision};
use crate::isa::abi::REG_SP;
use crate::isa::decode::{ci_lwsp_offset, cl_word_offset, css_word_offset};
use crate::isa::instruction::CompressedBits;
use crate::isa::table::{CompressedSlot, Slot};

/// Registrations of the F extension.
pub fn slots<X: Xlen>() -> [Slot<X>; 7] {
    const S: Precision = Precision::Single;
    [
        Slot::isb(op::FLW, "flw", |h, i| ops::load(h, i, S)),
        Slot::isb(op::FSW, "fsw", |h, i| ops::store(h, i, S)),
        Slot::r_all_funct3(op::FMADD, "fmadd.s", |h, i| ops::fused(h, i, FpOp::MAdd, S)),
        Slot::r_all_funct3(op::FMSUB, "fmsub.s", |h, i| ops::fused(h, i, FpOp::MSub, S)),
        Slot::r_all_funct3(op::FNMSUB, "fnmsub.s", |h, i| ops::fused(h, i, FpOp::NMSub, S)),
        Slot::r_all_funct3(op::FNMADD, "fnmadd.s", |h, i| ops::fused(h, i, FpOp::NMAdd, S)),
        Slot::r_all_funct3(op::OTHER, "op-fp.s", |h, i| ops::other(h, i, S)),
    ]
}

/// Registrations of the compressed single-precision loads and stores.
///
/// Empty on RV64, where these slots hold C.LD/C.SD/C.LDSP/C.SDSP.
pub fn compressed_slots<X: Xlen>() -> Vec<CompressedSlot<X>> {
    const S: Precision = Precision::Single;
    if X::VALUE != 32 {
        return Vec::new();
    }
    vec![
        CompressedSlot::new(op::C_FLW, "c.flw", |h, i| {
            ops::c_load(h, i, i.rd_p(), i.rs1_p(), cl_word_offset(i), S);
        }),
        CompressedSlot::new(op::C_FSW, "c.fsw", |h, i| {
            ops::c_store(h, i, i.rs2_p(), i.rs1_p(), cl_word_offset(i), S);
        }),
        CompressedSlot::new(op::C_FLWSP, "c.flwsp", |h, i| {
            ops::c_load(h, i, i.c_rd(), REG_SP, ci_lwsp_offset(i), S);
        }),
        CompressedSlot::new(op::C_FSWSP, "c.fswsp", |h, i| {
            ops::c_store(h, i, i.c_rs2(), REG_SP, css_word_offset(i), S);
        }),
    ]
}
