//! RISC-V Double-Precision Floating-Point Extension (D).
//!
//! Binds the shared FP handlers to the double-precision slots. On RV32 the
//! 64-bit moves between integer and FP registers are illegal, and FCVT.L/LU
//! forms are RV64-only; both are filtered inside the shared OP-FP decoder.

/// Double-precision dispatch identifiers.
pub mod opcodes;

use self::opcodes as op;
use crate::common::xlen::Xlen;
use crate::core::units::fpu::{FpOp, Precision};
use crate::isa::abi::REG_SP;
use crate::isa::decode::{ci_ldsp_offset, cl_double_offset, css_double_offset};
use crate::isa::instruction::CompressedBits;
use crate::isa::rvf::ops;
use crate::isa::table::{CompressedSlot, Slot};

/// Registrations of the D extension.
pub fn slots<X: Xlen>() -> [Slot<X>; 7] {
    const D: Precision = Precision::Double;
    [
        Slot::isb(op::FLD, "fld", |h, i| ops::load(h, i, D)),
        Slot::isb(op::FSD, "fsd", |h, i| ops::store(h, i, D)),
        Slot::r_all_funct3(op::FMADD, "fmadd.d", |h, i| ops::fused(h, i, FpOp::MAdd, D)),
        Slot::r_all_funct3(op::FMSUB, "fmsub.d", |h, i| ops::fused(h, i, FpOp::MSub, D)),
        Slot::r_all_funct3(op::FNMSUB, "fnmsub.d", |h, i| ops::fused(h, i, FpOp::NMSub, D)),
        Slot::r_all_funct3(op::FNMADD, "fnmadd.d", |h, i| ops::fused(h, i, FpOp::NMAdd, D)),
        Slot::r_all_funct3(op::OTHER, "op-fp.d", |h, i| ops::other(h, i, D)),
    ]
}

/// Registrations of the compressed double-precision loads and stores.
pub fn compressed_slots<X: Xlen>() -> [CompressedSlot<X>; 4] {
    const D: Precision = Precision::Double;
    [
        CompressedSlot::new(op::C_FLD, "c.fld", |h, i| {
            ops::c_load(h, i, i.rd_p(), i.rs1_p(), cl_double_offset(i), D);
        }),
        CompressedSlot::new(op::C_FSD, "c.fsd", |h, i| {
            ops::c_store(h, i, i.rs2_p(), i.rs1_p(), cl_double_offset(i), D);
        }),
        CompressedSlot::new(op::C_FLDSP, "c.fldsp", |h, i| {
            ops::c_load(h, i, i.c_rd(), REG_SP, ci_ldsp_offset(i), D);
        }),
        CompressedSlot::new(op::C_FSDSP, "c.fsdsp", |h, i| {
            ops::c_store(h, i, i.c_rs2(), REG_SP, css_double_offset(i), D);
        }),
    ]
}
