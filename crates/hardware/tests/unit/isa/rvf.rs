//! Single-Precision Floating-Point Tests.
//!
//! Loads box, stores write the raw low word, arithmetic goes through the
//! instruction or dynamic rounding mode, and compares/conversions/moves
//! land in integer registers with sign extension. Reserved encodings and
//! RV64-only forms trap on RV32.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvhart_core::common::{Rv32, Rv64, Trap, Xlen};
use rvhart_core::config::ExtensionConfig;
use rvhart_core::core::BatchExit;
use rvhart_core::core::units::fpu::exception_flags::FpFlags;
use rvhart_core::core::units::fpu::nan_handling::{CANONICAL_NAN_F32, box_f32, box_f32_bits};

use crate::common::builder::instruction::{self as enc, FMT_S, RM_DYN, c};
use crate::common::harness::{DATA_BASE, RAM_BASE, TestContext};

const FNMADD: u32 = 0b100_1111;

fn illegal(insn: u32) -> BatchExit {
    BatchExit::Trap(Trap::IllegalInstruction(insn))
}

fn fflags<X: Xlen>(ctx: &TestContext<X>) -> u8 {
    ctx.hart.csr().fflags()
}

// ─── Loads and stores ────────────────────────────────────────────────────────

#[test]
fn flw_boxes_the_loaded_word() {
    let mut ctx = TestContext::<Rv64>::new();
    ctx.write_mem(DATA_BASE + 8, 4, u64::from(1.0f32.to_bits()));
    ctx.set_x(1, DATA_BASE);
    let _ = ctx.exec(enc::flw(2, 1, 8));
    assert_eq!(ctx.hart.f64_bits(2), 0xFFFF_FFFF_3F80_0000);
}

#[test]
fn fsw_stores_the_raw_low_word() {
    let mut ctx = TestContext::<Rv64>::new();
    ctx.write_mem(DATA_BASE, 8, 0xAAAA_AAAA_AAAA_AAAA);
    ctx.hart.fpr_mut().write(2, 0x1234_5678_9ABC_DEF0);
    ctx.set_x(1, DATA_BASE);
    let out = ctx.exec(enc::fsw(2, 1, 0));
    assert_eq!(out.retired, 1);
    assert_eq!(ctx.read_mem(DATA_BASE, 8), 0xAAAA_AAAA_9ABC_DEF0);
}

#[test]
fn flw_fault_traps_without_writing() {
    let mut ctx = TestContext::<Rv64>::new();
    ctx.hart.fpr_mut().write(2, 42);
    ctx.set_x(1, 0x10);
    let out = ctx.exec(enc::flw(2, 1, 0));
    assert_eq!(out.exit, BatchExit::Trap(Trap::LoadAccessFault(0x10)));
    assert_eq!(ctx.hart.f64_bits(2), 42);
}

// ─── Arithmetic ──────────────────────────────────────────────────────────────

#[test]
fn fadd_s_exact() {
    let mut ctx = TestContext::<Rv64>::new();
    ctx.hart.set_fpr(1, box_f32(1.5));
    ctx.hart.set_fpr(2, box_f32(2.25));
    let _ = ctx.exec(enc::fadd_s(3, 1, 2, RM_DYN));
    assert_eq!(ctx.hart.f64_bits(3), box_f32(3.75));
    assert_eq!(fflags(&ctx), 0);
}

#[test]
fn fadd_s_inexact_sets_nx() {
    let mut ctx = TestContext::<Rv32>::new();
    ctx.hart.set_fpr(1, box_f32(1.0));
    ctx.hart.set_fpr(2, box_f32(1.0e-10));
    let _ = ctx.exec(enc::fadd_s(3, 1, 2, 0));
    assert_eq!(ctx.hart.f64_bits(3), box_f32(1.0));
    assert_eq!(fflags(&ctx), FpFlags::NX.bits());
}

#[test]
fn flags_accumulate_across_instructions() {
    let mut ctx = TestContext::<Rv64>::new().load_program(&[
        enc::fdiv_s(3, 1, 0, RM_DYN),
        enc::fadd_s(4, 1, 2, RM_DYN),
    ]);
    ctx.hart.set_fpr(0, box_f32(0.0));
    ctx.hart.set_fpr(1, box_f32(1.0));
    ctx.hart.set_fpr(2, box_f32(1.0e-10));
    let out = ctx.run(2);
    assert_eq!(out.retired, 2);
    assert_eq!(fflags(&ctx), (FpFlags::DZ | FpFlags::NX).bits());
    assert_eq!(ctx.hart.f64_bits(3), box_f32(f32::INFINITY));
}

#[test]
fn fmadd_s_uses_dynamic_rounding() {
    let mut ctx = TestContext::<Rv64>::new();
    ctx.hart.csr_mut().set_frm(1);
    ctx.hart.set_fpr(1, box_f32(2.0));
    ctx.hart.set_fpr(2, box_f32(3.0));
    ctx.hart.set_fpr(3, box_f32(1.0));
    let _ = ctx.exec(enc::fmadd_s(4, 1, 2, 3, RM_DYN));
    assert_eq!(ctx.hart.f64_bits(4), box_f32(7.0));
}

#[test]
fn fnmadd_s_negates_product_and_addend() {
    let mut ctx = TestContext::<Rv64>::new();
    ctx.hart.set_fpr(1, box_f32(2.0));
    ctx.hart.set_fpr(2, box_f32(3.0));
    ctx.hart.set_fpr(3, box_f32(1.0));
    let _ = ctx.exec(enc::r4_type(FNMADD, 4, 0, 1, 2, FMT_S, 3));
    assert_eq!(ctx.hart.f64_bits(4), box_f32(-7.0));
}

#[test]
fn sign_injection_and_min() {
    let mut ctx = TestContext::<Rv64>::new().load_program(&[
        enc::op_fp(0b00100, FMT_S, 3, 0b001, 1, 1),
        enc::op_fp(0b00101, FMT_S, 4, 0b000, 5, 2),
    ]);
    ctx.hart.set_fpr(1, box_f32(1.5));
    ctx.hart.set_fpr(2, box_f32(2.0));
    ctx.hart.set_f32_bits(5, CANONICAL_NAN_F32);
    let _ = ctx.run(2);
    assert_eq!(ctx.hart.f64_bits(3), box_f32(-1.5));
    assert_eq!(ctx.hart.f64_bits(4), box_f32(2.0));
    assert_eq!(fflags(&ctx), 0);
}

// ─── Compares, classify, moves ───────────────────────────────────────────────

#[test]
fn feq_is_quiet_and_flt_signals_on_nan() {
    let mut ctx = TestContext::<Rv64>::new().load_program(&[
        enc::feq_s(3, 1, 2),
        enc::op_fp(0b10100, FMT_S, 4, 0b001, 1, 2),
    ]);
    ctx.hart.set_fpr(1, box_f32(1.0));
    ctx.hart.set_f32_bits(2, CANONICAL_NAN_F32);
    ctx.set_x(3, 9);
    ctx.set_x(4, 9);
    let _ = ctx.run(1);
    assert_eq!(ctx.x(3), 0);
    assert_eq!(fflags(&ctx), 0);
    let _ = ctx.run(1);
    assert_eq!(ctx.x(4), 0);
    assert_eq!(fflags(&ctx), FpFlags::NV.bits());
}

#[test]
fn fclass_of_negative_infinity() {
    let mut ctx = TestContext::<Rv32>::new();
    ctx.hart.set_fpr(1, box_f32(f32::NEG_INFINITY));
    let _ = ctx.exec(enc::fclass_s(2, 1));
    assert_eq!(ctx.x(2), 1);
}

#[test]
fn fmv_w_x_boxes_low_word() {
    let mut ctx = TestContext::<Rv64>::new();
    ctx.set_x(1, 0xDEAD_BEEF_3F80_0000);
    let _ = ctx.exec(enc::fmv_w_x(2, 1));
    assert_eq!(ctx.hart.f64_bits(2), box_f32_bits(0x3F80_0000));
}

#[test]
fn fmv_x_w_on_rv32_keeps_raw_bits() {
    let mut ctx = TestContext::<Rv32>::new();
    ctx.hart.set_f32_bits(1, 0xBF80_0000);
    let _ = ctx.exec(enc::fmv_x_w(2, 1));
    assert_eq!(ctx.x(2), 0xBF80_0000);
}

// ─── Conversions ─────────────────────────────────────────────────────────────

#[rstest]
#[case::rne(0, 2.5, 2)]
#[case::rtz(1, -2.7, -2)]
#[case::rdn(2, -2.1, -3)]
#[case::rup(3, 2.1, 3)]
#[case::rmm(4, 2.5, 3)]
fn fcvt_w_s_honours_static_rounding(#[case] rm: u32, #[case] val: f32, #[case] expected: i64) {
    let mut ctx = TestContext::<Rv64>::new();
    ctx.hart.set_fpr(1, box_f32(val));
    let out = ctx.exec(enc::fcvt_w_s(2, 1, rm));
    assert_eq!(out.retired, 1);
    assert_eq!(ctx.x(2) as i64, expected);
    assert_eq!(fflags(&ctx), FpFlags::NX.bits());
}

#[test]
fn fcvt_w_s_of_nan_saturates_high() {
    let mut ctx = TestContext::<Rv64>::new();
    ctx.hart.set_f32_bits(1, CANONICAL_NAN_F32);
    let _ = ctx.exec(enc::fcvt_w_s(2, 1, 1));
    assert_eq!(ctx.x(2), 0x7FFF_FFFF);
    assert_eq!(fflags(&ctx), FpFlags::NV.bits());
}

#[test]
fn fcvt_wu_s_of_negative_saturates_to_zero() {
    let mut ctx = TestContext::<Rv64>::new();
    ctx.hart.set_fpr(1, box_f32(-1.0));
    ctx.set_x(2, 5);
    let _ = ctx.exec(enc::op_fp(0b11000, FMT_S, 2, 1, 1, 1));
    assert_eq!(ctx.x(2), 0);
    assert_eq!(fflags(&ctx), FpFlags::NV.bits());
}

#[test]
fn fcvt_s_w_reads_signed_word() {
    let mut ctx = TestContext::<Rv64>::new();
    ctx.set_x(1, (-7i64) as u64);
    let _ = ctx.exec(enc::fcvt_s_w(2, 1, RM_DYN));
    assert_eq!(ctx.hart.f64_bits(2), box_f32(-7.0));
}

#[test]
fn fcvt_l_s_on_rv64() {
    let mut ctx = TestContext::<Rv64>::new();
    ctx.hart.set_fpr(1, box_f32(1_099_511_627_776.0));
    let _ = ctx.exec(enc::fcvt_l_s(2, 1, 1));
    assert_eq!(ctx.x(2), 1 << 40);
}

#[test]
fn fcvt_l_s_is_illegal_on_rv32() {
    let mut ctx = TestContext::<Rv32>::new();
    let insn = enc::fcvt_l_s(2, 1, 1);
    assert_eq!(ctx.exec(insn).exit, illegal(insn));
}

#[test]
fn fcvt_s_d_needs_d() {
    let mut ctx = TestContext::<Rv64>::with_extensions(ExtensionConfig {
        d: false,
        ..ExtensionConfig::ALL
    });
    ctx.hart.set_fpr(1, 1.0f64.to_bits());
    let insn = enc::fcvt_s_d(2, 1, RM_DYN);
    assert_eq!(ctx.exec(insn).exit, illegal(insn));
}

// ─── Reserved encodings ──────────────────────────────────────────────────────

#[rstest]
#[case::fmt_h(enc::op_fp(0b00000, 0b10, 3, 0, 1, 2))]
#[case::fsqrt_rs2(enc::op_fp(0b01011, FMT_S, 3, 0, 1, 1))]
#[case::fsgnj_funct3(enc::op_fp(0b00100, FMT_S, 3, 0b011, 1, 2))]
#[case::fmin_funct3(enc::op_fp(0b00101, FMT_S, 3, 0b010, 1, 2))]
#[case::fcmp_funct3(enc::op_fp(0b10100, FMT_S, 3, 0b011, 1, 2))]
#[case::fmv_funct3(enc::op_fp(0b11110, FMT_S, 3, 0b001, 1, 0))]
#[case::unknown_funct5(enc::op_fp(0b01111, FMT_S, 3, 0, 1, 2))]
#[case::reserved_rm(enc::fadd_s(3, 1, 2, 5))]
fn reserved_op_fp_encodings(#[case] insn: u32) {
    let mut ctx = TestContext::<Rv64>::new();
    assert_eq!(ctx.exec(insn).exit, illegal(insn));
}

#[test]
fn f_disabled_traps() {
    let mut ctx = TestContext::<Rv64>::with_extensions(ExtensionConfig {
        f: false,
        d: false,
        ..ExtensionConfig::ALL
    });
    let insn = enc::flw(1, 0, 0);
    assert_eq!(ctx.exec(insn).exit, illegal(insn));
}

// ─── Compressed ──────────────────────────────────────────────────────────────

#[test]
fn c_flw_on_rv32() {
    let mut ctx = TestContext::<Rv32>::new();
    ctx.write_mem(DATA_BASE + 4, 4, u64::from(2.5f32.to_bits()));
    ctx.set_x(8, DATA_BASE);
    let out = ctx.exec_c(c::flw(9, 8, 4));
    assert_eq!(out.retired, 1);
    assert_eq!(ctx.hart.f64_bits(9), box_f32(2.5));
    assert_eq!(ctx.hart.pc(), RAM_BASE + 2);
}

#[test]
fn compressed_single_slots_exist_only_on_rv32() {
    let rv32 = TestContext::<Rv32>::new();
    let rv64 = TestContext::<Rv64>::new();
    assert_eq!(rv32.hart.table().compressed_name(0x0C), "c.flw");
    assert_eq!(rv32.hart.table().compressed_name(0x1E), "c.fswsp");
    assert_eq!(rv64.hart.table().compressed_name(0x0C), "c.ld");
    assert_eq!(rv64.hart.table().compressed_name(0x1E), "c.sdsp");
}
