//! Floating-Point Unit (FPU).
//!
//! This module implements the floating-point arithmetic used by the F and D
//! handlers. It covers single-precision (F) and double-precision (D)
//! arithmetic, fused multiply-add, comparisons, classification, and
//! conversions between integer and floating-point formats.
//!
//! Operands and results are raw 64-bit register slots: single-precision
//! values are NaN-boxed, integer operands and results are sign-extended
//! 64-bit values that the caller truncates to XLEN. Every operation returns
//! the accrued exception flags it raised.
//!
//! Operations are organized into submodules:
//! - [`nan_handling`]: NaN boxing/unboxing, classification, canonical NaN propagation.
//! - [`rounding_modes`]: Rounding mode decoding and directed rounding.
//! - [`exception_flags`]: Exception flag type.

/// NaN boxing, unboxing, and canonical NaN propagation.
pub mod nan_handling;

/// Rounding mode definitions and support.
pub mod rounding_modes;

/// Floating-point exception flag types.
pub mod exception_flags;

use self::exception_flags::FpFlags;
use self::nan_handling::{
    box_f32, canonicalize_f32, canonicalize_f64, classify_f32, classify_f64, fmax_f32, fmax_f64,
    fmin_f32, fmin_f64, is_snan_f32, is_snan_f64, unbox_f32,
};
use self::rounding_modes::{RoundingMode, round_directed, round_pair_to_f32, round_to_f32};
use crate::common::xlen::sext32;

/// Bit mask for the sign bit in a 32-bit IEEE 754 float (bit 31).
const F32_SIGN_BIT: u32 = 0x8000_0000;

/// Bit mask for the sign bit in a 64-bit IEEE 754 float (bit 63).
const F64_SIGN_BIT: u64 = 0x8000_0000_0000_0000;

/// Operand precision of an FP instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Precision {
    /// IEEE 754 binary32, NaN-boxed in the register file.
    Single,
    /// IEEE 754 binary64.
    Double,
}

/// Floating-point operation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FpOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Square root of `a`.
    Sqrt,
    /// IEEE 754-2008 minNum.
    Min,
    /// IEEE 754-2008 maxNum.
    Max,
    /// `a * b + c`.
    MAdd,
    /// `a * b - c`.
    MSub,
    /// `-(a * b) - c`.
    NMAdd,
    /// `-(a * b) + c`.
    NMSub,
    /// Sign injection: sign of `b`.
    SgnJ,
    /// Sign injection: negated sign of `b`.
    SgnJN,
    /// Sign injection: XOR of signs.
    SgnJX,
    /// Quiet equality.
    Eq,
    /// Signaling less-than.
    Lt,
    /// Signaling less-or-equal.
    Le,
    /// Class mask.
    Class,
    /// Float to signed 32-bit integer.
    CvtWF,
    /// Float to unsigned 32-bit integer.
    CvtWuF,
    /// Float to signed 64-bit integer.
    CvtLF,
    /// Float to unsigned 64-bit integer.
    CvtLuF,
    /// Signed 32-bit integer to float.
    CvtFW,
    /// Unsigned 32-bit integer to float.
    CvtFWu,
    /// Signed 64-bit integer to float.
    CvtFL,
    /// Unsigned 64-bit integer to float.
    CvtFLu,
    /// Double to single (only meaningful with [`Precision::Double`] input).
    CvtSD,
    /// Single to double (only meaningful with [`Precision::Single`] input).
    CvtDS,
    /// Move raw bits to an integer register.
    MvXF,
    /// Move raw bits from an integer register.
    MvFX,
}

impl FpOp {
    /// True when the destination is an integer register.
    pub const fn writes_integer(self) -> bool {
        matches!(
            self,
            Self::Eq
                | Self::Lt
                | Self::Le
                | Self::Class
                | Self::CvtWF
                | Self::CvtWuF
                | Self::CvtLF
                | Self::CvtLuF
                | Self::MvXF
        )
    }
}

/// Integer format of a float-to-int conversion.
#[derive(Clone, Copy, Debug)]
enum IntKind {
    Word,
    WordUnsigned,
    Long,
    LongUnsigned,
}

impl IntKind {
    /// Inclusive lower and exclusive upper bound of the rounded value.
    const fn range(self) -> (f64, f64) {
        match self {
            Self::Word => (-2_147_483_648.0, 2_147_483_648.0),
            Self::WordUnsigned => (0.0, 4_294_967_296.0),
            Self::Long => (-9_223_372_036_854_775_808.0, 9_223_372_036_854_775_808.0),
            Self::LongUnsigned => (0.0, 18_446_744_073_709_551_616.0),
        }
    }

    /// Saturated result for values below the range.
    const fn min_result(self) -> u64 {
        match self {
            Self::Word => i32::MIN as i64 as u64,
            Self::Long => i64::MIN as u64,
            Self::WordUnsigned | Self::LongUnsigned => 0,
        }
    }

    /// Saturated result for NaN and values above the range.
    const fn max_result(self) -> u64 {
        match self {
            Self::Word => i32::MAX as u64,
            Self::Long => i64::MAX as u64,
            // 32-bit results are sign-extended, so 0xFFFF_FFFF becomes all ones.
            Self::WordUnsigned | Self::LongUnsigned => u64::MAX,
        }
    }

    /// Converts an in-range integral value.
    fn cast(self, r: f64) -> u64 {
        match self {
            Self::Word => r as i32 as i64 as u64,
            Self::WordUnsigned => sext32(u64::from(r as u32)),
            Self::Long => r as i64 as u64,
            Self::LongUnsigned => r as u64,
        }
    }
}

/// Floating-Point Unit (FPU) for floating-point operations.
///
/// Implements all RISC-V floating-point operations including arithmetic,
/// comparisons, conversions, and fused multiply-add operations from
/// the F (single-precision) and D (double-precision) extensions.
#[derive(Debug)]
pub struct Fpu;

impl Fpu {
    /// Executes a floating-point operation.
    ///
    /// All f32 inputs are validated for proper NaN boxing. All NaN results
    /// are replaced with the canonical quiet NaN.
    ///
    /// # Arguments
    ///
    /// * `op`   - The floating-point operation to perform.
    /// * `prec` - Precision of the floating-point operands.
    /// * `a`    - First operand: an FP slot, or the integer source for int-to-float.
    /// * `b`    - Second operand (FP slot).
    /// * `c`    - Third operand for FMA operations (FP slot).
    /// * `rm`   - The effective rounding mode.
    ///
    /// # Returns
    ///
    /// The 64-bit result and the raised exception flags. FP results are
    /// register slots (NaN-boxed for single); integer results are
    /// sign-extended to 64 bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvhart_core::core::units::fpu::{Fpu, FpOp, Precision};
    /// use rvhart_core::core::units::fpu::nan_handling::box_f32;
    /// use rvhart_core::core::units::fpu::rounding_modes::RoundingMode;
    ///
    /// let (sum, flags) = Fpu::execute(
    ///     FpOp::Add, Precision::Single, box_f32(2.5), box_f32(3.5), 0, RoundingMode::Rne,
    /// );
    /// assert_eq!(sum, box_f32(6.0));
    /// assert!(flags.is_empty());
    ///
    /// let (q, _) = Fpu::execute(
    ///     FpOp::Mul, Precision::Double, 2.0f64.to_bits(), 3.5f64.to_bits(), 0, RoundingMode::Rne,
    /// );
    /// assert_eq!(f64::from_bits(q), 7.0);
    /// ```
    pub fn execute(
        op: FpOp,
        prec: Precision,
        a: u64,
        b: u64,
        c: u64,
        rm: RoundingMode,
    ) -> (u64, FpFlags) {
        match prec {
            Precision::Single => Self::execute_f32(op, a, b, c, rm),
            Precision::Double => Self::execute_f64(op, a, b, c, rm),
        }
    }

    /// Single-precision (f32) execution path.
    fn execute_f32(op: FpOp, a: u64, b: u64, c: u64, rm: RoundingMode) -> (u64, FpFlags) {
        let fa = unbox_f32(a);
        let fb = unbox_f32(b);
        let fc = unbox_f32(c);
        let (wa, wb, wc) = (f64::from(fa), f64::from(fb), f64::from(fc));

        match op {
            FpOp::Add | FpOp::Sub | FpOp::Mul | FpOp::Div | FpOp::Sqrt => {
                // `hi + lo` is the exact result; `lo` only needs the right sign
                // for division and square root.
                let (hi, lo) = match op {
                    FpOp::Add | FpOp::Sub => {
                        let y = if op == FpOp::Sub { -wb } else { wb };
                        let (s, err) = Self::two_sum(wa, y);
                        (Self::signed_zero(s, err, wa, y, rm), err)
                    }
                    // 24-bit significands multiply exactly in 53 bits.
                    FpOp::Mul => (wa * wb, 0.0),
                    FpOp::Div => {
                        let q = wa / wb;
                        let lo = if q.is_finite() && wb != 0.0 { (-q).mul_add(wb, wa) / wb } else { 0.0 };
                        (q, lo)
                    }
                    _ => {
                        let s = wa.sqrt();
                        let lo = if s > 0.0 && s.is_finite() {
                            (-s).mul_add(s, wa) / (2.0 * s)
                        } else {
                            0.0
                        };
                        (s, lo)
                    }
                };
                let nan_in = fa.is_nan() || (op != FpOp::Sqrt && fb.is_nan());
                let snan_in = is_snan_f32(fa) || (op != FpOp::Sqrt && is_snan_f32(fb));
                let mut flags = Self::invalid_flags(hi.is_nan(), nan_in, snan_in);
                flags |= Self::div_by_zero(op, wa, wb);
                let (r, round_flags) = round_pair_to_f32(hi, lo, rm);
                flags |= round_flags;
                (box_f32(canonicalize_f32(r)), flags)
            }

            FpOp::MAdd | FpOp::MSub | FpOp::NMAdd | FpOp::NMSub => {
                let p = wa * wb;
                let (x, y) = match op {
                    FpOp::MAdd => (p, wc),
                    FpOp::MSub => (p, -wc),
                    FpOp::NMAdd => (-p, -wc),
                    _ => (-p, wc),
                };
                let (s, err) = Self::two_sum(x, y);
                let hi = Self::signed_zero(s, err, x, y, rm);
                let nan_in = fa.is_nan() || fb.is_nan() || fc.is_nan();
                let snan_in = is_snan_f32(fa) || is_snan_f32(fb) || is_snan_f32(fc);
                let mut flags = Self::invalid_flags(hi.is_nan(), nan_in, snan_in);
                let (r, round_flags) = round_pair_to_f32(hi, err, rm);
                flags |= round_flags;
                (box_f32(canonicalize_f32(r)), flags)
            }

            FpOp::Min | FpOp::Max => {
                let flags = FpFlags::when(is_snan_f32(fa) || is_snan_f32(fb), FpFlags::NV);
                let r = if op == FpOp::Min { fmin_f32(fa, fb) } else { fmax_f32(fa, fb) };
                (box_f32(r), flags)
            }

            // Sign injection operates on raw bits; no canonicalization.
            FpOp::SgnJ => (box_f32(f32::from_bits(Self::sgnj32(fa, fb, false))), FpFlags::NONE),
            FpOp::SgnJN => (box_f32(f32::from_bits(Self::sgnj32(fa, fb, true))), FpFlags::NONE),
            FpOp::SgnJX => (
                box_f32(f32::from_bits(fa.to_bits() ^ (fb.to_bits() & F32_SIGN_BIT))),
                FpFlags::NONE,
            ),

            FpOp::Eq => (
                u64::from(fa == fb),
                FpFlags::when(is_snan_f32(fa) || is_snan_f32(fb), FpFlags::NV),
            ),
            FpOp::Lt => (
                u64::from(fa < fb),
                FpFlags::when(fa.is_nan() || fb.is_nan(), FpFlags::NV),
            ),
            FpOp::Le => (
                u64::from(fa <= fb),
                FpFlags::when(fa.is_nan() || fb.is_nan(), FpFlags::NV),
            ),
            FpOp::Class => (classify_f32(fa), FpFlags::NONE),

            FpOp::CvtWF => Self::float_to_int(wa, rm, IntKind::Word),
            FpOp::CvtWuF => Self::float_to_int(wa, rm, IntKind::WordUnsigned),
            FpOp::CvtLF => Self::float_to_int(wa, rm, IntKind::Long),
            FpOp::CvtLuF => Self::float_to_int(wa, rm, IntKind::LongUnsigned),

            FpOp::CvtFW => Self::int_to_f32(i128::from(a as i32), rm),
            FpOp::CvtFWu => Self::int_to_f32(i128::from(a as u32), rm),
            FpOp::CvtFL => Self::int_to_f32(i128::from(a as i64), rm),
            FpOp::CvtFLu => Self::int_to_f32(i128::from(a), rm),

            // Single to double is exact.
            FpOp::CvtDS => (
                canonicalize_f64(wa).to_bits(),
                FpFlags::when(is_snan_f32(fa), FpFlags::NV),
            ),
            // A single-precision source has nothing to narrow.
            FpOp::CvtSD => (box_f32(canonicalize_f32(fa)), FpFlags::NONE),

            // FMV.X.W moves the low 32 bits whether or not the slot is boxed.
            FpOp::MvXF => (sext32(a), FpFlags::NONE),
            FpOp::MvFX => (box_f32(f32::from_bits(a as u32)), FpFlags::NONE),
        }
    }

    /// Double-precision (f64) execution path.
    ///
    /// The host computes the round-to-nearest result; the residual needed for
    /// directed rounding comes from error-free transformations.
    fn execute_f64(op: FpOp, a: u64, b: u64, c: u64, rm: RoundingMode) -> (u64, FpFlags) {
        let fa = f64::from_bits(a);
        let fb = f64::from_bits(b);
        let fc = f64::from_bits(c);

        match op {
            FpOp::Add | FpOp::Sub | FpOp::Mul | FpOp::Div | FpOp::Sqrt => {
                let (near, residual) = match op {
                    FpOp::Add | FpOp::Sub => {
                        let y = if op == FpOp::Sub { -fb } else { fb };
                        let (s, err) = Self::two_sum(fa, y);
                        (Self::signed_zero(s, err, fa, y, rm), err)
                    }
                    FpOp::Mul => {
                        let p = fa * fb;
                        (p, Self::finite_residual(p, fa.mul_add(fb, -p), fa.is_finite() && fb.is_finite()))
                    }
                    FpOp::Div => {
                        let q = fa / fb;
                        let rem = (-q).mul_add(fb, fa);
                        (q, Self::finite_residual(q, rem / fb, fa.is_finite() && fb != 0.0))
                    }
                    _ => {
                        let s = fa.sqrt();
                        (s, Self::finite_residual(s, (-s).mul_add(s, fa), fa.is_finite()))
                    }
                };
                let nan_in = fa.is_nan() || (op != FpOp::Sqrt && fb.is_nan());
                let snan_in = is_snan_f64(fa) || (op != FpOp::Sqrt && is_snan_f64(fb));
                let mut flags = Self::invalid_flags(near.is_nan(), nan_in, snan_in);
                flags |= Self::div_by_zero(op, fa, fb);
                let (r, round_flags) = round_directed(near, residual, rm);
                flags |= round_flags;
                (canonicalize_f64(r).to_bits(), flags)
            }

            FpOp::MAdd | FpOp::MSub | FpOp::NMAdd | FpOp::NMSub => {
                let (x, y, z) = match op {
                    FpOp::MAdd => (fa, fb, fc),
                    FpOp::MSub => (fa, fb, -fc),
                    FpOp::NMAdd => (-fa, fb, -fc),
                    _ => (-fa, fb, fc),
                };
                let r = x.mul_add(y, z);
                let residual = Self::fma_residual(x, y, z, r);
                let near = Self::signed_zero(r, residual, x * y, z, rm);
                let nan_in = fa.is_nan() || fb.is_nan() || fc.is_nan();
                let snan_in = is_snan_f64(fa) || is_snan_f64(fb) || is_snan_f64(fc);
                let mut flags = Self::invalid_flags(near.is_nan(), nan_in, snan_in);
                let (r, round_flags) = round_directed(near, residual, rm);
                flags |= round_flags;
                (canonicalize_f64(r).to_bits(), flags)
            }

            FpOp::Min | FpOp::Max => {
                let flags = FpFlags::when(is_snan_f64(fa) || is_snan_f64(fb), FpFlags::NV);
                let r = if op == FpOp::Min { fmin_f64(fa, fb) } else { fmax_f64(fa, fb) };
                (r.to_bits(), flags)
            }

            FpOp::SgnJ => ((a & !F64_SIGN_BIT) | (b & F64_SIGN_BIT), FpFlags::NONE),
            FpOp::SgnJN => ((a & !F64_SIGN_BIT) | (!b & F64_SIGN_BIT), FpFlags::NONE),
            FpOp::SgnJX => (a ^ (b & F64_SIGN_BIT), FpFlags::NONE),

            FpOp::Eq => (
                u64::from(fa == fb),
                FpFlags::when(is_snan_f64(fa) || is_snan_f64(fb), FpFlags::NV),
            ),
            FpOp::Lt => (
                u64::from(fa < fb),
                FpFlags::when(fa.is_nan() || fb.is_nan(), FpFlags::NV),
            ),
            FpOp::Le => (
                u64::from(fa <= fb),
                FpFlags::when(fa.is_nan() || fb.is_nan(), FpFlags::NV),
            ),
            FpOp::Class => (classify_f64(fa), FpFlags::NONE),

            FpOp::CvtWF => Self::float_to_int(fa, rm, IntKind::Word),
            FpOp::CvtWuF => Self::float_to_int(fa, rm, IntKind::WordUnsigned),
            FpOp::CvtLF => Self::float_to_int(fa, rm, IntKind::Long),
            FpOp::CvtLuF => Self::float_to_int(fa, rm, IntKind::LongUnsigned),

            FpOp::CvtFW => Self::int_to_f64(i128::from(a as i32), rm),
            FpOp::CvtFWu => Self::int_to_f64(i128::from(a as u32), rm),
            FpOp::CvtFL => Self::int_to_f64(i128::from(a as i64), rm),
            FpOp::CvtFLu => Self::int_to_f64(i128::from(a), rm),

            FpOp::CvtSD => {
                let snan = FpFlags::when(is_snan_f64(fa), FpFlags::NV);
                if fa.is_nan() {
                    return (box_f32(canonicalize_f32(f32::NAN)), snan);
                }
                let (r, flags) = round_to_f32(fa, rm);
                (box_f32(r), snan | flags)
            }
            FpOp::CvtDS => (canonicalize_f64(fa).to_bits(), FpFlags::NONE),

            FpOp::MvXF | FpOp::MvFX => (a, FpFlags::NONE),
        }
    }

    /// Flags for an arithmetic result: NV on a signaling input or on a NaN
    /// produced from non-NaN inputs (0/0, ∞−∞, 0×∞, √−x).
    fn invalid_flags(result_nan: bool, nan_in: bool, snan_in: bool) -> FpFlags {
        FpFlags::when(snan_in || (result_nan && !nan_in), FpFlags::NV)
    }

    /// DZ for a finite non-zero dividend over zero.
    fn div_by_zero(op: FpOp, a: f64, b: f64) -> FpFlags {
        FpFlags::when(op == FpOp::Div && b == 0.0 && a.is_finite() && a != 0.0, FpFlags::DZ)
    }

    /// Error-free addition: the rounded sum and the exact error.
    fn two_sum(a: f64, b: f64) -> (f64, f64) {
        let s = a + b;
        if !s.is_finite() {
            return (s, Self::finite_residual(s, 0.0, a.is_finite() && b.is_finite()));
        }
        let bb = s - a;
        let err = (a - (s - bb)) + (b - bb);
        (s, err)
    }

    /// Exact error `a * b + c - r` of the fused result `r`.
    ///
    /// The error is `r2 + r3` from the Boldo-Muller ErrFma transform. A
    /// nonzero `r3` rules out a tie, so half of `r2` stands in for the sum.
    fn fma_residual(a: f64, b: f64, c: f64, r: f64) -> f64 {
        let finite_in = a.is_finite() && b.is_finite() && c.is_finite();
        if !r.is_finite() || !finite_in {
            return Self::finite_residual(r, 0.0, finite_in);
        }
        let u1 = a * b;
        let u2 = a.mul_add(b, -u1);
        let (a1, z1) = Self::two_sum(c, u2);
        let (b1, b2) = Self::two_sum(u1, a1);
        let g = (b1 - r) + b2;
        let (r2, r3) = Self::two_sum(g, z1);
        let residual = if r3 != 0.0 && r2 * 0.5 != 0.0 { r2 * 0.5 } else { r2 + r3 };
        Self::finite_residual(r, residual, true)
    }

    /// An exact zero sum of opposite-signed addends is −0 when rounding down.
    fn signed_zero(sum: f64, residual: f64, x: f64, y: f64, rm: RoundingMode) -> f64 {
        if sum == 0.0
            && residual == 0.0
            && rm == RoundingMode::Rdn
            && x.is_sign_negative() != y.is_sign_negative()
        {
            -0.0
        } else {
            sum
        }
    }

    /// Replaces the residual when the rounded result overflowed from finite
    /// inputs, so directed rounding can pull it back to the largest finite value.
    fn finite_residual(near: f64, residual: f64, finite_in: bool) -> f64 {
        if near.is_infinite() {
            if finite_in { -near } else { 0.0 }
        } else if residual.is_finite() {
            residual
        } else {
            0.0
        }
    }

    /// Copies the sign of `b` (or its negation) onto `a`.
    fn sgnj32(a: f32, b: f32, negate: bool) -> u32 {
        let sign = if negate { !b.to_bits() } else { b.to_bits() } & F32_SIGN_BIT;
        (a.to_bits() & !F32_SIGN_BIT) | sign
    }

    /// Float-to-int conversion: rounds per `rm`, saturates, maps NaN to the
    /// largest positive value.
    fn float_to_int(x: f64, rm: RoundingMode, kind: IntKind) -> (u64, FpFlags) {
        if x.is_nan() {
            return (kind.max_result(), FpFlags::NV);
        }
        let r = rm.round_integral(x);
        let (lo, hi) = kind.range();
        if r < lo {
            return (kind.min_result(), FpFlags::NV);
        }
        if r >= hi {
            return (kind.max_result(), FpFlags::NV);
        }
        (kind.cast(r), FpFlags::when(r != x, FpFlags::NX))
    }

    /// Int-to-single conversion of an exact integer value.
    fn int_to_f32(v: i128, rm: RoundingMode) -> (u64, FpFlags) {
        let near = v as f32;
        let residual = (v - near as i128) as f64;
        let (r, flags) = round_directed(near, residual, rm);
        (box_f32(r), flags)
    }

    /// Int-to-double conversion of an exact integer value.
    fn int_to_f64(v: i128, rm: RoundingMode) -> (u64, FpFlags) {
        let near = v as f64;
        let residual = (v - near as i128) as f64;
        let (r, flags) = round_directed(near, residual, rm);
        (r.to_bits(), flags)
    }
}
