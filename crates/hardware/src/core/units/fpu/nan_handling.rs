//! NaN boxing, canonical NaNs, and the sign/NaN corner cases of FMIN/FMAX
//! and FCLASS.
//!
//! A single-precision value lives in the low half of a 64-bit register with
//! the upper half all ones. Reading an f32 from a register whose upper half
//! is anything else yields the canonical NaN instead.

/// Canonical quiet NaN for IEEE 754 single-precision (positive, quiet, zero payload).
pub const CANONICAL_NAN_F32: u32 = 0x7fc0_0000;

/// Canonical quiet NaN for IEEE 754 double-precision (positive, quiet, zero payload).
pub const CANONICAL_NAN_F64: u64 = 0x7ff8_0000_0000_0000;

/// Upper-32-bit mask used for NaN boxing validation.
const NAN_BOX_MASK: u64 = 0xFFFF_FFFF_0000_0000;

/// NaN-boxes raw f32 bits.
#[inline(always)]
pub const fn box_f32_bits(bits: u32) -> u64 {
    bits as u64 | NAN_BOX_MASK
}

/// Low 32 bits of a properly boxed value, otherwise the canonical NaN.
#[inline(always)]
pub const fn unbox_f32_bits(val: u64) -> u32 {
    if (val & NAN_BOX_MASK) == NAN_BOX_MASK {
        val as u32
    } else {
        CANONICAL_NAN_F32
    }
}

/// Boxes an f32 value into a 64-bit NaN-boxed representation.
#[inline]
pub fn box_f32(f: f32) -> u64 {
    box_f32_bits(f.to_bits())
}

/// Unboxes a 64-bit register value to obtain an f32.
///
/// Returns the canonical NaN if the value was not properly NaN-boxed.
#[inline]
pub fn unbox_f32(val: u64) -> f32 {
    f32::from_bits(unbox_f32_bits(val))
}

macro_rules! width_helpers {
    ($t:ty, $nan:expr, $quiet:expr, $canon:ident, $snan:ident, $min:ident, $max:ident) => {
        /// Replaces any NaN with the canonical quiet NaN.
        #[inline]
        pub fn $canon(f: $t) -> $t {
            if f.is_nan() { <$t>::from_bits($nan) } else { f }
        }

        /// Returns true for a NaN whose quiet bit is clear.
        #[inline]
        pub fn $snan(f: $t) -> bool {
            f.is_nan() && f.to_bits() & $quiet == 0
        }

        /// `minNum`: a lone NaN operand is ignored and `-0.0` orders below
        /// `+0.0`. NV for signaling inputs is raised by the caller.
        #[inline]
        pub fn $min(a: $t, b: $t) -> $t {
            match (a.is_nan(), b.is_nan()) {
                (true, true) => <$t>::from_bits($nan),
                (true, false) => b,
                (false, true) => a,
                // Equal operands differ at most in sign.
                (false, false) if a == b => <$t>::from_bits(a.to_bits() | b.to_bits()),
                (false, false) => a.min(b),
            }
        }

        /// `maxNum`, the mirror of the minimum above.
        #[inline]
        pub fn $max(a: $t, b: $t) -> $t {
            match (a.is_nan(), b.is_nan()) {
                (true, true) => <$t>::from_bits($nan),
                (true, false) => b,
                (false, true) => a,
                (false, false) if a == b => <$t>::from_bits(a.to_bits() & b.to_bits()),
                (false, false) => a.max(b),
            }
        }
    };
}

width_helpers!(
    f32,
    CANONICAL_NAN_F32,
    0x0040_0000,
    canonicalize_f32,
    is_snan_f32,
    fmin_f32,
    fmax_f32
);
width_helpers!(
    f64,
    CANONICAL_NAN_F64,
    0x0008_0000_0000_0000,
    canonicalize_f64,
    is_snan_f64,
    fmin_f64,
    fmax_f64
);

/// FCLASS result bits, in ISA order.
mod class {
    pub const NEG_INF: u64 = 1 << 0;
    pub const NEG_NORMAL: u64 = 1 << 1;
    pub const NEG_SUBNORMAL: u64 = 1 << 2;
    pub const NEG_ZERO: u64 = 1 << 3;
    pub const POS_ZERO: u64 = 1 << 4;
    pub const POS_SUBNORMAL: u64 = 1 << 5;
    pub const POS_NORMAL: u64 = 1 << 6;
    pub const POS_INF: u64 = 1 << 7;
    pub const SNAN: u64 = 1 << 8;
    pub const QNAN: u64 = 1 << 9;
}

/// Shared FCLASS body; `snan` is evaluated by the caller for the right width.
fn classify(cat: std::num::FpCategory, negative: bool, snan: bool) -> u64 {
    use std::num::FpCategory;

    match (cat, negative) {
        (FpCategory::Nan, _) if snan => class::SNAN,
        (FpCategory::Nan, _) => class::QNAN,
        (FpCategory::Infinite, true) => class::NEG_INF,
        (FpCategory::Infinite, false) => class::POS_INF,
        (FpCategory::Normal, true) => class::NEG_NORMAL,
        (FpCategory::Normal, false) => class::POS_NORMAL,
        (FpCategory::Subnormal, true) => class::NEG_SUBNORMAL,
        (FpCategory::Subnormal, false) => class::POS_SUBNORMAL,
        (FpCategory::Zero, true) => class::NEG_ZERO,
        (FpCategory::Zero, false) => class::POS_ZERO,
    }
}

/// FCLASS.S: returns the one-hot class mask of `f`.
pub fn classify_f32(f: f32) -> u64 {
    classify(f.classify(), f.is_sign_negative(), is_snan_f32(f))
}

/// FCLASS.D: returns the one-hot class mask of `f`.
pub fn classify_f64(f: f64) -> u64 {
    classify(f.classify(), f.is_sign_negative(), is_snan_f64(f))
}
