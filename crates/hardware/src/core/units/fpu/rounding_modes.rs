//! Floating-point rounding mode support.
//!
//! RISC-V defines five rounding modes:
//!
//! | Value | Mode | Description                          |
//! |-------|------|--------------------------------------|
//! | 0b000 | RNE  | Round to Nearest, ties to Even       |
//! | 0b001 | RTZ  | Round towards Zero                   |
//! | 0b010 | RDN  | Round Down (towards −∞)              |
//! | 0b011 | RUP  | Round Up (towards +∞)                |
//! | 0b100 | RMM  | Round to Nearest, ties to Max Magnitude |
//!
//! The host only rounds to nearest-even. Directed modes are produced by
//! computing the RNE result together with the sign of the residual
//! (`exact - rounded`) and stepping one ULP when the mode requires it.

use std::ops::Neg;

use super::exception_flags::FpFlags;

/// Instruction `rm` value selecting the dynamic mode from `fcsr.frm`.
pub const RM_DYNAMIC: u8 = 0b111;

/// RISC-V rounding mode encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RoundingMode {
    /// Round to Nearest, ties to Even (default IEEE mode).
    Rne = 0b000,
    /// Round towards Zero.
    Rtz = 0b001,
    /// Round Down (towards −∞).
    Rdn = 0b010,
    /// Round Up (towards +∞).
    Rup = 0b011,
    /// Round to Nearest, ties to Max Magnitude.
    Rmm = 0b100,
}

impl RoundingMode {
    /// Decodes a 3-bit rounding mode field from an instruction or `fcsr.frm`.
    ///
    /// Returns `None` for reserved encodings (0b101, 0b110) and the dynamic
    /// sentinel (0b111), which must be resolved to `fcsr.frm` by the caller.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0x7 {
            0b000 => Some(Self::Rne),
            0b001 => Some(Self::Rtz),
            0b010 => Some(Self::Rdn),
            0b011 => Some(Self::Rup),
            0b100 => Some(Self::Rmm),
            _ => None,
        }
    }

    /// Resolves an instruction `rm` field against the dynamic `frm`.
    ///
    /// # Returns
    ///
    /// `None` when the effective mode is reserved, which makes the
    /// instruction illegal.
    pub const fn resolve(rm: u8, frm: u8) -> Option<Self> {
        if rm & 0x7 == RM_DYNAMIC {
            Self::from_bits(frm)
        } else {
            Self::from_bits(rm)
        }
    }

    /// Rounds `x` to an integral value in this mode.
    pub fn round_integral(self, x: f64) -> f64 {
        match self {
            Self::Rne => x.round_ties_even(),
            Self::Rtz => x.trunc(),
            Self::Rdn => x.floor(),
            Self::Rup => x.ceil(),
            Self::Rmm => x.round(),
        }
    }
}

/// Binary floating-point format that can be stepped by one ULP.
pub trait StepFloat: Copy + PartialOrd + Neg<Output = Self> {
    /// Positive zero.
    const ZERO: Self;

    /// Smallest positive normal value.
    const MIN_NORMAL: Self;

    /// Next representable value towards +∞.
    fn step_up(self) -> Self;

    /// Next representable value towards −∞.
    fn step_down(self) -> Self {
        -(-self).step_up()
    }

    /// Exact widening to `f64`.
    fn widen(self) -> f64;

    /// True for ±∞.
    fn is_inf(self) -> bool;
}

impl StepFloat for f32 {
    const ZERO: Self = 0.0;
    const MIN_NORMAL: Self = Self::MIN_POSITIVE;

    fn step_up(self) -> Self {
        if self.is_nan() || self == Self::INFINITY {
            return self;
        }
        if self == 0.0 {
            return Self::from_bits(1);
        }
        let bits = self.to_bits();
        Self::from_bits(if self > 0.0 { bits + 1 } else { bits - 1 })
    }

    fn widen(self) -> f64 {
        f64::from(self)
    }

    fn is_inf(self) -> bool {
        self.is_infinite()
    }
}

impl StepFloat for f64 {
    const ZERO: Self = 0.0;
    const MIN_NORMAL: Self = Self::MIN_POSITIVE;

    fn step_up(self) -> Self {
        if self.is_nan() || self == Self::INFINITY {
            return self;
        }
        if self == 0.0 {
            return Self::from_bits(1);
        }
        let bits = self.to_bits();
        Self::from_bits(if self > 0.0 { bits + 1 } else { bits - 1 })
    }

    fn widen(self) -> f64 {
        self
    }

    fn is_inf(self) -> bool {
        self.is_infinite()
    }
}

/// Applies a rounding mode to a round-to-nearest-even result.
///
/// # Arguments
///
/// * `near`     - The RNE-rounded result (may be ±∞ on overflow).
/// * `residual` - `exact - near`. Only the sign matters except for RMM tie
///   detection. On overflow pass an infinity opposite in sign to `near`.
/// * `rm`       - The effective rounding mode.
///
/// # Returns
///
/// The correctly rounded value together with the NX, OF, and UF flags.
pub fn round_directed<F: StepFloat>(near: F, residual: f64, rm: RoundingMode) -> (F, FpFlags) {
    if residual == 0.0 || residual.is_nan() {
        return (near, FpFlags::NONE);
    }

    let toward_zero = || if near > F::ZERO { near.step_down() } else { near.step_up() };
    let rounded = match rm {
        RoundingMode::Rne => near,
        RoundingMode::Rtz => {
            if near != F::ZERO && (residual < 0.0) == (near > F::ZERO) {
                toward_zero()
            } else {
                near
            }
        }
        RoundingMode::Rdn => {
            if residual < 0.0 {
                near.step_down()
            } else {
                near
            }
        }
        RoundingMode::Rup => {
            if residual > 0.0 {
                near.step_up()
            } else {
                near
            }
        }
        RoundingMode::Rmm => {
            let other = if residual > 0.0 { near.step_up() } else { near.step_down() };
            let gap = (other.widen() - near.widen()).abs();
            let is_tie = gap == 2.0 * residual.abs();
            if is_tie && other.widen().abs() > near.widen().abs() {
                other
            } else {
                near
            }
        }
    };

    let mut flags = FpFlags::NX;
    if near.is_inf() || rounded.is_inf() {
        flags |= FpFlags::OF;
    }
    let magnitude = rounded.widen().abs();
    if magnitude < F::MIN_NORMAL.widen() {
        flags |= FpFlags::UF;
    }
    (rounded, flags)
}

/// Rounds an exactly representable `f64` value to single precision in mode `rm`.
pub fn round_to_f32(exact: f64, rm: RoundingMode) -> (f32, FpFlags) {
    round_pair_to_f32(exact, 0.0, rm)
}

/// Rounds the unevaluated sum `hi + lo` to single precision in mode `rm`.
///
/// `hi` is the double-precision rounding of the exact value and `lo` the
/// remaining error, so `|lo|` is at most half an `f64` ULP of `hi`. Only the
/// sign of `lo` is needed unless `hi` lands exactly on a single-precision
/// halfway point, where it decides the side.
///
/// # Examples
///
/// ```
/// use rvhart_core::core::units::fpu::rounding_modes::{RoundingMode, round_pair_to_f32};
///
/// // 1 + 2^-100 is not representable in f64 either.
/// let (up, flags) = round_pair_to_f32(1.0, f64::powi(2.0, -100), RoundingMode::Rup);
/// assert_eq!(up.to_bits(), 0x3F80_0001);
/// assert!(!flags.is_empty());
/// ```
pub fn round_pair_to_f32(hi: f64, lo: f64, rm: RoundingMode) -> (f32, FpFlags) {
    let near = hi as f32;
    if hi.is_nan() || hi.is_infinite() {
        return (near, FpFlags::NONE);
    }
    let d = hi - f64::from(near);
    if near.is_inf() || d == 0.0 || lo == 0.0 {
        return round_directed(near, d + lo, rm);
    }

    let other = if d > 0.0 { near.step_up() } else { near.step_down() };
    let half = (f64::from(other) - f64::from(near)) / 2.0;
    if d != half {
        return round_directed(near, d + lo, rm);
    }

    // `hi` is a tie that `lo` breaks; the residual from the winning side is
    // strictly inside half an ULP.
    let near = if (lo > 0.0) == (d > 0.0) { other } else { near };
    round_directed(near, (hi - f64::from(near)) / 2.0, rm)
}
