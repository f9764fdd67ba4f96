//! Integer register width abstraction.
//!
//! Hart state and every instruction handler are generic over [`Xlen`], so the
//! interpreter is instantiated once for [`Rv32`] and once for [`Rv64`]. Values
//! travel through handlers as zero-extended `u64`; the width type decides how
//! they are truncated when written back and how they are sign-extended when a
//! signed view is needed. All of these helpers are `#[inline(always)]` so the
//! width checks fold away in each instantiation.

use std::fmt::{Debug, LowerHex};

/// Integer register width marker.
pub trait Xlen: Copy + Clone + Debug + Default + Send + Sync + 'static {
    /// Native storage type for one integer register.
    type Reg: Copy + Default + Eq + Debug + LowerHex + Send + Sync + 'static;

    /// Width in bits (32 or 64).
    const VALUE: u32;

    /// Mask applied to shift amounts (`0x1f` or `0x3f`).
    const SHAMT_MASK: u32;

    /// Bytes per register.
    const REG_BYTES: usize;

    /// Minimum signed value, in the zero-extended representation.
    const SIGNED_MIN: u64;

    /// Short name used in logs (`"rv32"` / `"rv64"`).
    const NAME: &'static str;

    /// Truncates a value to register storage.
    fn from_u64(val: u64) -> Self::Reg;

    /// Zero-extends register storage to `u64`.
    fn to_u64(val: Self::Reg) -> u64;

    /// Sign-extends a width-sized value to `i64`.
    fn to_signed(val: u64) -> i64;

    /// Truncates a `u64` to this width, keeping the zero-extended form.
    #[inline(always)]
    fn truncate(val: u64) -> u64 {
        Self::to_u64(Self::from_u64(val))
    }

    /// All bits set at this width (the result of dividing by zero).
    #[inline(always)]
    fn all_ones() -> u64 {
        Self::truncate(u64::MAX)
    }
}

/// 32-bit integer width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rv32;

/// 64-bit integer width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rv64;

impl Xlen for Rv32 {
    type Reg = u32;

    const VALUE: u32 = 32;
    const SHAMT_MASK: u32 = 0x1f;
    const REG_BYTES: usize = 4;
    const SIGNED_MIN: u64 = 0x8000_0000;
    const NAME: &'static str = "rv32";

    #[inline(always)]
    fn from_u64(val: u64) -> u32 {
        val as u32
    }

    #[inline(always)]
    fn to_u64(val: u32) -> u64 {
        u64::from(val)
    }

    #[inline(always)]
    fn to_signed(val: u64) -> i64 {
        i64::from(val as u32 as i32)
    }
}

impl Xlen for Rv64 {
    type Reg = u64;

    const VALUE: u32 = 64;
    const SHAMT_MASK: u32 = 0x3f;
    const REG_BYTES: usize = 8;
    const SIGNED_MIN: u64 = 0x8000_0000_0000_0000;
    const NAME: &'static str = "rv64";

    #[inline(always)]
    fn from_u64(val: u64) -> u64 {
        val
    }

    #[inline(always)]
    fn to_u64(val: u64) -> u64 {
        val
    }

    #[inline(always)]
    fn to_signed(val: u64) -> i64 {
        val as i64
    }
}

/// Sign-extends the low 32 bits of `val` to 64 bits.
///
/// Used by the RV64 `*W` instructions and by 32-bit loads.
#[inline(always)]
pub const fn sext32(val: u64) -> u64 {
    val as u32 as i32 as i64 as u64
}
