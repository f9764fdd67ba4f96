//! Accrued floating-point exception flags.
//!
//! `fflags` holds five sticky bits, NV (4) DZ (3) OF (2) UF (1) NX (0).
//! FPU operations return the set they raised and the hart ORs it into the
//! CSR; nothing here touches hart state.

use std::ops::{BitOr, BitOrAssign};

/// Width mask of the `fflags` field.
pub const FFLAGS_MASK: u8 = 0x1F;

/// A set of `fflags` bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FpFlags(u8);

impl FpFlags {
    /// No exceptions raised.
    pub const NONE: Self = Self(0);
    /// Invalid Operation.
    pub const NV: Self = Self(1 << 4);
    /// Divide by Zero.
    pub const DZ: Self = Self(1 << 3);
    /// Overflow.
    pub const OF: Self = Self(1 << 2);
    /// Underflow.
    pub const UF: Self = Self(1 << 1);
    /// Inexact.
    pub const NX: Self = Self(1 << 0);

    /// Raw `fflags` value.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if no flags are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Returns `flag` when `cond` holds, otherwise no flags.
    #[inline]
    pub const fn when(cond: bool, flag: Self) -> Self {
        if cond { flag } else { Self::NONE }
    }
}

impl BitOr for FpFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FpFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
