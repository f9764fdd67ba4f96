//! RISC-V Floating-Point Register File.
//!
//! This module implements the Floating-Point Register (FPR) file for the RISC-V architecture.
//! It performs the following:
//! 1. **Storage:** Maintains 32 floating-point registers (`f0`-`f31`) as raw 64-bit slots.
//! 2. **NaN Boxing:** Single-precision values live in the low half of a slot whose
//!    upper 32 bits are all ones; reads validate the box.
//! 3. **Access Control:** Separate raw, single-precision, and double-precision accessors.
//!
//! Slots hold raw bits rather than `f64` so that NaN payloads and boxing
//! patterns survive untouched.

use crate::common::constants::REGISTER_COUNT;
use crate::core::units::fpu::nan_handling::{box_f32_bits, unbox_f32_bits};

/// Floating-Point Register file.
#[derive(Clone, Debug, Default)]
pub struct Fpr {
    fregs: [u64; REGISTER_COUNT],
}

impl Fpr {
    /// Creates a new floating-point register file with all slots zeroed.
    pub const fn new() -> Self {
        Self {
            fregs: [0; REGISTER_COUNT],
        }
    }

    /// Reads the raw 64-bit slot.
    #[inline(always)]
    pub const fn read(&self, idx: usize) -> u64 {
        self.fregs[idx]
    }

    /// Writes the raw 64-bit slot.
    #[inline(always)]
    pub const fn write(&mut self, idx: usize, val: u64) {
        self.fregs[idx] = val;
    }

    /// Reads a single-precision value as bits.
    ///
    /// # Returns
    ///
    /// The low 32 bits if the slot is properly NaN-boxed, otherwise the
    /// canonical quiet NaN `0x7fc0_0000`.
    #[inline(always)]
    pub const fn read_f32_bits(&self, idx: usize) -> u32 {
        unbox_f32_bits(self.fregs[idx])
    }

    /// Writes a single-precision value, setting the upper 32 bits to all ones.
    #[inline(always)]
    pub const fn write_f32_bits(&mut self, idx: usize, bits: u32) {
        self.fregs[idx] = box_f32_bits(bits);
    }

    /// Reads a single-precision value.
    #[inline(always)]
    pub const fn read_f32(&self, idx: usize) -> f32 {
        f32::from_bits(self.read_f32_bits(idx))
    }

    /// Writes a single-precision value, NaN-boxed.
    #[inline(always)]
    pub const fn write_f32(&mut self, idx: usize, val: f32) {
        self.write_f32_bits(idx, val.to_bits());
    }

    /// Reads a double-precision value.
    #[inline(always)]
    pub const fn read_f64(&self, idx: usize) -> f64 {
        f64::from_bits(self.fregs[idx])
    }

    /// Writes a double-precision value.
    #[inline(always)]
    pub const fn write_f64(&mut self, idx: usize, val: f64) {
        self.fregs[idx] = val.to_bits();
    }
}
