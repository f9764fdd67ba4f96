//! Integer register file.
//!
//! Thirty-two registers stored at the hart's native width. `x0` reads as
//! zero and ignores writes; the `Display` form is what trap logs print.

use std::fmt;

use crate::common::constants::REGISTER_COUNT;
use crate::common::xlen::Xlen;

/// General-Purpose Register file.
///
/// Registers are stored as `X::Reg` (`u32` on RV32, `u64` on RV64) and
/// exchanged with handlers as zero-extended `u64`. Register `x0` is hardwired
/// to zero and cannot be modified.
#[derive(Clone, Debug)]
pub struct Gpr<X: Xlen> {
    regs: [X::Reg; REGISTER_COUNT],
}

impl<X: Xlen> Default for Gpr<X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X: Xlen> Gpr<X> {
    /// Creates a new general-purpose register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self {
            regs: [X::Reg::default(); REGISTER_COUNT],
        }
    }

    /// Reads `x[idx]` zero-extended to 64 bits.
    #[inline(always)]
    pub fn read(&self, idx: usize) -> u64 {
        if idx == 0 { 0 } else { X::to_u64(self.regs[idx]) }
    }

    /// Writes `x[idx]`, dropping bits above XLEN.
    #[inline(always)]
    pub fn write(&mut self, idx: usize, val: u64) {
        if idx != 0 {
            self.regs[idx] = X::from_u64(val);
        }
    }
}

impl<X: Xlen> fmt::Display for Gpr<X> {
    /// Displays registers in pairs with hexadecimal formatting.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = X::REG_BYTES * 2 + 2;
        for i in (0..REGISTER_COUNT).step_by(2) {
            writeln!(
                f,
                "x{:<2}={:#0w$x} x{:<2}={:#0w$x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1],
                w = digits
            )?;
        }
        Ok(())
    }
}
