//! Unified Register File.
//!
//! This module provides the `RegisterFile` struct, which owns both the
//! width-parameterized integer registers and the floating-point registers of
//! one hart. It provides:
//! 1. **Unified Storage:** Combined storage for all RISC-V architectural registers.
//! 2. **Abstraction:** A single set of methods for reading and writing register values.
//! 3. **Observability:** A `Display` dump of the integer registers for trap logs.
//!
//! The FS dirty bit is not tracked here; the hart sets it through the CSR
//! interface whenever it writes a floating-point register.

use std::fmt;

use crate::common::xlen::Xlen;
use crate::core::arch::fpr::Fpr;
use crate::core::arch::gpr::Gpr;

/// Integer and floating-point registers of one hart.
#[derive(Clone, Debug)]
pub struct RegisterFile<X: Xlen> {
    gpr: Gpr<X>,
    fpr: Fpr,
}

impl<X: Xlen> Default for RegisterFile<X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X: Xlen> RegisterFile<X> {
    /// Creates a register file with every register zeroed.
    pub fn new() -> Self {
        Self {
            gpr: Gpr::new(),
            fpr: Fpr::new(),
        }
    }

    /// Reads an integer register, zero-extended to `u64`. `x0` reads as 0.
    #[inline(always)]
    pub fn read(&self, idx: usize) -> u64 {
        self.gpr.read(idx)
    }

    /// Writes an integer register, truncating to the register width.
    /// Writes to `x0` are discarded.
    #[inline(always)]
    pub fn write(&mut self, idx: usize, val: u64) {
        self.gpr.write(idx, val);
    }

    /// Shared view of the floating-point registers.
    #[inline(always)]
    pub const fn fpr(&self) -> &Fpr {
        &self.fpr
    }

    /// Mutable view of the floating-point registers.
    ///
    /// Writing through this view does not touch FS; use the hart's FP
    /// accessors for architectural writes.
    #[inline(always)]
    pub const fn fpr_mut(&mut self) -> &mut Fpr {
        &mut self.fpr
    }
}

impl<X: Xlen> fmt::Display for RegisterFile<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.gpr, f)
    }
}
