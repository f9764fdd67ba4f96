//! Load/Store Unit (LSU).
//!
//! This module provides the pieces of memory access that are independent of
//! the bus:
//! - [`atomic`]: Read-modify-write ALU for the RISC-V A extension.
//! - [`ordering`]: FENCE decoding and `aq`/`rl` host fences.

/// Atomic memory operation ALU (RISC-V A extension).
pub mod atomic;

/// Memory ordering and fence operations.
pub mod ordering;

use self::atomic::AtomicOp;
use crate::common::data::MemWidth;

/// Load/Store Unit (LSU) for memory operations.
#[derive(Debug)]
pub struct Lsu;

impl Lsu {
    /// Performs an atomic ALU operation for atomic memory instructions.
    ///
    /// Delegates to [`atomic::atomic_alu`].
    pub fn atomic_alu(op: AtomicOp, mem_val: u64, reg_val: u64, width: MemWidth) -> u64 {
        atomic::atomic_alu(op, mem_val, reg_val, width)
    }

    /// Extends a loaded value to 64 bits.
    ///
    /// Signed loads sign-extend from the access width, unsigned loads
    /// zero-extend. The caller truncates the result to XLEN.
    pub const fn extend(val: u64, width: MemWidth, signed: bool) -> u64 {
        if !signed {
            return val & width.mask();
        }
        match width {
            MemWidth::Byte => val as u8 as i8 as i64 as u64,
            MemWidth::Half => val as u16 as i16 as i64 as u64,
            MemWidth::Word => val as u32 as i32 as i64 as u64,
            MemWidth::Double => val,
        }
    }
}
