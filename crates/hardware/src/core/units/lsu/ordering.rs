//! Memory ordering and fence operations.
//!
//! This module maps RISC-V memory ordering onto host fences:
//! - FENCE instructions, decoded into predecessor/successor ordering sets.
//! - The `aq`/`rl` bits of LR, SC, and AMO instructions.
//!
//! Guest memory is accessed through the bus, whose own synchronization
//! already makes each access indivisible. These fences order the hart's
//! accesses relative to other host threads driving other harts.

use std::sync::atomic::{Ordering, fence};

/// Predecessor/Successor ordering bits for FENCE instructions.
///
/// The immediate field encodes two 4-bit fields, predecessor (bits 27:24)
/// and successor (bits 23:20), each with flags for I (device input),
/// O (device output), R (read), W (write).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FenceSet {
    /// Device input ordering.
    pub i: bool,
    /// Device output ordering.
    pub o: bool,
    /// Memory read ordering.
    pub r: bool,
    /// Memory write ordering.
    pub w: bool,
}

impl FenceSet {
    /// Decodes a 4-bit FENCE ordering set from an instruction field.
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            i: bits & 0b1000 != 0,
            o: bits & 0b0100 != 0,
            r: bits & 0b0010 != 0,
            w: bits & 0b0001 != 0,
        }
    }

    /// Returns true if no ordering bits are set.
    pub const fn is_empty(self) -> bool {
        !self.i && !self.o && !self.r && !self.w
    }
}

/// Decoded FENCE instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fence {
    /// Predecessor ordering set: operations before the fence.
    pub pred: FenceSet,
    /// Successor ordering set: operations after the fence.
    pub succ: FenceSet,
}

impl Fence {
    /// Decodes a FENCE instruction from the raw 32-bit encoding.
    pub const fn decode(inst: u32) -> Self {
        Self {
            pred: FenceSet::from_bits(((inst >> 24) & 0xF) as u8),
            succ: FenceSet::from_bits(((inst >> 20) & 0xF) as u8),
        }
    }

    /// Returns true if either ordering set is empty, so nothing is ordered.
    pub const fn is_nop(&self) -> bool {
        self.pred.is_empty() || self.succ.is_empty()
    }

    /// Issues the host fence for this instruction.
    ///
    /// Any non-empty FENCE is treated as a full barrier.
    pub fn issue(&self) {
        if !self.is_nop() {
            fence(Ordering::SeqCst);
        }
    }
}

/// Issues the fence required before an atomic access with these bits.
///
/// Release ordering for `rl`; sequential consistency when both are set.
#[inline]
pub fn fence_before(aq: bool, rl: bool) {
    match (aq, rl) {
        (true, true) => fence(Ordering::SeqCst),
        (false, true) => fence(Ordering::Release),
        _ => {}
    }
}

/// Issues the fence required after an atomic access with these bits.
///
/// Acquire ordering for `aq`; sequential consistency when both are set.
#[inline]
pub fn fence_after(aq: bool, rl: bool) {
    match (aq, rl) {
        (true, true) => fence(Ordering::SeqCst),
        (true, false) => fence(Ordering::Acquire),
        _ => {}
    }
}
