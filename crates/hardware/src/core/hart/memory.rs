//! Memory Access Helpers.
//!
//! This module provides the interface between instruction handlers and the bus.
//! It performs the following:
//! 1. **Address Wrapping:** Truncates effective addresses to the register width.
//! 2. **Fault Conversion:** Turns [`BusError`](crate::common::BusError)s into
//!    access-fault traps.
//! 3. **Atomics:** Alignment checks and memory ordering around LR, SC, and AMOs.
//!
//! Every helper returns `None` (or `false`) after raising a trap; the caller
//! must leave its destination untouched and return.

use super::Hart;
use crate::common::data::{AccessType, MemWidth};
use crate::common::error::Trap;
use crate::common::xlen::Xlen;
use crate::core::units::lsu::ordering::{fence_after, fence_before};

impl<X: Xlen> Hart<X> {
    /// Loads `width` bytes from `addr`, zero-extended.
    #[inline]
    pub fn load(&mut self, addr: u64, width: MemWidth) -> Option<u64> {
        let addr = X::truncate(addr);
        match self.bus.load(addr, width) {
            Ok(val) => Some(val),
            Err(err) => {
                tracing::trace!(hart = self.hart_id, %err, "load fault");
                self.raise(Trap::access_fault(AccessType::Read, addr));
                None
            }
        }
    }

    /// Stores the low `width` bytes of `val` at `addr`.
    #[inline]
    pub fn store(&mut self, addr: u64, width: MemWidth, val: u64) -> bool {
        let addr = X::truncate(addr);
        match self.bus.store(addr, width, val) {
            Ok(()) => true,
            Err(err) => {
                tracing::trace!(hart = self.hart_id, %err, "store fault");
                self.raise(Trap::access_fault(AccessType::Write, addr));
                false
            }
        }
    }

    /// Load-reserved: loads and registers a reservation on the address's line.
    pub fn load_reserved(&mut self, addr: u64, width: MemWidth, aq: bool, rl: bool) -> Option<u64> {
        let addr = X::truncate(addr);
        if !width.is_aligned(addr) {
            self.raise(Trap::LoadAddressMisaligned(addr));
            return None;
        }
        fence_before(aq, rl);
        let result = self.bus.load_reserved(self.hart_id, addr, width);
        fence_after(aq, rl);
        match result {
            Ok(val) => Some(val),
            Err(err) => {
                tracing::trace!(hart = self.hart_id, %err, "lr fault");
                self.raise(Trap::access_fault(AccessType::Read, addr));
                None
            }
        }
    }

    /// Store-conditional.
    ///
    /// # Returns
    ///
    /// `Some(true)` if the store happened, `Some(false)` if the reservation was
    /// lost, `None` after a trap.
    pub fn store_conditional(
        &mut self,
        addr: u64,
        width: MemWidth,
        val: u64,
        aq: bool,
        rl: bool,
    ) -> Option<bool> {
        let addr = X::truncate(addr);
        if !width.is_aligned(addr) {
            self.raise(Trap::StoreAddressMisaligned(addr));
            return None;
        }
        // The store itself is always release-ordered.
        fence_before(aq, true);
        let result = self.bus.store_conditional(self.hart_id, addr, width, val);
        fence_after(aq, rl);
        match result {
            Ok(stored) => Some(stored),
            Err(err) => {
                tracing::trace!(hart = self.hart_id, %err, "sc fault");
                self.raise(Trap::access_fault(AccessType::Write, addr));
                None
            }
        }
    }

    /// Atomic read-modify-write. `op` maps the old value to the new one.
    ///
    /// # Returns
    ///
    /// The old value, zero-extended, or `None` after a trap.
    pub fn amo(
        &mut self,
        addr: u64,
        width: MemWidth,
        aq: bool,
        rl: bool,
        op: &mut dyn FnMut(u64) -> u64,
    ) -> Option<u64> {
        let addr = X::truncate(addr);
        if !width.is_aligned(addr) {
            self.raise(Trap::StoreAddressMisaligned(addr));
            return None;
        }
        fence_before(aq, rl);
        let result = self.bus.amo(addr, width, op);
        fence_after(aq, rl);
        match result {
            Ok(old) => Some(old),
            Err(err) => {
                tracing::trace!(hart = self.hart_id, %err, "amo fault");
                self.raise(Trap::access_fault(AccessType::Write, addr));
                None
            }
        }
    }
}
