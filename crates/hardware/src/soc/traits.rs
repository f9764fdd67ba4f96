//! Memory interface consumed by harts.
//!
//! This module defines the `Bus` trait every memory backend implements. It provides:
//! 1. **Fetch:** One 16-bit instruction parcel at a time.
//! 2. **Access:** Zero-extended loads and truncating stores of any width.
//! 3. **Atomics:** Load-reserved, store-conditional, and indivisible read-modify-write.
//!
//! All methods take `&self` so that one bus can be shared by several harts
//! through `Arc<dyn Bus>`; implementors provide their own synchronization.

use std::fmt;

use crate::common::data::MemWidth;
use crate::common::error::BusError;

/// Guest memory as seen by a hart.
pub trait Bus: Send + Sync + fmt::Debug {
    /// Fetches the 16-bit instruction parcel at `addr`.
    ///
    /// A 32-bit instruction is fetched as two parcels, so only 2-byte
    /// alignment is required.
    fn fetch(&self, addr: u64) -> Result<u16, BusError> {
        self.load(addr, MemWidth::Half).map(|v| v as u16)
    }

    /// Loads `width` bytes (little-endian), zero-extended to 64 bits.
    fn load(&self, addr: u64, width: MemWidth) -> Result<u64, BusError>;

    /// Stores the low `width` bytes of `val` (little-endian).
    ///
    /// Any store invalidates LR reservations covering the written line.
    fn store(&self, addr: u64, width: MemWidth, val: u64) -> Result<(), BusError>;

    /// Loads and places a reservation for `hart` on the line holding `addr`.
    ///
    /// Buses without sub-word atomics return [`BusError::Unsupported`] for
    /// byte and halfword widths here, in `store_conditional`, and in `amo`.
    fn load_reserved(&self, hart: u64, addr: u64, width: MemWidth) -> Result<u64, BusError>;

    /// Stores `val` only if `hart` still holds a reservation on the line of
    /// `addr`. The reservation is consumed either way.
    ///
    /// # Returns
    ///
    /// Whether the store was performed.
    fn store_conditional(
        &self,
        hart: u64,
        addr: u64,
        width: MemWidth,
        val: u64,
    ) -> Result<bool, BusError>;

    /// Indivisibly replaces the value at `addr` with `op(old)`.
    ///
    /// # Returns
    ///
    /// The old value, zero-extended.
    fn amo(
        &self,
        addr: u64,
        width: MemWidth,
        op: &mut dyn FnMut(u64) -> u64,
    ) -> Result<u64, BusError>;

    /// Drops any reservation held by `hart`.
    fn cancel_reservation(&self, hart: u64);
}
