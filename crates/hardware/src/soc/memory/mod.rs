//! Flat guest RAM.
//!
//! This module implements the reference [`Bus`]. It provides:
//! 1. **Storage:** A contiguous byte buffer mapped at a base address.
//! 2. **Reservations:** Per-hart LR reservations, cleared by any store to their line.
//! 3. **Host Access:** Bulk reads and writes for loading programs and inspecting results.
//!
//! Bytes and reservations live behind one `parking_lot::Mutex`, so every
//! access, SC and AMO is indivisible and totally ordered across harts.

/// LR/SC reservation tracking.
pub mod reservation;

use std::ops::Range;

use parking_lot::Mutex;

use self::reservation::ReservationSet;
use crate::common::data::MemWidth;
use crate::common::error::BusError;
use crate::soc::traits::Bus;

/// Lock-protected contents of a [`GuestMemory`].
#[derive(Debug)]
struct MemoryState {
    bytes: Vec<u8>,
    reservations: ReservationSet,
}

impl MemoryState {
    fn read(&self, range: Range<usize>) -> u64 {
        let mut buf = [0u8; 8];
        let len = range.len();
        buf[..len].copy_from_slice(&self.bytes[range]);
        u64::from_le_bytes(buf)
    }

    fn write(&mut self, range: Range<usize>, addr: u64, val: u64) {
        let len = range.len();
        self.bytes[range].copy_from_slice(&val.to_le_bytes()[..len]);
        self.reservations.invalidate(addr, len as u64);
    }
}

/// Guest RAM shared by any number of harts.
#[derive(Debug)]
pub struct GuestMemory {
    base: u64,
    size: u64,
    state: Mutex<MemoryState>,
}

impl GuestMemory {
    /// Creates `size` bytes of zeroed RAM mapped at `base`.
    pub fn new(base: u64, size: usize) -> Self {
        Self {
            base,
            size: size as u64,
            state: Mutex::new(MemoryState {
                bytes: vec![0; size],
                reservations: ReservationSet::new(),
            }),
        }
    }

    /// First mapped address.
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Mapped size in bytes.
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Converts a guest range to a buffer range.
    fn range(&self, addr: u64, len: usize, width: MemWidth) -> Result<Range<usize>, BusError> {
        let out_of_range = BusError::OutOfRange { addr, width };
        let offset = addr.checked_sub(self.base).ok_or_else(|| out_of_range.clone())?;
        let end = offset
            .checked_add(len as u64)
            .filter(|end| *end <= self.size)
            .ok_or(out_of_range)?;
        Ok(offset as usize..end as usize)
    }

    /// Like [`range`](Self::range) for LR, SC and AMO, which exist only for
    /// words and doublewords.
    fn atomic_range(&self, addr: u64, width: MemWidth) -> Result<Range<usize>, BusError> {
        if !matches!(width, MemWidth::Word | MemWidth::Double) {
            return Err(BusError::Unsupported { width });
        }
        self.range(addr, width.bytes(), width)
    }

    /// Copies `data` into RAM at `addr`, clearing reservations it overlaps.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::OutOfRange`] if any byte falls outside RAM.
    pub fn write_bytes(&self, addr: u64, data: &[u8]) -> Result<(), BusError> {
        let range = self.range(addr, data.len(), MemWidth::Byte)?;
        let mut state = self.state.lock();
        state.bytes[range].copy_from_slice(data);
        state.reservations.invalidate(addr, data.len() as u64);
        Ok(())
    }

    /// Copies `len` bytes out of RAM starting at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::OutOfRange`] if any byte falls outside RAM.
    pub fn read_bytes(&self, addr: u64, len: usize) -> Result<Vec<u8>, BusError> {
        let range = self.range(addr, len, MemWidth::Byte)?;
        Ok(self.state.lock().bytes[range].to_vec())
    }

    /// Writes 32-bit words little-endian starting at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::OutOfRange`] if any byte falls outside RAM.
    pub fn write_words(&self, addr: u64, words: &[u32]) -> Result<(), BusError> {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        self.write_bytes(addr, &bytes)
    }
}

impl Bus for GuestMemory {
    fn load(&self, addr: u64, width: MemWidth) -> Result<u64, BusError> {
        let range = self.range(addr, width.bytes(), width)?;
        Ok(self.state.lock().read(range))
    }

    fn store(&self, addr: u64, width: MemWidth, val: u64) -> Result<(), BusError> {
        let range = self.range(addr, width.bytes(), width)?;
        self.state.lock().write(range, addr, val);
        Ok(())
    }

    fn load_reserved(&self, hart: u64, addr: u64, width: MemWidth) -> Result<u64, BusError> {
        let range = self.atomic_range(addr, width)?;
        let mut state = self.state.lock();
        state.reservations.reserve(hart, addr);
        Ok(state.read(range))
    }

    fn store_conditional(
        &self,
        hart: u64,
        addr: u64,
        width: MemWidth,
        val: u64,
    ) -> Result<bool, BusError> {
        let range = self.atomic_range(addr, width)?;
        let mut state = self.state.lock();
        if !state.reservations.take(hart, addr) {
            return Ok(false);
        }
        state.write(range, addr, val);
        Ok(true)
    }

    fn amo(
        &self,
        addr: u64,
        width: MemWidth,
        op: &mut dyn FnMut(u64) -> u64,
    ) -> Result<u64, BusError> {
        let range = self.atomic_range(addr, width)?;
        let mut state = self.state.lock();
        let old = state.read(range.clone());
        state.write(range, addr, op(old));
        Ok(old)
    }

    fn cancel_reservation(&self, hart: u64) {
        self.state.lock().reservations.cancel(hart);
    }
}
