//! LR/SC reservation set.
//!
//! Each hart holds at most one reservation, identified by the
//! [`RESERVATION_LINE_BYTES`]-aligned line its load-reserved touched. A store
//! anywhere in a line clears every reservation on it.

use crate::common::constants::RESERVATION_LINE_BYTES;

/// Line address containing `addr`.
#[inline(always)]
pub const fn line_of(addr: u64) -> u64 {
    addr & !(RESERVATION_LINE_BYTES - 1)
}

/// Outstanding reservations, one per hart.
#[derive(Clone, Debug, Default)]
pub struct ReservationSet {
    entries: Vec<(u64, u64)>,
}

impl ReservationSet {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Replaces `hart`'s reservation with the line holding `addr`.
    pub fn reserve(&mut self, hart: u64, addr: u64) {
        let line = line_of(addr);
        match self.entries.iter_mut().find(|(h, _)| *h == hart) {
            Some(entry) => entry.1 = line,
            None => self.entries.push((hart, line)),
        }
    }

    /// Consumes `hart`'s reservation.
    ///
    /// # Returns
    ///
    /// True if it covered the line holding `addr`.
    pub fn take(&mut self, hart: u64, addr: u64) -> bool {
        let line = line_of(addr);
        let Some(pos) = self.entries.iter().position(|(h, _)| *h == hart) else {
            return false;
        };
        let (_, reserved) = self.entries.swap_remove(pos);
        reserved == line
    }

    /// Clears every reservation on the lines covered by `[addr, addr + len)`.
    pub fn invalidate(&mut self, addr: u64, len: u64) {
        if self.entries.is_empty() || len == 0 {
            return;
        }
        let first = line_of(addr);
        let last = line_of(addr.saturating_add(len - 1));
        self.entries.retain(|(_, line)| *line < first || *line > last);
    }

    /// Drops `hart`'s reservation, if any.
    pub fn cancel(&mut self, hart: u64) {
        self.entries.retain(|(h, _)| *h != hart);
    }
}
