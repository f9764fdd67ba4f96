//! Host-to-hart event flag.
//!
//! A [`HartSignal`] is the only piece of hart state another thread may touch
//! while a batch is running. The host requests a stop or injects an
//! interrupt; the dispatch loop polls [`HartSignal::take`] before every
//! instruction and ends the batch when an event is pending.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Stop requested by the host.
const STOP: u32 = 1 << 0;

/// Interrupt pending; cause in `HartSignal::cause`.
const INTERRUPT: u32 = 1 << 1;

/// Event observed by the dispatch loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HartEvent {
    /// The host asked the batch to return.
    Stop,
    /// The host injected an interrupt with this cause.
    Interrupt(u64),
}

/// Atomic event flag shared between a hart and its host.
#[derive(Debug, Default)]
pub struct HartSignal {
    flags: AtomicU32,
    cause: AtomicU64,
}

impl HartSignal {
    /// Creates a signal with no pending events.
    pub const fn new() -> Self {
        Self {
            flags: AtomicU32::new(0),
            cause: AtomicU64::new(0),
        }
    }

    /// Asks the running batch to return at the next instruction boundary.
    pub fn request_stop(&self) {
        let _ = self.flags.fetch_or(STOP, Ordering::Release);
    }

    /// Marks an interrupt pending. A later injection overwrites the cause of
    /// an earlier one that has not been taken yet.
    pub fn inject_interrupt(&self, cause: u64) {
        self.cause.store(cause, Ordering::Relaxed);
        let _ = self.flags.fetch_or(INTERRUPT, Ordering::Release);
    }

    /// Returns true if any event is pending.
    #[inline(always)]
    pub fn is_pending(&self) -> bool {
        self.flags.load(Ordering::Relaxed) != 0
    }

    /// Consumes the pending event, if any.
    ///
    /// A stop takes precedence; an interrupt pending at the same time stays
    /// armed for the next poll.
    #[inline(always)]
    pub fn take(&self) -> Option<HartEvent> {
        if !self.is_pending() {
            return None;
        }
        let bits = self.flags.swap(0, Ordering::Acquire);
        if bits & STOP != 0 {
            if bits & INTERRUPT != 0 {
                let _ = self.flags.fetch_or(INTERRUPT, Ordering::Relaxed);
            }
            return Some(HartEvent::Stop);
        }
        if bits & INTERRUPT != 0 {
            return Some(HartEvent::Interrupt(self.cause.load(Ordering::Relaxed)));
        }
        None
    }
}
