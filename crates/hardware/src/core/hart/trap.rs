//! Trap Entry and Batch Exit.
//!
//! This module implements how a handler leaves the normal instruction flow. It performs
//! the following:
//! 1. **Trap Dispatch:** Hands the trap to the CSR interface, which saves context and
//!    returns the handler address.
//! 2. **Reservation Release:** Drops the hart's LR reservation on trap entry.
//! 3. **Exit Reporting:** Records why the current batch must end.

use super::Hart;
use crate::common::error::Trap;
use crate::common::xlen::Xlen;

/// Reason a batch returned to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchExit {
    /// The instruction budget was used up.
    BudgetExhausted,
    /// An instruction trapped; the PC already points at the trap vector.
    Trap(Trap),
    /// The host requested a stop through the [`HartSignal`](super::HartSignal).
    Stopped,
    /// The host injected an interrupt with this cause.
    Interrupt(u64),
    /// A `WFI` retired.
    WaitForInterrupt,
}

/// Result of one [`Hart::run_batch`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Why the batch ended.
    pub exit: BatchExit,
    /// Instructions retired during the batch. A trapping instruction does not retire.
    pub retired: u64,
}

impl<X: Xlen> Hart<X> {
    /// Raises a synchronous exception for the current instruction.
    ///
    /// The CSR interface records `epc`, cause and tval and supplies the
    /// handler address, which becomes the next PC. The batch ends after the
    /// current handler returns.
    pub fn raise(&mut self, trap: Trap) {
        tracing::debug!(
            hart = self.hart_id,
            pc = format_args!("{:#x}", self.pc),
            cause = trap.cause(),
            tval = format_args!("{:#x}", trap.tval()),
            "trap: {trap}"
        );
        self.bus.cancel_reservation(self.hart_id);
        let vector = self.csr.raise_trap(&trap, self.pc);
        self.next_pc = X::truncate(vector);
        self.exit = Some(BatchExit::Trap(trap));
    }

    /// Ends the batch after the current instruction retires.
    pub(crate) fn end_batch(&mut self, exit: BatchExit) {
        if self.exit.is_none() {
            self.exit = Some(exit);
        }
    }
}
