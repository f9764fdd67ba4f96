//! Main Execution Loop.
//!
//! This module implements the fetch, decode, execute cycle of a hart. It performs the following:
//! 1. **Event Polling:** Checks the host event flag before every instruction.
//! 2. **Fetch:** Reads one or two 16-bit parcels through the bus.
//! 3. **Dispatch:** Resolves the handler through the opcode table and invokes it.
//! 4. **PC Update:** Advances by the instruction size unless the handler redirected.

use super::Hart;
use super::signal::HartEvent;
use super::trap::{BatchExit, BatchOutcome};
use crate::common::constants::INSTRUCTION_SIZE_16;
use crate::common::data::AccessType;
use crate::common::error::Trap;
use crate::common::xlen::Xlen;
use crate::isa::decode::{Decoder, Resolved, is_compressed};

impl<X: Xlen> Hart<X> {
    /// Runs instructions until the budget is used up or an event ends the batch.
    ///
    /// The host event flag is polled before each instruction, so a stop or an
    /// interrupt is observed at an instruction boundary. Traps, `WFI`, and
    /// host events end the batch early; the returned [`BatchOutcome`] says
    /// which.
    ///
    /// # Arguments
    ///
    /// * `budget` - Maximum number of instructions to retire.
    pub fn run_batch(&mut self, budget: u64) -> BatchOutcome {
        tracing::trace!(
            hart = self.hart_id,
            pc = format_args!("{:#x}", self.pc),
            budget,
            "batch start"
        );
        self.exit = None;
        let mut retired = 0;
        let exit = loop {
            if let Some(event) = self.signal.take() {
                break match event {
                    HartEvent::Stop => BatchExit::Stopped,
                    HartEvent::Interrupt(cause) => BatchExit::Interrupt(cause),
                };
            }
            if retired == budget {
                break BatchExit::BudgetExhausted;
            }

            self.step();

            match self.exit.take() {
                None => retired += 1,
                Some(exit @ BatchExit::WaitForInterrupt) => {
                    retired += 1;
                    break exit;
                }
                Some(exit) => break exit,
            }
        };
        tracing::trace!(
            hart = self.hart_id,
            pc = format_args!("{:#x}", self.pc),
            retired,
            ?exit,
            "batch end"
        );
        BatchOutcome { exit, retired }
    }

    /// Executes the instruction at the current PC.
    #[inline(always)]
    fn step(&mut self) {
        let pc = self.pc;
        if let Some(insn) = self.fetch(pc) {
            let resolved = Decoder::resolve(&self.table, insn);
            self.next_pc = X::truncate(pc.wrapping_add(resolved.size()));
            match resolved {
                Resolved::Full(handler, bits) => handler(self, bits),
                Resolved::Compressed(handler, bits) => handler(self, bits),
            }
        }
        self.pc = self.next_pc;
    }

    /// Fetches the instruction at `pc` as one or two parcels.
    ///
    /// # Returns
    ///
    /// The instruction bits (upper half zero for compressed), or `None` after
    /// raising a fetch trap.
    fn fetch(&mut self, pc: u64) -> Option<u32> {
        if !self.extensions.c && pc & 0x2 != 0 {
            self.raise(Trap::InstructionAddressMisaligned(pc));
            return None;
        }
        let Ok(low) = self.bus.fetch(pc) else {
            self.raise(Trap::access_fault(AccessType::Fetch, pc));
            return None;
        };
        if is_compressed(low) {
            return Some(u32::from(low));
        }
        let high_addr = X::truncate(pc.wrapping_add(INSTRUCTION_SIZE_16));
        let Ok(high) = self.bus.fetch(high_addr) else {
            self.raise(Trap::access_fault(AccessType::Fetch, high_addr));
            return None;
        };
        Some(u32::from(low) | (u32::from(high) << 16))
    }
}
