//! SYSTEM opcode handler.
//!
//! Privilege levels are not modeled: ECALL always reports the M-mode cause,
//! and trap returns are left to the host's trap handling, so MRET and friends
//! decode as illegal here.

use super::opcodes::{CSRRC, CSRRCI, CSRRS, CSRRSI, CSRRW, CSRRWI, EBREAK, ECALL, PRIV, WFI};
use crate::common::error::Trap;
use crate::common::xlen::Xlen;
use crate::core::arch::csr::{FCSR, FFLAGS};
use crate::core::hart::BatchExit;
use crate::core::Hart;
use crate::isa::instruction::InstructionBits;
use crate::isa::table::illegal_insn;

/// Handles every instruction of the SYSTEM major opcode.
pub fn system<X: Xlen>(hart: &mut Hart<X>, insn: u32) {
    match insn.funct3() {
        PRIV => match insn {
            ECALL => hart.raise(Trap::EnvironmentCall),
            EBREAK => {
                let pc = hart.pc();
                hart.raise(Trap::Breakpoint(pc));
            }
            WFI => hart.end_batch(BatchExit::WaitForInterrupt),
            _ => illegal_insn(hart, insn),
        },
        CSRRW | CSRRS | CSRRC => {
            let src = hart.x(insn.rs1());
            csr_access(hart, insn, src);
        }
        CSRRWI | CSRRSI | CSRRCI => csr_access(hart, insn, insn.rs1() as u64),
        _ => illegal_insn(hart, insn),
    }
}

/// Read-modify-write of the CSR named by `insn`.
///
/// `src` is `rs1`'s value or the zero-extended `uimm`. CSRRW with `rd = x0`
/// skips the read; CSRRS/CSRRC with a zero source field skip the write.
fn csr_access<X: Xlen>(hart: &mut Hart<X>, insn: u32, src: u64) {
    let addr = insn.csr();
    if (FFLAGS..=FCSR).contains(&addr) && !(hart.extensions().f && hart.fp_enabled()) {
        illegal_insn(hart, insn);
        return;
    }

    let rd = insn.rd();
    let write_only = insn.funct3() & 0b11 == CSRRW && rd == 0;
    let old = if write_only {
        0
    } else {
        match hart.csr().read(addr) {
            Some(val) => X::truncate(val),
            None => {
                illegal_insn(hart, insn);
                return;
            }
        }
    };

    let new = match insn.funct3() & 0b11 {
        CSRRW => Some(src),
        CSRRS => (insn.rs1() != 0).then_some(old | src),
        _ => (insn.rs1() != 0).then_some(old & !src),
    };
    if let Some(val) = new {
        if !hart.csr_mut().write(addr, X::truncate(val)) {
            illegal_insn(hart, insn);
            return;
        }
    }

    tracing::trace!(hart = hart.hart_id(), csr = addr, old, "csr access");
    hart.set_x(rd, old);
}
