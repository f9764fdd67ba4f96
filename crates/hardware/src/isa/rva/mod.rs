//! RISC-V Atomic Extension (A).
//!
//! Load-reserved/store-conditional and the atomic memory operations. The
//! read-modify-write itself happens inside the bus, so it is indivisible with
//! respect to every other hart sharing that bus. Word results are
//! sign-extended to the register width.

/// Atomic dispatch identifiers.
pub mod opcodes;

use crate::common::data::MemWidth;
use crate::common::xlen::Xlen;
use crate::core::Hart;
use crate::core::units::lsu::Lsu;
use crate::core::units::lsu::atomic::AtomicOp;
use crate::isa::instruction::InstructionBits;
use crate::isa::table::{Slot, illegal_insn};

/// Registrations of the A extension for width `X`.
pub fn slots<X: Xlen>() -> Vec<Slot<X>> {
    let mut slots = vec![Slot::isb(opcodes::ATOMIC_W, "amo.w", |h, i| {
        atomic(h, i, MemWidth::Word);
    })];
    if X::VALUE == 64 {
        slots.push(Slot::isb(opcodes::ATOMIC_D, "amo.d", |h, i| {
            atomic(h, i, MemWidth::Double);
        }));
    }
    slots
}

/// LR, SC or AMO of the given width.
///
/// Host fences follow the aq/rl bits. The bus serializes every
/// LR, SC and AMO under its lock, which already gives LR acquire and SC/AMO
/// release ordering.
fn atomic<X: Xlen>(hart: &mut Hart<X>, insn: u32, width: MemWidth) {
    let Some(op) = AtomicOp::from_funct5(insn.funct5()) else {
        illegal_insn(hart, insn);
        return;
    };
    let (aq, rl) = (insn.aq(), insn.rl());
    let addr = hart.x(insn.rs1());
    let src = hart.x(insn.rs2());

    match op {
        AtomicOp::Lr => {
            if insn.rs2() != 0 {
                illegal_insn(hart, insn);
                return;
            }
            if let Some(val) = hart.load_reserved(addr, width, aq, rl) {
                hart.set_x(insn.rd(), Lsu::extend(val, width, true));
            }
        }
        AtomicOp::Sc => {
            if let Some(stored) = hart.store_conditional(addr, width, src, aq, rl) {
                hart.set_x(insn.rd(), u64::from(!stored));
            }
        }
        _ => {
            let mut rmw = |old| Lsu::atomic_alu(op, old, src, width);
            if let Some(old) = hart.amo(addr, width, aq, rl, &mut rmw) {
                hart.set_x(insn.rd(), Lsu::extend(old, width, true));
            }
        }
    }
}
