//! Batch Loop Tests.
//!
//! Verifies PC advance for both instruction sizes, budget accounting, how
//! traps and `WFI` end a batch, fetch faults (including the second parcel of
//! a 32-bit instruction), and that `x0` is never written.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rvhart_core::common::{Rv32, Rv64, Trap};
use rvhart_core::config::ExtensionConfig;
use rvhart_core::core::arch::csr::MEPC;
use rvhart_core::core::{BatchExit, BatchOutcome, Hart};
use rvhart_core::soc::Bus;

use crate::common::builder::instruction::{self as enc, c};
use crate::common::harness::{RAM_BASE, RAM_SIZE, TRAP_VECTOR, TestContext};
use crate::common::mocks::bus::FaultingBus;
use crate::common::mocks::csr::RecordingCsr;

fn no_c() -> ExtensionConfig {
    ExtensionConfig {
        c: false,
        ..ExtensionConfig::ALL
    }
}

// ─── PC advance ──────────────────────────────────────────────────────────────

#[test]
fn full_instruction_advances_by_four() {
    let mut ctx = TestContext::<Rv64>::new();
    let out = ctx.exec(enc::addi(5, 0, 1));
    assert_eq!(out, BatchOutcome { exit: BatchExit::BudgetExhausted, retired: 1 });
    assert_eq!(ctx.hart.pc(), RAM_BASE + 4);
}

#[test]
fn compressed_instruction_advances_by_two() {
    let mut ctx = TestContext::<Rv64>::new();
    let _ = ctx.exec_c(c::li(5, 3));
    assert_eq!(ctx.hart.pc(), RAM_BASE + 2);
    assert_eq!(ctx.x(5), 3);
}

#[test]
fn mixed_stream_runs_to_budget() {
    let mut ctx = TestContext::<Rv32>::new().load_parcels(&[
        c::li(8, 1),
        // addi x9, x8, 2 split into two parcels at a 2-byte boundary
        enc::addi(9, 8, 2) as u16,
        (enc::addi(9, 8, 2) >> 16) as u16,
        c::add(9, 8),
    ]);
    let out = ctx.run(3);
    assert_eq!(out.exit, BatchExit::BudgetExhausted);
    assert_eq!(out.retired, 3);
    assert_eq!(ctx.hart.pc(), RAM_BASE + 8);
    assert_eq!(ctx.x(9), 4);
}

#[test]
fn zero_budget_retires_nothing() {
    let mut ctx = TestContext::<Rv64>::new();
    let out = ctx.run(0);
    assert_eq!(out, BatchOutcome { exit: BatchExit::BudgetExhausted, retired: 0 });
    assert_eq!(ctx.hart.pc(), RAM_BASE);
}

// ─── Traps ───────────────────────────────────────────────────────────────────

#[test]
fn trap_ends_batch_and_does_not_retire() {
    let mut ctx = TestContext::<Rv64>::new().load_program(&[
        enc::addi(5, 0, 1),
        enc::addi(6, 0, 2),
        enc::ECALL,
        enc::addi(7, 0, 3),
    ]);
    let out = ctx.run(100);
    assert_eq!(out.exit, BatchExit::Trap(Trap::EnvironmentCall));
    assert_eq!(out.retired, 2);
    assert_eq!(ctx.hart.pc(), TRAP_VECTOR);
    assert_eq!(ctx.hart.csr().read(MEPC), Some(RAM_BASE + 8));
    assert_eq!(ctx.mcause(), 11);
    assert_eq!(ctx.x(7), 0);
}

#[test]
fn wfi_retires_and_ends_batch() {
    let mut ctx = TestContext::<Rv64>::new().load_program(&[enc::WFI, enc::addi(5, 0, 1)]);
    let out = ctx.run(10);
    assert_eq!(out, BatchOutcome { exit: BatchExit::WaitForInterrupt, retired: 1 });
    assert_eq!(ctx.hart.pc(), RAM_BASE + 4);
    assert_eq!(ctx.x(5), 0);
}

#[test]
fn fetch_outside_ram_faults() {
    let mut ctx = TestContext::<Rv64>::new();
    ctx.hart.set_pc(0x1000);
    let out = ctx.run(1);
    assert_eq!(out.exit, BatchExit::Trap(Trap::InstructionAccessFault(0x1000)));
    assert_eq!(out.retired, 0);
}

#[test]
fn second_parcel_fault_reports_its_address() {
    let mut ctx = TestContext::<Rv64>::new();
    let last = RAM_BASE + RAM_SIZE as u64 - 2;
    ctx.write_mem(last, 2, u64::from(enc::addi(0, 0, 0) as u16));
    ctx.hart.set_pc(last);
    let out = ctx.run(1);
    assert_eq!(
        out.exit,
        BatchExit::Trap(Trap::InstructionAccessFault(last + 2))
    );
    assert_eq!(ctx.hart.csr().read(MEPC), Some(last));
}

#[test]
fn odd_halfword_pc_without_c_is_misaligned() {
    let mut ctx = TestContext::<Rv64>::with_extensions(no_c());
    ctx.hart.set_pc(RAM_BASE + 2);
    let out = ctx.run(1);
    assert_eq!(
        out.exit,
        BatchExit::Trap(Trap::InstructionAddressMisaligned(RAM_BASE + 2))
    );
}

#[test]
fn misaligned_jump_without_c_keeps_link_register() {
    let mut ctx = TestContext::<Rv64>::with_extensions(no_c());
    let out = ctx.exec(enc::jal(1, 6));
    assert_eq!(
        out.exit,
        BatchExit::Trap(Trap::InstructionAddressMisaligned(RAM_BASE + 6))
    );
    assert_eq!(ctx.x(1), 0);
    assert_eq!(ctx.hart.pc(), TRAP_VECTOR);
}

#[test]
fn halfword_jump_with_c_is_allowed() {
    let mut ctx = TestContext::<Rv64>::new();
    let out = ctx.exec(enc::jal(1, 6));
    assert_eq!(out.exit, BatchExit::BudgetExhausted);
    assert_eq!(ctx.x(1), RAM_BASE + 4);
    assert_eq!(ctx.hart.pc(), RAM_BASE + 6);
}

#[test]
fn trap_entry_cancels_reservation() {
    let bus = Arc::new(FaultingBus::new(RAM_BASE, RAM_SIZE, 0..0));
    let dyn_bus: Arc<dyn Bus> = bus.clone();
    let mut hart = Hart::<Rv64>::new(0, dyn_bus);
    hart.set_pc(RAM_BASE);
    bus.ram.write_words(RAM_BASE, &[enc::EBREAK]).unwrap();
    let out = hart.run_batch(1);
    assert_eq!(out.exit, BatchExit::Trap(Trap::Breakpoint(RAM_BASE)));
    assert_eq!(bus.cancel_count(), 1);
}

#[test]
fn unsupported_width_is_an_access_fault() {
    let bus = Arc::new(FaultingBus::new(RAM_BASE, RAM_SIZE, 0..0).without_doubles());
    let dyn_bus: Arc<dyn Bus> = bus.clone();
    let mut hart = Hart::<Rv64>::new(0, dyn_bus);
    hart.set_pc(RAM_BASE);
    hart.set_x(1, RAM_BASE + 0x100);
    bus.ram
        .write_words(RAM_BASE, &[enc::lw(2, 1, 0), enc::ld(3, 1, 0)])
        .unwrap();
    let out = hart.run_batch(2);
    assert_eq!(out.retired, 1);
    assert_eq!(out.exit, BatchExit::Trap(Trap::LoadAccessFault(RAM_BASE + 0x100)));
}

#[test]
fn host_csr_interface_receives_traps() {
    let (csr, log) = RecordingCsr::new(32, RAM_BASE + 0x200);
    let mem = Arc::new(rvhart_core::soc::GuestMemory::new(RAM_BASE, RAM_SIZE));
    mem.write_words(RAM_BASE, &[enc::addi(1, 0, 1), 0xFFFF_FFFF]).unwrap();
    let mut hart = Hart::<Rv32>::with_csr(0, mem, Box::new(csr));
    hart.set_pc(RAM_BASE);
    let out = hart.run_batch(5);
    assert_eq!(out.retired, 1);
    assert_eq!(hart.pc(), RAM_BASE + 0x200);
    assert_eq!(
        log.lock().as_slice(),
        &[(Trap::IllegalInstruction(0xFFFF_FFFF), RAM_BASE + 4)]
    );
}

// ─── x0 ──────────────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn x0_is_never_written(imm in -2048i32..2048, upper in 0u32..0x10_0000) {
        let mut ctx = TestContext::<Rv64>::new().load_program(&[
            enc::addi(0, 0, imm),
            enc::lui(0, upper),
            enc::auipc(0, upper),
            enc::jal(0, 4),
        ]);
        let _ = ctx.run(4);
        ctx.hart.set_x(0, 0xDEAD);
        let _ = ctx.exec_c(c::addi(0, 1));
        prop_assert_eq!(ctx.x(0), 0);
    }
}
