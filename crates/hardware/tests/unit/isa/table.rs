//! Opcode Table Tests.
//!
//! A fresh table is entirely illegal. Each installer fills exactly the slots
//! its format smudges across, uninstalling restores the illegal default, and
//! any encoding that lands on an illegal slot traps with its own bits as
//! `mtval`.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rvhart_core::common::{Rv64, Trap};
use rvhart_core::core::{BatchExit, Hart};
use rvhart_core::isa::decode::full_id;
use rvhart_core::isa::table::{CompressedSlot, ILLEGAL, InstallKind, OpcodeTable, Slot};

use crate::common::harness::TestContext;

fn marker(hart: &mut Hart<Rv64>, _insn: u32) {
    hart.set_x(31, 0xAA);
}

fn c_marker(hart: &mut Hart<Rv64>, _insn: u16) {
    hart.set_x(31, 0xBB);
}

#[test]
fn fresh_table_is_all_illegal() {
    let table = OpcodeTable::<Rv64>::new();
    assert_eq!(table.installed_full(), 0);
    assert_eq!(table.installed_compressed(), 0);
    assert!((0..512).all(|id| table.full_name(id) == ILLEGAL));
    assert!((0..32).all(|id| table.compressed_name(id) == ILLEGAL));
}

#[test]
fn r_installs_one_slot() {
    let mut table = OpcodeTable::<Rv64>::new();
    table.install_r(0x10C, "mul", marker);
    assert_eq!(table.installed_full(), 1);
    assert_eq!(table.full_name(0x10C), "mul");
    assert_eq!(table.full_name(0x0C), ILLEGAL);
}

#[test]
fn uj_spreads_over_funct3_and_bit25() {
    let mut table = OpcodeTable::<Rv64>::new();
    table.install_uj(0x0D, "lui", marker);
    assert_eq!(table.installed_full(), 16);
    for id in 0..512 {
        let expected = if id & 0x1F == 0x0D { "lui" } else { ILLEGAL };
        assert_eq!(table.full_name(id), expected, "slot {id:#x}");
    }
}

#[test]
fn isb_covers_both_bit25_values() {
    let mut table = OpcodeTable::<Rv64>::new();
    table.install_isb(0x104, "addi", marker);
    assert_eq!(table.installed_full(), 2);
    assert_eq!(table.full_name(0x04), "addi");
    assert_eq!(table.full_name(0x104), "addi");
}

#[test]
fn r_all_funct3_covers_rounding_modes() {
    let mut table = OpcodeTable::<Rv64>::new();
    table.install(InstallKind::RAllFunct3, 0x114 | (3 << 5), "op-fp.d", marker);
    assert_eq!(table.installed_full(), 8);
    assert!((0..8).all(|f3| table.full_name(0x114 | (f3 << 5)) == "op-fp.d"));
    assert_eq!(table.full_name(0x14), ILLEGAL);
}

#[test]
fn uninstall_restores_default() {
    let mut table = OpcodeTable::<Rv64>::new();
    table.install_uj(0x1B, "jal", marker);
    table.uninstall(InstallKind::UJ, 0x1B);
    assert_eq!(table.installed_full(), 0);

    table.install_c(0x05, "c.addiw", c_marker);
    assert_eq!(table.compressed_name(0x05), "c.addiw");
    table.uninstall_c(0x05);
    assert_eq!(table.installed_compressed(), 0);
}

#[test]
fn later_install_overwrites() {
    let mut table = OpcodeTable::<Rv64>::new();
    table.install_isb(0x04, "addi", marker);
    table.install_r(0x104, "other", marker);
    assert_eq!(table.full_name(0x04), "addi");
    assert_eq!(table.full_name(0x104), "other");
    assert_eq!(table.installed_full(), 2);
}

#[test]
fn slot_lists_apply_and_remove() {
    let slots: [Slot<Rv64>; 2] = [Slot::r(0x10C, "mul", marker), Slot::uj(0x0D, "lui", marker)];
    let c_slots: [CompressedSlot<Rv64>; 1] = [CompressedSlot::new(0x01, "c.addi", c_marker)];

    let mut table = OpcodeTable::<Rv64>::new();
    table.apply(&slots, true);
    table.apply_c(&c_slots, true);
    assert_eq!(table.installed_full(), 17);
    assert_eq!(table.installed_compressed(), 1);

    table.apply(&slots, false);
    table.apply_c(&c_slots, false);
    assert_eq!(table.installed_full(), 0);
    assert_eq!(table.installed_compressed(), 0);
}

#[test]
fn reset_clears_everything() {
    let mut table = OpcodeTable::<Rv64>::new();
    table.install_uj(0x0D, "lui", marker);
    table.install_c(0x02, "c.slli", c_marker);
    table.reset();
    assert_eq!(table.installed_full(), 0);
    assert_eq!(table.installed_compressed(), 0);
}

#[test]
fn slot_debug_names_kind_and_id() {
    assert_eq!(format!("{:?}", Slot::<Rv64>::r(0x10C, "mul", marker)), "R(0x10c, mul)");
    assert_eq!(format!("{:?}", CompressedSlot::<Rv64>::new(0x05, "c.addiw", c_marker)), "C(0x05, c.addiw)");
}

#[test]
fn installed_handler_is_dispatched() {
    let mut ctx = TestContext::<Rv64>::new();
    // lui x1, 1
    let outcome = ctx.exec(0x0000_10B7);
    assert_eq!(outcome.exit, BatchExit::BudgetExhausted);
    assert_eq!(ctx.x(1), 0x1000);
    assert_eq!(ctx.hart.table().full_name(full_id(0x0000_10B7)), "lui");
}

proptest! {
    #[test]
    fn encodings_on_illegal_slots_trap(raw in any::<u32>()) {
        let insn = raw | 0b11;
        let mut ctx = TestContext::<Rv64>::new();
        prop_assume!(ctx.hart.table().full_name(full_id(insn)) == ILLEGAL);
        let outcome = ctx.exec(insn);
        prop_assert_eq!(outcome.exit, BatchExit::Trap(Trap::IllegalInstruction(insn)));
        prop_assert_eq!(outcome.retired, 0);
        prop_assert_eq!(ctx.mtval(), u64::from(insn));
    }

    #[test]
    fn reserved_compressed_slot_traps(raw in any::<u16>()) {
        // funct3 = 100 in quadrant 0
        let parcel = (raw & !0xE003) | 0x8000;
        let mut ctx = TestContext::<Rv64>::new();
        let outcome = ctx.exec_c(parcel);
        prop_assert_eq!(outcome.exit, BatchExit::Trap(Trap::IllegalInstruction(u32::from(parcel))));
        prop_assert_eq!(ctx.mtval(), u64::from(parcel));
    }
}
