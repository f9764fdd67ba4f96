//! Opcode dispatch tables.
//!
//! Each hart owns one [`OpcodeTable`]: a 512-entry table of handlers for
//! 32-bit instructions, indexed by the identifier from
//! [`full_id`](crate::isa::decode::full_id), and a 32-entry table for
//! compressed instructions, indexed by
//! [`compressed_id`](crate::isa::decode::compressed_id).
//!
//! Identifiers only see funct7 bit 25 and funct3, so formats without those
//! fields are "smudged" across several slots by the installers:
//! - **R**: the exact slot.
//! - **U/J**: all 16 slots sharing `opcode[6:2]`.
//! - **I/S/B**: the slot with both values of bit 25.
//! - **C**: the exact compressed slot.
//!
//! Every slot starts out holding the illegal-instruction handler.

use std::fmt;

use crate::common::constants::{COMPRESSED_TABLE_SIZE, FULL_TABLE_SIZE};
use crate::common::error::Trap;
use crate::common::xlen::Xlen;
use crate::core::Hart;

/// Handler for a 32-bit instruction.
pub type InsnHandler<X> = fn(&mut Hart<X>, u32);

/// Handler for a 16-bit compressed instruction.
pub type CompressedHandler<X> = fn(&mut Hart<X>, u16);

/// Name recorded for slots holding an illegal-instruction handler.
pub const ILLEGAL: &str = "illegal";

/// Bit 25 of the instruction, as it appears in the identifier.
const ID_FUNCT7_BIT: usize = 0x100;

/// `opcode[6:2]` part of the identifier.
const ID_OPCODE_MASK: usize = 0x1F;

/// Number of funct3/bit-25 combinations a U/J install covers.
const UJ_SPREAD: usize = 16;

/// Shift of the funct3 field inside the identifier.
pub const ID_FUNCT3_SHIFT: usize = 5;

/// Slot pattern written by an installer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstallKind {
    /// Exact slot.
    R,
    /// Exact slot for each of the eight funct3 values (FP ops with a rounding mode).
    RAllFunct3,
    /// All 16 slots sharing the opcode.
    UJ,
    /// The slot and its bit-25 twin.
    ISB,
}

impl InstallKind {
    /// Expands an identifier pattern into the slots it covers.
    fn slots(self, id: usize) -> impl Iterator<Item = usize> {
        let (base, count, step) = match self {
            Self::R => (id, 1, 0),
            Self::RAllFunct3 => (id & !(0x7 << ID_FUNCT3_SHIFT), 8, 1 << ID_FUNCT3_SHIFT),
            Self::UJ => (id & ID_OPCODE_MASK, UJ_SPREAD, 1 << ID_FUNCT3_SHIFT),
            Self::ISB => (id & !ID_FUNCT7_BIT, 2, ID_FUNCT7_BIT),
        };
        (0..count).map(move |i| base + i * step)
    }
}

/// One full-table registration of an extension.
pub struct Slot<X: Xlen> {
    /// Slot pattern.
    pub kind: InstallKind,
    /// Identifier the pattern is derived from.
    pub id: usize,
    /// Mnemonic recorded for the slots.
    pub name: &'static str,
    /// Handler written into the slots.
    pub handler: InsnHandler<X>,
}

impl<X: Xlen> Slot<X> {
    /// R-type registration.
    pub const fn r(id: usize, name: &'static str, handler: InsnHandler<X>) -> Self {
        Self { kind: InstallKind::R, id, name, handler }
    }

    /// R-type registration repeated for every funct3 value.
    pub const fn r_all_funct3(id: usize, name: &'static str, handler: InsnHandler<X>) -> Self {
        Self { kind: InstallKind::RAllFunct3, id, name, handler }
    }

    /// U/J-type registration.
    pub const fn uj(id: usize, name: &'static str, handler: InsnHandler<X>) -> Self {
        Self { kind: InstallKind::UJ, id, name, handler }
    }

    /// I/S/B-type registration.
    pub const fn isb(id: usize, name: &'static str, handler: InsnHandler<X>) -> Self {
        Self { kind: InstallKind::ISB, id, name, handler }
    }
}

impl<X: Xlen> fmt::Debug for Slot<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:#05x}, {})", self.kind, self.id, self.name)
    }
}

/// One compressed-table registration of an extension.
pub struct CompressedSlot<X: Xlen> {
    /// 5-bit compressed identifier.
    pub id: usize,
    /// Mnemonic recorded for the slot.
    pub name: &'static str,
    /// Handler written into the slot.
    pub handler: CompressedHandler<X>,
}

impl<X: Xlen> CompressedSlot<X> {
    /// Compressed registration.
    pub const fn new(id: usize, name: &'static str, handler: CompressedHandler<X>) -> Self {
        Self { id, name, handler }
    }
}

impl<X: Xlen> fmt::Debug for CompressedSlot<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C({:#04x}, {})", self.id, self.name)
    }
}

/// Raises an illegal-instruction trap for a 32-bit encoding.
pub fn illegal_insn<X: Xlen>(hart: &mut Hart<X>, insn: u32) {
    hart.raise(Trap::IllegalInstruction(insn));
}

/// Raises an illegal-instruction trap for a 16-bit encoding.
pub fn c_illegal_insn<X: Xlen>(hart: &mut Hart<X>, insn: u16) {
    hart.raise(Trap::IllegalInstruction(u32::from(insn)));
}

/// Full-width and compressed dispatch tables of one hart.
pub struct OpcodeTable<X: Xlen> {
    full: Box<[InsnHandler<X>; FULL_TABLE_SIZE]>,
    full_names: Box<[&'static str; FULL_TABLE_SIZE]>,
    compressed: [CompressedHandler<X>; COMPRESSED_TABLE_SIZE],
    compressed_names: [&'static str; COMPRESSED_TABLE_SIZE],
}

impl<X: Xlen> Default for OpcodeTable<X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X: Xlen> OpcodeTable<X> {
    /// Creates tables with every slot set to the illegal-instruction handler.
    pub fn new() -> Self {
        Self {
            full: Box::new([illegal_insn::<X> as InsnHandler<X>; FULL_TABLE_SIZE]),
            full_names: Box::new([ILLEGAL; FULL_TABLE_SIZE]),
            compressed: [c_illegal_insn::<X> as CompressedHandler<X>; COMPRESSED_TABLE_SIZE],
            compressed_names: [ILLEGAL; COMPRESSED_TABLE_SIZE],
        }
    }

    /// Restores every slot to the illegal-instruction handler.
    pub fn reset(&mut self) {
        self.full.fill(illegal_insn::<X>);
        self.full_names.fill(ILLEGAL);
        self.compressed.fill(c_illegal_insn::<X>);
        self.compressed_names.fill(ILLEGAL);
    }

    /// Handler in full-table slot `id`.
    #[inline(always)]
    pub fn full(&self, id: usize) -> InsnHandler<X> {
        self.full[id & (FULL_TABLE_SIZE - 1)]
    }

    /// Handler in compressed-table slot `id`.
    #[inline(always)]
    pub fn compressed(&self, id: usize) -> CompressedHandler<X> {
        self.compressed[id & (COMPRESSED_TABLE_SIZE - 1)]
    }

    /// Mnemonic recorded for full-table slot `id`.
    pub fn full_name(&self, id: usize) -> &'static str {
        self.full_names[id & (FULL_TABLE_SIZE - 1)]
    }

    /// Mnemonic recorded for compressed-table slot `id`.
    pub fn compressed_name(&self, id: usize) -> &'static str {
        self.compressed_names[id & (COMPRESSED_TABLE_SIZE - 1)]
    }

    /// Writes `handler` into every slot `kind` derives from `id`.
    pub fn install(&mut self, kind: InstallKind, id: usize, name: &'static str, handler: InsnHandler<X>) {
        tracing::trace!(id = format_args!("{id:#05x}"), ?kind, name, xlen = X::NAME, "install");
        for slot in kind.slots(id) {
            self.full[slot] = handler;
            self.full_names[slot] = name;
        }
    }

    /// Restores the slots `kind` derives from `id` to the illegal handler.
    pub fn uninstall(&mut self, kind: InstallKind, id: usize) {
        self.install(kind, id, ILLEGAL, illegal_insn::<X>);
    }

    /// R-type install: the exact identifier.
    pub fn install_r(&mut self, id: usize, name: &'static str, handler: InsnHandler<X>) {
        self.install(InstallKind::R, id, name, handler);
    }

    /// U/J-type install: every funct3 and bit-25 value of the opcode.
    pub fn install_uj(&mut self, id: usize, name: &'static str, handler: InsnHandler<X>) {
        self.install(InstallKind::UJ, id, name, handler);
    }

    /// I/S/B-type install: both values of bit 25.
    pub fn install_isb(&mut self, id: usize, name: &'static str, handler: InsnHandler<X>) {
        self.install(InstallKind::ISB, id, name, handler);
    }

    /// Compressed install: the exact 5-bit identifier.
    pub fn install_c(&mut self, id: usize, name: &'static str, handler: CompressedHandler<X>) {
        tracing::trace!(id = format_args!("{id:#04x}"), name, xlen = X::NAME, "install compressed");
        let slot = id & (COMPRESSED_TABLE_SIZE - 1);
        self.compressed[slot] = handler;
        self.compressed_names[slot] = name;
    }

    /// Restores compressed slot `id` to the illegal handler.
    pub fn uninstall_c(&mut self, id: usize) {
        self.install_c(id, ILLEGAL, c_illegal_insn::<X>);
    }

    /// Installs every registration when `on`, otherwise restores their slots
    /// to the illegal handler.
    pub fn apply(&mut self, slots: &[Slot<X>], on: bool) {
        for slot in slots {
            if on {
                self.install(slot.kind, slot.id, slot.name, slot.handler);
            } else {
                self.uninstall(slot.kind, slot.id);
            }
        }
    }

    /// Compressed counterpart of [`OpcodeTable::apply`].
    pub fn apply_c(&mut self, slots: &[CompressedSlot<X>], on: bool) {
        for slot in slots {
            if on {
                self.install_c(slot.id, slot.name, slot.handler);
            } else {
                self.uninstall_c(slot.id);
            }
        }
    }

    /// Number of full-table slots holding something other than the illegal handler.
    pub fn installed_full(&self) -> usize {
        self.full_names.iter().filter(|n| **n != ILLEGAL).count()
    }

    /// Number of compressed slots holding something other than the illegal handler.
    pub fn installed_compressed(&self) -> usize {
        self.compressed_names.iter().filter(|n| **n != ILLEGAL).count()
    }
}

impl<X: Xlen> fmt::Debug for OpcodeTable<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpcodeTable")
            .field("xlen", &X::NAME)
            .field("full_installed", &self.installed_full())
            .field("compressed_installed", &self.installed_compressed())
            .finish()
    }
}
