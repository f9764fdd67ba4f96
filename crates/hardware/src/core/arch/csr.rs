//! Control and Status Register (CSR) interface and reference implementation.
//!
//! The interpreter consumes CSR state through the [`CsrInterface`] trait, which
//! covers exactly what instruction handlers need. This module provides:
//! 1. **Address Definitions:** Constants for the floating-point and machine trap CSRs.
//! 2. **Field Masks:** The `mstatus.FS` field, its states, and the writable mask.
//! 3. **Interface:** FS read/write, `fcsr` access, trap entry, and Zicsr access.
//! 4. **Reference Storage:** The `Csrs` struct, a minimal machine-mode CSR file.
//!
//! Hosts with their own trap controller implement [`CsrInterface`] and pass it
//! to [`Hart::with_csr`](crate::core::Hart::with_csr).

use std::fmt;

use crate::common::error::Trap;
use crate::core::units::fpu::exception_flags::FFLAGS_MASK;

/// Floating-point accrued exception flags CSR address.
pub const FFLAGS: u32 = 0x001;

/// Floating-point dynamic rounding mode CSR address.
pub const FRM: u32 = 0x002;

/// Floating-point control and status register CSR address.
pub const FCSR: u32 = 0x003;

/// Machine status register CSR address.
pub const MSTATUS: u32 = 0x300;

/// Machine ISA register CSR address.
pub const MISA: u32 = 0x301;

/// Machine trap vector base address register CSR address.
pub const MTVEC: u32 = 0x305;

/// Machine scratch register CSR address.
pub const MSCRATCH: u32 = 0x340;

/// Machine exception program counter CSR address.
pub const MEPC: u32 = 0x341;

/// Machine cause register CSR address.
pub const MCAUSE: u32 = 0x342;

/// Machine trap value register CSR address.
pub const MTVAL: u32 = 0x343;

/// Machine hardware thread ID CSR address.
pub const MHARTID: u32 = 0xF14;

/// Machine interrupt enable bit in `mstatus`.
pub const MSTATUS_MIE: u64 = 1 << 3;

/// Machine previous interrupt enable bit in `mstatus`.
pub const MSTATUS_MPIE: u64 = 1 << 7;

/// Machine previous privilege field in `mstatus`.
pub const MSTATUS_MPP: u64 = 3 << 11;

/// Floating-point status field in `mstatus`.
pub const MSTATUS_FS: u64 = 3 << 13;

/// Bit offset of the `mstatus.FS` field.
pub const MSTATUS_FS_SHIFT: u32 = 13;

/// Bits of `mstatus` that guest writes may change.
pub const MSTATUS_WRITABLE: u64 = MSTATUS_MIE | MSTATUS_MPIE | MSTATUS_MPP | MSTATUS_FS;

/// Rounding-mode field width in `fcsr`.
const FRM_MASK: u8 = 0x7;

/// Bit offset of `frm` inside `fcsr`.
const FCSR_FRM_SHIFT: u32 = 5;

/// Low two bits of `mtvec` select the vector mode.
const MTVEC_MODE_MASK: u64 = 0x3;

/// Floating-point unit state tracked in `mstatus.FS`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FsState {
    /// FP state is off; FP instructions are expected to be disabled.
    Off,
    /// FP state holds its reset values.
    #[default]
    Initial,
    /// FP state matches the last saved copy.
    Clean,
    /// FP state was modified since the last save.
    Dirty,
}

impl FsState {
    /// Decodes the two-bit FS field.
    pub const fn from_bits(bits: u64) -> Self {
        match bits & 0x3 {
            0 => Self::Off,
            1 => Self::Initial,
            2 => Self::Clean,
            _ => Self::Dirty,
        }
    }

    /// Encodes the two-bit FS field.
    pub const fn bits(self) -> u64 {
        match self {
            Self::Off => 0,
            Self::Initial => 1,
            Self::Clean => 2,
            Self::Dirty => 3,
        }
    }
}

/// CSR and trap entry points consumed by instruction handlers.
pub trait CsrInterface: Send + fmt::Debug {
    /// Current `mstatus.FS` state.
    fn fs(&self) -> FsState;

    /// Updates `mstatus.FS`.
    fn set_fs(&mut self, fs: FsState);

    /// Accrued exception flags (`fcsr.fflags`, 5 bits).
    fn fflags(&self) -> u8;

    /// Replaces the accrued exception flags.
    fn set_fflags(&mut self, flags: u8);

    /// Dynamic rounding mode (`fcsr.frm`, 3 bits).
    fn frm(&self) -> u8;

    /// Replaces the dynamic rounding mode.
    fn set_frm(&mut self, rm: u8);

    /// Enters the trap handler for `trap` raised at `epc`.
    ///
    /// # Returns
    ///
    /// The program counter execution resumes at.
    fn raise_trap(&mut self, trap: &Trap, epc: u64) -> u64;

    /// Reads a CSR for the Zicsr instructions. `None` means the CSR does not
    /// exist and the access is an illegal instruction.
    fn read(&self, addr: u32) -> Option<u64>;

    /// Writes a CSR for the Zicsr instructions. Returns false if the CSR does
    /// not exist or is read-only.
    fn write(&mut self, addr: u32, val: u64) -> bool;

    /// Publishes the implemented ISA (`misa`) after an extension switch.
    fn set_isa(&mut self, _misa: u64) {}
}

/// Minimal machine-mode CSR file.
///
/// Implements the floating-point CSRs, `mstatus` (restricted to
/// [`MSTATUS_WRITABLE`]), and the trap registers needed for direct-mode trap
/// entry.
#[derive(Clone, Debug)]
pub struct Csrs {
    /// Machine status register (writable bits only; SD is computed on read).
    pub mstatus: u64,
    /// Machine ISA register.
    pub misa: u64,
    /// Machine trap vector base address.
    pub mtvec: u64,
    /// Machine scratch register.
    pub mscratch: u64,
    /// Machine exception program counter.
    pub mepc: u64,
    /// Machine trap cause.
    pub mcause: u64,
    /// Machine trap value.
    pub mtval: u64,
    /// Hart identifier.
    pub mhartid: u64,
    /// Accrued FP exception flags.
    pub fflags: u8,
    /// Dynamic FP rounding mode.
    pub frm: u8,
    /// Register width in bits, for the `mstatus.SD` position.
    xlen: u32,
}

impl Csrs {
    /// Creates a CSR file for a hart of the given width.
    ///
    /// FS starts in the `Initial` state.
    ///
    /// # Arguments
    ///
    /// * `hart_id` - Value reported by `mhartid`.
    /// * `xlen` - Register width in bits (32 or 64).
    pub const fn new(hart_id: u64, xlen: u32) -> Self {
        Self {
            mstatus: FsState::Initial.bits() << MSTATUS_FS_SHIFT,
            misa: 0,
            mtvec: 0,
            mscratch: 0,
            mepc: 0,
            mcause: 0,
            mtval: 0,
            mhartid: hart_id,
            fflags: 0,
            frm: 0,
            xlen,
        }
    }

    /// Assembles `fcsr` from its fields.
    const fn fcsr(&self) -> u64 {
        ((self.frm as u64) << FCSR_FRM_SHIFT) | self.fflags as u64
    }

    /// Returns `mstatus` with the SD summary bit filled in.
    ///
    /// SD is bit 31 on RV32 and bit 63 otherwise.
    const fn mstatus_view(&self) -> u64 {
        let sd = if matches!(
            FsState::from_bits(self.mstatus >> MSTATUS_FS_SHIFT),
            FsState::Dirty
        ) {
            1u64 << if self.xlen == 32 { 31 } else { 63 }
        } else {
            0
        };
        self.mstatus | sd
    }

    /// Marks FP state dirty after a write to one of the FP CSRs.
    fn dirty_fp(&mut self) {
        self.set_fs(FsState::Dirty);
    }
}

impl Default for Csrs {
    /// A 64-bit CSR file for hart 0.
    fn default() -> Self {
        Self::new(0, 64)
    }
}

impl CsrInterface for Csrs {
    #[inline(always)]
    fn fs(&self) -> FsState {
        FsState::from_bits(self.mstatus >> MSTATUS_FS_SHIFT)
    }

    #[inline(always)]
    fn set_fs(&mut self, fs: FsState) {
        self.mstatus = (self.mstatus & !MSTATUS_FS) | (fs.bits() << MSTATUS_FS_SHIFT);
    }

    fn fflags(&self) -> u8 {
        self.fflags
    }

    fn set_fflags(&mut self, flags: u8) {
        self.fflags = flags & FFLAGS_MASK;
    }

    fn frm(&self) -> u8 {
        self.frm
    }

    fn set_frm(&mut self, rm: u8) {
        self.frm = rm & FRM_MASK;
    }

    fn raise_trap(&mut self, trap: &Trap, epc: u64) -> u64 {
        self.mepc = epc;
        self.mcause = trap.cause();
        self.mtval = trap.tval();
        // Synchronous exceptions always enter at BASE, even in vectored mode.
        self.mtvec & !MTVEC_MODE_MASK
    }

    fn read(&self, addr: u32) -> Option<u64> {
        let val = match addr {
            FFLAGS => self.fflags as u64,
            FRM => self.frm as u64,
            FCSR => self.fcsr(),
            MSTATUS => self.mstatus_view(),
            MISA => self.misa,
            MTVEC => self.mtvec,
            MSCRATCH => self.mscratch,
            MEPC => self.mepc,
            MCAUSE => self.mcause,
            MTVAL => self.mtval,
            MHARTID => self.mhartid,
            _ => return None,
        };
        Some(val)
    }

    fn write(&mut self, addr: u32, val: u64) -> bool {
        match addr {
            FFLAGS => {
                self.set_fflags(val as u8);
                self.dirty_fp();
            }
            FRM => {
                self.set_frm(val as u8);
                self.dirty_fp();
            }
            FCSR => {
                self.set_fflags(val as u8);
                self.set_frm((val >> FCSR_FRM_SHIFT) as u8);
                self.dirty_fp();
            }
            MSTATUS => self.mstatus = val & MSTATUS_WRITABLE,
            // WARL: the implemented ISA is fixed by the host.
            MISA => {}
            MTVEC => self.mtvec = val,
            MSCRATCH => self.mscratch = val,
            MEPC => self.mepc = val & !1,
            MCAUSE => self.mcause = val,
            MTVAL => self.mtval = val,
            _ => return false,
        }
        true
    }

    fn set_isa(&mut self, misa: u64) {
        self.misa = misa;
    }
}
