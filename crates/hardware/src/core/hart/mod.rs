//! Hart state and host-facing control.
//!
//! This module defines [`Hart`], the container for one RISC-V hardware thread.
//! It coordinates the following:
//! 1. **State Management:** Integer and FP registers, the program counter, and the
//!    CSR interface.
//! 2. **Dispatch Tables:** The hart's own [`OpcodeTable`], populated by the
//!    extension switches below.
//! 3. **Memory:** A shared [`Bus`] used for fetches, loads, stores and atomics.
//! 4. **Host Control:** Extension switches, the [`HartSignal`] event flag, and the
//!    batch entry point in [`execution`].
//!
//! Instruction handlers receive `&mut Hart<X>` and use the accessor methods
//! defined here and in the submodules.

/// Batch execution loop.
pub mod execution;

/// Memory access helpers used by instruction handlers.
pub mod memory;

/// Host-to-hart event flag.
pub mod signal;

/// Trap entry and batch exit reporting.
pub mod trap;

use std::sync::Arc;

use crate::common::error::{ConfigError, Trap};
use crate::common::reg::RegisterFile;
use crate::common::xlen::Xlen;
use crate::config::{ExtensionConfig, HartConfig};
use crate::core::arch::csr::{CsrInterface, Csrs, FsState};
use crate::core::arch::fpr::Fpr;
use crate::core::units::fpu::exception_flags::FpFlags;
use crate::core::units::fpu::nan_handling::box_f32_bits;
use crate::core::units::fpu::rounding_modes::{RM_DYNAMIC, RoundingMode};
use crate::isa::table::OpcodeTable;
use crate::isa::{privileged, rva, rvc, rvd, rvf, rvi, rvm};
use crate::soc::Bus;

pub use self::signal::{HartEvent, HartSignal};
pub use self::trap::{BatchExit, BatchOutcome};

/// MXL encoding for a 32-bit hart.
const MXL_32: u64 = 1;

/// MXL encoding for a 64-bit hart.
const MXL_64: u64 = 2;

/// One RISC-V hardware thread.
///
/// A hart owns its registers, CSR state and dispatch tables; memory is
/// shared with other harts through the bus. The hart is mutated only by its
/// own [`run_batch`](Hart::run_batch) and by `&mut self` host calls between
/// batches.
#[derive(Debug)]
pub struct Hart<X: Xlen> {
    regs: RegisterFile<X>,
    pc: u64,
    next_pc: u64,
    csr: Box<dyn CsrInterface>,
    bus: Arc<dyn Bus>,
    table: OpcodeTable<X>,
    extensions: ExtensionConfig,
    signal: Arc<HartSignal>,
    hart_id: u64,
    exit: Option<BatchExit>,
}

impl<X: Xlen> Hart<X> {
    /// Creates a hart with the reference [`Csrs`] file and only the base
    /// integer instructions installed.
    ///
    /// # Arguments
    ///
    /// * `hart_id` - Value of `mhartid`; also tags LR reservations on the bus.
    /// * `bus` - Shared memory interface.
    pub fn new(hart_id: u64, bus: Arc<dyn Bus>) -> Self {
        Self::with_csr(hart_id, bus, Box::new(Csrs::new(hart_id, X::VALUE)))
    }

    /// Creates a hart backed by a host-provided CSR and trap implementation.
    pub fn with_csr(hart_id: u64, bus: Arc<dyn Bus>, csr: Box<dyn CsrInterface>) -> Self {
        let mut hart = Self {
            regs: RegisterFile::new(),
            pc: 0,
            next_pc: 0,
            csr,
            bus,
            table: OpcodeTable::new(),
            extensions: ExtensionConfig::NONE,
            signal: Arc::new(HartSignal::new()),
            hart_id,
            exit: None,
        };
        hart.init_decoder();
        hart
    }

    /// Builds a hart from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is inconsistent or names a
    /// different register width than `X`.
    pub fn from_config(config: &HartConfig, bus: Arc<dyn Bus>) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.xlen.bits() != X::VALUE {
            return Err(ConfigError::XlenMismatch {
                expected: X::VALUE,
                found: config.xlen.bits(),
            });
        }
        let mut hart = Self::new(config.hart_id, bus);
        hart.set_pc(config.reset_pc);
        hart.configure(config.extensions);
        Ok(hart)
    }

    /// Resets the dispatch tables to the base integer set.
    ///
    /// Every optional extension is switched off; registers, PC and CSRs are
    /// untouched.
    pub fn init_decoder(&mut self) {
        self.table.reset();
        self.extensions = ExtensionConfig::NONE;
        self.table.apply(&rvi::slots::<X>(), true);
        self.table.apply(&privileged::slots::<X>(), true);
        tracing::trace!(hart = self.hart_id, xlen = X::NAME, "decoder initialized");
        self.publish_isa();
    }

    /// Switches each extension to the state `extensions` asks for.
    pub fn configure(&mut self, extensions: ExtensionConfig) {
        self.enable_m(extensions.m);
        self.enable_a(extensions.a);
        self.enable_f(extensions.f);
        self.enable_d(extensions.d);
        self.enable_c(extensions.c);
    }

    /// Enables or disables compressed instructions.
    ///
    /// Enabling also installs the compressed FP loads and stores of whichever
    /// of F and D are on.
    pub fn enable_c(&mut self, on: bool) {
        tracing::trace!(hart = self.hart_id, on, "C extension");
        self.extensions.c = on;
        self.table.apply_c(&rvc::slots::<X>(), on);
        self.sync_compressed_fp();
        self.publish_isa();
    }

    /// Enables or disables integer multiply and divide.
    pub fn enable_m(&mut self, on: bool) {
        tracing::trace!(hart = self.hart_id, on, "M extension");
        self.extensions.m = on;
        self.table.apply(&rvm::slots::<X>(), on);
        self.publish_isa();
    }

    /// Enables or disables atomics.
    pub fn enable_a(&mut self, on: bool) {
        tracing::trace!(hart = self.hart_id, on, "A extension");
        self.extensions.a = on;
        self.table.apply(&rva::slots::<X>(), on);
        self.publish_isa();
    }

    /// Switches single-precision FP between its handlers and the illegal handler.
    ///
    /// Disabling F also disables D.
    pub fn enable_f(&mut self, on: bool) {
        tracing::debug!(hart = self.hart_id, on, "F extension");
        if !on && self.extensions.d {
            self.enable_d(false);
        }
        self.extensions.f = on;
        self.table.apply(&rvf::slots::<X>(), on);
        self.sync_compressed_fp();
        self.publish_isa();
    }

    /// Switches double-precision FP between its handlers and the illegal handler.
    ///
    /// FCVT.S.D lives in the single-precision slot and follows this switch too.
    pub fn enable_d(&mut self, on: bool) {
        tracing::debug!(hart = self.hart_id, on, "D extension");
        if on && !self.extensions.f {
            tracing::warn!(hart = self.hart_id, "D enabled while F is off");
        }
        self.extensions.d = on;
        self.table.apply(&rvd::slots::<X>(), on);
        self.sync_compressed_fp();
        self.publish_isa();
    }

    /// Installs or removes the compressed FP slots to match C, F and D.
    fn sync_compressed_fp(&mut self) {
        let ext = self.extensions;
        self.table.apply_c(&rvf::compressed_slots::<X>(), ext.c && ext.f);
        self.table.apply_c(&rvd::compressed_slots::<X>(), ext.c && ext.d);
    }

    /// Reports the implemented ISA to the CSR interface.
    fn publish_isa(&mut self) {
        let mxl = if X::VALUE == 64 { MXL_64 } else { MXL_32 };
        let misa = (mxl << (X::VALUE - 2)) | self.extensions.misa_letters();
        self.csr.set_isa(X::truncate(misa));
    }

    /// Hart identifier.
    pub const fn hart_id(&self) -> u64 {
        self.hart_id
    }

    /// Extensions currently installed.
    pub const fn extensions(&self) -> ExtensionConfig {
        self.extensions
    }

    /// The hart's dispatch tables.
    pub const fn table(&self) -> &OpcodeTable<X> {
        &self.table
    }

    /// The event flag hosts use to stop the hart or inject interrupts.
    pub fn signal(&self) -> Arc<HartSignal> {
        Arc::clone(&self.signal)
    }

    /// The shared memory interface.
    pub const fn bus(&self) -> &Arc<dyn Bus> {
        &self.bus
    }

    /// Program counter of the next instruction to execute.
    #[inline(always)]
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Redirects execution; the value is truncated to the register width.
    pub fn set_pc(&mut self, pc: u64) {
        self.pc = X::truncate(pc);
        self.next_pc = self.pc;
    }

    /// Address the current instruction falls through to, or its branch target.
    #[inline(always)]
    pub const fn next_pc(&self) -> u64 {
        self.next_pc
    }

    /// Reads integer register `idx`, zero-extended.
    #[inline(always)]
    pub fn x(&self, idx: usize) -> u64 {
        self.regs.read(idx)
    }

    /// Writes integer register `idx`; writes to `x0` are discarded.
    #[inline(always)]
    pub fn set_x(&mut self, idx: usize, val: u64) {
        self.regs.write(idx, val);
    }

    /// Reads integer register `idx` as a signed value of the register width.
    #[inline(always)]
    pub fn x_signed(&self, idx: usize) -> i64 {
        X::to_signed(self.regs.read(idx))
    }

    /// Register file view.
    pub const fn regs(&self) -> &RegisterFile<X> {
        &self.regs
    }

    /// Floating-point register view.
    pub const fn fpr(&self) -> &Fpr {
        self.regs.fpr()
    }

    /// Host write access to the FP registers. Does not change FS.
    pub const fn fpr_mut(&mut self) -> &mut Fpr {
        self.regs.fpr_mut()
    }

    /// CSR interface.
    pub fn csr(&self) -> &dyn CsrInterface {
        self.csr.as_ref()
    }

    /// Mutable CSR interface.
    pub fn csr_mut(&mut self) -> &mut dyn CsrInterface {
        self.csr.as_mut()
    }

    /// Sets the branch target of the current instruction.
    ///
    /// With C disabled, a target that is not 4-byte aligned raises
    /// `InstructionAddressMisaligned` instead.
    ///
    /// # Returns
    ///
    /// `false` if the jump trapped; the handler must not write its link register.
    #[inline(always)]
    pub fn jump(&mut self, target: u64) -> bool {
        let target = X::truncate(target);
        if !self.extensions.c && target & 0x3 != 0 {
            self.raise(Trap::InstructionAddressMisaligned(target));
            return false;
        }
        self.next_pc = target;
        true
    }

    /// True unless `mstatus.FS` is Off.
    #[inline(always)]
    pub fn fp_enabled(&self) -> bool {
        self.csr.fs() != FsState::Off
    }

    /// Reads FP register `idx` as NaN-unboxed single-precision bits.
    #[inline(always)]
    pub const fn f32_bits(&self, idx: usize) -> u32 {
        self.regs.fpr().read_f32_bits(idx)
    }

    /// Reads the raw 64-bit slot of FP register `idx`.
    #[inline(always)]
    pub const fn f64_bits(&self, idx: usize) -> u64 {
        self.regs.fpr().read(idx)
    }

    /// Writes single-precision bits, NaN-boxed, and marks FS dirty.
    #[inline(always)]
    pub fn set_f32_bits(&mut self, idx: usize, bits: u32) {
        self.set_fpr(idx, box_f32_bits(bits));
    }

    /// Writes a raw 64-bit FP slot and marks FS dirty.
    #[inline(always)]
    pub fn set_fpr(&mut self, idx: usize, val: u64) {
        self.regs.fpr_mut().write(idx, val);
        self.csr.set_fs(FsState::Dirty);
    }

    /// ORs exception flags into `fflags`. Non-empty flags dirty FS.
    #[inline(always)]
    pub fn accrue(&mut self, flags: FpFlags) {
        if !flags.is_empty() {
            let accrued = self.csr.fflags() | flags.bits();
            self.csr.set_fflags(accrued);
            self.csr.set_fs(FsState::Dirty);
        }
    }

    /// Resolves an instruction `rm` field to the effective rounding mode.
    ///
    /// Returns `None` for a reserved mode, which the caller turns into an
    /// illegal-instruction trap.
    pub fn rounding_mode(&self, rm: u32) -> Option<RoundingMode> {
        let frm = self.csr.frm();
        let mode = RoundingMode::resolve(rm as u8, frm);
        if mode.is_none() && rm as u8 == RM_DYNAMIC {
            tracing::warn!(hart = self.hart_id, frm, "invalid dynamic rounding mode");
        }
        mode
    }
}
