use std::sync::Arc;

use rvhart_core::common::Xlen;
use rvhart_core::config::ExtensionConfig;
use rvhart_core::core::arch::csr::{MCAUSE, MTVAL, MTVEC};
use rvhart_core::core::{BatchOutcome, Hart};
use rvhart_core::soc::{Bus, GuestMemory};
use tracing_subscriber::EnvFilter;

/// Start of test RAM; also the reset PC of every test hart.
pub const RAM_BASE: u64 = 0x8000_0000;

/// Size of test RAM.
pub const RAM_SIZE: usize = 64 * 1024;

/// Trap vector installed in `mtvec`, inside RAM.
pub const TRAP_VECTOR: u64 = RAM_BASE + 0x8000;

/// Scratch data area, well clear of code and the trap vector.
pub const DATA_BASE: u64 = RAM_BASE + 0x4000;

/// Installs a test-writer subscriber once per process. `RUST_LOG` controls the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A hart running out of its own RAM.
pub struct TestContext<X: Xlen> {
    pub hart: Hart<X>,
    pub mem: Arc<GuestMemory>,
}

impl<X: Xlen> Default for TestContext<X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X: Xlen> TestContext<X> {
    /// Hart with every extension enabled.
    pub fn new() -> Self {
        Self::with_extensions(ExtensionConfig::ALL)
    }

    /// Hart with the given extensions, PC at [`RAM_BASE`] and `mtvec` at [`TRAP_VECTOR`].
    pub fn with_extensions(extensions: ExtensionConfig) -> Self {
        init_tracing();
        let mem = Arc::new(GuestMemory::new(RAM_BASE, RAM_SIZE));
        let bus: Arc<dyn Bus> = mem.clone();
        let mut hart = Hart::new(0, bus);
        hart.configure(extensions);
        hart.set_pc(RAM_BASE);
        assert!(hart.csr_mut().write(MTVEC, TRAP_VECTOR));
        Self { hart, mem }
    }

    /// Base integer set only.
    pub fn base() -> Self {
        Self::with_extensions(ExtensionConfig::NONE)
    }

    /// Writes 32-bit instructions at [`RAM_BASE`] and points the PC at them.
    pub fn load_program(mut self, insns: &[u32]) -> Self {
        self.mem.write_words(RAM_BASE, insns).unwrap();
        self.hart.set_pc(RAM_BASE);
        self
    }

    /// Writes 16-bit parcels at [`RAM_BASE`] and points the PC at them.
    pub fn load_parcels(mut self, parcels: &[u16]) -> Self {
        let bytes: Vec<u8> = parcels.iter().flat_map(|p| p.to_le_bytes()).collect();
        self.mem.write_bytes(RAM_BASE, &bytes).unwrap();
        self.hart.set_pc(RAM_BASE);
        self
    }

    /// Runs one batch.
    pub fn run(&mut self, budget: u64) -> BatchOutcome {
        self.hart.run_batch(budget)
    }

    /// Places `insn` at the current PC and executes exactly it.
    pub fn exec(&mut self, insn: u32) -> BatchOutcome {
        self.mem.write_words(self.hart.pc(), &[insn]).unwrap();
        self.hart.run_batch(1)
    }

    /// Places a compressed `insn` at the current PC and executes exactly it.
    pub fn exec_c(&mut self, insn: u16) -> BatchOutcome {
        self.mem.write_bytes(self.hart.pc(), &insn.to_le_bytes()).unwrap();
        self.hart.run_batch(1)
    }

    pub fn x(&self, reg: usize) -> u64 {
        self.hart.x(reg)
    }

    pub fn set_x(&mut self, reg: usize, val: u64) {
        self.hart.set_x(reg, val);
    }

    pub fn mcause(&self) -> u64 {
        self.hart.csr().read(MCAUSE).unwrap()
    }

    pub fn mtval(&self) -> u64 {
        self.hart.csr().read(MTVAL).unwrap()
    }

    /// Reads a little-endian value of `len` bytes from RAM.
    pub fn read_mem(&self, addr: u64, len: usize) -> u64 {
        let bytes = self.mem.read_bytes(addr, len).unwrap();
        let mut buf = [0u8; 8];
        buf[..len].copy_from_slice(&bytes);
        u64::from_le_bytes(buf)
    }

    /// Writes the low `len` bytes of `val` to RAM.
    pub fn write_mem(&self, addr: u64, len: usize, val: u64) {
        self.mem.write_bytes(addr, &val.to_le_bytes()[..len]).unwrap();
    }
}
