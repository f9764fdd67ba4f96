use std::sync::Arc;

use parking_lot::Mutex;
use rvhart_core::common::Trap;
use rvhart_core::core::arch::csr::{CsrInterface, Csrs, FsState};

/// Trap log shared between a [`RecordingCsr`] and the test observing it.
pub type TrapLog = Arc<Mutex<Vec<(Trap, u64)>>>;

/// CSR file that logs every trap with its `epc` and vectors to a fixed address.
#[derive(Debug)]
pub struct RecordingCsr {
    inner: Csrs,
    vector: u64,
    log: TrapLog,
    pub isa: Arc<Mutex<u64>>,
}

impl RecordingCsr {
    pub fn new(xlen: u32, vector: u64) -> (Self, TrapLog) {
        let log = TrapLog::default();
        let csr = Self {
            inner: Csrs::new(0, xlen),
            vector,
            log: Arc::clone(&log),
            isa: Arc::default(),
        };
        (csr, log)
    }
}

impl CsrInterface for RecordingCsr {
    fn fs(&self) -> FsState {
        self.inner.fs()
    }

    fn set_fs(&mut self, fs: FsState) {
        self.inner.set_fs(fs);
    }

    fn fflags(&self) -> u8 {
        self.inner.fflags()
    }

    fn set_fflags(&mut self, flags: u8) {
        self.inner.set_fflags(flags);
    }

    fn frm(&self) -> u8 {
        self.inner.frm()
    }

    fn set_frm(&mut self, rm: u8) {
        self.inner.set_frm(rm);
    }

    fn raise_trap(&mut self, trap: &Trap, epc: u64) -> u64 {
        self.log.lock().push((trap.clone(), epc));
        self.vector
    }

    fn read(&self, addr: u32) -> Option<u64> {
        self.inner.read(addr)
    }

    fn write(&mut self, addr: u32, val: u64) -> bool {
        self.inner.write(addr, val)
    }

    fn set_isa(&mut self, misa: u64) {
        *self.isa.lock() = misa;
    }
}
