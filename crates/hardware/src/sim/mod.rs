//! Width-erased hart wrapper.
//!
//! Handlers are monomorphized per register width, so a configuration that
//! picks the width at runtime needs a sum type over the two instantiations.
//! [`Machine`] wraps that type together with the configured batch size; it
//! forwards the batch entry point and the common host accessors to whichever
//! hart it holds.

use std::sync::Arc;

use crate::common::error::ConfigError;
use crate::common::xlen::{Rv32, Rv64};
use crate::config::{HartConfig, XlenKind};
use crate::core::{BatchExit, BatchOutcome, Hart, HartSignal};
use crate::soc::Bus;

/// A hart of either register width.
#[derive(Debug)]
enum AnyHart {
    Rv32(Hart<Rv32>),
    Rv64(Hart<Rv64>),
}

/// A configured hart and the instruction budget of each batch it runs.
#[derive(Debug)]
pub struct Machine {
    hart: AnyHart,
    batch_size: u64,
}

/// Applies `$body` to the inner hart regardless of width.
macro_rules! with_hart {
    ($machine:expr, $hart:ident => $body:expr) => {
        match $machine {
            AnyHart::Rv32($hart) => $body,
            AnyHart::Rv64($hart) => $body,
        }
    };
}

impl Machine {
    /// Builds the hart described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration fails validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use rvhart_core::config::HartConfig;
    /// use rvhart_core::sim::Machine;
    /// use rvhart_core::soc::GuestMemory;
    ///
    /// let config = HartConfig::from_json(r#"{ "xlen": "rv32" }"#).unwrap();
    /// let machine = Machine::new(&config, Arc::new(GuestMemory::new(0x8000_0000, 4096))).unwrap();
    /// assert_eq!(machine.xlen(), 32);
    /// assert_eq!(machine.batch_size(), 4096);
    /// ```
    pub fn new(config: &HartConfig, bus: Arc<dyn Bus>) -> Result<Self, ConfigError> {
        let hart = match config.xlen {
            XlenKind::Rv32 => AnyHart::Rv32(Hart::from_config(config, bus)?),
            XlenKind::Rv64 => AnyHart::Rv64(Hart::from_config(config, bus)?),
        };
        tracing::debug!(
            hart = config.hart_id,
            xlen = config.xlen.bits(),
            pc = format_args!("{:#x}", config.reset_pc),
            batch_size = config.batch_size,
            "machine created"
        );
        Ok(Self {
            hart,
            batch_size: config.batch_size,
        })
    }

    /// Register width in bits.
    pub const fn xlen(&self) -> u32 {
        match self.hart {
            AnyHart::Rv32(_) => 32,
            AnyHart::Rv64(_) => 64,
        }
    }

    /// Instruction budget of each batch [`run`](Self::run) executes.
    pub const fn batch_size(&self) -> u64 {
        self.batch_size
    }

    /// Executes up to `budget` instructions. See [`Hart::run_batch`].
    pub fn run_batch(&mut self, budget: u64) -> BatchOutcome {
        with_hart!(&mut self.hart, hart => hart.run_batch(budget))
    }

    /// Executes one batch of the configured size.
    pub fn next_batch(&mut self) -> BatchOutcome {
        self.run_batch(self.batch_size)
    }

    /// Runs batches of the configured size until one ends for a reason other
    /// than an exhausted budget.
    ///
    /// # Returns
    ///
    /// The final batch's exit reason and the total instructions retired.
    pub fn run(&mut self) -> BatchOutcome {
        let mut retired = 0;
        loop {
            let outcome = self.next_batch();
            retired += outcome.retired;
            if outcome.exit != BatchExit::BudgetExhausted {
                return BatchOutcome {
                    exit: outcome.exit,
                    retired,
                };
            }
        }
    }

    /// Program counter.
    pub fn pc(&self) -> u64 {
        with_hart!(&self.hart, hart => hart.pc())
    }

    /// Redirects execution.
    pub fn set_pc(&mut self, pc: u64) {
        with_hart!(&mut self.hart, hart => hart.set_pc(pc));
    }

    /// Reads integer register `idx`, zero-extended.
    pub fn x(&self, idx: usize) -> u64 {
        with_hart!(&self.hart, hart => hart.x(idx))
    }

    /// Writes integer register `idx`.
    pub fn set_x(&mut self, idx: usize, val: u64) {
        with_hart!(&mut self.hart, hart => hart.set_x(idx, val));
    }

    /// Raw 64-bit slot of FP register `idx`.
    pub fn f(&self, idx: usize) -> u64 {
        with_hart!(&self.hart, hart => hart.f64_bits(idx))
    }

    /// The hart's event flag.
    pub fn signal(&self) -> Arc<HartSignal> {
        with_hart!(&self.hart, hart => hart.signal())
    }
}
