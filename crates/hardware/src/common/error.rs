//! Trap, bus, and configuration error definitions.
//!
//! This module defines the error handling vocabulary of the interpreter. It provides:
//! 1. **Trap Representation:** Guest-visible synchronous exceptions raised by handlers.
//! 2. **Bus Errors:** Failures reported by the memory interface, converted into traps.
//! 3. **Configuration Errors:** Host-side failures while building a hart.
//!
//! Guest faults are values: a handler that faults raises a [`Trap`] through the
//! CSR interface and returns. Nothing in the dispatch path returns a host error.

use thiserror::Error;

use crate::common::data::{AccessType, MemWidth};
use crate::isa::privileged::cause::exception;

/// RISC-V synchronous exceptions the interpreter can raise.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Trap {
    /// Jump target or fetch address not aligned to the instruction size.
    #[error("instruction address misaligned ({0:#x})")]
    InstructionAddressMisaligned(u64),

    /// Instruction fetch outside mapped memory.
    #[error("instruction access fault ({0:#x})")]
    InstructionAccessFault(u64),

    /// Unrecognized, reserved, or disabled encoding. Carries the raw bits.
    #[error("illegal instruction ({0:#x})")]
    IllegalInstruction(u32),

    /// `EBREAK` / `C.EBREAK`. Carries the program counter.
    #[error("breakpoint ({0:#x})")]
    Breakpoint(u64),

    /// Misaligned load-reserved.
    #[error("load address misaligned ({0:#x})")]
    LoadAddressMisaligned(u64),

    /// Load outside mapped memory.
    #[error("load access fault ({0:#x})")]
    LoadAccessFault(u64),

    /// Misaligned store-conditional or AMO.
    #[error("store/AMO address misaligned ({0:#x})")]
    StoreAddressMisaligned(u64),

    /// Store or AMO outside mapped memory.
    #[error("store/AMO access fault ({0:#x})")]
    StoreAccessFault(u64),

    /// `ECALL`. Privilege levels are not modeled, so this reports the M-mode cause.
    #[error("environment call")]
    EnvironmentCall,
}

impl Trap {
    /// Returns the exception code written to `mcause`.
    pub const fn cause(&self) -> u64 {
        match self {
            Self::InstructionAddressMisaligned(_) => exception::INSTRUCTION_ADDRESS_MISALIGNED,
            Self::InstructionAccessFault(_) => exception::INSTRUCTION_ACCESS_FAULT,
            Self::IllegalInstruction(_) => exception::ILLEGAL_INSTRUCTION,
            Self::Breakpoint(_) => exception::BREAKPOINT,
            Self::LoadAddressMisaligned(_) => exception::LOAD_ADDRESS_MISALIGNED,
            Self::LoadAccessFault(_) => exception::LOAD_ACCESS_FAULT,
            Self::StoreAddressMisaligned(_) => exception::STORE_ADDRESS_MISALIGNED,
            Self::StoreAccessFault(_) => exception::STORE_ACCESS_FAULT,
            Self::EnvironmentCall => exception::ENVIRONMENT_CALL_FROM_M_MODE,
        }
    }

    /// Returns the value written to `mtval`.
    ///
    /// Faulting address for memory traps, raw instruction bits for illegal
    /// instructions, zero for environment calls.
    pub const fn tval(&self) -> u64 {
        match self {
            Self::InstructionAddressMisaligned(v)
            | Self::InstructionAccessFault(v)
            | Self::Breakpoint(v)
            | Self::LoadAddressMisaligned(v)
            | Self::LoadAccessFault(v)
            | Self::StoreAddressMisaligned(v)
            | Self::StoreAccessFault(v) => *v,
            Self::IllegalInstruction(bits) => *bits as u64,
            Self::EnvironmentCall => 0,
        }
    }

    /// Builds the access-fault trap matching an access type.
    pub const fn access_fault(access: AccessType, addr: u64) -> Self {
        match access {
            AccessType::Fetch => Self::InstructionAccessFault(addr),
            AccessType::Read => Self::LoadAccessFault(addr),
            AccessType::Write => Self::StoreAccessFault(addr),
        }
    }
}

/// Failure reported by a [`Bus`](crate::soc::Bus) implementation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BusError {
    /// No memory backs `[addr, addr + width)`.
    #[error("access of {width:?} at {addr:#x} is outside mapped memory")]
    OutOfRange {
        /// Faulting address.
        addr: u64,
        /// Access width.
        width: MemWidth,
    },

    /// The bus does not implement accesses of this width.
    #[error("{width:?} access is not supported by this bus")]
    Unsupported {
        /// Requested width.
        width: MemWidth,
    },
}

/// Host-side error while validating or building a hart.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An extension was enabled without the extension it builds on.
    #[error("extension {extension} requires extension {requires}")]
    MissingDependency {
        /// The extension that was requested.
        extension: char,
        /// The extension it depends on.
        requires: char,
    },

    /// The reset program counter is not aligned to the minimum instruction size.
    #[error("reset pc {0:#x} is not aligned")]
    MisalignedResetPc(u64),

    /// A batch of zero instructions would never make progress.
    #[error("batch size must be at least one instruction")]
    ZeroBatchSize,

    /// The configuration selects a different register width than the hart type.
    #[error("configuration selects {found}-bit registers, hart is {expected}-bit")]
    XlenMismatch {
        /// Width of the hart being built.
        expected: u32,
        /// Width named by the configuration.
        found: u32,
    },

    /// JSON configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
