//! Exception codes reported in `mcause`.
//!
//! Only the synchronous exceptions a machine-mode-only hart can raise are
//! listed. Interrupt causes come from the host through
//! [`HartSignal::inject_interrupt`](crate::core::HartSignal::inject_interrupt)
//! and are not interpreted here.

/// Synchronous exception codes (interrupt bit clear).
pub mod exception {
    /// Instruction address misaligned.
    pub const INSTRUCTION_ADDRESS_MISALIGNED: u64 = 0;
    /// Instruction access fault.
    pub const INSTRUCTION_ACCESS_FAULT: u64 = 1;
    /// Illegal instruction.
    pub const ILLEGAL_INSTRUCTION: u64 = 2;
    /// Breakpoint.
    pub const BREAKPOINT: u64 = 3;
    /// Load address misaligned.
    pub const LOAD_ADDRESS_MISALIGNED: u64 = 4;
    /// Load access fault.
    pub const LOAD_ACCESS_FAULT: u64 = 5;
    /// Store/AMO address misaligned.
    pub const STORE_ADDRESS_MISALIGNED: u64 = 6;
    /// Store/AMO access fault.
    pub const STORE_ACCESS_FAULT: u64 = 7;
    /// Environment call from M-mode.
    pub const ENVIRONMENT_CALL_FROM_M_MODE: u64 = 11;
}
