//! RISC-V Privileged Architecture Opcodes.
//!
//! Dispatch identifier of the SYSTEM major opcode and the fixed encodings
//! distinguished inside its handler.

/// Dispatch identifier of the SYSTEM major opcode (0b1110011).
///
/// Installed for every funct3 and both values of bit 25; the handler splits
/// CSR accesses from the environment instructions.
pub const SYSTEM: usize = 0x1C;

/// Environment Call (ECALL).
pub const ECALL: u32 = 0x0000_0073;

/// Environment Break (EBREAK).
/// Used by debuggers to cause a breakpoint trap.
pub const EBREAK: u32 = 0x0010_0073;

/// Wait for Interrupt (WFI).
/// Ends the current batch so the host can idle the hart.
pub const WFI: u32 = 0x1050_0073;

/// funct3 of ECALL, EBREAK, WFI and the trap returns.
pub const PRIV: u32 = 0b000;
/// Atomic Read/Write CSR (CSRRW).
pub const CSRRW: u32 = 0b001;
/// Atomic Read and Set Bits in CSR (CSRRS).
pub const CSRRS: u32 = 0b010;
/// Atomic Read and Clear Bits in CSR (CSRRC).
pub const CSRRC: u32 = 0b011;
/// Atomic Read/Write CSR Immediate (CSRRWI).
pub const CSRRWI: u32 = 0b101;
/// Atomic Read and Set Bits in CSR Immediate (CSRRSI).
pub const CSRRSI: u32 = 0b110;
/// Atomic Read and Clear Bits in CSR Immediate (CSRRCI).
pub const CSRRCI: u32 = 0b111;
