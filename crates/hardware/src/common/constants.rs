//! Global interpreter constants.
//!
//! This module defines constants shared across the interpreter. It includes:
//! 1. **Instruction Constants:** Parcel sizes and the compressed-encoding marker.
//! 2. **Table Constants:** Dispatch table dimensions.
//! 3. **Register Constants:** Architectural register counts.
//! 4. **Memory Constants:** Reservation granularity for LR/SC.

/// Size of a compressed (16-bit) RISC-V instruction in bytes.
pub const INSTRUCTION_SIZE_16: u64 = 2;

/// Size of a standard (32-bit) RISC-V instruction in bytes.
pub const INSTRUCTION_SIZE_32: u64 = 4;

/// Bit mask for checking if an instruction is compressed.
pub const COMPRESSED_INSTRUCTION_MASK: u32 = 0x3;

/// Low-bit pattern marking a full-width instruction.
pub const FULL_INSTRUCTION_VALUE: u32 = 0x3;

/// Number of slots in the full-width dispatch table (9-bit identifier).
pub const FULL_TABLE_SIZE: usize = 512;

/// Number of slots in the compressed dispatch table (5-bit identifier).
pub const COMPRESSED_TABLE_SIZE: usize = 32;

/// Number of integer and floating-point architectural registers.
pub const REGISTER_COUNT: usize = 32;

/// Size of the block an LR reservation covers, in bytes.
pub const RESERVATION_LINE_BYTES: u64 = 64;
