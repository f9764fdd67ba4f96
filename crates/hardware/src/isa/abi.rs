//! RISC-V ABI register indices used by the compressed encodings.

/// Register x0 (zero register, always zero).
pub const REG_ZERO: usize = 0;
/// Register x1 (return address, ra). Link register of C.JAL and C.JALR.
pub const REG_RA: usize = 1;
/// Register x2 (stack pointer, sp). Base of the stack-relative forms.
pub const REG_SP: usize = 2;
