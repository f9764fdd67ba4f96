//! RISC-V Compressed (C) dispatch identifiers.
//!
//! A compressed identifier is `{funct3, quadrant}`. Identifiers that name a
//! different instruction on RV32 and RV64 appear once per width.

/// C.ADDI4SPN.
pub const C_ADDI4SPN: usize = 0x00;
/// C.LW.
pub const C_LW: usize = 0x08;
/// C.LD (RV64).
pub const C_LD: usize = 0x0C;
/// C.SW.
pub const C_SW: usize = 0x18;
/// C.SD (RV64).
pub const C_SD: usize = 0x1C;

/// C.ADDI (and C.NOP).
pub const C_ADDI: usize = 0x01;
/// C.JAL (RV32).
pub const C_JAL: usize = 0x05;
/// C.ADDIW (RV64).
pub const C_ADDIW: usize = 0x05;
/// C.LI.
pub const C_LI: usize = 0x09;
/// C.ADDI16SP (rd = x2) and C.LUI.
pub const C_LUI_ADDI16SP: usize = 0x0D;
/// C.SRLI, C.SRAI, C.ANDI and the register-register group.
pub const C_MISC_ALU: usize = 0x11;
/// C.J.
pub const C_J: usize = 0x15;
/// C.BEQZ.
pub const C_BEQZ: usize = 0x19;
/// C.BNEZ.
pub const C_BNEZ: usize = 0x1D;

/// C.SLLI.
pub const C_SLLI: usize = 0x02;
/// C.LWSP.
pub const C_LWSP: usize = 0x0A;
/// C.LDSP (RV64).
pub const C_LDSP: usize = 0x0E;
/// C.JR, C.MV, C.EBREAK, C.JALR and C.ADD.
pub const C_JR_MV_ADD: usize = 0x12;
/// C.SWSP.
pub const C_SWSP: usize = 0x1A;
/// C.SDSP (RV64).
pub const C_SDSP: usize = 0x1E;
