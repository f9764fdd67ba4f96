//! RISC-V Base Integer (I) dispatch identifiers.
//!
//! Each constant is the 9-bit table identifier `{bit 25, funct3, opcode[6:2]}`
//! of an instruction or instruction pair. Entries sharing a slot (ADD/SUB,
//! SRL/SRA, SRLI/SRAI) are separated by their handler.

/// Load Upper Immediate (U-type).
pub const LUI: usize = 0x0D;
/// Add Upper Immediate to PC (U-type).
pub const AUIPC: usize = 0x05;
/// Jump and Link (J-type).
pub const JAL: usize = 0x1B;
/// Jump and Link Register.
pub const JALR: usize = 0x19;

/// Branch if equal.
pub const BEQ: usize = 0x18;
/// Branch if not equal.
pub const BNE: usize = 0x38;
/// Branch if less than (signed).
pub const BLT: usize = 0x98;
/// Branch if greater or equal (signed).
pub const BGE: usize = 0xB8;
/// Branch if less than (unsigned).
pub const BLTU: usize = 0xD8;
/// Branch if greater or equal (unsigned).
pub const BGEU: usize = 0xF8;

/// Load byte.
pub const LB: usize = 0x00;
/// Load halfword.
pub const LH: usize = 0x20;
/// Load word.
pub const LW: usize = 0x40;
/// Load byte unsigned.
pub const LBU: usize = 0x80;
/// Load halfword unsigned.
pub const LHU: usize = 0xA0;

/// Store byte.
pub const SB: usize = 0x08;
/// Store halfword.
pub const SH: usize = 0x28;
/// Store word.
pub const SW: usize = 0x48;

/// Add immediate.
pub const ADDI: usize = 0x04;
/// Set less than immediate.
pub const SLTI: usize = 0x44;
/// Set less than immediate unsigned.
pub const SLTIU: usize = 0x64;
/// XOR immediate.
pub const XORI: usize = 0x84;
/// OR immediate.
pub const ORI: usize = 0xC4;
/// AND immediate.
pub const ANDI: usize = 0xE4;
/// Shift left logical immediate.
pub const SLLI: usize = 0x24;
/// Shift right logical/arithmetic immediate.
pub const SRLI_SRAI: usize = 0xA4;

/// Add / subtract.
pub const ADD_SUB: usize = 0x0C;
/// Shift left logical.
pub const SLL: usize = 0x2C;
/// Set less than.
pub const SLT: usize = 0x4C;
/// Set less than unsigned.
pub const SLTU: usize = 0x6C;
/// XOR.
pub const XOR: usize = 0x8C;
/// Shift right logical / arithmetic.
pub const SRL_SRA: usize = 0xAC;
/// OR.
pub const OR: usize = 0xCC;
/// AND.
pub const AND: usize = 0xEC;

/// Memory fence.
pub const FENCE: usize = 0x03;
/// Instruction fence.
pub const FENCE_I: usize = 0x23;

/// Add immediate word (RV64).
pub const ADDIW: usize = 0x06;
/// Shift left logical immediate word (RV64).
pub const SLLIW: usize = 0x26;
/// Shift right logical/arithmetic immediate word (RV64).
pub const SRLIW_SRAIW: usize = 0xA6;
/// Add / subtract word (RV64).
pub const ADDW_SUBW: usize = 0x0E;
/// Shift left logical word (RV64).
pub const SLLW: usize = 0x2E;
/// Shift right logical / arithmetic word (RV64).
pub const SRLW_SRAW: usize = 0xAE;
/// Load word unsigned (RV64).
pub const LWU: usize = 0xC0;
/// Load doubleword (RV64).
pub const LD: usize = 0x60;
/// Store doubleword (RV64).
pub const SD: usize = 0x68;

/// funct7 selecting the alternate operation of a shared slot (SUB, SRA).
pub const FUNCT7_ALT: u32 = 0b010_0000;

/// funct6 of SRAI on RV64 (bit 25 is `shamt[5]`).
pub const FUNCT6_SRAI: u32 = 0b01_0000;
