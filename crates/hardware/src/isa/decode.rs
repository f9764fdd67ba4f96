//! RISC-V Instruction Decoder.
//!
//! This module turns fetched instruction bits into a dispatch decision. It provides:
//! 1. **Identifiers:** The 9-bit full-width and 5-bit compressed table keys.
//! 2. **Resolution:** [`Decoder::resolve`] looks the identifier up in a hart's
//!    [`OpcodeTable`] and returns the handler with its instruction bits.
//! 3. **Immediates:** Sign-extended R/I/S/B/U/J immediates and the scattered
//!    immediates of the compressed formats, as free functions called by handlers.
//!
//! Decoding never fails. Unknown identifiers resolve to the illegal-instruction
//! handler installed as the table default.

use crate::common::constants::{
    COMPRESSED_INSTRUCTION_MASK, FULL_INSTRUCTION_VALUE, INSTRUCTION_SIZE_16, INSTRUCTION_SIZE_32,
};
use crate::common::xlen::Xlen;
use crate::isa::table::{CompressedHandler, InsnHandler, OpcodeTable};

/// Computes the 9-bit dispatch identifier of a 32-bit instruction.
///
/// The identifier is `{funct7[0] (bit 25), funct3, opcode[6:2]}`.
#[inline(always)]
pub const fn full_id(insn: u32) -> usize {
    (((insn >> 16) & 0x100) | ((insn >> 7) & 0xE0) | ((insn >> 2) & 0x1F)) as usize
}

/// Computes the 5-bit dispatch identifier of a compressed instruction.
///
/// The identifier is `{funct3, quadrant}`.
#[inline(always)]
pub const fn compressed_id(insn: u16) -> usize {
    (((insn >> 11) & 0x1C) | (insn & 0x3)) as usize
}

/// Returns true if the low parcel starts a 16-bit instruction.
#[inline(always)]
pub const fn is_compressed(parcel: u16) -> bool {
    parcel as u32 & COMPRESSED_INSTRUCTION_MASK != FULL_INSTRUCTION_VALUE
}

/// A table lookup result: the handler and the bits it will receive.
pub enum Resolved<X: Xlen> {
    /// A 32-bit instruction.
    Full(InsnHandler<X>, u32),
    /// A 16-bit instruction.
    Compressed(CompressedHandler<X>, u16),
}

impl<X: Xlen> Resolved<X> {
    /// Length of the resolved instruction in bytes.
    pub const fn size(&self) -> u64 {
        match self {
            Self::Full(..) => INSTRUCTION_SIZE_32,
            Self::Compressed(..) => INSTRUCTION_SIZE_16,
        }
    }
}

impl<X: Xlen> std::fmt::Debug for Resolved<X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full(_, bits) => write!(f, "Full({bits:#010x})"),
            Self::Compressed(_, bits) => write!(f, "Compressed({bits:#06x})"),
        }
    }
}

/// Stateless instruction decoder.
#[derive(Debug)]
pub struct Decoder;

impl Decoder {
    /// Resolves instruction bits against a hart's dispatch tables.
    ///
    /// For a compressed instruction only the low 16 bits of `insn` are used.
    #[inline(always)]
    pub fn resolve<X: Xlen>(table: &OpcodeTable<X>, insn: u32) -> Resolved<X> {
        let parcel = insn as u16;
        if is_compressed(parcel) {
            Resolved::Compressed(table.compressed(compressed_id(parcel)), parcel)
        } else {
            Resolved::Full(table.full(full_id(insn)), insn)
        }
    }
}

/// Extracts `len` bits of `insn` starting at bit `lo`.
#[inline(always)]
const fn field(insn: u32, lo: u32, len: u32) -> u32 {
    (insn >> lo) & ((1 << len) - 1)
}

/// Sign-extends the low `bits` bits of `val`.
pub const fn sign_extend(val: u32, bits: u32) -> i64 {
    let shift = u32::BITS - bits;
    ((val as i32) << shift >> shift) as i64
}

/// I-type immediate, `insn[31:20]`.
pub const fn i_imm(insn: u32) -> i64 {
    ((insn as i32) >> 20) as i64
}

/// S-type immediate, `insn[31:25] | insn[11:7]`.
pub const fn s_imm(insn: u32) -> i64 {
    sign_extend((field(insn, 25, 7) << 5) | field(insn, 7, 5), 12)
}

/// B-type branch offset. Always even.
pub const fn b_imm(insn: u32) -> i64 {
    let imm = (field(insn, 31, 1) << 12)
        | (field(insn, 7, 1) << 11)
        | (field(insn, 25, 6) << 5)
        | (field(insn, 8, 4) << 1);
    sign_extend(imm, 13)
}

/// U-type immediate with the low 12 bits clear, sign-extended from bit 31.
pub const fn u_imm(insn: u32) -> i64 {
    ((insn & 0xFFFF_F000) as i32) as i64
}

/// J-type jump offset. Always even.
pub const fn j_imm(insn: u32) -> i64 {
    let imm = (field(insn, 31, 1) << 20)
        | (field(insn, 12, 8) << 12)
        | (field(insn, 20, 1) << 11)
        | (field(insn, 21, 10) << 1);
    sign_extend(imm, 21)
}

/// Extracts `len` bits of a compressed instruction starting at `lo`.
#[inline(always)]
const fn cbits(insn: u16, lo: u32, len: u32) -> u32 {
    field(insn as u32, lo, len)
}

/// Sign-extended 6-bit CI immediate (`C.ADDI`, `C.LI`, `C.ADDIW`, `C.ANDI`).
#[inline(always)]
pub const fn ci_imm(insn: u16) -> i64 {
    sign_extend((cbits(insn, 12, 1) << 5) | cbits(insn, 2, 5), 6)
}

/// 6-bit CI shift amount (`C.SLLI`, `C.SRLI`, `C.SRAI`).
#[inline(always)]
pub const fn ci_shamt(insn: u16) -> u32 {
    (cbits(insn, 12, 1) << 5) | cbits(insn, 2, 5)
}

/// Sign-extended `C.LUI` immediate, already shifted left by 12.
#[inline(always)]
pub const fn ci_lui_imm(insn: u16) -> i64 {
    sign_extend((cbits(insn, 12, 1) << 17) | (cbits(insn, 2, 5) << 12), 18)
}

/// Sign-extended `C.ADDI16SP` immediate (multiple of 16).
#[inline(always)]
pub const fn ci_addi16sp_imm(insn: u16) -> i64 {
    let imm = (cbits(insn, 12, 1) << 9)
        | (cbits(insn, 6, 1) << 4)
        | (cbits(insn, 5, 1) << 6)
        | (cbits(insn, 3, 2) << 7)
        | (cbits(insn, 2, 1) << 5);
    sign_extend(imm, 10)
}

/// Zero-extended `C.ADDI4SPN` immediate (multiple of 4).
#[inline(always)]
pub const fn ciw_imm(insn: u16) -> u64 {
    ((cbits(insn, 11, 2) << 4)
        | (cbits(insn, 7, 4) << 6)
        | (cbits(insn, 6, 1) << 2)
        | (cbits(insn, 5, 1) << 3)) as u64
}

/// CL/CS offset for word accesses (`C.LW`, `C.SW`, `C.FLW`, `C.FSW`).
#[inline(always)]
pub const fn cl_word_offset(insn: u16) -> u64 {
    ((cbits(insn, 10, 3) << 3) | (cbits(insn, 6, 1) << 2) | (cbits(insn, 5, 1) << 6)) as u64
}

/// CL/CS offset for doubleword accesses (`C.LD`, `C.SD`, `C.FLD`, `C.FSD`).
#[inline(always)]
pub const fn cl_double_offset(insn: u16) -> u64 {
    ((cbits(insn, 10, 3) << 3) | (cbits(insn, 5, 2) << 6)) as u64
}

/// Stack-relative load offset for words (`C.LWSP`, `C.FLWSP`).
#[inline(always)]
pub const fn ci_lwsp_offset(insn: u16) -> u64 {
    ((cbits(insn, 12, 1) << 5) | (cbits(insn, 4, 3) << 2) | (cbits(insn, 2, 2) << 6)) as u64
}

/// Stack-relative load offset for doublewords (`C.LDSP`, `C.FLDSP`).
#[inline(always)]
pub const fn ci_ldsp_offset(insn: u16) -> u64 {
    ((cbits(insn, 12, 1) << 5) | (cbits(insn, 5, 2) << 3) | (cbits(insn, 2, 3) << 6)) as u64
}

/// Stack-relative store offset for words (`C.SWSP`, `C.FSWSP`).
#[inline(always)]
pub const fn css_word_offset(insn: u16) -> u64 {
    ((cbits(insn, 9, 4) << 2) | (cbits(insn, 7, 2) << 6)) as u64
}

/// Stack-relative store offset for doublewords (`C.SDSP`, `C.FSDSP`).
#[inline(always)]
pub const fn css_double_offset(insn: u16) -> u64 {
    ((cbits(insn, 10, 3) << 3) | (cbits(insn, 7, 3) << 6)) as u64
}

/// Sign-extended CJ jump offset (`C.J`, `C.JAL`).
#[inline(always)]
pub const fn cj_offset(insn: u16) -> i64 {
    let imm = (cbits(insn, 12, 1) << 11)
        | (cbits(insn, 11, 1) << 4)
        | (cbits(insn, 9, 2) << 8)
        | (cbits(insn, 8, 1) << 10)
        | (cbits(insn, 7, 1) << 6)
        | (cbits(insn, 6, 1) << 7)
        | (cbits(insn, 3, 3) << 1)
        | (cbits(insn, 2, 1) << 5);
    sign_extend(imm, 12)
}

/// Sign-extended CB branch offset (`C.BEQZ`, `C.BNEZ`).
#[inline(always)]
pub const fn cb_offset(insn: u16) -> i64 {
    let imm = (cbits(insn, 12, 1) << 8)
        | (cbits(insn, 10, 2) << 3)
        | (cbits(insn, 5, 2) << 6)
        | (cbits(insn, 3, 2) << 1)
        | (cbits(insn, 2, 1) << 5);
    sign_extend(imm, 9)
}
