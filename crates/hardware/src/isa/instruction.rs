//! Instruction field extraction.
//!
//! Provides bit extraction for the fixed fields of 32-bit RISC-V encodings
//! ([`InstructionBits`]) and for the fields of 16-bit compressed encodings
//! ([`CompressedBits`]). Handlers receive raw instruction bits and pull the
//! fields they need through these traits.

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for a 5-bit register field.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;
/// Bit mask for extracting the CSR address field (bits 20-31).
pub const CSR_MASK: u32 = 0xFFF;

/// Offset added to a 3-bit compressed register field (`x8`-`x15`).
pub const COMPRESSED_REG_OFFSET: usize = 8;

/// Trait for extracting instruction fields from encoded instructions.
///
/// Provides methods to extract all standard RISC-V instruction fields
/// from a 32-bit instruction encoding.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    ///
    /// Register 0 (x0) is hardwired to zero and writes are ignored.
    fn rd(&self) -> usize;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> usize;

    /// Extracts the second source register field (bits 20-24).
    fn rs2(&self) -> usize;

    /// Extracts the third source register field (bits 27-31, for FMA instructions).
    fn rs3(&self) -> usize;

    /// Extracts the funct3 field (bits 12-14).
    ///
    /// Used to distinguish between different operations within the same opcode.
    /// For floating-point instructions this is the rounding mode.
    fn funct3(&self) -> u32;

    /// Extracts the funct5 field (bits 27-31) of AMO and FP instructions.
    fn funct5(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    ///
    /// Used to distinguish between standard and alternate encodings
    /// (e.g., ADD vs SUB) and to select the FP operation.
    fn funct7(&self) -> u32;

    /// Extracts the FP format field (bits 25-26): 0 = S, 1 = D.
    fn fmt(&self) -> u32;

    /// Extracts the CSR address field (bits 20-31).
    fn csr(&self) -> u32;

    /// Acquire bit of an AMO (bit 26).
    fn aq(&self) -> bool;

    /// Release bit of an AMO (bit 25).
    fn rl(&self) -> bool;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs3(&self) -> usize {
        ((self >> 27) & REG_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct5(&self) -> u32 {
        self >> 27
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }

    #[inline(always)]
    fn fmt(&self) -> u32 {
        (self >> 25) & 0x3
    }

    #[inline(always)]
    fn csr(&self) -> u32 {
        (self >> 20) & CSR_MASK
    }

    #[inline(always)]
    fn aq(&self) -> bool {
        (self >> 26) & 1 != 0
    }

    #[inline(always)]
    fn rl(&self) -> bool {
        (self >> 25) & 1 != 0
    }
}

/// Field extraction for 16-bit compressed encodings.
///
/// Primed accessors (`rd_p`, `rs1_p`, `rs2_p`) decode the 3-bit register
/// fields of the CIW/CL/CS/CA/CB formats, which address `x8`-`x15`.
pub trait CompressedBits {
    /// Quadrant (bits 0-1).
    fn quadrant(&self) -> u16;

    /// funct3 (bits 13-15).
    fn c_funct3(&self) -> u16;

    /// Full 5-bit `rd`/`rs1` field (bits 7-11).
    fn c_rd(&self) -> usize;

    /// Full 5-bit `rs2` field (bits 2-6).
    fn c_rs2(&self) -> usize;

    /// Primed `rd'` in bits 2-4 (CIW, CL).
    fn rd_p(&self) -> usize;

    /// Primed `rs1'`/`rd'` in bits 7-9 (CL, CS, CA, CB).
    fn rs1_p(&self) -> usize;

    /// Primed `rs2'` in bits 2-4 (CS, CA).
    fn rs2_p(&self) -> usize;
}

impl CompressedBits for u16 {
    #[inline(always)]
    fn quadrant(&self) -> u16 {
        self & 0x3
    }

    #[inline(always)]
    fn c_funct3(&self) -> u16 {
        self >> 13
    }

    #[inline(always)]
    fn c_rd(&self) -> usize {
        usize::from((self >> 7) & 0x1F)
    }

    #[inline(always)]
    fn c_rs2(&self) -> usize {
        usize::from((self >> 2) & 0x1F)
    }

    #[inline(always)]
    fn rd_p(&self) -> usize {
        usize::from((self >> 2) & 0x7) + COMPRESSED_REG_OFFSET
    }

    #[inline(always)]
    fn rs1_p(&self) -> usize {
        usize::from((self >> 7) & 0x7) + COMPRESSED_REG_OFFSET
    }

    #[inline(always)]
    fn rs2_p(&self) -> usize {
        usize::from((self >> 2) & 0x7) + COMPRESSED_REG_OFFSET
    }
}
