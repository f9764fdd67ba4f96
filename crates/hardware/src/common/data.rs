//! Memory access classification.
//!
//! This module defines how memory operations are described to the bus:
//! 1. **Access Type:** Fetch, load, or store, used to pick the access-fault trap.
//! 2. **Access Width:** Byte through doubleword, decoded from `funct3` fields.

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch.
    Fetch,
    /// Data load.
    Read,
    /// Data store or AMO.
    Write,
}

/// Width of a memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemWidth {
    /// 8 bits.
    Byte,
    /// 16 bits.
    Half,
    /// 32 bits.
    Word,
    /// 64 bits.
    Double,
}

impl MemWidth {
    /// Returns the access size in bytes.
    #[inline(always)]
    pub const fn bytes(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
            Self::Double => 8,
        }
    }

    /// Returns the mask covering the low `bytes() * 8` bits.
    #[inline(always)]
    pub const fn mask(self) -> u64 {
        match self {
            Self::Byte => 0xFF,
            Self::Half => 0xFFFF,
            Self::Word => 0xFFFF_FFFF,
            Self::Double => u64::MAX,
        }
    }

    /// Returns true if `addr` is naturally aligned for this width.
    #[inline(always)]
    pub const fn is_aligned(self, addr: u64) -> bool {
        addr & (self.bytes() as u64 - 1) == 0
    }
}
