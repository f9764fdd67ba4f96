//! RISC-V Double-Precision (D) dispatch identifiers.
//!
//! The fused and OP-FP identifiers are the single-precision ones with bit 25
//! (`fmt[0]`) set. Operation codes are shared with F.

/// Load double (LOAD-FP, funct3 = 011).
pub const FLD: usize = 0x61;
/// Store double (STORE-FP, funct3 = 011).
pub const FSD: usize = 0x69;
/// Fused multiply-add (double).
pub const FMADD: usize = 0x110;
/// Fused multiply-subtract (double).
pub const FMSUB: usize = 0x111;
/// Negated fused multiply-subtract (double).
pub const FNMSUB: usize = 0x112;
/// Negated fused multiply-add (double).
pub const FNMADD: usize = 0x113;
/// OP-FP with format D.
pub const OTHER: usize = 0x114;

/// Compressed load double.
pub const C_FLD: usize = 0x04;
/// Compressed store double.
pub const C_FSD: usize = 0x14;
/// Compressed stack-relative load double.
pub const C_FLDSP: usize = 0x06;
/// Compressed stack-relative store double.
pub const C_FSDSP: usize = 0x16;
