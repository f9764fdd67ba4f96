//! RISC-V Single-Precision (F) dispatch identifiers and operation codes.
//!
//! The `funct5` values (funct7 bits 31-27) are shared with D; bits 26-25
//! carry the format and are checked by the handler.

/// Load single (LOAD-FP, funct3 = 010).
pub const FLW: usize = 0x41;
/// Store single (STORE-FP, funct3 = 010).
pub const FSW: usize = 0x49;
/// Fused multiply-add (single).
pub const FMADD: usize = 0x10;
/// Fused multiply-subtract (single).
pub const FMSUB: usize = 0x11;
/// Negated fused multiply-subtract (single).
pub const FNMSUB: usize = 0x12;
/// Negated fused multiply-add (single).
pub const FNMADD: usize = 0x13;
/// OP-FP with format S.
pub const OTHER: usize = 0x14;

/// Compressed load single (RV32).
pub const C_FLW: usize = 0x0C;
/// Compressed store single (RV32).
pub const C_FSW: usize = 0x1C;
/// Compressed stack-relative load single (RV32).
pub const C_FLWSP: usize = 0x0E;
/// Compressed stack-relative store single (RV32).
pub const C_FSWSP: usize = 0x1E;

/// `funct5` of FADD.
pub const FADD: u32 = 0b00000;
/// `funct5` of FSUB.
pub const FSUB: u32 = 0b00001;
/// `funct5` of FMUL.
pub const FMUL: u32 = 0b00010;
/// `funct5` of FDIV.
pub const FDIV: u32 = 0b00011;
/// `funct5` of FSQRT.
pub const FSQRT: u32 = 0b01011;
/// `funct5` of FSGNJ/FSGNJN/FSGNJX.
pub const FSGNJ: u32 = 0b00100;
/// `funct5` of FMIN/FMAX.
pub const FMIN_MAX: u32 = 0b00101;
/// `funct5` of FCVT.S.D and FCVT.D.S.
pub const FCVT_FP: u32 = 0b01000;
/// `funct5` of FEQ/FLT/FLE.
pub const FCMP: u32 = 0b10100;
/// `funct5` of float-to-integer conversions.
pub const FCVT_INT_FP: u32 = 0b11000;
/// `funct5` of integer-to-float conversions.
pub const FCVT_FP_INT: u32 = 0b11010;
/// `funct5` of FMV.X.W/FMV.X.D and FCLASS.
pub const FMV_X_FCLASS: u32 = 0b11100;
/// `funct5` of FMV.W.X/FMV.D.X.
pub const FMV_FP_X: u32 = 0b11110;
