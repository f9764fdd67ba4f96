//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the dispatch tables, the decoder, and one handler module per
//! RISC-V extension. Each extension module exposes `slots::<X>()`, the list
//! of table registrations the hart installs when the extension is enabled.
//!
//! # Extensions
//!
//! * `rvi`: Base Integer Instruction Set (RV32I/RV64I).
//! * `rvm`: Standard Extension for Integer Multiplication and Division.
//! * `rva`: Standard Extension for Atomic Instructions.
//! * `rvf`: Standard Extension for Single-Precision Floating-Point.
//! * `rvd`: Standard Extension for Double-Precision Floating-Point.
//! * `rvc`: Standard Extension for Compressed Instructions.
//! * `privileged`: SYSTEM opcode and trap cause codes.

/// ABI register indices.
pub mod abi;

/// Identifier extraction, handler resolution and immediate decoding.
pub mod decode;

/// Instruction field extraction.
pub mod instruction;

/// Privileged architecture definitions (trap causes, system instructions).
pub mod privileged;

/// Atomic memory operations extension.
pub mod rva;

/// Compressed instruction extension (16-bit instruction encoding).
pub mod rvc;

/// Double-precision floating-point extension.
pub mod rvd;

/// Single-precision floating-point extension.
pub mod rvf;

/// Base integer instruction set.
pub mod rvi;

/// Integer multiply/divide extension.
pub mod rvm;

/// Dispatch tables and installers.
pub mod table;
