//! RISC-V architectural state.
//!
//! This module contains the state a hart owns directly. It includes the following modules:
//! 1. **CSRs:** The CSR/trap interface consumed by handlers and a reference CSR file.
//! 2. **FPRs:** Floating-Point Register file with NaN-boxing accessors.
//! 3. **GPRs:** Width-parameterized General-Purpose Register file.

/// CSR interface, `mstatus.FS` state, and the reference CSR file.
pub mod csr;

/// Floating-Point Register file implementation.
pub mod fpr;

/// General-Purpose Register file implementation.
pub mod gpr;
