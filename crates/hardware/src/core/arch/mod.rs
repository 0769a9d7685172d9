//! RISC-V architecture-specific components.
//!
//! This module contains the architectural state definitions of the privileged core:
//! 1. **CSRs:** Control and Status Register identifiers, storage and bit-field accessors.
//! 2. **GPRs:** General-Purpose Register storage and ABI names.
//! 3. **Traps:** `mcause` encodings.

/// Control and Status Register (CSR) definitions and storage.
pub mod csr;

/// General-Purpose Register file implementation.
pub mod gpr;

/// Trap cause codes.
pub mod trap;
