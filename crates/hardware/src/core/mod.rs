//! Privileged core.
//!
//! This module contains the architectural state and the units acting on it:
//! 1. **Arch:** CSR, GPR and trap-cause definitions.
//! 2. **CPU:** The per-hart context and its CSR, trap and memory operations.
//! 3. **Units:** The MMU and its page table walker.

/// Architectural state definitions.
pub mod arch;

/// Per-hart context.
pub mod cpu;

/// Functional units (MMU).
pub mod units;

pub use cpu::Cpu;
