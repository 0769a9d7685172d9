//! Functional units of the privileged core.

/// Memory Management Unit: `satp`-driven address translation.
pub mod mmu;
