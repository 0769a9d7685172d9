//! Common utilities and types used throughout the privileged core.
//!
//! This module provides fundamental building blocks shared by every component. It includes:
//! 1. **Address Types:** Strong types for virtual and physical addresses.
//! 2. **Constants:** Page geometry, the reset vector and instruction field positions.
//! 3. **Memory Access:** The access kinds handed to the translator (Fetch/Read/Write).
//! 4. **Error Handling:** Translation and CSR faults plus the crate-wide error type.
//! 5. **Register Management:** The per-hart register file.

/// Address type definitions (physical and virtual addresses).
pub mod addr;

/// Common constants used throughout the crate.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use addr::{PhysAddr, VirtAddr};
pub use constants::{PAGE_SHIFT, PAGE_SIZE, RESET_VECTOR};
pub use data::AccessType;
pub use error::{CsrFault, Error, MemoryError, Result, TranslationFault};
pub use reg::RegisterFile;
