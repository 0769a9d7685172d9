//! Physical memory collaborators.
//!
//! This module holds everything below the translator:
//! 1. **Traits:** The [`PhysMemory`] interface used by the MMU and the virtual accessors.
//! 2. **Memory:** Flat guest RAM backed by an mmap'd buffer.

/// Guest RAM and its backing buffer.
pub mod memory;

/// Physical memory trait.
pub mod traits;

pub use memory::Memory;
pub use traits::PhysMemory;
