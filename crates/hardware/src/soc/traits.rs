//! Physical memory interface.
//!
//! This module defines the `PhysMemory` trait: the only way the privileged core touches
//! guest memory. It provides:
//! 1. **Access:** Width-checked little-endian reads and writes at physical addresses.
//! 2. **Page Table Access:** A dedicated entry point for page table entry fetches, so
//!    implementations can serve walks straight from host memory.

use crate::common::{MemoryError, PhysAddr};

/// Flat guest-physical memory.
///
/// Access widths are 1, 2, 4 or 8 bytes. Out-of-range addresses are reported by the
/// implementation; the translator propagates them untouched.
pub trait PhysMemory {
    /// Reads `len` bytes at `addr`, zero-extended.
    ///
    /// # Errors
    ///
    /// Returns a [`MemoryError`] for unsupported widths or unmapped addresses.
    fn paddr_read(&mut self, addr: PhysAddr, len: usize) -> Result<u64, MemoryError>;

    /// Writes the low `len` bytes of `val` at `addr`.
    ///
    /// # Errors
    ///
    /// Returns a [`MemoryError`] for unsupported widths or unmapped addresses.
    fn paddr_write(&mut self, addr: PhysAddr, len: usize, val: u64) -> Result<(), MemoryError>;

    /// Fetches a 32-bit page table entry during a walk.
    ///
    /// # Errors
    ///
    /// Returns a [`MemoryError`] if `addr` is unmapped.
    fn read_pte(&mut self, addr: PhysAddr) -> Result<u32, MemoryError> {
        self.paddr_read(addr, 4).map(|v| v as u32)
    }
}
