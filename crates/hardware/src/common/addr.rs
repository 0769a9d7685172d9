//! Physical and Virtual Address types.
//!
//! This module defines strong types for physical and virtual addresses to prevent
//! accidental mixing of address spaces. It provides the following:
//! 1. **Type Safety:** Distinguishes between virtual and physical address spaces at compile time.
//! 2. **Sv32 View:** Shift-and-mask accessors for the page offset and both virtual page numbers.
//! 3. **MMU Integration:** Acts as the primary interface for memory translation operations.

use std::fmt;

use super::constants::{PAGE_OFFSET_MASK, PAGE_SHIFT, SV32_VPN_BITS, SV32_VPN_MASK};

/// A virtual address in the guest address space.
///
/// Virtual addresses are produced by instruction fetch and load/store execution and are
/// resolved by the MMU before reaching physical memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtAddr(pub u64);

/// A physical address in the guest address space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u64);

impl VirtAddr {
    /// Creates a new virtual address from a raw value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Extracts the page offset (bits 11:0).
    #[inline(always)]
    pub const fn page_offset(&self) -> u64 {
        self.0 & PAGE_OFFSET_MASK
    }

    /// Extracts the Sv32 least-significant virtual page number (bits 21:12).
    #[inline(always)]
    pub const fn vpn0(&self) -> u64 {
        (self.0 >> PAGE_SHIFT) & SV32_VPN_MASK
    }

    /// Extracts the Sv32 most-significant virtual page number (bits 31:22).
    #[inline(always)]
    pub const fn vpn1(&self) -> u64 {
        (self.0 >> (PAGE_SHIFT + SV32_VPN_BITS)) & SV32_VPN_MASK
    }
}

impl PhysAddr {
    /// Creates a new physical address from a raw value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for VirtAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
