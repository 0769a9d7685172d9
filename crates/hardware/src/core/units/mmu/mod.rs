//! Memory Management Unit (MMU).
//!
//! This module implements the address translator. It decides between direct and
//! translated access from `satp` and, when translation is on, runs the Sv32 page table
//! walker. There is no TLB: every translated access walks the table.

/// Page table walker implementation for Sv32 virtual memory.
pub mod ptw;

use crate::common::{AccessType, PhysAddr, Result, VirtAddr};
use crate::config::Xlen;
use crate::core::arch::csr::{self, Csrs};
use crate::soc::PhysMemory;

/// Outcome of [`Mmu::check`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MmuCheck {
    /// Translation is off; the virtual address is the physical address.
    Direct,
    /// Translation is on; the address must go through [`Mmu::translate`].
    Translate,
}

/// Address translator for one hart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mmu {
    xlen: Xlen,
}

impl Mmu {
    /// Creates a translator for the given word width.
    pub const fn new(xlen: Xlen) -> Self {
        Self { xlen }
    }

    /// Decides whether an access needs translation.
    ///
    /// Only the most-significant bit of `satp` matters: clear selects
    /// [`MmuCheck::Direct`], set selects [`MmuCheck::Translate`]. The address, length and
    /// access kind are accepted for interface symmetry and do not affect the result.
    pub const fn check(
        &self,
        csrs: &Csrs,
        _vaddr: VirtAddr,
        _len: usize,
        _access: AccessType,
    ) -> MmuCheck {
        if csr::satp_translates(csrs.satp, self.xlen) {
            MmuCheck::Translate
        } else {
            MmuCheck::Direct
        }
    }

    /// Translates `vaddr` to the physical address of its page frame.
    ///
    /// The returned address has the page offset clear; callers OR in
    /// [`VirtAddr::page_offset`]. The root table comes from the PPN field of `satp`.
    ///
    /// # Errors
    ///
    /// Returns a [`TranslationFault`](crate::common::TranslationFault) for page-crossing
    /// accesses and malformed tables, or a memory error if an entry cannot be read.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvpriv_core::common::{AccessType, PhysAddr, VirtAddr};
    /// use rvpriv_core::config::Xlen;
    /// use rvpriv_core::core::arch::csr::Csrs;
    /// use rvpriv_core::core::units::mmu::Mmu;
    /// use rvpriv_core::soc::{Memory, PhysMemory};
    ///
    /// let mut mem = Memory::new(0x8000_0000, 0x10_0000);
    /// let root_ppn = 0x80000;
    /// // Level-1 entry for VPN1 = 0: superpage at PPN 0x80400, R|W|X|V.
    /// mem.paddr_write(PhysAddr::new(0x8000_0000), 4, (0x80400 << 10) | 0xF).unwrap();
    ///
    /// let csrs = Csrs { satp: (1 << 31) | root_ppn, ..Csrs::default() };
    /// let mmu = Mmu::new(Xlen::Rv32);
    /// let frame = mmu
    ///     .translate(&csrs, VirtAddr::new(0x0000_3123), 4, AccessType::Read, &mut mem)
    ///     .unwrap();
    /// assert_eq!(frame.val(), 0x8040_3000);
    /// ```
    pub fn translate<M: PhysMemory + ?Sized>(
        &self,
        csrs: &Csrs,
        vaddr: VirtAddr,
        len: usize,
        access: AccessType,
        mem: &mut M,
    ) -> Result<PhysAddr> {
        let root_ppn = csr::satp_ppn(csrs.satp, self.xlen);
        ptw::page_table_walk(mem, root_ppn, vaddr, len).inspect_err(|err| {
            tracing::warn!(%vaddr, len, %access, satp = csrs.satp, "translation failed: {err}");
        })
    }
}
