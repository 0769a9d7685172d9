//! Page Table Walker (PTW) for RISC-V Sv32.
//!
//! This module implements the two-level page table walk. It reads entries from guest
//! physical memory and never writes them back: accessed and dirty bits are left as found.
//! Every malformed-table condition is returned as a [`TranslationFault`].

use crate::common::constants::{PAGE_OFFSET_MASK, PAGE_SHIFT, SV32_PTE_SIZE};
use crate::common::{PhysAddr, Result, TranslationFault, VirtAddr};
use crate::soc::PhysMemory;

/// Page Table Entry valid bit (bit 0).
const PTE_VALID_BIT: u32 = 1;

/// Page Table Entry read permission bit (bit 1).
const PTE_READ_BIT: u32 = 1 << 1;

/// Page Table Entry write permission bit (bit 2).
const PTE_WRITE_BIT: u32 = 1 << 2;

/// Page Table Entry execute permission bit (bit 3).
const PTE_EXEC_BIT: u32 = 1 << 3;

/// Page Table Entry user mode access bit (bit 4).
const PTE_USER_BIT: u32 = 1 << 4;

/// Page Table Entry global mapping bit (bit 5).
const PTE_GLOBAL_BIT: u32 = 1 << 5;

/// Page Table Entry accessed bit (bit 6).
const PTE_ACCESSED_BIT: u32 = 1 << 6;

/// Page Table Entry dirty bit (bit 7).
const PTE_DIRTY_BIT: u32 = 1 << 7;

/// Shift of the 2-bit software field (bits 9:8).
const PTE_RSW_SHIFT: u32 = 8;

/// Width of the flag group below the PPN (bits 9:0).
const PTE_FLAGS_MASK: u32 = 0x3FF;

/// Shift of the PPN (bits 31:10).
const PTE_PPN_SHIFT: u32 = 10;

/// Mask of the low PPN segment (10 bits).
const PTE_PPN0_MASK: u32 = 0x3FF;

/// Shift of the high PPN segment (bits 31:20).
const PTE_PPN1_SHIFT: u32 = 20;

/// A raw 32-bit Sv32 Page Table Entry.
///
/// Both views of the word are available: individual flags plus `PPN0`/`PPN1`, or the
/// 10-bit flag group plus the combined 22-bit PPN.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageTableEntry(pub u32);

impl PageTableEntry {
    /// Returns the underlying raw value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Valid (V).
    pub const fn is_valid(self) -> bool {
        self.0 & PTE_VALID_BIT != 0
    }

    /// Read (R).
    pub const fn can_read(self) -> bool {
        self.0 & PTE_READ_BIT != 0
    }

    /// Write (W).
    pub const fn can_write(self) -> bool {
        self.0 & PTE_WRITE_BIT != 0
    }

    /// Execute (X).
    pub const fn can_exec(self) -> bool {
        self.0 & PTE_EXEC_BIT != 0
    }

    /// User (U).
    pub const fn is_user(self) -> bool {
        self.0 & PTE_USER_BIT != 0
    }

    /// Global (G).
    pub const fn is_global(self) -> bool {
        self.0 & PTE_GLOBAL_BIT != 0
    }

    /// Accessed (A).
    pub const fn is_accessed(self) -> bool {
        self.0 & PTE_ACCESSED_BIT != 0
    }

    /// Dirty (D).
    pub const fn is_dirty(self) -> bool {
        self.0 & PTE_DIRTY_BIT != 0
    }

    /// 2-bit software field.
    pub const fn rsw(self) -> u32 {
        (self.0 >> PTE_RSW_SHIFT) & 0b11
    }

    /// The 10-bit flag group.
    pub const fn flags(self) -> u32 {
        self.0 & PTE_FLAGS_MASK
    }

    /// Low physical page number segment (10 bits).
    pub const fn ppn0(self) -> u32 {
        (self.0 >> PTE_PPN_SHIFT) & PTE_PPN0_MASK
    }

    /// High physical page number segment (12 bits).
    pub const fn ppn1(self) -> u32 {
        self.0 >> PTE_PPN1_SHIFT
    }

    /// Combined 22-bit physical page number.
    pub const fn ppn(self) -> u64 {
        (self.0 >> PTE_PPN_SHIFT) as u64
    }

    /// A leaf maps memory directly: R or X is set.
    pub const fn is_leaf(self) -> bool {
        self.can_read() || self.can_exec()
    }
}

/// Walks the Sv32 page table rooted at `root_ppn` for `vaddr`.
///
/// Returns the physical address of the mapped page frame. The page offset is left clear;
/// callers OR it in.
///
/// # Errors
///
/// * [`TranslationFault::CrossPage`] if `page_offset + len - 1` leaves the page, detected
///   before any entry is read.
/// * [`TranslationFault::Invalid`] if an entry on the path is not valid.
/// * [`TranslationFault::Misaligned`] if a level-1 leaf has a nonzero `PPN0`.
/// * [`TranslationFault::LeafPermission`] if a level-0 leaf lacks R or W, which also
///   rejects execute-only mappings.
/// * Memory errors from reading entries.
pub fn page_table_walk<M: PhysMemory + ?Sized>(
    mem: &mut M,
    root_ppn: u64,
    vaddr: VirtAddr,
    len: usize,
) -> Result<PhysAddr> {
    let offset = vaddr.page_offset();
    if offset + len.max(1) as u64 - 1 > PAGE_OFFSET_MASK {
        return Err(TranslationFault::CrossPage {
            vaddr: vaddr.val(),
            len,
        }
        .into());
    }

    let vpn1 = vaddr.vpn1();
    let vpn0 = vaddr.vpn0();

    let root_addr = (root_ppn << PAGE_SHIFT) + vpn1 * SV32_PTE_SIZE;
    let root = PageTableEntry(mem.read_pte(PhysAddr::new(root_addr))?);
    if !root.is_valid() {
        return Err(TranslationFault::Invalid {
            pte_addr: root_addr,
            pte: root.raw(),
            level: 1,
        }
        .into());
    }

    if root.is_leaf() {
        if root.ppn0() != 0 {
            return Err(TranslationFault::Misaligned {
                pte_addr: root_addr,
                pte: root.raw(),
            }
            .into());
        }
        // Superpage: pa.ppn[0] comes from va.vpn[0].
        let frame = (root.ppn() << PAGE_SHIFT) | (vpn0 << PAGE_SHIFT);
        return Ok(PhysAddr::new(frame));
    }

    let leaf_addr = (root.ppn() << PAGE_SHIFT) + vpn0 * SV32_PTE_SIZE;
    let leaf = PageTableEntry(mem.read_pte(PhysAddr::new(leaf_addr))?);
    if !leaf.is_valid() {
        return Err(TranslationFault::Invalid {
            pte_addr: leaf_addr,
            pte: leaf.raw(),
            level: 0,
        }
        .into());
    }
    if !(leaf.can_read() && leaf.can_write()) {
        return Err(TranslationFault::LeafPermission {
            pte_addr: leaf_addr,
            pte: leaf.raw(),
        }
        .into());
    }

    Ok(PhysAddr::new(leaf.ppn() << PAGE_SHIFT))
}
