//! Virtual Memory Accessors.
//!
//! This module provides the interface between the execution loop and physical memory.
//! Each accessor asks the MMU whether translation is on; direct accesses pass the address
//! through unchanged, translated ones walk the page table and OR the page offset back in.

use super::Cpu;
use crate::common::{AccessType, PhysAddr, Result, VirtAddr};
use crate::core::units::mmu::MmuCheck;
use crate::soc::PhysMemory;

impl Cpu {
    /// Resolves `vaddr` to a physical address for an access of `len` bytes.
    ///
    /// # Errors
    ///
    /// Propagates translation faults and page table read failures.
    pub fn resolve<M: PhysMemory + ?Sized>(
        &self,
        vaddr: VirtAddr,
        len: usize,
        access: AccessType,
        mem: &mut M,
    ) -> Result<PhysAddr> {
        match self.mmu.check(&self.csrs, vaddr, len, access) {
            MmuCheck::Direct => Ok(PhysAddr::new(vaddr.val())),
            MmuCheck::Translate => {
                let frame = self.mmu.translate(&self.csrs, vaddr, len, access, mem)?;
                Ok(PhysAddr::new(frame.val() | vaddr.page_offset()))
            }
        }
    }

    /// Fetches `len` bytes of instruction at `addr`.
    ///
    /// # Errors
    ///
    /// Propagates translation faults and memory errors.
    pub fn vaddr_ifetch<M: PhysMemory + ?Sized>(
        &self,
        mem: &mut M,
        addr: u64,
        len: usize,
    ) -> Result<u64> {
        let paddr = self.resolve(VirtAddr::new(addr), len, AccessType::Fetch, mem)?;
        Ok(mem.paddr_read(paddr, len)?)
    }

    /// Loads `len` bytes at `addr`.
    ///
    /// # Errors
    ///
    /// Propagates translation faults and memory errors.
    pub fn vaddr_read<M: PhysMemory + ?Sized>(
        &self,
        mem: &mut M,
        addr: u64,
        len: usize,
    ) -> Result<u64> {
        let paddr = self.resolve(VirtAddr::new(addr), len, AccessType::Read, mem)?;
        Ok(mem.paddr_read(paddr, len)?)
    }

    /// Stores the low `len` bytes of `data` at `addr`.
    ///
    /// # Errors
    ///
    /// Propagates translation faults and memory errors.
    pub fn vaddr_write<M: PhysMemory + ?Sized>(
        &self,
        mem: &mut M,
        addr: u64,
        len: usize,
        data: u64,
    ) -> Result<()> {
        let paddr = self.resolve(VirtAddr::new(addr), len, AccessType::Write, mem)?;
        Ok(mem.paddr_write(paddr, len, data)?)
    }
}
