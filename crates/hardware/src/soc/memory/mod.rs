//! Guest Physical Memory.
//!
//! This module implements the flat guest RAM the privileged core runs against. It provides:
//! 1. **Buffer:** Backing storage ([`GuestBuffer`]) for RAM contents.
//! 2. **Memory:** [`PhysMemory`] implementation that maps the buffer at a physical base.
//! 3. **Host Mapping:** `guest_to_host` for walks, snapshots and reference-engine copies.

/// Guest RAM buffer implementation (mmap or heap).
pub mod buffer;

use self::buffer::GuestBuffer;
use crate::common::{MemoryError, PhysAddr};
use crate::config::MemoryConfig;
use crate::soc::traits::PhysMemory;

/// Guest RAM mapped at a fixed physical base address.
#[derive(Debug)]
pub struct Memory {
    buffer: GuestBuffer,
    base_addr: u64,
}

impl Memory {
    /// Creates zeroed RAM of `size` bytes at `base_addr`.
    pub fn new(base_addr: u64, size: usize) -> Self {
        Self {
            buffer: GuestBuffer::new(size),
            base_addr,
        }
    }

    /// Creates RAM from a memory configuration.
    pub fn from_config(config: &MemoryConfig) -> Self {
        Self::new(config.ram_base, config.ram_size)
    }

    /// Physical base address.
    pub const fn base(&self) -> u64 {
        self.base_addr
    }

    /// Size in bytes.
    pub const fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if `[addr, addr + len)` lies inside RAM.
    pub fn contains(&self, addr: PhysAddr, len: usize) -> bool {
        self.offset_of(addr, len).is_ok()
    }

    fn offset_of(&self, addr: PhysAddr, len: usize) -> Result<usize, MemoryError> {
        let out_of_bounds = MemoryError::OutOfBounds {
            addr: addr.val(),
            len,
        };
        let offset = addr
            .val()
            .checked_sub(self.base_addr)
            .ok_or(out_of_bounds)? as usize;
        match offset.checked_add(len) {
            Some(end) if end <= self.size() => Ok(offset),
            _ => Err(out_of_bounds),
        }
    }

    /// Maps `len` guest bytes at `addr` to host memory.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfBounds`] if any byte lies outside RAM.
    pub fn guest_to_host(&self, addr: PhysAddr, len: usize) -> Result<&[u8], MemoryError> {
        let offset = self.offset_of(addr, len)?;
        Ok(&self.buffer[offset..offset + len])
    }

    /// Mutable variant of [`guest_to_host`](Self::guest_to_host).
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfBounds`] if any byte lies outside RAM.
    pub fn guest_to_host_mut(
        &mut self,
        addr: PhysAddr,
        len: usize,
    ) -> Result<&mut [u8], MemoryError> {
        let offset = self.offset_of(addr, len)?;
        Ok(&mut self.buffer[offset..offset + len])
    }

    /// Copies `data` into RAM starting at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfBounds`] if the image does not fit.
    pub fn load(&mut self, addr: PhysAddr, data: &[u8]) -> Result<(), MemoryError> {
        self.guest_to_host_mut(addr, data.len())?
            .copy_from_slice(data);
        Ok(())
    }

    /// The whole RAM image.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// The whole RAM image, mutable.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buffer
    }
}

const fn check_width(len: usize) -> Result<(), MemoryError> {
    match len {
        1 | 2 | 4 | 8 => Ok(()),
        _ => Err(MemoryError::BadWidth(len)),
    }
}

impl PhysMemory for Memory {
    fn paddr_read(&mut self, addr: PhysAddr, len: usize) -> Result<u64, MemoryError> {
        check_width(len)?;
        let bytes = self.guest_to_host(addr, len)?;
        let mut buf = [0u8; 8];
        buf[..len].copy_from_slice(bytes);
        Ok(u64::from_le_bytes(buf))
    }

    fn paddr_write(&mut self, addr: PhysAddr, len: usize, val: u64) -> Result<(), MemoryError> {
        check_width(len)?;
        self.guest_to_host_mut(addr, len)?
            .copy_from_slice(&val.to_le_bytes()[..len]);
        Ok(())
    }

    fn read_pte(&mut self, addr: PhysAddr) -> Result<u32, MemoryError> {
        let bytes = self.guest_to_host(addr, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}
