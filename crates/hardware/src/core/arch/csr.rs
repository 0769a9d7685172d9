//! Control and Status Register (CSR) definitions and storage.
//!
//! This module implements the CSR subsystem of the privileged core. It provides:
//! 1. **Address Definitions:** Numbers of the six modeled machine-level CSRs.
//! 2. **Identifiers:** The closed [`CsrId`] enumeration and conversion from raw numbers.
//! 3. **Field Accessors:** Shift-and-mask helpers for `mstatus` and `satp`.
//! 4. **Register Storage:** The [`Csrs`] struct holding architectural state.

use std::fmt;

use crate::common::error::CsrFault;
use crate::config::Xlen;

/// Machine status register CSR address.
pub const MSTATUS: u32 = 0x300;

/// Machine trap vector base address register CSR address.
pub const MTVEC: u32 = 0x305;

/// Machine scratch register CSR address.
pub const MSCRATCH: u32 = 0x340;

/// Machine exception program counter CSR address.
pub const MEPC: u32 = 0x341;

/// Machine cause register CSR address.
pub const MCAUSE: u32 = 0x342;

/// Supervisor address translation and protection register CSR address.
pub const SATP: u32 = 0x180;

/// Supervisor interrupt enable bit in `mstatus`.
pub const MSTATUS_SIE: u64 = 1 << 1;

/// Machine interrupt enable bit in `mstatus`.
pub const MSTATUS_MIE: u64 = 1 << 3;

/// Supervisor previous interrupt enable bit in `mstatus`.
pub const MSTATUS_SPIE: u64 = 1 << 5;

/// Machine previous interrupt enable bit in `mstatus`.
pub const MSTATUS_MPIE: u64 = 1 << 7;

/// Machine previous privilege mode field mask in `mstatus`.
pub const MSTATUS_MPP: u64 = 3 << 11;

/// Physical page number mask of `satp` on RV32 (bits 21:0).
pub const SATP32_PPN_MASK: u64 = 0x003F_FFFF;

/// Physical page number mask of `satp` on RV64 (bits 43:0).
pub const SATP64_PPN_MASK: u64 = 0xFFF_FFFF_FFFF;

/// Returns true if `mstatus.MIE` is set.
#[inline]
pub const fn mstatus_mie(mstatus: u64) -> bool {
    mstatus & MSTATUS_MIE != 0
}

/// Returns true if `mstatus.MPIE` is set.
#[inline]
pub const fn mstatus_mpie(mstatus: u64) -> bool {
    mstatus & MSTATUS_MPIE != 0
}

/// Returns `mstatus` with `MIE` set to `on`; every other bit is preserved.
#[inline]
pub const fn with_mstatus_mie(mstatus: u64, on: bool) -> u64 {
    if on {
        mstatus | MSTATUS_MIE
    } else {
        mstatus & !MSTATUS_MIE
    }
}

/// Returns `mstatus` with `MPIE` set to `on`; every other bit is preserved.
#[inline]
pub const fn with_mstatus_mpie(mstatus: u64, on: bool) -> u64 {
    if on {
        mstatus | MSTATUS_MPIE
    } else {
        mstatus & !MSTATUS_MPIE
    }
}

/// Returns true if the translation mode bit (the word's MSB) of `satp` is set.
#[inline]
pub const fn satp_translates(satp: u64, xlen: Xlen) -> bool {
    satp & xlen.msb() != 0
}

/// Extracts the root page table PPN from `satp`.
#[inline]
pub const fn satp_ppn(satp: u64, xlen: Xlen) -> u64 {
    match xlen {
        Xlen::Rv32 => satp & SATP32_PPN_MASK,
        Xlen::Rv64 => satp & SATP64_PPN_MASK,
    }
}

/// One of the six modeled CSRs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CsrId {
    /// Machine status.
    Mstatus,
    /// Machine trap vector.
    Mtvec,
    /// Machine exception program counter.
    Mepc,
    /// Machine trap cause.
    Mcause,
    /// Address translation and protection.
    Satp,
    /// Machine scratch.
    Mscratch,
}

impl CsrId {
    /// Every modeled CSR, in image order.
    pub const ALL: [Self; 6] = [
        Self::Mstatus,
        Self::Mtvec,
        Self::Mepc,
        Self::Mcause,
        Self::Satp,
        Self::Mscratch,
    ];

    /// The 12-bit CSR number.
    pub const fn number(self) -> u32 {
        match self {
            Self::Mstatus => MSTATUS,
            Self::Mtvec => MTVEC,
            Self::Mepc => MEPC,
            Self::Mcause => MCAUSE,
            Self::Satp => SATP,
            Self::Mscratch => MSCRATCH,
        }
    }

    /// Lower-case register name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mstatus => "mstatus",
            Self::Mtvec => "mtvec",
            Self::Mepc => "mepc",
            Self::Mcause => "mcause",
            Self::Satp => "satp",
            Self::Mscratch => "mscratch",
        }
    }
}

impl TryFrom<u32> for CsrId {
    type Error = CsrFault;

    fn try_from(number: u32) -> Result<Self, Self::Error> {
        match number {
            MSTATUS => Ok(Self::Mstatus),
            MTVEC => Ok(Self::Mtvec),
            MEPC => Ok(Self::Mepc),
            MCAUSE => Ok(Self::Mcause),
            SATP => Ok(Self::Satp),
            MSCRATCH => Ok(Self::Mscratch),
            other => Err(CsrFault::UnknownId(other)),
        }
    }
}

impl fmt::Display for CsrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage for the six modeled CSRs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Csrs {
    /// Machine status.
    pub mstatus: u64,
    /// Machine trap vector.
    pub mtvec: u64,
    /// Machine exception program counter.
    pub mepc: u64,
    /// Machine trap cause.
    pub mcause: u64,
    /// Address translation and protection.
    pub satp: u64,
    /// Machine scratch.
    pub mscratch: u64,
}

impl Csrs {
    /// Reads a CSR.
    pub const fn read(&self, id: CsrId) -> u64 {
        match id {
            CsrId::Mstatus => self.mstatus,
            CsrId::Mtvec => self.mtvec,
            CsrId::Mepc => self.mepc,
            CsrId::Mcause => self.mcause,
            CsrId::Satp => self.satp,
            CsrId::Mscratch => self.mscratch,
        }
    }

    /// Writes a CSR verbatim.
    pub fn write(&mut self, id: CsrId, val: u64) {
        let slot = match id {
            CsrId::Mstatus => &mut self.mstatus,
            CsrId::Mtvec => &mut self.mtvec,
            CsrId::Mepc => &mut self.mepc,
            CsrId::Mcause => &mut self.mcause,
            CsrId::Satp => &mut self.satp,
            CsrId::Mscratch => &mut self.mscratch,
        };
        *slot = val;
    }

    /// Size of the CSR image in bytes: one word per CSR.
    pub const fn image_len(xlen: Xlen) -> usize {
        CsrId::ALL.len() * xlen.bytes()
    }

    /// Serializes the CSRs as little-endian words in [`CsrId::ALL`] order.
    pub fn to_image(&self, xlen: Xlen) -> Vec<u8> {
        let width = xlen.bytes();
        let mut image = Vec::with_capacity(Self::image_len(xlen));
        for id in CsrId::ALL {
            image.extend_from_slice(&self.read(id).to_le_bytes()[..width]);
        }
        image
    }

    /// Parses an image produced by [`to_image`](Self::to_image), or `None` on a length mismatch.
    pub fn from_image(image: &[u8], xlen: Xlen) -> Option<Self> {
        if image.len() != Self::image_len(xlen) {
            return None;
        }
        let width = xlen.bytes();
        let mut csrs = Self::default();
        for (id, chunk) in CsrId::ALL.into_iter().zip(image.chunks_exact(width)) {
            let mut buf = [0u8; 8];
            buf[..width].copy_from_slice(chunk);
            csrs.write(id, u64::from_le_bytes(buf));
        }
        Some(csrs)
    }
}

impl fmt::Display for Csrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in [
            CsrId::Mcause,
            CsrId::Mstatus,
            CsrId::Mtvec,
            CsrId::Mepc,
            CsrId::Satp,
            CsrId::Mscratch,
        ] {
            writeln!(f, "{:<15}{:#010x}", id.name(), self.read(id))?;
        }
        Ok(())
    }
}
