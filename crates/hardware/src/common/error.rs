//! Fault and Error definitions.
//!
//! This module defines every failure the privileged core can report. It provides:
//! 1. **Translation Faults:** Malformed page tables and page-crossing accesses.
//! 2. **CSR Faults:** Accesses naming a CSR outside the supported set.
//! 3. **Collaborator Errors:** Physical memory, reference engine and snapshot failures.
//! 4. **Umbrella Error:** A single [`Error`] type with `From` conversions for `?`.
//!
//! None of these are guest-visible exceptions. They halt the run: the caller is expected
//! to stop the emulator when one is returned. Register mismatches found by the
//! co-simulator are not errors and never appear here.

use std::io;

use thiserror::Error;

/// Failure of a virtual-to-physical translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TranslationFault {
    /// The access would straddle a 4KB page boundary.
    #[error("access at {vaddr:#x} of {len} bytes crosses a page boundary")]
    CrossPage {
        /// Faulting virtual address.
        vaddr: u64,
        /// Access length in bytes.
        len: usize,
    },

    /// A page table entry on the walk has its valid bit clear.
    #[error("invalid level-{level} page table entry {pte:#010x} at {pte_addr:#x}")]
    Invalid {
        /// Physical address the entry was read from.
        pte_addr: u64,
        /// Raw entry.
        pte: u32,
        /// Walk level (1 = root, 0 = leaf table).
        level: usize,
    },

    /// A level-1 leaf (superpage) whose low PPN segment is not zero.
    #[error("misaligned superpage: entry {pte:#010x} at {pte_addr:#x} has a nonzero PPN0")]
    Misaligned {
        /// Physical address the entry was read from.
        pte_addr: u64,
        /// Raw entry.
        pte: u32,
    },

    /// A level-0 leaf that is not both readable and writable.
    #[error("leaf page table entry {pte:#010x} at {pte_addr:#x} is not readable and writable")]
    LeafPermission {
        /// Physical address the entry was read from.
        pte_addr: u64,
        /// Raw entry.
        pte: u32,
    },
}

/// Failure of a CSR access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CsrFault {
    /// The CSR number is not one of the six modeled registers.
    #[error("unknown CSR number {0:#x}")]
    UnknownId(u32),
}

/// Failure reported by the physical memory collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// The access falls outside guest RAM.
    #[error("physical access at {addr:#x} of {len} bytes is outside guest memory")]
    OutOfBounds {
        /// Physical address.
        addr: u64,
        /// Access length in bytes.
        len: usize,
    },

    /// The access length is not 1, 2, 4 or 8.
    #[error("unsupported access width of {0} bytes")]
    BadWidth(usize),
}

/// Inconsistency detected before calling into the reference engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DifftestError {
    /// The DUT and reference register images have different shapes.
    #[error("register image mismatch: DUT has {dut} GPRs, reference has {reference}")]
    RegisterCount {
        /// GPR count of the DUT.
        dut: usize,
        /// GPR count of the reference image.
        reference: usize,
    },

    /// A buffer handed to the reference engine does not match the region it describes.
    #[error("reference buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// Stepping was requested while the reference engine is detached.
    #[error("reference engine is not attached")]
    NotAttached,
}

/// Failure while saving or restoring emulator state.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Underlying I/O failure.
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] io::Error),

    /// A snapshot section does not have the size the current configuration expects.
    #[error("snapshot section `{section}` is {actual} bytes, expected {expected}")]
    SizeMismatch {
        /// Section name (`registers`, `csrs` or `memory`).
        section: &'static str,
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },
}

/// Umbrella error for the privileged core.
#[derive(Debug, Error)]
pub enum Error {
    /// Address translation failed.
    #[error(transparent)]
    Translation(#[from] TranslationFault),

    /// CSR access failed.
    #[error(transparent)]
    Csr(#[from] CsrFault),

    /// Physical memory access failed.
    #[error(transparent)]
    Memory(#[from] MemoryError),

    /// Reference engine protocol misuse.
    #[error(transparent)]
    Difftest(#[from] DifftestError),

    /// State snapshot failed.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
