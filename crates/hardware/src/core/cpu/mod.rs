//! Per-hart CPU Context.
//!
//! This module defines the `Cpu` structure, the container for one hart's privileged state.
//! It coordinates the following:
//! 1. **State Management:** Owns the register file and the CSR set.
//! 2. **Address Translation:** Owns the MMU used by the virtual memory accessors.
//! 3. **Traps:** Machine-mode trap entry and pending-interrupt sampling.
//!
//! There is no global state: every operation goes through a `Cpu` value, so independent
//! instances (for example with different register widths) can coexist.

/// Control and Status Register access.
pub mod csr;

/// Virtual memory accessors (ifetch, read, write).
pub mod memory;

/// Trap entry and interrupt query.
pub mod trap;

use std::fmt;

use crate::common::RegisterFile;
use crate::config::{Config, Xlen};
use crate::core::arch::csr::Csrs;
use crate::core::units::mmu::Mmu;

/// Privileged state of one hart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cpu {
    /// General-purpose registers, program counter and pending-interrupt line.
    pub regs: RegisterFile,
    /// Control and Status Registers.
    pub csrs: Csrs,
    /// Address translator.
    pub mmu: Mmu,
    /// Machine word width.
    xlen: Xlen,
    /// Trace every trap entry.
    pub trace_traps: bool,
}

impl Cpu {
    /// Creates a hart with cleared registers and CSRs, PC at the configured reset vector.
    pub fn new(config: &Config) -> Self {
        let xlen = config.general.xlen;
        let mut regs = RegisterFile::new(config.general.base_isa, xlen);
        regs.pc = xlen.truncate(config.general.reset_vector);
        Self {
            regs,
            csrs: Csrs::default(),
            mmu: Mmu::new(xlen),
            xlen,
            trace_traps: config.general.trace_traps,
        }
    }

    /// Machine word width.
    pub const fn xlen(&self) -> Xlen {
        self.xlen
    }

    /// Program counter.
    pub const fn pc(&self) -> u64 {
        self.regs.pc
    }

    /// Raises the external interrupt line. It stays raised until [`query_interrupt`]
    /// consumes it.
    ///
    /// [`query_interrupt`]: Cpu::query_interrupt
    pub fn set_pending_interrupt(&mut self) {
        self.regs.pending_interrupt = true;
    }
}

impl fmt::Display for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reg:")?;
        write!(f, "{}", self.regs)?;
        writeln!(f, "CSR:")?;
        write!(f, "{}", self.csrs)
    }
}
