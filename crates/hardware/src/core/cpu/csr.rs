//! CSR Access Logic.
//!
//! Numeric CSR accessors for the execution loop and the debugger. Only the six modeled
//! registers are accepted; any other number is a host-level fault, not a guest trap.

use super::Cpu;
use crate::common::CsrFault;
use crate::core::arch::csr::CsrId;

impl Cpu {
    /// Reads a CSR by number.
    ///
    /// # Errors
    ///
    /// Returns [`CsrFault::UnknownId`] for numbers outside the modeled set.
    pub fn csr_read(&self, addr: u32) -> Result<u64, CsrFault> {
        let id = CsrId::try_from(addr)?;
        Ok(self.csrs.read(id))
    }

    /// Writes a CSR by number. The value is truncated to the word width and otherwise
    /// stored verbatim; `mstatus` bits this core does not interpret are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`CsrFault::UnknownId`] for numbers outside the modeled set.
    pub fn csr_write(&mut self, addr: u32, val: u64) -> Result<(), CsrFault> {
        let id = CsrId::try_from(addr)?;
        self.csrs.write(id, self.xlen.truncate(val));
        Ok(())
    }
}
