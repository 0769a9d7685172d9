//! Trap Handling Logic.
//!
//! This module implements machine-mode trap entry and interrupt sampling. It performs
//! the following:
//! 1. **Trap Entry:** Saves the faulting PC and cause, stacks `MIE` into `MPIE`, disables
//!    interrupts and returns the trap vector.
//! 2. **Interrupt Query:** Consumes the pending-interrupt line when interrupts are enabled.
//!
//! Returning from a trap (`mret`) belongs to instruction execution and is not modeled here.

use super::Cpu;
use crate::core::arch::csr;
use crate::core::arch::trap as trap_cause;

impl Cpu {
    /// Enters a machine-mode trap.
    ///
    /// Writes `epc` to `mepc` and `cause` to `mcause`, copies `MIE` into `MPIE`, clears
    /// `MIE`, and returns `mtvec`: the address execution must continue from. Allowed
    /// whether or not interrupts are enabled.
    pub fn raise(&mut self, cause: u64, epc: u64) -> u64 {
        if self.trace_traps {
            tracing::debug!(
                mcause = format_args!("{:#x}", cause),
                interrupt = trap_cause::is_interrupt(cause, self.xlen),
                code = trap_cause::exception_code(cause, self.xlen),
                mepc = format_args!("{:#x}", epc),
                "trap"
            );
        }

        self.csrs.mepc = self.xlen.truncate(epc);
        self.csrs.mcause = self.xlen.truncate(cause);

        let mstatus = self.csrs.mstatus;
        let mstatus = csr::with_mstatus_mpie(mstatus, csr::mstatus_mie(mstatus));
        self.csrs.mstatus = csr::with_mstatus_mie(mstatus, false);

        self.csrs.mtvec
    }

    /// Samples the pending-interrupt line.
    ///
    /// Returns the machine timer interrupt cause if `MIE` is set, `mtvec` is nonzero and
    /// the line is raised; the line is cleared on that path, so each edge is delivered once.
    /// Otherwise returns `None` and leaves the line alone. Never touches `mepc`, `mcause`
    /// or `mtvec`.
    pub fn query_interrupt(&mut self) -> Option<u64> {
        if csr::mstatus_mie(self.csrs.mstatus)
            && self.csrs.mtvec != 0
            && self.regs.pending_interrupt
        {
            self.regs.pending_interrupt = false;
            return Some(trap_cause::machine_timer_cause(self.xlen));
        }
        None
    }
}
