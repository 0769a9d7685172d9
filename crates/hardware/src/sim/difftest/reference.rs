//! Reference engine interface.
//!
//! The co-simulator drives an independent, trusted emulator through three primitives:
//! memory copy, register copy and execute. None of them report errors; a failure on the
//! reference side only shows up as a later register mismatch.

use super::bootstrap::BootstrapProgram;
use crate::common::{PhysAddr, RegisterFile};
use crate::core::arch::csr::Csrs;

/// Direction of a copy between the emulator (DUT) and the reference engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CopyDirection {
    /// Emulator state overwrites reference state.
    ToRef,
    /// Reference state overwrites the caller's buffer.
    ToDut,
}

/// A reference emulator the co-simulator can step in lockstep.
pub trait RefEngine {
    /// Copies `buf.len()` bytes between `buf` and reference memory at `addr`.
    ///
    /// With [`CopyDirection::ToRef`] `buf` is only read; with [`CopyDirection::ToDut`] it is
    /// overwritten.
    fn memcpy(&mut self, addr: PhysAddr, buf: &mut [u8], dir: CopyDirection);

    /// Copies the whole register image (GPRs and PC) in the given direction.
    fn regcpy(&mut self, regs: &mut RegisterFile, dir: CopyDirection);

    /// Executes `steps` instructions.
    fn exec(&mut self, steps: u64);

    /// Number of general-purpose registers in the reference register image.
    fn gpr_count(&self) -> usize;

    /// Size of reference memory in bytes.
    fn mem_size(&self) -> usize;

    /// CSR values, for engines able to expose them.
    fn csr_snapshot(&self) -> Option<Csrs> {
        None
    }

    /// Runs a bootstrap program: copies its code to its entry point, installs its initial
    /// register image and executes exactly one step per instruction.
    fn run_bootstrap(&mut self, program: &BootstrapProgram) {
        let mut code = program.to_bytes();
        self.memcpy(PhysAddr::new(program.entry()), &mut code, CopyDirection::ToRef);
        let mut regs = program.initial_regs().clone();
        self.regcpy(&mut regs, CopyDirection::ToRef);
        self.exec(program.len() as u64);
    }
}

impl<E: RefEngine + ?Sized> RefEngine for Box<E> {
    fn memcpy(&mut self, addr: PhysAddr, buf: &mut [u8], dir: CopyDirection) {
        (**self).memcpy(addr, buf, dir);
    }

    fn regcpy(&mut self, regs: &mut RegisterFile, dir: CopyDirection) {
        (**self).regcpy(regs, dir);
    }

    fn exec(&mut self, steps: u64) {
        (**self).exec(steps);
    }

    fn gpr_count(&self) -> usize {
        (**self).gpr_count()
    }

    fn mem_size(&self) -> usize {
        (**self).mem_size()
    }

    fn csr_snapshot(&self) -> Option<Csrs> {
        (**self).csr_snapshot()
    }

    fn run_bootstrap(&mut self, program: &BootstrapProgram) {
        (**self).run_bootstrap(program);
    }
}
