//! Differential Co-Simulation.
//!
//! This module runs a trusted reference emulator in lockstep with the core and compares
//! architectural state after every step. It provides:
//! 1. **Session Control:** `init`, `attach`, `detach`, `skip_ref` and `step`.
//! 2. **Privileged Sync:** CSR transfer at attach time through a [`BootstrapProgram`].
//! 3. **Comparison:** GPR and PC checks that report every mismatching register.
//!
//! A mismatch is not an error: it is logged, reported through the boolean result, and the
//! caller decides whether to stop.

/// Bootstrap program assembler.
pub mod bootstrap;

/// Reference engine interface.
pub mod reference;

use std::fmt;

pub use self::bootstrap::BootstrapProgram;
pub use self::reference::{CopyDirection, RefEngine};

use crate::common::error::DifftestError;
use crate::common::{PhysAddr, RegisterFile, Result};
use crate::config::Config;
use crate::core::Cpu;
use crate::core::arch::csr::{CsrId, Csrs};
use crate::core::arch::gpr::reg_name;
use crate::soc::Memory;

/// One register whose DUT and reference values differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// Register name (`$pc` for the program counter).
    pub name: &'static str,
    /// Value in the emulator.
    pub dut: u64,
    /// Value in the reference engine.
    pub reference: u64,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<15}{:#010x} {:#010x}", self.name, self.dut, self.reference)
    }
}

/// Lists every GPR that differs between `dut` and `reference`, then the PC if it differs.
///
/// `pc` is the emulator's PC; the reference PC is taken from `reference`. Both files must
/// have the same shape.
pub fn diff_registers(dut: &RegisterFile, reference: &RegisterFile, pc: u64) -> Vec<Mismatch> {
    let mut mismatches: Vec<Mismatch> = dut
        .gprs()
        .iter()
        .zip(reference.gprs())
        .enumerate()
        .filter(|(_, (d, r))| d != r)
        .map(|(idx, (&dut, &reference))| Mismatch {
            name: reg_name(idx),
            dut,
            reference,
        })
        .collect();
    if pc != reference.pc {
        mismatches.push(Mismatch {
            name: "$pc",
            dut: pc,
            reference: reference.pc,
        });
    }
    mismatches
}

/// Lists every CSR that differs between `dut` and `reference`.
pub fn diff_csrs(dut: &Csrs, reference: &Csrs) -> Vec<Mismatch> {
    CsrId::ALL
        .into_iter()
        .filter(|&id| dut.read(id) != reference.read(id))
        .map(|id| Mismatch {
            name: id.name(),
            dut: dut.read(id),
            reference: reference.read(id),
        })
        .collect()
}

fn report(mismatches: &[Mismatch]) {
    for m in mismatches {
        tracing::error!(
            reg = m.name,
            dut = format_args!("{:#010x}", m.dut),
            reference = format_args!("{:#010x}", m.reference),
            "difftest mismatch"
        );
    }
}

/// Compares the emulator's GPRs and `pc` against `reference`.
///
/// Every mismatching register is logged, not only the first. Returns true only if none
/// differ, including the PC. A reference of a different shape never matches.
pub fn check_registers(cpu: &Cpu, reference: &RegisterFile, pc: u64) -> bool {
    if !cpu.regs.same_shape(reference) {
        tracing::error!(
            dut = cpu.regs.gpr_count(),
            reference = reference.gpr_count(),
            "difftest register file shape mismatch"
        );
        return false;
    }
    let mismatches = diff_registers(&cpu.regs, reference, pc);
    report(&mismatches);
    mismatches.is_empty()
}

/// Compares the emulator's CSRs against `reference`, logging each mismatch.
pub fn check_csrs(cpu: &Cpu, reference: &Csrs) -> bool {
    let mismatches = diff_csrs(&cpu.csrs, reference);
    report(&mismatches);
    mismatches.is_empty()
}

/// Lockstep driver for one reference engine.
#[derive(Debug)]
pub struct DiffTest<E: RefEngine> {
    engine: E,
    ref_regs: RegisterFile,
    attached: bool,
    skip_next: bool,
    enabled: bool,
    compare_csrs: bool,
    reset_vector: u64,
}

impl<E: RefEngine> DiffTest<E> {
    /// Wraps `engine`. The session starts detached; call [`init`](Self::init) or
    /// [`attach`](Self::attach) to begin.
    pub fn new(engine: E, cpu: &Cpu, config: &Config) -> Self {
        Self {
            engine,
            ref_regs: cpu.regs.blank_like(),
            attached: false,
            skip_next: false,
            enabled: config.difftest.enabled,
            compare_csrs: config.difftest.compare_csrs,
            reset_vector: config.general.reset_vector,
        }
    }

    /// The wrapped reference engine.
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// The wrapped reference engine, mutably.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Register file last copied back from the reference engine.
    pub const fn reference_regs(&self) -> &RegisterFile {
        &self.ref_regs
    }

    /// Returns true while the reference engine is being stepped.
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    fn validate(&self, cpu: &Cpu, mem: &Memory) -> Result<()> {
        let dut = cpu.regs.gpr_count();
        let reference = self.engine.gpr_count();
        if dut != reference {
            return Err(DifftestError::RegisterCount { dut, reference }.into());
        }
        if self.engine.mem_size() < mem.size() {
            return Err(DifftestError::BufferSize {
                expected: mem.size(),
                actual: self.engine.mem_size(),
            }
            .into());
        }
        Ok(())
    }

    fn sync_from_dut(&mut self, cpu: &Cpu, mem: &mut Memory) {
        let base = PhysAddr::new(mem.base());
        self.engine.memcpy(base, mem.as_mut_slice(), CopyDirection::ToRef);
        self.sync_regs(cpu);
    }

    fn sync_regs(&mut self, cpu: &Cpu) {
        self.ref_regs = cpu.regs.clone();
        self.engine.regcpy(&mut self.ref_regs, CopyDirection::ToRef);
    }

    /// Starts a session by copying guest RAM and the register file to the reference engine.
    /// CSRs are not transferred.
    ///
    /// # Errors
    ///
    /// Returns [`DifftestError`] if the reference register count or memory size is not
    /// compatible with the emulator.
    pub fn init(&mut self, cpu: &Cpu, mem: &mut Memory) -> Result<()> {
        self.validate(cpu, mem)?;
        self.sync_from_dut(cpu, mem);
        self.attached = true;
        self.skip_next = false;
        tracing::info!(pc = format_args!("{:#x}", cpu.pc()), "difftest initialized");
        Ok(())
    }

    /// Calls [`init`](Self::init) if co-simulation is enabled in the configuration.
    ///
    /// Returns whether the session is now attached.
    ///
    /// # Errors
    ///
    /// Propagates [`init`](Self::init) failures.
    pub fn start(&mut self, cpu: &Cpu, mem: &mut Memory) -> Result<bool> {
        if self.enabled {
            self.init(cpu, mem)?;
        }
        Ok(self.attached)
    }

    /// Attaches the reference engine mid-run.
    ///
    /// Runs the CSR bootstrap program at the reset vector, which leaves the reference CSRs
    /// equal to `cpu.csrs`, then copies guest RAM and the register file so the bootstrap's
    /// code and scratch registers are overwritten with emulator state.
    ///
    /// # Errors
    ///
    /// Returns [`DifftestError`] if the reference register count or memory size is not
    /// compatible with the emulator.
    pub fn attach(&mut self, cpu: &Cpu, mem: &mut Memory) -> Result<()> {
        self.validate(cpu, mem)?;
        let program = BootstrapProgram::csr_sync(&cpu.csrs, self.reset_vector, &cpu.regs);
        self.engine.run_bootstrap(&program);
        self.sync_from_dut(cpu, mem);
        self.attached = true;
        self.skip_next = false;
        tracing::info!(
            pc = format_args!("{:#x}", cpu.pc()),
            bootstrap_steps = program.len(),
            "difftest attached"
        );
        Ok(())
    }

    /// Stops stepping the reference engine. Its state is kept.
    pub fn detach(&mut self) {
        self.attached = false;
        self.skip_next = false;
        tracing::info!("difftest detached");
    }

    /// Makes the next [`step`](Self::step) copy the emulator's registers to the reference
    /// instead of comparing, for instructions the reference cannot model (device I/O).
    ///
    /// # Errors
    ///
    /// Returns [`DifftestError::NotAttached`] while detached.
    pub fn skip_ref(&mut self) -> Result<()> {
        if !self.attached {
            return Err(DifftestError::NotAttached.into());
        }
        self.skip_next = true;
        tracing::info!("difftest skipping reference for one step");
        Ok(())
    }

    /// Advances the reference engine by `n` instructions and compares it with `cpu`.
    ///
    /// Returns true if no mismatch was found. Always true while detached.
    pub fn step(&mut self, cpu: &Cpu, n: u64) -> bool {
        if !self.attached {
            return true;
        }
        if self.skip_next {
            self.skip_next = false;
            self.sync_regs(cpu);
            return true;
        }

        self.engine.exec(n);
        self.engine.regcpy(&mut self.ref_regs, CopyDirection::ToDut);

        let mut ok = check_registers(cpu, &self.ref_regs, cpu.pc());
        if self.compare_csrs
            && let Some(ref_csrs) = self.engine.csr_snapshot()
        {
            ok &= check_csrs(cpu, &ref_csrs);
        }
        ok
    }
}
