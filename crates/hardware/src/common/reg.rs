//! Register File.
//!
//! This module provides the `RegisterFile` struct: the raw architectural state of one hart
//! apart from its CSRs. It provides:
//! 1. **Storage:** General-purpose registers, program counter and the pending-interrupt line.
//! 2. **Images:** A flat little-endian byte image used by snapshots and the reference engine.
//! 3. **Observability:** Register display and name lookup for debugger front ends.

use std::fmt;

use crate::config::{BaseIsa, Xlen};
use crate::core::arch::gpr::{Gpr, reg_name};

/// General-purpose registers, program counter and pending-interrupt line of one hart.
///
/// The emulator owns one instance; the differential co-simulator owns a second,
/// independent one mirroring the reference engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    gpr: Gpr,
    /// Program counter.
    pub pc: u64,
    /// Edge-triggered interrupt line, set by a timer or device and cleared when consumed.
    pub pending_interrupt: bool,
}

impl RegisterFile {
    /// Creates a register file with every register, the PC and the pending line cleared.
    pub fn new(base_isa: BaseIsa, xlen: Xlen) -> Self {
        Self {
            gpr: Gpr::new(base_isa, xlen),
            pc: 0,
            pending_interrupt: false,
        }
    }

    /// Creates a cleared register file with the same shape (register count and width).
    pub fn blank_like(&self) -> Self {
        let mut regs = self.clone();
        for idx in 0..regs.gpr_count() {
            regs.write(idx, 0);
        }
        regs.pc = 0;
        regs.pending_interrupt = false;
        regs
    }

    /// Returns true if `other` has the same register count and width.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.gpr_count() == other.gpr_count() && self.xlen() == other.xlen()
    }

    /// Number of general-purpose registers (16 or 32).
    pub fn gpr_count(&self) -> usize {
        self.gpr.len()
    }

    /// Machine word width.
    pub const fn xlen(&self) -> Xlen {
        self.gpr.xlen()
    }

    /// Reads a general-purpose register.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not below [`gpr_count`](Self::gpr_count).
    pub fn read(&self, idx: usize) -> u64 {
        self.gpr.read(idx)
    }

    /// Writes a general-purpose register, truncated to the word width.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not below [`gpr_count`](Self::gpr_count).
    pub fn write(&mut self, idx: usize, val: u64) {
        self.gpr.write(idx, val);
    }

    /// All general-purpose registers in index order.
    pub fn gprs(&self) -> &[u64] {
        self.gpr.as_slice()
    }

    /// Resolves a debugger register name to its value.
    ///
    /// Accepts `$pc`, `$0` and ABI names (`$ra`, `$a0`, ...), with or without the leading `$`.
    pub fn lookup(&self, name: &str) -> Option<u64> {
        let name = name.strip_prefix('$').unwrap_or(name);
        if name == "pc" {
            return Some(self.pc);
        }
        (0..self.gpr_count())
            .find(|&i| name == reg_name(i).trim_start_matches('$'))
            .map(|i| self.read(i))
    }

    /// Size of the byte image in bytes: every GPR, the PC and the pending line, one word each.
    pub fn image_len(&self) -> usize {
        (self.gpr_count() + 2) * self.xlen().bytes()
    }

    /// Serializes the register file as little-endian words:
    /// `gpr[0..N]`, `pc`, then the pending line as 0 or 1.
    pub fn to_image(&self) -> Vec<u8> {
        let width = self.xlen().bytes();
        let mut image = Vec::with_capacity(self.image_len());
        let words = self
            .gprs()
            .iter()
            .copied()
            .chain([self.pc, u64::from(self.pending_interrupt)]);
        for word in words {
            image.extend_from_slice(&word.to_le_bytes()[..width]);
        }
        image
    }

    /// Restores the register file from an image produced by [`to_image`](Self::to_image).
    ///
    /// Returns `false`, leaving the register file untouched, if `image` has the wrong length.
    pub fn load_image(&mut self, image: &[u8]) -> bool {
        if image.len() != self.image_len() {
            return false;
        }
        let width = self.xlen().bytes();
        let mut words = image.chunks_exact(width).map(|chunk| {
            let mut buf = [0u8; 8];
            buf[..width].copy_from_slice(chunk);
            u64::from_le_bytes(buf)
        });
        for idx in 0..self.gpr_count() {
            let val = words.next().unwrap_or(0);
            self.write(idx, val);
        }
        self.pc = words.next().unwrap_or(0);
        self.pending_interrupt = words.next().unwrap_or(0) != 0;
        true
    }
}

impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<15}{:#010x}", "pc", self.pc)?;
        for (idx, val) in self.gprs().iter().enumerate() {
            writeln!(f, "{:<15}{:#010x}", reg_name(idx), val)?;
        }
        Ok(())
    }
}
