//! RISC-V General-Purpose Register File.
//!
//! This module implements the General-Purpose Register (GPR) storage. It performs the following:
//! 1. **Storage:** Maintains 16 (RV32E/RV64E) or 32 integer registers, sized at construction.
//! 2. **Width:** Truncates every write to the configured machine word width.
//! 3. **Naming:** Maps register indices to their ABI names for diagnostics.
//!
//! Register `x0` is not masked here: the execution loop discards writes to it, and the
//! differential checker compares it like any other register so a stray write shows up.

use crate::config::{BaseIsa, Xlen};

/// ABI names of the 32 integer registers, indexed by register number.
pub const REG_NAMES: [&str; 32] = [
    "$0", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4", "a5",
    "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4", "t5",
    "t6",
];

/// Returns the ABI name of register `idx`, or `"?"` when out of range.
pub fn reg_name(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("?")
}

/// General-Purpose Register file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gpr {
    regs: Vec<u64>,
    xlen: Xlen,
}

impl Gpr {
    /// Creates a register file with all registers set to zero.
    pub fn new(base_isa: BaseIsa, xlen: Xlen) -> Self {
        Self {
            regs: vec![0; base_isa.gpr_count()],
            xlen,
        }
    }

    /// Number of registers.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// Always false; a register file holds at least 16 registers.
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Machine word width of the stored values.
    pub const fn xlen(&self) -> Xlen {
        self.xlen
    }

    /// Reads register `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not below [`len`](Self::len).
    pub fn read(&self, idx: usize) -> u64 {
        self.regs[idx]
    }

    /// Writes register `idx`, truncated to the word width.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not below [`len`](Self::len).
    pub fn write(&mut self, idx: usize, val: u64) {
        self.regs[idx] = self.xlen.truncate(val);
    }

    /// All registers in index order.
    pub fn as_slice(&self) -> &[u64] {
        &self.regs
    }
}
