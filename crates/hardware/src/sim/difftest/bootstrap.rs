//! Bootstrap Program Assembler.
//!
//! The reference engine exposes no CSR copy primitive, so privileged state is transferred
//! by executing code on it. This module builds that code: one `csrrw x0, csr, xN` per CSR,
//! with `xN` preloaded in an initial register image. Running the program leaves every
//! synchronized CSR equal to the value placed in its scratch register.

use crate::common::RegisterFile;
use crate::common::constants::{
    CSR_FIELD_MASK, CSR_SHIFT, FUNCT3_CSRRW, FUNCT3_SHIFT, OPCODE_SYSTEM, RD_SHIFT,
    REG_FIELD_MASK, RS1_SHIFT,
};
use crate::core::arch::csr::{CsrId, Csrs};
use crate::core::arch::gpr::reg_name;

/// CSRs synchronized at attach time, paired with the scratch register holding each value.
pub const CSR_SYNC_ORDER: [(CsrId, usize); 6] = [
    (CsrId::Mtvec, 1),
    (CsrId::Mepc, 2),
    (CsrId::Mstatus, 3),
    (CsrId::Mcause, 4),
    (CsrId::Satp, 5),
    (CsrId::Mscratch, 6),
];

/// Encodes `csrrw rd, csr, rs1`.
pub const fn csrrw(rd: u32, csr: u32, rs1: u32) -> u32 {
    ((csr & CSR_FIELD_MASK) << CSR_SHIFT)
        | ((rs1 & REG_FIELD_MASK) << RS1_SHIFT)
        | (FUNCT3_CSRRW << FUNCT3_SHIFT)
        | ((rd & REG_FIELD_MASK) << RD_SHIFT)
        | OPCODE_SYSTEM
}

/// A fixed instruction sequence plus the register image it must start from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootstrapProgram {
    entry: u64,
    instructions: Vec<u32>,
    regs: RegisterFile,
}

impl BootstrapProgram {
    /// Creates an empty program loaded at `entry`, with a cleared register image shaped like `shape`.
    pub fn new(entry: u64, shape: &RegisterFile) -> Self {
        let mut regs = shape.blank_like();
        regs.pc = entry;
        Self {
            entry,
            instructions: Vec::new(),
            regs,
        }
    }

    /// Appends `csrrw x0, id, x<scratch>` and preloads `value` into `x<scratch>`.
    ///
    /// # Panics
    ///
    /// Panics if `scratch` is not a register of the image.
    pub fn push_csr_write(&mut self, id: CsrId, value: u64, scratch: usize) -> &mut Self {
        let inst = csrrw(0, id.number(), scratch as u32);
        tracing::trace!(
            addr = format_args!("{:#x}", self.next_pc()),
            inst = format_args!("{:08x}", inst),
            "csrrw zero, {}, {}",
            id,
            reg_name(scratch)
        );
        self.regs.write(scratch, value);
        self.instructions.push(inst);
        self
    }

    /// Builds the attach program that copies every CSR of `csrs` into the reference engine.
    pub fn csr_sync(csrs: &Csrs, entry: u64, shape: &RegisterFile) -> Self {
        let mut program = Self::new(entry, shape);
        for (id, scratch) in CSR_SYNC_ORDER {
            let _ = program.push_csr_write(id, csrs.read(id), scratch);
        }
        program
    }

    /// Load address of the first instruction; also the initial PC.
    pub const fn entry(&self) -> u64 {
        self.entry
    }

    /// Encoded instructions in execution order.
    pub fn instructions(&self) -> &[u32] {
        &self.instructions
    }

    /// Register image the program must start from.
    pub const fn initial_regs(&self) -> &RegisterFile {
        &self.regs
    }

    /// Number of instructions, which is also the number of steps needed to run it.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if no instruction has been pushed.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Little-endian machine code, ready to be copied to [`entry`](Self::entry).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.instructions
            .iter()
            .flat_map(|inst| inst.to_le_bytes())
            .collect()
    }

    fn next_pc(&self) -> u64 {
        self.entry + 4 * self.instructions.len() as u64
    }
}
