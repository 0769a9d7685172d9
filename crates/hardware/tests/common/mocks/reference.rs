use rvpriv_core::common::{PhysAddr, RegisterFile};
use rvpriv_core::core::arch::csr::{CsrId, Csrs};
use rvpriv_core::sim::difftest::{CopyDirection, RefEngine};

const OPCODE_OP_IMM: u32 = 0b001_0011;
const OPCODE_SYSTEM: u32 = 0b111_0011;

/// Minimal reference emulator.
///
/// Executes `csrrw` and `addi`; every other instruction only advances the PC. Enough to
/// run the attach bootstrap and short straight-line programs.
#[derive(Debug)]
pub struct InterpRef {
    regs: RegisterFile,
    csrs: Csrs,
    mem: Vec<u8>,
    base: u64,
    pub retired: u64,
    pub memcpy_calls: usize,
}

impl InterpRef {
    pub fn new(shape: &RegisterFile, base: u64, size: usize) -> Self {
        Self {
            regs: shape.blank_like(),
            csrs: Csrs::default(),
            mem: vec![0; size],
            base,
            retired: 0,
            memcpy_calls: 0,
        }
    }

    pub fn regs(&self) -> &RegisterFile {
        &self.regs
    }

    pub fn read_word(&self, addr: u64) -> Option<u32> {
        let off = usize::try_from(addr.checked_sub(self.base)?).ok()?;
        let bytes = self.mem.get(off..off + 4)?;
        Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn execute(&mut self, inst: u32) {
        let opcode = inst & 0x7F;
        let rd = ((inst >> 7) & 0x1F) as usize;
        let funct3 = (inst >> 12) & 0x7;
        let rs1 = ((inst >> 15) & 0x1F) as usize;
        match (opcode, funct3) {
            (OPCODE_SYSTEM, 0b001) => {
                if let Ok(id) = CsrId::try_from(inst >> 20) {
                    let old = self.csrs.read(id);
                    self.csrs.write(id, self.regs.read(rs1));
                    if rd != 0 {
                        self.regs.write(rd, old);
                    }
                }
            }
            (OPCODE_OP_IMM, 0b000) => {
                let imm = ((inst as i32) >> 20) as i64 as u64;
                if rd != 0 {
                    let val = self.regs.read(rs1).wrapping_add(imm);
                    self.regs.write(rd, val);
                }
            }
            _ => {}
        }
    }
}

impl RefEngine for InterpRef {
    fn memcpy(&mut self, addr: PhysAddr, buf: &mut [u8], dir: CopyDirection) {
        self.memcpy_calls += 1;
        let off = (addr.val() - self.base) as usize;
        let region = &mut self.mem[off..off + buf.len()];
        match dir {
            CopyDirection::ToRef => region.copy_from_slice(buf),
            CopyDirection::ToDut => buf.copy_from_slice(region),
        }
    }

    fn regcpy(&mut self, regs: &mut RegisterFile, dir: CopyDirection) {
        match dir {
            CopyDirection::ToRef => self.regs = regs.clone(),
            CopyDirection::ToDut => *regs = self.regs.clone(),
        }
    }

    fn exec(&mut self, steps: u64) {
        for _ in 0..steps {
            let inst = self.read_word(self.regs.pc).unwrap_or(0);
            self.execute(inst);
            self.regs.pc = self.regs.pc.wrapping_add(4);
            self.retired += 1;
        }
    }

    fn gpr_count(&self) -> usize {
        self.regs.gpr_count()
    }

    fn mem_size(&self) -> usize {
        self.mem.len()
    }

    fn csr_snapshot(&self) -> Option<Csrs> {
        Some(self.csrs)
    }
}

/// Encodes `addi rd, rs1, imm`.
pub const fn addi(rd: u32, rs1: u32, imm: i32) -> u32 {
    (((imm as u32) & 0xFFF) << 20) | (rs1 << 15) | (rd << 7) | OPCODE_OP_IMM
}
