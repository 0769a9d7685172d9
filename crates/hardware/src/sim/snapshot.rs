//! State snapshots.
//!
//! A snapshot is three raw sections written back to back, with no header:
//! 1. **Registers:** every GPR, the PC and the pending-interrupt line, one word each.
//! 2. **CSRs:** mstatus, mtvec, mepc, mcause, satp and mscratch, one word each.
//! 3. **Memory:** the whole guest RAM image.
//!
//! Words are little-endian at the configured width, so a snapshot can only be restored
//! into a core with the same register count, width and RAM size.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::common::Result;
use crate::common::error::SnapshotError;
use crate::core::Cpu;
use crate::core::arch::csr::Csrs;
use crate::soc::Memory;

/// Writes the register file, CSRs and guest RAM to `w`.
///
/// # Errors
///
/// Returns [`SnapshotError::Io`] if writing fails.
pub fn save<W: Write>(w: &mut W, cpu: &Cpu, mem: &Memory) -> Result<()> {
    w.write_all(&cpu.regs.to_image()).map_err(SnapshotError::from)?;
    w.write_all(&cpu.csrs.to_image(cpu.xlen())).map_err(SnapshotError::from)?;
    w.write_all(mem.as_slice()).map_err(SnapshotError::from)?;
    w.flush().map_err(SnapshotError::from)?;
    Ok(())
}

fn read_section<R: Read>(
    r: &mut R,
    section: &'static str,
    expected: usize,
) -> std::result::Result<Vec<u8>, SnapshotError> {
    let mut buf = Vec::with_capacity(expected);
    let _ = r.by_ref().take(expected as u64).read_to_end(&mut buf)?;
    if buf.len() == expected {
        Ok(buf)
    } else {
        Err(SnapshotError::SizeMismatch {
            section,
            expected,
            actual: buf.len(),
        })
    }
}

/// Restores the register file, CSRs and guest RAM from `r`.
///
/// Every section is read and checked before anything is modified, so a truncated or
/// oversized snapshot leaves `cpu` and `mem` untouched.
///
/// # Errors
///
/// Returns [`SnapshotError::SizeMismatch`] if a section is short or bytes follow the
/// memory image, and [`SnapshotError::Io`] if reading fails.
pub fn load<R: Read>(r: &mut R, cpu: &mut Cpu, mem: &mut Memory) -> Result<()> {
    let regs = read_section(r, "registers", cpu.regs.image_len())?;
    let csrs = read_section(r, "csrs", Csrs::image_len(cpu.xlen()))?;
    let ram = read_section(r, "memory", mem.size())?;

    let mut trailing = Vec::new();
    let extra = r.read_to_end(&mut trailing).map_err(SnapshotError::from)?;
    if extra != 0 {
        return Err(SnapshotError::SizeMismatch {
            section: "memory",
            expected: mem.size(),
            actual: mem.size() + extra,
        }
        .into());
    }

    let csrs = Csrs::from_image(&csrs, cpu.xlen()).ok_or(SnapshotError::SizeMismatch {
        section: "csrs",
        expected: Csrs::image_len(cpu.xlen()),
        actual: csrs.len(),
    })?;
    let _ = cpu.regs.load_image(&regs);
    cpu.csrs = csrs;
    mem.as_mut_slice().copy_from_slice(&ram);
    Ok(())
}

/// Saves a snapshot to the file at `path`, creating or truncating it.
///
/// # Errors
///
/// Returns [`SnapshotError::Io`] if the file cannot be created or written.
pub fn save_to_path<P: AsRef<Path>>(path: P, cpu: &Cpu, mem: &Memory) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(SnapshotError::from)?;
    save(&mut BufWriter::new(file), cpu, mem)?;
    tracing::info!(path = %path.display(), "snapshot saved");
    Ok(())
}

/// Loads a snapshot from the file at `path`.
///
/// # Errors
///
/// Returns [`SnapshotError`] if the file cannot be read or does not match the core's shape.
pub fn load_from_path<P: AsRef<Path>>(path: P, cpu: &mut Cpu, mem: &mut Memory) -> Result<()> {
    let path = path.as_ref();
    let file = File::open(path).map_err(SnapshotError::from)?;
    load(&mut BufReader::new(file), cpu, mem)?;
    tracing::info!(path = %path.display(), "snapshot loaded");
    Ok(())
}
