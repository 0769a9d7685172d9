//! Snapshot save/load tests.

use std::io::Cursor;

use pretty_assertions::assert_eq;

use crate::common::harness::{MEM_BASE, MEM_SIZE, TestContext};
use rvpriv_core::common::Error;
use rvpriv_core::common::error::SnapshotError;
use rvpriv_core::config::{BaseIsa, Xlen};
use rvpriv_core::core::arch::csr::Csrs;
use rvpriv_core::sim::snapshot;

fn populated() -> TestContext {
    let mut tc = TestContext::new();
    tc.cpu.regs.write(2, 0x8040_0000);
    tc.cpu.regs.write(31, 0xFFFF_FFFF);
    tc.cpu.regs.pc = 0x8000_0123;
    tc.cpu.regs.pending_interrupt = true;
    tc.cpu.csrs.mtvec = 0x8000_0100;
    tc.cpu.csrs.satp = 0x8008_0000;
    tc.write_word(MEM_BASE, 0x0000_0013);
    tc.write_word(MEM_BASE + MEM_SIZE as u64 - 4, 0xABCD_EF01);
    tc
}

#[test]
fn layout_is_registers_then_csrs_then_memory() {
    let tc = populated();
    let mut buf = Vec::new();
    snapshot::save(&mut buf, &tc.cpu, &tc.mem).unwrap();

    let regs_len = tc.cpu.regs.image_len();
    let csrs_len = Csrs::image_len(Xlen::Rv32);
    assert_eq!(regs_len, 34 * 4);
    assert_eq!(buf.len(), regs_len + csrs_len + MEM_SIZE);
    assert_eq!(&buf[..regs_len], tc.cpu.regs.to_image().as_slice());
    assert_eq!(
        &buf[regs_len..regs_len + csrs_len],
        tc.cpu.csrs.to_image(Xlen::Rv32).as_slice()
    );
    assert_eq!(&buf[regs_len + csrs_len..], tc.mem.as_slice());
}

#[test]
fn file_round_trip() {
    let tc = populated();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.bin");
    snapshot::save_to_path(&path, &tc.cpu, &tc.mem).unwrap();

    let mut restored = TestContext::new();
    snapshot::load_from_path(&path, &mut restored.cpu, &mut restored.mem).unwrap();
    assert_eq!(restored.cpu, tc.cpu);
    assert_eq!(restored.read_word(MEM_BASE), 0x13);
    assert_eq!(
        restored.read_word(MEM_BASE + MEM_SIZE as u64 - 4),
        0xABCD_EF01
    );
}

#[test]
fn truncated_snapshot_leaves_state_untouched() {
    let tc = populated();
    let mut buf = Vec::new();
    snapshot::save(&mut buf, &tc.cpu, &tc.mem).unwrap();
    buf.truncate(buf.len() - 1);

    let mut target = TestContext::new();
    let before = target.cpu.clone();
    let err = snapshot::load(&mut Cursor::new(buf), &mut target.cpu, &mut target.mem).unwrap_err();
    assert!(matches!(
        err,
        Error::Snapshot(SnapshotError::SizeMismatch {
            section: "memory",
            ..
        })
    ));
    assert_eq!(target.cpu, before);
    assert_eq!(target.read_word(MEM_BASE), 0);
}

#[test]
fn trailing_bytes_are_rejected() {
    let tc = populated();
    let mut buf = Vec::new();
    snapshot::save(&mut buf, &tc.cpu, &tc.mem).unwrap();
    buf.extend_from_slice(&[0, 0]);

    let mut target = TestContext::new();
    let err = snapshot::load(&mut Cursor::new(buf), &mut target.cpu, &mut target.mem).unwrap_err();
    match err {
        Error::Snapshot(SnapshotError::SizeMismatch {
            section,
            expected,
            actual,
        }) => {
            assert_eq!(section, "memory");
            assert_eq!(actual, expected + 2);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn register_shape_must_match() {
    let tc = populated();
    let mut buf = Vec::new();
    snapshot::save(&mut buf, &tc.cpu, &tc.mem).unwrap();

    // RV32E reads a shorter register section, so the sections that follow are misaligned
    // and the memory image comes up long.
    let mut target = TestContext::with_shape(Xlen::Rv32, BaseIsa::E);
    let err = snapshot::load(&mut Cursor::new(buf), &mut target.cpu, &mut target.mem).unwrap_err();
    assert!(matches!(err, Error::Snapshot(SnapshotError::SizeMismatch { .. })));
}

#[test]
fn empty_input_fails_on_registers() {
    let mut target = TestContext::new();
    let err = snapshot::load(&mut Cursor::new(Vec::new()), &mut target.cpu, &mut target.mem)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Snapshot(SnapshotError::SizeMismatch {
            section: "registers",
            actual: 0,
            ..
        })
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut target = TestContext::new();
    let err = snapshot::load_from_path(
        dir.path().join("absent.bin"),
        &mut target.cpu,
        &mut target.mem,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Snapshot(SnapshotError::Io(_))));
}
