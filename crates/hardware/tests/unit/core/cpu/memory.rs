//! Virtual memory accessor tests.

use pretty_assertions::assert_eq;

use crate::common::harness::{MEM_BASE, R, ROOT_PPN, TestContext, V, W, make_pte};
use rvpriv_core::common::{AccessType, Error, PhysAddr, TranslationFault, VirtAddr};
use rvpriv_core::soc::PhysMemory;

#[test]
fn bare_mode_ifetch_matches_physical_read() {
    let mut tc = TestContext::new();
    tc.write_word(MEM_BASE, 0x0000_0413);
    tc.cpu.csrs.satp = 0;

    let fetched = tc.cpu.vaddr_ifetch(&mut tc.mem, MEM_BASE, 4).unwrap();
    let direct = tc.mem.paddr_read(PhysAddr::new(MEM_BASE), 4).unwrap();
    assert_eq!(fetched, direct);
    assert_eq!(fetched, 0x0000_0413);
}

#[test]
fn bare_mode_ignores_satp_low_bits() {
    let mut tc = TestContext::new();
    tc.write_word(MEM_BASE + 8, 0xCAFE_F00D);
    tc.cpu.csrs.satp = 0x7FFF_FFFF;
    assert_eq!(
        tc.cpu.vaddr_read(&mut tc.mem, MEM_BASE + 8, 4).unwrap(),
        0xCAFE_F00D
    );
}

fn map_page(tc: &mut TestContext, vpn1: u64, vpn0: u64, frame_ppn: u64) {
    let l0 = ROOT_PPN + 1 + vpn1;
    tc.write_pte(ROOT_PPN, vpn1, make_pte(l0, V));
    tc.write_pte(l0, vpn0, make_pte(frame_ppn, V | R | W));
}

#[test]
fn translated_accesses_keep_page_offset() {
    let mut tc = TestContext::new();
    tc.enable_sv32(ROOT_PPN);
    let frame_ppn = ROOT_PPN + 0x100;
    map_page(&mut tc, 0, 4, frame_ppn);

    let vaddr = (4 << 12) | 0x2C;
    tc.cpu.vaddr_write(&mut tc.mem, vaddr, 4, 0x1122_3344).unwrap();
    assert_eq!(tc.read_word((frame_ppn << 12) | 0x2C), 0x1122_3344);
    assert_eq!(tc.cpu.vaddr_read(&mut tc.mem, vaddr, 2).unwrap(), 0x3344);
    assert_eq!(
        tc.cpu.vaddr_ifetch(&mut tc.mem, vaddr, 4).unwrap(),
        0x1122_3344
    );
}

#[test]
fn translated_page_crossing_access_faults() {
    let mut tc = TestContext::new();
    tc.enable_sv32(ROOT_PPN);
    map_page(&mut tc, 0, 4, ROOT_PPN + 0x100);

    let res = tc.cpu.vaddr_read(&mut tc.mem, (4 << 12) | 0xFFE, 4);
    assert!(matches!(
        res,
        Err(Error::Translation(TranslationFault::CrossPage { len: 4, .. }))
    ));
}

#[test]
fn bare_mode_out_of_range_is_a_memory_error() {
    let mut tc = TestContext::new();
    let res = tc.cpu.vaddr_write(&mut tc.mem, 0x1000, 4, 0);
    assert!(matches!(res, Err(Error::Memory(_))));
}

#[test]
fn resolve_reports_physical_address() {
    let mut tc = TestContext::new();
    tc.enable_sv32(ROOT_PPN);
    map_page(&mut tc, 1, 2, ROOT_PPN + 0x200);

    let paddr = tc
        .cpu
        .resolve(
            VirtAddr::new((1 << 22) | (2 << 12) | 0x10),
            4,
            AccessType::Read,
            &mut tc.mem,
        )
        .unwrap();
    assert_eq!(paddr, PhysAddr::new(((ROOT_PPN + 0x200) << 12) | 0x10));
}
