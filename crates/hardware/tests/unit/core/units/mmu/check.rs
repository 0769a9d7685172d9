//! Translation gate and `Mmu::translate` tests.

use proptest::prelude::*;
use rstest::rstest;

use crate::common::harness::{R, ROOT_PPN, TestContext, V, W, make_pte};
use rvpriv_core::common::{AccessType, PhysAddr, VirtAddr};
use rvpriv_core::config::{BaseIsa, Xlen};
use rvpriv_core::core::arch::csr::Csrs;
use rvpriv_core::core::units::mmu::{Mmu, MmuCheck};

fn any_access() -> impl Strategy<Value = AccessType> {
    prop_oneof![
        Just(AccessType::Fetch),
        Just(AccessType::Read),
        Just(AccessType::Write),
    ]
}

proptest! {
    #[test]
    fn satp_msb_clear_is_direct_rv32(
        satp in 0u64..0x8000_0000,
        vaddr in any::<u32>(),
        len in 1usize..=8,
        access in any_access(),
    ) {
        let mmu = Mmu::new(Xlen::Rv32);
        let csrs = Csrs { satp, ..Csrs::default() };
        prop_assert_eq!(
            mmu.check(&csrs, VirtAddr::new(u64::from(vaddr)), len, access),
            MmuCheck::Direct
        );
    }

    #[test]
    fn satp_msb_set_is_translate_rv32(
        low in 0u64..0x8000_0000,
        vaddr in any::<u32>(),
        access in any_access(),
    ) {
        let mmu = Mmu::new(Xlen::Rv32);
        let csrs = Csrs { satp: (1 << 31) | low, ..Csrs::default() };
        prop_assert_eq!(
            mmu.check(&csrs, VirtAddr::new(u64::from(vaddr)), 4, access),
            MmuCheck::Translate
        );
    }
}

#[rstest]
#[case(Xlen::Rv32, 1 << 31, MmuCheck::Translate)]
#[case(Xlen::Rv32, 1 << 30, MmuCheck::Direct)]
#[case(Xlen::Rv64, 1 << 63, MmuCheck::Translate)]
#[case(Xlen::Rv64, 1 << 31, MmuCheck::Direct)]
fn msb_depends_on_word_width(#[case] xlen: Xlen, #[case] satp: u64, #[case] expected: MmuCheck) {
    let mmu = Mmu::new(xlen);
    let csrs = Csrs {
        satp,
        ..Csrs::default()
    };
    assert_eq!(
        mmu.check(&csrs, VirtAddr::new(0), 4, AccessType::Read),
        expected
    );
}

#[test]
fn translate_uses_satp_root() {
    let mut tc = TestContext::new();
    tc.enable_sv32(ROOT_PPN);
    let l0 = ROOT_PPN + 1;
    tc.write_pte(ROOT_PPN, 0x100, make_pte(l0, V));
    tc.write_pte(l0, 0x3, make_pte(0x80010, V | R | W));

    let vaddr = VirtAddr::new((0x100 << 22) | (0x3 << 12) | 0x44);
    let frame = tc
        .cpu
        .mmu
        .translate(&tc.cpu.csrs, vaddr, 4, AccessType::Write, &mut tc.mem)
        .unwrap();
    assert_eq!(frame, PhysAddr::new(0x8001_0000));
}

#[test]
fn translate_on_rv64_walks_sv32_tables() {
    let mut tc = TestContext::with_shape(Xlen::Rv64, BaseIsa::I);
    tc.enable_sv32(ROOT_PPN);
    tc.write_pte(ROOT_PPN, 0, make_pte(0x80400, V | R));

    let frame = tc
        .cpu
        .mmu
        .translate(
            &tc.cpu.csrs,
            VirtAddr::new(0x5000),
            8,
            AccessType::Read,
            &mut tc.mem,
        )
        .unwrap();
    assert_eq!(frame, PhysAddr::new(0x8040_5000));
}

#[test]
fn table_outside_ram_propagates_memory_error() {
    let mut tc = TestContext::new();
    // Root table at physical 0, below guest RAM.
    tc.enable_sv32(0);
    let res = tc.cpu.mmu.translate(
        &tc.cpu.csrs,
        VirtAddr::new(0x1000),
        4,
        AccessType::Read,
        &mut tc.mem,
    );
    assert!(matches!(res, Err(rvpriv_core::common::Error::Memory(_))));
}
