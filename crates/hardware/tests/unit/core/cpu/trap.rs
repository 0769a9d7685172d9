//! Trap Controller tests.
//!
//! Verifies:
//! - `raise` post-conditions on mepc, mcause and the MIE/MPIE stack
//! - `query_interrupt` gating on MIE, mtvec and the pending line
//! - Edge consumption: one delivery per raised line

use proptest::prelude::*;
use rstest::rstest;

use crate::common::harness::TestContext;
use rvpriv_core::config::{BaseIsa, Xlen};
use rvpriv_core::core::arch::csr::{self, MSTATUS_MIE, MSTATUS_MPIE};
use rvpriv_core::core::arch::trap::{exception, machine_timer_cause};

const MTVEC: u64 = 0x8000_0100;

// ══════════════════════════════════════════════════════════
// 1. raise
// ══════════════════════════════════════════════════════════

#[test]
fn raise_returns_mtvec_and_saves_state() {
    let mut tc = TestContext::new();
    tc.cpu.csrs.mtvec = MTVEC;
    tc.cpu.csrs.mstatus = MSTATUS_MIE;

    let target = tc
        .cpu
        .raise(exception::ENVIRONMENT_CALL_FROM_M_MODE, 0x8000_0040);

    assert_eq!(target, MTVEC);
    assert_eq!(tc.cpu.csrs.mepc, 0x8000_0040);
    assert_eq!(tc.cpu.csrs.mcause, 11);
    assert_eq!(tc.cpu.csrs.mstatus, MSTATUS_MPIE);
}

#[test]
fn raise_with_interrupts_disabled_clears_mpie() {
    let mut tc = TestContext::new();
    tc.cpu.csrs.mtvec = MTVEC;
    tc.cpu.csrs.mstatus = MSTATUS_MPIE;

    let _ = tc.cpu.raise(exception::ILLEGAL_INSTRUCTION, 0x8000_0000);
    assert_eq!(tc.cpu.csrs.mstatus, 0);
}

#[test]
fn raise_with_zero_mtvec_returns_zero() {
    let mut tc = TestContext::new();
    assert_eq!(tc.cpu.raise(exception::BREAKPOINT, 0x8000_0000), 0);
    assert_eq!(tc.cpu.csrs.mcause, exception::BREAKPOINT);
}

#[test]
fn trap_tracing_does_not_change_behavior() {
    let mut tc = TestContext::new();
    tc.cpu.trace_traps = true;
    tc.cpu.csrs.mtvec = MTVEC;
    assert_eq!(tc.cpu.raise(exception::BREAKPOINT, 0x8000_0008), MTVEC);
    assert_eq!(tc.cpu.csrs.mepc, 0x8000_0008);
}

proptest! {
    #[test]
    fn raise_postconditions(
        mstatus in any::<u32>(),
        mtvec in any::<u32>(),
        cause in any::<u32>(),
        epc in any::<u32>(),
    ) {
        let mut tc = TestContext::new();
        tc.cpu.csrs.mstatus = u64::from(mstatus);
        tc.cpu.csrs.mtvec = u64::from(mtvec);
        let mie_before = csr::mstatus_mie(tc.cpu.csrs.mstatus);

        let target = tc.cpu.raise(u64::from(cause), u64::from(epc));

        prop_assert_eq!(target, u64::from(mtvec));
        prop_assert_eq!(tc.cpu.csrs.mepc, u64::from(epc));
        prop_assert_eq!(tc.cpu.csrs.mcause, u64::from(cause));
        prop_assert_eq!(csr::mstatus_mpie(tc.cpu.csrs.mstatus), mie_before);
        prop_assert!(!csr::mstatus_mie(tc.cpu.csrs.mstatus));
        let others = !(MSTATUS_MIE | MSTATUS_MPIE);
        prop_assert_eq!(tc.cpu.csrs.mstatus & others, u64::from(mstatus) & others);
    }
}

// ══════════════════════════════════════════════════════════
// 2. query_interrupt
// ══════════════════════════════════════════════════════════

#[test]
fn query_delivers_timer_once() {
    let mut tc = TestContext::new();
    tc.cpu.csrs.mstatus = MSTATUS_MIE;
    tc.cpu.csrs.mtvec = MTVEC;
    tc.cpu.set_pending_interrupt();

    assert_eq!(tc.cpu.query_interrupt(), Some(0x8000_0007));
    assert!(!tc.cpu.regs.pending_interrupt);
    assert_eq!(tc.cpu.query_interrupt(), None);
}

#[rstest]
#[case::mie_clear(0, MTVEC)]
#[case::mtvec_zero(MSTATUS_MIE, 0)]
fn query_leaves_line_raised_when_gated(#[case] mstatus: u64, #[case] mtvec: u64) {
    let mut tc = TestContext::new();
    tc.cpu.csrs.mstatus = mstatus;
    tc.cpu.csrs.mtvec = mtvec;
    tc.cpu.set_pending_interrupt();
    let before = tc.cpu.csrs;

    assert_eq!(tc.cpu.query_interrupt(), None);
    assert!(tc.cpu.regs.pending_interrupt);
    assert_eq!(tc.cpu.csrs, before);
}

#[test]
fn query_without_pending_line_is_none() {
    let mut tc = TestContext::new();
    tc.cpu.csrs.mstatus = MSTATUS_MIE;
    tc.cpu.csrs.mtvec = MTVEC;
    assert_eq!(tc.cpu.query_interrupt(), None);
}

#[test]
fn query_does_not_touch_trap_csrs() {
    let mut tc = TestContext::new();
    tc.cpu.csrs.mstatus = MSTATUS_MIE;
    tc.cpu.csrs.mtvec = MTVEC;
    tc.cpu.csrs.mepc = 0x1234;
    tc.cpu.csrs.mcause = 5;
    tc.cpu.set_pending_interrupt();
    let before = tc.cpu.csrs;

    assert!(tc.cpu.query_interrupt().is_some());
    assert_eq!(tc.cpu.csrs, before);
}

#[test]
fn query_then_raise_enters_timer_handler() {
    let mut tc = TestContext::with_shape(Xlen::Rv64, BaseIsa::I);
    tc.cpu.csrs.mstatus = MSTATUS_MIE;
    tc.cpu.csrs.mtvec = MTVEC;
    tc.cpu.set_pending_interrupt();

    let cause = tc.cpu.query_interrupt().unwrap();
    assert_eq!(cause, machine_timer_cause(Xlen::Rv64));
    let pc = tc.cpu.pc();
    assert_eq!(tc.cpu.raise(cause, pc), MTVEC);
    assert_eq!(tc.cpu.csrs.mcause, 0x8000_0000_0000_0007);
    // Nested delivery is blocked until the handler re-enables MIE.
    tc.cpu.set_pending_interrupt();
    assert_eq!(tc.cpu.query_interrupt(), None);
}
