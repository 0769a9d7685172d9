//! Trap cause codes.
//!
//! Values written to `mcause`. The most-significant bit of the word marks an interrupt,
//! so interrupt causes depend on the configured word width; exception causes do not.

use crate::config::Xlen;

/// Exception codes (interrupt bit clear).
pub mod exception {
    /// Illegal instruction (2).
    pub const ILLEGAL_INSTRUCTION: u64 = 2;
    /// Breakpoint (3).
    pub const BREAKPOINT: u64 = 3;
    /// Environment call from U-mode (8).
    pub const ENVIRONMENT_CALL_FROM_U_MODE: u64 = 8;
    /// Environment call from M-mode (11).
    pub const ENVIRONMENT_CALL_FROM_M_MODE: u64 = 11;
}

/// Interrupt codes (before the interrupt bit is applied).
pub mod interrupt {
    /// Machine software interrupt (3).
    pub const MACHINE_SOFTWARE: u64 = 3;
    /// Machine timer interrupt (7).
    pub const MACHINE_TIMER: u64 = 7;
    /// Machine external interrupt (11).
    pub const MACHINE_EXTERNAL: u64 = 11;
}

/// Builds the `mcause` value of interrupt `code`.
pub const fn interrupt_cause(code: u64, xlen: Xlen) -> u64 {
    xlen.msb() | code
}

/// `mcause` value of the machine timer interrupt (`0x8000_0007` on RV32).
pub const fn machine_timer_cause(xlen: Xlen) -> u64 {
    interrupt_cause(interrupt::MACHINE_TIMER, xlen)
}

/// Returns true if `mcause` encodes an interrupt.
pub const fn is_interrupt(mcause: u64, xlen: Xlen) -> bool {
    mcause & xlen.msb() != 0
}

/// Exception or interrupt code of `mcause`, with the interrupt bit stripped.
pub const fn exception_code(mcause: u64, xlen: Xlen) -> u64 {
    xlen.truncate(mcause) & !xlen.msb()
}
