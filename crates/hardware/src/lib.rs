//! RISC-V privileged-state core.
//!
//! This crate implements the privileged machinery of a RISC-V emulator, independent of
//! instruction decode and execution:
//! 1. **Address Translation:** Sv32 two-level page walks gated by `satp`.
//! 2. **Traps:** Machine-mode trap entry and pending-interrupt sampling.
//! 3. **Registers:** GPR file, program counter and the six modeled CSRs.
//! 4. **Difftest:** Lockstep comparison against a reference engine, with CSR sync at attach.
//! 5. **Snapshots:** Saving and restoring registers, CSRs and guest RAM.
//!
//! ```
//! use rvpriv_core::{Config, Cpu};
//!
//! let config = Config::default();
//! let mut cpu = Cpu::new(&config);
//! cpu.csrs.mtvec = 0x8000_0100;
//! assert_eq!(cpu.raise(11, 0x8000_0004), 0x8000_0100);
//! assert_eq!(cpu.csrs.mepc, 0x8000_0004);
//! ```

/// Common types and constants (addresses, access kinds, errors, register file).
pub mod common;
/// Core configuration (word width, base ISA, memory map, difftest).
pub mod config;
/// Privileged core (arch definitions, per-hart context, MMU).
pub mod core;
/// Differential co-simulation and state snapshots.
pub mod sim;
/// Physical memory interface and guest RAM.
pub mod soc;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Per-hart privileged state: registers, CSRs and MMU.
pub use crate::core::Cpu;
/// Lockstep driver for a reference engine.
pub use crate::sim::difftest::DiffTest;
/// Flat guest RAM.
pub use crate::soc::Memory;
