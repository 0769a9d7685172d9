//! Simulation utilities.
//!
//! Provides the differential co-simulator that checks the core against a reference
//! engine, and state snapshots for saving and restoring a run.

/// Differential co-simulation against a reference engine.
pub mod difftest;

/// Saving and restoring emulator state.
pub mod snapshot;
