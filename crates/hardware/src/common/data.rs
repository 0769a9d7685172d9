//! Memory Access Types.
//!
//! This module defines the classification of memory accesses handed to the translator.
//! The Sv32 walk in this core does not grant or deny by access kind, but the kind is
//! carried through so callers and logs can tell fetches from data accesses.

use std::fmt;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Instruction fetch access.
    Fetch,

    /// Data read access (loads).
    Read,

    /// Data write access (stores).
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fetch => "ifetch",
            Self::Read => "read",
            Self::Write => "write",
        };
        f.write_str(s)
    }
}
