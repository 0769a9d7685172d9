//! Configuration system for the privileged core.
//!
//! This module defines the configuration structures used to construct a [`Cpu`](crate::Cpu)
//! and its surrounding collaborators. It provides:
//! 1. **Defaults:** Baseline constants (word width, register count, RAM layout).
//! 2. **Structures:** Hierarchical config for general, memory and difftest settings.
//! 3. **Enums:** Machine word width and base integer ISA (register file size).
//!
//! Configuration is supplied as JSON via [`Config::from_json`], or use `Config::default()`.
//! Register-file shape is fixed when a `Cpu` is built from a config, so instances with
//! different widths can live side by side in one process.

use serde::Deserialize;

use crate::common::error::Result;

/// Default configuration constants.
mod defaults {
    /// Physical address execution starts from (2 GiB).
    pub const RESET_VECTOR: u64 = crate::common::constants::RESET_VECTOR;

    /// Base address of guest RAM.
    pub const RAM_BASE: u64 = 0x8000_0000;

    /// Total size of guest RAM (128 MiB).
    pub const RAM_SIZE: usize = 128 * 1024 * 1024;
}

/// Machine word width.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Xlen {
    /// 32-bit words.
    #[default]
    #[serde(alias = "Rv32", alias = "rv32")]
    Rv32,
    /// 64-bit words.
    #[serde(alias = "Rv64", alias = "rv64")]
    Rv64,
}

impl Xlen {
    /// Word width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Rv32 => 32,
            Self::Rv64 => 64,
        }
    }

    /// Word width in bytes.
    pub const fn bytes(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Mask covering every bit of a word.
    pub const fn mask(self) -> u64 {
        match self {
            Self::Rv32 => 0xFFFF_FFFF,
            Self::Rv64 => u64::MAX,
        }
    }

    /// The most-significant bit of a word.
    pub const fn msb(self) -> u64 {
        1 << (self.bits() - 1)
    }

    /// Truncates `val` to the word width.
    #[inline(always)]
    pub const fn truncate(self, val: u64) -> u64 {
        val & self.mask()
    }
}

/// Base integer ISA, which fixes the number of general-purpose registers.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Hash)]
pub enum BaseIsa {
    /// Full integer ISA with 32 registers.
    #[default]
    I,
    /// Embedded integer ISA with 16 registers.
    E,
}

impl BaseIsa {
    /// Number of general-purpose registers.
    pub const fn gpr_count(self) -> usize {
        match self {
            Self::I => 32,
            Self::E => 16,
        }
    }
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use rvpriv_core::config::{BaseIsa, Config, Xlen};
///
/// let json = r#"{ "general": { "xlen": "RV32", "base_isa": "E" } }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.xlen, Xlen::Rv32);
/// assert_eq!(config.general.base_isa, BaseIsa::E);
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Register-file shape and tracing.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Guest RAM layout.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Differential testing.
    #[serde(default)]
    pub difftest: DifftestConfig,
}

impl Config {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::common::error::Error::Config) on malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// General configuration.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Machine word width.
    #[serde(default)]
    pub xlen: Xlen,
    /// Base integer ISA (register file size).
    #[serde(default)]
    pub base_isa: BaseIsa,
    /// Physical reset vector.
    #[serde(default = "GeneralConfig::default_reset_vector")]
    pub reset_vector: u64,
    /// Trace every trap entry.
    #[serde(default)]
    pub trace_traps: bool,
}

impl GeneralConfig {
    fn default_reset_vector() -> u64 {
        defaults::RESET_VECTOR
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            xlen: Xlen::default(),
            base_isa: BaseIsa::default(),
            reset_vector: defaults::RESET_VECTOR,
            trace_traps: false,
        }
    }
}

/// Guest RAM configuration.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct MemoryConfig {
    /// Physical base address of guest RAM.
    #[serde(default = "MemoryConfig::default_ram_base")]
    pub ram_base: u64,
    /// Size of guest RAM in bytes.
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: usize,
}

impl MemoryConfig {
    fn default_ram_base() -> u64 {
        defaults::RAM_BASE
    }

    fn default_ram_size() -> usize {
        defaults::RAM_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
        }
    }
}

/// Differential testing configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct DifftestConfig {
    /// Initialize the co-simulator at startup; see `DiffTest::start`.
    #[serde(default)]
    pub enabled: bool,
    /// Also compare the six CSRs when the reference engine can report them.
    #[serde(default)]
    pub compare_csrs: bool,
}
