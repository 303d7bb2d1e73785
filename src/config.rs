//! Configuration for the memory hierarchy simulator.
//!
//! This module defines the configuration structures and enums used to
//! parameterize both halves of the core. It provides:
//! 1. **Defaults:** Baseline parameters mirroring the trace-driven simulator's
//!    command-line flags (`E`, `s`, `b`, `i`, `R`, scheme selector).
//! 2. **Structures:** A cache configuration and a coherence configuration,
//!    each independently deserializable.
//! 3. **Enums:** Replacement discipline and coherence scheme selectors.
//!
//! Configuration is supplied as JSON (e.g. from a trace-driver harness) or
//! via `Config::default()` for programmatic use.

use serde::Deserialize;

use crate::common::SimError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default associativity (direct-mapped).
    pub const ASSOCIATIVITY: u32 = 1;

    /// Default number of set-index bits (`S = 2^s` sets).
    pub const SET_BITS: u32 = 0;

    /// Default number of block-offset bits (`B = 2^b` bytes per line).
    pub const BLOCK_BITS: u32 = 0;

    /// Default victim-cache entry count; 0 disables the victim cache.
    pub const VICTIM_ENTRIES: u32 = 0;

    /// Default processor count for a coherence simulation.
    pub const PROCESSOR_COUNT: u32 = 1;

    /// Cold-miss / clean-conflict-miss latency in ticks.
    pub const COLD_MISS_LATENCY: u32 = 100;

    /// Dirty-conflict-miss (writeback) latency in ticks.
    pub const WRITEBACK_LATENCY: u32 = 150;
}

/// Cache replacement discipline.
///
/// Exactly one discipline is active per cache instance: LRU when `R` is
/// absent or negative in the source flags, RRIP otherwise with the given
/// RRPV bit width `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementDiscipline {
    /// Least-recently-used aging: a per-line age incremented on every
    /// request and reset to 0 on the accessed/installed line.
    Lru,
    /// Re-Reference Interval Prediction with the given RRPV bit width `k`.
    /// The RRPV domain is `[0, 2^k - 1]`.
    Rrip {
        /// Width in bits of the re-reference prediction value.
        k: u32,
    },
}

impl ReplacementDiscipline {
    /// Selects LRU when `r` is absent or negative, RRIP otherwise.
    ///
    /// Mirrors the source flag `R`: `-R` unset/negative selects LRU mode.
    pub fn from_flag(r: Option<i32>) -> Result<Self, SimError> {
        match r {
            None => Ok(Self::Lru),
            Some(r) if r < 0 => Ok(Self::Lru),
            Some(r) => {
                let k = r as u32;
                if k > SimError::MAX_RRPV_WIDTH {
                    return Err(SimError::RrpvWidthOutOfRange(k));
                }
                Ok(Self::Rrip { k })
            }
        }
    }
}

/// Cache configuration: associativity, set/block geometry, and the optional
/// victim cache and replacement discipline.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Associativity `E` (ways per set); must be ≥ 1.
    #[serde(default = "CacheConfig::default_associativity")]
    pub associativity: u32,

    /// Set-index bit width `s`; `S = 2^s` sets. `s = 0` forces a single set.
    #[serde(default = "CacheConfig::default_set_bits")]
    pub set_bits: u32,

    /// Block-offset bit width `b`; `B = 2^b` bytes per line.
    #[serde(default = "CacheConfig::default_block_bits")]
    pub block_bits: u32,

    /// Victim-cache entry count `i`; 0 disables the victim cache.
    #[serde(default = "CacheConfig::default_victim_entries")]
    pub victim_entries: u32,

    /// RRPV bit width `R`; absent or negative selects LRU mode.
    #[serde(default)]
    pub rrpv_width: Option<i32>,
}

impl CacheConfig {
    fn default_associativity() -> u32 {
        defaults::ASSOCIATIVITY
    }
    fn default_set_bits() -> u32 {
        defaults::SET_BITS
    }
    fn default_block_bits() -> u32 {
        defaults::BLOCK_BITS
    }
    fn default_victim_entries() -> u32 {
        defaults::VICTIM_ENTRIES
    }

    /// Resolves the replacement discipline from `rrpv_width`.
    pub fn discipline(&self) -> Result<ReplacementDiscipline, SimError> {
        ReplacementDiscipline::from_flag(self.rrpv_width)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            associativity: defaults::ASSOCIATIVITY,
            set_bits: defaults::SET_BITS,
            block_bits: defaults::BLOCK_BITS,
            victim_entries: defaults::VICTIM_ENTRIES,
            rrpv_width: None,
        }
    }
}

/// Snoop-based coherence protocol families, identified by the integer codes
/// the trace driver passes as the scheme selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CoherenceScheme {
    /// Collapses all resident states to MODIFIED.
    Mi,
    /// Adds a shared (SHARING) state.
    Msi,
    /// Adds EXCLUSIVE_CLEAN, arbitrated via SHARED vs. DATA on fill.
    Mesi,
    /// Adds OWNED as a dirty-shared supplier state.
    Moesi,
    /// Reuses OWNED as the single-forwarder (F) role.
    Mesif,
}

impl CoherenceScheme {
    /// Decodes the scheme selector codes used by the trace driver:
    /// `0=MI, 1=MSI, 2=MESI, 3=MOESI, 4=MESIF`.
    pub fn from_code(code: i64) -> Result<Self, SimError> {
        match code {
            0 => Ok(Self::Mi),
            1 => Ok(Self::Msi),
            2 => Ok(Self::Mesi),
            3 => Ok(Self::Moesi),
            4 => Ok(Self::Mesif),
            other => {
                tracing::warn!(code = other, "unsupported coherence scheme code");
                Err(SimError::UnsupportedScheme(other))
            }
        }
    }
}

/// Coherence module configuration: selected scheme and processor count.
#[derive(Debug, Clone, Deserialize)]
pub struct CoherenceConfig {
    /// Active coherence protocol.
    pub scheme: CoherenceScheme,

    /// Number of processors participating in the simulation; must fall in
    /// 1..=256.
    #[serde(default = "CoherenceConfig::default_processor_count")]
    pub processor_count: u32,
}

impl CoherenceConfig {
    fn default_processor_count() -> u32 {
        defaults::PROCESSOR_COUNT
    }

    /// Validates `processor_count` against the 1..=256 bound the design
    /// mandates.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.processor_count < 1 || self.processor_count > 256 {
            return Err(SimError::InvalidProcessorCount(
                i64::from(self.processor_count),
            ));
        }
        Ok(())
    }
}

impl Default for CoherenceConfig {
    fn default() -> Self {
        Self {
            scheme: CoherenceScheme::Mesi,
            processor_count: defaults::PROCESSOR_COUNT,
        }
    }
}

/// Root configuration for the memory hierarchy simulator.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.cache.associativity, 1);
/// assert_eq!(config.coherence.processor_count, 1);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Cache geometry and replacement discipline.
    pub cache: CacheConfig,
    /// Coherence scheme and processor count.
    pub coherence: CoherenceConfig,
}

pub(crate) use defaults::{COLD_MISS_LATENCY, WRITEBACK_LATENCY};
