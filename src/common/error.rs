//! Error types for the memory hierarchy simulator.
//!
//! The core is purely in-memory and total on well-formed inputs. This module
//! distinguishes configuration-time failures (which abort initialization)
//! from runtime protocol anomalies (which are logged and absorbed rather
//! than surfaced as errors, since a pending bus transaction will eventually
//! resolve them).

use thiserror::Error;

/// Errors that can occur while constructing or driving the simulator core.
///
/// Configuration errors are fatal at initialization time. Runtime protocol
/// anomalies (an in-flight state receiving a processor request, an
/// unsupported scheme code reaching `bus_req`/`perm_req`) are not
/// represented here: per the design, they are logged via `tracing` and
/// absorbed without granting permission or mutating state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// `processorCount` must fall in 1..=256.
    #[error("processor count {0} outside valid range 1..=256")]
    InvalidProcessorCount(i64),

    /// A required cache parameter (`E`, `s`, or `b`) was absent or negative.
    #[error("missing or negative required cache parameter: {0}")]
    MissingCacheParameter(&'static str),

    /// The RRPV width `k` exceeds the bound the aging arithmetic can carry.
    #[error("RRPV width {0} exceeds the maximum supported width of {max}", max = Self::MAX_RRPV_WIDTH)]
    RrpvWidthOutOfRange(u32),

    /// A coherence scheme selector code did not match any known protocol.
    #[error("unsupported coherence scheme code: {0}")]
    UnsupportedScheme(i64),
}

impl SimError {
    /// `pow2` in the source is recursive with no bound on its input; RRPV
    /// widths beyond this would overflow the signed aging arithmetic before
    /// any real cache configuration would sensibly use them.
    pub const MAX_RRPV_WIDTH: u32 = 31;
}
