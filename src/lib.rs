//! Trace-driven simulator of a multiprocessor memory hierarchy.
//!
//! This crate models two tightly coupled subsystems:
//! 1. **Cache:** a parameterized set-associative cache with an optional
//!    fully-associative victim cache, supporting LRU and RRIP replacement,
//!    and a single-outstanding-request latency model driven by simulated
//!    ticks.
//! 2. **Coherence:** a family of snoop-based coherence protocols (MI, MSI,
//!    MESI, MOESI, MESIF) reacting to processor-initiated permission
//!    requests and bus-observed snoop transactions.
//!
//! The trace file parser, CLI driver, top-level simulation loop, processor
//! stub, and interconnect implementation are external collaborators; this
//! crate defines their contracts (see [`core::coherence::bus`]) but does not
//! implement them.

/// Common types shared across modules (errors).
pub mod common;
/// Simulator configuration (cache geometry, coherence scheme, defaults).
pub mod config;
/// Core simulation components: the cache and coherence subsystems.
pub mod core;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
