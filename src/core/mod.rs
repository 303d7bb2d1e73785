//! Core simulation components.
//!
//! This module contains the two independent subsystems that make up the
//! simulator core: the cache hierarchy and the coherence protocol engine.
//! They are coupled only through the interconnect collaborator (see
//! [`units::coherence::bus`]); neither module owns the other.

/// Execution units: the cache controller and the coherence controller.
pub mod units;

/// Shared small-capability trait for tick/finish/destroy lifecycles.
pub mod component;

pub use component::SimComponent;
