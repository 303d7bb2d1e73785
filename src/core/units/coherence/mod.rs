//! Snoop-based coherence protocol family (MI, MSI, MESI, MOESI, MESIF) and
//! the controller that drives them.

pub mod bus;
pub mod controller;
pub mod protocol;
pub mod protocols;
pub mod state;

pub use bus::{BusReqType, BusRequest, CacheAction, CoherenceComponent, Interconnect};
pub use controller::CoherenceController;
pub use state::{CoherenceState, CoherenceStateMap};
