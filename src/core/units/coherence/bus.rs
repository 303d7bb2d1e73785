//! Bus message and cache-action vocabulary shared by every protocol, plus
//! the two dependency-injected collaborator contracts the controller drives
//! against.

use super::state::CoherenceState;

/// A message type a protocol engine can place on the shared bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusReqType {
    /// Request a clean copy of a line (a remote read).
    BusRd,
    /// Request exclusive ownership of a line (a remote write).
    BusWr,
    /// Supply data in response to a snoop.
    Data,
    /// Assert that the supplying processor also retains a copy.
    Shared,
}

/// An action the cache controller must take in response to a snoop,
/// decided by a protocol engine's snoop-side transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAction {
    /// No local state change required.
    NoAction,
    /// The local line must accept incoming data.
    DataRecv,
    /// The local line must be invalidated.
    Invalidate,
}

/// A bus message emitted by a protocol engine, destined for every other
/// processor's snoop logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusRequest {
    /// The message type.
    pub req_type: BusReqType,
    /// The line address the message concerns.
    pub addr: u64,
    /// The processor that originated the message.
    pub proc_num: u32,
}

/// Dependency-injected broadcast fabric: delivers a processor's bus
/// requests to every other processor's snoop logic. The top-level
/// simulation loop supplies the implementation; this crate only depends on
/// the contract.
pub trait Interconnect {
    /// Broadcasts `reqs`, originated by `proc_num`, to all other
    /// processors.
    fn broadcast(&mut self, proc_num: u32, reqs: &[BusRequest]);
}

/// Dependency-injected cache-side collaborator: applies a [`CacheAction`]
/// decided by a snoop-side transition to the addressed line.
pub trait CoherenceComponent {
    /// Applies `action` to `addr` on behalf of `proc_num`.
    fn apply_cache_action(&mut self, proc_num: u32, addr: u64, action: CacheAction);
}

/// The result of a cache-side transition: the next state, whether the
/// requested permission is now available, and any bus requests to issue.
pub type CacheTransition = (CoherenceState, bool, Vec<BusRequest>);

/// The result of a snoop-side transition: the next state, the cache action
/// to apply locally, and any bus requests to issue in response.
pub type SnoopTransition = (CoherenceState, CacheAction, Vec<BusRequest>);
