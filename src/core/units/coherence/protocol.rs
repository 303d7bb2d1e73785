//! The protocol-engine contract every coherence scheme implements.

use super::bus::{BusReqType, CacheTransition, SnoopTransition};
use super::state::CoherenceState;

/// A snoop-based coherence protocol's pure transition functions.
///
/// Implementors hold no state; every transition is a function of the
/// current state and the event alone, matching the source's
/// `cacheX`/`snoopX` function-pair-per-scheme structure.
pub trait ProtocolEngine {
    /// The processor-initiated transition: decides the next state for a
    /// local read or write, whether the requested permission is already
    /// available, and any bus requests the processor must issue.
    fn cache_event(&self, is_read: bool, current: CoherenceState, addr: u64, proc_num: u32)
        -> CacheTransition;

    /// The snoop-side transition: reacts to a bus request observed from
    /// another processor, deciding the next local state, the cache action
    /// to apply, and any bus requests to issue in response.
    fn snoop_event(
        &self,
        req_type: BusReqType,
        current: CoherenceState,
        addr: u64,
        proc_num: u32,
    ) -> SnoopTransition;
}
