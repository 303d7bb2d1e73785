//! The coherence controller: dispatches processor requests and bus snoops
//! to the configured protocol engine, and applies the resulting state and
//! cache-action transitions.

use super::bus::{BusReqType, BusRequest, CoherenceComponent, Interconnect};
use super::protocol::ProtocolEngine;
use super::protocols::{Mesi, Mesif, Mi, Moesi, Msi};
use super::state::{CoherenceState, CoherenceStateMap};
use crate::config::CoherenceScheme;
use crate::core::SimComponent;

/// Drives one of the five protocol engines against a shared coherence
/// state map, and the dependency-injected interconnect and cache
/// collaborators.
#[derive(Debug)]
pub struct CoherenceController {
    scheme: CoherenceScheme,
    states: CoherenceStateMap,
}

impl CoherenceController {
    /// Builds a controller for the given scheme with an empty state map.
    pub fn new(scheme: CoherenceScheme) -> Self {
        Self {
            scheme,
            states: CoherenceStateMap::new(),
        }
    }

    /// A processor-initiated permission request: read or write `addr`.
    ///
    /// Dispatches to the active scheme's `cache_event`, broadcasts any
    /// resulting bus requests, and unconditionally writes the new state
    /// back to the map. Returns whether the requested permission is
    /// already available.
    pub fn perm_req(
        &mut self,
        is_read: bool,
        addr: u64,
        proc_num: u32,
        interconnect: &mut impl Interconnect,
    ) -> bool {
        let current = self.states.get(proc_num, addr);

        let (next_state, perm_avail, bus_reqs) = match self.scheme {
            CoherenceScheme::Mi => Mi.cache_event(is_read, current, addr, proc_num),
            CoherenceScheme::Msi => Msi.cache_event(is_read, current, addr, proc_num),
            CoherenceScheme::Mesi => Mesi.cache_event(is_read, current, addr, proc_num),
            CoherenceScheme::Moesi => Moesi.cache_event(is_read, current, addr, proc_num),
            CoherenceScheme::Mesif => Mesif.cache_event(is_read, current, addr, proc_num),
        };

        self.states.set(proc_num, addr, next_state);
        if !bus_reqs.is_empty() {
            interconnect.broadcast(proc_num, &bus_reqs);
        }
        perm_avail
    }

    /// A bus request snooped by the local processor `proc_num`.
    ///
    /// The interconnect invokes this once per processor observing the
    /// transaction; `proc_num` is always the *observer's* own id, never the
    /// transaction's originator — the snoop-side transition depends only on
    /// the observer's current state and the message type, and any bus
    /// request it emits in response (e.g. a supplier's `Data`) originates
    /// from the observer too.
    ///
    /// Dispatches to the active scheme's `snoop_event`, applies the
    /// resulting cache action through `component`, broadcasts any
    /// resulting bus requests, and writes the new state back.
    pub fn bus_req(
        &mut self,
        req_type: BusReqType,
        addr: u64,
        proc_num: u32,
        component: &mut impl CoherenceComponent,
        interconnect: &mut impl Interconnect,
    ) {
        let current = self.states.get(proc_num, addr);

        let (next_state, action, bus_reqs) = match self.scheme {
            CoherenceScheme::Mi => Mi.snoop_event(req_type, current, addr, proc_num),
            CoherenceScheme::Msi => Msi.snoop_event(req_type, current, addr, proc_num),
            CoherenceScheme::Mesi => Mesi.snoop_event(req_type, current, addr, proc_num),
            CoherenceScheme::Moesi => Moesi.snoop_event(req_type, current, addr, proc_num),
            CoherenceScheme::Mesif => Mesif.snoop_event(req_type, current, addr, proc_num),
        };

        component.apply_cache_action(proc_num, addr, action);
        self.states.set(proc_num, addr, next_state);
        if !bus_reqs.is_empty() {
            interconnect.broadcast(proc_num, &bus_reqs);
        }
    }

    /// Forces `addr` invalid for `proc_num`, returning a flush flag that is
    /// `true` iff the state held before invalidation carried dirty data.
    ///
    /// This rule is the same for every scheme: only the resident state's
    /// dirtiness matters, not which protocol produced it. A dirty line is
    /// flushed to the bus as `Data` before the entry is removed.
    pub fn invl_req(
        &mut self,
        addr: u64,
        proc_num: u32,
        interconnect: &mut impl Interconnect,
    ) -> bool {
        let current = self.states.get(proc_num, addr);
        self.states.set(proc_num, addr, CoherenceState::Invalid);
        let dirty = matches!(
            current,
            CoherenceState::Modified
                | CoherenceState::Owned
                | CoherenceState::OwnedModified
                | CoherenceState::SharingModified
        );
        if dirty {
            interconnect.broadcast(
                proc_num,
                &[BusRequest {
                    req_type: BusReqType::Data,
                    addr,
                    proc_num,
                }],
            );
        }
        dirty
    }
}

impl SimComponent for CoherenceController {
    /// Every transition here is a synchronous function call with no
    /// countdown of its own, so there is nothing to advance.
    fn tick(&mut self) {}
}
