//! MI: the minimal two-state scheme. No sharing is ever permitted, so every
//! access — read or write — demands exclusive ownership.

use crate::core::units::coherence::bus::{
    BusReqType, BusRequest, CacheAction, CacheTransition, SnoopTransition,
};
use crate::core::units::coherence::protocol::ProtocolEngine;
use crate::core::units::coherence::state::CoherenceState;

use BusReqType::{BusWr, Data};
use CoherenceState::{Invalid, InvalidModified, Modified};

/// The MI protocol engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mi;

impl ProtocolEngine for Mi {
    fn cache_event(
        &self,
        _is_read: bool,
        current: CoherenceState,
        addr: u64,
        proc_num: u32,
    ) -> CacheTransition {
        match current {
            Modified => (Modified, true, vec![]),
            InvalidModified => {
                tracing::warn!(
                    addr,
                    proc_num,
                    "processor request arrived while a fill is pending; absorbing"
                );
                (InvalidModified, false, vec![])
            }
            _ => (
                InvalidModified,
                false,
                vec![BusRequest {
                    req_type: BusWr,
                    addr,
                    proc_num,
                }],
            ),
        }
    }

    fn snoop_event(
        &self,
        req_type: BusReqType,
        current: CoherenceState,
        addr: u64,
        proc_num: u32,
    ) -> SnoopTransition {
        match current {
            // Every reqType triggers the same response here: M is always
            // exclusive against any bus traffic, so the line flushes and
            // invalidates regardless of what was asked.
            Modified => (
                Invalid,
                CacheAction::Invalidate,
                vec![BusRequest {
                    req_type: Data,
                    addr,
                    proc_num,
                }],
            ),
            InvalidModified => match req_type {
                Data => (Modified, CacheAction::DataRecv, vec![]),
                _ => (InvalidModified, CacheAction::NoAction, vec![]),
            },
            _ => (Invalid, CacheAction::NoAction, vec![]),
        }
    }
}
