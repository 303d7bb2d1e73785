//! MESI: adds `ExclusiveClean`, a state reachable only when a fetch
//! observes no other sharer. A fill resolves to `ExclusiveClean` on a bare
//! `Data` response and to `Sharing` if a `Shared` message arrived instead,
//! so a remote `cache_event` write from `ExclusiveClean` can silently
//! upgrade to `Modified` without any further bus traffic.

use crate::core::units::coherence::bus::{
    BusReqType, BusRequest, CacheAction, CacheTransition, SnoopTransition,
};
use crate::core::units::coherence::protocol::ProtocolEngine;
use crate::core::units::coherence::state::CoherenceState;

use BusReqType::{BusRd, BusWr, Data, Shared};
use CoherenceState::{
    ExclusiveClean, Invalid, InvalidModified, InvalidSharing, Modified, Sharing, SharingModified,
};

/// The MESI protocol engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mesi;

impl ProtocolEngine for Mesi {
    fn cache_event(
        &self,
        is_read: bool,
        current: CoherenceState,
        addr: u64,
        proc_num: u32,
    ) -> CacheTransition {
        match current {
            Modified => (Modified, true, vec![]),
            ExclusiveClean if is_read => (ExclusiveClean, true, vec![]),
            ExclusiveClean => (Modified, true, vec![]),
            Sharing if is_read => (Sharing, true, vec![]),
            Sharing => (
                SharingModified,
                false,
                vec![BusRequest {
                    req_type: BusWr,
                    addr,
                    proc_num,
                }],
            ),
            InvalidSharing | InvalidModified | SharingModified => {
                tracing::warn!(
                    addr,
                    proc_num,
                    ?current,
                    "processor request arrived while a fill is pending; absorbing"
                );
                (current, false, vec![])
            }
            _ if is_read => (
                InvalidSharing,
                false,
                vec![BusRequest {
                    req_type: BusRd,
                    addr,
                    proc_num,
                }],
            ),
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
            Modified => match req_type {
                BusRd => (
                    Sharing,
                    CacheAction::NoAction,
                    vec![
                        BusRequest {
                            req_type: Shared,
                            addr,
                            proc_num,
                        },
                        BusRequest {
                            req_type: Data,
                            addr,
                            proc_num,
                        },
                    ],
                ),
                BusWr => (
                    Invalid,
                    CacheAction::Invalidate,
                    vec![BusRequest {
                        req_type: Data,
                        addr,
                        proc_num,
                    }],
                ),
                Data | Shared => (Modified, CacheAction::NoAction, vec![]),
            },
            ExclusiveClean => match req_type {
                BusRd => (
                    Sharing,
                    CacheAction::NoAction,
                    vec![BusRequest {
                        req_type: Shared,
                        addr,
                        proc_num,
                    }],
                ),
                BusWr => (Invalid, CacheAction::Invalidate, vec![]),
                _ => (ExclusiveClean, CacheAction::NoAction, vec![]),
            },
            Sharing => match req_type {
                BusRd => (
                    Sharing,
                    CacheAction::NoAction,
                    vec![BusRequest {
                        req_type: Shared,
                        addr,
                        proc_num,
                    }],
                ),
                BusWr => (Invalid, CacheAction::Invalidate, vec![]),
                _ => (Sharing, CacheAction::NoAction, vec![]),
            },
            // A bare Data response with no preceding Shared means no other
            // processor claimed the line: it is ours alone.
            InvalidSharing => match req_type {
                Shared => (Sharing, CacheAction::DataRecv, vec![]),
                Data => (ExclusiveClean, CacheAction::DataRecv, vec![]),
                _ => (InvalidSharing, CacheAction::NoAction, vec![]),
            },
            InvalidModified => match req_type {
                Data | Shared => (Modified, CacheAction::DataRecv, vec![]),
                _ => (InvalidModified, CacheAction::NoAction, vec![]),
            },
            SharingModified => match req_type {
                Data | Shared => (Modified, CacheAction::DataRecv, vec![]),
                BusRd => (
                    SharingModified,
                    CacheAction::NoAction,
                    vec![BusRequest {
                        req_type: Shared,
                        addr,
                        proc_num,
                    }],
                ),
                _ => (SharingModified, CacheAction::NoAction, vec![]),
            },
            _ => (Invalid, CacheAction::NoAction, vec![]),
        }
    }
}
