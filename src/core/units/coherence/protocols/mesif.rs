//! MESIF: like MESI, but the role MOESI gives `Owned` is repurposed as the
//! single *forward* designee — the one sharer responsible for supplying
//! data to later readers of a line that is clean-shared, sparing memory
//! the round trip.

use crate::core::units::coherence::bus::{
    BusReqType, BusRequest, CacheAction, CacheTransition, SnoopTransition,
};
use crate::core::units::coherence::protocol::ProtocolEngine;
use crate::core::units::coherence::state::CoherenceState;

use BusReqType::{BusRd, BusWr, Data, Shared};
use CoherenceState::{
    ExclusiveClean, Invalid, InvalidModified, InvalidSharing, Modified, Owned, OwnedModified,
    Sharing, SharingModified,
};

/// The MESIF protocol engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mesif;

impl ProtocolEngine for Mesif {
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
            Owned if is_read => (Owned, true, vec![]),
            Owned => (
                OwnedModified,
                false,
                vec![BusRequest {
                    req_type: BusWr,
                    addr,
                    proc_num,
                }],
            ),
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
            InvalidSharing | InvalidModified | SharingModified | OwnedModified => {
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
            // Giving up the line entirely: M (and F, below) always yields
            // to S on a remote read. The *filling* processor becomes the
            // new forwarder via its own InvalidSharing resolving on the
            // Shared this emits, not the old holder.
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
            // M and F never coexist, so it is always safe to answer from
            // here — but the forward role itself does not survive a remote
            // read: the filler inherits it instead.
            Owned => match req_type {
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
                BusWr => (Invalid, CacheAction::Invalidate, vec![]),
                _ => (Owned, CacheAction::NoAction, vec![]),
            },
            Sharing => match req_type {
                BusWr => (Invalid, CacheAction::Invalidate, vec![]),
                _ => (Sharing, CacheAction::NoAction, vec![]),
            },
            // This is where the forward designation actually changes hands:
            // the processor whose fill completes via Shared becomes the new
            // Owned/F, not the processor that asserted it.
            InvalidSharing => match req_type {
                Shared => (Owned, CacheAction::DataRecv, vec![]),
                Data => (ExclusiveClean, CacheAction::DataRecv, vec![]),
                _ => (InvalidSharing, CacheAction::NoAction, vec![]),
            },
            InvalidModified => match req_type {
                Data | Shared => (Modified, CacheAction::DataRecv, vec![]),
                _ => (InvalidModified, CacheAction::NoAction, vec![]),
            },
            // Must return here explicitly rather than falling into the
            // ExclusiveClean arm below it.
            SharingModified => match req_type {
                Data | Shared => (Modified, CacheAction::DataRecv, vec![]),
                _ => (SharingModified, CacheAction::NoAction, vec![]),
            },
            // Same as SharingModified, but also owes the data supply that
            // comes with holding the forward role.
            OwnedModified => match req_type {
                Data | Shared => (Modified, CacheAction::DataRecv, vec![]),
                BusRd => (
                    OwnedModified,
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
                    OwnedModified,
                    CacheAction::NoAction,
                    vec![BusRequest {
                        req_type: Data,
                        addr,
                        proc_num,
                    }],
                ),
            },
            _ => (Invalid, CacheAction::NoAction, vec![]),
        }
    }
}
