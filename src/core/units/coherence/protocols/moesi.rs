//! MOESI: adds `Owned`, a dirty-shared supplier state reached when a
//! `Modified` line is read by another processor. Unlike MESI's exclusive
//! downgrade, the original owner keeps supplying data to later readers
//! instead of handing the job to memory.
//!
//! A write from `Owned` must still invalidate any other sharers before it
//! is granted — it resolves through the pending `OwnedModified` state
//! rather than upgrading straight to `Modified`, since other clean
//! sharers may exist that a write from `Owned` alone would not have
//! invalidated.

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

/// The MOESI protocol engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Moesi;

impl ProtocolEngine for Moesi {
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
            // Moving to Owned carries the same Shared-assertion duty as E,
            // since O must never coexist with another processor's E or M.
            Modified => match req_type {
                BusRd => (
                    Owned,
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
            // Owned alone is always safe to supply data from: M and O never
            // coexist on the same address.
            Owned => match req_type {
                BusRd => (
                    Owned,
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
                _ => (Owned, CacheAction::NoAction, vec![]),
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
            // Same as InvalidModified, but must assert Shared on a BusRd
            // observed while the write is still pending.
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
            // Same as SharingModified, but also owes a data supply — one of
            // Owned's standing responsibilities.
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
