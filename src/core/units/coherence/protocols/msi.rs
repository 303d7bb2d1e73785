//! MSI: adds a clean shared state. A write from Sharing must invalidate
//! other copies before it is granted, which this engine models as a
//! pending `SharingModified` state resolved by the eventual `Data`
//! acknowledgement, mirroring how a fetch miss resolves through
//! `InvalidSharing`/`InvalidModified`.

use crate::core::units::coherence::bus::{
    BusReqType, BusRequest, CacheAction, CacheTransition, SnoopTransition,
};
use crate::core::units::coherence::protocol::ProtocolEngine;
use crate::core::units::coherence::state::CoherenceState;

use BusReqType::{BusRd, BusWr, Data, Shared};
use CoherenceState::{Invalid, InvalidModified, InvalidSharing, Modified, Sharing, SharingModified};

/// The MSI protocol engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Msi;

impl ProtocolEngine for Msi {
    fn cache_event(
        &self,
        is_read: bool,
        current: CoherenceState,
        addr: u64,
        proc_num: u32,
    ) -> CacheTransition {
        match current {
            Modified => (Modified, true, vec![]),
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
                    vec![BusRequest {
                        req_type: Data,
                        addr,
                        proc_num,
                    }],
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
            Sharing => match req_type {
                BusWr => (Invalid, CacheAction::Invalidate, vec![]),
                _ => (Sharing, CacheAction::NoAction, vec![]),
            },
            InvalidSharing => match req_type {
                Data => (Sharing, CacheAction::DataRecv, vec![]),
                _ => (InvalidSharing, CacheAction::NoAction, vec![]),
            },
            InvalidModified => match req_type {
                Data => (Modified, CacheAction::DataRecv, vec![]),
                _ => (InvalidModified, CacheAction::NoAction, vec![]),
            },
            SharingModified => match req_type {
                Data => (Modified, CacheAction::DataRecv, vec![]),
                _ => (SharingModified, CacheAction::NoAction, vec![]),
            },
            _ => (Invalid, CacheAction::NoAction, vec![]),
        }
    }
}
