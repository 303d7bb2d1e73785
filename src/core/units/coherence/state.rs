//! Per-address, per-processor coherence state.

use std::collections::HashMap;

/// A processor-local coherence state for one cache line.
///
/// `Invalid` is never stored in a [`CoherenceStateMap`]; it is the sentinel
/// value returned for an address no entry exists for, and writing it back
/// removes the entry rather than storing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoherenceState {
    /// No valid copy resident; the default for any address not yet seen.
    Invalid,
    /// Dirty, exclusively owned.
    Modified,
    /// A fill is outstanding and the eventual state will be Modified.
    InvalidModified,
    /// Clean, possibly shared with other processors.
    Sharing,
    /// A fill is outstanding and the eventual state will be Sharing.
    InvalidSharing,
    /// Shared with at least one processor, but the local copy is dirty.
    SharingModified,
    /// Clean, the sole owner (MESI/MESIF).
    ExclusiveClean,
    /// Dirty-shared supplier state (MOESI).
    Owned,
    /// A fill is outstanding and the eventual state will be Owned.
    OwnedModified,
}

/// Per-processor map from address to coherence state.
///
/// Backed by a single table keyed on `(proc_num, addr)`; this mirrors a
/// collection of independent per-processor maps without the bookkeeping of
/// one `HashMap` per processor.
#[derive(Debug, Clone, Default)]
pub struct CoherenceStateMap {
    table: HashMap<(u32, u64), CoherenceState>,
}

impl CoherenceStateMap {
    /// Creates an empty state map; every address starts `Invalid`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the coherence state `proc_num` holds for `addr`, defaulting
    /// to [`CoherenceState::Invalid`] when no entry exists.
    pub fn get(&self, proc_num: u32, addr: u64) -> CoherenceState {
        self.table
            .get(&(proc_num, addr))
            .copied()
            .unwrap_or(CoherenceState::Invalid)
    }

    /// Records the coherence state `proc_num` holds for `addr`. Setting
    /// [`CoherenceState::Invalid`] removes the entry instead of storing it.
    pub fn set(&mut self, proc_num: u32, addr: u64, state: CoherenceState) {
        if state == CoherenceState::Invalid {
            self.table.remove(&(proc_num, addr));
        } else {
            self.table.insert((proc_num, addr), state);
        }
    }
}
