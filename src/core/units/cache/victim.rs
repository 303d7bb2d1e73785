//! Fully-associative victim cache shared across all sets of the main array.
//!
//! Holds full, untruncated block addresses (not per-set tags) since a
//! single victim cache backs every set. Uses the same LRU-style aging as
//! the main cache's default discipline: every occupied slot ages by one on
//! every insertion attempt, and the slot with the largest age is evicted
//! when no empty slot remains, whether or not that particular insertion
//! was itself satisfying a victim-cache hit.

#[derive(Debug, Clone, Copy)]
pub struct VictimLine {
    pub dirty: bool,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    tag: u64,
    dirty: bool,
    evict: i64,
}

#[derive(Debug)]
pub struct VictimCache {
    slots: Vec<Option<Slot>>,
}

impl VictimCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Inserts an evicted main-cache line's `(tag, dirty)` pair, aging every
    /// occupied slot first. Returns `true` if this insertion itself evicted
    /// a dirty victim-cache entry.
    pub fn insert(&mut self, tag: u64, dirty: bool) -> bool {
        let mut empty_index = None;
        let mut evict_index = None;
        let mut evict_val = i64::MIN;

        for (i, slot) in self.slots.iter_mut().enumerate() {
            match slot {
                None if empty_index.is_none() => empty_index = Some(i),
                Some(s) => {
                    s.evict += 1;
                    if s.evict > evict_val {
                        evict_val = s.evict;
                        evict_index = Some(i);
                    }
                }
                _ => {}
            }
        }

        let (index, overflow_dirty) = match empty_index {
            Some(i) => (i, false),
            None => {
                let i = evict_index.expect("a nonempty victim cache always has an occupied slot to evict");
                (i, self.slots[i].map(|s| s.dirty).unwrap_or(false))
            }
        };

        self.slots[index] = Some(Slot { tag, dirty, evict: 0 });
        overflow_dirty
    }

    /// Looks up `tag`, removing and returning the matching entry if found.
    pub fn take(&mut self, tag: u64) -> Option<VictimLine> {
        let slot = self.slots.iter_mut().find(|s| matches!(s, Some(s) if s.tag == tag))?;
        let found = slot.take().expect("matched slot must be occupied");
        Some(VictimLine { dirty: found.dirty })
    }
}
