//! Least-recently-used replacement.
//!
//! Every valid line in the set ages by one on every request, regardless of
//! how the request is classified; the accessed or freshly installed line is
//! then reset to 0 by the caller. The line with the largest `evict` value is
//! the least-recently-used victim.

use super::{AccessClass, CacheLine, ReplacementPolicy};

/// LRU discipline: unconditional per-request aging, fill value 0.
#[derive(Debug, Default, Clone, Copy)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    fn age(&self, lines: &mut [CacheLine], _class: AccessClass, _evict_val: i64) {
        for line in lines {
            line.evict += 1;
        }
    }

    fn fill_value(&self) -> i64 {
        0
    }
}
