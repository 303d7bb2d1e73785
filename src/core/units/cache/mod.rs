//! Set-associative cache with victim cache and single-outstanding-request
//! latency model.
//!
//! A request that hits completes in 1 tick. A cold miss or a clean
//! conflict miss costs [`COLD_MISS_LATENCY`](crate::config::COLD_MISS_LATENCY)
//! ticks; a dirty conflict miss (a writeback) costs
//! [`WRITEBACK_LATENCY`](crate::config::WRITEBACK_LATENCY) ticks. A miss the
//! victim cache can satisfy instead completes in 1 tick, unless satisfying
//! it forced the victim cache itself to evict a dirty entry, in which case
//! the writeback penalty still applies.
//!
//! Only one request may be outstanding at a time: a new request arriving
//! while a previous one's `count_down` has not reached zero fires the
//! pending callback immediately, before the new request is classified.

pub mod policies;
mod victim;

use self::policies::{AccessClass, LruPolicy, ReplacementPolicy, RripPolicy};
use self::victim::VictimCache;
use crate::common::SimError;
use crate::config::{CacheConfig, ReplacementDiscipline, COLD_MISS_LATENCY, WRITEBACK_LATENCY};
use crate::core::SimComponent;

/// A single line of the main cache array.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheLine {
    /// Tag bits above the set index.
    pub tag: u64,
    /// Whether this slot holds live data.
    pub valid: bool,
    /// Whether the line has been written since it was installed.
    pub dirty: bool,
    /// Replacement metric: an LRU age or an RRIP re-reference prediction
    /// value, depending on the active discipline.
    pub evict: i64,
}

/// The kind of memory operation a request represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemOp {
    /// A load.
    Read,
    /// A store.
    Write,
}

/// A single memory request presented to the cache controller.
#[derive(Debug, Clone, Copy)]
pub struct MemoryRequest {
    /// The full byte address.
    pub addr: u64,
    /// Read or write.
    pub op: MemOp,
}

/// Outcome of a completed request, reported once its `count_down` reaches
/// zero (immediately, for a hit; after the miss penalty, otherwise).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The line was resident.
    Hit,
    /// The line was not resident and no victim existed.
    ColdMiss,
    /// The line was not resident and a valid victim line was evicted.
    ConflictMiss,
}

/// A request's address paired with its final outcome, reported by
/// [`CacheController::poll`] or returned early by
/// [`CacheController::memory_request`] under preemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// The address the completed request targeted.
    pub addr: u64,
    /// How the request was classified.
    pub outcome: AccessOutcome,
}

struct PendingRequest {
    addr: u64,
    outcome: AccessOutcome,
}

/// Set-associative cache controller: address decomposition, the shared
/// hit/cold-miss/conflict-miss search, replacement aging, and the
/// single-outstanding-request tick model.
#[derive(Debug)]
pub struct CacheController {
    sets: Vec<Vec<CacheLine>>,
    set_bits: u32,
    block_bits: u32,
    policy: Box<dyn ReplacementPolicy + Send + Sync>,
    victim: Option<VictimCache>,
    count_down: u32,
    pending: Option<PendingRequest>,
}

impl CacheController {
    /// Builds a controller from a validated cache configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `associativity` is 0 or the RRPV width exceeds
    /// the supported range.
    pub fn new(config: &CacheConfig) -> Result<Self, SimError> {
        if config.associativity == 0 {
            return Err(SimError::MissingCacheParameter("associativity"));
        }
        let ways = config.associativity as usize;
        let num_sets = 1usize << config.set_bits;

        let discipline = config.discipline()?;
        let policy: Box<dyn ReplacementPolicy + Send + Sync> = match discipline {
            ReplacementDiscipline::Lru => Box::new(LruPolicy),
            ReplacementDiscipline::Rrip { k } => Box::new(RripPolicy::new(k)),
        };

        let victim = if config.victim_entries > 0 {
            Some(VictimCache::new(config.victim_entries as usize))
        } else {
            None
        };

        Ok(Self {
            sets: vec![vec![CacheLine::default(); ways]; num_sets],
            set_bits: config.set_bits,
            block_bits: config.block_bits,
            policy,
            victim,
            count_down: 0,
            pending: None,
        })
    }

    /// Splits a byte address into `(cache_tag, set_index)` using the
    /// configured block and set bit widths.
    fn decompose(&self, addr: u64) -> (u64, usize) {
        let addr = addr >> self.block_bits;
        let cache_tag = addr >> self.set_bits;
        let set_index = if self.set_bits == 0 {
            0
        } else {
            (addr << (64 - self.set_bits)) >> (64 - self.set_bits)
        };
        (cache_tag, set_index as usize)
    }

    /// Reconstitutes the full, untruncated block address from a per-set
    /// `cache_tag` and its `set_index`. The main array only stores the
    /// truncated tag; the victim cache, being fully associative across all
    /// sets, needs the full address to avoid mismatching lines from
    /// different sets that happen to share a truncated tag.
    fn block_addr(&self, cache_tag: u64, set_index: usize) -> u64 {
        (cache_tag << self.set_bits) | set_index as u64
    }

    /// Single pass over a set: finds a tag match, else the first empty
    /// slot, else the slot with the largest `evict` value (ties broken by
    /// lowest index). Returns `(match_index, empty_index, evict_index,
    /// evict_val)`.
    fn search(lines: &[CacheLine], tag: u64) -> (Option<usize>, Option<usize>, usize, i64) {
        let mut match_index = None;
        let mut empty_index = None;
        let mut evict_index = 0;
        let mut evict_val = i64::MIN;

        for (i, line) in lines.iter().enumerate() {
            if line.valid && line.tag == tag {
                match_index = Some(i);
                break;
            }
            if !line.valid && empty_index.is_none() {
                empty_index = Some(i);
            }
            if line.evict > evict_val {
                evict_val = line.evict;
                evict_index = i;
            }
        }

        (match_index, empty_index, evict_index, evict_val)
    }

    /// Presents a memory request to the controller.
    ///
    /// If a previous request is still outstanding (`count_down != 0`), its
    /// completion fires immediately and is returned here, before this
    /// request is classified, mirroring the source's preemptive
    /// single-outstanding-request behavior. The newly classified request's
    /// own completion is reported later, through [`poll`](Self::poll), once
    /// its `count_down` reaches zero.
    pub fn memory_request(&mut self, req: MemoryRequest) -> Option<Completion> {
        let preempted = if self.count_down != 0 {
            self.count_down = 0;
            self.pending.take().map(|p| Completion {
                addr: p.addr,
                outcome: p.outcome,
            })
        } else {
            None
        };

        let (tag, set_index) = self.decompose(req.addr);
        let lines = &mut self.sets[set_index];
        let (match_index, empty_index, evict_index, evict_val) = Self::search(lines, tag);

        let outcome = if let Some(i) = match_index {
            self.policy.age(lines, AccessClass::Hit, evict_val);
            lines[i].evict = 0;
            if req.op == MemOp::Write {
                lines[i].dirty = true;
            }
            AccessOutcome::Hit
        } else if let Some(i) = empty_index {
            let full_tag = self.block_addr(tag, set_index);
            let vcache_hit = self
                .victim
                .as_mut()
                .map(|v| v.take(full_tag))
                .unwrap_or(None);

            self.policy.age(lines, AccessClass::ColdMiss, evict_val);

            lines[i] = match vcache_hit {
                Some(victim_line) => CacheLine {
                    tag,
                    valid: true,
                    dirty: victim_line.dirty || req.op == MemOp::Write,
                    evict: 0,
                },
                None => CacheLine {
                    tag,
                    valid: true,
                    dirty: req.op == MemOp::Write,
                    evict: self.policy.fill_value(),
                },
            };

            self.count_down = if vcache_hit.is_some() {
                1
            } else {
                COLD_MISS_LATENCY
            };
            AccessOutcome::ColdMiss
        } else {
            let evicted = lines[evict_index];
            let evicted_full_tag = self.block_addr(evicted.tag, set_index);

            // Look up the incoming tag before inserting the outgoing line:
            // a single-entry victim cache would otherwise evict the very
            // entry this request is trying to rescue.
            let full_tag = self.block_addr(tag, set_index);
            let vcache_hit = self
                .victim
                .as_mut()
                .map(|v| v.take(full_tag))
                .unwrap_or(None);

            let mut writeback_overflow = false;
            if let Some(victim) = self.victim.as_mut() {
                writeback_overflow = victim.insert(evicted_full_tag, evicted.dirty);
            }

            self.policy
                .age(lines, AccessClass::ConflictMiss, evict_val);

            lines[evict_index] = match vcache_hit {
                Some(victim_line) => CacheLine {
                    tag,
                    valid: true,
                    dirty: victim_line.dirty || req.op == MemOp::Write,
                    evict: 0,
                },
                None => CacheLine {
                    tag,
                    valid: true,
                    dirty: req.op == MemOp::Write,
                    evict: self.policy.fill_value(),
                },
            };

            self.count_down = if vcache_hit.is_some() {
                if writeback_overflow {
                    WRITEBACK_LATENCY
                } else {
                    1
                }
            } else if evicted.dirty {
                WRITEBACK_LATENCY
            } else {
                COLD_MISS_LATENCY
            };
            AccessOutcome::ConflictMiss
        };

        if self.count_down == 0 {
            self.count_down = 1;
        }

        self.pending = Some(PendingRequest {
            addr: req.addr,
            outcome,
        });

        preempted
    }

    /// Returns the outstanding request's completion once `count_down` has
    /// reached zero, consuming it so it is reported only once.
    pub fn poll(&mut self) -> Option<Completion> {
        if self.count_down != 0 {
            return None;
        }
        self.pending.take().map(|p| Completion {
            addr: p.addr,
            outcome: p.outcome,
        })
    }
}

impl SimComponent for CacheController {
    /// Decrements the outstanding request's countdown. Use
    /// [`CacheController::poll`] after ticking to observe completion.
    fn tick(&mut self) {
        if self.count_down > 0 {
            self.count_down -= 1;
        }
    }
}
