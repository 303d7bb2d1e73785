//! Cache controller unit tests: hit/cold-miss/conflict-miss classification,
//! writeback penalties, victim-cache rescue, and the single-outstanding-
//! request preemption rule.
//!
//! Test geometry: 2-way, 2 sets, 64-byte lines (`block_bits = 6`,
//! `set_bits = 1`). Address `0` and `128` both map to set 0 with tags `0`
//! and `1`; `256` also maps to set 0 with tag `2`.

use cachesim_core::common::SimError;
use cachesim_core::config::CacheConfig;
use cachesim_core::core::units::cache::{AccessOutcome, CacheController, MemOp, MemoryRequest};
use cachesim_core::core::SimComponent;

fn test_config() -> CacheConfig {
    CacheConfig {
        associativity: 2,
        set_bits: 1,
        block_bits: 6,
        victim_entries: 0,
        rrpv_width: None,
    }
}

fn read(addr: u64) -> MemoryRequest {
    MemoryRequest {
        addr,
        op: MemOp::Read,
    }
}

fn write(addr: u64) -> MemoryRequest {
    MemoryRequest {
        addr,
        op: MemOp::Write,
    }
}

/// Issues `req` (discarding any preempted completion) and ticks until the
/// controller reports it done, returning the tick count and outcome.
fn drive(cache: &mut CacheController, req: MemoryRequest) -> (u32, AccessOutcome) {
    cache.memory_request(req);
    let mut ticks = 0;
    loop {
        if let Some(completion) = cache.poll() {
            return (ticks, completion.outcome);
        }
        cache.tick();
        ticks += 1;
        assert!(ticks < 1000, "request never completed");
    }
}

// ──────────────────────────────────────────────────────────
// Hit / cold miss
// ──────────────────────────────────────────────────────────

#[test]
fn first_access_is_a_cold_miss_costing_100_ticks() {
    let mut cache = CacheController::new(&test_config()).unwrap();
    let (ticks, outcome) = drive(&mut cache, read(0));
    assert_eq!(outcome, AccessOutcome::ColdMiss);
    assert_eq!(ticks, 100);
}

#[test]
fn second_access_to_same_line_is_a_one_tick_hit() {
    let mut cache = CacheController::new(&test_config()).unwrap();
    drive(&mut cache, read(0));
    let (ticks, outcome) = drive(&mut cache, read(0));
    assert_eq!(outcome, AccessOutcome::Hit);
    assert_eq!(ticks, 1);
}

#[test]
fn same_line_different_offset_hits() {
    let mut cache = CacheController::new(&test_config()).unwrap();
    drive(&mut cache, read(0));
    let (_, outcome) = drive(&mut cache, read(32));
    assert_eq!(outcome, AccessOutcome::Hit);
}

// ──────────────────────────────────────────────────────────
// Conflict miss and LRU eviction
// ──────────────────────────────────────────────────────────

#[test]
fn third_address_in_a_full_set_evicts_the_lru_line() {
    let mut cache = CacheController::new(&test_config()).unwrap();
    drive(&mut cache, read(0)); // installs tag 0, way 0
    drive(&mut cache, read(128)); // installs tag 1, way 1

    let (_, outcome) = drive(&mut cache, read(256)); // evicts tag 0 (LRU)
    assert_eq!(outcome, AccessOutcome::ConflictMiss);

    // addr 0 no longer resident; addr 128 survives. The set is full now, so
    // re-requesting addr 0 is itself a conflict miss, not a cold one.
    let (_, outcome) = drive(&mut cache, read(128));
    assert_eq!(outcome, AccessOutcome::Hit);
    let (_, outcome) = drive(&mut cache, read(0));
    assert_eq!(outcome, AccessOutcome::ConflictMiss);
}

// ──────────────────────────────────────────────────────────
// Writeback penalties
// ──────────────────────────────────────────────────────────

#[test]
fn evicting_a_dirty_line_costs_150_ticks() {
    let mut cache = CacheController::new(&test_config()).unwrap();
    drive(&mut cache, write(0)); // dirty
    drive(&mut cache, read(128));
    let (ticks, outcome) = drive(&mut cache, read(256)); // evicts dirty tag 0
    assert_eq!(outcome, AccessOutcome::ConflictMiss);
    assert_eq!(ticks, 150);
}

#[test]
fn evicting_a_clean_line_costs_100_ticks() {
    let mut cache = CacheController::new(&test_config()).unwrap();
    drive(&mut cache, read(0));
    drive(&mut cache, read(128));
    let (ticks, _) = drive(&mut cache, read(256));
    assert_eq!(ticks, 100);
}

#[test]
fn a_hit_on_a_written_line_keeps_it_dirty() {
    let mut cache = CacheController::new(&test_config()).unwrap();
    drive(&mut cache, write(0));
    drive(&mut cache, read(0)); // hit, still dirty
    drive(&mut cache, read(128));
    let (ticks, _) = drive(&mut cache, read(256));
    assert_eq!(ticks, 150, "dirty bit must persist across a hit");
}

// ──────────────────────────────────────────────────────────
// Victim cache
// ──────────────────────────────────────────────────────────

#[test]
fn victim_cache_rescues_a_recently_evicted_clean_line_in_one_tick() {
    let config = CacheConfig {
        victim_entries: 1,
        ..test_config()
    };
    let mut cache = CacheController::new(&config).unwrap();

    drive(&mut cache, read(0)); // tag 0, way 0
    drive(&mut cache, read(128)); // tag 1, way 1
    drive(&mut cache, read(256)); // evicts tag 0 into the victim cache

    // Re-requesting addr 0 is still a conflict miss (no empty slot), but the
    // victim cache satisfies it in 1 tick instead of the full miss penalty.
    let (ticks, outcome) = drive(&mut cache, read(0));
    assert_eq!(outcome, AccessOutcome::ConflictMiss);
    assert_eq!(ticks, 1);
}

#[test]
fn victim_cache_carries_the_dirty_bit_into_the_rescued_line() {
    let config = CacheConfig {
        victim_entries: 1,
        ..test_config()
    };
    let mut cache = CacheController::new(&config).unwrap();

    drive(&mut cache, write(0)); // dirty, tag 0, way 0
    drive(&mut cache, read(128)); // tag 1, way 1
    drive(&mut cache, read(256)); // evicts dirty tag 0 into the victim cache

    // Rescue addr 0 back in, then evict it again without writing to it: the
    // writeback penalty should still apply, proving the dirty bit survived
    // the round trip through the victim cache.
    drive(&mut cache, read(0));
    drive(&mut cache, read(384)); // a third tag, forces another conflict
    let (ticks, _) = drive(&mut cache, read(512)); // evicts addr 0 again
    assert_eq!(ticks, 150);
}

// ──────────────────────────────────────────────────────────
// Preemption: a new request while one is outstanding fires the old one
// ──────────────────────────────────────────────────────────

#[test]
fn a_new_request_preempts_the_outstanding_one_immediately() {
    let mut cache = CacheController::new(&test_config()).unwrap();
    let preempted = cache.memory_request(read(0));
    assert!(preempted.is_none(), "nothing was outstanding yet");

    // addr 0's cold miss (100 ticks) is still outstanding; a new request
    // must fire its completion synchronously, before classifying itself.
    let preempted = cache.memory_request(read(128));
    let completion = preempted.expect("the first request must be preempted");
    assert_eq!(completion.addr, 0);
    assert_eq!(completion.outcome, AccessOutcome::ColdMiss);

    // The second request now owns the countdown; polling before it elapses
    // yields nothing.
    assert!(cache.poll().is_none());
}

// ──────────────────────────────────────────────────────────
// RRIP: distant install, ties broken by lowest index
// ──────────────────────────────────────────────────────────

#[test]
fn rrip_installs_at_max_rrpv_and_evicts_the_lowest_tied_index() {
    let config = CacheConfig {
        associativity: 4,
        set_bits: 0,
        block_bits: 6,
        victim_entries: 0,
        rrpv_width: Some(2),
    };
    let mut cache = CacheController::new(&config).unwrap();

    // Four cold misses into the lone set, distinct tags, all saturate at
    // RRPV = 3 (k = 2, domain {0..3}) on fill rather than 0 as LRU would.
    drive(&mut cache, read(0)); // tag 0
    drive(&mut cache, read(64)); // tag 1
    drive(&mut cache, read(128)); // tag 2
    drive(&mut cache, read(192)); // tag 3

    // A fifth, distinct tag forces a conflict miss. Every resident line is
    // already at the saturated RRPV, so aging adds 0 to all of them; the
    // tie is broken by lowest index, evicting tag 0.
    let (_, outcome) = drive(&mut cache, read(256)); // tag 4
    assert_eq!(outcome, AccessOutcome::ConflictMiss);

    let (_, outcome) = drive(&mut cache, read(0)); // tag 0, evicted
    assert_eq!(outcome, AccessOutcome::ConflictMiss, "tag 0 was the eviction victim");
    let (_, outcome) = drive(&mut cache, read(64)); // tag 1 still resident
    assert_eq!(outcome, AccessOutcome::Hit);
}

// ──────────────────────────────────────────────────────────
// Configuration errors
// ──────────────────────────────────────────────────────────

#[test]
fn zero_associativity_is_rejected() {
    let config = CacheConfig {
        associativity: 0,
        ..test_config()
    };
    let err = CacheController::new(&config).unwrap_err();
    assert_eq!(err, SimError::MissingCacheParameter("associativity"));
}

// ──────────────────────────────────────────────────────────
// Boundary: a single set (set_bits = 0)
// ──────────────────────────────────────────────────────────

#[test]
fn set_bits_zero_forces_a_single_set() {
    let config = CacheConfig {
        associativity: 4,
        set_bits: 0,
        block_bits: 6,
        victim_entries: 0,
        rrpv_width: None,
    };
    let mut cache = CacheController::new(&config).unwrap();

    // Every address, however far apart, maps to the same lone set.
    drive(&mut cache, read(0));
    drive(&mut cache, read(1 << 20));
    let (_, outcome) = drive(&mut cache, read(0));
    assert_eq!(outcome, AccessOutcome::Hit);
}
