//! Replacement discipline unit tests: LRU ages unconditionally, RRIP ages
//! only on a conflict miss.

use cachesim_core::core::units::cache::policies::{AccessClass, LruPolicy, ReplacementPolicy, RripPolicy};
use cachesim_core::core::units::cache::CacheLine;

fn line(evict: i64, valid: bool) -> CacheLine {
    CacheLine {
        tag: 0,
        valid,
        dirty: false,
        evict,
    }
}

// ──────────────────────────────────────────────────────────
// LRU
// ──────────────────────────────────────────────────────────

#[test]
fn lru_ages_every_valid_line_on_hit() {
    let policy = LruPolicy;
    let mut lines = vec![line(0, true), line(3, true), line(0, false)];
    policy.age(&mut lines, AccessClass::Hit, 3);
    assert_eq!(lines[0].evict, 1);
    assert_eq!(lines[1].evict, 4);
    // Invalid lines are aged too; the value is meaningless until installed.
    assert_eq!(lines[2].evict, 1);
}

#[test]
fn lru_ages_on_every_access_class() {
    let policy = LruPolicy;
    for class in [AccessClass::Hit, AccessClass::ColdMiss, AccessClass::ConflictMiss] {
        let mut lines = vec![line(5, true)];
        policy.age(&mut lines, class, 5);
        assert_eq!(lines[0].evict, 6);
    }
}

#[test]
fn lru_fill_value_is_zero() {
    assert_eq!(LruPolicy.fill_value(), 0);
}

// ──────────────────────────────────────────────────────────
// RRIP
// ──────────────────────────────────────────────────────────

#[test]
fn rrip_does_not_age_on_hit_or_cold_miss() {
    let policy = RripPolicy::new(2);
    let mut lines = vec![line(1, true)];
    policy.age(&mut lines, AccessClass::Hit, 3);
    assert_eq!(lines[0].evict, 1);

    policy.age(&mut lines, AccessClass::ColdMiss, 3);
    assert_eq!(lines[0].evict, 1);
}

#[test]
fn rrip_ages_by_distance_from_max_on_conflict_miss() {
    // k=2 → domain is [0, 3]. A victim held at 2 ages the rest by 3 - 2 = 1.
    let policy = RripPolicy::new(2);
    let mut lines = vec![line(2, true), line(0, true)];
    policy.age(&mut lines, AccessClass::ConflictMiss, 2);
    assert_eq!(lines[0].evict, 3);
    assert_eq!(lines[1].evict, 1);
}

#[test]
fn rrip_k1_domain_is_zero_or_one() {
    let policy = RripPolicy::new(1);
    assert_eq!(policy.fill_value(), 1);
}

#[test]
fn rrip_fill_value_is_max_domain_value() {
    assert_eq!(RripPolicy::new(3).fill_value(), 7);
}
