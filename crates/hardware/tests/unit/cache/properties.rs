//! Property-Based Cache Invariants.
//!
//! Random geometries and access streams check the counting and replacement
//! invariants that must hold for any input. Addresses are drawn from a small
//! range so that streams revisit blocks and exercise hits and evictions.

use std::collections::HashMap;

use csim_core::cache::CacheSim;
use csim_core::sim::{Simulator, TraceEvent, TraceKind};
use csim_core::{AccessOutcome, Geometry};
use proptest::prelude::*;

/// Small geometries: up to 8 sets, 4 ways, 8-byte blocks.
fn small_geometry() -> impl Strategy<Value = Geometry> {
    (0u32..4, 1usize..5, 0u32..4).prop_map(|(s, e, b)| Geometry::new(s, e, b).unwrap())
}

fn addresses() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..512, 0..300)
}

fn replay(geometry: Geometry, addrs: &[u64]) -> (CacheSim, Vec<AccessOutcome>) {
    let mut cache = CacheSim::new(geometry).unwrap();
    let outcomes = addrs.iter().map(|&addr| cache.access(addr)).collect();
    (cache, outcomes)
}

proptest! {
    /// Every access is exactly one hit or one miss; evictions are a subset of misses.
    #[test]
    fn prop_counters_balance(geometry in small_geometry(), addrs in addresses()) {
        let (cache, outcomes) = replay(geometry, &addrs);
        let stats = *cache.stats();

        prop_assert_eq!(stats.hits + stats.misses, addrs.len() as u64);
        prop_assert!(stats.evictions <= stats.misses);
        prop_assert_eq!(cache.clock(), addrs.len() as u64);

        let hits = outcomes.iter().filter(|o| o.is_hit()).count() as u64;
        let evictions = outcomes.iter().filter(|o| o.is_eviction()).count() as u64;
        prop_assert_eq!(stats.hits, hits);
        prop_assert_eq!(stats.evictions, evictions);
    }

    /// A set only evicts once all of its E lines are in use.
    #[test]
    fn prop_evictions_bounded_per_set(geometry in small_geometry(), addrs in addresses()) {
        let (_, outcomes) = replay(geometry, &addrs);

        let mut accesses: HashMap<u64, u64> = HashMap::new();
        let mut evictions: HashMap<u64, u64> = HashMap::new();
        for (&addr, outcome) in addrs.iter().zip(&outcomes) {
            let set = geometry.decompose(addr).set_index;
            *accesses.entry(set).or_default() += 1;
            if outcome.is_eviction() {
                *evictions.entry(set).or_default() += 1;
            }
        }

        let ways = geometry.lines_per_set() as u64;
        for (set, &count) in &evictions {
            prop_assert!(count <= accesses[set].saturating_sub(ways));
        }
    }

    /// Plain misses only happen while filling empty lines, so there are at most S * E.
    #[test]
    fn prop_cold_misses_bounded_by_capacity(geometry in small_geometry(), addrs in addresses()) {
        let (_, outcomes) = replay(geometry, &addrs);
        let cold = outcomes.iter().filter(|&&o| o == AccessOutcome::Miss).count();
        prop_assert!(cold <= geometry.total_lines());
    }

    /// The block just accessed is resident, and touching it again hits.
    #[test]
    fn prop_access_installs_block(geometry in small_geometry(), addrs in addresses(), probe in 0u64..512) {
        let (mut cache, _) = replay(geometry, &addrs);
        let _ = cache.access(probe);
        prop_assert!(cache.contains(probe));
        prop_assert_eq!(cache.access(probe), AccessOutcome::Hit);
    }

    /// Identical inputs produce identical outcomes and counters.
    #[test]
    fn prop_replay_is_deterministic(geometry in small_geometry(), addrs in addresses()) {
        let (first, first_outcomes) = replay(geometry, &addrs);
        let (second, second_outcomes) = replay(geometry, &addrs);
        prop_assert_eq!(first_outcomes, second_outcomes);
        prop_assert_eq!(first.stats(), second.stats());
    }

    /// Full 64-bit addresses never panic and still balance.
    #[test]
    fn prop_wide_addresses(
        s in 0u32..8,
        e in 1usize..4,
        b in 0u32..8,
        addrs in prop::collection::vec(any::<u64>(), 0..100)
    ) {
        let (cache, _) = replay(Geometry::new(s, e, b).unwrap(), &addrs);
        prop_assert_eq!(cache.stats().accesses(), addrs.len() as u64);
    }

    /// A modify counts two accesses and its second access always hits.
    #[test]
    fn prop_modify_second_access_hits(geometry in small_geometry(), addrs in addresses(), target in 0u64..512) {
        let mut sim = Simulator::with_geometry(geometry).unwrap();
        for &addr in &addrs {
            let _ = sim.access(addr);
        }
        let before = *sim.stats();

        let outcome = sim.replay(&TraceEvent::new(TraceKind::Modify, target, 4));
        prop_assert_eq!(outcome.len(), 2);
        prop_assert_eq!(outcome.as_slice()[1], AccessOutcome::Hit);
        prop_assert_eq!(sim.stats().accesses(), before.accesses() + 2);
    }
}
