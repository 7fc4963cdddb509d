//! Set-Associative Cache Simulator.
//!
//! This module implements the functional cache model. It tracks, for each of
//! the `S * E` lines, whether the line is valid, which tag it caches, and when
//! it was last used, and classifies every access as a hit, a cold/conflict
//! miss, or a miss that evicts a valid line. No data is stored or moved.
//!
//! Lookup and victim selection are both linear scans over the `E` lines of
//! the target set, mirroring how associative hardware compares every way.

/// Cache line metadata.
pub mod line;

/// Recency clock and LRU victim selection.
pub mod lru;

use std::fmt;
use std::slice::ChunksExact;

use serde::Serialize;

pub use self::line::CacheLine;
pub use self::lru::{RecencyClock, select_victim};
use crate::common::{Geometry, SimError};
use crate::stats::CacheStats;

/// Classification of a single cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessOutcome {
    /// The block was present.
    Hit,
    /// The block was absent and was installed in an unused line.
    Miss,
    /// The block was absent and displaced a valid line.
    MissWithEviction,
}

impl AccessOutcome {
    /// Returns `true` for [`AccessOutcome::Hit`].
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Returns `true` for either miss variant.
    pub const fn is_miss(self) -> bool {
        !self.is_hit()
    }

    /// Returns `true` if a valid line was displaced.
    pub const fn is_eviction(self) -> bool {
        matches!(self, Self::MissWithEviction)
    }

    /// Verbose-mode label, as printed by the cache-lab reference simulator.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::MissWithEviction => "miss eviction",
        }
    }
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cache simulator implementing a set-associative cache with LRU replacement.
///
/// Lines are stored in one flat vector, set-major: set `i` occupies
/// `lines[i * E .. (i + 1) * E]`. The vector is sized at construction and never
/// resized; it is released when the simulator is dropped.
#[derive(Clone, Debug)]
pub struct CacheSim {
    geometry: Geometry,
    lines: Vec<CacheLine>,
    clock: RecencyClock,
    stats: CacheStats,
}

impl CacheSim {
    /// Allocates a cache with every line invalid and the clock at zero.
    ///
    /// # Arguments
    ///
    /// * `geometry` - Validated cache shape.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Allocation`] if memory for the lines cannot be obtained.
    pub fn new(geometry: Geometry) -> Result<Self, SimError> {
        let total = geometry.total_lines();
        let mut lines = Vec::new();
        lines
            .try_reserve_exact(total)
            .map_err(|source| SimError::Allocation {
                lines: total,
                source,
            })?;
        lines.resize(total, CacheLine::default());

        tracing::debug!(
            sets = geometry.num_sets(),
            ways = geometry.lines_per_set(),
            block_bytes = %geometry.block_size(),
            "allocated cache"
        );

        Ok(Self {
            geometry,
            lines,
            clock: RecencyClock::new(),
            stats: CacheStats::default(),
        })
    }

    /// The geometry this cache was built with.
    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// The most recently issued recency stamp.
    pub const fn clock(&self) -> u64 {
        self.clock.now()
    }

    /// Returns the lines of set `index`, or `None` if the index is out of range.
    pub fn set(&self, index: usize) -> Option<&[CacheLine]> {
        let ways = self.geometry.lines_per_set();
        let start = index.checked_mul(ways)?;
        self.lines.get(start..start.checked_add(ways)?)
    }

    /// Iterates over all sets in index order.
    pub fn sets(&self) -> ChunksExact<'_, CacheLine> {
        self.lines.chunks_exact(self.geometry.lines_per_set())
    }

    /// Checks whether the block containing `addr` is cached, without touching
    /// recency or counters.
    pub fn contains(&self, addr: u64) -> bool {
        let decoded = self.geometry.decompose(addr);
        self.set(decoded.set_index as usize)
            .is_some_and(|set| set.iter().any(|line| line.matches(decoded.tag)))
    }

    /// Simulates one access to `addr`.
    ///
    /// On a hit the matching line is re-stamped. On a miss the least recently
    /// used line of the set (see [`select_victim`]) is overwritten with the new
    /// tag; if that line was valid the access counts as an eviction. The clock
    /// advances exactly once per call.
    ///
    /// # Returns
    ///
    /// The outcome, which has also been recorded in [`CacheSim::stats`].
    pub fn access(&mut self, addr: u64) -> AccessOutcome {
        let decoded = self.geometry.decompose(addr);
        let ways = self.geometry.lines_per_set();
        let set_index = decoded.set_index as usize;
        debug_assert!(set_index < self.geometry.num_sets());

        let base = set_index * ways;
        let set = &mut self.lines[base..base + ways];

        let outcome = if let Some(line) = set.iter_mut().find(|line| line.matches(decoded.tag)) {
            line.recency = self.clock.tick();
            AccessOutcome::Hit
        } else {
            let way = select_victim(set);
            let victim = &mut set[way];
            let outcome = if victim.valid {
                AccessOutcome::MissWithEviction
            } else {
                AccessOutcome::Miss
            };
            *victim = CacheLine {
                valid: true,
                tag: decoded.tag,
                recency: self.clock.tick(),
            };
            outcome
        };

        self.stats.record(outcome);
        tracing::trace!(
            addr = format_args!("{addr:#x}"),
            set = set_index,
            tag = decoded.tag,
            %outcome,
            "access"
        );
        outcome
    }

    /// Consumes the cache and returns its final counters.
    pub fn into_stats(self) -> CacheStats {
        self.stats
    }
}
