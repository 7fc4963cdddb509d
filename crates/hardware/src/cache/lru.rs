//! Least Recently Used (LRU) Replacement.
//!
//! Recency is tracked with a single session-wide clock. Every access, hit or
//! miss, advances the clock and stamps the touched line with the new value,
//! so within a set the line with the smallest stamp is the least recently
//! used. Lines that were never touched keep the initial stamp `0` and lose to
//! every touched line.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `RecencyClock::tick()`: O(1)
//!   - `select_victim()`: O(E) where E is the number of lines per set
//! - **Space Complexity:** one `u64` per line plus the clock
//! - **Hardware Cost:** High - a full timestamp comparator per way
//! - **Best Case:** Working sets that fit within the associativity
//! - **Worst Case:** Cyclic scans one block larger than a set (every access misses)

use super::line::CacheLine;

/// Global recency clock for one simulation session.
///
/// Starts at `0`, the stamp carried by untouched lines, and is advanced
/// before each use. Stamps are therefore unique and strictly positive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecencyClock {
    now: u64,
}

impl RecencyClock {
    /// Creates a clock at time zero.
    pub const fn new() -> Self {
        Self { now: 0 }
    }

    /// Advances the clock and returns the new stamp.
    #[inline(always)]
    pub const fn tick(&mut self) -> u64 {
        self.now += 1;
        self.now
    }

    /// The most recently issued stamp (`0` before the first access).
    pub const fn now(&self) -> u64 {
        self.now
    }
}

/// Selects the way to replace within a set.
///
/// Scans left to right and keeps the first line whose stamp is strictly less
/// than every stamp seen before it. Valid and invalid lines are treated alike;
/// untouched lines win only because their stamp is `0`, and among several of
/// them the leftmost is chosen.
///
/// # Arguments
///
/// * `lines` - The lines of one set; must not be empty.
///
/// # Returns
///
/// The index of the victim way.
pub fn select_victim(lines: &[CacheLine]) -> usize {
    let mut victim = 0;
    let mut oldest = u64::MAX;
    for (way, line) in lines.iter().enumerate() {
        if line.recency < oldest {
            victim = way;
            oldest = line.recency;
        }
    }
    victim
}
