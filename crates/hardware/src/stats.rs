//! Simulation statistics collection and reporting.
//!
//! This module tracks the aggregate outcome of a simulation run. It provides:
//! 1. **Counters:** Hits, misses, and evictions, updated once per access.
//! 2. **Derived metrics:** Total accesses, hit rate, and miss rate.
//! 3. **Reporting:** The cache-lab summary line, a sectioned text report,
//!    JSON export, and the `.csim_results` file format.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::cache::AccessOutcome;

/// Hit, miss, and eviction counters.
///
/// Counters only ever increase. Every access increments exactly one of `hits`
/// or `misses`; an eviction is always also a miss, so `evictions <= misses`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CacheStats {
    /// Accesses that found their block in the cache.
    pub hits: u64,
    /// Accesses that had to install their block.
    pub misses: u64,
    /// Misses that displaced a valid line.
    pub evictions: u64,
}

impl CacheStats {
    /// Creates a counter triple with explicit values.
    pub const fn new(hits: u64, misses: u64, evictions: u64) -> Self {
        Self {
            hits,
            misses,
            evictions,
        }
    }

    /// Records the outcome of one access.
    #[inline(always)]
    pub const fn record(&mut self, outcome: AccessOutcome) {
        match outcome {
            AccessOutcome::Hit => self.hits += 1,
            AccessOutcome::Miss => self.misses += 1,
            AccessOutcome::MissWithEviction => {
                self.misses += 1;
                self.evictions += 1;
            }
        }
    }

    /// Total number of accesses recorded.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, in `[0, 1]`; `0.0` when nothing was recorded.
    pub fn hit_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    /// Fraction of accesses that missed, in `[0, 1]`; `0.0` when nothing was recorded.
    pub fn miss_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            total => self.misses as f64 / total as f64,
        }
    }

    /// Serializes the counters and derived rates as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Propagates any serializer failure.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&serde_json::json!({
            "hits": self.hits,
            "misses": self.misses,
            "evictions": self.evictions,
            "accesses": self.accesses(),
            "hit_rate": self.hit_rate(),
            "miss_rate": self.miss_rate(),
        }))
    }

    /// Writes `"<hits> <misses> <evictions>\n"` to `path`, the results-file
    /// format read by the cache-lab driver.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from creating or writing the file.
    pub fn write_results(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(
            path,
            format!("{} {} {}\n", self.hits, self.misses, self.evictions),
        )
    }

    /// Prints a sectioned report to stdout.
    pub fn print(&self) {
        println!("==========================================================");
        println!("CACHE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("accesses                 {}", self.accesses());
        println!(
            "hits                     {} ({:.2}%)",
            self.hits,
            self.hit_rate() * 100.0
        );
        println!(
            "misses                   {} ({:.2}%)",
            self.misses,
            self.miss_rate() * 100.0
        );
        println!("evictions                {}", self.evictions);
        println!("==========================================================");
    }
}

impl fmt::Display for CacheStats {
    /// Formats the cache-lab summary line: `hits:H misses:M evictions:E`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits:{} misses:{} evictions:{}",
            self.hits, self.misses, self.evictions
        )
    }
}
