//! Set-associative cache simulator library.
//!
//! This crate replays a trace of memory accesses against a functional model of a
//! set-associative cache with least-recently-used replacement. It provides:
//! 1. **Common:** Address decomposition, validated cache geometry, and error types.
//! 2. **Configuration:** Serde-backed geometry configuration with defaults.
//! 3. **Cache:** Line/set storage, the recency clock, and the hit/miss/eviction engine.
//! 4. **Simulation:** Trace parsing and a session that drives the cache event by event.
//! 5. **Statistics:** Hit, miss, and eviction counters with text and JSON reporting.
//!
//! The model tracks only line metadata (valid bit, tag, recency); no data is stored.
//!
//! ```
//! use csim_core::{AccessOutcome, Geometry, Simulator};
//!
//! let geometry = Geometry::new(1, 1, 1)?;
//! let mut sim = Simulator::with_geometry(geometry)?;
//!
//! assert_eq!(sim.access(0x0), AccessOutcome::Miss);
//! assert_eq!(sim.access(0x2), AccessOutcome::Miss);
//! assert_eq!(sim.access(0x0), AccessOutcome::Hit);
//!
//! let stats = sim.finish();
//! assert_eq!(stats.to_string(), "hits:1 misses:2 evictions:0");
//! # Ok::<(), csim_core::SimError>(())
//! ```

/// Common types (address decomposition, geometry, errors).
pub mod common;
/// Simulator configuration (defaults, geometry parameters, JSON loading).
pub mod config;
/// Cache storage and the LRU access engine.
pub mod cache;
/// Trace reading and the simulation session.
pub mod sim;
/// Hit/miss/eviction counters and reporting.
pub mod stats;

/// Outcome of a single simulated access.
pub use crate::cache::AccessOutcome;
/// The cache engine; owns lines, recency clock, and counters.
pub use crate::cache::CacheSim;
/// Validated `(s, E, b)` geometry.
pub use crate::common::Geometry;
/// Top-level error type for fallible library operations.
pub use crate::common::SimError;
/// Root configuration type; use `SimConfig::default()` or deserialize from JSON.
pub use crate::config::SimConfig;
/// Simulation session driving a trace through the cache.
pub use crate::sim::Simulator;
/// Final counters of a simulation run.
pub use crate::stats::CacheStats;
