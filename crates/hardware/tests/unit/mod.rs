//! # Unit Components
//!
//! This module serves as the central hub for the per-component tests of the
//! simulator: shared types, configuration, the cache engine, trace handling,
//! and statistics.





/// Unit tests for simulation statistics verification.
///
/// This module contains tests that ensure the [`CacheStats`](csim_core::stats::CacheStats)
/// structure records outcomes correctly and reports them in every output format.
pub mod stats_verification;
