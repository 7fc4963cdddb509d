//! Simulation Session.
//!
//! A [`Simulator`] owns one cache for the lifetime of a run. It performs:
//! 1. **Event replay:** Maps each trace event onto zero, one, or two cache
//!    accesses (instruction fetches are skipped, modifies access twice).
//! 2. **Trace driving:** Consumes a stream of parsed events in order, with an
//!    optional observer for per-event reporting.
//! 3. **Finalization:** Releases the cache and hands back the final counters.
//!
//! Events are applied strictly in the order they are supplied; that order is
//! the only input to the recency clock and therefore to every eviction.

use std::fmt;

use crate::cache::{AccessOutcome, CacheSim};
use crate::common::{Geometry, SimError, TraceError};
use crate::config::SimConfig;
use crate::sim::trace::TraceEvent;
use crate::stats::CacheStats;

/// Outcomes of the accesses performed for one trace event (at most two).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventOutcome {
    outcomes: [AccessOutcome; 2],
    len: usize,
}

impl EventOutcome {
    /// An outcome list with no accesses.
    pub const fn empty() -> Self {
        Self {
            outcomes: [AccessOutcome::Hit; 2],
            len: 0,
        }
    }

    fn push(&mut self, outcome: AccessOutcome) {
        debug_assert!(self.len < self.outcomes.len());
        self.outcomes[self.len] = outcome;
        self.len += 1;
    }

    /// The recorded outcomes, in access order.
    pub fn as_slice(&self) -> &[AccessOutcome] {
        &self.outcomes[..self.len]
    }

    /// Number of accesses performed.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the event performed no accesses.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for EventOutcome {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for EventOutcome {
    /// Formats the outcome labels separated by spaces, e.g. `miss eviction hit`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, outcome) in self.as_slice().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{outcome}")?;
        }
        Ok(())
    }
}

/// A single simulation run over one cache.
#[derive(Debug)]
pub struct Simulator {
    cache: CacheSim,
    verbose: bool,
}

impl Simulator {
    /// Validates the configuration and allocates the cache.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] for an invalid geometry and
    /// [`SimError::Allocation`] if the cache cannot be allocated.
    pub fn new(config: &SimConfig) -> Result<Self, SimError> {
        let geometry = config.cache.validate()?;
        let mut sim = Self::with_geometry(geometry)?;
        sim.verbose = config.verbose;
        Ok(sim)
    }

    /// Allocates a cache for an already validated geometry.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Allocation`] if the cache cannot be allocated.
    pub fn with_geometry(geometry: Geometry) -> Result<Self, SimError> {
        Ok(Self {
            cache: CacheSim::new(geometry)?,
            verbose: false,
        })
    }

    /// Enables or disables per-event logging in [`Simulator::run`].
    pub const fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Whether per-event logging is enabled.
    pub const fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// The underlying cache.
    pub const fn cache(&self) -> &CacheSim {
        &self.cache
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &CacheStats {
        self.cache.stats()
    }

    /// Performs one cache access.
    pub fn access(&mut self, addr: u64) -> AccessOutcome {
        self.cache.access(addr)
    }

    /// Replays one trace event.
    ///
    /// Loads and stores access the cache once; modifies access the same address
    /// twice in succession; instruction fetches do not touch the cache.
    pub fn replay(&mut self, event: &TraceEvent) -> EventOutcome {
        let mut outcome = EventOutcome::empty();
        for _ in 0..event.kind.access_count() {
            outcome.push(self.cache.access(event.address));
        }
        outcome
    }

    /// Replays a stream of events, stopping at the first trace error.
    ///
    /// When verbose, each simulated event is logged at `info` level as
    /// `"<event> <outcomes>"`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Trace`] with the first error produced by `events`.
    /// Events before the error have already been applied.
    pub fn run<I>(&mut self, events: I) -> Result<(), SimError>
    where
        I: IntoIterator<Item = Result<TraceEvent, TraceError>>,
    {
        let verbose = self.verbose;
        self.run_with(events, |event, outcome| {
            if verbose {
                tracing::info!("{event} {outcome}");
            }
        })
    }

    /// Replays a stream of events, calling `observer` after each event that
    /// accessed the cache.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Trace`] with the first error produced by `events`.
    pub fn run_with<I, F>(&mut self, events: I, mut observer: F) -> Result<(), SimError>
    where
        I: IntoIterator<Item = Result<TraceEvent, TraceError>>,
        F: FnMut(&TraceEvent, &EventOutcome),
    {
        for event in events {
            let event = event?;
            let outcome = self.replay(&event);
            if !outcome.is_empty() {
                observer(&event, &outcome);
            }
        }
        Ok(())
    }

    /// Like [`Simulator::run_with`], but skips lines that fail to parse.
    ///
    /// Each skipped line is logged as a warning.
    ///
    /// # Returns
    ///
    /// The number of lines skipped.
    ///
    /// # Errors
    ///
    /// I/O failures are not skippable and are returned as [`SimError::Trace`].
    pub fn run_lossy_with<I, F>(&mut self, events: I, mut observer: F) -> Result<usize, SimError>
    where
        I: IntoIterator<Item = Result<TraceEvent, TraceError>>,
        F: FnMut(&TraceEvent, &EventOutcome),
    {
        let mut skipped = 0;
        for event in events {
            let event = match event {
                Ok(event) => event,
                Err(err @ TraceError::Parse { .. }) => {
                    tracing::warn!("skipping trace {err}");
                    skipped += 1;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            let outcome = self.replay(&event);
            if !outcome.is_empty() {
                observer(&event, &outcome);
            }
        }
        Ok(skipped)
    }

    /// Ends the session, releasing the cache and returning the final counters.
    pub fn finish(self) -> CacheStats {
        let stats = self.cache.into_stats();
        tracing::debug!(
            hits = stats.hits,
            misses = stats.misses,
            evictions = stats.evictions,
            "simulation finished"
        );
        stats
    }
}
