//! Trace reading and the simulation session.
//!
//! Provides the parser for Valgrind-style memory traces and the [`Simulator`]
//! that replays parsed events against a cache.

/// Simulation session: owns the cache and replays trace events.
pub mod simulator;

/// Trace event types, line parser, and lazy file reader.
pub mod trace;

pub use simulator::{EventOutcome, Simulator};
pub use trace::{TraceEvent, TraceKind, TraceReader, parse_line};
