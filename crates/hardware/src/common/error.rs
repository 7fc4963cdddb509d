//! Error definitions.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Configuration Errors:** Geometries that cannot be simulated, and malformed JSON configs.
//! 2. **Trace Errors:** Unreadable trace files and lines that do not parse.
//! 3. **Session Errors:** A single top-level type unifying the above plus allocation failure.
//!
//! The access engine itself is infallible; all errors surface before the cache is
//! built or while the trace is being read.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A cache geometry or configuration that cannot be simulated.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Lines per set (`E`) was zero.
    #[error("lines per set (E) must be at least 1")]
    ZeroAssociativity,

    /// Set-index and block-offset fields together are wider than an address.
    #[error(
        "set bits ({set_bits}) plus block bits ({block_bits}) exceed the 64-bit address width"
    )]
    AddressBitsExceeded {
        /// Requested set-index width `s`.
        set_bits: u32,
        /// Requested block-offset width `b`.
        block_bits: u32,
    },

    /// `2^s * E` lines cannot be held in memory on this host.
    #[error("2^{set_bits} sets of {lines_per_set} lines is too large to simulate")]
    TooManyLines {
        /// Requested set-index width `s`.
        set_bits: u32,
        /// Requested associativity `E`.
        lines_per_set: usize,
    },

    /// A JSON configuration document failed to deserialize.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// A trace line that does not match `<kind> <hex-address>,<size>`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The leading character is not one of `I`, `L`, `S`, `M`.
    #[error("unknown access kind '{0}'")]
    UnknownKind(char),

    /// The line is missing the address or the `,size` suffix.
    #[error("expected '<kind> <address>,<size>', found {0:?}")]
    Malformed(String),

    /// The address field is not a hexadecimal `u64`.
    #[error("invalid hexadecimal address {0:?}")]
    BadAddress(String),

    /// The size field is not a non-negative decimal integer.
    #[error("invalid access size {0:?}")]
    BadSize(String),
}

/// Failure while reading a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be opened.
    #[error("cannot open trace file {}: {source}", path.display())]
    Open {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A line could not be parsed.
    #[error("line {line}: {source}")]
    Parse {
        /// 1-based line number within the trace.
        line: usize,
        /// What was wrong with the line.
        #[source]
        source: ParseError,
    },

    /// Reading from the underlying stream failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),
}

/// Top-level error for simulation sessions and the command-line front end.
#[derive(Debug, Error)]
pub enum SimError {
    /// The requested geometry or configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Memory for the cache lines could not be obtained.
    #[error("failed to allocate {lines} cache lines: {source}")]
    Allocation {
        /// Number of lines requested.
        lines: usize,
        /// Allocator failure.
        #[source]
        source: TryReserveError,
    },

    /// The trace could not be read or parsed.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// Writing a report failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),

    /// Serializing statistics failed.
    #[error("failed to serialize statistics: {0}")]
    Serialize(#[from] serde_json::Error),
}
