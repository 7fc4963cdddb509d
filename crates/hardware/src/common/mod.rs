//! Common types shared across the cache simulator.
//!
//! This module provides the building blocks used by every other component:
//! 1. **Address Decomposition:** Splitting an address into tag, set index, and block offset.
//! 2. **Geometry:** The validated `(s, E, b)` cache shape and its derived quantities.
//! 3. **Error Handling:** Configuration, trace, and session error types.

/// Address decomposition into tag/set/offset fields.
pub mod addr;

/// Error types for configuration, trace input, and simulation.
pub mod error;

/// Validated cache geometry.
pub mod geometry;

pub use addr::DecodedAddr;
pub use error::{ConfigError, ParseError, SimError, TraceError};
pub use geometry::Geometry;
