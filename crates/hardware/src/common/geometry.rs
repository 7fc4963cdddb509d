//! Cache geometry.
//!
//! A geometry is the immutable `(s, E, b)` triple describing a cache:
//! `S = 2^s` sets, `E` lines per set, and `B = 2^b` bytes per block. It is
//! validated once, when constructed, and the engine relies on it afterwards
//! without re-checking.

use std::mem;

use serde::Serialize;

use super::addr::DecodedAddr;
use super::error::ConfigError;
use crate::cache::CacheLine;

/// Largest number of lines whose storage still fits in an `isize`-sized allocation.
const MAX_LINES: u128 = (isize::MAX as usize / mem::size_of::<CacheLine>()) as u128;

/// Validated cache geometry.
///
/// Invariants upheld by every value of this type:
/// - `lines_per_set >= 1`
/// - `set_bits + block_bits <= 64`
/// - `2^set_bits * lines_per_set` lines can be addressed by a `Vec`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Geometry {
    set_bits: u32,
    lines_per_set: usize,
    block_bits: u32,
}

impl Geometry {
    /// Validates and builds a geometry.
    ///
    /// # Arguments
    ///
    /// * `set_bits` - Number of set-index bits `s` (`S = 2^s` sets).
    /// * `lines_per_set` - Associativity `E`.
    /// * `block_bits` - Number of block-offset bits `b` (`B = 2^b` bytes per block).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroAssociativity`] when `E == 0`,
    /// [`ConfigError::AddressBitsExceeded`] when `s + b > 64`, and
    /// [`ConfigError::TooManyLines`] when the line array could not be allocated.
    pub fn new(set_bits: u32, lines_per_set: usize, block_bits: u32) -> Result<Self, ConfigError> {
        if lines_per_set == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        if u64::from(set_bits) + u64::from(block_bits) > u64::from(u64::BITS) {
            return Err(ConfigError::AddressBitsExceeded {
                set_bits,
                block_bits,
            });
        }

        // s <= 64 here, so the shift cannot overflow a u128.
        let sets = 1u128 << set_bits;
        match sets.checked_mul(lines_per_set as u128) {
            Some(lines) if lines <= MAX_LINES => Ok(Self {
                set_bits,
                lines_per_set,
                block_bits,
            }),
            _ => Err(ConfigError::TooManyLines {
                set_bits,
                lines_per_set,
            }),
        }
    }

    /// Number of set-index bits `s`.
    #[inline(always)]
    pub const fn set_bits(&self) -> u32 {
        self.set_bits
    }

    /// Number of block-offset bits `b`.
    #[inline(always)]
    pub const fn block_bits(&self) -> u32 {
        self.block_bits
    }

    /// Associativity `E`.
    #[inline(always)]
    pub const fn lines_per_set(&self) -> usize {
        self.lines_per_set
    }

    /// Number of sets `S = 2^s`.
    #[inline(always)]
    pub const fn num_sets(&self) -> usize {
        1usize << self.set_bits
    }

    /// Total number of lines `S * E`.
    #[inline(always)]
    pub const fn total_lines(&self) -> usize {
        self.num_sets() * self.lines_per_set
    }

    /// Block size `B = 2^b` in bytes.
    ///
    /// Returned as `u128` so that `b = 64` is representable.
    pub const fn block_size(&self) -> u128 {
        1u128 << self.block_bits
    }

    /// Width of the tag field, `64 - s - b`.
    pub const fn tag_bits(&self) -> u32 {
        u64::BITS - self.set_bits - self.block_bits
    }

    /// Splits `addr` into tag, set index, and offset for this geometry.
    #[inline(always)]
    pub const fn decompose(&self, addr: u64) -> DecodedAddr {
        DecodedAddr::new(addr, self.set_bits, self.block_bits)
    }
}
