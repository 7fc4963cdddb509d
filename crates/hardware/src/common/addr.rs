//! Address decomposition.
//!
//! A cache with `2^s` sets and `2^b`-byte blocks views a 64-bit address as three
//! fields:
//!
//! ```text
//!  63                      s+b     b        0
//! +-------------------------+-------+--------+
//! |           tag           |  set  | offset |
//! +-------------------------+-------+--------+
//! ```
//!
//! Every `u64` is a valid input. Field widths may be zero; a width of 64 yields
//! an all-ones mask and a shift that produces zero instead of overflowing.

/// Returns a mask covering the low `bits` bits of a `u64`.
///
/// `low_mask(0) == 0` and `low_mask(64) == u64::MAX`.
#[inline(always)]
pub const fn low_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Shifts `value` right by `bits`, yielding zero once every bit is shifted out.
#[inline(always)]
pub const fn shift_right(value: u64, bits: u32) -> u64 {
    match value.checked_shr(bits) {
        Some(shifted) => shifted,
        None => 0,
    }
}

/// An address split into its cache fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct DecodedAddr {
    /// Upper `64 - s - b` bits identifying the block within its set.
    pub tag: u64,
    /// Middle `s` bits selecting the set; always `< 2^s`.
    pub set_index: u64,
    /// Low `b` bits addressing a byte within the block. Not used by the engine.
    pub offset: u64,
}

impl DecodedAddr {
    /// Decomposes `addr` for a cache with `set_bits` index bits and `block_bits` offset bits.
    ///
    /// # Arguments
    ///
    /// * `addr` - The full 64-bit address.
    /// * `set_bits` - Width `s` of the set-index field.
    /// * `block_bits` - Width `b` of the block-offset field.
    ///
    /// # Examples
    ///
    /// ```
    /// use csim_core::common::DecodedAddr;
    ///
    /// let d = DecodedAddr::new(0x1234, 4, 4);
    /// assert_eq!(d.offset, 0x4);
    /// assert_eq!(d.set_index, 0x3);
    /// assert_eq!(d.tag, 0x12);
    /// ```
    #[inline(always)]
    pub const fn new(addr: u64, set_bits: u32, block_bits: u32) -> Self {
        Self {
            tag: shift_right(addr, set_bits.saturating_add(block_bits)),
            set_index: shift_right(addr, block_bits) & low_mask(set_bits),
            offset: addr & low_mask(block_bits),
        }
    }
}
