//! Cache line metadata.

/// One cache line: validity, tag, and the recency stamp of its last access.
///
/// No block data is held; the simulator only needs to know which tag a line
/// caches and when it was last touched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Whether the line currently holds a block.
    pub valid: bool,
    /// Tag of the cached block. Meaningless while `valid` is false.
    pub tag: u64,
    /// Clock value assigned on the most recent access; `0` for a line never touched.
    pub recency: u64,
}

impl CacheLine {
    /// Returns `true` if this line holds the block identified by `tag`.
    #[inline(always)]
    pub const fn matches(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }
}
