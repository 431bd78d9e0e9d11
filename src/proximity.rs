//! Proximity catalog.
//!
//! The unit's rooms are laid out in eight physically contiguous blocks.
//! Keeping a nurse's rooms inside one block shortens walking distance, so
//! both the engine's locality pass and the validator's spread check key on
//! this table. Rooms not listed here fall into an implicit "other" bucket.

use std::fmt;

/// Identifier of a contiguous block (1-based, displayed as `block-N`).
///
/// Only obtainable from [`block_of`] and [`blocks`], so the index is always
/// within the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(u8);

/// Block membership, in layout order.
const BLOCKS: [&[&str]; 8] = [
    &["600", "601", "602", "603"],
    &["604", "605A", "605B", "606A", "606B"],
    &["607", "608", "609", "610"],
    &["611", "612", "613", "614"],
    &["615A", "615B", "616A", "616B"],
    &["617A", "617B", "618A", "618B"],
    &["619", "620", "621"],
    &["622", "623"],
];

impl BlockId {
    /// Numeric index (1..=8).
    #[inline]
    pub fn index(self) -> u8 {
        self.0
    }

    /// Room numbers in this block, in layout order.
    pub fn rooms(self) -> &'static [&'static str] {
        BLOCKS[usize::from(self.0 - 1)]
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block-{}", self.0)
    }
}

/// Returns the block containing `room_number`, or `None` for rooms outside
/// the catalog.
pub fn block_of(room_number: &str) -> Option<BlockId> {
    BLOCKS
        .iter()
        .position(|members| members.contains(&room_number))
        .map(|i| BlockId(i as u8 + 1))
}

/// All eight blocks in layout order.
pub fn blocks() -> impl Iterator<Item = BlockId> {
    (1..=BLOCKS.len() as u8).map(BlockId)
}

/// Every catalogued room number, in layout order.
pub fn room_numbers() -> impl Iterator<Item = &'static str> {
    BLOCKS.iter().flat_map(|members| members.iter().copied())
}
