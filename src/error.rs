//! Errors from building the structures.
//!
//! Queries never fail: out-of-range positions are programming errors and panic.
//! Only construction parameters are validated.

use thiserror::Error;

/// Invalid construction parameters for a rank index.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Blocks must contain at least one bit.
    #[error("block size must be positive")]
    EmptyBlock,

    /// The number of bit patterns in a block class does not fit in a 64-bit offset.
    #[error("block size {size} exceeds the maximum of {max} bits")]
    BlockTooLarge {
        /// Requested block size.
        size: usize,
        /// Largest supported block size.
        max: usize,
    },

    /// Superblocks must contain at least one block.
    #[error("superblock size must be positive")]
    EmptySuperblock,
}

/// A specialized Result type for building the structures.
pub type Result<T> = std::result::Result<T, Error>;
