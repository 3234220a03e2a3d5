//! A compressed rank index over a bit field.
//!
//! The structure is a variant of the RRR encoding:
//!
//! > Raman, Raman, Rao: Succinct indexable dictionaries with applications to encoding k-ary trees, prefix sums and multisets.
//! > ACM Transactions on Algorithms, 2007.
//! > DOI: [10.1145/1290672.1290680](https://doi.org/10.1145/1290672.1290680)
//!
//! The field is divided into blocks of `block_size` bits, and consecutive blocks are grouped into superblocks of `superblock_size` blocks.
//! Each block is described by two integers:
//!
//! * The class is the number of set bits in the block.
//! * The offset identifies the bit pattern of the block among the patterns of the same class.
//!
//! Instead of enumerating all `C(block_size, class)` patterns of a class, we store the distinct patterns that occur in the field in a global table.
//! The offset is then an index to the list of patterns for the class.
//! Class and offset fields have fixed widths determined by the block size:
//!
//! > `class_bits = ceil(log2(block_size + 1))`
//! > `offset_bits = ceil(log2(C(block_size, block_size / 2)))`
//!
//! The fields are packed back to back into a [`BitField`] of `blocks * (class_bits + offset_bits)` bits.
//! For each superblock, we also store the number of set bits in the preceding superblocks.
//! A rank query sums the sample for the superblock, the classes of the preceding blocks in the superblock, and the set bits in a prefix of the pattern of the final block.

use crate::bit_field::BitField;
use crate::error::{Error, Result};
use crate::ops::{BitVec, Rank, Select, SelectZero};
use crate::bits;

use std::collections::HashMap;
use std::cmp;

//-----------------------------------------------------------------------------

/// Construction parameters for [`RRRField`].
///
/// The default parameters use 16-bit blocks and 8-block superblocks.
///
/// # Examples
///
/// ```
/// use wavelet_sds::rrr::Params;
///
/// let params = Params::new(8, 10).unwrap();
/// assert_eq!(params.class_bits(), 4);
/// assert_eq!(params.offset_bits(), 7);
/// assert_eq!(params.step_bits(), 11);
///
/// assert!(Params::new(65, 8).is_err());
/// assert_eq!(Params::default().block_size(), 16);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
    block_size: usize,
    superblock_size: usize,
    class_bits: usize,
    offset_bits: usize,
}

impl Params {
    /// Largest supported block size in bits.
    pub const MAX_BLOCK_SIZE: usize = bits::WORD_BITS;

    /// Default block size in bits.
    pub const BLOCK_SIZE: usize = 16;

    /// Default superblock size in blocks.
    pub const SUPERBLOCK_SIZE: usize = 8;

    /// Returns parameters for the given block and superblock sizes.
    ///
    /// # Arguments
    ///
    /// * `block_size`: Block size in bits.
    /// * `superblock_size`: Superblock size in blocks.
    ///
    /// # Errors
    ///
    /// Returns an error if either size is zero or if the block size exceeds [`Params::MAX_BLOCK_SIZE`].
    pub fn new(block_size: usize, superblock_size: usize) -> Result<Params> {
        if block_size == 0 {
            return Err(Error::EmptyBlock);
        }
        if block_size > Self::MAX_BLOCK_SIZE {
            return Err(Error::BlockTooLarge { size: block_size, max: Self::MAX_BLOCK_SIZE });
        }
        if superblock_size == 0 {
            return Err(Error::EmptySuperblock);
        }
        Ok(Self::with_sizes(block_size, superblock_size))
    }

    /// Returns the block size in bits.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns the superblock size in blocks.
    #[inline]
    pub fn superblock_size(&self) -> usize {
        self.superblock_size
    }

    /// Returns the width of a class field in bits.
    #[inline]
    pub fn class_bits(&self) -> usize {
        self.class_bits
    }

    /// Returns the width of an offset field in bits.
    #[inline]
    pub fn offset_bits(&self) -> usize {
        self.offset_bits
    }

    /// Returns the number of bits used for describing a block.
    #[inline]
    pub fn step_bits(&self) -> usize {
        self.class_bits + self.offset_bits
    }

    // Assumes that the sizes have been validated.
    fn with_sizes(block_size: usize, superblock_size: usize) -> Params {
        let largest_class = bits::binomial(block_size as u64, (block_size / 2) as u64);
        Params {
            block_size,
            superblock_size,
            class_bits: bits::need_bits(block_size as u64 + 1),
            offset_bits: largest_class.map_or(bits::WORD_BITS, bits::need_bits),
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::with_sizes(Self::BLOCK_SIZE, Self::SUPERBLOCK_SIZE)
    }
}

//-----------------------------------------------------------------------------

/// An immutable rank index over a [`BitField`].
///
/// The index is built once from a snapshot of the field and does not refer to the field afterwards.
/// The bits can be recovered from the index using [`RRRField::block`] or [`BitVec::get`].
/// Rank queries take time proportional to the superblock size.
///
/// `RRRField` implements the following `wavelet_sds` traits:
/// * Basic functionality: [`BitVec`]
/// * Queries: [`Rank`], [`Select`], [`SelectZero`]
///
/// # Examples
///
/// ```
/// use wavelet_sds::bit_field::BitField;
/// use wavelet_sds::ops::{BitVec, Rank, Select};
/// use wavelet_sds::rrr::RRRField;
///
/// let mut bf = BitField::new(24);
/// for i in 0..4 {
///     bf.set(i);
/// }
/// for i in (8..24).step_by(2) {
///     bf.set(i);
/// }
///
/// let rrr = RRRField::new(&bf, 8, 10).unwrap();
/// assert_eq!(rrr.len(), 24);
/// assert_eq!(rrr.count_ones(), 12);
/// assert_eq!(rrr.class(0), 4);
/// assert_eq!(rrr.offset(1), 1);
/// assert_eq!(rrr.offset(2), 1);
/// assert_eq!(rrr.patterns(), 2);
///
/// assert_eq!(rrr.rank(3), 3);
/// assert_eq!(rrr.rank(11), 6);
/// assert_eq!(rrr.rank(24), 12);
/// assert_eq!(rrr.select(5), Some(10));
/// assert_eq!(rrr.block(1), bf.sub(8, 16));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RRRField {
    len: usize,
    ones: usize,
    params: Params,
    blocks: usize,
    // Class and offset of each block.
    fields: BitField,
    // Number of set bits before each superblock, followed by the total.
    super_ranks: Vec<usize>,
    // Distinct patterns of each class, padded to `block_size` bits, with the first bit as the most significant one.
    global: Vec<Vec<u64>>,
}

impl RRRField {
    /// Builds an index over the field with the given block and superblock sizes.
    ///
    /// # Arguments
    ///
    /// * `field`: The bit field.
    /// * `block_size`: Block size in bits.
    /// * `superblock_size`: Superblock size in blocks.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid.
    /// See [`Params::new`].
    pub fn new(field: &BitField, block_size: usize, superblock_size: usize) -> Result<RRRField> {
        let params = Params::new(block_size, superblock_size)?;
        Ok(Self::with_params(field, params))
    }

    /// Builds an index over the field with the default parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavelet_sds::bit_field::BitField;
    /// use wavelet_sds::ops::Rank;
    /// use wavelet_sds::rrr::RRRField;
    ///
    /// let rrr = RRRField::classic(&BitField::new(0));
    /// assert_eq!(rrr.rank(0), 0);
    /// assert_eq!(rrr.rank(100), 0);
    /// ```
    pub fn classic(field: &BitField) -> RRRField {
        Self::with_params(field, Params::default())
    }

    /// Builds an index over the field with the given parameters.
    pub fn with_params(field: &BitField, params: Params) -> RRRField {
        let block_size = params.block_size();
        let superblock_size = params.superblock_size();
        let len = field.len();
        let blocks = (len + block_size - 1) / block_size;

        let mut fields = BitField::new(blocks * params.step_bits());
        let mut super_ranks: Vec<usize> = Vec::with_capacity((blocks + superblock_size - 1) / superblock_size + 1);
        let mut global: Vec<Vec<u64>> = vec![Vec::new(); block_size + 1];
        let mut offsets: Vec<HashMap<u64, usize>> = vec![HashMap::new(); block_size + 1];

        let mut ones = 0;
        for block in 0..blocks {
            if block % superblock_size == 0 {
                super_ranks.push(ones);
            }

            // A short final block is padded with unset bits.
            let start = block * block_size;
            let width = cmp::min(block_size, len - start);
            let pattern = field.read_raw(start, width) << (block_size - width);
            let class = bits::popcount(pattern);

            let patterns = &mut global[class];
            let offset = *offsets[class].entry(pattern).or_insert_with(|| {
                patterns.push(pattern);
                patterns.len() - 1
            });

            let field_offset = block * params.step_bits();
            fields.set_int(field_offset, class as u64, params.class_bits());
            fields.set_int(field_offset + params.class_bits(), offset as u64, params.offset_bits());
            ones += class;
        }
        super_ranks.push(ones);

        RRRField {
            len,
            ones,
            params,
            blocks,
            fields,
            super_ranks,
            global,
        }
    }

    /// Returns the construction parameters.
    #[inline]
    pub fn params(&self) -> Params {
        self.params
    }

    /// Returns the block size in bits.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.params.block_size()
    }

    /// Returns the superblock size in blocks.
    #[inline]
    pub fn superblock_size(&self) -> usize {
        self.params.superblock_size()
    }

    /// Returns the width of a class field in bits.
    #[inline]
    pub fn class_bits(&self) -> usize {
        self.params.class_bits()
    }

    /// Returns the width of an offset field in bits.
    #[inline]
    pub fn offset_bits(&self) -> usize {
        self.params.offset_bits()
    }

    /// Returns the number of bits used for describing a block.
    #[inline]
    pub fn step_bits(&self) -> usize {
        self.params.step_bits()
    }

    /// Returns the number of blocks.
    #[inline]
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// Returns the number of superblocks.
    #[inline]
    pub fn superblocks(&self) -> usize {
        self.super_ranks.len() - 1
    }

    /// Returns the size of the packed class and offset fields in bits.
    ///
    /// This is always `self.blocks() * self.params().step_bits()`.
    #[inline]
    pub fn index_bits(&self) -> usize {
        self.fields.len()
    }

    /// Returns the number of distinct block patterns stored in the global table.
    pub fn patterns(&self) -> usize {
        self.global.iter().map(|patterns| patterns.len()).sum()
    }

    /// Returns the number of distinct block patterns of the given class.
    ///
    /// This is at most `C(block_size, class)`.
    pub fn class_patterns(&self, class: usize) -> usize {
        self.global.get(class).map_or(0, |patterns| patterns.len())
    }

    /// Returns the class (the number of set bits) of the block.
    ///
    /// # Panics
    ///
    /// Panics if `block >= self.blocks()`.
    pub fn class(&self, block: usize) -> usize {
        assert!(block < self.blocks, "RRRField: block {} out of bounds for {} blocks", block, self.blocks);
        self.fields.get_int(block * self.params.step_bits(), self.params.class_bits()) as usize
    }

    /// Returns the offset of the block among the stored patterns of its class.
    ///
    /// # Panics
    ///
    /// Panics if `block >= self.blocks()`.
    pub fn offset(&self, block: usize) -> usize {
        assert!(block < self.blocks, "RRRField: block {} out of bounds for {} blocks", block, self.blocks);
        let field_offset = block * self.params.step_bits() + self.params.class_bits();
        self.fields.get_int(field_offset, self.params.offset_bits()) as usize
    }

    /// Returns the length of the block in bits.
    ///
    /// Only the final block may be shorter than the block size.
    ///
    /// # Panics
    ///
    /// Panics if `block >= self.blocks()`.
    pub fn block_len(&self, block: usize) -> usize {
        assert!(block < self.blocks, "RRRField: block {} out of bounds for {} blocks", block, self.blocks);
        cmp::min(self.params.block_size(), self.len - block * self.params.block_size())
    }

    /// Reconstructs the bits of the block.
    ///
    /// # Panics
    ///
    /// Panics if `block >= self.blocks()`.
    pub fn block(&self, block: usize) -> BitField {
        let width = self.block_len(block);
        let mut result = BitField::new(width);
        result.write_raw(0, self.pattern(block) >> (self.params.block_size() - width), width);
        result
    }

    // Returns the padded pattern of the block.
    fn pattern(&self, block: usize) -> u64 {
        self.global[self.class(block)][self.offset(block)]
    }

    // Returns the padded pattern of the block, aligned to the most significant bit.
    fn aligned_pattern(&self, block: usize) -> u64 {
        self.pattern(block) << (bits::WORD_BITS - self.params.block_size())
    }

    // Returns the number of unset bits before the superblock.
    fn super_zeros(&self, superblock: usize) -> usize {
        let start = cmp::min(superblock * self.params.superblock_size() * self.params.block_size(), self.len);
        start - self.super_ranks[superblock]
    }
}

//-----------------------------------------------------------------------------

impl BitVec for RRRField {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn count_ones(&self) -> usize {
        self.ones
    }

    fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "RRRField: index {} out of bounds for length {}", index, self.len);
        let block_size = self.params.block_size();
        (self.pattern(index / block_size) >> (block_size - 1 - index % block_size)) & 1 != 0
    }
}

impl Rank for RRRField {
    fn rank(&self, index: usize) -> usize {
        if index >= self.len {
            return self.ones;
        }

        let block_size = self.params.block_size();
        let block = index / block_size;
        let superblock = block / self.params.superblock_size();

        let mut result = self.super_ranks[superblock];
        for i in (superblock * self.params.superblock_size())..block {
            result += self.class(i);
        }
        let prefix = index % block_size;
        if prefix > 0 {
            result += bits::popcount(self.pattern(block) >> (block_size - prefix));
        }
        result
    }
}

impl Select for RRRField {
    fn select(&self, rank: usize) -> Option<usize> {
        if rank >= self.ones {
            return None;
        }

        // The last superblock starting with at most `rank` set bits before it.
        let superblock = self.super_ranks.partition_point(|&ones| ones <= rank) - 1;
        let mut rank = rank - self.super_ranks[superblock];
        let mut block = superblock * self.params.superblock_size();
        loop {
            let class = self.class(block);
            if rank < class {
                break;
            }
            rank -= class;
            block += 1;
        }

        let offset = bits::select_msb(self.aligned_pattern(block), rank);
        Some(block * self.params.block_size() + offset)
    }
}

impl SelectZero for RRRField {
    fn select_zero(&self, rank: usize) -> Option<usize> {
        if rank >= self.count_zeros() {
            return None;
        }

        let mut low = 0;
        let mut high = self.superblocks();
        while high - low > 1 {
            let mid = low + (high - low) / 2;
            if self.super_zeros(mid) <= rank {
                low = mid;
            } else {
                high = mid;
            }
        }

        let mut rank = rank - self.super_zeros(low);
        let mut block = low * self.params.superblock_size();
        loop {
            let zeros = self.block_len(block) - self.class(block);
            if rank < zeros {
                break;
            }
            rank -= zeros;
            block += 1;
        }

        // Padding is after the real bits, so it is never selected.
        let offset = bits::select_msb(!self.aligned_pattern(block), rank);
        Some(block * self.params.block_size() + offset)
    }
}

//-----------------------------------------------------------------------------


//-----------------------------------------------------------------------------
