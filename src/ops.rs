//! Operations common to the bit structures in this crate.
//!
//! Both [`crate::bit_field::BitField`] and [`crate::rrr::RRRField`] implement these traits.
//! The bit field answers queries by scanning its words, while the rank index uses its precomputed samples.
//! Indexes are 0-based, and ranks count positions strictly before the given index.

//-----------------------------------------------------------------------------

/// A binary array of fixed length.
///
/// # Example
///
/// ```
/// use wavelet_sds::bit_field::BitField;
/// use wavelet_sds::ops::BitVec;
///
/// let mut bf = BitField::new(137);
/// bf.set(1); bf.set(33); bf.set(95); bf.set(123);
/// assert_eq!(BitVec::len(&bf), 137);
/// assert_eq!(bf.count_ones(), 4);
/// assert!(bf.get(33));
/// assert!(!bf.get(34));
/// ```
pub trait BitVec {
    /// Returns the length of the binary array.
    fn len(&self) -> usize;

    /// Returns `true` if the binary array is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of set bits in the binary array.
    fn count_ones(&self) -> usize;

    /// Returns the number of unset bits in the binary array.
    fn count_zeros(&self) -> usize {
        self.len() - self.count_ones()
    }

    /// Reads a bit from the binary array.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    fn get(&self, index: usize) -> bool;
}

/// Rank queries on a binary array.
///
/// # Example
///
/// ```
/// use wavelet_sds::bit_field::BitField;
/// use wavelet_sds::ops::Rank;
///
/// let mut bf = BitField::new(137);
/// bf.set(1); bf.set(33); bf.set(95); bf.set(123);
/// assert_eq!(bf.rank(33), 1);
/// assert_eq!(bf.rank(34), 2);
/// assert_eq!(bf.rank(1000), 4);
/// assert_eq!(bf.complement_rank(65), 63);
/// ```
pub trait Rank: BitVec {
    /// Returns the number of indexes `i < index` such that `self.get(i) == true`.
    ///
    /// If `index >= self.len()`, the result is the total number of set bits.
    fn rank(&self, index: usize) -> usize;

    /// Returns the number of indexes `i < index` such that `self.get(i) == false`.
    ///
    /// If `index >= self.len()`, the result is the total number of unset bits.
    fn complement_rank(&self, index: usize) -> usize {
        let index = if index > self.len() { self.len() } else { index };
        index - self.rank(index)
    }
}

/// Select queries on the set bits of a binary array.
///
/// # Example
///
/// ```
/// use wavelet_sds::bit_field::BitField;
/// use wavelet_sds::ops::Select;
///
/// let mut bf = BitField::new(137);
/// bf.set(1); bf.set(33); bf.set(95); bf.set(123);
/// assert_eq!(bf.select(0), Some(1));
/// assert_eq!(bf.select(2), Some(95));
/// assert_eq!(bf.select(4), None);
/// ```
pub trait Select: BitVec {
    /// Returns the index of the set bit of rank `rank`, or [`None`] if there is no such bit.
    fn select(&self, rank: usize) -> Option<usize>;
}

/// Select queries on the unset bits of a binary array.
///
/// # Example
///
/// ```
/// use wavelet_sds::bit_field::BitField;
/// use wavelet_sds::ops::SelectZero;
///
/// let mut bf = BitField::new(5);
/// bf.set(0); bf.set(2);
/// assert_eq!(bf.select_zero(0), Some(1));
/// assert_eq!(bf.select_zero(2), Some(4));
/// assert_eq!(bf.select_zero(3), None);
/// ```
pub trait SelectZero: BitVec {
    /// Returns the index of the unset bit of rank `rank`, or [`None`] if there is no such bit.
    fn select_zero(&self, rank: usize) -> Option<usize>;
}

//-----------------------------------------------------------------------------
