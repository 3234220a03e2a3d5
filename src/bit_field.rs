//! A fixed-length bag of bits packed into 64-bit words.
//!
//! Bit `0` of the field is the most significant bit of the first word.
//! The field can be mutated bit by bit, while resizing and extracting parts always produce a new field.

use crate::ops::{BitVec, Rank, Select, SelectZero};
use crate::bits;

use std::iter::{DoubleEndedIterator, ExactSizeIterator, FusedIterator, FromIterator};
use std::cmp;


//-----------------------------------------------------------------------------

/// A fixed-length array of bits based on [`Vec`] of `u64` values.
///
/// Bit `i` is stored in word `i / 64` at offset `i % 64` from the most significant bit.
/// Integers read from or written to the field use the opposite order: bit `offset + i` of the field is bit `i` of the integer.
///
/// `BitField` implements the following `wavelet_sds` traits:
/// * Basic functionality: [`BitVec`]
/// * Queries: [`Rank`], [`Select`], [`SelectZero`]
///
/// The queries scan the words of the field.
/// Use [`crate::rrr::RRRField`] for a compressed index with faster rank queries.
///
/// # Examples
///
/// ```
/// use wavelet_sds::bit_field::BitField;
///
/// let mut bf = BitField::new(17);
/// bf.set(0); bf.set(9); bf.set(16);
/// assert_eq!(bf.len(), 17);
/// assert!(bf.test(9));
/// assert_eq!(bf.popcount(), 3);
///
/// bf.unset(9);
/// assert!(!bf.test(9));
///
/// let sub = bf.sub(8, 17);
/// assert_eq!(sub.len(), 9);
/// assert!(sub.test(8));
///
/// let bf = BitField::from_int(17, 0x1_2345);
/// assert_eq!(bf.to_int(17), 0x1_2345);
/// ```
///
/// # Notes
///
/// * The unused part of the last word is always set to `0`.
/// * Each field owns its storage; [`BitField::resize`], [`BitField::sub`], and [`BitField::copy_bits`] never share it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitField {
    len: usize,
    data: Vec<u64>,
}

impl BitField {
    /// Creates a field of `len` bits, all of them unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavelet_sds::bit_field::BitField;
    ///
    /// let bf = BitField::new(137);
    /// assert_eq!(bf.len(), 137);
    /// assert_eq!(bf.popcount(), 0);
    /// ```
    pub fn new(len: usize) -> BitField {
        BitField {
            len,
            data: vec![0; bits::bits_to_words(len)],
        }
    }

    /// Creates a field of `len` bits from an integer.
    ///
    /// Bit `i` of the field becomes bit `i` of `value`.
    /// If `len > 64`, the remaining bits are unset.
    /// Bits of `value` beyond `len` are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavelet_sds::bit_field::BitField;
    ///
    /// let bf = BitField::from_int(5, 0b00110);
    /// assert!(!bf.test(0));
    /// assert!(bf.test(1));
    /// assert!(bf.test(2));
    /// assert_eq!(bf.to_int(5), 6);
    /// ```
    pub fn from_int(len: usize, value: u64) -> BitField {
        let mut result = BitField::new(len);
        result.set_int(0, value, cmp::min(len, bits::WORD_BITS));
        result
    }

    /// Creates a field from bytes, with 8 bits per byte and the most significant bit of each byte first.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavelet_sds::bit_field::BitField;
    ///
    /// let bf = BitField::from_bytes(&[0x80, 0x01]);
    /// assert_eq!(bf.len(), 16);
    /// assert!(bf.test(0));
    /// assert!(bf.test(15));
    /// assert_eq!(bf.popcount(), 2);
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> BitField {
        let mut result = BitField::new(bytes.len() * 8);
        for (i, byte) in bytes.iter().enumerate() {
            bits::write_msb(&mut result.data, i * 8, *byte as u64, 8);
        }
        result
    }

    /// Returns the length of the field in bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the field is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets the bit at position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn set(&mut self, index: usize) {
        let (word, mask) = self.locate(index);
        self.data[word] |= mask;
    }

    /// Unsets the bit at position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn unset(&mut self, index: usize) {
        let (word, mask) = self.locate(index);
        self.data[word] &= !mask;
    }

    /// Returns `true` if the bit at position `index` is set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn test(&self, index: usize) -> bool {
        let (word, mask) = self.locate(index);
        self.data[word] & mask != 0
    }

    /// Appends a bit to the end of the field.
    pub fn push_bit(&mut self, bit: bool) {
        let (index, _) = bits::split_offset(self.len);
        if index == self.data.len() {
            self.data.push(0);
        }
        self.len += 1;
        if bit {
            self.set(self.len - 1);
        }
    }

    /// Returns a copy of the field resized to `new_len` bits.
    ///
    /// Bits `0..min(self.len(), new_len)` are preserved.
    /// New bits are unset, and truncated bits do not survive in the unused part of the last word.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavelet_sds::bit_field::BitField;
    ///
    /// let mut bf = BitField::new(2);
    /// bf.set(0); bf.set(1);
    /// let bf = bf.resize(1).resize(2);
    /// assert!(bf.test(0));
    /// assert!(!bf.test(1));
    /// ```
    pub fn resize(&self, new_len: usize) -> BitField {
        let mut result = BitField::new(new_len);
        let words = cmp::min(self.data.len(), result.data.len());
        result.data[..words].copy_from_slice(&self.data[..words]);
        result.clear_unused_bits();
        result
    }

    /// Returns a new field containing bits `left..right` of this field.
    ///
    /// `right` is clamped to the length of the field.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavelet_sds::bit_field::BitField;
    ///
    /// let mut bf = BitField::new(3);
    /// bf.set(0); bf.set(1);
    /// let sub = bf.sub(1, 99);
    /// assert_eq!(sub.len(), 2);
    /// assert!(sub.test(0));
    /// assert!(!sub.test(1));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `left > min(right, self.len())`.
    pub fn sub(&self, left: usize, right: usize) -> BitField {
        let right = cmp::min(right, self.len);
        assert!(left <= right, "BitField::sub: invalid range {}..{} for length {}", left, right, self.len);
        let mut result = BitField::new(right - left);
        result.copy_from(0, self, left, right - left);
        result
    }

    /// Returns a copy of this field with `len` bits from the start of `source` written to offset `start`.
    ///
    /// If `start + len > self.len()`, the copy is extended first.
    /// Bits between the old end of the field and `start` are unset.
    /// `source` may be the same field as `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavelet_sds::bit_field::BitField;
    ///
    /// let mut bf = BitField::new(5);
    /// bf.set(0); bf.set(2);
    /// let bf = bf.copy_bits(&bf, bf.len(), bf.len());
    /// assert_eq!(bf.len(), 10);
    /// assert!(bf.test(5));
    /// assert!(bf.test(7));
    /// assert_eq!(bf.popcount(), 4);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `len > source.len()`.
    pub fn copy_bits(&self, source: &BitField, start: usize, len: usize) -> BitField {
        assert!(len <= source.len(), "BitField::copy_bits: copying {} bits from a field of length {}", len, source.len());
        let mut result = if start + len > self.len { self.resize(start + len) } else { self.clone() };
        result.copy_from(start, source, 0, len);
        result
    }

    /// Returns the number of set bits in the field.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavelet_sds::bit_field::BitField;
    ///
    /// let bf: BitField = vec![true, false, true, true].into_iter().collect();
    /// assert_eq!(bf.popcount(), 3);
    /// ```
    pub fn popcount(&self) -> usize {
        self.data.iter().map(|word| bits::popcount(*word)).sum()
    }

    /// Returns the first `min(n, self.len(), 64)` bits as an integer, with bit `i` of the field as bit `i` of the integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavelet_sds::bit_field::BitField;
    ///
    /// let mut bf = BitField::new(100);
    /// bf.set(0); bf.set(65);
    /// assert_eq!(bf.to_int(1000), 1);
    /// ```
    pub fn to_int(&self, n: usize) -> u64 {
        let n = cmp::min(cmp::min(n, self.len), bits::WORD_BITS);
        self.get_int(0, n)
    }

    /// Reads a `width`-bit integer starting from `offset`.
    ///
    /// Bit `offset + i` of the field becomes bit `i` of the integer.
    ///
    /// # Panics
    ///
    /// Panics if `width > 64` or `offset + width > self.len()`.
    pub fn get_int(&self, offset: usize, width: usize) -> u64 {
        assert!(offset + width <= self.len, "BitField::get_int: bits {}..{} out of bounds for length {}", offset, offset + width, self.len);
        if width == 0 {
            return 0;
        }
        bits::read_msb(&self.data, offset, width).reverse_bits() >> (bits::WORD_BITS - width)
    }

    /// Writes the lowest `width` bits of `value` starting from `offset`.
    ///
    /// Bit `i` of the integer becomes bit `offset + i` of the field.
    ///
    /// # Panics
    ///
    /// Panics if `width > 64` or `offset + width > self.len()`.
    pub fn set_int(&mut self, offset: usize, value: u64, width: usize) {
        assert!(offset + width <= self.len, "BitField::set_int: bits {}..{} out of bounds for length {}", offset, offset + width, self.len);
        if width == 0 {
            return;
        }
        let value = (value & bits::low_set(width)).reverse_bits() >> (bits::WORD_BITS - width);
        bits::write_msb(&mut self.data, offset, value, width);
    }

    /// Returns an iterator over the bits of the field.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            parent: self,
            next: 0,
            limit: self.len,
        }
    }

    // Returns bits `offset..offset + width` with the first bit as the most significant one.
    pub(crate) fn read_raw(&self, offset: usize, width: usize) -> u64 {
        bits::read_msb(&self.data, offset, width)
    }

    // Writes bits `offset..offset + width` with the first bit as the most significant one.
    pub(crate) fn write_raw(&mut self, offset: usize, value: u64, width: usize) {
        bits::write_msb(&mut self.data, offset, value, width);
    }

    // Copies `len` bits from `source[source_offset..]` to `self[offset..]` one word at a time.
    fn copy_from(&mut self, offset: usize, source: &BitField, source_offset: usize, len: usize) {
        let mut copied = 0;
        while copied < len {
            let width = cmp::min(bits::WORD_BITS, len - copied);
            let value = source.read_raw(source_offset + copied, width);
            self.write_raw(offset + copied, value, width);
            copied += width;
        }
    }

    // Returns the word index and the mask for the bit.
    #[inline]
    fn locate(&self, index: usize) -> (usize, u64) {
        assert!(index < self.len, "BitField: index {} out of bounds for length {}", index, self.len);
        let (word, offset) = bits::split_offset(index);
        (word, 1u64 << (bits::WORD_BITS - 1 - offset))
    }

    // Unsets the bits after the end of the field in the last word.
    fn clear_unused_bits(&mut self) {
        let (index, offset) = bits::split_offset(self.len);
        if offset > 0 {
            self.data[index] &= bits::high_set(offset);
        }
    }
}

//-----------------------------------------------------------------------------

impl BitVec for BitField {
    fn len(&self) -> usize {
        self.len
    }

    // The field is mutable, so the count is not cached.
    fn count_ones(&self) -> usize {
        self.popcount()
    }

    fn get(&self, index: usize) -> bool {
        self.test(index)
    }
}

impl Rank for BitField {
    fn rank(&self, index: usize) -> usize {
        let index = cmp::min(index, self.len);
        let (word, offset) = bits::split_offset(index);
        let mut result: usize = self.data[..word].iter().map(|w| bits::popcount(*w)).sum();
        if offset > 0 {
            result += bits::popcount(self.data[word] & bits::high_set(offset));
        }
        result
    }
}

impl Select for BitField {
    fn select(&self, rank: usize) -> Option<usize> {
        let mut rank = rank;
        for (index, word) in self.data.iter().enumerate() {
            let ones = bits::popcount(*word);
            if rank < ones {
                return Some(index * bits::WORD_BITS + bits::select_msb(*word, rank));
            }
            rank -= ones;
        }
        None
    }
}

impl SelectZero for BitField {
    fn select_zero(&self, rank: usize) -> Option<usize> {
        if rank >= self.count_zeros() {
            return None;
        }
        // The unused bits at the end are never reached.
        let mut rank = rank;
        for (index, word) in self.data.iter().enumerate() {
            let zeros = bits::popcount(!*word);
            if rank < zeros {
                return Some(index * bits::WORD_BITS + bits::select_msb(!*word, rank));
            }
            rank -= zeros;
        }
        None
    }
}

//-----------------------------------------------------------------------------

/// A read-only iterator over [`BitField`].
///
/// The type of `Item` is `bool`.
///
/// # Examples
///
/// ```
/// use wavelet_sds::bit_field::BitField;
///
/// let source: Vec<bool> = vec![true, false, true, true, false, true, true, false];
/// let bf: BitField = source.iter().cloned().collect();
/// assert_eq!(bf.iter().len(), source.len());
/// for (index, value) in bf.iter().enumerate() {
///     assert_eq!(source[index], value);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    parent: &'a BitField,
    // The first index we have not visited.
    next: usize,
    // The first index we should not visit.
    limit: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.limit {
            None
        } else {
            let result = Some(self.parent.test(self.next));
            self.next += 1;
            result
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.limit - self.next;
        (remaining, Some(remaining))
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.next >= self.limit {
            None
        } else {
            self.limit -= 1;
            Some(self.parent.test(self.limit))
        }
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}

impl<'a> FusedIterator for Iter<'a> {}

impl<'a> IntoIterator for &'a BitField {
    type Item = bool;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<bool> for BitField {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut result = BitField::default();
        for bit in iter {
            result.push_bit(bit);
        }
        result
    }
}

//-----------------------------------------------------------------------------
