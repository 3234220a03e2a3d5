//! Low-level functions for bit manipulation.
//!
//! Bit fields in this crate store bits in arrays of `u64` words using the most significant bits first.
//! Bit `i` of a field is bit `63 - i % 64` of word `i / 64`.
//! Functions with `msb` in the name follow this convention, while plain integers use the usual one.

//-----------------------------------------------------------------------------

/// Number of bits in `u64`.
pub const WORD_BITS: usize = 64;

// Bit shift for transforming a bit offset into an array index.
const INDEX_SHIFT: usize = 6;

// Bit mask for transforming a bit offset into an offset in `u64`.
const OFFSET_MASK: usize = 0b111111;

// Masks for the bit-parallel popcount.
const M1: u64 = 0x5555_5555_5555_5555;
const M2: u64 = 0x3333_3333_3333_3333;
const M4: u64 = 0x0F0F_0F0F_0F0F_0F0F;
const M8: u64 = 0x00FF_00FF_00FF_00FF;
const M16: u64 = 0x0000_FFFF_0000_FFFF;
const M32: u64 = 0x0000_0000_FFFF_FFFF;

//-----------------------------------------------------------------------------

/// Returns an integer with the lowest `n` bits set.
///
/// # Examples
///
/// ```
/// use wavelet_sds::bits;
///
/// assert_eq!(bits::low_set(13), 0x1FFF);
/// assert_eq!(bits::low_set(64), !0u64);
/// ```
///
/// # Panics
///
/// Panics if `n > 64`.
#[inline]
pub fn low_set(n: usize) -> u64 {
    assert!(n <= WORD_BITS, "low_set: {} bits requested", n);
    if n == WORD_BITS { !0u64 } else { (1u64 << n) - 1 }
}

/// Returns an integer with the highest `n` bits set.
///
/// # Examples
///
/// ```
/// use wavelet_sds::bits;
///
/// assert_eq!(bits::high_set(13), 0xFFF8_0000_0000_0000);
/// assert_eq!(bits::high_set(0), 0);
/// ```
///
/// # Panics
///
/// Panics if `n > 64`.
#[inline]
pub fn high_set(n: usize) -> u64 {
    assert!(n <= WORD_BITS, "high_set: {} bits requested", n);
    if n == 0 { 0 } else { !0u64 << (WORD_BITS - n) }
}

/// Returns the length of the binary representation of integer `n`.
///
/// # Examples
///
/// ```
/// use wavelet_sds::bits;
///
/// assert_eq!(bits::bit_len(0), 1);
/// assert_eq!(bits::bit_len(0x1FFF), 13);
/// ```
#[inline]
pub fn bit_len(n: u64) -> usize {
    match n {
        0 => 1,
        _ => WORD_BITS - (n.leading_zeros() as usize),
    }
}

/// Returns the number of bits needed for storing any value in `0..n`, or `ceil(log2(n))`.
///
/// # Examples
///
/// ```
/// use wavelet_sds::bits;
///
/// assert_eq!(bits::need_bits(1), 0);
/// assert_eq!(bits::need_bits(17), 5);
/// assert_eq!(bits::need_bits(70), 7);
/// ```
#[inline]
pub fn need_bits(n: u64) -> usize {
    if n <= 1 { 0 } else { bit_len(n - 1) }
}

/// Returns the binomial coefficient `C(n, k)`, or [`None`] if it does not fit in `u64`.
///
/// # Examples
///
/// ```
/// use wavelet_sds::bits;
///
/// assert_eq!(bits::binomial(8, 4), Some(70));
/// assert_eq!(bits::binomial(3, 5), Some(0));
/// assert_eq!(bits::binomial(64, 32), Some(1_832_624_140_942_590_534));
/// ```
pub fn binomial(n: u64, k: u64) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = if k > n - k { n - k } else { k };
    let mut result: u128 = 1;
    for i in 0..k {
        // The product of `i + 1` consecutive integers is divisible by `(i + 1)!`.
        result = result.checked_mul((n - i) as u128)? / ((i + 1) as u128);
    }
    if result > u64::MAX as u128 { None } else { Some(result as u64) }
}

//-----------------------------------------------------------------------------

/// Returns the number of set bits in the integer.
///
/// The count is computed with a bit-parallel reduction: adjacent groups of 1, 2, 4, 8, 16, and 32 bits are summed in place.
///
/// # Examples
///
/// ```
/// use wavelet_sds::bits;
///
/// assert_eq!(bits::popcount(0), 0);
/// assert_eq!(bits::popcount(0b1011_0001), 4);
/// assert_eq!(bits::popcount(!0u64), 64);
/// ```
#[inline]
pub fn popcount(n: u64) -> usize {
    let mut x = (n & M1) + ((n >> 1) & M1);
    x = (x & M2) + ((x >> 2) & M2);
    x = (x & M4) + ((x >> 4) & M4);
    x = (x & M8) + ((x >> 8) & M8);
    x = (x & M16) + ((x >> 16) & M16);
    x = (x & M32) + (x >> 32);
    x as usize
}

/// Returns the offset from the most significant bit of the set bit of specified rank.
///
/// Returns `64` if `rank >= popcount(n)`.
///
/// # Arguments
///
/// * `n`: An integer.
/// * `rank`: Rank of the set bit we want to find.
///
/// # Examples
///
/// ```
/// use wavelet_sds::bits;
///
/// let n = 0x8400_0000_0000_0001;
/// assert_eq!(bits::select_msb(n, 0), 0);
/// assert_eq!(bits::select_msb(n, 1), 5);
/// assert_eq!(bits::select_msb(n, 2), 63);
/// assert_eq!(bits::select_msb(n, 3), 64);
/// ```
pub fn select_msb(n: u64, rank: usize) -> usize {
    let mut n = n;
    let mut rank = rank;
    while n != 0 {
        let offset = n.leading_zeros() as usize;
        if rank == 0 {
            return offset;
        }
        rank -= 1;
        n &= !(1u64 << (WORD_BITS - 1 - offset));
    }
    WORD_BITS
}

//-----------------------------------------------------------------------------

/// Returns the number of integers of type `u64` required to store `n` bits.
///
/// # Examples
///
/// ```
/// use wavelet_sds::bits;
///
/// assert_eq!(bits::bits_to_words(64), 1);
/// assert_eq!(bits::bits_to_words(65), 2);
/// ```
#[inline]
pub fn bits_to_words(n: usize) -> usize {
    (n + WORD_BITS - 1) / WORD_BITS
}

/// Splits a bit offset into an index in an array of `u64` and an offset within the integer.
///
/// The offset within the integer is counted from the most significant bit.
///
/// # Examples
///
/// ```
/// use wavelet_sds::bits;
///
/// assert_eq!(bits::split_offset(123), (1, 59));
/// ```
#[inline]
pub fn split_offset(bit_offset: usize) -> (usize, usize) {
    (bit_offset >> INDEX_SHIFT, bit_offset & OFFSET_MASK)
}

//-----------------------------------------------------------------------------

/// Reads `width` bits starting from `bit_offset` and returns them as an integer, with the first bit as the most significant one.
///
/// # Examples
///
/// ```
/// use wavelet_sds::bits;
///
/// let array: Vec<u64> = vec![0x0000_0000_0000_000F, 0xA000_0000_0000_0000];
/// assert_eq!(bits::read_msb(&array, 60, 4), 0xF);
/// assert_eq!(bits::read_msb(&array, 62, 5), 0b11101);
/// assert_eq!(bits::read_msb(&array, 0, 0), 0);
/// ```
///
/// # Panics
///
/// Panics if `width > 64` or the bits are not in the array.
pub fn read_msb(array: &[u64], bit_offset: usize, width: usize) -> u64 {
    if width == 0 {
        return 0;
    }
    assert!(width <= WORD_BITS, "read_msb: invalid width {}", width);

    let (index, offset) = split_offset(bit_offset);
    let mut combined = array[index] << offset;
    if offset + width > WORD_BITS {
        combined |= array[index + 1] >> (WORD_BITS - offset);
    }
    combined >> (WORD_BITS - width)
}

/// Writes the lowest `width` bits of `value` starting from `bit_offset`, with the most significant bit first.
///
/// Other bits in the array are not changed.
///
/// # Examples
///
/// ```
/// use wavelet_sds::bits;
///
/// let mut array: Vec<u64> = vec![0; 2];
/// bits::write_msb(&mut array, 62, 0b11101, 5);
/// assert_eq!(array[0], 0b11);
/// assert_eq!(array[1], 0xA000_0000_0000_0000);
/// ```
///
/// # Panics
///
/// Panics if `width > 64` or the bits are not in the array.
pub fn write_msb(array: &mut [u64], bit_offset: usize, value: u64, width: usize) {
    if width == 0 {
        return;
    }
    let value = value & low_set(width);
    let (index, offset) = split_offset(bit_offset);

    if offset + width <= WORD_BITS {
        let shift = WORD_BITS - offset - width;
        array[index] = (array[index] & !(low_set(width) << shift)) | (value << shift);
    } else {
        let tail = offset + width - WORD_BITS;
        array[index] = (array[index] & high_set(offset)) | (value >> tail);
        array[index + 1] = (array[index + 1] & low_set(WORD_BITS - tail)) | ((value & low_set(tail)) << (WORD_BITS - tail));
    }
}

//-----------------------------------------------------------------------------


//-----------------------------------------------------------------------------
