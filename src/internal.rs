// Utility functions for tests.

use crate::bit_field::BitField;
use crate::ops::{Rank, Select, SelectZero};

use rand::Rng;

use std::cmp;

//-----------------------------------------------------------------------------

// Returns a field of `len` random bits.
pub fn random_field(len: usize) -> BitField {
    random_field_with_density(len, 0.5)
}

// Returns a field of `len` bits, each of them set with probability `density`.
pub fn random_field_with_density(len: usize, density: f64) -> BitField {
    let mut rng = rand::thread_rng();
    let mut result = BitField::new(len);
    for i in 0..len {
        if rng.gen_bool(density) {
            result.set(i);
        }
    }
    result
}

// Returns `len` random symbols from `0..sigma`.
pub fn random_sequence(len: usize, sigma: usize) -> Vec<usize> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen::<usize>() % sigma).collect()
}

//-----------------------------------------------------------------------------

// Check rank queries against a linear scan over the truth field.
pub fn check_rank<T: Rank>(index: &T, truth: &BitField) {
    assert_eq!(index.len(), truth.len(), "Invalid length");
    let mut expected = 0;
    for i in 0..truth.len() {
        assert_eq!(index.rank(i), expected, "Invalid rank({})", i);
        if truth.test(i) {
            expected += 1;
        }
    }
    assert_eq!(index.rank(truth.len()), expected, "Invalid rank at the end");
    assert_eq!(index.rank(truth.len() + 1), expected, "Invalid rank past the end");
    assert_eq!(index.count_ones(), expected, "Invalid number of set bits");
}

// Check both select variants against the positions in the truth field.
pub fn check_select<T: Select + SelectZero>(index: &T, truth: &BitField) {
    let mut ones = 0;
    let mut zeros = 0;
    for i in 0..truth.len() {
        if truth.test(i) {
            assert_eq!(index.select(ones), Some(i), "Invalid select({})", ones);
            ones += 1;
        } else {
            assert_eq!(index.select_zero(zeros), Some(i), "Invalid select_zero({})", zeros);
            zeros += 1;
        }
    }
    assert_eq!(index.select(ones), None, "Found a set bit past the end");
    assert_eq!(index.select_zero(zeros), None, "Found an unset bit past the end");
}

//-----------------------------------------------------------------------------

// Number of occurrences of `symbol` in `sequence[..index]`.
pub fn naive_rank<T: PartialEq>(sequence: &[T], index: usize, symbol: &T) -> usize {
    let index = cmp::min(index, sequence.len());
    sequence[..index].iter().filter(|x| *x == symbol).count()
}

// Length of the shortest prefix of `sequence` with `count` occurrences of `symbol`.
pub fn naive_select<T: PartialEq>(sequence: &[T], count: usize, symbol: &T) -> Option<usize> {
    if count == 0 {
        return Some(0);
    }
    sequence.iter()
        .enumerate()
        .filter(|(_, x)| *x == symbol)
        .nth(count - 1)
        .map(|(i, _)| i + 1)
}

//-----------------------------------------------------------------------------
