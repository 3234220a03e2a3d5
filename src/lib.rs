//! # Succinct rank structures and wavelet trees
//!
//! This crate provides three layered structures:
//!
//! * [`bit_field::BitField`]: a fixed-length array of bits packed into 64-bit words.
//! * [`rrr::RRRField`]: an immutable compressed rank index over a bit field.
//! * [`wavelet_tree::WaveletTree`]: a sequence over an arbitrary alphabet supporting rank and select queries through binary rank indexes.
//!
//! The structures are pure data and perform no I/O.
//! Invalid construction parameters are reported as [`Error`], while out-of-bounds positions are programming errors and panic.
//!
//! # Notes
//!
//! * Bit `0` of a field is the most significant bit of the first word.
//! * Things may not work if `usize` is not 64-bit.

pub mod bit_field;
pub mod bits;
pub mod error;
pub mod ops;
pub mod rrr;
pub mod wavelet_tree;

pub use crate::error::{Error, Result};

#[cfg(test)]
mod internal;
