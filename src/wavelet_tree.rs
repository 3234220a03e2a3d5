//! An immutable sequence of symbols supporting rank and select queries.
//!
//! The wavelet tree was first described in:
//!
//! > Grossi, Gupta, Vitter: High-order entropy-compressed text indexes.
//! > SODA 2003.
//!
//! Each node of the tree covers a contiguous range of the alphabet and stores a bit for each symbol routed to it.
//! The range is split at the midpoint: symbols in the left half get bit `0` and continue to the left child, while symbols in the right half get bit `1` and continue to the right child.
//! A half containing a single symbol is an implicit leaf.
//!
//! Rank and access queries proceed down from the root.
//! If the query follows bit `b` at a node, position `i` at the node maps to position `rank_b(i)` in the child.
//! Select queries go up from the deepest node on the path of the symbol and map a rank in the child to a position in the parent.
//! Each node answers its binary queries with an [`RRRField`] built over its bits.
//!
//! # Examples
//!
//! Counting the occurrences of each symbol and finding the shortest prefix containing every symbol:
//!
//! ```
//! use wavelet_sds::wavelet_tree::WaveletTree;
//!
//! let alphabet = vec!["a", "b", "c"];
//! let symbols = vec!["a", "a", "b", "a", "b", "c", "a"];
//! let wt = WaveletTree::new(&alphabet, &symbols);
//!
//! let counts: Vec<usize> = alphabet.iter().map(|c| wt.rank(symbols.len(), c)).collect();
//! assert_eq!(counts, vec![4, 2, 1]);
//!
//! let shortest = alphabet.iter().filter_map(|c| wt.select(1, c)).max().unwrap();
//! assert_eq!(&symbols[..shortest], &["a", "a", "b", "a", "b", "c"]);
//! ```

use crate::bit_field::BitField;
use crate::ops::{BitVec, Rank, Select, SelectZero};
use crate::rrr::{Params, RRRField};

use std::collections::HashMap;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::cmp;

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

/// An immutable sequence over an arbitrary alphabet, supporting rank and select queries.
///
/// The alphabet is an ordered list of distinct symbols given at construction.
/// Symbols that are not in the alphabet are dropped from the sequence, and queries for them never find anything.
/// If the alphabet contains duplicates, only the first occurrence of each symbol is used.
///
/// The tree is stored as an arena of nodes.
/// With an alphabet of size `sigma >= 2`, the total number of bits in the nodes is between `floor(log2(sigma)) * n` and `ceil(log2(sigma)) * n`, where `n` is the length of the sequence.
///
/// # Examples
///
/// ```
/// use wavelet_sds::wavelet_tree::WaveletTree;
///
/// let alphabet: Vec<char> = "pleasure".chars().collect();
/// let symbols: Vec<char> = "It was a pleasure to burn.".chars().collect();
/// let wt = WaveletTree::new(&alphabet, &symbols);
///
/// let kept: String = wt.iter().collect();
/// assert_eq!(kept, "asapleasureur");
/// assert_eq!(wt.len(), 13);
///
/// assert_eq!(wt.rank(wt.len(), &'a'), 3);
/// assert_eq!(wt.rank(4, &'a'), 2);
/// assert_eq!(wt.rank(wt.len(), &'x'), 0);
///
/// assert_eq!(wt.alphabet().len(), 7);
/// assert_eq!(wt.select(2, &'s'), Some(8));
/// assert_eq!(wt.select(3, &'s'), None);
/// assert_eq!(wt.access(3), Some(&'p'));
/// ```
#[derive(Clone, Debug)]
pub struct WaveletTree<T> {
    alphabet: Vec<T>,
    codes: HashMap<T, usize>,
    params: Params,
    nodes: Vec<Node>,
    root: usize,
}

// A node covering an alphabet range starting from `start`.
// Left half starts from `start` and right half from `mid`.
#[derive(Clone, Debug)]
struct Node {
    start: usize,
    mid: usize,
    data: BitField,
    rank: RRRField,
    left: Option<usize>,
    right: Option<usize>,
}

impl Node {
    // Returns the child and the first symbol code in the half selected by `bit`.
    #[inline]
    fn follow(&self, bit: bool) -> (Option<usize>, usize) {
        if bit { (self.right, self.mid) } else { (self.left, self.start) }
    }

    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    // Maps position `index` to the child selected by `bit`.
    #[inline]
    fn map_down(&self, index: usize, bit: bool) -> usize {
        if bit { self.rank.rank(index) } else { self.rank.complement_rank(index) }
    }

    // Maps `count` occurrences in the child selected by `bit` to a prefix length in this node.
    #[inline]
    fn map_up(&self, count: usize, bit: bool) -> Option<usize> {
        let position = if bit { self.rank.select(count - 1) } else { self.rank.select_zero(count - 1) };
        position.map(|pos| pos + 1)
    }
}

impl<T: Clone + Eq + Hash> WaveletTree<T> {
    /// Builds a wavelet tree for the symbols over the alphabet with the default rank index parameters.
    ///
    /// # Arguments
    ///
    /// * `alphabet`: Ordered list of distinct symbols.
    /// * `symbols`: The sequence.
    pub fn new(alphabet: &[T], symbols: &[T]) -> WaveletTree<T> {
        Self::with_params(alphabet, symbols, Params::default())
    }

    /// Builds a wavelet tree for the symbols over the alphabet, using the given parameters for the rank index in each node.
    ///
    /// # Arguments
    ///
    /// * `alphabet`: Ordered list of distinct symbols.
    /// * `symbols`: The sequence.
    /// * `params`: Rank index parameters.
    pub fn with_params(alphabet: &[T], symbols: &[T], params: Params) -> WaveletTree<T> {
        let mut unique: Vec<T> = Vec::with_capacity(alphabet.len());
        let mut codes: HashMap<T, usize> = HashMap::with_capacity(alphabet.len());
        for symbol in alphabet.iter() {
            if !codes.contains_key(symbol) {
                codes.insert(symbol.clone(), unique.len());
                unique.push(symbol.clone());
            }
        }

        // Unknown symbols are not routed anywhere.
        let routed: Vec<usize> = symbols.iter().filter_map(|symbol| codes.get(symbol).cloned()).collect();

        let mut nodes: Vec<Node> = Vec::new();
        let root = Self::build(&mut nodes, &routed, 0, unique.len(), params);

        WaveletTree {
            alphabet: unique,
            codes,
            params,
            nodes,
            root,
        }
    }

    // Builds the subtree for symbol codes in `start..end` and returns the index of its root.
    fn build(nodes: &mut Vec<Node>, symbols: &[usize], start: usize, end: usize, params: Params) -> usize {
        let mid = start + (end - start) / 2;
        let (build_left, build_right) = (mid - start > 1, end - mid > 1);

        let mut data = BitField::new(symbols.len());
        let mut left_symbols: Vec<usize> = Vec::new();
        let mut right_symbols: Vec<usize> = Vec::new();
        for (i, &code) in symbols.iter().enumerate() {
            if code < mid {
                if build_left {
                    left_symbols.push(code);
                }
            } else {
                data.set(i);
                if build_right {
                    right_symbols.push(code);
                }
            }
        }

        let left = if build_left { Some(Self::build(nodes, &left_symbols, start, mid, params)) } else { None };
        drop(left_symbols);
        let right = if build_right { Some(Self::build(nodes, &right_symbols, mid, end, params)) } else { None };
        drop(right_symbols);

        let rank = RRRField::with_params(&data, params);
        nodes.push(Node {
            start, mid,
            data, rank,
            left, right,
        });
        nodes.len() - 1
    }

    /// Returns the number of symbols in the sequence.
    ///
    /// Symbols that are not in the alphabet are not counted.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes[self.root].len()
    }

    /// Returns `true` if the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the alphabet without duplicates.
    #[inline]
    pub fn alphabet(&self) -> &[T] {
        &self.alphabet
    }

    /// Returns the rank index parameters used in the nodes.
    #[inline]
    pub fn params(&self) -> Params {
        self.params
    }

    /// Returns the number of nodes in the tree.
    #[inline]
    pub fn nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the total number of bits in the nodes.
    ///
    /// The rank indexes and the alphabet are not included.
    pub fn size(&self) -> usize {
        self.nodes.iter().map(|node| node.len()).sum()
    }

    /// Returns the total size of the rank indexes in bits.
    ///
    /// This counts the packed class and offset fields of each node.
    pub fn index_bits(&self) -> usize {
        self.nodes.iter().map(|node| node.rank.index_bits()).sum()
    }

    /// Returns the number of occurrences of `symbol` in the first `index` symbols of the sequence.
    ///
    /// If `index > self.len()`, the entire sequence is used.
    /// Returns `0` if the symbol is not in the alphabet.
    pub fn rank(&self, index: usize, symbol: &T) -> usize {
        let code = match self.codes.get(symbol) {
            Some(code) => *code,
            None => return 0,
        };

        let mut node = &self.nodes[self.root];
        let mut index = cmp::min(index, node.len());
        loop {
            let bit = code >= node.mid;
            index = node.map_down(index, bit);
            match node.follow(bit).0 {
                Some(child) => node = &self.nodes[child],
                None => return index,
            }
        }
    }

    /// Returns the length of the shortest prefix of the sequence containing `count` occurrences of `symbol`.
    ///
    /// Equivalently, the occurrence of rank `count - 1` is at position `result - 1`.
    /// Returns `Some(0)` if `count == 0` and [`None`] if the sequence contains fewer than `count` occurrences.
    pub fn select(&self, count: usize, symbol: &T) -> Option<usize> {
        if count == 0 {
            return Some(0);
        }
        let code = *self.codes.get(symbol)?;

        // Path from the root to the node where the symbol is a leaf.
        let mut path: Vec<(&Node, bool)> = Vec::new();
        let mut node = &self.nodes[self.root];
        loop {
            let bit = code >= node.mid;
            path.push((node, bit));
            match node.follow(bit).0 {
                Some(child) => node = &self.nodes[child],
                None => break,
            }
        }

        let mut count = count;
        for (node, bit) in path.iter().rev() {
            count = node.map_up(count, *bit)?;
        }
        Some(count)
    }

    /// Returns the symbol at position `index`, or [`None`] if the position is out of bounds.
    pub fn access(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }

        let mut node = &self.nodes[self.root];
        let mut index = index;
        loop {
            let bit = node.rank.get(index);
            let (child, first) = node.follow(bit);
            match child {
                Some(child) => {
                    index = node.map_down(index, bit);
                    node = &self.nodes[child];
                },
                None => return Some(&self.alphabet[first]),
            }
        }
    }

    /// Returns an iterator over the sequence.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            parent: self,
            cursors: vec![0; self.nodes.len()],
            next: 0,
            limit: self.len(),
        }
    }
}

//-----------------------------------------------------------------------------

/// An iterator over the symbols of a [`WaveletTree`].
///
/// The type of `Item` is `&T`.
/// The iterator keeps a cursor for each node, so each bit in the tree is visited once.
///
/// # Examples
///
/// ```
/// use wavelet_sds::wavelet_tree::WaveletTree;
///
/// let text = "Sing, Goddess, of the wrath of Achilles";
/// let symbols: Vec<char> = text.chars().collect();
/// let mut alphabet = symbols.clone();
/// alphabet.sort();
/// alphabet.dedup();
///
/// let wt = WaveletTree::new(&alphabet, &symbols);
/// assert_eq!(wt.iter().len(), symbols.len());
/// let rebuilt: String = wt.iter().collect();
/// assert_eq!(rebuilt, text);
/// ```
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    parent: &'a WaveletTree<T>,
    // Next unvisited position in each node.
    cursors: Vec<usize>,
    // The first position at the root we have not visited.
    next: usize,
    // Number of symbols in the sequence.
    limit: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.limit {
            return None;
        }

        let mut node = self.parent.root;
        loop {
            let current = &self.parent.nodes[node];
            let bit = current.data.test(self.cursors[node]);
            self.cursors[node] += 1;
            let (child, first) = current.follow(bit);
            match child {
                Some(child) => node = child,
                None => {
                    self.next += 1;
                    return Some(&self.parent.alphabet[first]);
                },
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.limit - self.next;
        (remaining, Some(remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T: Clone + Eq + Hash> IntoIterator for &'a WaveletTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//-----------------------------------------------------------------------------
