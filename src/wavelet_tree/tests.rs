use super::*;

use crate::internal;

use rand::Rng;

//-----------------------------------------------------------------------------

fn split(text: &str) -> Vec<String> {
    text.chars().map(|c| c.to_string()).collect()
}

// Sorted distinct characters of the text.
fn alphabetize(text: &str) -> Vec<String> {
    let mut result = split(text);
    result.sort();
    result.dedup();
    result
}

fn s(symbol: &str) -> String {
    symbol.to_string()
}

fn check_tree<T: Clone + Eq + Hash + std::fmt::Debug>(wt: &WaveletTree<T>, truth: &[T]) {
    assert_eq!(wt.len(), truth.len(), "Invalid sequence length");
    assert_eq!(wt.is_empty(), truth.is_empty(), "Invalid emptiness");
    assert_eq!(wt.iter().len(), truth.len(), "Invalid iterator length");
    assert!(wt.iter().eq(truth.iter()), "Invalid sequence from the iterator");
    for (i, symbol) in truth.iter().enumerate() {
        assert_eq!(wt.access(i), Some(symbol), "Invalid access({})", i);
    }
    assert_eq!(wt.access(truth.len()), None, "Got a symbol past the end");

    for symbol in wt.alphabet().iter() {
        for i in 0..=truth.len() {
            assert_eq!(wt.rank(i, symbol), internal::naive_rank(truth, i, symbol), "Invalid rank({}, {:?})", i, symbol);
        }
        let occurrences = internal::naive_rank(truth, truth.len(), symbol);
        for count in 0..=(occurrences + 1) {
            assert_eq!(wt.select(count, symbol), internal::naive_select(truth, count, symbol), "Invalid select({}, {:?})", count, symbol);
        }
    }
}

//-----------------------------------------------------------------------------

#[test]
fn rebuild() {
    let text = "Sing, Goddess, of the wrath of Achilles";
    let symbols = split(text);
    let wt = WaveletTree::new(&alphabetize(text), &symbols);
    let rebuilt: String = wt.iter().map(|x| x.as_str()).collect();
    assert_eq!(rebuilt, text, "Could not rebuild the input");
    check_tree(&wt, &symbols);
}

#[test]
fn missing_alphabet_symbols() {
    let alphabet = split("pleasure");
    let wt = WaveletTree::new(&alphabet, &split("It was a pleasure to burn."));
    let rebuilt: String = wt.iter().map(|x| x.as_str()).collect();
    assert_eq!(rebuilt, "asapleasureur", "Invalid sequence after dropping unknown symbols");
    assert_eq!(wt.alphabet().len(), 7, "Duplicate symbols in the alphabet");
    assert_eq!(wt.alphabet()[..4], alphabet[..4], "Alphabet order was not preserved");
    check_tree(&wt, &split("asapleasureur"));
}

#[test]
fn all_symbols_dropped() {
    let wt = WaveletTree::new(&[s("a")], &[s("b"), s("b"), s("b")]);
    assert!(wt.is_empty(), "Unknown symbols were stored");
    assert_eq!(wt.size(), 0, "Nonzero size for an empty tree");
    assert_eq!(wt.rank(3, &s("b")), 0, "Found an unknown symbol");
    assert_eq!(wt.rank(3, &s("a")), 0, "Found a symbol that was not in the input");
    assert_eq!(wt.select(1, &s("a")), None, "Selected a symbol that was not in the input");
    assert_eq!(wt.iter().next(), None, "Got a symbol from an empty tree");
}

#[test]
fn rank_in_text() {
    let text = "I'll make my report as if I told a story, for I was taught as a child on my homeworld that Truth is a matter of the imagination.";
    let wt = WaveletTree::new(&alphabetize(text), &split(text));
    let cases = [(1, "I", 1), (2, "'", 1), (3, "l", 1), (4, "l", 2), (0, "l", 0), (text.len(), "r", 7)];
    for &(index, symbol, expected) in cases.iter() {
        assert_eq!(wt.rank(index, &s(symbol)), expected, "Invalid rank({}, {})", index, symbol);
    }
    assert_eq!(wt.rank(text.len() + 100, &s("r")), 7, "rank() did not clamp the index");
    assert_eq!(wt.rank(text.len(), &s("z")), 0, "Found a symbol outside the alphabet");
}

#[test]
fn unknown_symbols() {
    let wt = WaveletTree::new(&split("ab"), &split("c000000"));
    assert_eq!(wt.rank(7, &s("a")), 0, "Found a symbol that was not in the input");
    assert_eq!(wt.rank(7, &s("c")), 0, "Found a symbol outside the alphabet");
    assert_eq!(wt.select(0, &s("c")), Some(0), "Invalid select(0) for an unknown symbol");
    assert_eq!(wt.select(1, &s("c")), None, "Selected a symbol outside the alphabet");
}

#[test]
fn counts_and_prefixes() {
    let alphabet = vec![s("a"), s("b"), s("c")];
    let symbols: Vec<String> = ["a", "a", "b", "a", "b", "c", "a"].iter().map(|x| s(x)).collect();
    let wt = WaveletTree::new(&alphabet, &symbols);

    assert_eq!(wt.rank(7, &s("a")), 4, "Invalid count for a");
    assert_eq!(wt.rank(7, &s("b")), 2, "Invalid count for b");
    assert_eq!(wt.rank(7, &s("c")), 1, "Invalid count for c");

    assert_eq!(wt.select(1, &s("a")), Some(1), "Invalid prefix for the first a");
    assert_eq!(wt.select(1, &s("b")), Some(3), "Invalid prefix for the first b");
    assert_eq!(wt.select(1, &s("c")), Some(6), "Invalid prefix for the first c");
    assert_eq!(wt.select(4, &s("a")), Some(7), "Invalid prefix for the last a");
    assert_eq!(wt.select(2, &s("c")), None, "Found a second c");
    check_tree(&wt, &symbols);
}

#[test]
fn size_bounds() {
    let text = "Far out in the uncharted backwaters of the unfashionable end of the western spiral arm of the Galaxy lies a small unregarded yellow sun.";
    let alphabet = alphabetize(text);
    let wt = WaveletTree::new(&alphabet, &split(text));

    let log2 = (alphabet.len() as f64).log2();
    let upper = (log2.ceil() as usize) * text.len();
    let lower = (log2.floor() as usize) * text.len();
    assert!(wt.size() <= upper, "Size {} exceeds the upper bound {}", wt.size(), upper);
    assert!(wt.size() >= lower, "Size {} is below the lower bound {}", wt.size(), lower);
    assert_eq!(wt.nodes(), alphabet.len() - 1, "Invalid number of nodes");
}

#[test]
fn size_bounds_random() {
    let mut rng = rand::thread_rng();
    for sigma in 2..40 {
        let len = rng.gen::<usize>() % 500;
        let symbols = internal::random_sequence(len, sigma);
        let alphabet: Vec<usize> = (0..sigma).collect();
        let wt = WaveletTree::new(&alphabet, &symbols);

        let depth = sigma.next_power_of_two().trailing_zeros() as usize;
        let shallow = if sigma.is_power_of_two() { depth } else { depth - 1 };
        assert!(wt.size() <= depth * len, "Size {} too large with sigma {}", wt.size(), sigma);
        assert!(wt.size() >= shallow * len, "Size {} too small with sigma {}", wt.size(), sigma);
        assert_eq!(wt.nodes(), sigma - 1, "Invalid number of nodes with sigma {}", sigma);
    }
}

//-----------------------------------------------------------------------------

#[test]
fn empty_alphabet() {
    let alphabet: Vec<u32> = Vec::new();
    let wt = WaveletTree::new(&alphabet, &[1, 2, 3]);
    assert!(wt.is_empty(), "Stored symbols without an alphabet");
    assert_eq!(wt.nodes(), 1, "Invalid number of nodes without an alphabet");
    assert_eq!(wt.rank(3, &1), 0, "Found a symbol without an alphabet");
    assert_eq!(wt.select(1, &1), None, "Selected a symbol without an alphabet");
    assert_eq!(wt.access(0), None, "Accessed a symbol without an alphabet");
}

#[test]
fn unary_alphabet() {
    let symbols = vec!['x'; 45];
    let mut input = symbols.clone();
    input.insert(10, 'y');
    let wt = WaveletTree::new(&['x'], &input);
    assert_eq!(wt.size(), symbols.len(), "A unary alphabet should use one bit per symbol");
    for i in 0..=symbols.len() {
        assert_eq!(wt.rank(i, &'x'), i, "Invalid rank({})", i);
        assert_eq!(wt.select(i, &'x'), Some(i), "Invalid select({})", i);
    }
    assert_eq!(wt.select(symbols.len() + 1, &'x'), None, "Selected past the end");
    check_tree(&wt, &symbols);
}

#[test]
fn duplicate_alphabet() {
    let wt = WaveletTree::new(&['b', 'a', 'b', 'a', 'c'], &['a', 'b', 'c', 'c', 'a']);
    assert_eq!(wt.alphabet(), &['b', 'a', 'c'], "Invalid alphabet after removing duplicates");
    check_tree(&wt, &['a', 'b', 'c', 'c', 'a']);
}

#[test]
fn iterator() {
    let symbols = internal::random_sequence(333, 17);
    let alphabet: Vec<usize> = (0..17).collect();
    let wt = WaveletTree::new(&alphabet, &symbols);

    let mut iter = wt.iter();
    let mut remaining = symbols.len();
    assert_eq!(iter.size_hint(), (remaining, Some(remaining)), "Invalid initial size hint");
    while let Some(_) = iter.next() {
        remaining -= 1;
        assert_eq!(iter.len(), remaining, "Invalid remaining length");
    }
    assert_eq!(iter.next(), None, "Got a symbol after the end");

    let mut index = 0;
    for symbol in &wt {
        assert_eq!(*symbol, symbols[index], "Invalid symbol {} from into_iter()", index);
        index += 1;
    }
    assert_eq!(index, symbols.len(), "Invalid number of symbols from into_iter()");
}

#[test]
fn random_sequences() {
    let mut rng = rand::thread_rng();
    for &sigma in [2usize, 3, 4, 7, 16, 31, 100].iter() {
        let len = 1 + rng.gen::<usize>() % 400;
        let symbols = internal::random_sequence(len, sigma);
        let alphabet: Vec<usize> = (0..sigma).collect();
        let wt = WaveletTree::new(&alphabet, &symbols);
        check_tree(&wt, &symbols);
    }
}

#[test]
fn partial_alphabet() {
    // Only even symbols are in the alphabet, in decreasing order.
    let symbols = internal::random_sequence(500, 20);
    let alphabet: Vec<usize> = (0..20).rev().filter(|x| x % 2 == 0).collect();
    let wt = WaveletTree::new(&alphabet, &symbols);
    let kept: Vec<usize> = symbols.iter().cloned().filter(|x| x % 2 == 0).collect();
    check_tree(&wt, &kept);
    for odd in (1..20).step_by(2) {
        assert_eq!(wt.rank(wt.len(), &odd), 0, "Found a dropped symbol {}", odd);
    }
}

#[test]
fn custom_params() {
    let symbols = internal::random_sequence(777, 12);
    let alphabet: Vec<usize> = (0..12).collect();
    for &(block_size, superblock_size) in [(1usize, 1usize), (5, 3), (31, 2), (64, 16)].iter() {
        let params = Params::new(block_size, superblock_size).unwrap();
        let wt = WaveletTree::with_params(&alphabet, &symbols, params);
        assert_eq!(wt.params(), params, "Invalid parameters");
        assert!(wt.index_bits() > 0, "Empty rank indexes");
        check_tree(&wt, &symbols);
    }
}

#[test]
#[ignore]
fn large_tree() {
    let sigma = 1000;
    let symbols = internal::random_sequence(100_000, sigma);
    let alphabet: Vec<usize> = (0..sigma).collect();
    let wt = WaveletTree::new(&alphabet, &symbols);
    assert!(wt.iter().eq(symbols.iter()), "Invalid sequence from the iterator");

    let mut rng = rand::thread_rng();
    for _ in 0..1000 {
        let index = rng.gen::<usize>() % (symbols.len() + 1);
        let symbol = rng.gen::<usize>() % sigma;
        let expected = internal::naive_rank(&symbols, index, &symbol);
        assert_eq!(wt.rank(index, &symbol), expected, "Invalid rank({}, {})", index, symbol);
        if expected > 0 {
            assert_eq!(wt.select(expected, &symbol), internal::naive_select(&symbols, expected, &symbol), "Invalid select({}, {})", expected, symbol);
        }
    }
}

//-----------------------------------------------------------------------------
