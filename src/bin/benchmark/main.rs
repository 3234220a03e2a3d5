use wavelet_sds::ops::{BitVec, Rank, Select};
use wavelet_sds::rrr::{Params, RRRField};
use wavelet_sds::wavelet_tree::WaveletTree;

use std::time::Instant;
use std::{env, process};

use getopts::Options;

mod utils;

//-----------------------------------------------------------------------------

fn main() {
    let config = Config::new();

    println!("Generating a random 2^{}-bit BitField", config.bit_len);
    let bf = utils::random_field(1usize << config.bit_len);
    println!("Ones:     {} (density {:.6})", bf.popcount(), (bf.popcount() as f64) / (bf.len() as f64));
    println!();

    println!("Building an RRRField with {}-bit blocks and {}-block superblocks", config.params.block_size(), config.params.superblock_size());
    let now = Instant::now();
    let rrr = RRRField::with_params(&bf, config.params);
    utils::report_construction(now.elapsed(), rrr.len());
    println!("Index:    {}", utils::bit_size(rrr.index_bits(), rrr.len()));
    println!("Patterns: {}", rrr.patterns());
    println!();

    println!("Generating {} random rank queries over the field", config.queries);
    let rank_queries = utils::generate_queries(config.queries, rrr.len());
    println!();

    println!("Generating {} random select queries over the field", config.queries);
    let select_queries = utils::generate_queries(config.queries, rrr.count_ones());
    println!();

    independent_rank(&rrr, &rank_queries, "RRRField");
    chained_rank(&rrr, &rank_queries, "RRRField");
    independent_select(&rrr, &select_queries, "RRRField");
    drop(rrr);
    drop(bf);

    let len = 1usize << config.bit_len;
    println!("Generating a random sequence of length 2^{} over an alphabet of size {}", config.bit_len, config.sigma);
    let symbols = utils::random_sequence(len, config.sigma);
    let alphabet: Vec<usize> = (0..config.sigma).collect();
    println!();

    println!("Building a WaveletTree");
    let now = Instant::now();
    let wt = WaveletTree::with_params(&alphabet, &symbols, config.params);
    utils::report_construction(now.elapsed(), wt.len());
    println!("Nodes:    {}", wt.nodes());
    println!("Bits:     {}", utils::bit_size(wt.size(), wt.len()));
    println!("Index:    {}", utils::bit_size(wt.index_bits(), wt.len()));
    println!();
    drop(symbols);

    println!("Generating {} random symbol queries over the sequence", config.queries);
    let access_queries = utils::generate_queries(config.queries, wt.len());
    let rank_queries = utils::generate_symbol_queries(config.queries, wt.len() + 1, config.sigma);
    let select_queries = utils::generate_symbol_queries(config.queries, wt.len() / config.sigma + 1, config.sigma);
    println!();

    wavelet_access(&wt, &access_queries);
    wavelet_rank(&wt, &rank_queries);
    wavelet_select(&wt, &select_queries);

    utils::report_memory_usage();
}

//-----------------------------------------------------------------------------

pub struct Config {
    pub bit_len: usize,
    pub sigma: usize,
    pub queries: usize,
    pub params: Params,
}

impl Config {
    const BIT_LEN: usize = 24;
    const SIGMA: usize = 256;
    const QUERIES: usize = 1_000_000;

    pub fn new() -> Config {
        let args: Vec<String> = env::args().collect();
        let program = args[0].clone();

        let mut opts = Options::new();
        opts.optopt("n", "len", &format!("use inputs of length 2^INT (default {})", Self::BIT_LEN), "INT");
        opts.optopt("s", "sigma", &format!("alphabet size (default {})", Self::SIGMA), "INT");
        opts.optopt("q", "queries", &format!("number of queries (default {})", Self::QUERIES), "INT");
        opts.optopt("b", "block-size", &format!("rank index block size in bits (default {})", Params::BLOCK_SIZE), "INT");
        opts.optopt("S", "superblock-size", &format!("rank index superblock size in blocks (default {})", Params::SUPERBLOCK_SIZE), "INT");
        opts.optflag("h", "help", "print this help");
        let matches = match opts.parse(&args[1..]) {
            Ok(m) => m,
            Err(f) => {
                eprintln!("{}", f);
                process::exit(1);
            }
        };

        if matches.opt_present("h") {
            let header = format!("Usage: {} [options]", program);
            print!("{}", opts.usage(&header));
            process::exit(0);
        }

        let bit_len = Self::parse(&matches, "n", "len", Self::BIT_LEN);
        if bit_len == 0 || bit_len > 40 {
            eprintln!("Invalid length: 2^{}", bit_len);
            process::exit(1);
        }
        let sigma = Self::parse(&matches, "s", "sigma", Self::SIGMA);
        if sigma == 0 {
            eprintln!("Invalid alphabet size: {}", sigma);
            process::exit(1);
        }
        let queries = Self::parse(&matches, "q", "queries", Self::QUERIES);
        if queries == 0 {
            eprintln!("Invalid query count: {}", queries);
            process::exit(1);
        }

        let block_size = Self::parse(&matches, "b", "block-size", Params::BLOCK_SIZE);
        let superblock_size = Self::parse(&matches, "S", "superblock-size", Params::SUPERBLOCK_SIZE);
        let params = match Params::new(block_size, superblock_size) {
            Ok(params) => params,
            Err(f) => {
                eprintln!("Invalid rank index parameters: {}", f);
                process::exit(1);
            },
        };

        Config {
            bit_len,
            sigma,
            queries,
            params,
        }
    }

    fn parse(matches: &getopts::Matches, short: &str, long: &str, default: usize) -> usize {
        match matches.opt_str(short) {
            Some(s) => match s.parse::<usize>() {
                Ok(n) => n,
                Err(f) => {
                    eprintln!("--{}: {}", long, f);
                    process::exit(1);
                },
            },
            None => default,
        }
    }
}

//-----------------------------------------------------------------------------

fn independent_rank<T: Rank>(bv: &T, queries: &[usize], vector_type: &str) {
    println!("{} with {} independent rank queries", vector_type, queries.len());
    let now = Instant::now();
    let mut total = 0;
    for query in queries.iter() {
        total += bv.rank(*query);
    }
    utils::report_results(queries.len(), total, bv.count_ones(), now.elapsed());
}

fn chained_rank<T: Rank>(bv: &T, queries: &[usize], vector_type: &str) {
    println!("{} with {} chained rank queries", vector_type, queries.len());
    let now = Instant::now();
    let mut total = 0;
    let mut prev: usize = 0;
    for query in queries.iter() {
        let result = bv.rank((*query ^ prev) % bv.len());
        total += result;
        prev = result & 0xFFFF;
    }
    utils::report_results(queries.len(), total, bv.count_ones(), now.elapsed());
}

fn independent_select<T: Select>(bv: &T, queries: &[usize], vector_type: &str) {
    println!("{} with {} independent select queries", vector_type, queries.len());
    let now = Instant::now();
    let mut total = 0;
    for query in queries.iter() {
        if let Some(result) = bv.select(*query) {
            total += result;
        }
    }
    utils::report_results(queries.len(), total, bv.len(), now.elapsed());
}

//-----------------------------------------------------------------------------

fn wavelet_access(wt: &WaveletTree<usize>, queries: &[usize]) {
    println!("WaveletTree with {} access queries", queries.len());
    let now = Instant::now();
    let mut total = 0;
    for query in queries.iter() {
        if let Some(symbol) = wt.access(*query) {
            total += *symbol;
        }
    }
    utils::report_results(queries.len(), total, wt.alphabet().len(), now.elapsed());
}

fn wavelet_rank(wt: &WaveletTree<usize>, queries: &[(usize, usize)]) {
    println!("WaveletTree with {} rank queries", queries.len());
    let now = Instant::now();
    let mut total = 0;
    for (index, symbol) in queries.iter() {
        total += wt.rank(*index, symbol);
    }
    utils::report_results(queries.len(), total, wt.len(), now.elapsed());
}

fn wavelet_select(wt: &WaveletTree<usize>, queries: &[(usize, usize)]) {
    println!("WaveletTree with {} select queries", queries.len());
    let now = Instant::now();
    let mut total = 0;
    let mut found = 0;
    for (count, symbol) in queries.iter() {
        if let Some(result) = wt.select(*count, symbol) {
            total += result;
            found += 1;
        }
    }
    println!("Found:    {} / {}", found, queries.len());
    utils::report_results(queries.len(), total, wt.len(), now.elapsed());
}

//-----------------------------------------------------------------------------
