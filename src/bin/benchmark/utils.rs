use wavelet_sds::bit_field::BitField;
use wavelet_sds::bits;

use std::time::Duration;

use rand::Rng;

//-----------------------------------------------------------------------------

pub fn random_field(len: usize) -> BitField {
    let mut result = BitField::new(len);
    let mut rng = rand::thread_rng();
    let mut offset = 0;
    while offset < len {
        let width = if len - offset < bits::WORD_BITS { len - offset } else { bits::WORD_BITS };
        result.set_int(offset, rng.gen(), width);
        offset += width;
    }
    result
}

pub fn random_sequence(len: usize, sigma: usize) -> Vec<usize> {
    let mut result: Vec<usize> = Vec::with_capacity(len);
    let mut rng = rand::thread_rng();
    for _ in 0..len {
        result.push(rng.gen::<usize>() % sigma);
    }
    result
}

pub fn generate_queries(n: usize, limit: usize) -> Vec<usize> {
    let mut result: Vec<usize> = Vec::with_capacity(n);
    let mut rng = rand::thread_rng();
    for _ in 0..n {
        let value = rng.gen::<usize>() % limit;
        result.push(value);
    }
    result
}

pub fn generate_symbol_queries(n: usize, limit: usize, sigma: usize) -> Vec<(usize, usize)> {
    let mut result: Vec<(usize, usize)> = Vec::with_capacity(n);
    let mut rng = rand::thread_rng();
    for _ in 0..n {
        result.push((rng.gen::<usize>() % limit, rng.gen::<usize>() % sigma));
    }
    result
}

//-----------------------------------------------------------------------------

pub fn readable_size(bytes: usize) -> (f64, &'static str) {
    let units: Vec<(f64, &'static str)> = vec![
        (1.0, "B"),
        (1024.0, "KiB"),
        (1024.0 * 1024.0, "MiB"),
        (1024.0 * 1024.0 * 1024.0, "GiB"),
        (1024.0 * 1024.0 * 1024.0 * 1024.0, "TiB"),
    ];

    let value = bytes as f64;
    let mut unit = 0;
    for i in 1..units.len() {
        if value >= units[i].0 {
            unit = i;
        } else {
            break;
        }
    }

    (value / units[unit].0, units[unit].1)
}

pub fn bit_size(bits: usize, len: usize) -> String {
    let (size, unit) = readable_size((bits + 7) / 8);
    let per_item = (bits as f64) / (len as f64);
    format!("{:.3} {} ({:.3} bits/item)", size, unit, per_item)
}

#[cfg(target_os = "linux")]
pub fn peak_memory_usage() -> Result<usize, &'static str> {
    unsafe {
        let mut rusage: libc::rusage = std::mem::zeroed();
        let retval = libc::getrusage(libc::RUSAGE_SELF, &mut rusage as *mut _);
        match retval {
            0 => Ok(rusage.ru_maxrss as usize * 1024),
            _ => Err("libc::getrusage call failed"),
        }
    }
}

#[cfg(target_os = "macos")]
pub fn peak_memory_usage() -> Result<usize, &'static str> {
    unsafe {
        let mut rusage: libc::rusage = std::mem::zeroed();
        let retval = libc::getrusage(libc::RUSAGE_SELF, &mut rusage as *mut _);
        match retval {
            0 => Ok(rusage.ru_maxrss as usize),
            _ => Err("libc::getrusage call failed"),
        }
    }
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
pub fn peak_memory_usage() -> Result<usize, &'static str> {
    Err("No peak_memory_usage implementation for this OS")
}

//-----------------------------------------------------------------------------

pub fn report_construction(duration: Duration, len: usize) {
    let ns = (duration.as_nanos() as f64) / (len as f64);
    println!("Built in {:.3} seconds ({:.1} ns/item)", duration.as_secs_f64(), ns);
}

pub fn report_results(queries: usize, total: usize, len: usize, duration: Duration) {
    let average = (total as f64) / (queries as f64);
    let normalized = average / (len as f64);
    let ns = (duration.as_nanos() as f64) / (queries as f64);
    println!("Time:     {:.3} seconds ({:.1} ns/query)", duration.as_secs_f64(), ns);
    println!("Average:  {:.0} absolute, {:.6} normalized", average, normalized);
    println!();
}

pub fn report_memory_usage() {
    match peak_memory_usage() {
        Ok(bytes) => {
            let (size, unit) = readable_size(bytes);
            println!("Peak memory usage: {:.3} {}", size, unit);
        },
        Err(f) => {
            println!("{}", f);
        },
    }
    println!();
}

//-----------------------------------------------------------------------------
