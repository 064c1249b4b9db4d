//! GATK-style interval list generation.
//!
//! Arithmetic windowing over chromosome sizes; no concurrency, no network.

use std::io::BufRead;

use crate::error::{Error, Result};

/// Generate 1-based GATK-style intervals (`chr:start-end`) from a genome
/// sizes file (`name<ws>size` per line).
///
/// Each reference is cut into windows of `window_size` plus a final
/// remainder window covering the tail. Blank lines are skipped.
pub fn generate_intervals<R: BufRead>(reader: R, window_size: u64) -> Result<Vec<String>> {
    let mut intervals = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (name, size) = match (fields.next(), fields.next()) {
            (Some(name), Some(size)) => (name, size),
            _ => return Err(Error::MalformedGenomeSizes(line.to_owned())),
        };
        let size: u64 = size
            .parse()
            .map_err(|_| Error::MalformedGenomeSizes(line.to_owned()))?;

        let windows = size / window_size;
        for i in 0..windows {
            let start = i * window_size + i + 1;
            let end = i * window_size + window_size + i + 1;
            intervals.push(format!("{name}:{start}-{end}"));
        }

        let start = windows * window_size + windows + 1;
        if start <= size {
            intervals.push(format!("{name}:{start}-{size}"));
        }
    }

    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_tile_the_reference() {
        let sizes = "chr1\t25\n";
        let intervals = generate_intervals(sizes.as_bytes(), 10).unwrap();
        assert_eq!(intervals, ["chr1:1-11", "chr1:12-22", "chr1:23-25"]);
    }

    #[test]
    fn short_reference_is_one_window() {
        let sizes = "chrM\t7\n";
        let intervals = generate_intervals(sizes.as_bytes(), 10).unwrap();
        assert_eq!(intervals, ["chrM:1-7"]);
    }

    #[test]
    fn multiple_references_and_blank_lines() {
        let sizes = "chr1 25\n\nchr2 7\n";
        let intervals = generate_intervals(sizes.as_bytes(), 10).unwrap();
        assert_eq!(intervals.len(), 4);
        assert_eq!(intervals[3], "chr2:1-7");
    }

    #[test]
    fn malformed_line_is_an_error() {
        let result = generate_intervals("chr1\n".as_bytes(), 10);
        assert!(matches!(result, Err(Error::MalformedGenomeSizes(_))));

        let result = generate_intervals("chr1 long\n".as_bytes(), 10);
        assert!(matches!(result, Err(Error::MalformedGenomeSizes(_))));
    }
}
