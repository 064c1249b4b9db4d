//! File discovery by naming convention.
//!
//! Directory scans are pure pattern matching: given a directory and a
//! suffix pattern, return the matching paths sorted by name. Pairing rules
//! (forward/reverse FASTQ, gVCF/index) fail fast on zero or mismatched
//! counts so an incomplete batch never reaches the server.

/// Paired-end FASTQ discovery and platform-unit extraction
pub mod fastq;
/// Raw gVCF and index discovery
pub mod vcf;

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{Error, Result};

/// List files in `dir` whose base name matches `pattern`, sorted by path.
pub fn search_regex(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let re = Regex::new(pattern).expect("hard-coded pattern");
    let mut matches: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_owned(),
            None => continue,
        };
        if re.is_match(&name) {
            matches.push(path);
        }
    }
    matches.sort();
    Ok(matches)
}

/// Extract the sample name from a file's base name using the named capture
/// group `sample` of `pattern` (case-insensitive).
pub fn extract_sample_name(file: &Path, pattern: &str) -> Result<String> {
    let re = Regex::new(&format!("(?i){pattern}")).expect("hard-coded pattern");
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::SampleName(file.display().to_string()))?;

    re.captures(name)
        .and_then(|captures| captures.name("sample"))
        .map(|sample| sample.as_str().to_owned())
        .ok_or_else(|| Error::SampleName(name.to_owned()))
}

/// Resolve a path against the current directory without requiring it to
/// exist.
pub(crate) fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn search_returns_sorted_matches() {
        let dir = tempdir().unwrap();
        for name in ["b.txt", "a.txt", "c.log"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let found = search_regex(dir.path(), r"\.txt$").unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
    }

    #[test]
    fn sample_name_is_extracted_case_insensitively() {
        let sample =
            extract_sample_name(Path::new("S1_R1.FASTQ.GZ"), fastq::SAMPLE_PATTERN).unwrap();
        assert_eq!(sample, "S1");
    }

    #[test]
    fn unmatched_file_name_is_an_error() {
        let result = extract_sample_name(Path::new("README.md"), fastq::SAMPLE_PATTERN);
        assert!(matches!(result, Err(Error::SampleName(_))));
    }
}
