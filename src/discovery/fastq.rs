use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use log::debug;

use crate::discovery::{absolute, extract_sample_name, search_regex};
use crate::error::{Error, Result};

const FORWARD_PATTERN: &str = r"_R?1\.fastq(\.gz)?$";
const REVERSE_PATTERN: &str = r"_R?2\.fastq(\.gz)?$";

/// Pattern extracting the sample name from a FASTQ base name.
pub const SAMPLE_PATTERN: &str = r"(?P<sample>.+)_R?[12]\.fastq(\.gz)?$";

/// Paired-end FASTQ files found in one directory.
///
/// All three lists have the same length and are index-aligned by sample.
pub struct FastqFiles {
    pub forward: Vec<PathBuf>,
    pub reverse: Vec<PathBuf>,
    pub sample_names: Vec<String>,
}

/// Search a directory for paired-end FASTQ files and check parity.
///
/// File names must follow the `(sample)_R?[12].fastq(.gz)?` convention.
/// Returns sorted absolute paths; fails on zero matches or unequal
/// forward/reverse counts.
pub fn collect_fastq_files(dir: &Path) -> Result<FastqFiles> {
    let forward = search_regex(dir, FORWARD_PATTERN)?;
    let reverse = search_regex(dir, REVERSE_PATTERN)?;

    if forward.is_empty() || reverse.is_empty() {
        return Err(Error::NoFilesFound {
            what: "FASTQ",
            dir: dir.to_path_buf(),
        });
    }
    if forward.len() != reverse.len() {
        return Err(Error::UnpairedFiles {
            what: "FASTQ",
            dir: dir.to_path_buf(),
            first: forward.len(),
            second: reverse.len(),
        });
    }

    let sample_names = forward
        .iter()
        .map(|file| extract_sample_name(file, SAMPLE_PATTERN))
        .collect::<Result<Vec<_>>>()?;
    debug!("Found {} FASTQ pairs in {}", forward.len(), dir.display());

    Ok(FastqFiles {
        forward: forward.iter().map(|f| absolute(f)).collect::<Result<_>>()?,
        reverse: reverse.iter().map(|f| absolute(f)).collect::<Result<_>>()?,
        sample_names,
    })
}

/// Derive platform units (`{flowcell}.{lane}.{barcode}`) from the first
/// header line of each FASTQ file.
pub fn extract_platform_units(files: &[PathBuf]) -> Result<Vec<String>> {
    files.iter().map(|f| extract_platform_unit(f)).collect()
}

fn extract_platform_unit(file: &Path) -> Result<String> {
    let header = read_first_line(file)?;
    let parts: Vec<&str> = header.trim_end().split(':').collect();

    // Illumina headers carry the flowcell, lane, and sample barcode in
    // fields 2, 3, and 9 when the full line is split on ':'
    if parts.len() < 10 {
        return Err(Error::FastqHeader {
            file: file.to_path_buf(),
            header,
        });
    }
    Ok(format!("{}.{}.{}", parts[2], parts[3], parts[9]))
}

fn read_first_line(file: &Path) -> Result<String> {
    let gzipped = file.extension().is_some_and(|ext| ext == "gz");
    let mut reader: Box<dyn BufRead> = if gzipped {
        Box::new(BufReader::new(MultiGzDecoder::new(File::open(file)?)))
    } else {
        Box::new(BufReader::new(File::open(file)?))
    };

    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line)
}
