use std::path::{Path, PathBuf};

use log::debug;

use crate::discovery::{absolute, extract_sample_name, search_regex};
use crate::error::{Error, Result};

const VCF_PATTERN: &str = r"\.g\.vcf(\.gz)?$";
const INDEX_PATTERN: &str = r"\.g\.vcf(\.gz)?\.tbi$";

/// Pattern extracting the sample name from a gVCF base name. A trailing
/// genome-version tag (`sample.b37.g.vcf.gz`) is stripped.
pub const SAMPLE_PATTERN: &str = r"(?P<sample>.+?)(\.\w+)?\.g\.vcf(\.gz)?$";

/// Raw gVCF files and their tabix indexes found in one directory.
///
/// All three lists have the same length and are index-aligned by sample.
pub struct VcfFiles {
    pub sample_names: Vec<String>,
    pub vcfs: Vec<PathBuf>,
    pub indexes: Vec<PathBuf>,
}

/// Search a directory for raw gVCF files and their index files.
///
/// `prefix` is prepended to every derived sample name, letting batches from
/// different directories keep distinct names. Fails on zero matches or
/// unequal gVCF/index counts.
pub fn collect_vcf_files(dir: &Path, prefix: &str) -> Result<VcfFiles> {
    let vcfs = search_regex(dir, VCF_PATTERN)?;
    let indexes = search_regex(dir, INDEX_PATTERN)?;

    if vcfs.is_empty() {
        return Err(Error::NoFilesFound {
            what: "gVCF",
            dir: dir.to_path_buf(),
        });
    }
    if vcfs.len() != indexes.len() {
        return Err(Error::UnpairedFiles {
            what: "gVCF/index",
            dir: dir.to_path_buf(),
            first: vcfs.len(),
            second: indexes.len(),
        });
    }

    let sample_names = vcfs
        .iter()
        .map(|file| Ok(format!("{prefix}{}", extract_sample_name(file, SAMPLE_PATTERN)?)))
        .collect::<Result<Vec<_>>>()?;
    debug!("Found {} gVCFs in {}", vcfs.len(), dir.display());

    Ok(VcfFiles {
        sample_names,
        vcfs: vcfs.iter().map(|f| absolute(f)).collect::<Result<_>>()?,
        indexes: indexes.iter().map(|f| absolute(f)).collect::<Result<_>>()?,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn genome_version_tag_is_stripped_from_sample_names() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "725_14.b37.g.vcf.gz");
        touch(dir.path(), "725_14.b37.g.vcf.gz.tbi");

        let found = collect_vcf_files(dir.path(), "").unwrap();
        assert_eq!(found.sample_names, ["725_14"]);
    }

    #[test]
    fn prefix_is_prepended_to_sample_names() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "S1.g.vcf.gz");
        touch(dir.path(), "S1.g.vcf.gz.tbi");

        let found = collect_vcf_files(dir.path(), "batch1_").unwrap();
        assert_eq!(found.sample_names, ["batch1_S1"]);
    }

    #[test]
    fn index_files_do_not_count_as_vcfs() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "S1.g.vcf");
        touch(dir.path(), "S2.g.vcf.gz");
        touch(dir.path(), "S1.g.vcf.tbi");
        touch(dir.path(), "S2.g.vcf.gz.tbi");

        let found = collect_vcf_files(dir.path(), "").unwrap();
        assert_eq!(found.vcfs.len(), 2);
        assert_eq!(found.indexes.len(), 2);
        assert_eq!(found.sample_names, ["S1", "S2"]);
    }

    #[test]
    fn missing_index_is_an_error() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "S1.g.vcf.gz");

        let result = collect_vcf_files(dir.path(), "");
        assert!(matches!(result, Err(Error::UnpairedFiles { .. })));
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let result = collect_vcf_files(dir.path(), "");
        assert!(matches!(result, Err(Error::NoFilesFound { .. })));
    }
}
