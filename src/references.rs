//! Resolution of required reference files.
//!
//! Each submittable workflow ships a manifest per genome version listing the
//! reference files it needs, keyed by the input parameter they satisfy. The
//! resolver maps every name to an absolute path under the reference
//! directory and reports *all* missing files in one error.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::catalog::{GenomeVersion, Workflow};
use crate::discovery::absolute;
use crate::error::{Error, Result};
use crate::inputs::document::InputDocument;

/// A manifest entry is one file name, or a list of names for multi-file
/// reference sets.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ManifestEntry {
    One(String),
    Many(Vec<String>),
}

/// Load the bundled manifest and resolve every entry against
/// `reference_dir`, producing an input-document fragment of absolute paths.
pub fn collect_reference_files(
    reference_dir: &Path,
    workflow: Workflow,
    version: GenomeVersion,
) -> Result<InputDocument> {
    let manifest: BTreeMap<String, ManifestEntry> =
        serde_json::from_str(workflow.reference_manifest(version))?;
    debug!(
        "Resolving {} reference entries for {workflow} ({version}) in {}",
        manifest.len(),
        reference_dir.display()
    );

    let mut fragment = InputDocument::new();
    let mut missing: Vec<String> = Vec::new();

    for (param, entry) in manifest {
        match entry {
            ManifestEntry::One(name) => {
                let path = absolute(&reference_dir.join(&name))?;
                if path.is_file() {
                    fragment.set(&param, path.to_string_lossy().into_owned());
                } else {
                    missing.push(name);
                }
            }
            ManifestEntry::Many(names) => {
                let mut paths: Vec<Value> = Vec::with_capacity(names.len());
                let mut absent: Vec<String> = Vec::new();
                for name in &names {
                    let path = absolute(&reference_dir.join(name))?;
                    if path.is_file() {
                        paths.push(Value::from(path.to_string_lossy().into_owned()));
                    } else {
                        absent.push(name.clone());
                    }
                }
                // a multi-file set is only usable when complete
                if absent.is_empty() {
                    fragment.set(&param, Value::Array(paths));
                } else {
                    missing.extend(absent);
                }
            }
        }
    }

    if !missing.is_empty() {
        return Err(Error::MissingReferences(missing));
    }
    Ok(fragment)
}

/// Verify that every path listed in a scattered intervals list file exists.
///
/// Relative entries are resolved against the list file's directory. All
/// missing entries are reported in one error.
pub fn check_intervals_files(intervals_list: &Path) -> Result<()> {
    let content = fs::read_to_string(intervals_list)?;
    let base = intervals_list.parent().unwrap_or_else(|| Path::new("."));

    let missing: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !base.join(line).exists())
        .map(str::to_owned)
        .collect();

    if !missing.is_empty() {
        return Err(Error::MissingIntervals(missing));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn write_all(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), b"").unwrap();
        }
    }

    // every file named by the bundled joint-discovery manifests, b37 flavour
    const JOINT_B37: &[&str] = &[
        "human_g1k_v37_decoy.fasta",
        "human_g1k_v37_decoy.fasta.fai",
        "human_g1k_v37_decoy.dict",
        "dbsnp_138.b37.vcf",
        "dbsnp_138.b37.vcf.idx",
        "hapmap_3.3.b37.vcf",
        "hapmap_3.3.b37.vcf.idx",
        "1000G_omni2.5.b37.vcf",
        "1000G_omni2.5.b37.vcf.idx",
        "1000G_phase1.snps.high_confidence.b37.vcf",
        "1000G_phase1.snps.high_confidence.b37.vcf.idx",
        "Mills_and_1000G_gold_standard.indels.b37.vcf",
        "Mills_and_1000G_gold_standard.indels.b37.vcf.idx",
        "Axiom_Exome_Plus.genotypes.all_populations.poly.vcf.gz",
        "Axiom_Exome_Plus.genotypes.all_populations.poly.vcf.gz.tbi",
        "b37_wgs_consolidated_calling_intervals.list",
        "wgs_evaluation_regions.v1.interval_list",
    ];

    #[test]
    fn complete_reference_set_resolves_to_absolute_paths() {
        let dir = tempdir().unwrap();
        write_all(dir.path(), JOINT_B37);

        let fragment =
            collect_reference_files(dir.path(), Workflow::JointDiscovery, GenomeVersion::B37)
                .unwrap();
        let fasta = fragment
            .get("JointGenotyping.ref_fasta")
            .and_then(|v| v.as_str())
            .unwrap();
        assert!(Path::new(fasta).is_absolute());
        assert!(fasta.ends_with("human_g1k_v37_decoy.fasta"));
    }

    #[test]
    fn resolution_is_idempotent() {
        let dir = tempdir().unwrap();
        write_all(dir.path(), JOINT_B37);

        let first =
            collect_reference_files(dir.path(), Workflow::JointDiscovery, GenomeVersion::B37)
                .unwrap();
        let second =
            collect_reference_files(dir.path(), Workflow::JointDiscovery, GenomeVersion::B37)
                .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn every_missing_file_is_listed() {
        let dir = tempdir().unwrap();

        let result =
            collect_reference_files(dir.path(), Workflow::JointDiscovery, GenomeVersion::B37);
        match result {
            Err(Error::MissingReferences(names)) => {
                assert_eq!(names.len(), JOINT_B37.len());
            }
            other => panic!("expected MissingReferences, got {other:?}"),
        }
    }

    #[test]
    fn intervals_list_with_existing_entries_passes() {
        let dir = tempdir().unwrap();
        write_all(dir.path(), &["shard1.interval_list", "shard2.interval_list"]);
        let list = dir.path().join("scattered.txt");
        fs::write(&list, "shard1.interval_list\nshard2.interval_list\n").unwrap();

        check_intervals_files(&list).unwrap();
    }

    #[test]
    fn intervals_list_reports_all_missing_entries() {
        let dir = tempdir().unwrap();
        let list = dir.path().join("scattered.txt");
        fs::write(&list, "gone1.interval_list\ngone2.interval_list\n").unwrap();

        match check_intervals_files(&list) {
            Err(Error::MissingIntervals(names)) => assert_eq!(names.len(), 2),
            other => panic!("expected MissingIntervals, got {other:?}"),
        }
    }
}
