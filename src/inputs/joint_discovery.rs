use std::path::{Path, PathBuf};

use clap::Args;

use crate::catalog::{GenomeVersion, Workflow};
use crate::discovery::absolute;
use crate::discovery::vcf::collect_vcf_files;
use crate::error::{Error, Result};
use crate::inputs::haplotype_calling::path_values;
use crate::inputs::{check_per_directory, InputDocument};
use crate::references::collect_reference_files;

/// gVCF sources for the `joint-discovery` workflow.
#[derive(Args, Debug, Clone)]
pub struct JointDiscoveryConfig {
    /// Path to directory containing raw gVCF and their index files
    /// (repeatable)
    #[arg(long = "vcf", value_name = "DIR", required = true)]
    pub vcf_directories: Vec<PathBuf>,

    /// Prefix added to sample names from a gVCF directory. One value for
    /// each directory
    #[arg(long = "prefix")]
    pub prefixes: Vec<String>,
}

/// Optional overrides for the `joint-discovery` workflow.
#[derive(Args, Debug, Clone, Default)]
pub struct JointDiscoveryOverrides {
    /// Path to a GATK jar to use instead of the bundled one
    #[arg(long = "gatk_path_override")]
    pub gatk_path: Option<PathBuf>,

    #[arg(long = "indels_variant_recalibrator_mem_size_gb")]
    pub indels_mem_size_gb: Option<f64>,

    #[arg(long = "snps_variant_recalibrator_mem_size_gb")]
    pub snps_mem_size_gb: Option<f64>,
}

/// Assemble the input document for the `joint-discovery` workflow.
pub fn joint_discovery_inputs(
    config: &JointDiscoveryConfig,
    reference_dir: &Path,
    version: GenomeVersion,
    callset_name: &str,
    overrides: &JointDiscoveryOverrides,
) -> Result<InputDocument> {
    check_per_directory(
        "prefix",
        config.vcf_directories.len(),
        config.prefixes.len(),
    )?;

    let mut inputs = InputDocument::from_template(Workflow::JointDiscovery.params_template())?;

    for (dir, prefix) in config.vcf_directories.iter().zip(&config.prefixes) {
        let vcf = collect_vcf_files(dir, prefix)?;
        inputs.append("JointGenotyping.sample_names", vcf.sample_names)?;
        inputs.append("JointGenotyping.input_gvcfs", path_values(&vcf.vcfs))?;
        inputs.append(
            "JointGenotyping.input_gvcfs_indices",
            path_values(&vcf.indexes),
        )?;
    }

    inputs.set("JointGenotyping.callset_name", callset_name);

    let references = collect_reference_files(reference_dir, Workflow::JointDiscovery, version)?;
    inputs.overlay(references);

    if let Some(path) = &overrides.gatk_path {
        if !path.is_file() {
            return Err(Error::OverrideNotFound {
                what: "GATK",
                path: path.clone(),
            });
        }
        inputs.set(
            "JointGenotyping.gatk_path_override",
            absolute(path)?.to_string_lossy().into_owned(),
        );
    }
    if let Some(mem) = overrides.indels_mem_size_gb {
        inputs.set("JointGenotyping.indels_variant_recalibrator_mem_size_gb", mem);
    }
    if let Some(mem) = overrides.snps_mem_size_gb {
        inputs.set("JointGenotyping.snps_variant_recalibrator_mem_size_gb", mem);
    }

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::Value;
    use tempfile::tempdir;

    use super::*;

    fn write_references(dir: &Path) {
        let manifest: std::collections::BTreeMap<String, Value> = serde_json::from_str(
            Workflow::JointDiscovery.reference_manifest(GenomeVersion::Hg38),
        )
        .unwrap();
        for entry in manifest.values() {
            match entry {
                Value::String(name) => fs::write(dir.join(name), b"").unwrap(),
                Value::Array(names) => {
                    for name in names {
                        fs::write(dir.join(name.as_str().unwrap()), b"").unwrap();
                    }
                }
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn samples_from_all_directories_are_merged_with_prefixes() {
        let batch1 = tempdir().unwrap();
        let batch2 = tempdir().unwrap();
        for (dir, sample) in [(&batch1, "S1"), (&batch2, "S2")] {
            fs::write(dir.path().join(format!("{sample}.g.vcf.gz")), b"").unwrap();
            fs::write(dir.path().join(format!("{sample}.g.vcf.gz.tbi")), b"").unwrap();
        }
        let reference_dir = tempdir().unwrap();
        write_references(reference_dir.path());

        let config = JointDiscoveryConfig {
            vcf_directories: vec![batch1.path().to_path_buf(), batch2.path().to_path_buf()],
            prefixes: vec!["a_".to_string(), String::new()],
        };
        let inputs = joint_discovery_inputs(
            &config,
            reference_dir.path(),
            GenomeVersion::Hg38,
            "mycohort",
            &JointDiscoveryOverrides::default(),
        )
        .unwrap();

        assert_eq!(
            inputs.get("JointGenotyping.sample_names"),
            Some(&serde_json::json!(["a_S1", "S2"]))
        );
        assert_eq!(
            inputs.get("JointGenotyping.callset_name"),
            Some(&serde_json::json!("mycohort"))
        );
        let gvcfs = inputs.get("JointGenotyping.input_gvcfs").unwrap();
        assert_eq!(gvcfs.as_array().unwrap().len(), 2);
    }

    #[test]
    fn prefix_count_must_match_directory_count() {
        let config = JointDiscoveryConfig {
            vcf_directories: vec![PathBuf::from("a"), PathBuf::from("b")],
            prefixes: vec!["only-one".to_string()],
        };
        let result = joint_discovery_inputs(
            &config,
            Path::new("unused"),
            GenomeVersion::Hg38,
            "cohort",
            &JointDiscoveryOverrides::default(),
        );
        assert!(matches!(result, Err(Error::UnevenOptions { .. })));
    }
}
