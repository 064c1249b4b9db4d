use std::path::{Path, PathBuf};

use clap::Args;
use serde_json::Value;

use crate::catalog::{GenomeVersion, Workflow};
use crate::discovery::absolute;
use crate::discovery::fastq::{collect_fastq_files, extract_platform_units};
use crate::error::{Error, Result};
use crate::inputs::run_date::validate_run_dates;
use crate::inputs::{check_per_directory, InputDocument};
use crate::references::{check_intervals_files, collect_reference_files};

/// Sample sources and metadata for the `haplotype-calling` workflow. Each
/// FASTQ directory is one library or sequencing batch.
#[derive(Args, Debug, Clone)]
pub struct HaplotypeCallingConfig {
    /// Path to directory containing paired-end FASTQ files (repeatable)
    #[arg(long = "fastq", value_name = "DIR", required = true)]
    pub fastq_directories: Vec<PathBuf>,

    /// Library name. One value for each FASTQ directory
    #[arg(long = "library", required = true)]
    pub library_names: Vec<String>,

    /// Run date in ISO 8601 format. One value for each FASTQ directory
    #[arg(long = "date", required = true)]
    pub run_dates: Vec<String>,

    /// Name of the sequencing platform
    #[arg(long = "platform")]
    pub platform_name: String,

    /// Sequencing center name
    #[arg(long = "center")]
    pub sequencing_center: String,

    /// Disable extraction of platform unit (PU) from FASTQ headers
    #[arg(long = "disable_platform_unit")]
    pub disable_platform_unit: bool,
}

/// Optional tool-path and resource-sizing overrides (highest-precedence
/// input layer).
#[derive(Args, Debug, Clone, Default)]
pub struct HaplotypeCallingOverrides {
    /// Path to a GATK jar to use instead of the bundled one
    #[arg(long = "gatk_path_override")]
    pub gatk_path: Option<PathBuf>,

    /// Path to a genomes-on-the-cloud tool directory
    #[arg(long = "gotc_path_override")]
    pub gotc_path: Option<PathBuf>,

    /// Path to a samtools executable
    #[arg(long = "samtools_path_override")]
    pub samtools_path: Option<PathBuf>,

    /// Alternative bwa command line
    #[arg(long = "bwa_commandline_override")]
    pub bwa_commandline: Option<String>,

    #[arg(long = "align_mem_size_gb")]
    pub align_mem_size_gb: Option<f64>,

    #[arg(long = "merge_bam_mem_size_gb")]
    pub merge_bam_mem_size_gb: Option<f64>,

    #[arg(long = "mark_duplicates_mem_size_gb")]
    pub mark_duplicates_mem_size_gb: Option<f64>,

    #[arg(long = "sort_mem_size_gb")]
    pub sort_mem_size_gb: Option<f64>,

    #[arg(long = "baserecalibrator_mem_size_gb")]
    pub baserecalibrator_mem_size_gb: Option<f64>,

    #[arg(long = "apply_bqsr_mem_size_gb")]
    pub apply_bqsr_mem_size_gb: Option<f64>,

    #[arg(long = "align_num_cpu")]
    pub align_num_cpu: Option<u32>,
}

/// Assemble the input document for the `haplotype-calling` workflow.
///
/// Layer order: bundled parameter template, then per-directory FASTQ
/// discovery and reference resolution, then user overrides.
pub fn haplotype_calling_inputs(
    config: &HaplotypeCallingConfig,
    reference_dir: &Path,
    version: GenomeVersion,
    overrides: &HaplotypeCallingOverrides,
) -> Result<InputDocument> {
    let dirs = config.fastq_directories.len();
    check_per_directory("library name", dirs, config.library_names.len())?;
    check_per_directory("run date", dirs, config.run_dates.len())?;
    validate_run_dates(&config.run_dates)?;

    let mut inputs = InputDocument::from_template(Workflow::HaplotypeCalling.params_template())?;
    inputs.set("HaplotypeCalling.ref_name", version.to_string());

    for (idx, dir) in config.fastq_directories.iter().enumerate() {
        let fastq = collect_fastq_files(dir)?;
        let samples = fastq.sample_names.len();

        let platform_units = if config.disable_platform_unit {
            vec!["-".to_string(); samples]
        } else {
            extract_platform_units(&fastq.forward)?
        };

        inputs.append("HaplotypeCalling.sample_name", fastq.sample_names)?;
        inputs.append("HaplotypeCalling.fastq_1", path_values(&fastq.forward))?;
        inputs.append("HaplotypeCalling.fastq_2", path_values(&fastq.reverse))?;
        inputs.append("HaplotypeCalling.platform_unit", platform_units)?;
        inputs.append(
            "HaplotypeCalling.library_name",
            vec![config.library_names[idx].clone(); samples],
        )?;
        inputs.append(
            "HaplotypeCalling.run_date",
            vec![config.run_dates[idx].clone(); samples],
        )?;
        inputs.append(
            "HaplotypeCalling.platform_name",
            vec![config.platform_name.clone(); samples],
        )?;
        inputs.append(
            "HaplotypeCalling.sequencing_center",
            vec![config.sequencing_center.clone(); samples],
        )?;
    }

    let references = collect_reference_files(reference_dir, Workflow::HaplotypeCalling, version)?;
    inputs.overlay(references);

    if let Some(Value::String(list)) =
        inputs.get("HaplotypeCalling.scattered_calling_intervals_list")
    {
        check_intervals_files(Path::new(list))?;
    }

    apply_overrides(&mut inputs, overrides)?;
    Ok(inputs)
}

fn apply_overrides(inputs: &mut InputDocument, overrides: &HaplotypeCallingOverrides) -> Result<()> {
    if let Some(path) = &overrides.gatk_path {
        if !path.is_file() {
            return Err(Error::OverrideNotFound {
                what: "GATK",
                path: path.clone(),
            });
        }
        inputs.set(
            "HaplotypeCalling.gatk_path_override",
            absolute(path)?.to_string_lossy().into_owned(),
        );
    }
    if let Some(path) = &overrides.gotc_path {
        if !path.exists() {
            return Err(Error::OverrideNotFound {
                what: "GOTC",
                path: path.clone(),
            });
        }
        // the workflow concatenates tool names onto this value
        let gotc = format!("{}/", absolute(path)?.to_string_lossy());
        inputs.set("HaplotypeCalling.gotc_path_override", gotc);
    }
    if let Some(path) = &overrides.samtools_path {
        if !path.is_file() {
            return Err(Error::OverrideNotFound {
                what: "Samtools",
                path: path.clone(),
            });
        }
        inputs.set(
            "HaplotypeCalling.samtools_path_override",
            absolute(path)?.to_string_lossy().into_owned(),
        );
    }
    if let Some(bwa) = &overrides.bwa_commandline {
        inputs.set("HaplotypeCalling.bwa_commandline_override", bwa.clone());
    }

    let sizes = [
        ("HaplotypeCalling.align_mem_size_gb", overrides.align_mem_size_gb),
        ("HaplotypeCalling.merge_bam_mem_size_gb", overrides.merge_bam_mem_size_gb),
        (
            "HaplotypeCalling.mark_duplicates_mem_size_gb",
            overrides.mark_duplicates_mem_size_gb,
        ),
        ("HaplotypeCalling.sort_mem_size_gb", overrides.sort_mem_size_gb),
        (
            "HaplotypeCalling.baserecalibrator_mem_size_gb",
            overrides.baserecalibrator_mem_size_gb,
        ),
        ("HaplotypeCalling.apply_bqsr_mem_size_gb", overrides.apply_bqsr_mem_size_gb),
    ];
    for (key, value) in sizes {
        if let Some(value) = value {
            inputs.set(key, value);
        }
    }
    if let Some(cpus) = overrides.align_num_cpu {
        inputs.set("HaplotypeCalling.align_num_cpu", cpus);
    }
    Ok(())
}

pub(crate) fn path_values(paths: &[PathBuf]) -> Vec<Value> {
    paths
        .iter()
        .map(|p| Value::from(p.to_string_lossy().into_owned()))
        .collect()
}
