//! Command-line interface.
//!
//! Four subcommands: `all` (haplotype-calling then joint-discovery), `hc`,
//! `joint`, and `intervals`. Workflow inputs and overrides are defined next
//! to the assemblers that consume them and flattened here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use url::Url;

use crate::catalog::GenomeVersion;
use crate::inputs::haplotype_calling::{HaplotypeCallingConfig, HaplotypeCallingOverrides};
use crate::inputs::joint_discovery::{JointDiscoveryConfig, JointDiscoveryOverrides};

/// Automates execution of workflows for processing WES/WGS data.
///
/// Raw paired-end FASTQ or raw gVCF files are collected, together with
/// reference files (b37 or hg38), to generate the JSON document used as
/// input for the data processing workflows (haplotype-calling,
/// joint-discovery, or both). Each directory of FASTQ files is one library
/// or batch; file names must follow the (sample)_R?[12].fastq(.gz)?
/// pattern. Input and reference files are checked before anything is
/// submitted to the Cromwell server. Output files are collected into the
/// destination directory.
#[derive(Parser, Debug)]
#[command(author, about, verbatim_doc_comment)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run haplotype-calling and joint-discovery workflows in sequence
    All(AllArgs),
    /// Run only the haplotype-calling workflow
    Hc(HcArgs),
    /// Run only the joint-discovery workflow
    Joint(JointArgs),
    /// Generate GATK-style genomic intervals from a genome sizes file
    Intervals(IntervalsArgs),
}

/// Options shared by every submitting command.
#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// Cromwell server URL
    #[arg(long)]
    pub host: Option<Url>,

    /// Time to sleep (in seconds) between each workflow status check
    #[arg(long = "sleep", default_value_t = 300)]
    pub sleep_time: u64,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,

    /// Do not submit the workflow, only write workflow files into the
    /// destination directory
    #[arg(long = "dont_run", default_value_t = false)]
    pub dont_run: bool,

    /// Move output files to the destination directory instead of copying
    /// them
    #[arg(long = "move")]
    pub move_outputs: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ReferenceArgs {
    /// Path to directory containing reference files
    #[arg(long)]
    pub reference: PathBuf,

    /// Version of reference files
    #[arg(long = "version", value_enum)]
    pub genome_version: GenomeVersion,
}

#[derive(Args, Debug)]
pub struct HcArgs {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub reference: ReferenceArgs,

    #[command(flatten)]
    pub config: HaplotypeCallingConfig,

    #[command(flatten)]
    pub overrides: HaplotypeCallingOverrides,

    /// Directory to write all files to
    pub destination: PathBuf,
}

#[derive(Args, Debug)]
pub struct JointArgs {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub reference: ReferenceArgs,

    #[command(flatten)]
    pub config: JointDiscoveryConfig,

    #[command(flatten)]
    pub overrides: JointDiscoveryOverrides,

    /// Name of the unified callset written by joint genotyping
    pub callset_name: String,

    /// Directory to write all files to
    pub destination: PathBuf,
}

#[derive(Args, Debug)]
pub struct AllArgs {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub reference: ReferenceArgs,

    #[command(flatten)]
    pub config: HaplotypeCallingConfig,

    #[command(flatten)]
    pub overrides: HaplotypeCallingOverrides,

    /// Path to directory containing previous raw gVCF and their index files
    /// (repeatable). The first workflow's destination is always included
    #[arg(long = "vcf", value_name = "DIR")]
    pub vcf_directories: Vec<PathBuf>,

    /// Prefix added to sample names from a gVCF directory. One value for
    /// each --vcf directory
    #[arg(long = "prefix")]
    pub prefixes: Vec<String>,

    #[arg(long = "indels_variant_recalibrator_mem_size_gb")]
    pub indels_mem_size_gb: Option<f64>,

    #[arg(long = "snps_variant_recalibrator_mem_size_gb")]
    pub snps_mem_size_gb: Option<f64>,

    /// Name of the unified callset written by joint genotyping
    pub callset_name: String,

    /// Directory to write all files to
    pub destination: PathBuf,
}

impl AllArgs {
    /// Joint-discovery consumes the gVCFs produced into the destination
    /// directory, alongside any extra `--vcf` directories.
    pub fn joint_config(&self, destination: PathBuf) -> JointDiscoveryConfig {
        let mut vcf_directories = self.vcf_directories.clone();
        let mut prefixes = self.prefixes.clone();
        vcf_directories.push(destination);
        prefixes.push(String::new());
        JointDiscoveryConfig {
            vcf_directories,
            prefixes,
        }
    }

    pub fn joint_overrides(&self) -> JointDiscoveryOverrides {
        JointDiscoveryOverrides {
            gatk_path: self.overrides.gatk_path.clone(),
            indels_mem_size_gb: self.indels_mem_size_gb,
            snps_mem_size_gb: self.snps_mem_size_gb,
        }
    }
}

#[derive(Args, Debug)]
pub struct IntervalsArgs {
    /// File containing reference names and sizes, one `name size` pair per
    /// line
    pub genome_sizes: PathBuf,

    /// Size of each genomic interval
    #[arg(long = "window_size", default_value_t = 1_000_000)]
    pub window_size: u64,
}
