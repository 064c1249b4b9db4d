//! The catalog of WDL workflows bundled with the binary.
//!
//! Workflow definition files, base parameter templates, and reference
//! manifests are compiled into the binary so a run stages exactly the
//! artifact that was shipped. The catalog is immutable; callers receive it
//! as plain values instead of reading process-wide tables.

use std::fmt;

use clap::ValueEnum;

/// Version tag of the reference genome a workflow runs against.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum GenomeVersion {
    Hg38,
    B37,
}

impl fmt::Display for GenomeVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenomeVersion::Hg38 => write!(f, "hg38"),
            GenomeVersion::B37 => write!(f, "b37"),
        }
    }
}

/// A workflow bundled with the binary.
///
/// `HaplotypeCalling` and `JointDiscovery` are submittable top-level
/// workflows; the rest are sub-workflows imported by `haplotype-calling` and
/// are only ever shipped inside its dependency archive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Workflow {
    HaplotypeCalling,
    JointDiscovery,
    BamToCram,
    HaplotypeCallerGvcf,
    PairedFastqToUnmappedBam,
    ProcessingForVariantDiscovery,
    ValidateBam,
}

impl Workflow {
    /// Short name used for staged file names (`{name}.imports.zip`,
    /// `{name}.{version}.inputs.json`).
    pub fn name(&self) -> &'static str {
        match self {
            Workflow::HaplotypeCalling => "haplotype-calling",
            Workflow::JointDiscovery => "joint-discovery",
            Workflow::BamToCram => "bam-to-cram",
            Workflow::HaplotypeCallerGvcf => "haplotypecaller-gvcf-gatk4",
            Workflow::PairedFastqToUnmappedBam => "paired-fastq-to-unmapped-bam",
            Workflow::ProcessingForVariantDiscovery => "processing-for-variant-discovery-gatk4",
            Workflow::ValidateBam => "validate-bam",
        }
    }

    /// Base name of the packaged WDL definition file.
    pub fn file_name(&self) -> &'static str {
        match self {
            Workflow::HaplotypeCalling => "haplotype-calling.wdl",
            Workflow::JointDiscovery => "joint-discovery-gatk4-local.wdl",
            Workflow::BamToCram => "bam-to-cram.wdl",
            Workflow::HaplotypeCallerGvcf => "haplotypecaller-gvcf-gatk4.wdl",
            Workflow::PairedFastqToUnmappedBam => "paired-fastq-to-unmapped-bam.wdl",
            Workflow::ProcessingForVariantDiscovery => "processing-for-variant-discovery-gatk4.wdl",
            Workflow::ValidateBam => "validate-bam.wdl",
        }
    }

    /// Embedded WDL source text.
    pub fn source(&self) -> &'static str {
        match self {
            Workflow::HaplotypeCalling => {
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/workflows/haplotype-calling.wdl"))
            }
            Workflow::JointDiscovery => {
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/workflows/joint-discovery-gatk4-local.wdl"))
            }
            Workflow::BamToCram => {
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/workflows/bam-to-cram.wdl"))
            }
            Workflow::HaplotypeCallerGvcf => {
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/workflows/haplotypecaller-gvcf-gatk4.wdl"))
            }
            Workflow::PairedFastqToUnmappedBam => {
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/workflows/paired-fastq-to-unmapped-bam.wdl"))
            }
            Workflow::ProcessingForVariantDiscovery => include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/data/workflows/processing-for-variant-discovery-gatk4.wdl"
            )),
            Workflow::ValidateBam => {
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/workflows/validate-bam.wdl"))
            }
        }
    }

    /// Sub-workflows that must be bundled as a flat zip dependency archive.
    pub fn imports(&self) -> &'static [Workflow] {
        match self {
            Workflow::HaplotypeCalling => &[
                Workflow::BamToCram,
                Workflow::HaplotypeCallerGvcf,
                Workflow::PairedFastqToUnmappedBam,
                Workflow::ProcessingForVariantDiscovery,
                Workflow::ValidateBam,
            ],
            _ => &[],
        }
    }

    /// Embedded base parameter template (lowest-precedence input layer).
    /// Empty for workflows that are never submitted directly.
    pub fn params_template(&self) -> &'static str {
        match self {
            Workflow::HaplotypeCalling => {
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/params/haplotype-calling.params.json"))
            }
            Workflow::JointDiscovery => {
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/params/joint-discovery.params.json"))
            }
            _ => "",
        }
    }

    /// Embedded reference manifest for a genome version: a JSON object
    /// mapping parameter names to required file names (or lists of names).
    /// Empty for workflows that are never submitted directly.
    pub fn reference_manifest(&self, version: GenomeVersion) -> &'static str {
        match (self, version) {
            (Workflow::HaplotypeCalling, GenomeVersion::Hg38) => {
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/references/haplotype-calling.hg38.resources.json"))
            }
            (Workflow::HaplotypeCalling, GenomeVersion::B37) => {
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/references/haplotype-calling.b37.resources.json"))
            }
            (Workflow::JointDiscovery, GenomeVersion::Hg38) => {
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/references/joint-discovery.hg38.resources.json"))
            }
            (Workflow::JointDiscovery, GenomeVersion::B37) => {
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/references/joint-discovery.b37.resources.json"))
            }
            _ => "",
        }
    }

    /// WDL namespace the workflow's input parameters are scoped under.
    pub fn namespace(&self) -> &'static str {
        match self {
            Workflow::HaplotypeCalling => "HaplotypeCalling",
            Workflow::JointDiscovery => "JointGenotyping",
            Workflow::BamToCram => "BamToCram",
            Workflow::HaplotypeCallerGvcf => "HaplotypeCallerGvcf",
            Workflow::PairedFastqToUnmappedBam => "ConvertPairedFastQsToUnmappedBamWf",
            Workflow::ProcessingForVariantDiscovery => "PreProcessingForVariantDiscovery",
            Workflow::ValidateBam => "ValidateBamsWf",
        }
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
