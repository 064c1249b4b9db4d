//! Automates submission of GATK variant-calling workflows to a Cromwell server.
//!
//! Raw paired-end FASTQ or raw gVCF files are collected by filename
//! convention, together with reference files (b37 or hg38), to assemble the
//! JSON input document of a bundled WDL workflow (`haplotype-calling`,
//! `joint-discovery`, or both in sequence). Workflow files and inputs are
//! staged into a destination directory, submitted to a Cromwell server, and
//! polled until the run reaches a terminal state. Output files of a
//! successful run are collected into the same directory.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

/// Bundled WDL workflows and their static resources
pub mod catalog;
/// Command-line interface definition
pub mod cli;
/// Typed client for the Cromwell REST API
pub mod cromwell;
/// FASTQ and gVCF discovery by filename convention
pub mod discovery;
pub mod error;
/// Input document assembly and validation
pub mod inputs;
/// GATK-style interval list generation
pub mod intervals;
/// Resolution of required reference files
pub mod references;
/// Lifecycle of a single workflow run
pub mod runner;

pub use error::{Error, Result};

/// A directory exclusively owned by one workflow run.
///
/// The staged workflow definition, optional imports archive, serialized
/// input document, and collected output files are all written here.
pub struct RunDirectory {
    pub path: PathBuf,
}

impl RunDirectory {
    /// Create the directory if it does not exist and canonicalize its path.
    pub fn create(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Creating run directory {}", path.display());
            fs::create_dir_all(path)?;
        }
        Ok(RunDirectory {
            path: path.canonicalize()?,
        })
    }
}
