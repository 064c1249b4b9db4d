//! Input document assembly.
//!
//! An input document is built from three layers in fixed precedence order:
//! the workflow's base parameter template (lowest), values derived from
//! discovery and reference resolution, and explicit user overrides
//! (highest). Every validation error is raised before anything touches the
//! network.

/// Flat key/value document keyed by workflow-scoped parameter names
pub mod document;
/// Inputs for the `haplotype-calling` workflow
pub mod haplotype_calling;
/// Inputs for the `joint-discovery` workflow
pub mod joint_discovery;
/// ISO 8601 run-date validation
pub mod run_date;

pub use document::InputDocument;

use crate::error::{Error, Result};

/// Check that a repeated option carries exactly one value per directory.
fn check_per_directory(what: &'static str, directories: usize, values: usize) -> Result<()> {
    if directories != values {
        return Err(Error::UnevenOptions {
            what,
            expected: directories,
            actual: values,
        });
    }
    Ok(())
}
