//! Crate-wide error taxonomy.
//!
//! Server-reported failures (`SubmissionFailed`, `StatusFailed`, ...) carry
//! the message extracted from the response body. A workflow that terminates
//! in a non-`Succeeded` state is *not* an error: see
//! [`RunOutcome`](crate::runner::RunOutcome).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No files matching the naming convention were found in a source directory.
    #[error("no {what} files found in {}", dir.display())]
    NoFilesFound { what: &'static str, dir: PathBuf },

    /// Paired file counts are unequal.
    #[error("{what} files not even in {}: {first} vs {second}", dir.display())]
    UnpairedFiles {
        what: &'static str,
        dir: PathBuf,
        first: usize,
        second: usize,
    },

    /// The sample-name capture group did not match a file name.
    #[error("unable to extract sample name from {0}")]
    SampleName(String),

    /// A FASTQ header had too few fields to derive a platform unit.
    #[error("malformed FASTQ header in {}: {header}", file.display())]
    FastqHeader { file: PathBuf, header: String },

    /// One or more required reference files are absent. Lists every missing
    /// name, not just the first.
    #[error("missing reference files: {}", .0.join(", "))]
    MissingReferences(Vec<String>),

    /// Entries of a scattered intervals list that do not exist on disk.
    #[error("missing intervals files: {}", .0.join(", "))]
    MissingIntervals(Vec<String>),

    /// Run dates that are not valid ISO 8601. Lists every offending value.
    #[error("invalid run date(s): {}", .0.join(", "))]
    InvalidRunDates(Vec<String>),

    /// A repeated option must have one value per input directory.
    #[error("expected one {what} per directory: {expected} directories, {actual} values")]
    UnevenOptions {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A tool-path override points at a missing file or directory.
    #[error("{what} not found: {}", path.display())]
    OverrideNotFound { what: &'static str, path: PathBuf },

    /// Tried to append values to an input parameter that is not a list.
    #[error("input parameter {0} is not a list")]
    NotAList(String),

    /// A line of a genome sizes file did not parse as `name<ws>size`.
    #[error("malformed genome sizes line: {0}")]
    MalformedGenomeSizes(String),

    /// The server rejected a workflow submission.
    #[error("workflow submission failed: {0}")]
    SubmissionFailed(String),

    /// The server reported a failure for a status request.
    #[error("workflow status check failed: {0}")]
    StatusFailed(String),

    /// The server reported a failure for an outputs request.
    #[error("fetching workflow outputs failed: {0}")]
    OutputsFailed(String),

    /// The server reported a failure for an abort request.
    #[error("workflow abort failed: {0}")]
    AbortFailed(String),

    /// The server replied without the field the protocol requires.
    #[error("unexpected response from server: {0}")]
    UnexpectedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, Error>;
