//! Typed client for the Cromwell workflow execution REST API.
//!
//! Owns the submit / status / outputs / abort protocol under
//! `/api/workflows/{version}`. Server-reported failures (`status` of `fail`
//! or `error` in the response body) are surfaced with the server's message;
//! submissions are never retried automatically.

/// HTTP client for submit, status, outputs, and abort
pub mod client;
/// Lifecycle states reported by the server
pub mod status;

pub use client::{CromwellClient, SubmissionHandle, WorkflowSubmission, DEFAULT_HOST};
pub use status::RunStatus;
