use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use regex::Regex;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::cromwell::RunStatus;
use crate::error::{Error, Result};

/// Server used when no `--host` is given.
pub const DEFAULT_HOST: &str = "http://localhost:8000";

const API_VERSION: &str = "v1";

/// Matches workflow sources that are URLs rather than local files:
/// http/https/ftp/ftps scheme with a host name, `localhost`, or a
/// dotted-quad address.
const URL_PATTERN: &str = r"(?i)^(?:http|ftp)s?://(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)|localhost|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})(?::\d+)?(?:/?|[/?]\S+)$";

/// Opaque identifier of one in-flight workflow run. Valid only after a
/// successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionHandle(String);

impl SubmissionHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One workflow submission: the source (inline file or URL), its serialized
/// inputs, and optional companion files and form fields.
#[derive(Debug, Default)]
pub struct WorkflowSubmission {
    /// Path to the workflow definition, or a URL the server fetches itself.
    pub source: String,
    pub inputs: Option<PathBuf>,
    /// Flat zip archive resolving the workflow's local imports.
    pub dependencies: Option<PathBuf>,
    pub options: Option<PathBuf>,
    pub labels: Option<PathBuf>,
    pub workflow_root: Option<String>,
    pub workflow_type: Option<String>,
    pub workflow_type_version: Option<String>,
    pub on_hold: Option<bool>,
}

/// Every response body this API produces carries some subset of these
/// fields; `status` of `fail` or `error` marks a server-reported failure.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    id: Option<String>,
    status: Option<String>,
    message: Option<String>,
    outputs: Option<serde_json::Map<String, Value>>,
}

impl ApiResponse {
    fn failure_message(&self) -> Option<String> {
        match self.status.as_deref() {
            Some("fail") | Some("error") => Some(
                self.message
                    .clone()
                    .unwrap_or_else(|| "server reported a failure without a message".to_owned()),
            ),
            _ => None,
        }
    }
}

/// Client for one Cromwell server.
pub struct CromwellClient {
    http: reqwest::Client,
    host: Url,
}

impl CromwellClient {
    /// Create a client. The timeout bounds every request so a hung server
    /// cannot block the process indefinitely.
    pub fn new(host: Url, timeout: Duration) -> Result<CromwellClient> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(CromwellClient { http, host })
    }

    pub fn host(&self) -> &Url {
        &self.host
    }

    fn endpoint(&self, suffix: Option<&str>) -> Result<Url> {
        let path = match suffix {
            Some(suffix) => format!("/api/workflows/{API_VERSION}/{suffix}"),
            None => format!("/api/workflows/{API_VERSION}"),
        };
        Ok(self.host.join(&path)?)
    }

    /// Submit a workflow for execution.
    ///
    /// The definition and inputs are uploaded inline as multipart file
    /// content unless the source is a URL. A failed submission is reported
    /// immediately; it is never retried.
    pub async fn submit(&self, submission: &WorkflowSubmission) -> Result<SubmissionHandle> {
        let mut form = Form::new();

        if is_url(&submission.source) {
            debug!("Submitting workflow by URL: {}", submission.source);
            form = form.text("workflowUrl", submission.source.clone());
        } else {
            form = form.part("workflowSource", file_part(Path::new(&submission.source))?);
        }
        if let Some(inputs) = &submission.inputs {
            form = form.part("workflowInputs", file_part(inputs)?);
        }
        if let Some(dependencies) = &submission.dependencies {
            form = form.part("workflowDependencies", file_part(dependencies)?);
        }
        if let Some(options) = &submission.options {
            form = form.part("workflowOptions", file_part(options)?);
        }
        if let Some(labels) = &submission.labels {
            form = form.part("labels", file_part(labels)?);
        }
        if let Some(root) = &submission.workflow_root {
            form = form.text("workflowRoot", root.clone());
        }
        if let Some(workflow_type) = &submission.workflow_type {
            form = form.text("workflowType", workflow_type.clone());
        }
        if let Some(type_version) = &submission.workflow_type_version {
            form = form.text("workflowTypeVersion", type_version.clone());
        }
        if let Some(on_hold) = submission.on_hold {
            form = form.text("workflowOnHold", on_hold.to_string());
        }

        let url = self.endpoint(None)?;
        info!("Submitting workflow to {url}");
        let response: ApiResponse = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;

        if let Some(message) = response.failure_message() {
            return Err(Error::SubmissionFailed(message));
        }
        response
            .id
            .map(SubmissionHandle)
            .ok_or_else(|| Error::UnexpectedResponse("submission response without an id".to_owned()))
    }

    /// Retrieve the current state of a workflow run.
    pub async fn status(&self, handle: &SubmissionHandle) -> Result<RunStatus> {
        let url = self.endpoint(Some(&format!("{handle}/status")))?;
        let response: ApiResponse = self.http.get(url).send().await?.json().await?;

        if let Some(message) = response.failure_message() {
            return Err(Error::StatusFailed(message));
        }
        response
            .status
            .as_deref()
            .map(RunStatus::parse)
            .ok_or_else(|| Error::UnexpectedResponse("status response without a status".to_owned()))
    }

    /// Fetch the output manifest of a run. Only meaningful once the run has
    /// terminated successfully.
    pub async fn outputs(&self, handle: &SubmissionHandle) -> Result<serde_json::Map<String, Value>> {
        let url = self.endpoint(Some(&format!("{handle}/outputs")))?;
        let response: ApiResponse = self.http.get(url).send().await?.json().await?;

        if let Some(message) = response.failure_message() {
            return Err(Error::OutputsFailed(message));
        }
        response
            .outputs
            .ok_or_else(|| Error::UnexpectedResponse("outputs response without outputs".to_owned()))
    }

    /// Ask the server to abort a running workflow. Best-effort; the caller
    /// does not wait for the abort to become terminal.
    pub async fn abort(&self, handle: &SubmissionHandle) -> Result<RunStatus> {
        let url = self.endpoint(Some(&format!("{handle}/abort")))?;
        let response: ApiResponse = self.http.post(url).send().await?.json().await?;

        if let Some(message) = response.failure_message() {
            return Err(Error::AbortFailed(message));
        }
        response
            .status
            .as_deref()
            .map(RunStatus::parse)
            .ok_or_else(|| Error::UnexpectedResponse("abort response without a status".to_owned()))
    }
}

fn file_part(path: &Path) -> Result<Part> {
    let content = fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Part::bytes(content).file_name(file_name))
}

/// Whether a workflow source string is a URL the server should fetch.
pub fn is_url(source: &str) -> bool {
    Regex::new(URL_PATTERN)
        .expect("hard-coded pattern")
        .is_match(source)
}
