//! Lifecycle of a single workflow run: stage, submit, wait, collect.
//!
//! One invocation drives at most one outstanding submission; composite
//! commands run complete submit-wait-collect cycles sequentially. The only
//! suspension point is the sleep between status polls. An interrupt while
//! waiting sends a best-effort abort and ends the run immediately.

/// Collection of output files into the run directory
pub mod collect;
/// Local file staging performed before submission
pub mod stage;

use std::time::Duration;

use log::{info, warn};

use crate::catalog::{GenomeVersion, Workflow};
use crate::cromwell::{CromwellClient, RunStatus, SubmissionHandle};
use crate::error::Result;
use crate::inputs::InputDocument;
use crate::RunDirectory;

/// How a run ended. A workflow that terminated in a non-`Succeeded` state
/// is a normal unsuccessful outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The workflow reached a terminal status.
    Completed(RunStatus),
    /// Files were staged but nothing was submitted.
    DryRun,
    /// The wait was interrupted and an abort was sent.
    Aborted,
}

impl RunOutcome {
    /// Whether the overall operation should report success (exit code 0).
    pub fn succeeded(&self) -> bool {
        matches!(
            self,
            RunOutcome::Completed(RunStatus::Succeeded) | RunOutcome::DryRun
        )
    }
}

/// Behaviour switches shared by all run commands.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Time to sleep between status polls.
    pub sleep_time: Duration,
    /// Stage files but do not submit.
    pub dry_run: bool,
    /// Move output files instead of copying them.
    pub move_outputs: bool,
}

/// Stage, submit, wait for, and collect one workflow run.
pub async fn submit_workflow(
    client: &CromwellClient,
    workflow: Workflow,
    version: GenomeVersion,
    inputs: &InputDocument,
    run_dir: &RunDirectory,
    options: &RunOptions,
) -> Result<RunOutcome> {
    let staged = stage::stage_run(workflow, version, inputs, run_dir)?;

    if options.dry_run {
        info!(
            "Workflow will not be submitted. See workflow files in {}",
            run_dir.path.display()
        );
        return Ok(RunOutcome::DryRun);
    }

    let submission = staged.into_submission();
    let handle = client.submit(&submission).await?;
    info!("Workflow submitted to {}", client.host());
    info!("Workflow id: {handle}");
    info!("Starting {workflow} workflow with reference genome version {version}. Ctrl-C to abort.");

    let status = match wait_for_completion(client, &handle, options.sleep_time).await? {
        Some(status) => status,
        None => {
            warn!("Interrupted, aborting workflow {handle}");
            if let Err(err) = client.abort(&handle).await {
                warn!("Abort request failed: {err}");
            }
            return Ok(RunOutcome::Aborted);
        }
    };

    info!("Workflow terminated: {status}");
    if status == RunStatus::Succeeded {
        let outputs = client.outputs(&handle).await?;
        collect::collect_outputs(&outputs, run_dir, options.move_outputs)?;
    }
    Ok(RunOutcome::Completed(status))
}

/// Poll until the run leaves `Submitted`/`Running`.
///
/// Sleeps for `sleep_time` before every poll. Returns `None` when the wait
/// is interrupted by Ctrl-C; the caller owns the abort.
pub async fn wait_for_completion(
    client: &CromwellClient,
    handle: &SubmissionHandle,
    sleep_time: Duration,
) -> Result<Option<RunStatus>> {
    // one long-lived signal future: an interrupt arriving at any point of
    // the wait, including during a status request, is latched until the
    // next select
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                return Ok(None);
            }
            _ = tokio::time::sleep(sleep_time) => {
                let status = client.status(handle).await?;
                if status.is_terminal() {
                    return Ok(Some(status));
                }
                info!("Workflow {handle} is {status}");
            }
        }
    }
}
