use std::fs::File;
use std::io::{BufReader, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{error, info, warn};
use url::Url;

use macchiato::catalog::Workflow;
use macchiato::cli::{AllArgs, Cli, Command, HcArgs, IntervalsArgs, JointArgs, ServerArgs};
use macchiato::cromwell::{CromwellClient, DEFAULT_HOST};
use macchiato::inputs::haplotype_calling::haplotype_calling_inputs;
use macchiato::inputs::joint_discovery::joint_discovery_inputs;
use macchiato::intervals::generate_intervals;
use macchiato::runner::{submit_workflow, RunOptions, RunOutcome};
use macchiato::RunDirectory;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Command::All(args) => Ok(run_all(args).await?.succeeded()),
        Command::Hc(args) => Ok(run_haplotype_calling(args).await?.succeeded()),
        Command::Joint(args) => Ok(run_joint_discovery(args).await?.succeeded()),
        Command::Intervals(args) => run_intervals(args),
    }
}

fn client_for(server: &ServerArgs) -> anyhow::Result<CromwellClient> {
    let host = match &server.host {
        Some(host) => host.clone(),
        None => Url::parse(DEFAULT_HOST)?,
    };
    Ok(CromwellClient::new(
        host,
        Duration::from_secs(server.timeout),
    )?)
}

fn run_options(server: &ServerArgs) -> RunOptions {
    RunOptions {
        sleep_time: Duration::from_secs(server.sleep_time),
        dry_run: server.dont_run,
        move_outputs: server.move_outputs,
    }
}

async fn run_haplotype_calling(args: HcArgs) -> anyhow::Result<RunOutcome> {
    let run_dir = RunDirectory::create(&args.destination)?;
    let client = client_for(&args.server)?;

    let inputs = haplotype_calling_inputs(
        &args.config,
        &args.reference.reference,
        args.reference.genome_version,
        &args.overrides,
    )?;
    let outcome = submit_workflow(
        &client,
        Workflow::HaplotypeCalling,
        args.reference.genome_version,
        &inputs,
        &run_dir,
        &run_options(&args.server),
    )
    .await?;
    Ok(outcome)
}

async fn run_joint_discovery(args: JointArgs) -> anyhow::Result<RunOutcome> {
    let run_dir = RunDirectory::create(&args.destination)?;
    let client = client_for(&args.server)?;

    let inputs = joint_discovery_inputs(
        &args.config,
        &args.reference.reference,
        args.reference.genome_version,
        &args.callset_name,
        &args.overrides,
    )?;
    let outcome = submit_workflow(
        &client,
        Workflow::JointDiscovery,
        args.reference.genome_version,
        &inputs,
        &run_dir,
        &run_options(&args.server),
    )
    .await?;
    Ok(outcome)
}

/// Both workflows in sequence. Joint-discovery consumes the gVCFs that
/// haplotype-calling collected into the destination, so it is not attempted
/// unless the first run succeeded.
async fn run_all(args: AllArgs) -> anyhow::Result<RunOutcome> {
    let run_dir = RunDirectory::create(&args.destination)?;
    let client = client_for(&args.server)?;
    let options = run_options(&args.server);
    let version = args.reference.genome_version;

    let inputs = haplotype_calling_inputs(
        &args.config,
        &args.reference.reference,
        version,
        &args.overrides,
    )?;
    let outcome = submit_workflow(
        &client,
        Workflow::HaplotypeCalling,
        version,
        &inputs,
        &run_dir,
        &options,
    )
    .await?;

    match outcome {
        RunOutcome::DryRun => return Ok(RunOutcome::DryRun),
        ref completed if completed.succeeded() => {
            info!("haplotype-calling succeeded, starting joint-discovery");
        }
        other => {
            warn!("haplotype-calling did not succeed, skipping joint-discovery");
            return Ok(other);
        }
    }

    let joint_config = args.joint_config(run_dir.path.clone());
    let inputs = joint_discovery_inputs(
        &joint_config,
        &args.reference.reference,
        version,
        &args.callset_name,
        &args.joint_overrides(),
    )?;
    let outcome = submit_workflow(
        &client,
        Workflow::JointDiscovery,
        version,
        &inputs,
        &run_dir,
        &options,
    )
    .await?;
    Ok(outcome)
}

fn run_intervals(args: IntervalsArgs) -> anyhow::Result<bool> {
    let reader = BufReader::new(File::open(&args.genome_sizes)?);
    let intervals = generate_intervals(reader, args.window_size)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for interval in intervals {
        writeln!(out, "{interval}")?;
    }
    Ok(true)
}
