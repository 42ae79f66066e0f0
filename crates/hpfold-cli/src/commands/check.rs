use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use hpfold::engine::progress::ProgressReporter;
use hpfold::engine::sampler::{Sampler, SamplerParams, SimulatedAnnealingSampler};
use hpfold::workflows;
use tracing::info;

pub async fn run(args: CheckArgs, quiet: bool) -> Result<()> {
    let params = SamplerParams {
        num_reads: args.num_reads,
        sweeps: args.sweeps,
        beta_range: None,
        seed: args.seed,
    };

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let sampler = SimulatedAnnealingSampler::new();

    println!(
        "Checking sampler '{}' against the exact solver...",
        sampler.name()
    );
    let report =
        tokio::task::block_in_place(|| workflows::check::run(&sampler, &params, &reporter))?;
    info!(?report, "Sampler check finished.");

    println!(
        "Expected ground-state energy: {:.4}, found: {:.4}",
        report.expected_energy, report.found_energy
    );
    if report.passed {
        println!("ALL TESTS PASSED");
        Ok(())
    } else {
        Err(CliError::Other(anyhow::anyhow!(
            "Sampler '{}' did not reach the ground state ({:.4} > {:.4})",
            report.sampler,
            report.found_energy,
            report.expected_energy
        )))
    }
}
