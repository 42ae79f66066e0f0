use crate::cli::FoldArgs;
use crate::config::{AppConfig, build_config};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use hpfold::core::io::png::PngRenderer;
use hpfold::core::io::samples::write_samples_to_path;
use hpfold::core::io::svg::SvgRenderer;
use hpfold::core::io::traits::Renderer;
use hpfold::engine::error::EngineError;
use hpfold::engine::progress::ProgressReporter;
use hpfold::engine::sampler::SimulatedAnnealingSampler;
use hpfold::workflows::{self, fold::FoldResult};
use tracing::{info, warn};

pub async fn run(args: FoldArgs, quiet: bool) -> Result<()> {
    info!("Merging configuration from defaults, file and CLI arguments...");
    let app_config = build_config(&args)?;
    let config = &app_config.core_config;

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let sampler = SimulatedAnnealingSampler::new();

    println!(
        "Folding {} ({} beads) on a {}x{} lattice...",
        config.sequence,
        config.sequence.len(),
        config.lattice_side,
        config.lattice_side
    );
    info!("Invoking the core folding workflow...");

    let result =
        tokio::task::block_in_place(|| workflows::fold::run(config, &sampler, &reporter))?;

    print_summary(&result, args.show);
    write_outputs(&result, &app_config)?;
    Ok(())
}

fn print_summary(result: &FoldResult, show: usize) {
    if show > 0 {
        println!("{}", result.sampleset.table(&result.problem.index, show));
    }

    let conformation = &result.conformation;
    println!("Positions: {}", conformation);
    if conformation.is_valid() {
        println!(
            "✓ Valid fold with {} H-H contact(s) (HP energy {})",
            conformation.hh_contacts().len(),
            conformation.hp_energy()
        );
    } else {
        warn!(
            "Best sample is not a valid fold ({} issue(s)).",
            conformation.issues().len()
        );
        println!("Warning: the best sample does not decode to a valid fold:");
        for issue in conformation.issues() {
            println!("  - {}", issue);
        }
    }
}

fn write_outputs(result: &FoldResult, app_config: &AppConfig) -> Result<()> {
    let outputs = &app_config.outputs;
    let conformation = &result.conformation;

    PngRenderer::default()
        .render_to_path(conformation, &outputs.image)
        .map_err(EngineError::from)?;
    info!("Wrote image to {:?}", outputs.image);
    println!("✓ Image written to: {}", outputs.image.display());

    if let Some(svg_path) = &outputs.svg {
        SvgRenderer::default()
            .render_to_path(conformation, svg_path)
            .map_err(EngineError::from)?;
        println!("✓ SVG written to: {}", svg_path.display());
    }

    if let Some(csv_path) = &outputs.samples_csv {
        write_samples_to_path(csv_path, result.sampleset.rows(&result.problem.index))
            .map_err(EngineError::from)?;
        println!(
            "✓ {} distinct sample(s) written to: {}",
            result.sampleset.len(),
            csv_path.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use tempfile::tempdir;

    fn small_run_args(dir: &std::path::Path) -> FoldArgs {
        FoldArgs {
            sequence: Some("HPPH".to_string()),
            num_reads: Some(16),
            sweeps: Some(50),
            seed: Some(3),
            output: Some(dir.join("fold.png")),
            svg: Some(dir.join("fold.svg")),
            samples_csv: Some(dir.join("samples.csv")),
            show: 3,
            ..FoldArgs::default()
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn fold_writes_all_requested_outputs() {
        let dir = tempdir().unwrap();
        run(small_run_args(dir.path()), true).await.unwrap();

        let png = std::fs::read(dir.path().join("fold.png")).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let svg = std::fs::read_to_string(dir.path().join("fold.svg")).unwrap();
        assert!(svg.starts_with("<svg") || svg.starts_with("<?xml"));

        let csv = std::fs::read_to_string(dir.path().join("samples.csv")).unwrap();
        assert!(csv.lines().count() >= 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn fold_reports_bad_configuration() {
        let dir = tempdir().unwrap();
        let args = FoldArgs {
            set_values: vec!["sampler.num-reads=0".to_string()],
            ..small_run_args(dir.path())
        };
        let err = run(args, true).await.unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert!(!dir.path().join("fold.png").exists());
    }
}
