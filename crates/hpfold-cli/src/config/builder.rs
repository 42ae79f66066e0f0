use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AppConfig, OutputPaths};
use crate::cli::FoldArgs;
use crate::error::{CliError, Result};
use hpfold::core::models::sequence::HpSequence;
use hpfold::core::qubo::builder::PenaltyWeights;
use hpfold::engine::config::FoldingConfigBuilder;
use hpfold::engine::error::EngineError;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

pub fn build_config(args: &FoldArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;
    debug!("Merged file configuration: {:?}", file_config);

    let sequence_str = args
        .sequence
        .as_deref()
        .or(file_config.sequence.as_deref())
        .unwrap_or(&defaults.sequence);
    let sequence =
        HpSequence::parse(sequence_str).map_err(|e| CliError::Core(EngineError::from(e)))?;

    let sampler_file = file_config.sampler.take().unwrap_or_default();
    let penalties = file_config
        .penalties
        .take()
        .unwrap_or_default()
        .merge_onto(PenaltyWeights::default());

    let mut builder = FoldingConfigBuilder::new()
        .sequence(sequence)
        .penalties(penalties)
        .num_reads(
            args.num_reads
                .or(sampler_file.num_reads)
                .unwrap_or(defaults.num_reads),
        )
        .sweeps(
            args.sweeps
                .or(sampler_file.sweeps)
                .unwrap_or(defaults.sweeps),
        );
    if let Some(side) = args.lattice_side.or(file_config.lattice_side) {
        builder = builder.lattice_side(side);
    }
    if let Some(seed) = args.seed.or(sampler_file.seed) {
        builder = builder.seed(seed);
    }
    if let Some([hot, cold]) = sampler_file.beta_range {
        builder = builder.beta_range((hot, cold));
    }
    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let output_file = file_config.output.take().unwrap_or_default();
    let outputs = OutputPaths {
        image: args
            .output
            .clone()
            .or(output_file.image)
            .unwrap_or(defaults.image),
        svg: args.svg.clone().or(output_file.svg),
        samples_csv: args.samples_csv.clone().or(output_file.samples_csv),
    };

    Ok(AppConfig {
        core_config,
        outputs,
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn parse_beta_range(key: &str, value: &str) -> Result<[f64; 2]> {
    let (hot, cold) = value.split_once(',').ok_or_else(|| {
        CliError::Config(format!(
            "Invalid value for {}: '{}'. Expected HOT,COLD.",
            key, value
        ))
    })?;
    Ok([
        parse_value(key, hot, "float")?,
        parse_value(key, cold, "float")?,
    ])
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
            CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            ))
        })?;

        match key {
            "sequence" => config.sequence = Some(value_str.to_string()),
            "lattice-side" => config.lattice_side = Some(parse_value(key, value_str, "integer")?),
            "penalties.hh-contact" => {
                config
                    .penalties
                    .get_or_insert_with(Default::default)
                    .hh_contact = Some(parse_value(key, value_str, "float")?);
            }
            "penalties.one-site" => {
                config
                    .penalties
                    .get_or_insert_with(Default::default)
                    .one_site = Some(parse_value(key, value_str, "float")?);
            }
            "penalties.self-avoidance" => {
                config
                    .penalties
                    .get_or_insert_with(Default::default)
                    .self_avoidance = Some(parse_value(key, value_str, "float")?);
            }
            "penalties.connectivity" => {
                config
                    .penalties
                    .get_or_insert_with(Default::default)
                    .connectivity = Some(parse_value(key, value_str, "float")?);
            }
            "sampler.num-reads" => {
                config
                    .sampler
                    .get_or_insert_with(Default::default)
                    .num_reads = Some(parse_value(key, value_str, "integer")?);
            }
            "sampler.sweeps" => {
                config.sampler.get_or_insert_with(Default::default).sweeps =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "sampler.seed" => {
                config.sampler.get_or_insert_with(Default::default).seed =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "sampler.beta-range" => {
                config
                    .sampler
                    .get_or_insert_with(Default::default)
                    .beta_range = Some(parse_beta_range(key, value_str)?);
            }
            "output.image" => {
                config.output.get_or_insert_with(Default::default).image =
                    Some(PathBuf::from(value_str));
            }
            "output.svg" => {
                config.output.get_or_insert_with(Default::default).svg =
                    Some(PathBuf::from(value_str));
            }
            "output.samples-csv" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .samples_csv = Some(PathBuf::from(value_str));
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_reproduce_the_demo_run() {
        let app = build_config(&FoldArgs::default()).expect("build ok");
        let cfg = app.core_config;

        assert_eq!(cfg.sequence.to_string(), "PPHPPHP");
        assert_eq!(cfg.lattice_side, 4);
        assert_eq!(cfg.sampler.num_reads, 1000);
        assert_eq!(cfg.sampler.sweeps, 100);
        assert_eq!(cfg.sampler.seed, None);
        assert_eq!(cfg.penalties, PenaltyWeights::default());
        assert_eq!(app.outputs.image, PathBuf::from("result.png"));
        assert!(app.outputs.svg.is_none());
        assert!(app.outputs.samples_csv.is_none());
    }

    #[test]
    fn file_values_are_merged_over_defaults() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(
            &cfg_path,
            r#"
            sequence = "HPHPPH"
            lattice-side = 5

            [penalties]
            connectivity = -4.0

            [sampler]
            sweeps = 250
            seed = 42
            beta-range = [0.2, 8.0]

            [output]
            image = "fold.png"
            svg = "fold.svg"
            "#,
        )
        .unwrap();

        let args = FoldArgs {
            config: Some(cfg_path),
            ..FoldArgs::default()
        };
        let app = build_config(&args).expect("build ok");
        let cfg = app.core_config;

        assert_eq!(cfg.sequence.to_string(), "HPHPPH");
        assert_eq!(cfg.lattice_side, 5);
        assert_eq!(cfg.penalties.connectivity, -4.0);
        assert_eq!(cfg.penalties.self_avoidance, 10.0);
        assert_eq!(cfg.sampler.num_reads, 1000);
        assert_eq!(cfg.sampler.sweeps, 250);
        assert_eq!(cfg.sampler.seed, Some(42));
        assert_eq!(cfg.sampler.beta_range, Some((0.2, 8.0)));
        assert_eq!(app.outputs.image, PathBuf::from("fold.png"));
        assert_eq!(app.outputs.svg, Some(PathBuf::from("fold.svg")));
    }

    #[test]
    fn cli_flags_override_set_values_and_file() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(&cfg_path, "[sampler]\nnum-reads = 10\nsweeps = 10\n").unwrap();

        let args = FoldArgs {
            config: Some(cfg_path),
            num_reads: Some(30),
            sequence: Some("HPPH".to_string()),
            output: Some(PathBuf::from("cli.png")),
            set_values: vec![
                "sampler.num-reads=20".to_string(),
                "sampler.sweeps=40".to_string(),
                "sequence=PPPP".to_string(),
            ],
            ..FoldArgs::default()
        };
        let app = build_config(&args).expect("build ok");
        let cfg = app.core_config;

        assert_eq!(cfg.sampler.num_reads, 30);
        assert_eq!(cfg.sampler.sweeps, 40);
        assert_eq!(cfg.sequence.to_string(), "HPPH");
        assert_eq!(app.outputs.image, PathBuf::from("cli.png"));
    }

    #[test]
    fn set_values_cover_penalties_and_outputs() {
        let args = FoldArgs {
            set_values: vec![
                "penalties.hh-contact=-2".to_string(),
                "penalties.one-site=3.5".to_string(),
                "penalties.self-avoidance=12".to_string(),
                "sampler.beta-range=0.5, 5".to_string(),
                "output.samples-csv=samples.csv".to_string(),
                "lattice-side=6".to_string(),
            ],
            ..FoldArgs::default()
        };
        let app = build_config(&args).expect("build ok");
        let cfg = app.core_config;

        assert_eq!(cfg.penalties.hh_contact, -2.0);
        assert_eq!(cfg.penalties.one_site, 3.5);
        assert_eq!(cfg.penalties.self_avoidance, 12.0);
        assert_eq!(cfg.sampler.beta_range, Some((0.5, 5.0)));
        assert_eq!(cfg.lattice_side, 6);
        assert_eq!(
            app.outputs.samples_csv,
            Some(PathBuf::from("samples.csv"))
        );
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in ["sampler.sweeps", "sampler.sweeps=many", "unknown.key=1"] {
            let args = FoldArgs {
                set_values: vec![bad.to_string()],
                ..FoldArgs::default()
            };
            assert!(
                matches!(build_config(&args), Err(CliError::Config(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn amino_acid_sequences_are_accepted() {
        let args = FoldArgs {
            sequence: Some("MKVLA".to_string()),
            ..FoldArgs::default()
        };
        let app = build_config(&args).expect("build ok");
        assert_eq!(app.core_config.sequence.len(), 5);
    }

    #[test]
    fn invalid_sequence_is_a_core_error() {
        let args = FoldArgs {
            sequence: Some("HPX1".to_string()),
            ..FoldArgs::default()
        };
        assert!(matches!(build_config(&args), Err(CliError::Core(_))));
    }

    #[test]
    fn lattice_too_small_is_a_config_error() {
        let args = FoldArgs {
            lattice_side: Some(2),
            ..FoldArgs::default()
        };
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }
}
