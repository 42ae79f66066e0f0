use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "HP-Fold CLI - Fold HP lattice proteins by sampling a QUBO encoding of the 2D square-lattice model.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fold a sequence on the square lattice and render the best conformation.
    Fold(FoldArgs),
    /// Check that the sampler reaches the exact ground state of a small reference problem.
    Check(CheckArgs),
}

/// Arguments for the `fold` subcommand.
#[derive(Args, Debug, Default)]
pub struct FoldArgs {
    // --- Problem ---
    /// HP string (e.g., PPHPPHP) or one-letter amino acid sequence.
    #[arg(short = 'i', long, value_name = "SEQUENCE")]
    pub sequence: Option<String>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Side length of the square lattice. Defaults to half the chain length plus one.
    #[arg(short = 'L', long, value_name = "INT")]
    pub lattice_side: Option<usize>,

    // --- Sampler ---
    /// Number of independent annealing reads.
    #[arg(short = 'n', long, value_name = "INT")]
    pub num_reads: Option<usize>,

    /// Number of sweeps per read.
    #[arg(long, value_name = "INT")]
    pub sweeps: Option<usize>,

    /// Seed for reproducible sampling.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    // --- Output ---
    /// Path for the rendered PNG image.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also render the conformation as SVG.
    #[arg(long, value_name = "PATH")]
    pub svg: Option<PathBuf>,

    /// Write the aggregated sample set as CSV.
    #[arg(long, value_name = "PATH")]
    pub samples_csv: Option<PathBuf>,

    /// Number of sample set rows to print.
    #[arg(long, value_name = "INT", default_value_t = 5)]
    pub show: usize,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S sampler.num-reads=500
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Number of annealing reads used for the check.
    #[arg(short = 'n', long, value_name = "INT", default_value_t = 64)]
    pub num_reads: usize,

    /// Number of sweeps per read.
    #[arg(long, value_name = "INT", default_value_t = 500)]
    pub sweeps: usize,

    /// Seed for reproducible sampling.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fold_parses_overrides() {
        let cli = Cli::try_parse_from([
            "hpfold",
            "-vv",
            "fold",
            "--sequence",
            "HPPH",
            "--num-reads",
            "10",
            "-S",
            "sampler.sweeps=20",
            "--svg",
            "out.svg",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Fold(args) = cli.command else {
            panic!("expected fold subcommand");
        };
        assert_eq!(args.sequence.as_deref(), Some("HPPH"));
        assert_eq!(args.num_reads, Some(10));
        assert_eq!(args.set_values, vec!["sampler.sweeps=20".to_string()]);
        assert_eq!(args.svg, Some(PathBuf::from("out.svg")));
        assert_eq!(args.show, 5);
        assert!(args.output.is_none());
    }

    #[test]
    fn check_uses_defaults() {
        let cli = Cli::try_parse_from(["hpfold", "check", "-j", "2"]).unwrap();
        assert_eq!(cli.threads, Some(2));
        let Commands::Check(args) = cli.command else {
            panic!("expected check subcommand");
        };
        assert_eq!((args.num_reads, args.sweeps, args.seed), (64, 500, None));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["hpfold", "-q", "-v", "check"]).is_err());
    }
}
