use crate::core::models::lattice::Lattice;
use crate::core::models::sequence::HpSequence;
use crate::core::qubo::builder::QuboBuilder;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::sampler::{ExactSolver, Sampler, SamplerParams};
use tracing::{info, instrument, warn};

pub const REFERENCE_SEQUENCE: &str = "HPPH";
pub const REFERENCE_LATTICE_SIDE: usize = 3;
const ENERGY_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub sampler: &'static str,
    pub expected_energy: f64,
    pub found_energy: f64,
    pub passed: bool,
}

/// Solves a small reference folding problem exactly and checks that `sampler`
/// reaches the same ground-state energy.
#[instrument(skip_all, name = "check_workflow", fields(sampler = sampler.name()))]
pub fn run(
    sampler: &dyn Sampler,
    params: &SamplerParams,
    reporter: &ProgressReporter,
) -> Result<CheckReport, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Building reference problem",
    });
    let sequence = HpSequence::from_hp_str(REFERENCE_SEQUENCE)?;
    let problem = QuboBuilder::new(&sequence)
        .lattice(Lattice::new(REFERENCE_LATTICE_SIDE))
        .build()?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Exact solve",
    });
    let exact = ExactSolver::default().sample(&problem.qubo, params, reporter)?;
    let expected_energy = exact.first().ok_or(EngineError::EmptySampleSet)?.energy;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart { name: "Sampling" });
    let sampled = sampler.sample(&problem.qubo, params, reporter)?;
    let found_energy = sampled.first().ok_or(EngineError::EmptySampleSet)?.energy;
    reporter.report(Progress::PhaseFinish);

    let passed = (expected_energy - found_energy).abs() <= ENERGY_TOLERANCE;
    if passed {
        info!(expected_energy, found_energy, "Sampler reached the ground state.");
    } else {
        warn!(expected_energy, found_energy, "Sampler missed the ground state.");
    }

    Ok(CheckReport {
        sampler: sampler.name(),
        expected_energy,
        found_energy,
        passed,
    })
}
