use crate::core::models::conformation::Conformation;
use crate::core::qubo::builder::{FoldingQubo, QuboBuilder};
use crate::engine::config::FoldingConfig;
use crate::engine::decode::decode;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::sampler::Sampler;
use crate::engine::sampleset::SampleSet;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct FoldResult {
    pub problem: FoldingQubo,
    pub sampleset: SampleSet,
    /// Decoded from the lowest-energy sample.
    pub conformation: Conformation,
}

impl FoldResult {
    pub fn best_energy(&self) -> Option<f64> {
        self.sampleset.first().map(|r| r.energy)
    }
}

#[instrument(skip_all, name = "fold_workflow", fields(sequence = %config.sequence, sampler = sampler.name()))]
pub fn run(
    config: &FoldingConfig,
    sampler: &dyn Sampler,
    reporter: &ProgressReporter,
) -> Result<FoldResult, EngineError> {
    // === Phase 1: Encode the chain as a QUBO ===
    reporter.report(Progress::PhaseStart {
        name: "Building QUBO",
    });
    let problem = QuboBuilder::new(&config.sequence)
        .lattice(config.lattice())
        .weights(config.penalties)
        .build()?;
    info!(
        variables = problem.qubo.num_variables(),
        interactions = problem.qubo.num_interactions(),
        "Folding model built."
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Sample ===
    reporter.report(Progress::PhaseStart { name: "Sampling" });
    let sampleset = sampler.sample(&problem.qubo, &config.sampler, reporter)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Decode the best sample ===
    reporter.report(Progress::PhaseStart { name: "Decoding" });
    let best = sampleset.first().ok_or(EngineError::EmptySampleSet)?;
    info!(
        energy = best.energy,
        occurrences = best.num_occurrences,
        "Decoding lowest-energy sample."
    );
    let conformation = decode(
        &best.sample,
        &problem.index,
        &config.sequence,
        problem.lattice,
    );
    if !conformation.is_valid() {
        reporter.report(Progress::Message(format!(
            "Lowest-energy sample is not a valid fold ({} issue(s))",
            conformation.issues().len()
        )));
    }
    reporter.report(Progress::PhaseFinish);

    Ok(FoldResult {
        problem,
        sampleset,
        conformation,
    })
}
