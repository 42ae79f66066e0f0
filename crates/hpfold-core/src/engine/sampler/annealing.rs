use super::{Sampler, SamplerParams};
use crate::core::qubo::{Qubo, QuboGraph};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::sampleset::SampleSet;
use rand::prelude::*;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Metropolis single-flip simulated annealing over a geometric beta schedule.
///
/// Reads are independent and seeded with `seed + read`, so a seeded run gives
/// the same sample set regardless of how reads are scheduled on threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedAnnealingSampler;

impl SimulatedAnnealingSampler {
    pub fn new() -> Self {
        Self
    }
}

impl Sampler for SimulatedAnnealingSampler {
    fn name(&self) -> &'static str {
        "simulated-annealing"
    }

    #[instrument(skip_all, name = "simulated_annealing", fields(reads = params.num_reads, sweeps = params.sweeps))]
    fn sample(
        &self,
        qubo: &Qubo,
        params: &SamplerParams,
        reporter: &ProgressReporter,
    ) -> Result<SampleSet, EngineError> {
        params.validate()?;

        let graph = qubo.to_graph();
        let (beta_hot, beta_cold) = params
            .beta_range
            .unwrap_or_else(|| default_beta_range(&graph));
        let schedule = geometric_schedule(beta_hot, beta_cold, params.sweeps);
        let base_seed = params.seed.unwrap_or_else(rand::random);

        info!(
            variables = graph.num_variables(),
            beta_hot,
            beta_cold,
            seed = base_seed,
            "Starting simulated annealing."
        );

        reporter.report(Progress::TaskStart {
            total_steps: params.num_reads as u64,
        });

        let read_one = |read: usize| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(read as u64));
            let sample = anneal(&graph, &schedule, &mut rng);
            reporter.report(Progress::TaskIncrement);
            sample
        };

        #[cfg(not(feature = "parallel"))]
        let reads: Vec<Vec<u8>> = (0..params.num_reads).map(read_one).collect();

        #[cfg(feature = "parallel")]
        let reads: Vec<Vec<u8>> = (0..params.num_reads).into_par_iter().map(read_one).collect();

        reporter.report(Progress::TaskFinish);

        let sampleset = SampleSet::from_samples(qubo, reads)?;
        if let Some(best) = sampleset.first() {
            debug!(
                best_energy = best.energy,
                distinct = sampleset.len(),
                "Annealing finished."
            );
        }
        Ok(sampleset)
    }
}

/// `(hot, cold)` such that the hottest sweep accepts an uphill move against the
/// strongest local field half of the time and the coldest accepts one against
/// the weakest nonzero coupling 1% of the time.
pub fn default_beta_range(graph: &QuboGraph) -> (f64, f64) {
    match graph.field_range() {
        Some((max_field, min_field)) => {
            let hot = std::f64::consts::LN_2 / max_field;
            let cold = (100.0f64).ln() / min_field;
            (hot, cold.max(hot))
        }
        None => (0.1, 1.0),
    }
}

pub fn geometric_schedule(beta_hot: f64, beta_cold: f64, sweeps: usize) -> Vec<f64> {
    if sweeps <= 1 {
        return vec![beta_cold; sweeps];
    }
    let ratio = beta_cold / beta_hot;
    (0..sweeps)
        .map(|t| beta_hot * ratio.powf(t as f64 / (sweeps - 1) as f64))
        .collect()
}

fn anneal(graph: &QuboGraph, schedule: &[f64], rng: &mut impl Rng) -> Vec<u8> {
    let n = graph.num_variables();
    let mut state: Vec<u8> = (0..n).map(|_| u8::from(rng.gen_bool(0.5))).collect();
    for &beta in schedule {
        for k in 0..n {
            let delta = graph.delta_energy(&state, k);
            if delta <= 0.0 || rng.r#gen::<f64>() < (-beta * delta).exp() {
                state[k] ^= 1;
            }
        }
    }
    state
}
