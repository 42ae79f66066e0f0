use super::{Sampler, SamplerParams};
use crate::core::qubo::Qubo;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::sampleset::SampleSet;
use tracing::{info, instrument};

pub const DEFAULT_MAX_VARIABLES: usize = 24;
const TIE_TOLERANCE: f64 = 1e-9;
const PROGRESS_CHUNK: u64 = 1 << 16;

/// Enumerates every assignment in Gray-code order and returns all ground
/// states. Only practical for small models; larger ones are rejected.
#[derive(Debug, Clone, Copy)]
pub struct ExactSolver {
    pub max_variables: usize,
}

impl Default for ExactSolver {
    fn default() -> Self {
        Self {
            max_variables: DEFAULT_MAX_VARIABLES,
        }
    }
}

impl Sampler for ExactSolver {
    fn name(&self) -> &'static str {
        "exact"
    }

    #[instrument(skip_all, name = "exact_solver")]
    fn sample(
        &self,
        qubo: &Qubo,
        _params: &SamplerParams,
        reporter: &ProgressReporter,
    ) -> Result<SampleSet, EngineError> {
        let n = qubo.num_variables();
        if n > self.max_variables || n >= u64::BITS as usize {
            return Err(EngineError::ProblemTooLarge {
                num_variables: n,
                limit: self.max_variables,
            });
        }

        let graph = qubo.to_graph();
        let total: u64 = 1 << n;
        info!(variables = n, states = total, "Enumerating all states.");
        reporter.report(Progress::TaskStart {
            total_steps: total.div_ceil(PROGRESS_CHUNK),
        });

        let mut state = vec![0u8; n];
        let mut energy = qubo.offset();
        let mut best_energy = energy;
        let mut ground_states = vec![state.clone()];

        for step in 1..total {
            let bit = step.trailing_zeros() as usize;
            energy += graph.delta_energy(&state, bit);
            state[bit] ^= 1;

            if energy < best_energy - TIE_TOLERANCE {
                best_energy = energy;
                ground_states.clear();
                ground_states.push(state.clone());
            } else if (energy - best_energy).abs() <= TIE_TOLERANCE {
                ground_states.push(state.clone());
            }

            if step % PROGRESS_CHUNK == 0 {
                reporter.report(Progress::TaskIncrement);
            }
        }
        reporter.report(Progress::TaskFinish);

        Ok(SampleSet::from_samples(qubo, ground_states)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_all_degenerate_ground_states() {
        let mut q = Qubo::new(3);
        for u in 0..3 {
            q.add_linear(u, -1.0).unwrap();
        }
        q.add_quadratic(0, 1, 2.0).unwrap();
        q.add_quadratic(1, 2, 2.0).unwrap();
        q.add_quadratic(0, 2, 2.0).unwrap();

        let set = ExactSolver::default()
            .sample(&q, &SamplerParams::default(), &ProgressReporter::new())
            .unwrap();
        let samples: Vec<_> = set.records().iter().map(|r| r.sample.clone()).collect();
        assert_eq!(samples, vec![vec![0, 0, 1], vec![0, 1, 0], vec![1, 0, 0]]);
        assert!(set.records().iter().all(|r| r.energy == -1.0));
    }

    #[test]
    fn tracks_offset_in_energies() {
        let mut q = Qubo::new(1);
        q.add_linear(0, 2.0).unwrap();
        q.set_offset(5.0);
        let set = ExactSolver::default()
            .sample(&q, &SamplerParams::default(), &ProgressReporter::new())
            .unwrap();
        let best = set.first().unwrap();
        assert_eq!(best.sample, vec![0]);
        assert_eq!(best.energy, 5.0);
    }

    #[test]
    fn rejects_models_above_the_limit() {
        let solver = ExactSolver { max_variables: 4 };
        let err = solver
            .sample(
                &Qubo::new(5),
                &SamplerParams::default(),
                &ProgressReporter::new(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::ProblemTooLarge {
                num_variables: 5,
                limit: 4
            }
        ));
    }
}
