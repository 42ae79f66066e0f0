//! Samplers that draw low-energy states from a [`Qubo`].

pub mod annealing;
pub mod exact;

pub use annealing::SimulatedAnnealingSampler;
pub use exact::ExactSolver;

use super::config::ConfigError;
use super::error::EngineError;
use super::progress::ProgressReporter;
use super::sampleset::SampleSet;
use crate::core::qubo::Qubo;

#[derive(Debug, Clone, PartialEq)]
pub struct SamplerParams {
    /// Number of independent reads.
    pub num_reads: usize,
    /// Sweeps per read; one sweep attempts a flip of every variable.
    pub sweeps: usize,
    /// `(hot, cold)` inverse temperatures. Derived from the model when `None`.
    pub beta_range: Option<(f64, f64)>,
    pub seed: Option<u64>,
}

impl Default for SamplerParams {
    fn default() -> Self {
        Self {
            num_reads: 1000,
            sweeps: 100,
            beta_range: None,
            seed: None,
        }
    }
}

impl SamplerParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_reads == 0 {
            return Err(ConfigError::Invalid {
                parameter: "num_reads",
                reason: "must be positive".to_string(),
            });
        }
        if self.sweeps == 0 {
            return Err(ConfigError::Invalid {
                parameter: "sweeps",
                reason: "must be positive".to_string(),
            });
        }
        if let Some((hot, cold)) = self.beta_range {
            if !(hot.is_finite() && cold.is_finite() && hot > 0.0 && hot <= cold) {
                return Err(ConfigError::Invalid {
                    parameter: "beta_range",
                    reason: format!(
                        "expected 0 < hot <= cold, got ({}, {})",
                        hot, cold
                    ),
                });
            }
        }
        Ok(())
    }
}

pub trait Sampler: Sync {
    fn name(&self) -> &'static str;

    fn sample(
        &self,
        qubo: &Qubo,
        params: &SamplerParams,
        reporter: &ProgressReporter,
    ) -> Result<SampleSet, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_reproduce_demo_run() {
        let params = SamplerParams::default();
        assert_eq!(params.num_reads, 1000);
        assert_eq!(params.sweeps, 100);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_beta_range() {
        let params = SamplerParams {
            beta_range: Some((5.0, 1.0)),
            ..SamplerParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::Invalid {
                parameter: "beta_range",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_zero_sweeps() {
        let params = SamplerParams {
            sweeps: 0,
            ..SamplerParams::default()
        };
        assert!(params.validate().is_err());
    }
}
