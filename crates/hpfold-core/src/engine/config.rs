use super::sampler::SamplerParams;
use crate::core::models::lattice::Lattice;
use crate::core::models::sequence::HpSequence;
use crate::core::qubo::builder::PenaltyWeights;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    Invalid {
        parameter: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoldingConfig {
    pub sequence: HpSequence,
    pub lattice_side: usize,
    pub penalties: PenaltyWeights,
    pub sampler: SamplerParams,
}

impl FoldingConfig {
    pub fn lattice(&self) -> Lattice {
        Lattice::new(self.lattice_side)
    }
}

#[derive(Default)]
pub struct FoldingConfigBuilder {
    sequence: Option<HpSequence>,
    lattice_side: Option<usize>,
    penalties: Option<PenaltyWeights>,
    num_reads: Option<usize>,
    sweeps: Option<usize>,
    beta_range: Option<(f64, f64)>,
    seed: Option<u64>,
}

impl FoldingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sequence(mut self, sequence: HpSequence) -> Self {
        self.sequence = Some(sequence);
        self
    }
    pub fn lattice_side(mut self, side: usize) -> Self {
        self.lattice_side = Some(side);
        self
    }
    pub fn penalties(mut self, penalties: PenaltyWeights) -> Self {
        self.penalties = Some(penalties);
        self
    }
    pub fn num_reads(mut self, n: usize) -> Self {
        self.num_reads = Some(n);
        self
    }
    pub fn sweeps(mut self, n: usize) -> Self {
        self.sweeps = Some(n);
        self
    }
    pub fn beta_range(mut self, range: (f64, f64)) -> Self {
        self.beta_range = Some(range);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<FoldingConfig, ConfigError> {
        let sequence = self
            .sequence
            .ok_or(ConfigError::MissingParameter("sequence"))?;

        let lattice_side = self
            .lattice_side
            .unwrap_or_else(|| Lattice::for_sequence(sequence.len()).side());
        check_lattice_fits(&sequence, lattice_side)?;

        let defaults = SamplerParams::default();
        let sampler = SamplerParams {
            num_reads: self.num_reads.unwrap_or(defaults.num_reads),
            sweeps: self.sweeps.unwrap_or(defaults.sweeps),
            beta_range: self.beta_range,
            seed: self.seed,
        };
        sampler.validate()?;

        let penalties = self.penalties.unwrap_or_default();
        penalties.validate().map_err(|e| ConfigError::Invalid {
            parameter: "penalties",
            reason: e.to_string(),
        })?;

        Ok(FoldingConfig {
            sequence,
            lattice_side,
            penalties,
            sampler,
        })
    }
}

/// Each parity class of beads needs at least as many sites of that parity.
fn check_lattice_fits(sequence: &HpSequence, side: usize) -> Result<(), ConfigError> {
    if side < 2 {
        return Err(ConfigError::Invalid {
            parameter: "lattice_side",
            reason: format!("must be at least 2, got {}", side),
        });
    }
    let lattice = Lattice::new(side);
    let n = sequence.len();
    let even_beads = n.div_ceil(2);
    let odd_beads = n / 2;
    let even_sites = lattice.sites_with_parity(0).count();
    let odd_sites = lattice.sites_with_parity(1).count();
    if even_beads > even_sites || odd_beads > odd_sites {
        return Err(ConfigError::Invalid {
            parameter: "lattice_side",
            reason: format!(
                "a {}x{} lattice cannot hold a chain of {} beads",
                side, side, n
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_sequence() -> HpSequence {
        HpSequence::from_hp_str("PPHPPHP").unwrap()
    }

    #[test]
    fn build_requires_sequence() {
        let err = FoldingConfigBuilder::new().build().unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("sequence"));
    }

    #[test]
    fn build_fills_demo_defaults() {
        let config = FoldingConfigBuilder::new()
            .sequence(demo_sequence())
            .build()
            .unwrap();
        assert_eq!(config.lattice_side, 4);
        assert_eq!(config.sampler.num_reads, 1000);
        assert_eq!(config.sampler.sweeps, 100);
        assert_eq!(config.sampler.seed, None);
        assert_eq!(config.penalties, PenaltyWeights::default());
        assert_eq!(config.lattice().num_sites(), 16);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = FoldingConfigBuilder::new()
            .sequence(demo_sequence())
            .lattice_side(5)
            .num_reads(10)
            .sweeps(20)
            .beta_range((0.5, 4.0))
            .seed(7)
            .build()
            .unwrap();
        assert_eq!(config.lattice_side, 5);
        assert_eq!(config.sampler.num_reads, 10);
        assert_eq!(config.sampler.sweeps, 20);
        assert_eq!(config.sampler.beta_range, Some((0.5, 4.0)));
        assert_eq!(config.sampler.seed, Some(7));
    }

    #[test]
    fn lattice_too_small_for_chain_is_rejected() {
        let err = FoldingConfigBuilder::new()
            .sequence(demo_sequence())
            .lattice_side(2)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                parameter: "lattice_side",
                ..
            }
        ));
    }

    #[test]
    fn zero_reads_are_rejected() {
        let err = FoldingConfigBuilder::new()
            .sequence(demo_sequence())
            .num_reads(0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                parameter: "num_reads",
                ..
            }
        ));
    }

    #[test]
    fn invalid_penalties_are_reported_as_config_errors() {
        let err = FoldingConfigBuilder::new()
            .sequence(demo_sequence())
            .penalties(PenaltyWeights {
                one_site: -1.0,
                ..PenaltyWeights::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                parameter: "penalties",
                ..
            }
        ));
    }
}
