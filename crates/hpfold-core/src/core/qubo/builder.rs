use super::{Qubo, QuboError};
use crate::core::models::lattice::{Lattice, Site};
use crate::core::models::sequence::HpSequence;
use crate::core::models::variables::{VariableIndex, VariableKey};
use tracing::{debug, instrument};

/// Coefficients of the four term families in the folding encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyWeights {
    /// Reward for a non-bonded H-H lattice contact (negative).
    pub hh_contact: f64,
    /// Penalty for a bead occupying two sites at once, added in both pair orders.
    pub one_site: f64,
    /// Penalty for two beads sharing a site.
    pub self_avoidance: f64,
    /// Reward for consecutive beads on adjacent sites (negative).
    pub connectivity: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            hh_contact: -1.0,
            one_site: 2.0,
            self_avoidance: 10.0,
            connectivity: -3.0,
        }
    }
}

impl PenaltyWeights {
    pub fn validate(&self) -> Result<(), QuboError> {
        let checks = [
            ("one_site", self.one_site),
            ("self_avoidance", self.self_avoidance),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(QuboError::InvalidPenalty { name, value });
            }
        }
        for (name, value) in [
            ("hh_contact", self.hh_contact),
            ("connectivity", self.connectivity),
        ] {
            if !value.is_finite() {
                return Err(QuboError::NonFinitePenalty { name, value });
            }
        }
        Ok(())
    }
}

/// A folding problem ready for sampling: the model plus the variable layout
/// needed to interpret its samples.
#[derive(Debug, Clone)]
pub struct FoldingQubo {
    pub qubo: Qubo,
    pub index: VariableIndex,
    pub lattice: Lattice,
}

impl FoldingQubo {
    /// Encodes one site per bead as a sample. Returns `None` if a bead is
    /// given a site it may not occupy.
    pub fn sample_for(&self, positions: &[Site]) -> Option<Vec<u8>> {
        let mut sample = vec![0u8; self.index.len()];
        for (bead, &site) in positions.iter().enumerate() {
            let idx = self.index.index_of(&VariableKey { bead, site })?;
            sample[idx] = 1;
        }
        Some(sample)
    }
}

pub struct QuboBuilder<'a> {
    sequence: &'a HpSequence,
    lattice: Lattice,
    weights: PenaltyWeights,
}

impl<'a> QuboBuilder<'a> {
    pub fn new(sequence: &'a HpSequence) -> Self {
        Self {
            sequence,
            lattice: Lattice::for_sequence(sequence.len()),
            weights: PenaltyWeights::default(),
        }
    }

    pub fn lattice(mut self, lattice: Lattice) -> Self {
        self.lattice = lattice;
        self
    }

    pub fn weights(mut self, weights: PenaltyWeights) -> Self {
        self.weights = weights;
        self
    }

    #[instrument(skip_all, fields(sequence = %self.sequence, side = self.lattice.side()))]
    pub fn build(&self) -> Result<FoldingQubo, QuboError> {
        self.weights.validate()?;

        let index = VariableIndex::build(self.sequence.len(), &self.lattice);
        let mut qubo = Qubo::new(index.len());

        self.add_contact_terms(&index, &mut qubo)?;
        self.add_one_site_terms(&index, &mut qubo)?;
        self.add_self_avoidance_terms(&index, &mut qubo)?;
        self.add_connectivity_terms(&index, &mut qubo)?;

        debug!(
            variables = qubo.num_variables(),
            interactions = qubo.num_interactions(),
            "Folding QUBO assembled."
        );

        Ok(FoldingQubo {
            qubo,
            index,
            lattice: self.lattice,
        })
    }

    fn add_contact_terms(&self, index: &VariableIndex, qubo: &mut Qubo) -> Result<(), QuboError> {
        let n = self.sequence.len();
        let monomers = self.sequence.monomers();
        for f in 0..n {
            for fp in (f + 2)..n {
                if !(monomers[f].is_hydrophobic() && monomers[fp].is_hydrophobic()) {
                    continue;
                }
                for &u in index.for_bead(f) {
                    let site = key_at(index, u).site;
                    for neighbor in self.lattice.neighbors(site) {
                        if let Some(v) = index.index_of(&VariableKey {
                            bead: fp,
                            site: neighbor,
                        }) {
                            qubo.add_quadratic(u, v, self.weights.hh_contact)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn add_one_site_terms(&self, index: &VariableIndex, qubo: &mut Qubo) -> Result<(), QuboError> {
        for bead in 0..self.sequence.len() {
            let vars = index.for_bead(bead);
            for &u in vars {
                for &v in vars.iter().filter(|&&v| v != u) {
                    qubo.add_quadratic(u, v, self.weights.one_site)?;
                }
            }
        }
        Ok(())
    }

    fn add_self_avoidance_terms(
        &self,
        index: &VariableIndex,
        qubo: &mut Qubo,
    ) -> Result<(), QuboError> {
        for site in self.lattice.sites() {
            let beads = index.at_site(&site);
            for (i, &u) in beads.iter().enumerate() {
                for &v in &beads[i + 1..] {
                    qubo.add_quadratic(u, v, self.weights.self_avoidance)?;
                }
            }
        }
        Ok(())
    }

    fn add_connectivity_terms(
        &self,
        index: &VariableIndex,
        qubo: &mut Qubo,
    ) -> Result<(), QuboError> {
        for bead in 0..self.sequence.len().saturating_sub(1) {
            for &u in index.for_bead(bead) {
                let site = key_at(index, u).site;
                for neighbor in self.lattice.neighbors(site) {
                    if let Some(v) = index.index_of(&VariableKey {
                        bead: bead + 1,
                        site: neighbor,
                    }) {
                        qubo.add_quadratic(u, v, self.weights.connectivity)?;
                    }
                }
            }
        }
        Ok(())
    }
}

// Indices handed out by `VariableIndex` always resolve.
fn key_at(index: &VariableIndex, u: usize) -> VariableKey {
    index.keys()[u]
}
