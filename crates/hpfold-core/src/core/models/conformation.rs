use super::lattice::{Lattice, Site};
use super::sequence::HpSequence;
use std::collections::BTreeMap;
use std::fmt;

/// A constraint of the folding encoding that a decoded sample violates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConformationIssue {
    MissingBead { bead: usize },
    MultiplePlacements { bead: usize, sites: Vec<Site> },
    Overlap { site: Site, beads: Vec<usize> },
    BrokenBond { bead: usize },
}

impl fmt::Display for ConformationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBead { bead } => write!(f, "bead {} is not placed", bead),
            Self::MultiplePlacements { bead, sites } => {
                write!(f, "bead {} is placed at {} sites", bead, sites.len())
            }
            Self::Overlap { site, beads } => write!(f, "beads {:?} overlap at {}", beads, site),
            Self::BrokenBond { bead } => {
                write!(f, "beads {} and {} are not adjacent", bead, bead + 1)
            }
        }
    }
}

/// Bead coordinates of a chain on the lattice, with the constraint
/// violations found while building them.
#[derive(Debug, Clone, PartialEq)]
pub struct Conformation {
    sequence: HpSequence,
    lattice: Lattice,
    positions: Vec<Option<Site>>,
    issues: Vec<ConformationIssue>,
}

impl Conformation {
    /// Builds a conformation from every site each bead was assigned.
    ///
    /// `placements[i]` lists the sites claimed by bead `i`; when a bead claims
    /// several, the smallest site is kept.
    pub fn from_placements(
        sequence: HpSequence,
        lattice: Lattice,
        mut placements: Vec<Vec<Site>>,
    ) -> Self {
        placements.resize(sequence.len(), Vec::new());
        let mut issues = Vec::new();
        let mut positions = Vec::with_capacity(sequence.len());

        for (bead, sites) in placements.iter_mut().enumerate() {
            sites.sort();
            sites.dedup();
            match sites.len() {
                0 => issues.push(ConformationIssue::MissingBead { bead }),
                1 => {}
                _ => issues.push(ConformationIssue::MultiplePlacements {
                    bead,
                    sites: sites.clone(),
                }),
            }
            positions.push(sites.first().copied());
        }

        let mut occupancy: BTreeMap<Site, Vec<usize>> = BTreeMap::new();
        for (bead, site) in positions.iter().enumerate() {
            if let Some(site) = site {
                occupancy.entry(*site).or_default().push(bead);
            }
        }
        for (site, beads) in occupancy {
            if beads.len() > 1 {
                issues.push(ConformationIssue::Overlap { site, beads });
            }
        }

        for bead in 0..positions.len().saturating_sub(1) {
            if let (Some(a), Some(b)) = (positions[bead], positions[bead + 1]) {
                if !a.is_adjacent(&b) {
                    issues.push(ConformationIssue::BrokenBond { bead });
                }
            }
        }

        Self {
            sequence,
            lattice,
            positions,
            issues,
        }
    }

    pub fn from_positions(sequence: HpSequence, lattice: Lattice, positions: &[Site]) -> Self {
        let placements = positions.iter().map(|&s| vec![s]).collect();
        Self::from_placements(sequence, lattice, placements)
    }

    pub fn sequence(&self) -> &HpSequence {
        &self.sequence
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn position(&self, bead: usize) -> Option<Site> {
        self.positions.get(bead).copied().flatten()
    }

    pub fn positions(&self) -> &[Option<Site>] {
        &self.positions
    }

    pub fn issues(&self) -> &[ConformationIssue] {
        &self.issues
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Consecutive bead pairs whose sites are both known.
    pub fn bonds(&self) -> impl Iterator<Item = (Site, Site)> + '_ {
        self.positions
            .windows(2)
            .filter_map(|w| Some((w[0]?, w[1]?)))
    }

    /// Pairs `(i, j)` of hydrophobic beads with `j >= i + 2` on adjacent sites.
    pub fn hh_contacts(&self) -> Vec<(usize, usize)> {
        let monomers = self.sequence.monomers();
        let mut contacts = Vec::new();
        for i in 0..self.positions.len() {
            for j in (i + 2)..self.positions.len() {
                if !(monomers[i].is_hydrophobic() && monomers[j].is_hydrophobic()) {
                    continue;
                }
                if let (Some(a), Some(b)) = (self.positions[i], self.positions[j]) {
                    if a.is_adjacent(&b) {
                        contacts.push((i, j));
                    }
                }
            }
        }
        contacts
    }

    /// HP model energy: minus one per H-H contact.
    pub fn hp_energy(&self) -> i64 {
        -(self.hh_contacts().len() as i64)
    }
}

impl fmt::Display for Conformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (bead, site) in self.positions.iter().enumerate() {
            if let Some(site) = site {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", bead, site)?;
                first = false;
            }
        }
        write!(f, "}}")
    }
}
