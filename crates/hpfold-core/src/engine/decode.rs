use crate::core::models::conformation::Conformation;
use crate::core::models::lattice::Lattice;
use crate::core::models::sequence::HpSequence;
use crate::core::models::variables::{LabelParseError, VariableIndex, VariableKey};
use tracing::{debug, warn};

/// Places every bead whose variable is set in `sample`.
///
/// Constraint violations are recorded on the returned conformation rather
/// than treated as errors.
pub fn decode(
    sample: &[u8],
    index: &VariableIndex,
    sequence: &HpSequence,
    lattice: Lattice,
) -> Conformation {
    let mut placements = vec![Vec::new(); sequence.len()];
    for (i, _) in sample.iter().enumerate().filter(|&(_, &x)| x != 0) {
        if let Some(key) = index.key(i) {
            if let Some(sites) = placements.get_mut(key.bead) {
                sites.push(key.site);
            }
        }
    }
    finish(sequence, lattice, placements)
}

/// Decodes a sample keyed by variable labels (`x_<bead>_<x>_<y>`).
pub fn decode_labeled<'a>(
    assignments: impl IntoIterator<Item = (&'a str, u8)>,
    sequence: &HpSequence,
    lattice: Lattice,
) -> Result<Conformation, LabelParseError> {
    let mut placements = vec![Vec::new(); sequence.len()];
    for (label, value) in assignments {
        if value == 0 {
            continue;
        }
        let key: VariableKey = label.parse()?;
        match placements.get_mut(key.bead) {
            Some(sites) => sites.push(key.site),
            None => warn!(label, "Ignoring variable for a bead beyond the chain."),
        }
    }
    Ok(finish(sequence, lattice, placements))
}

fn finish(
    sequence: &HpSequence,
    lattice: Lattice,
    placements: Vec<Vec<crate::core::models::lattice::Site>>,
) -> Conformation {
    let conformation = Conformation::from_placements(sequence.clone(), lattice, placements);
    if conformation.is_valid() {
        debug!(
            contacts = conformation.hh_contacts().len(),
            "Decoded a valid conformation."
        );
    } else {
        for issue in conformation.issues() {
            warn!(%issue, "Decoded conformation violates a folding constraint.");
        }
    }
    conformation
}
