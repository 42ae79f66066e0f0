use super::lattice::{Lattice, Site};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The binary decision "bead `bead` occupies site `(x, y)`".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableKey {
    pub bead: usize,
    pub site: Site,
}

impl VariableKey {
    pub fn new(bead: usize, x: usize, y: usize) -> Self {
        Self {
            bead,
            site: Site::new(x, y),
        }
    }

    /// Beads only occupy sites of their own parity.
    pub fn is_allowed(&self) -> bool {
        self.site.parity() == self.bead % 2
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VariableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x_{}_{}_{}", self.bead, self.site.x, self.site.y)
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Invalid variable label '{0}'; expected 'x_<bead>_<x>_<y>'")]
pub struct LabelParseError(pub String);

impl FromStr for VariableKey {
    type Err = LabelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || LabelParseError(s.to_string());
        let parts: Vec<&str> = s.split('_').collect();
        let [prefix, bead, x, y] = parts.as_slice() else {
            return Err(err());
        };
        if *prefix != "x" {
            return Err(err());
        }
        let parse = |p: &str| p.parse::<usize>().map_err(|_| err());
        Ok(Self::new(parse(bead)?, parse(x)?, parse(y)?))
    }
}

/// Dense numbering of every allowed variable, ordered by `(bead, x, y)`.
#[derive(Debug, Clone, Default)]
pub struct VariableIndex {
    keys: Vec<VariableKey>,
    positions: HashMap<VariableKey, usize>,
    by_bead: Vec<Vec<usize>>,
    by_site: HashMap<Site, Vec<usize>>,
}

impl VariableIndex {
    pub fn build(num_beads: usize, lattice: &Lattice) -> Self {
        let mut index = Self {
            by_bead: vec![Vec::new(); num_beads],
            ..Self::default()
        };
        for bead in 0..num_beads {
            for site in lattice.sites_with_parity(bead % 2) {
                let key = VariableKey { bead, site };
                let idx = index.keys.len();
                index.keys.push(key);
                index.positions.insert(key, idx);
                index.by_bead[bead].push(idx);
                index.by_site.entry(site).or_default().push(idx);
            }
        }
        index
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn num_beads(&self) -> usize {
        self.by_bead.len()
    }

    pub fn index_of(&self, key: &VariableKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn key(&self, index: usize) -> Option<&VariableKey> {
        self.keys.get(index)
    }

    pub fn keys(&self) -> &[VariableKey] {
        &self.keys
    }

    /// Variable indices of every site bead `bead` may occupy.
    pub fn for_bead(&self, bead: usize) -> &[usize] {
        self.by_bead.get(bead).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Variable indices of every bead that may occupy `site`, in bead order.
    pub fn at_site(&self, site: &Site) -> &[usize] {
        self.by_site.get(site).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn label(&self, index: usize) -> Option<String> {
        self.key(index).map(VariableKey::label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_round_trips_through_from_str() {
        let key = VariableKey::new(3, 2, 1);
        assert_eq!(key.label(), "x_3_2_1");
        assert_eq!("x_3_2_1".parse::<VariableKey>().unwrap(), key);
    }

    #[test]
    fn malformed_labels_are_rejected() {
        for bad in ["", "x_1_2", "y_1_2_3", "x_1_a_3", "x_1_2_3_4"] {
            assert!(bad.parse::<VariableKey>().is_err(), "accepted '{bad}'");
        }
    }

    #[test]
    fn build_only_creates_parity_matching_variables() {
        let lattice = Lattice::new(4);
        let index = VariableIndex::build(7, &lattice);
        assert_eq!(index.len(), 7 * 8);
        assert!(index.keys().iter().all(VariableKey::is_allowed));
        assert!(index.index_of(&VariableKey::new(0, 0, 1)).is_none());
        assert_eq!(index.index_of(&VariableKey::new(0, 0, 0)), Some(0));
    }

    #[test]
    fn build_orders_variables_by_bead_then_site() {
        let index = VariableIndex::build(2, &Lattice::new(2));
        let labels: Vec<_> = index.keys().iter().map(|k| k.label()).collect();
        assert_eq!(labels, vec!["x_0_0_0", "x_0_1_1", "x_1_0_1", "x_1_1_0"]);
    }

    #[test]
    fn for_bead_and_at_site_group_indices() {
        let lattice = Lattice::new(3);
        let index = VariableIndex::build(3, &lattice);
        assert_eq!(index.for_bead(0).len(), 5);
        assert_eq!(index.for_bead(1).len(), 4);
        assert!(index.for_bead(9).is_empty());

        let shared = index.at_site(&Site::new(0, 0));
        let beads: Vec<_> = shared.iter().map(|&i| index.key(i).unwrap().bead).collect();
        assert_eq!(beads, vec![0, 2]);
    }
}
