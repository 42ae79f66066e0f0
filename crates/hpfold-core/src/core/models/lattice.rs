use std::fmt;

/// A point on the square lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Site {
    pub x: usize,
    pub y: usize,
}

impl Site {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Checkerboard color of the site: 0 for even `x + y`, 1 for odd.
    #[inline]
    pub fn parity(&self) -> usize {
        (self.x + self.y) % 2
    }

    #[inline]
    pub fn manhattan(&self, other: &Site) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    #[inline]
    pub fn is_adjacent(&self, other: &Site) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A `side × side` square lattice with 4-neighborhood adjacency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lattice {
    side: usize,
}

impl Lattice {
    pub fn new(side: usize) -> Self {
        Self { side }
    }

    /// The grid used for a chain of `sequence_len` beads: `len / 2 + 1` per side.
    pub fn for_sequence(sequence_len: usize) -> Self {
        Self::new(sequence_len / 2 + 1)
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn num_sites(&self) -> usize {
        self.side * self.side
    }

    pub fn contains(&self, site: &Site) -> bool {
        site.x < self.side && site.y < self.side
    }

    /// All sites in row-major `(x, y)` order.
    pub fn sites(&self) -> impl Iterator<Item = Site> + '_ {
        (0..self.side).flat_map(move |x| (0..self.side).map(move |y| Site::new(x, y)))
    }

    pub fn sites_with_parity(&self, parity: usize) -> impl Iterator<Item = Site> + '_ {
        self.sites().filter(move |s| s.parity() == parity % 2)
    }

    pub fn neighbors(&self, site: Site) -> Vec<Site> {
        let mut out = Vec::with_capacity(4);
        if site.x > 0 {
            out.push(Site::new(site.x - 1, site.y));
        }
        if site.y > 0 {
            out.push(Site::new(site.x, site.y - 1));
        }
        if site.y + 1 < self.side {
            out.push(Site::new(site.x, site.y + 1));
        }
        if site.x + 1 < self.side {
            out.push(Site::new(site.x + 1, site.y));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_sequence_matches_half_length_plus_one() {
        assert_eq!(Lattice::for_sequence(7).side(), 4);
        assert_eq!(Lattice::for_sequence(8).side(), 5);
        assert_eq!(Lattice::for_sequence(2).side(), 2);
    }

    #[test]
    fn sites_enumerates_all_points_in_order() {
        let lattice = Lattice::new(2);
        let sites: Vec<_> = lattice.sites().collect();
        assert_eq!(
            sites,
            vec![
                Site::new(0, 0),
                Site::new(0, 1),
                Site::new(1, 0),
                Site::new(1, 1)
            ]
        );
    }

    #[test]
    fn sites_with_parity_splits_the_checkerboard() {
        let lattice = Lattice::new(4);
        assert_eq!(lattice.sites_with_parity(0).count(), 8);
        assert_eq!(lattice.sites_with_parity(1).count(), 8);
        assert!(lattice.sites_with_parity(3).all(|s| s.parity() == 1));
    }

    #[test]
    fn neighbors_respect_lattice_bounds() {
        let lattice = Lattice::new(3);
        assert_eq!(lattice.neighbors(Site::new(0, 0)).len(), 2);
        assert_eq!(lattice.neighbors(Site::new(1, 0)).len(), 3);
        assert_eq!(lattice.neighbors(Site::new(1, 1)).len(), 4);
        assert!(
            lattice
                .neighbors(Site::new(2, 2))
                .iter()
                .all(|n| n.is_adjacent(&Site::new(2, 2)) && lattice.contains(n))
        );
    }

    #[test]
    fn adjacent_sites_have_opposite_parity() {
        let lattice = Lattice::new(4);
        for site in lattice.sites() {
            for n in lattice.neighbors(site) {
                assert_ne!(site.parity(), n.parity());
            }
        }
    }

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Site::new(0, 3);
        let b = Site::new(2, 1);
        assert_eq!(a.manhattan(&b), 4);
        assert_eq!(b.manhattan(&a), 4);
        assert!(!a.is_adjacent(&b));
    }
}
