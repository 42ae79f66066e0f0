use crate::core::models::conformation::Conformation;
use crate::core::models::sequence::Monomer;

pub(super) const HYDROPHOBIC_RGB: [u8; 3] = [0, 0, 255];
pub(super) const POLAR_RGB: [u8; 3] = [255, 0, 0];

pub(super) fn monomer_rgb(monomer: Monomer) -> [u8; 3] {
    match monomer {
        Monomer::Hydrophobic => HYDROPHOBIC_RGB,
        Monomer::Polar => POLAR_RGB,
    }
}

pub(super) fn title(conformation: &Conformation) -> String {
    format!(
        "Protein Folding for HP = {} ({})",
        conformation.sequence().len(),
        conformation.sequence()
    )
}

/// Maps lattice coordinates onto a canvas with the y axis pointing up. The
/// visible range is `[-0.5, side - 0.5]` on both axes.
#[derive(Debug, Clone, Copy)]
pub(super) struct PlotLayout {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    side: f64,
}

impl PlotLayout {
    pub fn new(width: u32, height: u32, side: usize) -> Self {
        let (width, height) = (width as f64, height as f64);
        Self {
            width,
            height,
            left: width * 0.08,
            right: width * 0.96,
            top: height * 0.10,
            bottom: height * 0.90,
            side: side.max(1) as f64,
        }
    }

    fn span(&self) -> (f64, f64) {
        (-0.5, self.side - 0.5)
    }

    pub fn x(&self, value: f64) -> f64 {
        let (lo, hi) = self.span();
        self.left + (value - lo) / (hi - lo) * (self.right - self.left)
    }

    pub fn y(&self, value: f64) -> f64 {
        let (lo, hi) = self.span();
        self.bottom - (value - lo) / (hi - lo) * (self.bottom - self.top)
    }

    /// Bead radius in pixels, scaled to the grid spacing.
    pub fn bead_radius(&self) -> f64 {
        let spacing = (self.x(1.0) - self.x(0.0)).min(self.y(0.0) - self.y(1.0));
        (spacing * 0.18).clamp(4.0, 24.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_maps_range_edges_onto_plot_area() {
        let layout = PlotLayout::new(1000, 700, 4);
        assert!((layout.x(-0.5) - layout.left).abs() < 1e-9);
        assert!((layout.x(3.5) - layout.right).abs() < 1e-9);
        assert!((layout.y(-0.5) - layout.bottom).abs() < 1e-9);
        assert!((layout.y(3.5) - layout.top).abs() < 1e-9);
    }

    #[test]
    fn bead_radius_is_clamped() {
        assert_eq!(PlotLayout::new(100, 100, 50).bead_radius(), 4.0);
        assert_eq!(PlotLayout::new(5000, 5000, 2).bead_radius(), 24.0);
    }
}
