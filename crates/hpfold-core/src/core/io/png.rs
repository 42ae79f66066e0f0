use super::layout::{HYDROPHOBIC_RGB, POLAR_RGB, PlotLayout, monomer_rgb, title};
use super::traits::{RenderError, Renderer};
use crate::core::models::conformation::Conformation;
use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use std::io::Write;
use tracing::debug;

const MIN_DIMENSION: u32 = 64;
const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [0, 0, 0];
const GRID: [u8; 3] = [210, 210, 210];
const BOND_HALF_WIDTH: f64 = 1.5;
const GLYPH_SIZE: i64 = 8;
const LEGEND_ENTRIES: [(&str, [u8; 3]); 2] = [
    ("Hydrophobic (H)", HYDROPHOBIC_RGB),
    ("Polar (P)", POLAR_RGB),
];

/// Pixel scale of the 8x8 font for captions, ticks and the legend.
fn text_scale(height: u32) -> i64 {
    (height / 350).clamp(1, 3) as i64
}

fn text_width(text: &str, scale: i64) -> i64 {
    text.chars().count() as i64 * GLYPH_SIZE * scale
}

/// Legend frame `(x0, y0, x1, y1)`, tucked into the top-right corner of the plot.
fn legend_box(layout: &PlotLayout, scale: i64) -> (f64, f64, f64, f64) {
    let s = scale as f64;
    let longest = LEGEND_ENTRIES
        .iter()
        .map(|(label, _)| text_width(label, scale))
        .max()
        .unwrap_or(0) as f64;
    let x1 = layout.right - 6.0 * s;
    let y0 = layout.top + 6.0 * s;
    (
        x1 - longest - 24.0 * s,
        y0,
        x1,
        y0 + (LEGEND_ENTRIES.len() as f64 * 12.0 + 4.0) * s,
    )
}

/// Raster plot of a conformation: a titled lattice grid with numbered axes,
/// bonds between consecutive beads, beads colored by monomer and labeled
/// with their index, and a legend naming both monomer kinds.
#[derive(Debug, Clone, Copy)]
pub struct PngRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 700,
        }
    }
}

impl PngRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn draw(&self, conformation: &Conformation) -> Result<RgbImage, RenderError> {
        if self.width < MIN_DIMENSION || self.height < MIN_DIMENSION {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let side = conformation.lattice().side();
        let layout = PlotLayout::new(self.width, self.height, side);
        let scale = text_scale(self.height);
        let s = scale as f64;
        let mut canvas = Canvas::new(self.width, self.height);

        let heading = title(conformation);
        let title_scale = (1..=scale)
            .rev()
            .find(|&k| text_width(&heading, k) as f64 <= layout.width * 0.95)
            .unwrap_or(1);
        canvas.text(
            &heading,
            layout.width / 2.0,
            layout.top / 2.0,
            title_scale,
            Anchor::Middle,
            BLACK,
        );

        for i in 0..side {
            let x = layout.x(i as f64);
            let y = layout.y(i as f64);
            canvas.line(x, layout.top, x, layout.bottom, 0.5, GRID);
            canvas.line(layout.left, y, layout.right, y, 0.5, GRID);
            let tick = i.to_string();
            canvas.text(&tick, x, layout.bottom + 6.0 + 4.0 * s, scale, Anchor::Middle, BLACK);
            canvas.text(&tick, layout.left - 6.0, y, scale, Anchor::End, BLACK);
        }
        canvas.rect_outline(layout.left, layout.top, layout.right, layout.bottom, BLACK);
        canvas.text(
            "Grid x-coordinate",
            (layout.left + layout.right) / 2.0,
            layout.height - 6.0 - 4.0 * s,
            scale,
            Anchor::Middle,
            BLACK,
        );
        canvas.text_upward(
            "Grid y-coordinate",
            6.0 + 4.0 * s,
            (layout.top + layout.bottom) / 2.0,
            scale,
            BLACK,
        );

        for (a, b) in conformation.bonds() {
            canvas.line(
                layout.x(a.x as f64),
                layout.y(a.y as f64),
                layout.x(b.x as f64),
                layout.y(b.y as f64),
                BOND_HALF_WIDTH,
                BLACK,
            );
        }

        let radius = layout.bead_radius();
        let label_scale = ((radius / 10.0).floor() as i64).max(1);
        for (bead, site) in conformation.positions().iter().enumerate() {
            let (Some(site), Some(monomer)) = (site, conformation.sequence().monomer(bead)) else {
                continue;
            };
            let (cx, cy) = (layout.x(site.x as f64), layout.y(site.y as f64));
            canvas.disc(cx, cy, radius, monomer_rgb(monomer));
            canvas.text(&bead.to_string(), cx, cy, label_scale, Anchor::Middle, WHITE);
        }

        let (x0, y0, x1, y1) = legend_box(&layout, scale);
        canvas.fill_rect(x0, y0, x1, y1, WHITE);
        canvas.rect_outline(x0, y0, x1, y1, BLACK);
        for (row, (label, color)) in LEGEND_ENTRIES.into_iter().enumerate() {
            let y = y0 + (8.0 + 12.0 * row as f64) * s;
            canvas.disc(x0 + 8.0 * s, y, 3.5 * s, color);
            canvas.text(label, x0 + 16.0 * s, y, scale, Anchor::Start, BLACK);
        }

        debug!(
            width = self.width,
            height = self.height,
            beads = conformation.sequence().len(),
            "Conformation rasterized."
        );
        Ok(canvas.image)
    }
}

impl Renderer for PngRenderer {
    type Error = RenderError;

    fn render_to(
        &self,
        conformation: &Conformation,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let image = self.draw(conformation)?;
        PngEncoder::new(writer).write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )?;
        Ok(())
    }
}

struct Canvas {
    image: RgbImage,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, Rgb(WHITE)),
        }
    }

    fn put(&mut self, x: i64, y: i64, color: [u8; 3]) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height()
        {
            self.image.put_pixel(x as u32, y as u32, Rgb(color));
        }
    }

    fn disc(&mut self, cx: f64, cy: f64, r: f64, color: [u8; 3]) {
        let r2 = r * r;
        for py in (cy - r).floor() as i64..=(cy + r).ceil() as i64 {
            for px in (cx - r).floor() as i64..=(cx + r).ceil() as i64 {
                let dx = px as f64 + 0.5 - cx;
                let dy = py as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.put(px, py, color);
                }
            }
        }
    }

    fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, half_width: f64, color: [u8; 3]) {
        let length = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
        let steps = (length * 2.0).ceil().max(1.0) as usize;
        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            self.disc(x0 + (x1 - x0) * t, y0 + (y1 - y0) * t, half_width, color);
        }
    }

    fn rect_outline(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: [u8; 3]) {
        self.line(x0, y0, x1, y0, 0.75, color);
        self.line(x1, y0, x1, y1, 0.75, color);
        self.line(x1, y1, x0, y1, 0.75, color);
        self.line(x0, y1, x0, y0, 0.75, color);
    }

    fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: [u8; 3]) {
        for py in y0.round() as i64..=y1.round() as i64 {
            for px in x0.round() as i64..=x1.round() as i64 {
                self.put(px, py, color);
            }
        }
    }

    /// Calls `plot(u, v)` for every lit font pixel of `text`, where `u` runs
    /// along the text and `v` down the glyph rows.
    fn for_each_text_pixel(text: &str, scale: i64, mut plot: impl FnMut(i64, i64)) {
        for (n, c) in text.chars().enumerate() {
            let rows = BASIC_FONTS.get(c).unwrap_or([0; 8]);
            let base = n as i64 * GLYPH_SIZE;
            for (row, bits) in rows.into_iter().enumerate() {
                // Bit 0 is the leftmost column.
                for col in (0..GLYPH_SIZE).filter(|col| bits & (1 << col) != 0) {
                    for dv in 0..scale {
                        for du in 0..scale {
                            plot((base + col) * scale + du, row as i64 * scale + dv);
                        }
                    }
                }
            }
        }
    }

    /// Draws `text` horizontally, vertically centered on `y`.
    fn text(&mut self, text: &str, x: f64, y: f64, scale: i64, anchor: Anchor, color: [u8; 3]) {
        let width = text_width(text, scale);
        let origin_x = x.round() as i64
            - match anchor {
                Anchor::Start => 0,
                Anchor::Middle => width / 2,
                Anchor::End => width,
            };
        let origin_y = y.round() as i64 - GLYPH_SIZE * scale / 2;
        Self::for_each_text_pixel(text, scale, |u, v| {
            self.put(origin_x + u, origin_y + v, color)
        });
    }

    /// Draws `text` rotated a quarter turn counter-clockwise, centered on `(cx, cy)`.
    fn text_upward(&mut self, text: &str, cx: f64, cy: f64, scale: i64, color: [u8; 3]) {
        let length = text_width(text, scale);
        let left = cx.round() as i64 - GLYPH_SIZE * scale / 2;
        let bottom = cy.round() as i64 + length / 2;
        Self::for_each_text_pixel(text, scale, |u, v| self.put(left + v, bottom - u, color));
    }
}

#[derive(Debug, Clone, Copy)]
enum Anchor {
    Start,
    Middle,
    End,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::lattice::{Lattice, Site};
    use crate::core::models::sequence::HpSequence;

    fn folded() -> Conformation {
        Conformation::from_positions(
            HpSequence::from_hp_str("HPPH").unwrap(),
            Lattice::new(3),
            &[
                Site::new(0, 0),
                Site::new(0, 1),
                Site::new(1, 1),
                Site::new(1, 0),
            ],
        )
    }

    #[test]
    fn render_to_writes_png_signature() {
        let mut buffer = Vec::new();
        PngRenderer::default()
            .render_to(&folded(), &mut buffer)
            .unwrap();
        assert_eq!(&buffer[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn draw_colors_beads_by_monomer() {
        let renderer = PngRenderer::new(400, 400);
        let image = renderer.draw(&folded()).unwrap();
        let layout = PlotLayout::new(400, 400, 3);
        let r = layout.bead_radius();

        // Sample just inside the bead edge so the index label does not interfere.
        let edge = |site: Site| {
            let x = (layout.x(site.x as f64) - r * 0.8) as u32;
            let y = layout.y(site.y as f64) as u32;
            image.get_pixel(x, y).0
        };
        assert_eq!(edge(Site::new(0, 0)), HYDROPHOBIC_RGB);
        assert_eq!(edge(Site::new(0, 1)), POLAR_RGB);
        assert_eq!(image.get_pixel(1, 1).0, WHITE);
    }

    #[test]
    fn tiny_canvas_is_rejected() {
        let err = PngRenderer::new(10, 500).draw(&folded()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidDimensions {
                width: 10,
                height: 500
            }
        ));
    }

    #[test]
    fn render_to_path_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.png");
        PngRenderer::default()
            .render_to_path(&folded(), &path)
            .unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    fn black_pixels(image: &RgbImage, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> usize {
        ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
            .filter(|&(x, y)| image.get_pixel(x, y).0 == BLACK)
            .count()
    }

    #[test]
    fn title_band_carries_text() {
        let image = PngRenderer::new(400, 400).draw(&folded()).unwrap();
        let layout = PlotLayout::new(400, 400, 3);
        let band = black_pixels(&image, 0..400, 0..(layout.top as u32 - 3));
        assert!(band > 100, "title band has only {} dark pixels", band);
    }

    #[test]
    fn legend_box_names_both_monomers() {
        let image = PngRenderer::default().draw(&folded()).unwrap();
        let layout = PlotLayout::new(1000, 700, 3);
        let scale = text_scale(700);
        let s = scale as u32;
        let (x0, y0, x1, y1) = legend_box(&layout, scale);
        let (x0, y0, x1, y1) = (x0 as u32, y0 as u32, x1 as u32, y1 as u32);

        let text_left = x0 + 16 * s;
        let first_row = black_pixels(&image, text_left..x1 - 4, y0 + 4 * s..y0 + 12 * s);
        let second_row = black_pixels(&image, text_left..x1 - 4, y0 + 16 * s..y1 - 4);
        assert!(first_row > 50, "first legend row has {} dark pixels", first_row);
        assert!(second_row > 30, "second legend row has {} dark pixels", second_row);
        assert_eq!(image.get_pixel(x0 + 8 * s, y0 + 8 * s).0, HYDROPHOBIC_RGB);
        assert_eq!(image.get_pixel(x0 + 8 * s, y0 + 20 * s).0, POLAR_RGB);
    }

    #[test]
    fn axis_captions_are_drawn_outside_the_frame() {
        let image = PngRenderer::new(400, 400).draw(&folded()).unwrap();
        let layout = PlotLayout::new(400, 400, 3);
        let (top, bottom) = (layout.top as u32, layout.bottom as u32);

        // Below the tick numbers, and left of them.
        assert!(black_pixels(&image, 0..400, 385..400) > 0);
        assert!(black_pixels(&image, 0..15, top..bottom) > 0);
    }

    #[test]
    fn text_anchors_shift_the_origin() {
        let mut canvas = Canvas::new(100, 20);
        canvas.text("1", 50.0, 10.0, 1, Anchor::Start, BLACK);
        assert_eq!(black_pixels(&canvas.image, 0..50, 0..20), 0);

        let mut canvas = Canvas::new(100, 20);
        canvas.text("1", 50.0, 10.0, 1, Anchor::End, BLACK);
        assert_eq!(black_pixels(&canvas.image, 50..100, 0..20), 0);
        assert!(black_pixels(&canvas.image, 42..50, 0..20) > 0);
    }

    #[test]
    fn upward_text_is_taller_than_wide() {
        let mut canvas = Canvas::new(40, 100);
        canvas.text_upward("HP", 20.0, 50.0, 1, BLACK);
        assert!(black_pixels(&canvas.image, 16..24, 34..66) > 0);
        assert_eq!(black_pixels(&canvas.image, 0..16, 0..100), 0);
        assert_eq!(black_pixels(&canvas.image, 0..40, 0..34), 0);
    }
}
