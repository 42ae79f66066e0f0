use super::layout::{HYDROPHOBIC_RGB, POLAR_RGB, PlotLayout, monomer_rgb, title};
use super::traits::{RenderError, Renderer};
use crate::core::models::conformation::Conformation;
use std::fmt;
use std::io::Write;

/// Vector plot of a conformation, with index labels, axis captions, legend
/// text and a title.
#[derive(Debug, Clone, Copy)]
pub struct SvgRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 700,
        }
    }
}

fn hex([r, g, b]: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

impl SvgRenderer {
    pub fn to_svg_string(&self, conformation: &Conformation) -> Result<String, RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let mut out = String::new();
        self.write_svg(conformation, &mut out)?;
        Ok(out)
    }

    fn write_svg(&self, conformation: &Conformation, out: &mut impl fmt::Write) -> fmt::Result {
        let side = conformation.lattice().side();
        let layout = PlotLayout::new(self.width, self.height, side);
        let radius = layout.bead_radius();

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        )?;
        writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="18" font-family="sans-serif">{}</text>"#,
            layout.width / 2.0,
            layout.top / 2.0 + 6.0,
            title(conformation)
        )?;

        writeln!(out, r##"<g stroke="#d2d2d2" stroke-width="1">"##)?;
        for i in 0..side {
            let (x, y) = (layout.x(i as f64), layout.y(i as f64));
            writeln!(
                out,
                r#"<line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}"/><line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}"/>"#,
                layout.top, layout.bottom, layout.left, layout.right
            )?;
        }
        writeln!(out, "</g>")?;

        for i in 0..side {
            writeln!(
                out,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12" font-family="sans-serif">{i}</text><text x="{:.1}" y="{:.1}" text-anchor="end" font-size="12" font-family="sans-serif">{i}</text>"#,
                layout.x(i as f64),
                layout.bottom + 16.0,
                layout.left - 6.0,
                layout.y(i as f64) + 4.0,
            )?;
        }
        writeln!(
            out,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="black"/>"#,
            layout.left,
            layout.top,
            layout.right - layout.left,
            layout.bottom - layout.top
        )?;
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="14" font-family="sans-serif">Grid x-coordinate</text>"#,
            (layout.left + layout.right) / 2.0,
            layout.height - 12.0
        )?;
        writeln!(
            out,
            r#"<text x="14" y="{y:.1}" transform="rotate(-90 14 {y:.1})" text-anchor="middle" font-size="14" font-family="sans-serif">Grid y-coordinate</text>"#,
            y = (layout.top + layout.bottom) / 2.0
        )?;

        for (a, b) in conformation.bonds() {
            writeln!(
                out,
                r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black" stroke-width="3"/>"#,
                layout.x(a.x as f64),
                layout.y(a.y as f64),
                layout.x(b.x as f64),
                layout.y(b.y as f64)
            )?;
        }

        for (bead, site) in conformation.positions().iter().enumerate() {
            let (Some(site), Some(monomer)) = (site, conformation.sequence().monomer(bead)) else {
                continue;
            };
            let (cx, cy) = (layout.x(site.x as f64), layout.y(site.y as f64));
            writeln!(
                out,
                r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{radius:.1}" fill="{}"/><text x="{cx:.1}" y="{:.1}" fill="white" text-anchor="middle" font-size="{:.0}" font-family="sans-serif">{bead}</text>"#,
                hex(monomer_rgb(monomer)),
                cy + radius * 0.35,
                radius
            )?;
        }

        let legend_x = layout.right - 180.0;
        for (row, (label, color)) in [
            ("Hydrophobic (H)", HYDROPHOBIC_RGB),
            ("Polar (P)", POLAR_RGB),
        ]
        .into_iter()
        .enumerate()
        {
            let y = layout.top + 20.0 + 22.0 * row as f64;
            writeln!(
                out,
                r#"<circle cx="{legend_x:.1}" cy="{y:.1}" r="7" fill="{}"/><text x="{:.1}" y="{:.1}" font-size="13" font-family="sans-serif">{label}</text>"#,
                hex(color),
                legend_x + 14.0,
                y + 4.5
            )?;
        }

        writeln!(out, "</svg>")
    }
}

impl Renderer for SvgRenderer {
    type Error = RenderError;

    fn render_to(
        &self,
        conformation: &Conformation,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let svg = self.to_svg_string(conformation)?;
        writer.write_all(svg.as_bytes())?;
        Ok(())
    }
}
