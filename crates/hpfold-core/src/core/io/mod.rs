//! Output formats: conformation plots (PNG, SVG) and sample-set export (CSV).

mod layout;
pub mod png;
pub mod samples;
pub mod svg;
pub mod traits;
