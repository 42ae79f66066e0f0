use crate::core::models::conformation::Conformation;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("SVG formatting error: {0}")]
    Format(#[from] std::fmt::Error),
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Defines the interface for drawing a conformation into an output format.
///
/// Implementors handle format-specific encoding; file handling is shared
/// through the provided `render_to_path`.
pub trait Renderer {
    /// The error type for rendering operations.
    type Error: Error + From<io::Error>;

    /// Renders `conformation` into `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the writer reports an I/O error.
    fn render_to(
        &self,
        conformation: &Conformation,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Renders `conformation` into a newly created file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or rendering fails.
    fn render_to_path<P: AsRef<Path>>(
        &self,
        conformation: &Conformation,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.render_to(conformation, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
