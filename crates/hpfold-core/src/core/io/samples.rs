use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One exported record of a sample set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRow {
    pub rank: usize,
    pub energy: f64,
    pub num_occurrences: usize,
    /// Space-separated labels of the variables set to 1.
    pub active: String,
}

pub fn write_samples<W: Write>(
    writer: W,
    rows: impl IntoIterator<Item = SampleRow>,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_samples_to_path<P: AsRef<Path>>(
    path: P,
    rows: impl IntoIterator<Item = SampleRow>,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_samples(file, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_samples_emits_header_and_rows() {
        let rows = vec![
            SampleRow {
                rank: 1,
                energy: -10.0,
                num_occurrences: 3,
                active: "x_0_0_0 x_1_0_1".to_string(),
            },
            SampleRow {
                rank: 2,
                energy: -9.5,
                num_occurrences: 1,
                active: String::new(),
            },
        ];
        let mut buffer = Vec::new();
        write_samples(&mut buffer, rows).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "rank,energy,num_occurrences,active");
        assert_eq!(lines[1], "1,-10.0,3,x_0_0_0 x_1_0_1");
        assert_eq!(lines[2], "2,-9.5,1,");
    }

    #[test]
    fn write_samples_to_path_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.csv");
        write_samples_to_path(&path, Vec::new()).unwrap();
        assert!(path.exists());
    }
}
