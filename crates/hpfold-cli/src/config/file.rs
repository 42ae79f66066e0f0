use crate::error::{CliError, Result};
use hpfold::core::qubo::builder::PenaltyWeights;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilePenaltiesConfig {
    pub hh_contact: Option<f64>,
    pub one_site: Option<f64>,
    pub self_avoidance: Option<f64>,
    pub connectivity: Option<f64>,
}

impl FilePenaltiesConfig {
    pub fn merge_onto(&self, base: PenaltyWeights) -> PenaltyWeights {
        PenaltyWeights {
            hh_contact: self.hh_contact.unwrap_or(base.hh_contact),
            one_site: self.one_site.unwrap_or(base.one_site),
            self_avoidance: self.self_avoidance.unwrap_or(base.self_avoidance),
            connectivity: self.connectivity.unwrap_or(base.connectivity),
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSamplerConfig {
    pub num_reads: Option<usize>,
    pub sweeps: Option<usize>,
    pub seed: Option<u64>,
    pub beta_range: Option<[f64; 2]>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOutputConfig {
    pub image: Option<PathBuf>,
    pub svg: Option<PathBuf>,
    pub samples_csv: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub sequence: Option<String>,
    pub lattice_side: Option<usize>,
    pub penalties: Option<FilePenaltiesConfig>,
    pub sampler: Option<FileSamplerConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
