use hpfold::engine::config::FoldingConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub image: PathBuf,
    pub svg: Option<PathBuf>,
    pub samples_csv: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub core_config: FoldingConfig,
    pub outputs: OutputPaths,
}
