use super::config::ConfigError;
use crate::core::io::samples::ExportError;
use crate::core::io::traits::RenderError;
use crate::core::models::sequence::SequenceError;
use crate::core::qubo::QuboError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid sequence: {0}")]
    Sequence(#[from] SequenceError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("QUBO construction failed: {0}")]
    Qubo(#[from] QuboError),

    #[error(
        "Problem with {num_variables} variables is too large for exhaustive enumeration (limit {limit})"
    )]
    ProblemTooLarge { num_variables: usize, limit: usize },

    #[error("Sampler returned no samples")]
    EmptySampleSet,

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Sample export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Internal logic error: {0}")]
    Internal(String),
}
