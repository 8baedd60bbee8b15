use thiserror::Error;

pub type Result<T> = std::result::Result<T, PatchError>;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Analyzer error: {0}")]
    Analyzer(#[from] hintscan_analyzer::AnalyzerError),
}
