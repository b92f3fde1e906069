use molnet::core::io::GraphFileError;
use molnet::engine::config::ConfigError;
use molnet::engine::error::NetworkError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] NetworkError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    GraphFile(#[from] GraphFileError),

    #[error("failed to read input file '{path}': {source}", path = path.display())]
    InputParsing {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    Argument(String),
}
