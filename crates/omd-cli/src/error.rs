use omdtools::workflows::combine::CombineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Combine(#[from] CombineError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
