use thiserror::Error;

use telly_api::TvMazeError;
use telly_core::error::CoreError;
use telly_runtime::RuntimeError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Api(#[from] TvMazeError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Status(String),
}
