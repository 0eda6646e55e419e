pub mod traits;
pub mod tvmaze;

pub use traits::ShowSource;
pub use tvmaze::{TvMazeClient, TvMazeError};
