use std::path::PathBuf;

use thiserror::Error;

/// Errors that can arise while running a game session.
#[derive(Debug, Error)]
pub enum GameError {
    /// Console read/write failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The save file could not be read at startup.
    #[error("failed to load save file {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The save file could not be created or written.
    #[error("failed to write save file {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type GameResult<T> = Result<T, GameError>;
