use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a run. None of these leave an output file behind.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("second-half worker exited without delivering its counts")]
    WorkerFailed,
    #[error("worker handoff payload is corrupt: {0}")]
    HandoffCorrupt(String),
    #[error("failed to move finished report to {}: {source}", .path.display())]
    Persist { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
