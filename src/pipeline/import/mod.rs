pub mod format;
pub mod loader;

pub use format::*;
pub use loader::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input directory does not exist: {0}")]
    InputDirMissing(PathBuf),

    #[error("No readable documents found under {0}")]
    EmptyCorpus(PathBuf),
}
