pub mod charts;
pub mod summary;
pub mod tables;

pub use charts::*;
pub use summary::*;
pub use tables::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Link references unknown variable \"{0}\"")]
    UnknownVariable(String),
}
