use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort an index regeneration run.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("{} not found", .0.display())]
    MissingInput(PathBuf),

    #[error("could not find '{anchor}' section")]
    MissingAnchor { anchor: String },
}
