// crates/routelog-core/src/error.rs

use std::path::PathBuf;

use routelog_parser::ParserError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParserError,
    },

    #[error("failed to write routes to {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("File discovery pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Error while accessing a file from the glob pattern: {0}")]
    Glob(#[from] glob::GlobError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
