use std::path::PathBuf;

use semdiff_canon::CanonError;
use semdiff_ir::DuplicateNodeId;

use crate::BoxError;

/// Why a driver run stopped.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("failed to parse `{file}`: {source}")]
    Parse {
        file: String,
        #[source]
        source: BoxError,
    },

    /// The parser broke its contract: two nodes share an identity, so type
    /// evidence could land on the wrong node.
    #[error("`{file}`: {source}")]
    DuplicateId {
        file: String,
        #[source]
        source: DuplicateNodeId,
    },

    #[error("failed to build the type model: {0}")]
    TypeModel(#[source] BoxError),

    #[error("failed to canonicalize `{file}`: {source}")]
    Canon {
        file: String,
        #[source]
        source: CanonError,
    },

    #[error("failed to emit `{file}`: {source}")]
    Emit {
        file: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("diff tool failed: {0}")]
    Diff(#[source] BoxError),
}
