use std::path::PathBuf;

use thiserror::Error;
use zipper_codec::CodecError;
use zipper_merge::MergeError;
use zipper_types::Side;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {reason}", .path.display())]
    ConfigInvalid { path: PathBuf, reason: String },

    /// The master or source ledger could not be read or parsed.
    #[error("{side} ledger: {source}")]
    Ledger {
        side: Side,
        #[source]
        source: CodecError,
    },

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error("invalid output settings: {0}")]
    Output(#[from] CodecError),

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type CliResult<T> = Result<T, CliError>;
