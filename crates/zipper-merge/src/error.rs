//! Error types for the merge crate.

use chrono::NaiveDate;

/// Fatal merge failures. Every variant aborts the whole merge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// No master transaction shares the code of the source's first transaction.
    #[error("no sync point found: no master transaction has code {code:?}")]
    NoSyncPoint { code: String },

    /// Two same-date transactions could not be ordered by any tie-break key.
    #[error(
        "could not order transactions on {date}: master {master_code:?} and source \
         {source_code:?} tie on every key ({keys}); ensure all transactions have ID and \
         RID keys as appropriate, or FITID for imported data"
    )]
    UnorderableTransactions {
        date: NaiveDate,
        master_code: String,
        source_code: String,
        keys: String,
    },

    #[error("invalid merge configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
