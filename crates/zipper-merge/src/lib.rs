//! Merge engine for the ledger zipper.
//!
//! Reconciles a master ledger with a partially overlapping source ledger:
//! directives are deduplicated, the transaction logs are aligned at a sync
//! point, and the diverging tails are interleaved by date with a
//! deterministic tie-break cascade. Nothing here performs I/O.
//!
//! # Key Types
//!
//! - [`LedgerZipper`] -- Engine that runs both merges and builds a [`MergeReport`]
//! - [`SyncState`] -- Where the two transaction logs overlap
//! - [`TieBreakCascade`] / [`TieBreakRule`] -- Ordered `(key, comparator)` rules for same-date ties
//! - [`MergeConfig`] -- Serializable engine configuration
//! - [`MergeError`] -- Fatal merge failures

pub mod config;
pub mod directives;
pub mod error;
pub mod merge;
pub mod report;
pub mod sync;
pub mod tiebreak;
pub mod zipper;

pub use config::{MergeConfig, DEFAULT_TIE_BREAK_KEYS};
pub use directives::merge_directives;
pub use error::{MergeError, MergeResult};
pub use merge::{merge_ledgers, LedgerZipper, MergeOutcome, TransactionMerge};
pub use report::MergeReport;
pub use sync::{find_sync_point, synchronize, SyncState};
pub use tiebreak::{choose_side, lexical, TieBreakCascade, TieBreakRule, ValueComparator};
pub use zipper::{zip_tails, TailStats};
