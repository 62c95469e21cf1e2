//! Sync-point search: where does the source ledger resume the master's
//! history?
//!
//! The master is treated as the authoritative, longer-lived history and the
//! source as a tail that picks up somewhere inside it. The last master
//! transaction whose code matches the source's first transaction is the sync
//! point. From there both logs are walked in lockstep for as long as their
//! codes agree; that run is common history and the master's copy is kept.

use tracing::{debug, warn};
use zipper_types::Transaction;

use crate::error::{MergeError, MergeResult};

/// Where the two transaction logs line up.
///
/// Everything in `master[..master_cursor]` is settled: the prefix through the
/// sync point plus the common run. The cursors point at the first
/// unmerged transaction of each log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncState {
    /// Index in the master of the source's first transaction, if the logs
    /// were aligned at all.
    pub sync_point: Option<usize>,
    /// Number of transactions after the sync point whose codes agree in both
    /// logs.
    pub common_run: usize,
    /// First unmerged master index.
    pub master_cursor: usize,
    /// First unmerged source index.
    pub source_cursor: usize,
}

impl SyncState {
    /// Number of source transactions absorbed into the master's history:
    /// the sync-point pair plus the common run.
    pub fn overlap(&self) -> usize {
        match self.sync_point {
            Some(_) => 1 + self.common_run,
            None => 0,
        }
    }

    /// The settled master prefix.
    pub fn settled<'a>(&self, master: &'a [Transaction]) -> &'a [Transaction] {
        &master[..self.master_cursor]
    }
}

/// Find the last master transaction whose code equals `source_head_code`.
///
/// Fails with [`MergeError::NoSyncPoint`] if no master transaction matches,
/// which includes the case of an empty master.
pub fn find_sync_point(master: &[Transaction], source_head_code: &str) -> MergeResult<usize> {
    master
        .iter()
        .rposition(|tx| tx.code == source_head_code)
        .ok_or_else(|| MergeError::NoSyncPoint {
            code: source_head_code.to_string(),
        })
}

/// Align the two logs.
///
/// An empty source leaves the whole master settled. An empty master is a
/// zero-length prefix: nothing is settled and the whole source is left for
/// the tail merge. Otherwise the sync point must exist.
pub fn synchronize(master: &[Transaction], source: &[Transaction]) -> MergeResult<SyncState> {
    let Some(head) = source.first() else {
        warn!(master = master.len(), "source ledger has no transactions");
        return Ok(SyncState {
            sync_point: None,
            common_run: 0,
            master_cursor: master.len(),
            source_cursor: 0,
        });
    };

    if master.is_empty() {
        warn!(source = source.len(), "master ledger has no transactions; taking source as-is");
        return Ok(SyncState {
            sync_point: None,
            common_run: 0,
            master_cursor: 0,
            source_cursor: 0,
        });
    }

    let sync_point = find_sync_point(master, &head.code)?;

    let common_run = master[sync_point + 1..]
        .iter()
        .zip(&source[1..])
        .take_while(|(m, s)| m.code == s.code)
        .count();

    debug!(sync_point, code = %head.code, common_run, "found sync point");

    Ok(SyncState {
        sync_point: Some(sync_point),
        common_run,
        master_cursor: sync_point + 1 + common_run,
        source_cursor: 1 + common_run,
    })
}
