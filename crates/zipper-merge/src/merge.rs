//! The merge engine: directives, then transactions.

use tracing::info;
use zipper_types::{Ledger, Transaction};

use crate::config::MergeConfig;
use crate::directives::merge_directives;
use crate::error::MergeResult;
use crate::report::MergeReport;
use crate::sync::{synchronize, SyncState};
use crate::tiebreak::TieBreakCascade;
use crate::zipper::{zip_tails, TailStats};

/// Result of merging two transaction logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionMerge {
    pub transactions: Vec<Transaction>,
    pub sync: SyncState,
    pub tail: TailStats,
}

/// A merged ledger plus a summary of how it was produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeOutcome {
    pub ledger: Ledger,
    pub report: MergeReport,
}

/// Merges a master ledger with a source ledger.
///
/// Stateless between calls; one engine can be reused for any number of
/// merges.
#[derive(Clone, Debug, Default)]
pub struct LedgerZipper {
    cascade: TieBreakCascade,
}

impl LedgerZipper {
    pub fn new(cascade: TieBreakCascade) -> Self {
        Self { cascade }
    }

    /// Build an engine from configuration, validating it first.
    pub fn from_config(config: &MergeConfig) -> MergeResult<Self> {
        Ok(Self::new(config.cascade()?))
    }

    pub fn cascade(&self) -> &TieBreakCascade {
        &self.cascade
    }

    /// Merge two transaction logs.
    ///
    /// The output is the master through the sync point, the common run
    /// (master copies), then the interleaved tails.
    pub fn merge_transactions(
        &self,
        master: &[Transaction],
        source: &[Transaction],
    ) -> MergeResult<TransactionMerge> {
        let sync = synchronize(master, source)?;

        let mut transactions = Vec::with_capacity(master.len() + source.len() - sync.overlap());
        transactions.extend_from_slice(sync.settled(master));

        let tail = zip_tails(
            master,
            source,
            sync.master_cursor,
            sync.source_cursor,
            &self.cascade,
            &mut transactions,
        )?;

        Ok(TransactionMerge {
            transactions,
            sync,
            tail,
        })
    }

    /// Merge two ledgers. Fails without producing output if the transaction
    /// logs cannot be aligned or ordered.
    pub fn merge(&self, master: &Ledger, source: &Ledger) -> MergeResult<MergeOutcome> {
        let directives = merge_directives(&master.directives, &source.directives);
        let merged = self.merge_transactions(&master.transactions, &source.transactions)?;

        let report = MergeReport {
            master_transactions: master.transactions.len(),
            source_transactions: source.transactions.len(),
            merged_transactions: merged.transactions.len(),
            sync_point: merged.sync.sync_point,
            common_run: merged.sync.common_run,
            tail_from_master: merged.tail.from_master,
            tail_from_source: merged.tail.from_source,
            tie_breaks: merged.tail.tie_breaks,
            master_directives: master.directives.len(),
            source_directives: source.directives.len(),
            merged_directives: directives.len(),
        };
        debug_assert!(report.is_conserved(), "merge lost or duplicated transactions");

        info!(
            transactions = report.merged_transactions,
            directives = report.merged_directives,
            overlap = report.overlap(),
            "ledgers merged"
        );

        Ok(MergeOutcome {
            ledger: Ledger::from_parts(merged.transactions, directives),
            report,
        })
    }
}

/// Merge two ledgers with the given configuration.
pub fn merge_ledgers(
    master: &Ledger,
    source: &Ledger,
    config: &MergeConfig,
) -> MergeResult<MergeOutcome> {
    LedgerZipper::from_config(config)?.merge(master, source)
}
