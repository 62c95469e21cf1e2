use serde::{Deserialize, Serialize};

/// Summary of a completed merge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    pub master_transactions: usize,
    pub source_transactions: usize,
    pub merged_transactions: usize,
    /// Master index the source was aligned to, if any.
    pub sync_point: Option<usize>,
    /// Transactions after the sync point that both ledgers share.
    pub common_run: usize,
    pub tail_from_master: usize,
    pub tail_from_source: usize,
    pub tie_breaks: usize,
    pub master_directives: usize,
    pub source_directives: usize,
    pub merged_directives: usize,
}

impl MergeReport {
    /// Source transactions absorbed into the master's history.
    pub fn overlap(&self) -> usize {
        match self.sync_point {
            Some(_) => 1 + self.common_run,
            None => 0,
        }
    }

    /// Returns `true` if no transaction was lost or duplicated by count.
    pub fn is_conserved(&self) -> bool {
        self.master_transactions + self.source_transactions
            == self.merged_transactions + self.overlap()
    }

    /// Directives the source contributed.
    pub fn new_directives(&self) -> usize {
        self.merged_directives.saturating_sub(self.master_directives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> MergeReport {
        MergeReport {
            master_transactions: 2,
            source_transactions: 2,
            merged_transactions: 3,
            sync_point: Some(1),
            common_run: 0,
            tail_from_master: 0,
            tail_from_source: 1,
            tie_breaks: 0,
            master_directives: 1,
            source_directives: 2,
            merged_directives: 2,
        }
    }

    #[test]
    fn overlap_counts_sync_pair() {
        assert_eq!(report().overlap(), 1);
        let unsynced = MergeReport {
            sync_point: None,
            ..report()
        };
        assert_eq!(unsynced.overlap(), 0);
    }

    #[test]
    fn conservation() {
        assert!(report().is_conserved());
        let lossy = MergeReport {
            merged_transactions: 2,
            ..report()
        };
        assert!(!lossy.is_conserved());
    }

    #[test]
    fn new_directives() {
        assert_eq!(report().new_directives(), 1);
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["sync_point"], 1);
        assert_eq!(json["merged_transactions"], 3);
    }
}
