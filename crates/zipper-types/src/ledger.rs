use serde::{Deserialize, Serialize};

use crate::directive::Directive;
use crate::transaction::Transaction;

/// A parsed ledger: transactions in file order plus the directives found
/// among them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub transactions: Vec<Transaction>,
    pub directives: Vec<Directive>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(transactions: Vec<Transaction>, directives: Vec<Directive>) -> Self {
        Self {
            transactions,
            directives,
        }
    }

    /// Returns `true` if the ledger holds neither transactions nor directives.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.directives.is_empty()
    }

    /// Split into the `(transactions, directives)` pair.
    pub fn into_parts(self) -> (Vec<Transaction>, Vec<Directive>) {
        (self.transactions, self.directives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn empty_ledger() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
    }

    #[test]
    fn parts_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let ledger = Ledger::from_parts(
            vec![Transaction::new(date, "A")],
            vec![Directive::new("account", "Assets:Cash")],
        );
        assert!(!ledger.is_empty());
        let (trs, drs) = ledger.into_parts();
        assert_eq!(trs.len(), 1);
        assert_eq!(drs.len(), 1);
    }
}
