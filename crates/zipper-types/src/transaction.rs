use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Key/value annotations attached to a transaction.
///
/// Ordered so that rendering a transaction is deterministic.
pub type KvPairs = BTreeMap<String, String>;

/// Clearing state of a transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// No marker.
    #[default]
    Unmarked,
    /// `!` marker.
    Pending,
    /// `*` marker.
    Cleared,
}

impl Status {
    /// Parse a header marker character.
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '*' => Some(Self::Cleared),
            '!' => Some(Self::Pending),
            _ => None,
        }
    }

    /// The header marker character, if any.
    pub fn marker(&self) -> Option<char> {
        match self {
            Self::Unmarked => None,
            Self::Pending => Some('!'),
            Self::Cleared => Some('*'),
        }
    }
}

/// One account line of a transaction.
///
/// The amount is kept as written; the zipper never does arithmetic.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Posting {
    pub account: String,
    pub amount: Option<String>,
}

impl Posting {
    pub fn new(account: impl Into<String>, amount: Option<String>) -> Self {
        Self {
            account: account.into(),
            amount,
        }
    }
}

/// A dated ledger record.
///
/// Only `date`, `code` and `kv_pairs` influence merging. The remaining
/// fields ride along untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Calendar date of the record.
    pub date: NaiveDate,
    pub status: Status,
    /// Opaque identifier used to find where two ledgers overlap.
    /// Empty when the record has no code.
    pub code: String,
    pub description: String,
    /// Identity metadata (`ID`, `RID`, `FITID`) and other annotations.
    pub kv_pairs: KvPairs,
    /// Free comment lines that are not key/value pairs.
    pub notes: Vec<String>,
    pub postings: Vec<Posting>,
}

impl Transaction {
    /// Create a transaction with the given date and code and nothing else.
    pub fn new(date: NaiveDate, code: impl Into<String>) -> Self {
        Self {
            date,
            status: Status::Unmarked,
            code: code.into(),
            description: String::new(),
            kv_pairs: KvPairs::new(),
            notes: Vec::new(),
            postings: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add (or replace) a key/value annotation.
    pub fn with_kv(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.kv_pairs.insert(key.into(), value.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_posting(mut self, posting: Posting) -> Self {
        self.postings.push(posting);
        self
    }

    /// Look up an annotation value.
    pub fn kv(&self, key: &str) -> Option<&str> {
        self.kv_pairs.get(key).map(String::as_str)
    }

    /// Returns `true` if the transaction carries a code.
    pub fn has_code(&self) -> bool {
        !self.code.is_empty()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date)?;
        if self.has_code() {
            write!(f, " ({})", self.code)?;
        }
        if !self.description.is_empty() {
            write!(f, " {}", self.description)?;
        }
        Ok(())
    }
}
