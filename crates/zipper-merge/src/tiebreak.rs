//! Tie-break cascade for transactions that share a date.
//!
//! Each rule looks at one key/value annotation. A rule either picks a side
//! or is inconclusive, in which case the next rule is consulted:
//!
//! - key present on exactly one side: that side goes first
//! - key absent on both sides: inconclusive
//! - key present on both with equal values: inconclusive
//! - key present on both with different values: the smaller value goes first

use std::cmp::Ordering;
use std::fmt;

use zipper_types::{KvPairs, Side, Transaction};

use crate::config::DEFAULT_TIE_BREAK_KEYS;

/// Orders two annotation values.
pub type ValueComparator = fn(&str, &str) -> Ordering;

/// Byte-wise lexical ordering, the default comparator.
pub fn lexical(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Decide which side goes first based on a single key.
///
/// Returns `None` when the key cannot tell the two sides apart.
pub fn choose_side(
    master: &KvPairs,
    source: &KvPairs,
    key: &str,
    comparator: ValueComparator,
) -> Option<Side> {
    match (master.get(key), source.get(key)) {
        (Some(_), None) => Some(Side::Master),
        (None, Some(_)) => Some(Side::Source),
        (None, None) => None,
        (Some(a), Some(b)) => match comparator(a, b) {
            Ordering::Less => Some(Side::Master),
            Ordering::Greater => Some(Side::Source),
            Ordering::Equal => None,
        },
    }
}

/// One tier of the cascade: a key and how to order its values.
#[derive(Clone)]
pub struct TieBreakRule {
    key: String,
    comparator: ValueComparator,
}

impl TieBreakRule {
    /// A rule that orders values lexically.
    pub fn lexical(key: impl Into<String>) -> Self {
        Self::with_comparator(key, lexical)
    }

    pub fn with_comparator(key: impl Into<String>, comparator: ValueComparator) -> Self {
        Self {
            key: key.into(),
            comparator,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Apply this rule to a pair of annotation maps.
    pub fn choose(&self, master: &KvPairs, source: &KvPairs) -> Option<Side> {
        choose_side(master, source, &self.key, self.comparator)
    }
}

impl fmt::Debug for TieBreakRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TieBreakRule").field("key", &self.key).finish()
    }
}

/// Ordered list of tie-break rules, consulted first to last.
#[derive(Clone, Debug)]
pub struct TieBreakCascade {
    rules: Vec<TieBreakRule>,
}

impl TieBreakCascade {
    pub fn new(rules: Vec<TieBreakRule>) -> Self {
        Self { rules }
    }

    /// Build a cascade of lexical rules from a list of keys.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(keys.into_iter().map(TieBreakRule::lexical).collect())
    }

    pub fn rules(&self) -> &[TieBreakRule] {
        &self.rules
    }

    /// Keys in consultation order.
    pub fn keys(&self) -> Vec<&str> {
        self.rules.iter().map(TieBreakRule::key).collect()
    }

    /// Pick which of two same-date transactions goes first.
    ///
    /// Returns the chosen side and the key that decided it, or `None` if
    /// every rule was inconclusive.
    pub fn resolve(&self, master: &Transaction, source: &Transaction) -> Option<(Side, &str)> {
        self.rules.iter().find_map(|rule| {
            rule.choose(&master.kv_pairs, &source.kv_pairs)
                .map(|side| (side, rule.key()))
        })
    }
}

impl Default for TieBreakCascade {
    fn default() -> Self {
        Self::from_keys(DEFAULT_TIE_BREAK_KEYS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn kv(pairs: &[(&str, &str)]) -> KvPairs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn tx(pairs: &[(&str, &str)]) -> Transaction {
        let mut t = Transaction::new(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(), "");
        t.kv_pairs = kv(pairs);
        t
    }

    #[test]
    fn presence_beats_absence() {
        let with = kv(&[("ID", "z")]);
        let without = kv(&[]);
        assert_eq!(choose_side(&with, &without, "ID", lexical), Some(Side::Master));
        assert_eq!(choose_side(&without, &with, "ID", lexical), Some(Side::Source));
    }

    #[test]
    fn absent_on_both_is_inconclusive() {
        let a = kv(&[("memo", "x")]);
        let b = kv(&[]);
        assert_eq!(choose_side(&a, &b, "ID", lexical), None);
    }

    #[test]
    fn equal_values_are_inconclusive() {
        let a = kv(&[("ID", "same")]);
        assert_eq!(choose_side(&a, &a.clone(), "ID", lexical), None);
    }

    #[test]
    fn smaller_value_goes_first() {
        let a = kv(&[("ID", "x1")]);
        let b = kv(&[("ID", "x2")]);
        assert_eq!(choose_side(&a, &b, "ID", lexical), Some(Side::Master));
        assert_eq!(choose_side(&b, &a, "ID", lexical), Some(Side::Source));
    }

    #[test]
    fn lexical_not_numeric() {
        let a = kv(&[("ID", "10")]);
        let b = kv(&[("ID", "9")]);
        assert_eq!(choose_side(&a, &b, "ID", lexical), Some(Side::Master));
    }

    #[test]
    fn custom_comparator_is_used() {
        fn reversed(a: &str, b: &str) -> Ordering {
            b.cmp(a)
        }
        let rule = TieBreakRule::with_comparator("ID", reversed);
        let a = kv(&[("ID", "x1")]);
        let b = kv(&[("ID", "x2")]);
        assert_eq!(rule.choose(&a, &b), Some(Side::Source));
    }

    #[test]
    fn default_cascade_order() {
        let cascade = TieBreakCascade::default();
        assert_eq!(cascade.keys(), vec!["ID", "RID", "FITID"]);
    }

    #[test]
    fn cascade_falls_through_to_rid() {
        let cascade = TieBreakCascade::default();
        let a = tx(&[("ID", "same"), ("RID", "r2")]);
        let b = tx(&[("ID", "same"), ("RID", "r1")]);
        assert_eq!(cascade.resolve(&a, &b), Some((Side::Source, "RID")));
    }

    #[test]
    fn cascade_falls_through_to_fitid() {
        let cascade = TieBreakCascade::default();
        let a = tx(&[("FITID", "0001")]);
        let b = tx(&[("FITID", "0002")]);
        assert_eq!(cascade.resolve(&a, &b), Some((Side::Master, "FITID")));
    }

    #[test]
    fn earlier_key_wins_over_later() {
        let cascade = TieBreakCascade::default();
        // Source has an ID, master only a FITID: ID tier decides.
        let a = tx(&[("FITID", "0001")]);
        let b = tx(&[("ID", "zzz")]);
        assert_eq!(cascade.resolve(&a, &b), Some((Side::Source, "ID")));
    }

    #[test]
    fn cascade_inconclusive_without_keys() {
        let cascade = TieBreakCascade::default();
        assert_eq!(cascade.resolve(&tx(&[]), &tx(&[("memo", "m")])), None);
    }

    #[test]
    fn empty_cascade_never_decides() {
        let cascade = TieBreakCascade::new(Vec::new());
        assert_eq!(cascade.resolve(&tx(&[("ID", "a")]), &tx(&[])), None);
    }

    #[test]
    fn rule_debug_shows_key() {
        let rule = TieBreakRule::lexical("RID");
        assert!(format!("{rule:?}").contains("RID"));
    }
}
