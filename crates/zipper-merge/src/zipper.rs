//! Tail interleave: zip the unsynchronized remainders of both logs together.
//!
//! Per step, in priority order:
//!
//! 1. master exhausted: take from the source
//! 2. source exhausted: take from the master
//! 3. dates differ: take the earlier one
//! 4. dates equal: ask the [`TieBreakCascade`]; if it cannot decide the
//!    merge fails rather than guess

use std::cmp::Ordering;

use tracing::{debug, trace};
use zipper_types::{Side, Transaction};

use crate::error::{MergeError, MergeResult};
use crate::tiebreak::TieBreakCascade;

/// Counters describing one tail merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TailStats {
    /// Transactions taken from the master tail.
    pub from_master: usize,
    /// Transactions taken from the source tail.
    pub from_source: usize,
    /// Same-date decisions settled by the tie-break cascade.
    pub tie_breaks: usize,
}

impl TailStats {
    /// Total transactions emitted.
    pub fn len(&self) -> usize {
        self.from_master + self.from_source
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Interleave `master[master_cursor..]` and `source[source_cursor..]` into
/// `out`.
///
/// On error `out` may hold a partial tail; callers must discard it.
pub fn zip_tails(
    master: &[Transaction],
    source: &[Transaction],
    mut master_cursor: usize,
    mut source_cursor: usize,
    cascade: &TieBreakCascade,
    out: &mut Vec<Transaction>,
) -> MergeResult<TailStats> {
    let mut stats = TailStats::default();

    loop {
        let side = match (master.get(master_cursor), source.get(source_cursor)) {
            (None, None) => break,
            (None, Some(_)) => Side::Source,
            (Some(_), None) => Side::Master,
            (Some(m), Some(s)) => {
                let side = order_pair(m, s, cascade)?;
                if m.date == s.date {
                    stats.tie_breaks += 1;
                }
                side
            }
        };

        match side {
            Side::Master => {
                out.push(master[master_cursor].clone());
                master_cursor += 1;
                stats.from_master += 1;
            }
            Side::Source => {
                out.push(source[source_cursor].clone());
                source_cursor += 1;
                stats.from_source += 1;
            }
        }
    }

    debug!(
        from_master = stats.from_master,
        from_source = stats.from_source,
        tie_breaks = stats.tie_breaks,
        "zipped tails"
    );
    Ok(stats)
}

/// Decide which of the two head transactions goes first.
fn order_pair(
    master: &Transaction,
    source: &Transaction,
    cascade: &TieBreakCascade,
) -> MergeResult<Side> {
    match master.date.cmp(&source.date) {
        Ordering::Less => Ok(Side::Master),
        Ordering::Greater => Ok(Side::Source),
        Ordering::Equal => {
            let (side, key) = cascade.resolve(master, source).ok_or_else(|| {
                MergeError::UnorderableTransactions {
                    date: master.date,
                    master_code: master.code.clone(),
                    source_code: source.code.clone(),
                    keys: cascade.keys().join(", "),
                }
            })?;
            trace!(date = %master.date, %side, key, "tie broken");
            Ok(side)
        }
    }
}
