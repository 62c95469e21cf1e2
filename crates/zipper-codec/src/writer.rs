//! Ledger text writer.
//!
//! Output is a pure function of the ledger and the configuration, so the
//! same merge always renders to the same bytes.

use std::fmt::Write as _;
use std::io;

use serde::{Deserialize, Serialize};
use zipper_types::{Directive, Ledger, Transaction};

use crate::error::{CodecError, CodecResult};

/// How header dates are written. Both styles are accepted by the reader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
    /// `2021/01/02`
    #[default]
    Slash,
    /// `2021-01-02`
    Dash,
}

impl DateStyle {
    fn format(self) -> &'static str {
        match self {
            Self::Slash => "%Y/%m/%d",
            Self::Dash => "%Y-%m-%d",
        }
    }
}

/// Layout options for rendered ledgers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    pub date_style: DateStyle,
    /// Spaces before indented lines.
    pub indent: usize,
    /// Column at which posting amounts start when the account fits.
    pub amount_column: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            date_style: DateStyle::Slash,
            indent: 4,
            amount_column: 48,
        }
    }
}

impl WriterConfig {
    pub fn validate(&self) -> CodecResult<()> {
        if self.indent == 0 {
            return Err(CodecError::InvalidConfig(
                "indent must be at least one space".into(),
            ));
        }
        Ok(())
    }
}

/// Render a ledger to text.
///
/// Each directive is written before the transaction at index `found_before`;
/// directives positioned past the last transaction come at the end. A
/// merged ledger has every position reset, so all of its directives lead.
pub fn render_ledger(ledger: &Ledger, config: &WriterConfig) -> String {
    let count = ledger.transactions.len();
    let mut directives: Vec<&Directive> = ledger.directives.iter().collect();
    directives.sort_by_key(|d| d.found_before.min(count));

    let mut out = String::new();
    let mut pending = directives.into_iter().peekable();

    for (idx, tx) in ledger.transactions.iter().enumerate() {
        let mut wrote_directive = false;
        while let Some(d) = pending.next_if(|d| d.found_before <= idx) {
            render_directive(&mut out, d, config);
            wrote_directive = true;
        }
        if wrote_directive {
            out.push('\n');
        }
        render_transaction(&mut out, tx, config);
        if idx + 1 < count {
            out.push('\n');
        }
    }

    let trailing: Vec<&Directive> = pending.collect();
    if !trailing.is_empty() && count > 0 {
        out.push('\n');
    }
    for d in trailing {
        render_directive(&mut out, d, config);
    }

    out
}

/// Render a ledger and write it out.
pub fn write_ledger<W: io::Write>(
    writer: &mut W,
    ledger: &Ledger,
    config: &WriterConfig,
) -> CodecResult<()> {
    config.validate()?;
    writer.write_all(render_ledger(ledger, config).as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn render_directive(out: &mut String, directive: &Directive, config: &WriterConfig) {
    let _ = writeln!(out, "{directive}");
    for line in &directive.body {
        push_indented(out, line, config);
    }
}

fn render_transaction(out: &mut String, tx: &Transaction, config: &WriterConfig) {
    let _ = write!(out, "{}", tx.date.format(config.date_style.format()));
    if let Some(marker) = tx.status.marker() {
        let _ = write!(out, " {marker}");
    }
    if tx.has_code() {
        let _ = write!(out, " ({})", tx.code);
    }
    if !tx.description.is_empty() {
        let _ = write!(out, " {}", tx.description);
    }
    out.push('\n');

    for (key, value) in &tx.kv_pairs {
        push_indented(out, &format!("; {key}: {value}"), config);
    }
    for note in &tx.notes {
        push_indented(out, &format!("; {note}"), config);
    }
    for posting in &tx.postings {
        match &posting.amount {
            Some(amount) => {
                let used = config.indent + posting.account.len();
                let gap = config.amount_column.saturating_sub(used).max(2);
                let line = format!("{}{}{}", posting.account, " ".repeat(gap), amount);
                push_indented(out, &line, config);
            }
            None => push_indented(out, &posting.account, config),
        }
    }
}

fn push_indented(out: &mut String, line: &str, config: &WriterConfig) {
    for _ in 0..config.indent {
        out.push(' ');
    }
    out.push_str(line);
    out.push('\n');
}
