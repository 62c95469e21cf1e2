//! Ledger text reader.

use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;
use zipper_types::{Directive, Ledger, Posting, Status, Transaction};

use crate::error::{CodecError, CodecResult};

/// Characters that mark a column-0 comment line.
const COMMENT_CHARS: &[char] = &[';', '#', '%', '|', '*'];

/// Accepted header date layouts.
const DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%Y-%m-%d"];

/// Which entry indented lines currently attach to.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Open {
    Nothing,
    Transaction,
    Directive,
}

/// Read and parse a ledger file.
pub fn read_ledger(path: &Path) -> CodecResult<Ledger> {
    let text = std::fs::read_to_string(path).map_err(|source| CodecError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let ledger = parse_ledger(&text)?;
    debug!(
        path = %path.display(),
        transactions = ledger.transactions.len(),
        directives = ledger.directives.len(),
        "read ledger"
    );
    Ok(ledger)
}

/// Parse ledger text.
///
/// Transactions keep their file order. Each directive records how many
/// transactions preceded it.
pub fn parse_ledger(text: &str) -> CodecResult<Ledger> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut ledger = Ledger::new();
    let mut open = Open::Nothing;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end();

        if line.is_empty() {
            open = Open::Nothing;
            continue;
        }

        if line.starts_with([' ', '\t']) {
            let content = line.trim_start();
            match open {
                Open::Transaction => {
                    // `open` is only Transaction after a push.
                    if let Some(tx) = ledger.transactions.last_mut() {
                        parse_transaction_line(tx, content, line_no)?;
                    }
                }
                Open::Directive => {
                    if let Some(directive) = ledger.directives.last_mut() {
                        directive.body.push(content.to_string());
                    }
                }
                Open::Nothing => {
                    return Err(CodecError::parse(
                        line_no,
                        "indented line outside of a transaction or directive",
                    ));
                }
            }
            continue;
        }

        if line.starts_with(COMMENT_CHARS) {
            open = Open::Nothing;
            continue;
        }

        if line.starts_with(|c: char| c.is_ascii_digit()) {
            ledger.transactions.push(parse_header(line, line_no)?);
            open = Open::Transaction;
        } else {
            let (kind, argument) = match line.split_once(char::is_whitespace) {
                Some((kind, argument)) => (kind, argument.trim()),
                None => (line, ""),
            };
            ledger.directives.push(
                Directive::new(kind, argument).with_found_before(ledger.transactions.len()),
            );
            open = Open::Directive;
        }
    }

    Ok(ledger)
}

/// Parse `DATE [*|!] [(CODE)] DESCRIPTION`.
fn parse_header(line: &str, line_no: usize) -> CodecResult<Transaction> {
    let (date_text, rest) = match line.split_once(char::is_whitespace) {
        Some((date, rest)) => (date, rest.trim_start()),
        None => (line, ""),
    };
    let date = parse_date(date_text)
        .ok_or_else(|| CodecError::parse(line_no, format!("invalid date: {date_text:?}")))?;

    let mut rest = rest;
    let mut status = Status::Unmarked;
    if let Some(marker) = rest.chars().next().and_then(Status::from_marker) {
        status = marker;
        rest = rest[1..].trim_start();
    }

    let mut code = "";
    if let Some(after_paren) = rest.strip_prefix('(') {
        let (inner, tail) = after_paren
            .split_once(')')
            .ok_or_else(|| CodecError::parse(line_no, "unterminated transaction code"))?;
        code = inner.trim();
        rest = tail.trim_start();
    }

    Ok(Transaction::new(date, code)
        .with_status(status)
        .with_description(rest))
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Attach an indented line to a transaction.
fn parse_transaction_line(tx: &mut Transaction, content: &str, line_no: usize) -> CodecResult<()> {
    if let Some(comment) = content.strip_prefix(';') {
        let comment = comment.trim();
        match split_kv(comment) {
            Some((key, value)) => {
                if tx.kv_pairs.contains_key(key) {
                    return Err(CodecError::parse(
                        line_no,
                        format!("duplicate key {key:?} on transaction"),
                    ));
                }
                tx.kv_pairs.insert(key.to_string(), value.to_string());
            }
            None => tx.notes.push(comment.to_string()),
        }
        return Ok(());
    }

    let (account, amount) = split_posting(content);
    tx.postings
        .push(Posting::new(account, amount.map(str::to_string)));
    Ok(())
}

/// `Key: Value` with a non-empty, whitespace-free key.
fn split_kv(comment: &str) -> Option<(&str, &str)> {
    let (key, value) = comment.split_once(':')?;
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key, value.trim()))
}

/// Account and amount are separated by a tab or at least two spaces.
fn split_posting(content: &str) -> (&str, Option<&str>) {
    let split = [content.find('\t'), content.find("  ")]
        .into_iter()
        .flatten()
        .min();
    match split {
        Some(at) => {
            let amount = content[at..].trim();
            (
                content[..at].trim_end(),
                (!amount.is_empty()).then_some(amount),
            )
        }
        None => (content, None),
    }
}
