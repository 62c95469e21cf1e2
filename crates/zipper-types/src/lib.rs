//! Data model for the ledger zipper.
//!
//! These types are produced by the ledger reader, consumed read-only by the
//! merge engine, and handed back to the ledger writer. Every other zipper
//! crate depends on `zipper-types`.
//!
//! # Key Types
//!
//! - [`Transaction`] — A dated record with a sync `code` and identity key/value pairs
//! - [`Posting`] — One account line of a transaction, carried verbatim
//! - [`Directive`] — A metadata declaration with a provenance position
//! - [`Ledger`] — The `(transactions, directives)` pair exchanged at every boundary
//! - [`Side`] — Which of the two inputs (master or source) a record came from

pub mod directive;
pub mod ledger;
pub mod side;
pub mod transaction;

pub use directive::Directive;
pub use ledger::Ledger;
pub use side::Side;
pub use transaction::{KvPairs, Posting, Status, Transaction};
