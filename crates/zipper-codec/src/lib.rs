//! Ledger text codec for the ledger zipper.
//!
//! Reads ledger files into [`Ledger`](zipper_types::Ledger) values and writes
//! them back. The merge engine never touches text; this crate never merges.
//!
//! # Format
//!
//! ```text
//! account Assets:Checking
//!
//! 2021/01/02 * (A17) Grocery store
//!     ; ID: 7f3a
//!     Expenses:Food        $12.50
//!     Assets:Checking
//! ```
//!
//! - Column-0 lines starting with a digit are transaction headers:
//!   `DATE [*|!] [(CODE)] DESCRIPTION`
//! - Other column-0 lines are directives; indented lines after them form the body
//! - Indented `; Key: Value` lines under a transaction are key/value pairs,
//!   other `;` lines are notes, anything else is a posting
//! - Column-0 lines starting with `;`, `#`, `%`, `|` or `*` are comments

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{CodecError, CodecResult};
pub use reader::{parse_ledger, read_ledger};
pub use writer::{render_ledger, write_ledger, DateStyle, WriterConfig};
