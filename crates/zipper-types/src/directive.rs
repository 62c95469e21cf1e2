use std::fmt;

use serde::{Deserialize, Serialize};

/// A metadata declaration such as `account`, `commodity` or `payee`.
///
/// `found_before` records where the directive sat in the file it was read
/// from: the number of transactions that preceded it. It is provenance only
/// and is ignored by [`Directive::compare`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    /// Directive keyword (`account`, `commodity`, ...).
    pub kind: String,
    /// Everything after the keyword on the first line.
    pub argument: String,
    /// Indented lines that follow the first line, without indentation.
    pub body: Vec<String>,
    /// Index of the transaction this directive was found before.
    pub found_before: usize,
}

impl Directive {
    pub fn new(kind: impl Into<String>, argument: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            argument: argument.into(),
            body: Vec::new(),
            found_before: 0,
        }
    }

    pub fn with_body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }

    pub fn with_found_before(mut self, found_before: usize) -> Self {
        self.found_before = found_before;
        self
    }

    /// Structural equality ignoring provenance.
    ///
    /// This is an equivalence relation: symmetric, reflexive and transitive.
    pub fn compare(&self, other: &Self) -> bool {
        self.kind == other.kind && self.argument == other.argument && self.body == other.body
    }

    /// Clear the provenance position.
    pub fn reset_provenance(&mut self) {
        self.found_before = 0;
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.argument.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} {}", self.kind, self.argument)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_ignores_provenance() {
        let a = Directive::new("account", "Assets:Cash").with_found_before(3);
        let b = Directive::new("account", "Assets:Cash").with_found_before(9);
        assert!(a.compare(&b));
        assert!(b.compare(&a));
        assert_ne!(a, b);
    }

    #[test]
    fn compare_checks_kind_argument_and_body() {
        let base = Directive::new("account", "Assets:Cash");
        assert!(!base.compare(&Directive::new("commodity", "Assets:Cash")));
        assert!(!base.compare(&Directive::new("account", "Assets:Bank")));
        assert!(!base.compare(&base.clone().with_body_line("note Petty cash")));
        assert!(base.compare(&base));
    }

    #[test]
    fn reset_provenance_zeroes_position() {
        let mut d = Directive::new("commodity", "$").with_found_before(12);
        d.reset_provenance();
        assert_eq!(d.found_before, 0);
    }

    #[test]
    fn display_formats_first_line() {
        assert_eq!(Directive::new("account", "Assets:Cash").to_string(), "account Assets:Cash");
        assert_eq!(Directive::new("end", "").to_string(), "end");
    }
}
