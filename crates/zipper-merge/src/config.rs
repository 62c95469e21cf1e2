use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{MergeError, MergeResult};
use crate::tiebreak::TieBreakCascade;

/// Tie-break keys consulted for same-date transactions, in order.
///
/// `ID` is the stable transaction identifier, `RID` the revision identifier
/// carried by edits, and `FITID` the financial institution identifier carried
/// by imported data.
pub const DEFAULT_TIE_BREAK_KEYS: &[&str] = &["ID", "RID", "FITID"];

/// Configuration for the merge engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Annotation keys used to order same-date transactions, highest
    /// priority first. Values are compared lexically.
    pub tie_break_keys: Vec<String>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            tie_break_keys: DEFAULT_TIE_BREAK_KEYS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl MergeConfig {
    /// Reject configurations that could never order a tie or that name a
    /// key twice.
    pub fn validate(&self) -> MergeResult<()> {
        if self.tie_break_keys.is_empty() {
            return Err(MergeError::InvalidConfig(
                "tie_break_keys must name at least one key".into(),
            ));
        }
        let mut seen = HashSet::new();
        for key in &self.tie_break_keys {
            if key.trim().is_empty() {
                return Err(MergeError::InvalidConfig(
                    "tie_break_keys must not contain empty keys".into(),
                ));
            }
            if !seen.insert(key.as_str()) {
                return Err(MergeError::InvalidConfig(format!(
                    "tie-break key {key:?} listed more than once"
                )));
            }
        }
        Ok(())
    }

    /// Build the tie-break cascade described by this configuration.
    pub fn cascade(&self) -> MergeResult<TieBreakCascade> {
        self.validate()?;
        Ok(TieBreakCascade::from_keys(self.tie_break_keys.iter().cloned()))
    }
}
