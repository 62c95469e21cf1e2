use std::path::Path;

use serde::{Deserialize, Serialize};
use zipper_codec::WriterConfig;
use zipper_merge::MergeConfig;

use crate::error::{CliError, CliResult};

/// Contents of a `zipper.toml` file.
///
/// ```toml
/// [merge]
/// tie_break_keys = ["ID", "RID", "FITID"]
///
/// [output]
/// date_style = "slash"
/// indent = 4
/// amount_column = 48
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZipperConfig {
    pub merge: MergeConfig,
    pub output: WriterConfig,
}

impl ZipperConfig {
    /// Load from a file, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|reason| CliError::ConfigInvalid {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn parse(text: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(text).map_err(|e| e.to_string())?;
        config.merge.validate().map_err(|e| e.to_string())?;
        config.output.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}
