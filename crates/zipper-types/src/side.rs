use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two ledgers being merged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The authoritative copy whose history wins through the overlap.
    Master,
    /// The copy being folded into the master.
    Source,
}

impl Side {
    /// The other side.
    pub fn opposite(self) -> Self {
        match self {
            Self::Master => Self::Source,
            Self::Source => Self::Master,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Master => write!(f, "master"),
            Self::Source => write!(f, "source"),
        }
    }
}
