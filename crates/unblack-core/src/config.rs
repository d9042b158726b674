use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, UnblackError};
use crate::io::pnm::PbmFormat;

/// Order in which the edge-clearing worklist is drained.
///
/// Both orders clear exactly the same set of bits; they differ only in the
/// peak size of the worklist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraversalOrder {
    /// Last-in first-out worklist.
    #[default]
    DepthFirst,
    /// First-in first-out worklist.
    BreadthFirst,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthFirst => write!(f, "Depth-first"),
            Self::BreadthFirst => write!(f, "Breadth-first"),
        }
    }
}

/// Settings for one `unblackedges` run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearConfig {
    #[serde(default)]
    pub order: TraversalOrder,
    /// Encoding of the written bitmap.
    #[serde(default)]
    pub output: PbmFormat,
}

impl ClearConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| UnblackError::Config(e.to_string()))
    }

    /// Read a TOML config file. Missing keys fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| UnblackError::Config(e.to_string()))
    }
}
