//! Application mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PdfDeckError;

/// What the collection is being assembled into.
///
/// The two modes never share documents: switching clears the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Concatenate selected pages from any number of documents.
    #[default]
    Merge,
    /// Extract selected pages from exactly one document.
    Split,
}

impl Mode {
    /// Persisted string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Split => "split",
        }
    }

    /// Whether the open dialog may return several files.
    pub fn allows_multiple(&self) -> bool {
        matches!(self, Self::Merge)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = PdfDeckError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "merge" => Ok(Self::Merge),
            "split" => Ok(Self::Split),
            _ => Err(PdfDeckError::invalid_config(format!(
                "Invalid mode: {s}. Must be one of: merge, split"
            ))),
        }
    }
}
