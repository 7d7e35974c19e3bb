//! Non-fatal anomalies found while rendering

use serde::Serialize;
use thiserror::Error;

/// A problem the renderer recovered from
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum RenderWarning {
    /// The block's kind is not one the renderer knows; a placeholder was shown
    #[error("unsupported block kind `{kind}`, rendered a placeholder")]
    UnsupportedKind { kind: String },

    /// A table row had the wrong number of cells and was padded or truncated
    #[error("table row {row} has {found} cells, expected {expected}")]
    RowShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A warning tied to the body block it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockWarning {
    pub index: usize,
    pub warning: RenderWarning,
}

impl std::fmt::Display for BlockWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "block #{}: {}", self.index, self.warning)
    }
}
