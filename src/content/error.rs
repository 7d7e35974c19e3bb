//! Errors raised while building content from data

use std::path::PathBuf;
use thiserror::Error;

use super::BlockKind;

/// A block whose payload does not match its declared kind
#[derive(Debug, Clone, Error)]
#[error("block #{index}{}: {reason}", kind_suffix(.kind))]
pub struct MalformedBlockError {
    /// Position of the block in the article body
    pub index: usize,
    /// Declared kind, when it could be read
    pub kind: Option<BlockKind>,
    pub reason: String,
}

impl MalformedBlockError {
    pub fn new(index: usize, kind: Option<BlockKind>, reason: impl Into<String>) -> Self {
        Self {
            index,
            kind,
            reason: reason.into(),
        }
    }
}

fn kind_suffix(kind: &Option<BlockKind>) -> String {
    kind.map(|k| format!(" ({})", k)).unwrap_or_default()
}

/// Errors raised while loading the article catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("{path:?}: {source}")]
    MalformedBlock {
        path: PathBuf,
        source: MalformedBlockError,
    },

    #[error("duplicate slug `{slug}` in {path:?}")]
    DuplicateSlug { slug: String, path: PathBuf },
}

impl CatalogError {
    /// File the error was raised for
    pub fn path(&self) -> &std::path::Path {
        match self {
            CatalogError::Read { path, .. }
            | CatalogError::Parse { path, .. }
            | CatalogError::MalformedBlock { path, .. }
            | CatalogError::DuplicateSlug { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_block_message() {
        let err = MalformedBlockError::new(4, Some(BlockKind::Table), "missing field `rows`");
        assert_eq!(err.to_string(), "block #4 (table): missing field `rows`");

        let err = MalformedBlockError::new(0, None, "missing `type` discriminant");
        assert_eq!(err.to_string(), "block #0: missing `type` discriminant");
    }

    #[test]
    fn test_catalog_error_path() {
        let err = CatalogError::DuplicateSlug {
            slug: "cabin-crew".to_string(),
            path: PathBuf::from("source/_articles/b.yml"),
        };
        assert_eq!(err.path(), std::path::Path::new("source/_articles/b.yml"));
        assert!(err.to_string().contains("cabin-crew"));
    }
}
