//! Catalog loader - reads article files from the articles directory

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ArticleSource, Catalog, CatalogError};

/// Result of loading a catalog: the articles that were accepted and the
/// files that were rejected
#[derive(Debug, Default)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub rejected: Vec<CatalogError>,
}

/// Loads articles from a directory of YAML/JSON files
pub struct CatalogLoader {
    articles_dir: PathBuf,
}

impl CatalogLoader {
    /// Create a loader for the given articles directory
    pub fn new<P: AsRef<Path>>(articles_dir: P) -> Self {
        Self {
            articles_dir: articles_dir.as_ref().to_path_buf(),
        }
    }

    /// Load every article file.
    ///
    /// A file that fails to read, parse or validate is reported in
    /// [`LoadedCatalog::rejected`] and does not stop the others. A duplicate
    /// slug is reported the same way; the first file in path order keeps it.
    pub fn load(&self) -> LoadedCatalog {
        if !self.articles_dir.exists() {
            tracing::debug!("No articles directory at {:?}", self.articles_dir);
            return LoadedCatalog::default();
        }

        let mut loaded = Vec::new();
        let mut rejected = Vec::new();

        let mut paths: Vec<PathBuf> = WalkDir::new(&self.articles_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.is_file() && is_article_file(p))
            .collect();
        paths.sort();

        for path in paths {
            match self.load_article(&path) {
                Ok(article) => loaded.push((path, article)),
                Err(e) => {
                    tracing::warn!("Rejected article file: {}", e);
                    rejected.push(e);
                }
            }
        }

        // Drop later duplicates so one bad file can't empty the catalog
        let mut seen = std::collections::HashSet::new();
        let mut unique = Vec::with_capacity(loaded.len());
        for (path, article) in loaded {
            if seen.insert(article.slug.clone()) {
                unique.push((path, article));
            } else {
                let err = CatalogError::DuplicateSlug {
                    slug: article.slug,
                    path,
                };
                tracing::warn!("Rejected article file: {}", err);
                rejected.push(err);
            }
        }

        let catalog = match Catalog::from_sources(unique) {
            Ok(catalog) => catalog,
            Err(e) => {
                rejected.push(e);
                Catalog::default()
            }
        };

        tracing::debug!(
            "Loaded {} articles ({} rejected) from {:?}",
            catalog.len(),
            rejected.len(),
            self.articles_dir
        );

        LoadedCatalog { catalog, rejected }
    }

    /// Load a single article file
    fn load_article(&self, path: &Path) -> Result<super::Article, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let source = parse_source(path, &content)?;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled");

        source
            .into_article(stem)
            .map_err(|source| CatalogError::MalformedBlock {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Parse a file body according to its extension
fn parse_source(path: &Path, content: &str) -> Result<ArticleSource, CatalogError> {
    let parsed = match extension(path) {
        Some("json") => serde_json::from_str(content).map_err(|e| e.to_string()),
        _ => serde_yaml::from_str(content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|reason| CatalogError::Parse {
        path: path.to_path_buf(),
        reason,
    })
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// Check if a file is an article file
fn is_article_file(path: &Path) -> bool {
    matches!(extension(path), Some("yml" | "yaml" | "json"))
}
