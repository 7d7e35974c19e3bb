//! crewpost: a static article generator for block-structured training blogs
//!
//! Articles are catalog files made of typed content blocks. Each block kind
//! maps to one rendering template; the composer wraps the rendered body with
//! a header, key takeaways, a table of contents, FAQs and a call to action,
//! and the generator writes the result out as a static site.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod render;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// Directory under the source directory holding catalog files
pub const ARTICLES_DIR: &str = "_articles";

/// The main Crewpost application
#[derive(Clone)]
pub struct Crewpost {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Source directory
    pub source_dir: std::path::PathBuf,
    /// Catalog directory
    pub articles_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Crewpost {
    /// Create a new Crewpost instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);
        let articles_dir = source_dir.join(ARTICLES_DIR);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            articles_dir,
            public_dir,
        })
    }

    /// Load every catalog file, keeping the ones that were rejected
    pub fn load_catalog(&self) -> content::LoadedCatalog {
        content::CatalogLoader::new(&self.articles_dir).load()
    }

    /// Presentation settings derived from the site config
    pub fn compose_options(&self) -> render::ComposeOptions {
        render::ComposeOptions::from(&self.config)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
