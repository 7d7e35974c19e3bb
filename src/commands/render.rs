//! Print a single composed article

use anyhow::Result;

use crate::render::{Composer, Node};
use crate::Crewpost;

/// Output format for `render`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Serialized HTML fragment
    #[default]
    Html,
    /// Node tree as JSON
    Json,
}

/// Compose the article with the given slug
pub fn render_article(crewpost: &Crewpost, slug: &str, format: OutputFormat) -> Result<String> {
    let catalog = crewpost.load_catalog().catalog;
    let Some(article) = catalog.get(slug) else {
        anyhow::bail!("No article with slug {:?}", slug);
    };

    let options = crewpost.compose_options();
    let composer = Composer::new(article, &options);

    Ok(match format {
        OutputFormat::Html => composer.to_html(),
        OutputFormat::Json => {
            let nodes: Vec<Node> = composer.nodes().collect();
            serde_json::to_string_pretty(&nodes)?
        }
    })
}

pub fn run(crewpost: &Crewpost, slug: &str, format: OutputFormat) -> Result<()> {
    println!("{}", render_article(crewpost, slug, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn site() -> (tempfile::TempDir, Crewpost) {
        let dir = tempfile::tempdir().unwrap();
        let crewpost = Crewpost::new(dir.path()).unwrap();
        fs::create_dir_all(&crewpost.articles_dir).unwrap();
        fs::write(
            crewpost.articles_dir.join("grooming.yml"),
            r#"
title: Grooming Standards
author: {name: A}
date: 2024-06-03
blocks:
  - type: tip
    content: Keep it **neat**.
"#,
        )
        .unwrap();
        (dir, crewpost)
    }

    #[test]
    fn test_render_html() {
        let (_dir, crewpost) = site();
        let html = render_article(&crewpost, "grooming", OutputFormat::Html).unwrap();
        assert!(html.starts_with("<header"));
        assert!(html.contains("<strong>neat</strong>"));
    }

    #[test]
    fn test_render_json() {
        let (_dir, crewpost) = site();
        let json = render_article(&crewpost, "grooming", OutputFormat::Json).unwrap();
        let nodes: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(nodes[0]["tag"], "header");
    }

    #[test]
    fn test_render_unknown_slug() {
        let (_dir, crewpost) = site();
        let err = render_article(&crewpost, "missing", OutputFormat::Html).unwrap_err();
        assert!(err.to_string().contains("No article with slug"));
    }
}
