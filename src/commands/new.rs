//! Create a new article skeleton

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Crewpost;

/// Write `<articles_dir>/<slug>.yml` for a new article and return its path
pub fn create_article(crewpost: &Crewpost, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = slug::slugify(slug.unwrap_or(title));
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from {:?}", title);
    }

    fs::create_dir_all(&crewpost.articles_dir)?;
    let file_path = crewpost.articles_dir.join(format!("{}.yml", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().date_naive();
    let content = format!(
        r#"slug: {slug}
title: {title}
author:
  name: {author}
date: {date}
category:
takeaways: []
blocks:
  - type: paragraph
    content: Start writing here.
faqs: []
"#,
        slug = slug,
        title = yaml_string(title),
        author = yaml_string(&crewpost.config.author),
        date = today.format("%Y-%m-%d"),
    );

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Quote a value for a YAML scalar
fn yaml_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_article() {
        let dir = tempfile::tempdir().unwrap();
        let crewpost = Crewpost::new(dir.path()).unwrap();

        let path = create_article(&crewpost, "Pilot's Guide: Day One", None).unwrap();
        assert_eq!(path.file_name().unwrap(), "pilot-s-guide-day-one.yml");

        let loaded = crewpost.load_catalog();
        assert!(loaded.rejected.is_empty(), "{:?}", loaded.rejected);
        let article = loaded.catalog.get("pilot-s-guide-day-one").unwrap();
        assert_eq!(article.meta.title, "Pilot's Guide: Day One");
        assert_eq!(article.blocks.len(), 1);
    }

    #[test]
    fn test_create_article_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let crewpost = Crewpost::new(dir.path()).unwrap();

        create_article(&crewpost, "Layovers", Some("layovers")).unwrap();
        let err = create_article(&crewpost, "Layovers again", Some("layovers")).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_yaml_string() {
        assert_eq!(yaml_string("it's"), "'it''s'");
    }
}
