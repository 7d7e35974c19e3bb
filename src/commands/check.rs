//! Validate the catalog without writing anything

use anyhow::Result;

use crate::content::CatalogError;
use crate::render::{BlockWarning, Composer};
use crate::Crewpost;

/// Outcome of validating every catalog file
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Number of articles that loaded
    pub articles: usize,
    pub rejected: Vec<CatalogError>,
    /// Render warnings, keyed by article slug
    pub warnings: Vec<(String, BlockWarning)>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Load the catalog and compose every article, collecting problems
pub fn check(crewpost: &Crewpost) -> CheckReport {
    let loaded = crewpost.load_catalog();
    let options = crewpost.compose_options();

    let warnings = loaded
        .catalog
        .iter()
        .flat_map(|article| {
            Composer::new(article, &options)
                .warnings()
                .into_iter()
                .map(|w| (article.slug.clone(), w))
        })
        .collect();

    CheckReport {
        articles: loaded.catalog.len(),
        rejected: loaded.rejected,
        warnings,
    }
}

/// Print a report; fails when any file was rejected
pub fn run(crewpost: &Crewpost) -> Result<()> {
    let report = check(crewpost);

    for err in &report.rejected {
        println!("error: {}", err);
    }
    for (slug, warning) in &report.warnings {
        println!("warning: {}: {}", slug, warning);
    }

    println!(
        "Checked {} articles: {} rejected file(s), {} warning(s)",
        report.articles,
        report.rejected.len(),
        report.warnings.len()
    );

    if !report.is_ok() {
        anyhow::bail!("{} article file(s) rejected", report.rejected.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderWarning;
    use std::fs;

    fn write_articles(files: &[(&str, &str)]) -> (tempfile::TempDir, Crewpost) {
        let dir = tempfile::tempdir().unwrap();
        let crewpost = Crewpost::new(dir.path()).unwrap();
        fs::create_dir_all(&crewpost.articles_dir).unwrap();
        for (name, body) in files {
            fs::write(crewpost.articles_dir.join(name), body).unwrap();
        }
        (dir, crewpost)
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let (_dir, crewpost) = write_articles(&[(
            "salaries.yml",
            r#"
title: Salaries
author: {name: A}
date: 2024-06-03
blocks:
  - type: table
    headers: [Airline, Pay]
    rows:
      - [Skyways]
  - type: quiz
    question: Which exit is closest?
"#,
        )]);

        let report = check(&crewpost);
        assert!(report.is_ok());
        assert_eq!(report.articles, 1);
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.warnings[0].0, "salaries");
        assert_eq!(
            report.warnings[0].1.warning,
            RenderWarning::RowShapeMismatch {
                row: 0,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(report.warnings[1].1.index, 1);
        run(&crewpost).unwrap();
    }

    #[test]
    fn test_rejected_file_fails() {
        let (_dir, crewpost) = write_articles(&[(
            "bad.json",
            r#"{"title": "Bad", "author": {"name": "A"}, "date": "2024-06-03",
                "blocks": [{"type": "tip", "content": "x", "extra": 1}]}"#,
        )]);

        let report = check(&crewpost);
        assert!(!report.is_ok());
        assert!(matches!(report.rejected[0], CatalogError::MalformedBlock { .. }));
        assert!(run(&crewpost).is_err());
    }
}
