//! List catalog content

use anyhow::Result;

use crate::Crewpost;

/// List articles, optionally restricted to one category
pub fn run(crewpost: &Crewpost, category: Option<&str>) -> Result<()> {
    let catalog = crewpost.load_catalog().catalog;

    let articles: Vec<_> = match category {
        Some(name) => catalog.in_category(name).collect(),
        None => catalog.iter().collect(),
    };

    if let Some(name) = category {
        if articles.is_empty() && !catalog.categories().contains_key(name) {
            anyhow::bail!("Unknown category: {}", name);
        }
    }

    println!("Articles ({}):", articles.len());
    for article in articles {
        println!(
            "  {}  {} - {} [{} blocks]",
            article.meta.date.format("%Y-%m-%d"),
            article.slug,
            article.meta.title,
            article.blocks.len()
        );
    }

    Ok(())
}

/// List categories with their article counts
pub fn categories(crewpost: &Crewpost) -> Result<()> {
    let catalog = crewpost.load_catalog().catalog;
    let mut categories: Vec<_> = catalog.categories().into_iter().collect();
    categories.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    println!("Categories ({}):", categories.len());
    for (name, count) in categories {
        println!("  {} ({})", name, count);
    }

    Ok(())
}
