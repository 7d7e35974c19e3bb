//! The article catalog: an immutable, ordered set of articles keyed by slug

use indexmap::IndexMap;
use std::path::PathBuf;

use super::{Article, CatalogError};

/// Articles keyed by slug, newest first
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    articles: IndexMap<String, Article>,
}

impl Catalog {
    /// Build a catalog from loaded articles.
    ///
    /// Each article is paired with the file it came from, which is only used
    /// to report duplicate slugs.
    pub fn from_sources(
        articles: impl IntoIterator<Item = (PathBuf, Article)>,
    ) -> Result<Self, CatalogError> {
        let mut sorted: Vec<_> = articles.into_iter().collect();
        sorted.sort_by(|(_, a), (_, b)| {
            b.meta
                .date
                .cmp(&a.meta.date)
                .then_with(|| a.slug.cmp(&b.slug))
        });

        let mut map = IndexMap::with_capacity(sorted.len());
        for (path, article) in sorted {
            if map.contains_key(&article.slug) {
                return Err(CatalogError::DuplicateSlug {
                    slug: article.slug,
                    path,
                });
            }
            map.insert(article.slug.clone(), article);
        }

        Ok(Self { articles: map })
    }

    /// Build a catalog from in-memory articles
    pub fn from_articles(articles: impl IntoIterator<Item = Article>) -> Result<Self, CatalogError> {
        Self::from_sources(
            articles
                .into_iter()
                .map(|a| (PathBuf::from(format!("<memory:{}>", a.slug)), a)),
        )
    }

    pub fn get(&self, slug: &str) -> Option<&Article> {
        self.articles.get(slug)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Article> {
        self.articles.values()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Category names with their article counts, in first-seen order.
    ///
    /// Names with the same [`category_key`] are one category, listed under
    /// the spelling seen first.
    pub fn categories(&self) -> IndexMap<&str, usize> {
        let mut grouped: IndexMap<String, (&str, usize)> = IndexMap::new();
        for category in self.iter().filter_map(|a| a.meta.category.as_deref()) {
            grouped
                .entry(category_key(category))
                .or_insert((category, 0))
                .1 += 1;
        }
        grouped.into_values().collect()
    }

    /// Articles filed under `category`, matched by [`category_key`]
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Article> + 'a {
        let key = category_key(category);
        self.iter().filter(move |a| {
            a.meta
                .category
                .as_deref()
                .is_some_and(|c| category_key(c) == key)
        })
    }
}

/// Identity of a category: its slug, so `Cabin Crew` and `cabin-crew` match
pub fn category_key(name: &str) -> String {
    slug::slugify(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn article(slug: &str, day: u32, category: Option<&str>) -> Article {
        let mut article = Article::new(
            slug,
            slug.to_uppercase(),
            "Crew Desk",
            NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
        );
        article.meta.category = category.map(str::to_string);
        article
    }

    #[test]
    fn test_sorted_newest_first() {
        let catalog = Catalog::from_articles(vec![
            article("old", 1, None),
            article("new", 20, None),
            article("mid-b", 10, None),
            article("mid-a", 10, None),
        ])
        .unwrap();

        let slugs: Vec<_> = catalog.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "mid-a", "mid-b", "old"]);
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let err = Catalog::from_articles(vec![article("same", 1, None), article("same", 2, None)])
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSlug { ref slug, .. } if slug == "same"));
    }

    #[test]
    fn test_lookup_and_categories() {
        let catalog = Catalog::from_articles(vec![
            article("a", 3, Some("Cabin Crew")),
            article("b", 2, Some("Hospitality")),
            article("c", 1, Some("Cabin Crew")),
        ])
        .unwrap();

        assert_eq!(catalog.get("b").unwrap().meta.title, "B");
        assert!(catalog.get("zzz").is_none());

        let categories = catalog.categories();
        assert_eq!(categories.get("Cabin Crew"), Some(&2));
        assert_eq!(categories.get("Hospitality"), Some(&1));

        let crew: Vec<_> = catalog.in_category("cabin crew").map(|a| a.slug.as_str()).collect();
        assert_eq!(crew, vec!["a", "c"]);
    }

    #[test]
    fn test_categories_merge_spellings() {
        let catalog = Catalog::from_articles(vec![
            article("a", 3, Some("Cabin Crew")),
            article("b", 2, Some("cabin crew")),
            article("c", 1, Some("Cabin-Crew")),
        ])
        .unwrap();

        let categories = catalog.categories();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories.get("Cabin Crew"), Some(&3));
        assert_eq!(catalog.in_category("CABIN CREW").count(), 3);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }
}
