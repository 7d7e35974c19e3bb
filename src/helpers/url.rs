//! URL helper functions

use crate::config::SiteConfig;
use crate::content::category_key;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/style.css") // -> "/blog/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Output path of an article, relative to the public directory
pub fn article_path(config: &SiteConfig, slug: &str) -> String {
    format!("{}/{}/", config.article_dir.trim_matches('/'), slug)
}

/// Output path of a category listing, relative to the public directory
pub fn category_path(config: &SiteConfig, category: &str) -> String {
    format!(
        "{}/categories/{}/",
        config.article_dir.trim_matches('/'),
        category_key(category)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.root = "/academy/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/css/style.css"), "/academy/css/style.css");
        assert_eq!(url_for(&config, "about/"), "/academy/about/");
        assert_eq!(url_for(&config, ""), "/academy/");
    }

    #[test]
    fn test_article_and_category_paths() {
        let config = test_config();
        assert_eq!(article_path(&config, "cabin-crew"), "blog/cabin-crew/");
        assert_eq!(
            category_path(&config, "Cabin Crew"),
            "blog/categories/cabin-crew/"
        );
        assert_eq!(
            url_for(&config, &article_path(&config, "cabin-crew")),
            "/academy/blog/cabin-crew/"
        );
    }
}
