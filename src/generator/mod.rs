//! Generator module - writes the static site using built-in Tera templates

use anyhow::Result;
use chrono::Datelike;
use std::fs;
use std::path::{Path, PathBuf};

use tera::Context;
use walkdir::WalkDir;

use crate::content::{Article, Catalog};
use crate::helpers::{article_path, category_path, url_for};
use crate::render::{summary, ComposeOptions, Composer};
use crate::templates::{
    ArticleData, CategoryData, ConfigData, NavArticle, SiteData, TemplateRenderer,
};
use crate::Crewpost;

/// Static site generator using Tera templates
pub struct Generator {
    crewpost: Crewpost,
    renderer: TemplateRenderer,
    options: ComposeOptions,
}

impl Generator {
    /// Create a new generator
    pub fn new(crewpost: &Crewpost) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let options = ComposeOptions::from(&crewpost.config);

        Ok(Self {
            crewpost: crewpost.clone(),
            renderer,
            options,
        })
    }

    /// Generate the entire site, returning the number of pages written
    pub fn generate(&self, catalog: &Catalog) -> Result<usize> {
        fs::create_dir_all(&self.crewpost.public_dir)?;

        self.copy_source_assets()?;

        let site_data = self.build_site_data(catalog);
        let config_data = self.build_config_data();

        let mut pages = 0;
        pages += self.generate_index_page(&site_data, &config_data)?;
        pages += self.generate_article_pages(catalog, &site_data, &config_data)?;
        pages += self.generate_category_pages(catalog, &site_data, &config_data)?;

        Ok(pages)
    }

    /// Build site data for templates
    fn build_site_data(&self, catalog: &Catalog) -> SiteData {
        let config = &self.crewpost.config;

        let articles = catalog.iter().map(|a| self.article_data(a)).collect();
        let categories = catalog
            .categories()
            .into_iter()
            .map(|(name, count)| CategoryData {
                name: name.to_string(),
                path: url_for(config, &category_path(config, name)),
                count,
            })
            .collect();

        SiteData {
            articles,
            categories,
        }
    }

    fn article_data(&self, article: &Article) -> ArticleData {
        let config = &self.crewpost.config;
        let meta = &article.meta;

        ArticleData {
            slug: article.slug.clone(),
            title: meta.title.clone(),
            date: meta.date.format("%Y-%m-%d").to_string(),
            path: url_for(config, &article_path(config, &article.slug)),
            category: meta.category.clone(),
            category_path: meta
                .category
                .as_ref()
                .map(|c| url_for(config, &category_path(config, c))),
            author: meta.author.name.clone(),
            excerpt: summary(article),
            read_minutes: article.reading_minutes(self.options.words_per_minute),
            block_count: article.blocks.len(),
        }
    }

    /// Build config data for templates
    fn build_config_data(&self) -> ConfigData {
        let config = &self.crewpost.config;
        ConfigData {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            url: config.url.clone(),
            root: url_for(config, ""),
            date_format: config.date_format.clone(),
            excerpt_length: config.excerpt_length,
        }
    }

    /// Create a base context with common variables
    fn create_base_context(&self, site_data: &SiteData, config_data: &ConfigData) -> Context {
        let mut context = Context::new();
        context.insert("site", site_data);
        context.insert("config", config_data);
        context.insert("current_year", &chrono::Local::now().year().to_string());
        context
    }

    /// Generate the article index
    fn generate_index_page(&self, site_data: &SiteData, config_data: &ConfigData) -> Result<usize> {
        let mut context = self.create_base_context(site_data, config_data);
        context.insert("articles", &site_data.articles);

        let html = self.renderer.render("index.html", &context)?;
        self.write_page(self.crewpost.public_dir.join("index.html"), html)?;
        Ok(1)
    }

    /// Generate one page per article
    fn generate_article_pages(
        &self,
        catalog: &Catalog,
        site_data: &SiteData,
        config_data: &ConfigData,
    ) -> Result<usize> {
        let articles: Vec<_> = catalog.iter().collect();

        for (i, article) in articles.iter().enumerate() {
            let _span = tracing::debug_span!("article", slug = %article.slug).entered();

            // Newest first, so "previous" is the next older article
            let prev = articles.get(i + 1).map(|a| self.nav_article(a));
            let next = i
                .checked_sub(1)
                .and_then(|j| articles.get(j))
                .map(|a| self.nav_article(a));

            let content = Composer::new(article, &self.options).to_html();

            let mut context = self.create_base_context(site_data, config_data);
            context.insert("article", &site_data.articles[i]);
            context.insert("content", &content);
            context.insert("prev", &prev);
            context.insert("next", &next);

            let html = self.renderer.render("article.html", &context)?;
            let output_path = self.output_dir(&article_path(&self.crewpost.config, &article.slug));
            self.write_page(output_path.join("index.html"), html)?;
        }

        Ok(articles.len())
    }

    fn nav_article(&self, article: &Article) -> NavArticle {
        NavArticle {
            title: article.meta.title.clone(),
            path: url_for(
                &self.crewpost.config,
                &article_path(&self.crewpost.config, &article.slug),
            ),
        }
    }

    /// Generate one listing per category
    fn generate_category_pages(
        &self,
        catalog: &Catalog,
        site_data: &SiteData,
        config_data: &ConfigData,
    ) -> Result<usize> {
        let config = &self.crewpost.config;

        for category in &site_data.categories {
            let relative = category_path(config, &category.name);
            let articles: Vec<_> = catalog
                .in_category(&category.name)
                .map(|a| self.article_data(a))
                .collect();

            let mut context = self.create_base_context(site_data, config_data);
            context.insert("category", category);
            context.insert("articles", &articles);

            let html = self.renderer.render("category.html", &context)?;
            self.write_page(self.output_dir(&relative).join("index.html"), html)?;
        }

        Ok(site_data.categories.len())
    }

    fn output_dir(&self, relative: &str) -> PathBuf {
        self.crewpost.public_dir.join(relative.trim_matches('/'))
    }

    fn write_page(&self, output_path: PathBuf, html: String) -> Result<()> {
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Copy static files from the source directory
    fn copy_source_assets(&self) -> Result<()> {
        let source_dir = &self.crewpost.source_dir;
        if !source_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if path.is_file() {
                let relative = path.strip_prefix(source_dir)?;
                let dest = self.crewpost.public_dir.join(relative);

                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }

                fs::copy(path, &dest)?;
                tracing::debug!("Copied: {:?}", dest);
            }
        }

        Ok(())
    }
}

/// `_`-prefixed entries (such as `_articles`) and dotfiles are not published
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('_') || n.starts_with('.'))
}
