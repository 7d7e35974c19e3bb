//! Built-in page templates using Tera template engine
//!
//! Templates are embedded directly in the binary, so a site needs nothing
//! besides its config and catalog files.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::{format_naive_date, truncate};

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all theme templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Article bodies arrive as escaped HTML already; templates escape
        // their own text fields with `| escape`
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("index.html", include_str!("theme/index.html")),
            ("article.html", include_str!("theme/article.html")),
            ("category.html", include_str!("theme/category.html")),
            (
                "partials/article_list.html",
                include_str!("theme/partials/article_list.html"),
            ),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 160,
    };

    Ok(tera::Value::String(truncate(&s, length, None)))
}

/// Tera filter: reformat a `YYYY-MM-DD` date with a Moment-style format
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        Ok(date) => Ok(tera::Value::String(format_naive_date(&date, &format))),
        // Not a date we produced; leave it as written
        Err(_) => Ok(tera::Value::String(s)),
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub articles: Vec<ArticleData>,
    pub categories: Vec<CategoryData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleData {
    pub slug: String,
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub path: String,
    pub category: Option<String>,
    pub category_path: Option<String>,
    pub author: String,
    pub excerpt: Option<String>,
    pub read_minutes: u32,
    pub block_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryData {
    pub name: String,
    pub path: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavArticle {
    pub title: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub url: String,
    pub root: String,
    pub date_format: String,
    pub excerpt_length: usize,
}
