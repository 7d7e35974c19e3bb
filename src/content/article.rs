//! Article model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::MalformedBlockError;
use super::Block;

/// Article author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    /// Avatar image path
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroImage {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// A question/answer pair shown in the FAQ accordion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// Call-to-action button closing the article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    pub text: String,
    pub link: String,
    /// Icon key, resolved by the stylesheet
    #[serde(default)]
    pub icon: Option<String>,
}

/// Everything around the article body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleMeta {
    pub title: String,
    /// Intro line shown under the title
    pub hook: Option<String>,
    pub author: Author,
    pub date: NaiveDate,
    pub category: Option<String>,
    pub hero_image: Option<HeroImage>,
    /// Explicit reading time in minutes
    pub read_time: Option<u32>,
    pub takeaways: Vec<String>,
    pub faqs: Vec<Faq>,
    pub cta: Option<CallToAction>,
}

/// A blog article: metadata plus an ordered body of blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: Option<u64>,
    /// URL-safe identifier
    pub slug: String,
    pub meta: ArticleMeta,
    pub blocks: Vec<Block>,
}

impl Article {
    /// Create an article with an empty body and no optional metadata
    pub fn new(slug: impl Into<String>, title: impl Into<String>, author: &str, date: NaiveDate) -> Self {
        Self {
            id: None,
            slug: slug.into(),
            meta: ArticleMeta {
                title: title.into(),
                hook: None,
                author: Author {
                    name: author.to_string(),
                    role: None,
                    avatar: None,
                },
                date,
                category: None,
                hero_image: None,
                read_time: None,
                takeaways: Vec::new(),
                faqs: Vec::new(),
                cta: None,
            },
            blocks: Vec::new(),
        }
    }

    /// Append a block to the body
    pub fn with_block(mut self, block: impl Into<Block>) -> Self {
        self.blocks.push(block.into());
        self
    }

    /// Number of words across all body blocks
    pub fn word_count(&self) -> usize {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Content(content) => Some(content.texts()),
                Block::Unsupported(_) => None,
            })
            .flatten()
            .map(|text| text.split_whitespace().count())
            .sum()
    }

    /// Reading time in minutes: the explicit value, else an estimate (at least 1)
    pub fn reading_minutes(&self, words_per_minute: usize) -> u32 {
        if let Some(minutes) = self.meta.read_time {
            return minutes;
        }
        let wpm = words_per_minute.max(1);
        let minutes = self.word_count().div_ceil(wpm);
        minutes.max(1) as u32
    }
}

/// An article as written in a catalog file
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub slug: Option<String>,
    pub title: String,
    #[serde(default)]
    pub hook: Option<String>,
    pub author: Author,
    pub date: NaiveDate,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub hero_image: Option<HeroImage>,
    #[serde(default)]
    pub read_time: Option<u32>,
    #[serde(default)]
    pub takeaways: Vec<String>,
    /// Blocks stay loosely typed until [`ArticleSource::into_article`]
    #[serde(default)]
    pub blocks: Vec<Value>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    #[serde(default)]
    pub cta: Option<CallToAction>,
}

impl ArticleSource {
    /// Validate every block and build the article.
    ///
    /// `fallback_slug` is used when the source has no `slug` of its own.
    pub fn into_article(self, fallback_slug: &str) -> Result<Article, MalformedBlockError> {
        let blocks = self
            .blocks
            .into_iter()
            .enumerate()
            .map(|(index, value)| Block::from_value(index, value))
            .collect::<Result<Vec<_>, _>>()?;

        let slug = self
            .slug
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| slug::slugify(fallback_slug));

        Ok(Article {
            id: self.id,
            slug,
            meta: ArticleMeta {
                title: self.title,
                hook: self.hook,
                author: self.author,
                date: self.date,
                category: self.category,
                hero_image: self.hero_image,
                read_time: self.read_time,
                takeaways: self.takeaways,
                faqs: self.faqs,
                cta: self.cta,
            },
            blocks,
        })
    }
}
