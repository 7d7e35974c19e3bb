//! Article composer: header, takeaways, table of contents, body, FAQ and CTA

use std::collections::HashSet;
use std::iter;

use super::block::{
    heading_anchor, prose_paragraphs, render, render_heading, render_with_warnings,
};
use super::inline::{plain_text, resolve_nodes};
use super::node::{self, Node};
use super::warning::BlockWarning;
use crate::config::SiteConfig;
use crate::content::{Article, Block, ContentBlock};
use crate::helpers::format_naive_date;

/// Presentation settings for composed articles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Emit a table of contents built from Heading blocks
    pub toc: bool,
    pub words_per_minute: usize,
    /// Moment-style date format for the byline
    pub date_format: String,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            toc: true,
            words_per_minute: 200,
            date_format: "MMMM DD, YYYY".to_string(),
        }
    }
}

impl From<&SiteConfig> for ComposeOptions {
    fn from(config: &SiteConfig) -> Self {
        Self {
            toc: config.toc,
            words_per_minute: config.words_per_minute,
            date_format: config.date_format.clone(),
        }
    }
}

/// Composes one article into rendered nodes.
///
/// Holds no state besides its inputs: every call to [`Composer::nodes`]
/// starts a fresh pass and yields the same nodes.
#[derive(Debug, Clone, Copy)]
pub struct Composer<'a> {
    article: &'a Article,
    options: &'a ComposeOptions,
}

impl<'a> Composer<'a> {
    pub fn new(article: &'a Article, options: &'a ComposeOptions) -> Self {
        Self { article, options }
    }

    /// All nodes of the article, in reading order.
    ///
    /// Body blocks are rendered as the iterator reaches them.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + 'a {
        let this = *self;
        iter::once_with(move || this.header())
            .chain(iter::once_with(move || this.takeaways()).flatten())
            .chain(iter::once_with(move || this.toc()).flatten())
            .chain(this.body())
            .chain(iter::once_with(move || this.faqs()).flatten())
            .chain(iter::once_with(move || this.cta()).flatten())
    }

    /// Body block nodes only
    pub fn body(&self) -> impl Iterator<Item = Node> + Clone + 'a {
        let anchors = self.anchors();
        self.article
            .blocks
            .iter()
            .zip(anchors)
            .map(|(block, anchor)| match (block, anchor) {
                (Block::Content(ContentBlock::Heading(prose)), Some(anchor)) => {
                    render_heading(prose, &anchor)
                }
                _ => render(block),
            })
    }

    /// Anchor id of every Heading block, `None` for other blocks.
    ///
    /// A heading whose anchor is already taken gets `-2`, `-3`, ... appended.
    pub fn anchors(&self) -> Vec<Option<String>> {
        let mut taken = HashSet::new();
        self.article
            .blocks
            .iter()
            .map(|block| match block {
                Block::Content(ContentBlock::Heading(prose)) => {
                    let base = heading_anchor(&prose.content);
                    let mut anchor = base.clone();
                    let mut n = 1;
                    while !taken.insert(anchor.clone()) {
                        n += 1;
                        anchor = format!("{}-{}", base, n);
                    }
                    Some(anchor)
                }
                _ => None,
            })
            .collect()
    }

    /// Every warning the body would produce, without logging them
    pub fn warnings(&self) -> Vec<BlockWarning> {
        self.article
            .blocks
            .iter()
            .enumerate()
            .flat_map(|(index, block)| {
                render_with_warnings(block)
                    .warnings
                    .into_iter()
                    .map(move |warning| BlockWarning { index, warning })
            })
            .collect()
    }

    pub fn to_html(&self) -> String {
        self.nodes().map(|n| n.to_html()).collect()
    }

    fn header(&self) -> Node {
        let meta = &self.article.meta;
        let mut header = Node::element("header").class("article-header");

        if let Some(category) = &meta.category {
            header = header.child(Node::element("p").class("article-category").text(category));
        }

        header = header.child(Node::element("h1").class("article-title").text(&meta.title));

        if let Some(hook) = &meta.hook {
            header = header.child(
                Node::element("p")
                    .class("article-hook")
                    .children(resolve_nodes(hook)),
            );
        }

        header = header.child(self.byline());

        if let Some(hero) = &meta.hero_image {
            let alt = hero.alt.clone().unwrap_or_else(|| meta.title.clone());
            header = header.child(
                Node::element("figure")
                    .class("article-hero")
                    .child(Node::element("img").attr("src", &hero.src).attr("alt", alt)),
            );
        }

        header.into()
    }

    fn byline(&self) -> node::Element {
        let meta = &self.article.meta;
        let mut byline = Node::element("div").class("byline");

        if let Some(avatar) = &meta.author.avatar {
            byline = byline.child(
                Node::element("img")
                    .class("author-avatar")
                    .attr("src", avatar)
                    .attr("alt", &meta.author.name),
            );
        }

        byline = byline.child(
            Node::element("span")
                .class("author-name")
                .text(&meta.author.name),
        );

        if let Some(role) = &meta.author.role {
            byline = byline.child(Node::element("span").class("author-role").text(role));
        }

        let minutes = self.article.reading_minutes(self.options.words_per_minute);
        byline
            .child(
                Node::element("time")
                    .attr("datetime", meta.date.format("%Y-%m-%d").to_string())
                    .text(format_naive_date(&meta.date, &self.options.date_format)),
            )
            .child(
                Node::element("span")
                    .class("read-time")
                    .text(format!("{} min read", minutes)),
            )
    }

    fn takeaways(&self) -> Option<Node> {
        let takeaways = &self.article.meta.takeaways;
        if takeaways.is_empty() {
            return None;
        }

        Some(
            Node::element("section")
                .class("takeaways")
                .child(Node::element("h2").text("Key Takeaways"))
                .child(Node::element("ul").children(
                    takeaways
                        .iter()
                        .map(|t| Node::element("li").children(resolve_nodes(t))),
                ))
                .into(),
        )
    }

    /// Table of contents linking every Heading block
    fn toc(&self) -> Option<Node> {
        if !self.options.toc {
            return None;
        }

        let entries: Vec<_> = self
            .article
            .blocks
            .iter()
            .zip(self.anchors())
            .filter_map(|(block, anchor)| match (block, anchor) {
                (Block::Content(ContentBlock::Heading(prose)), Some(anchor)) => {
                    Some((&prose.content, anchor))
                }
                _ => None,
            })
            .map(|(content, anchor)| {
                Node::element("li").class("toc-item").child(
                    Node::element("a")
                        .class("toc-link")
                        .attr("href", format!("#{}", anchor))
                        .child(
                            Node::element("span")
                                .class("toc-text")
                                .text(plain_text(content)),
                        ),
                )
            })
            .collect();

        if entries.is_empty() {
            return None;
        }

        Some(
            Node::element("nav")
                .class("toc")
                .child(Node::element("p").class("toc-title").text("In this article"))
                .child(Node::element("ol").children(entries))
                .into(),
        )
    }

    /// FAQ accordion
    fn faqs(&self) -> Option<Node> {
        let faqs = &self.article.meta.faqs;
        if faqs.is_empty() {
            return None;
        }

        Some(
            Node::element("section")
                .class("faq")
                .child(Node::element("h2").text("Frequently Asked Questions"))
                .children(faqs.iter().map(|faq| {
                    Node::element("details")
                        .class("faq-item")
                        .child(
                            Node::element("summary").children(resolve_nodes(&faq.question)),
                        )
                        .child(
                            Node::element("div")
                                .class("faq-answer")
                                .children(prose_paragraphs(&faq.answer)),
                        )
                }))
                .into(),
        )
    }

    fn cta(&self) -> Option<Node> {
        let cta = self.article.meta.cta.as_ref()?;

        let mut button = Node::element("a").class("cta-button").attr("href", &cta.link);
        if let Some(icon) = &cta.icon {
            button = button.child(
                Node::element("span")
                    .class(&format!("icon icon-{}", slug::slugify(icon)))
                    .attr("aria-hidden", "true"),
            );
        }
        // the button is already a link, so nested links flatten to text
        button = button.text(plain_text(&cta.text));

        Some(Node::element("div").class("cta").child(button).into())
    }
}

/// Compose an article with the given options and serialize it
pub fn compose_html(article: &Article, options: &ComposeOptions) -> String {
    Composer::new(article, options).to_html()
}

/// Short plain-text summary of an article: its hook, else its first paragraph
pub fn summary(article: &Article) -> Option<String> {
    if let Some(hook) = &article.meta.hook {
        return Some(plain_text(hook));
    }
    article.blocks.iter().find_map(|block| match block {
        Block::Content(ContentBlock::Paragraph(prose)) => prose_paragraphs(&prose.content)
            .next()
            .map(|p| Node::from(p).text_content()),
        _ => None,
    })
}

/// Serialize composed nodes
pub fn nodes_to_html(nodes: &[Node]) -> String {
    node::to_html(nodes)
}
