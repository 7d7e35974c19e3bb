//! Block renderer: one template per block kind

use super::inline::{plain_text, resolve_nodes};
use super::node::{Element, Node};
use super::warning::RenderWarning;
use crate::content::{
    Block, Checklist, ContentBlock, ItemList, MythBuster, Prose, ScriptCompare, Table, Timeline,
    Tip,
};

/// Text shown in place of a block the renderer doesn't know
pub const UNSUPPORTED_PLACEHOLDER: &str = "[unsupported block]";

/// A rendered block together with the anomalies recovered from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub node: Node,
    pub warnings: Vec<RenderWarning>,
}

/// Render a block, logging any recovered anomaly
pub fn render(block: &Block) -> Node {
    let rendered = render_with_warnings(block);
    for warning in &rendered.warnings {
        tracing::warn!("{}", warning);
    }
    rendered.node
}

/// Render a block and return its warnings instead of logging them
pub fn render_with_warnings(block: &Block) -> Rendered {
    let mut warnings = Vec::new();
    let node = match block {
        Block::Content(content) => render_content(content, &mut warnings),
        Block::Unsupported(unsupported) => {
            warnings.push(RenderWarning::UnsupportedKind {
                kind: unsupported.kind.clone(),
            });
            placeholder(&unsupported.kind)
        }
    };
    Rendered { node, warnings }
}

fn render_content(block: &ContentBlock, warnings: &mut Vec<RenderWarning>) -> Node {
    let el = match block {
        ContentBlock::Heading(prose) => heading(prose, &heading_anchor(&prose.content)),
        ContentBlock::Paragraph(prose) => paragraph(prose),
        ContentBlock::List(list) => item_list(list),
        ContentBlock::Checklist(list) => checklist(list),
        ContentBlock::Tip(tip) => tip_box(tip),
        ContentBlock::MythBuster(myth) => myth_buster(myth),
        ContentBlock::ScriptCompare(script) => script_compare(script),
        ContentBlock::Timeline(timeline) => timeline_cards(timeline),
        ContentBlock::Table(table) => grid(table, warnings),
    };
    el.into()
}

/// Anchor id used when a heading's text has nothing to slugify
pub const FALLBACK_ANCHOR: &str = "section";

/// Anchor id for a heading, derived from its visible text.
///
/// Headings that slugify to nothing (punctuation, emoji) get
/// [`FALLBACK_ANCHOR`]. Uniqueness within an article is the composer's job.
pub fn heading_anchor(content: &str) -> String {
    let anchor = slug::slugify(plain_text(content));
    if anchor.is_empty() {
        FALLBACK_ANCHOR.to_string()
    } else {
        anchor
    }
}

/// Render a heading under an anchor id chosen by the caller
pub fn render_heading(prose: &Prose, anchor: &str) -> Node {
    heading(prose, anchor).into()
}

fn block(tag: &str, kind: &str) -> Element {
    Node::element(tag).class(&format!("block block-{}", kind))
}

/// `<p>` with inline markup resolved
fn prose_line(text: &str) -> Element {
    Node::element("p").children(resolve_nodes(text))
}

/// One `<p>` per blank-line separated paragraph of `text`
pub(super) fn prose_paragraphs(text: &str) -> impl Iterator<Item = Element> + '_ {
    text.split("\n\n")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(prose_line)
}

/// A labelled slot of a fixed-slot template
fn slot(class: &str, label: &str, text: &str) -> Element {
    Node::element("section")
        .class(class)
        .child(Node::element("p").class("block-label").text(label))
        .child(prose_line(text))
}

fn heading(prose: &Prose, anchor: &str) -> Element {
    let text = resolve_nodes(&prose.content);

    match &prose.title {
        Some(title) => block("hgroup", "heading")
            .child(Node::element("p").class("eyebrow").children(resolve_nodes(title)))
            .child(Node::element("h2").attr("id", anchor).children(text)),
        None => block("h2", "heading").attr("id", anchor).children(text),
    }
}

fn paragraph(prose: &Prose) -> Element {
    let mut el = block("div", "paragraph");
    if let Some(title) = &prose.title {
        el = el.child(Node::element("h3").children(resolve_nodes(title)));
    }
    el.children(prose_paragraphs(&prose.content))
}

fn item_list(list: &ItemList) -> Element {
    let tag = if list.ordered { "ol" } else { "ul" };
    block(tag, "list").children(
        list.items
            .iter()
            .map(|item| Node::element("li").children(resolve_nodes(item))),
    )
}

fn checklist(list: &Checklist) -> Element {
    block("ul", "checklist").children(list.items.iter().map(|item| {
        Node::element("li")
            .class("checklist-item")
            .child(
                Node::element("span")
                    .class("check")
                    .attr("aria-hidden", "true")
                    .text("\u{2713}"),
            )
            .child(Node::element("span").children(resolve_nodes(item)))
    }))
}

fn tip_box(tip: &Tip) -> Element {
    block("aside", "tip")
        .child(Node::element("p").class("block-label").text("Pro Tip"))
        .child(prose_line(&tip.content))
}

fn myth_buster(myth: &MythBuster) -> Element {
    block("div", "myth-buster")
        .child(slot("myth", "Myth", &myth.myth))
        .child(slot("reality", "Reality", &myth.reality))
}

fn script_compare(script: &ScriptCompare) -> Element {
    block("div", "script-compare")
        .child(slot("script-wrong", "Don't say", &script.wrong))
        .child(slot("script-right", "Say this instead", &script.right))
        .child(slot("script-reason", "Why it works", &script.reason))
}

fn timeline_cards(timeline: &Timeline) -> Element {
    block("ol", "timeline").children(timeline.items.iter().map(|phase| {
        Node::element("li")
            .class("phase-card")
            .child(Node::element("span").class("phase").text(&phase.phase))
            .child(Node::element("h4").children(resolve_nodes(&phase.title)))
            .child(prose_line(&phase.description))
    }))
}

/// Fit a row to `width` cells: pad with empty cells, drop extras
pub fn normalize_row(row: &[String], width: usize) -> Vec<&str> {
    row.iter()
        .map(String::as_str)
        .chain(std::iter::repeat(""))
        .take(width)
        .collect()
}

fn grid(table: &Table, warnings: &mut Vec<RenderWarning>) -> Element {
    let width = table.headers.len();

    let head = Node::element("thead").child(
        Node::element("tr").children(
            table
                .headers
                .iter()
                .map(|h| Node::element("th").children(resolve_nodes(h))),
        ),
    );

    let mut body = Node::element("tbody");
    for (i, row) in table.rows.iter().enumerate() {
        if row.len() != width {
            warnings.push(RenderWarning::RowShapeMismatch {
                row: i,
                expected: width,
                found: row.len(),
            });
        }
        body = body.child(
            Node::element("tr").children(
                normalize_row(row, width)
                    .into_iter()
                    .map(|cell| Node::element("td").children(resolve_nodes(cell))),
            ),
        );
    }

    block("div", "table").child(Node::element("table").child(head).child(body))
}

fn placeholder(kind: &str) -> Node {
    block("div", "unsupported")
        .attr("role", "note")
        .attr("data-kind", kind)
        .text(UNSUPPORTED_PLACEHOLDER)
        .into()
}
