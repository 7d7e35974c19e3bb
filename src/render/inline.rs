//! Inline markup: `**bold**` and `[label](target)` inside prose.
//!
//! Resolution never fails. Anything that isn't a complete bold or link span,
//! such as a lone `**` or a `[` without `](target)`, stays in the text as written.
//! Links may sit inside bold spans; bold inside a link label stays literal.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::node::Node;
use crate::helpers::is_external;

lazy_static! {
    static ref INLINE_RE: Regex =
        Regex::new(r"\*\*(?P<bold>[^*]+?)\*\*|\[(?P<label>[^\[\]]+)\]\((?P<target>[^()\s]+)\)")
            .expect("inline markup pattern is valid");
}

/// A span of resolved inline markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "span", rename_all = "snake_case")]
pub enum Inline {
    Text { text: String },
    Bold { spans: Vec<Inline> },
    Link { label: String, target: String },
}

impl Inline {
    fn text(text: &str) -> Self {
        Inline::Text {
            text: text.to_string(),
        }
    }

    /// The visible text of the span
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text { text } => text.clone(),
            Inline::Bold { spans } => spans.iter().map(Inline::plain_text).collect(),
            Inline::Link { label, .. } => label.clone(),
        }
    }

    pub fn into_node(self) -> Node {
        match self {
            Inline::Text { text } => Node::text(text),
            Inline::Bold { spans } => Node::element("strong")
                .children(spans.into_iter().map(Inline::into_node))
                .into(),
            Inline::Link { label, target } => {
                let mut link = Node::element("a").attr("href", &target);
                if is_external(&target) {
                    link = link.attr("target", "_blank").attr("rel", "noopener");
                }
                link.child(Node::text(label)).into()
            }
        }
    }
}

/// Split `source` into text, bold and link spans
pub fn resolve(source: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in INLINE_RE.captures_iter(source) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            spans.push(Inline::text(&source[last..whole.start()]));
        }

        if let Some(bold) = caps.name("bold") {
            spans.push(Inline::Bold {
                spans: resolve(bold.as_str()),
            });
        } else if let (Some(label), Some(target)) = (caps.name("label"), caps.name("target")) {
            spans.push(Inline::Link {
                label: label.as_str().to_string(),
                target: target.as_str().to_string(),
            });
        }

        last = whole.end();
    }

    if last < source.len() {
        spans.push(Inline::text(&source[last..]));
    }

    spans
}

/// Resolve `source` straight to nodes
pub fn resolve_nodes(source: &str) -> Vec<Node> {
    resolve(source).into_iter().map(Inline::into_node).collect()
}

/// The visible text of `source` with markup delimiters removed
pub fn plain_text(source: &str) -> String {
    resolve(source).iter().map(Inline::plain_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Inline {
        Inline::Text {
            text: s.to_string(),
        }
    }

    fn bold(s: &str) -> Inline {
        Inline::Bold {
            spans: vec![text(s)],
        }
    }

    #[test]
    fn test_plain_text_is_one_span() {
        assert_eq!(resolve("Just words."), vec![text("Just words.")]);
    }

    #[test]
    fn test_empty_string_has_no_spans() {
        assert!(resolve("").is_empty());
    }

    #[test]
    fn test_bold_and_link() {
        let spans = resolve("Join **today** via [our course](/air-hostess) now");
        assert_eq!(
            spans,
            vec![
                text("Join "),
                bold("today"),
                text(" via "),
                Inline::Link {
                    label: "our course".to_string(),
                    target: "/air-hostess".to_string()
                },
                text(" now"),
            ]
        );
    }

    #[test]
    fn test_unmatched_delimiters_are_literal() {
        for source in [
            "Salary **starts high",
            "See [the brochure for details",
            "See [the brochure](missing-close",
            "Odd ** spacing ** is fine but ***",
            "[]() empty link",
            "**** four stars",
        ] {
            let spans = resolve(source);
            let rebuilt: String = spans.iter().map(Inline::plain_text).collect();
            assert_eq!(rebuilt.replace("**", ""), source.replace("**", ""));
            assert!(
                spans.iter().all(|s| !matches!(s, Inline::Link { .. })),
                "unexpected link in {:?}",
                source
            );
        }
    }

    #[test]
    fn test_only_unmatched_delimiters_returns_original() {
        for source in ["a ** b", "[label] (no link)", "[x](", "**"] {
            assert_eq!(resolve(source), vec![text(source)]);
        }
    }

    #[test]
    fn test_adjacent_spans() {
        let spans = resolve("**A****B**");
        assert_eq!(spans, vec![bold("A"), bold("B")]);
    }

    #[test]
    fn test_link_inside_bold() {
        let spans = resolve("**[Apply now](/apply)** today");
        assert_eq!(
            spans,
            vec![
                Inline::Bold {
                    spans: vec![Inline::Link {
                        label: "Apply now".into(),
                        target: "/apply".into(),
                    }],
                },
                text(" today"),
            ]
        );
        assert_eq!(plain_text("**[Apply now](/apply)** today"), "Apply now today");

        let html: String = resolve_nodes("**Call [us](/contact) first**")
            .iter()
            .map(Node::to_html)
            .collect();
        assert_eq!(html, r#"<strong>Call <a href="/contact">us</a> first</strong>"#);
    }

    #[test]
    fn test_plain_text_strips_markup() {
        assert_eq!(
            plain_text("Fly **high** with [us](https://example.com)"),
            "Fly high with us"
        );
    }

    #[test]
    fn test_external_link_opens_new_tab() {
        let node = Inline::Link {
            label: "site".into(),
            target: "https://example.com".into(),
        }
        .into_node();
        assert_eq!(
            node.to_html(),
            r#"<a href="https://example.com" target="_blank" rel="noopener">site</a>"#
        );

        let node = Inline::Link {
            label: "course".into(),
            target: "/air-hostess".into(),
        }
        .into_node();
        assert_eq!(node.to_html(), r#"<a href="/air-hostess">course</a>"#);
    }
}
