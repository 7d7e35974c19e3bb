//! Rendering - content blocks to node trees, articles to full node sequences

mod article;
mod block;
pub mod inline;
pub mod node;
mod warning;

pub use article::{compose_html, nodes_to_html, summary, ComposeOptions, Composer};
pub use block::{
    heading_anchor, normalize_row, render, render_heading, render_with_warnings, Rendered,
    FALLBACK_ANCHOR, UNSUPPORTED_PLACEHOLDER,
};
pub use inline::Inline;
pub use node::{Element, Node};
pub use warning::{BlockWarning, RenderWarning};
