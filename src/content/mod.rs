//! Content module - content blocks, articles and the article catalog

pub mod article;
pub mod block;
mod catalog;
mod error;
pub mod loader;

pub use article::{Article, ArticleMeta, ArticleSource, Author, CallToAction, Faq, HeroImage};
pub use block::{
    Block, BlockKind, Checklist, ContentBlock, ItemList, MythBuster, Prose, ScriptCompare,
    Table, Timeline, TimelinePhase, Tip, UnsupportedBlock,
};
pub use catalog::{category_key, Catalog};
pub use error::{CatalogError, MalformedBlockError};
pub use loader::{CatalogLoader, LoadedCatalog};
