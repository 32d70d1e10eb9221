//! Content module - articles, front-matter and body structure

mod article;
mod excerpt;
mod frontmatter;
pub mod loader;
pub mod markdown;

pub use article::{Article, ArticleDetail, ArticleId, ArticleSummary};
pub use excerpt::{separator_count, split_excerpt};
pub use frontmatter::{FrontMatter, DELIMITER};
pub use markdown::Block;
