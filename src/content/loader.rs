//! Content loader - loads articles from the posts directory

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{Article, ArticleId};
use crate::error::ParseError;
use crate::Site;

/// Loads articles from the posts directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    exclude: Vec<glob::Pattern>,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self {
            site,
            exclude: site.config.exclude_patterns(),
        }
    }

    /// Load every article under the posts directory.
    ///
    /// Documents that fail to parse are logged and skipped. The result is in
    /// file-name order; ordering by date is up to the store.
    pub fn load_articles(&self) -> Result<Vec<Article>> {
        let posts_dir = &self.site.posts_dir;
        if !posts_dir.exists() {
            tracing::debug!("Posts directory {:?} does not exist", posts_dir);
            return Ok(Vec::new());
        }

        let mut articles = Vec::new();

        for entry in WalkDir::new(posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) || self.is_excluded(path) {
                continue;
            }

            match self.load_article(path) {
                Ok(article) => {
                    if article.front_matter.published || self.site.config.render_drafts {
                        articles.push(article);
                    } else {
                        tracing::debug!("Skipping unpublished article {}", article.id);
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to load article {:?}: {}", path, e);
                }
            }
        }

        tracing::debug!("Loaded {} articles from {:?}", articles.len(), posts_dir);
        Ok(articles)
    }

    /// Load a single article from a file
    pub fn load_article(&self, path: &Path) -> Result<Article, ParseError> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let id: ArticleId = stem.parse()?;

        let document = fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut article = Article::parse(id, &document, &self.site.config)?;
        article.source = path.to_path_buf();

        let separators = article.separator_count();
        if separators > 1 {
            tracing::warn!(
                "{} has {} excerpt separators, splitting at the first",
                article.id,
                separators
            );
        }

        Ok(article)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.site.posts_dir).unwrap_or(path);
        self.exclude.iter().any(|p| p.matches_path(relative))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}
