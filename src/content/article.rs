//! Article model

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::excerpt::{separator_count, split_excerpt};
use super::markdown::{self, Block};
use super::FrontMatter;
use crate::config::SiteConfig;
use crate::error::ParseError;
use crate::helpers;

lazy_static! {
    static ref ID_PATTERN: Regex =
        Regex::new(r"^(\d{4}-\d{2}-\d{2})-(.+)$").expect("identifier pattern is valid");
}

/// Article identifier: `YYYY-MM-DD-slug`, the file stem of the document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleId {
    pub date: NaiveDate,
    pub slug: String,
}

impl ArticleId {
    pub fn new(date: NaiveDate, slug: impl Into<String>) -> Self {
        Self {
            date,
            slug: slug.into(),
        }
    }
}

impl FromStr for ArticleId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidIdentifier(s.to_string());
        let caps = ID_PATTERN.captures(s).ok_or_else(invalid)?;
        let date = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").map_err(|_| invalid())?;
        Ok(Self::new(date, &caps[2]))
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.date.format("%Y-%m-%d"), self.slug)
    }
}

impl Serialize for ArticleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A blog article
#[derive(Debug, Clone)]
pub struct Article {
    /// Identifier, unique within a store
    pub id: ArticleId,

    /// Article title (falls back to the slug)
    pub title: String,

    /// Layout template name
    pub layout: String,

    /// Parsed header
    pub front_matter: FrontMatter,

    /// Raw Markdown after the header
    pub body: String,

    /// Separator in effect for this article
    pub excerpt_separator: String,

    /// Source file path
    pub source: PathBuf,

    /// Full permalink URL
    pub permalink: String,
}

impl Article {
    /// Build an article from a whole document (header plus body)
    pub fn parse(id: ArticleId, document: &str, config: &SiteConfig) -> Result<Self, ParseError> {
        let (front_matter, body) = FrontMatter::parse(document)?;

        let title = front_matter
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| id.slug.clone());
        let layout = front_matter
            .layout
            .clone()
            .unwrap_or_else(|| config.default_layout.clone());
        let excerpt_separator = front_matter
            .excerpt_separator
            .clone()
            .unwrap_or_else(|| config.excerpt_separator.clone());
        let permalink = helpers::permalink_for(config, &id, front_matter.permalink.as_deref());

        Ok(Self {
            source: PathBuf::from(format!("{}.md", id)),
            id,
            title,
            layout,
            front_matter,
            body: body.to_string(),
            excerpt_separator,
            permalink,
        })
    }

    /// Publication date, taken from the identifier
    pub fn date(&self) -> NaiveDate {
        self.id.date
    }

    /// Teaser text before the separator, or the whole body
    pub fn excerpt(&self) -> &str {
        split_excerpt(&self.body, &self.excerpt_separator).0
    }

    /// Body text after the separator
    pub fn remainder(&self) -> Option<&str> {
        split_excerpt(&self.body, &self.excerpt_separator).1
    }

    /// Whether the body carries a separator at all
    pub fn has_separator(&self) -> bool {
        self.separator_count() > 0
    }

    pub fn separator_count(&self) -> usize {
        separator_count(&self.body, &self.excerpt_separator)
    }

    /// Top-level prose and code blocks, without the separator itself
    pub fn blocks(&self) -> Vec<Block> {
        let separator = self.excerpt_separator.trim();
        markdown::blocks(&self.body)
            .into_iter()
            .filter(|b| !matches!(b, Block::Prose { text } if text == separator))
            .collect()
    }

    pub fn tags(&self) -> &[String] {
        &self.front_matter.tags
    }

    pub fn categories(&self) -> &[String] {
        &self.front_matter.categories
    }

    /// Short listing view
    pub fn summary(&self) -> ArticleSummary<'_> {
        ArticleSummary {
            id: &self.id,
            title: &self.title,
            date: self.date(),
            layout: &self.layout,
            permalink: &self.permalink,
            excerpt: self.excerpt(),
        }
    }

    /// Full view including body and block structure
    pub fn detail(&self) -> ArticleDetail<'_> {
        let blocks = self.blocks();
        ArticleDetail {
            summary: self.summary(),
            tags: self.tags(),
            categories: self.categories(),
            languages: markdown::code_languages(&blocks),
            body: &self.body,
            remainder: self.remainder(),
            blocks,
        }
    }
}

/// Serializable listing entry
#[derive(Debug, Serialize)]
pub struct ArticleSummary<'a> {
    pub id: &'a ArticleId,
    pub title: &'a str,
    pub date: NaiveDate,
    pub layout: &'a str,
    pub permalink: &'a str,
    pub excerpt: &'a str,
}

/// Serializable full article
#[derive(Debug, Serialize)]
pub struct ArticleDetail<'a> {
    #[serde(flatten)]
    pub summary: ArticleSummary<'a>,
    pub tags: &'a [String],
    pub categories: &'a [String],
    pub languages: Vec<String>,
    pub body: &'a str,
    pub remainder: Option<&'a str>,
    pub blocks: Vec<Block>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ArticleId {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_identifier() {
        let parsed = id("2017-03-04-vue-components-with-laravel");
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2017, 3, 4).unwrap());
        assert_eq!(parsed.slug, "vue-components-with-laravel");
        assert_eq!(parsed.to_string(), "2017-03-04-vue-components-with-laravel");
    }

    #[test]
    fn test_invalid_identifiers() {
        for bad in ["vue-components", "2017-03-04", "2017-03-04-", "2017-13-40-slug"] {
            let err = bad.parse::<ArticleId>().unwrap_err();
            assert!(matches!(err, ParseError::InvalidIdentifier(_)), "{bad}");
        }
    }

    #[test]
    fn test_article_from_document() {
        let config = SiteConfig::default();
        let doc = "---\ntitle: \"Foo\"\n---\nIntro<!--more-->Rest";
        let article = Article::parse(id("2016-05-01-foo"), doc, &config).unwrap();

        assert_eq!(article.title, "Foo");
        assert_eq!(article.layout, "post");
        assert_eq!(article.body, "Intro<!--more-->Rest");
        assert_eq!(article.excerpt(), "Intro");
        assert_eq!(article.remainder(), Some("Rest"));
        assert_eq!(article.permalink, "http://example.com/2016/05/01/foo/");
    }

    #[test]
    fn test_defaults_from_slug_and_config() {
        let config = SiteConfig {
            default_layout: "article".to_string(),
            ..Default::default()
        };
        let doc = "---\n---\nNo teaser marker here.\n";
        let article = Article::parse(id("2016-05-01-untitled-note"), doc, &config).unwrap();
        assert_eq!(article.title, "untitled-note");
        assert_eq!(article.layout, "article");
        assert_eq!(article.excerpt(), article.body);
        assert!(!article.has_separator());
    }

    #[test]
    fn test_per_article_separator() {
        let config = SiteConfig::default();
        let doc = "---\nexcerpt_separator: \"<!-- cut -->\"\n---\nA<!--more-->B<!-- cut -->C";
        let article = Article::parse(id("2016-05-01-cut"), doc, &config).unwrap();
        assert_eq!(article.excerpt(), "A<!--more-->B");
    }

    #[test]
    fn test_blocks_skip_separator() {
        let config = SiteConfig::default();
        let doc = "---\ntitle: Blocks\n---\nTeaser.\n\n<!--more-->\n\n```php\nRoute::get('/');\n```\n";
        let article = Article::parse(id("2016-05-01-blocks"), doc, &config).unwrap();
        let blocks = article.blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].lang(), Some("php"));

        let json = serde_json::to_value(article.detail()).unwrap();
        assert_eq!(json["id"], "2016-05-01-blocks");
        assert_eq!(json["languages"][0], "php");
        assert_eq!(json["blocks"][0]["kind"], "prose");
    }
}
