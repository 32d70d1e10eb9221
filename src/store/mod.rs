//! In-memory content store
//!
//! Holds the loaded articles ordered by publication date and answers
//! lookups by identifier. Nothing here mutates an article after load.

use std::collections::HashMap;

use crate::content::Article;
use crate::error::StoreError;

/// Ordered, read-only collection of articles
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    articles: Vec<Article>,
    index: HashMap<String, usize>,
}

impl ContentStore {
    /// Build a store from loaded articles.
    ///
    /// Articles are stably sorted by publication date, so same-day articles
    /// keep their incoming order. A repeated identifier keeps the first
    /// article and drops the later one.
    pub fn new(articles: Vec<Article>) -> Self {
        let mut unique: Vec<Article> = Vec::with_capacity(articles.len());
        let mut seen: HashMap<String, usize> = HashMap::new();

        for article in articles {
            let key = article.id.to_string();
            if let Some(&first) = seen.get(&key) {
                tracing::warn!(
                    "Duplicate identifier {} in {:?}, keeping {:?}",
                    key,
                    article.source,
                    unique[first].source
                );
                continue;
            }
            seen.insert(key, unique.len());
            unique.push(article);
        }

        unique.sort_by_key(|a| a.date());

        let index = unique
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.to_string(), i))
            .collect();

        Self {
            articles: unique,
            index,
        }
    }

    /// All articles in non-decreasing publication date order
    pub fn list(&self) -> &[Article] {
        &self.articles
    }

    /// Look up an article by its exact identifier
    pub fn get(&self, id: &str) -> Result<&Article, StoreError> {
        self.index
            .get(id)
            .map(|&i| &self.articles[i])
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Teaser text of an article
    pub fn excerpt(article: &Article) -> &str {
        article.excerpt()
    }

    /// Body text after the separator
    pub fn remainder(article: &Article) -> Option<&str> {
        article.remainder()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Previous and next article in list order
    pub fn neighbors(&self, id: &str) -> Result<(Option<&Article>, Option<&Article>), StoreError> {
        let pos = *self
            .index
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let prev = pos.checked_sub(1).and_then(|i| self.articles.get(i));
        let next = self.articles.get(pos + 1);
        Ok((prev, next))
    }

    /// Every article whose title matches exactly
    pub fn by_title(&self, title: &str) -> Vec<&Article> {
        self.articles.iter().filter(|a| a.title == title).collect()
    }

    /// Titles shared by more than one article, in order of first appearance
    pub fn duplicate_titles(&self) -> Vec<(&str, Vec<&Article>)> {
        let mut groups: Vec<(&str, Vec<&Article>)> = Vec::new();
        for article in &self.articles {
            match groups.iter().position(|(t, _)| *t == article.title.as_str()) {
                Some(i) => groups[i].1.push(article),
                None => groups.push((article.title.as_str(), vec![article])),
            }
        }
        groups.retain(|(_, group)| group.len() > 1);
        groups
    }
}
