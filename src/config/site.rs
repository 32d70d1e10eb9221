//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Separator used when neither the site nor the article picks one
pub const DEFAULT_EXCERPT_SEPARATOR: &str = "<!--more-->";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,

    // URL
    pub url: String,
    pub root: String,
    pub permalink: String,

    // Directory
    pub posts_dir: String,
    #[serde(default)]
    pub exclude: Vec<String>,

    // Writing
    pub default_layout: String,
    pub excerpt_separator: String,
    pub render_drafts: bool,

    // Date format used by `list`
    pub date_format: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            author: "John Doe".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            permalink: ":year/:month/:day/:title/".to_string(),

            posts_dir: "_posts".to_string(),
            exclude: Vec::new(),

            default_layout: "post".to_string(),
            excerpt_separator: DEFAULT_EXCERPT_SEPARATOR.to_string(),
            render_drafts: false,

            date_format: "%Y-%m-%d".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?;
        Self::from_yaml(&content).with_context(|| format!("failed to parse {:?}", path))
    }

    /// Parse configuration from YAML text; an empty document yields the defaults
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Compiled `exclude` patterns; invalid patterns are logged and ignored
    pub fn exclude_patterns(&self) -> Vec<glob::Pattern> {
        self.exclude
            .iter()
            .filter_map(|p| match glob::Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!("Ignoring invalid exclude pattern {:?}: {}", p, e);
                    None
                }
            })
            .collect()
    }
}
