//! Show a single article

use anyhow::Result;

use crate::content::Article;
use crate::Site;

/// What part of an article to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowMode {
    /// Re-serialized header followed by the body
    Full,
    /// Teaser only
    Excerpt,
    /// JSON document with block structure
    Json,
}

pub fn run(site: &Site, id: &str, mode: ShowMode) -> Result<()> {
    let store = site.load_store()?;
    let article = store.get(id)?;
    print!("{}", render(article, mode)?);
    Ok(())
}

pub fn render(article: &Article, mode: ShowMode) -> Result<String> {
    let out = match mode {
        ShowMode::Full => format!("{}{}", article.front_matter.to_yaml()?, article.body),
        ShowMode::Excerpt => {
            let mut teaser = article.excerpt().to_string();
            if !teaser.ends_with('\n') {
                teaser.push('\n');
            }
            teaser
        }
        ShowMode::Json => format!("{}\n", serde_json::to_string_pretty(&article.detail())?),
    };
    Ok(out)
}
