//! Create a new article

use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::content::FrontMatter;
use crate::Site;

/// Create `<posts_dir>/YYYY-MM-DD-<slug>.md` and return its path
pub fn create_article(
    site: &Site,
    title: &str,
    layout: Option<&str>,
    date: NaiveDate,
) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    fs::create_dir_all(&site.posts_dir)?;

    let file_path = site
        .posts_dir
        .join(format!("{}-{}.md", date.format("%Y-%m-%d"), slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let front_matter = FrontMatter {
        layout: Some(layout.unwrap_or(&site.config.default_layout).to_string()),
        title: Some(title.to_string()),
        ..Default::default()
    };

    let content = format!(
        "{}\n{}\n",
        front_matter.to_yaml()?,
        site.config.excerpt_separator
    );
    fs::write(&file_path, content)?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}
