//! Initialize a new site

use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::config::DEFAULT_EXCERPT_SEPARATOR;
use crate::CONFIG_FILE;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path, today: NaiveDate) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }

    // Create directory structure
    fs::create_dir_all(target_dir.join("_posts"))?;

    let config_content = format!(
        r#"# Site
title: Blog
author: John Doe

# URL
url: http://example.com
root: /
permalink: :year/:month/:day/:title/

# Directory
posts_dir: _posts
exclude: []

# Writing
default_layout: post
excerpt_separator: "{DEFAULT_EXCERPT_SEPARATOR}"
render_drafts: false

# Date format for listings
date_format: "%Y-%m-%d"
"#
    );
    fs::write(&config_path, config_content)?;

    // Create a sample article
    let sample = format!(
        r#"---
layout: post
title: "Hello World"
---
Welcome! This is your very first article. Everything above the separator is
the teaser shown in listings.

{DEFAULT_EXCERPT_SEPARATOR}

## Create a new article

```bash
$ poststore new "My New Article"
```

## Browse the articles

```bash
$ poststore list
$ poststore serve --watch
```
"#
    );
    let file_name = format!("{}-hello-world.md", today.format("%Y-%m-%d"));
    fs::write(target_dir.join("_posts").join(file_name), sample)?;

    tracing::info!("Initialized site in {:?}", target_dir);
    Ok(())
}
