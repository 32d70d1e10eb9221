//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;
use crate::content::ArticleId;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/2017/03/04/foo/") // -> "/blog/2017/03/04/foo/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Expand the permalink pattern for an article
///
/// A front-matter `permalink` replaces the site pattern entirely.
pub fn permalink_for(config: &SiteConfig, id: &ArticleId, custom: Option<&str>) -> String {
    let date = &id.date;
    let slug = utf8_percent_encode(&id.slug, SEGMENT).to_string();

    let path = match custom {
        Some(custom) => custom.to_string(),
        None => config
            .permalink
            .replace(":year", &date.format("%Y").to_string())
            .replace(":i_month", &date.format("%-m").to_string())
            .replace(":i_day", &date.format("%-d").to_string())
            .replace(":month", &date.format("%m").to_string())
            .replace(":day", &date.format("%d").to_string())
            .replace(":title", &slug),
    };

    full_url_for(config, &path)
}
