//! List articles

use anyhow::Result;

use crate::content::ArticleSummary;
use crate::store::ContentStore;
use crate::Site;

/// List articles in publication order
pub fn run(site: &Site, json: bool) -> Result<()> {
    let store = site.load_store()?;
    if json {
        println!("{}", render_json(&store)?);
    } else {
        print!("{}", render_text(&store, &site.config.date_format));
    }
    Ok(())
}

/// One line per article: date, identifier, title
pub fn render_text(store: &ContentStore, date_format: &str) -> String {
    let mut out = format!("Articles ({}):\n", store.len());
    for article in store.list() {
        out.push_str(&format!(
            "  {}  {}  {}\n",
            article.date().format(date_format),
            article.id,
            article.title
        ));
    }
    out
}

pub fn render_json(store: &ContentStore) -> Result<String> {
    let summaries: Vec<ArticleSummary> = store.list().iter().map(|a| a.summary()).collect();
    Ok(serde_json::to_string_pretty(&summaries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::Article;

    fn store() -> ContentStore {
        let config = SiteConfig::default();
        let article = |id: &str, doc: &str| Article::parse(id.parse().unwrap(), doc, &config).unwrap();
        ContentStore::new(vec![
            article("2017-02-01-mix", "---\ntitle: Laravel Mix\n---\nAssets<!--more-->More"),
            article("2016-11-30-echo", "---\ntitle: Laravel Echo\n---\nSockets"),
        ])
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&store(), "%Y-%m-%d");
        assert_eq!(
            text,
            "Articles (2):\n  2016-11-30  2016-11-30-echo  Laravel Echo\n  2017-02-01  2017-02-01-mix  Laravel Mix\n"
        );
    }

    #[test]
    fn test_render_json() {
        let json: serde_json::Value = serde_json::from_str(&render_json(&store()).unwrap()).unwrap();
        assert_eq!(json[0]["id"], "2016-11-30-echo");
        assert_eq!(json[1]["excerpt"], "Assets");
        assert_eq!(json[1]["date"], "2017-02-01");
    }
}
