//! Consistency checks over the loaded articles

use anyhow::Result;
use std::fmt;

use crate::store::ContentStore;
use crate::Site;

/// A single finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// Several articles share a title; they stay distinct
    DuplicateTitle { title: String, ids: Vec<String> },
    /// More than one excerpt separator in a body
    MultipleSeparators { id: String, count: usize },
    /// Layout differs from the site default
    UnexpectedLayout { id: String, layout: String },
    /// Front-matter date names another day than the identifier
    DateMismatch { id: String, date: String },
    /// Front-matter date could not be parsed
    InvalidDate { id: String, date: String },
}

impl Issue {
    /// Errors break an invariant; everything else is a warning
    pub fn is_error(&self) -> bool {
        matches!(self, Issue::MultipleSeparators { .. })
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::DuplicateTitle { title, ids } => {
                write!(f, "duplicate title {:?}: {}", title, ids.join(", "))
            }
            Issue::MultipleSeparators { id, count } => {
                write!(f, "{}: {} excerpt separators, expected at most one", id, count)
            }
            Issue::UnexpectedLayout { id, layout } => write!(f, "{}: layout {:?}", id, layout),
            Issue::DateMismatch { id, date } => {
                write!(f, "{}: front-matter date {} differs from identifier", id, date)
            }
            Issue::InvalidDate { id, date } => write!(f, "{}: unparsable date {:?}", id, date),
        }
    }
}

/// Collect every finding for the store
pub fn check_store(store: &ContentStore, default_layout: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    for article in store.list() {
        let id = article.id.to_string();

        let count = article.separator_count();
        if count > 1 {
            issues.push(Issue::MultipleSeparators {
                id: id.clone(),
                count,
            });
        }

        if article.layout != default_layout {
            issues.push(Issue::UnexpectedLayout {
                id: id.clone(),
                layout: article.layout.clone(),
            });
        }

        if let Some(raw) = &article.front_matter.date {
            match article.front_matter.parse_date() {
                Some(dt) if dt.date() != article.date() => issues.push(Issue::DateMismatch {
                    id: id.clone(),
                    date: raw.clone(),
                }),
                Some(_) => {}
                None => issues.push(Issue::InvalidDate {
                    id: id.clone(),
                    date: raw.clone(),
                }),
            }
        }
    }

    for (title, articles) in store.duplicate_titles() {
        issues.push(Issue::DuplicateTitle {
            title: title.to_string(),
            ids: articles.iter().map(|a| a.id.to_string()).collect(),
        });
    }

    issues
}

/// Print findings; fails when any of them is an error
pub fn run(site: &Site) -> Result<()> {
    let store = site.load_store()?;
    let issues = check_store(&store, &site.config.default_layout);

    for issue in &issues {
        if issue.is_error() {
            println!("error: {}", issue);
        } else {
            println!("warning: {}", issue);
        }
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    println!(
        "Checked {} articles: {} errors, {} warnings",
        store.len(),
        errors,
        issues.len() - errors
    );

    if errors > 0 {
        anyhow::bail!("{} articles violate the excerpt separator rule", errors);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::Article;
    use std::fs;
    use tempfile::TempDir;

    fn article(id: &str, doc: &str) -> Article {
        Article::parse(id.parse().unwrap(), doc, &SiteConfig::default()).unwrap()
    }

    #[test]
    fn test_clean_store_has_no_issues() {
        let store = ContentStore::new(vec![article(
            "2017-01-02-clean",
            "---\nlayout: post\ntitle: Clean\ndate: 2017-01-02 09:00:00\n---\nA<!--more-->B",
        )]);
        assert!(check_store(&store, "post").is_empty());
    }

    #[test]
    fn test_reports_every_kind() {
        let store = ContentStore::new(vec![
            article("2017-01-02-a", "---\ntitle: Same\n---\nx<!--more-->y<!--more-->z"),
            article("2017-01-03-b", "---\ntitle: Same\nlayout: page\n---\n"),
            article("2017-01-04-c", "---\ntitle: C\ndate: 2016-12-31\n---\n"),
            article("2017-01-05-d", "---\ntitle: D\ndate: someday\n---\n"),
        ]);

        let issues = check_store(&store, "post");
        assert_eq!(
            issues,
            vec![
                Issue::MultipleSeparators {
                    id: "2017-01-02-a".to_string(),
                    count: 2
                },
                Issue::UnexpectedLayout {
                    id: "2017-01-03-b".to_string(),
                    layout: "page".to_string()
                },
                Issue::DateMismatch {
                    id: "2017-01-04-c".to_string(),
                    date: "2016-12-31".to_string()
                },
                Issue::InvalidDate {
                    id: "2017-01-05-d".to_string(),
                    date: "someday".to_string()
                },
                Issue::DuplicateTitle {
                    title: "Same".to_string(),
                    ids: vec!["2017-01-02-a".to_string(), "2017-01-03-b".to_string()]
                },
            ]
        );
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 1);
    }

    fn site_with(files: &[(&str, &str)]) -> (TempDir, Site) {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        fs::create_dir_all(&site.posts_dir).unwrap();
        for (name, content) in files {
            fs::write(site.posts_dir.join(name), content).unwrap();
        }
        (dir, site)
    }

    #[test]
    fn test_run_fails_on_repeated_separator() {
        let (_dir, site) = site_with(&[
            ("2017-01-02-ok.md", "---\ntitle: Ok\n---\nA<!--more-->B"),
            ("2017-01-03-twice.md", "---\ntitle: Twice\n---\nA<!--more-->B<!--more-->C"),
        ]);
        assert!(run(&site).is_err());
    }

    #[test]
    fn test_run_passes_with_only_warnings() {
        let (_dir, site) = site_with(&[
            ("2017-01-02-a.md", "---\ntitle: Same\n---\nA<!--more-->B"),
            ("2017-01-03-b.md", "---\ntitle: Same\nlayout: page\n---\nC"),
        ]);
        assert!(run(&site).is_ok());
    }
}
