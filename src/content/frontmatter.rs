//! Front-matter parsing

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ParseError;

/// Marker line that opens and closes the header
pub const DELIMITER: &str = "---";

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            // Jekyll allows `tags: laravel php`
            Ok(value.split_whitespace().map(str::to_string).collect())
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

fn is_true(value: &bool) -> bool {
    *value
}

/// Front-matter data from an article header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(deserialize_with = "string_or_vec", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "string_or_vec", skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    /// Articles are published unless they say otherwise
    #[serde(skip_serializing_if = "is_true")]
    pub published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt_separator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,

    /// Additional custom fields, in document order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            layout: None,
            title: None,
            date: None,
            tags: Vec::new(),
            categories: Vec::new(),
            published: true,
            excerpt_separator: None,
            permalink: None,
            extra: IndexMap::new(),
        }
    }
}

impl FrontMatter {
    /// Split a document into its header and body.
    ///
    /// The first line must be `---`; the header runs up to the next `---`
    /// line. Trailing whitespace after either delimiter is ignored. The returned body starts right after that
    /// closing line.
    pub fn parse(document: &str) -> Result<(Self, &str), ParseError> {
        let document = document.strip_prefix('\u{feff}').unwrap_or(document);
        let mut lines = document.split_inclusive('\n');

        let first = lines.next().ok_or(ParseError::MissingFrontMatter)?;
        if !is_delimiter(first) {
            return Err(ParseError::MissingFrontMatter);
        }

        let header_start = first.len();
        let mut offset = header_start;
        for line in lines {
            if is_delimiter(line) {
                let yaml = &document[header_start..offset];
                let body = &document[offset + line.len()..];
                return Ok((Self::from_yaml(yaml)?, body));
            }
            offset += line.len();
        }

        Err(ParseError::UnterminatedFrontMatter)
    }

    /// Parse the YAML between the delimiters
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        let has_content = yaml.lines().any(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        });
        if !has_content {
            return Ok(FrontMatter::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize back into a complete `---` delimited header
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n"))
    }

    /// Parse the `date` field, if any
    pub fn parse_date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// A `---` line, tolerating trailing whitespace
fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Parse a date string in the formats Jekyll and Hexo write
fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // `2017-03-04 10:00:00 +0800` and RFC 3339 carry an offset
    if let Ok(dt) = chrono::DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
layout: post
title: "Eager loading in Laravel"
date: 2017-01-15 10:30:00
tags:
  - laravel
  - eloquent
---

Avoid N+1 queries.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.layout.as_deref(), Some("post"));
        assert_eq!(fm.title.as_deref(), Some("Eager loading in Laravel"));
        assert_eq!(fm.tags, vec!["laravel", "eloquent"]);
        assert!(fm.published);
        assert_eq!(body, "\nAvoid N+1 queries.\n");
    }

    #[test]
    fn test_body_may_contain_delimiter_lines() {
        let content = "---\ntitle: Rules\n---\nabove\n---\nbelow\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Rules"));
        assert_eq!(body, "above\n---\nbelow\n");
    }

    #[test]
    fn test_crlf_delimiters() {
        let content = "---\r\ntitle: Windows\r\n---\r\nBody\r\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_delimiters_with_trailing_whitespace() {
        let content = "--- \ntitle: Spaced\n---  \t\nBody\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Spaced"));
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_missing_frontmatter() {
        let err = FrontMatter::parse("# Just markdown\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingFrontMatter));

        // The header has to start the document
        let err = FrontMatter::parse("\n---\ntitle: x\n---\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingFrontMatter));
    }

    #[test]
    fn test_unterminated_frontmatter() {
        let err = FrontMatter::parse("---\ntitle: x\nbody\n").unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedFrontMatter));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = FrontMatter::parse("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, ParseError::Yaml(_)));
    }

    #[test]
    fn test_empty_header_is_default() {
        let (fm, body) = FrontMatter::parse("---\n# nothing here\n---\nText").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "Text");
    }

    #[test]
    fn test_single_string_tags() {
        let (fm, _) = FrontMatter::parse("---\ntags: vue php\ncategories: Notes\n---\n").unwrap();
        assert_eq!(fm.tags, vec!["vue", "php"]);
        assert_eq!(fm.categories, vec!["Notes"]);
    }

    #[test]
    fn test_round_trip_keeps_title_and_layout() {
        let content = "---\nlayout: post\ntitle: \"Foo: a story\"\ncomments: true\n---\nBody";
        let (fm, _) = FrontMatter::parse(content).unwrap();

        let header = fm.to_yaml().unwrap();
        assert!(header.starts_with("---\n"));
        assert!(header.ends_with("---\n"));

        let (reparsed, body) = FrontMatter::parse(&header).unwrap();
        assert_eq!(reparsed.title.as_deref(), Some("Foo: a story"));
        assert_eq!(reparsed.layout.as_deref(), Some("post"));
        assert_eq!(reparsed.extra.get("comments"), Some(&serde_yaml::Value::Bool(true)));
        assert_eq!(body, "");
    }

    #[test]
    fn test_default_round_trip() {
        let header = FrontMatter::default().to_yaml().unwrap();
        let (reparsed, _) = FrontMatter::parse(&header).unwrap();
        assert_eq!(reparsed, FrontMatter::default());
    }

    #[test]
    fn test_parse_date() {
        let fm = FrontMatter {
            date: Some("2017-01-15 10:30:00".to_string()),
            ..Default::default()
        };
        let dt = fm.parse_date().unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2017-01-15 10:30");

        let fm = FrontMatter {
            date: Some("2017-01-15".to_string()),
            ..Default::default()
        };
        assert_eq!(fm.parse_date().unwrap().date().to_string(), "2017-01-15");

        let fm = FrontMatter {
            date: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert!(fm.parse_date().is_none());
    }
}
