//! Body structure: prose blocks and code samples

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;

/// A top-level piece of an article body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Block {
    /// Markdown source of a paragraph, heading, list, quote or similar
    Prose { text: String },
    /// A code sample with its optional language hint
    Code { lang: Option<String>, source: String },
}

impl Block {
    /// Language hint of a code block
    pub fn lang(&self) -> Option<&str> {
        match self {
            Block::Code { lang, .. } => lang.as_deref(),
            Block::Prose { .. } => None,
        }
    }
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_DEFINITION_LIST
        | Options::ENABLE_GFM
}

/// Break a Markdown body into its top-level blocks, in document order.
///
/// Code nested inside lists or quotes stays part of the surrounding prose.
pub fn blocks(markdown: &str) -> Vec<Block> {
    let parser = Parser::new_ext(markdown, parser_options()).into_offset_iter();

    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut code: Option<(Option<String>, String)> = None;

    for (event, range) in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) if depth == 0 => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(|l| l.trim_matches(|c| c == '{' || c == '}' || c == '.'))
                        .filter(|l| !l.is_empty())
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                };
                code = Some((lang, String::new()));
                depth += 1;
            }
            Event::End(TagEnd::CodeBlock) if depth == 1 && code.is_some() => {
                if let Some((lang, source)) = code.take() {
                    blocks.push(Block::Code { lang, source });
                }
                depth -= 1;
            }
            Event::Text(text) if code.is_some() => {
                if let Some((_, source)) = code.as_mut() {
                    source.push_str(&text);
                }
            }
            Event::Start(_) => {
                if depth == 0 {
                    push_prose(&mut blocks, &markdown[range]);
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
            }
            Event::Rule if depth == 0 => push_prose(&mut blocks, &markdown[range]),
            _ => {}
        }
    }

    blocks
}

fn push_prose(blocks: &mut Vec<Block>, source: &str) {
    let text = source.trim();
    if !text.is_empty() {
        blocks.push(Block::Prose {
            text: text.to_string(),
        });
    }
}

/// Distinct code languages in order of first appearance
pub fn code_languages(blocks: &[Block]) -> Vec<String> {
    let mut langs: Vec<String> = Vec::new();
    for lang in blocks.iter().filter_map(Block::lang) {
        if !langs.iter().any(|l| l == lang) {
            langs.push(lang.to_string());
        }
    }
    langs
}
