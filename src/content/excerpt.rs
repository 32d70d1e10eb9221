//! Teaser/remainder split around the excerpt separator

/// Split `body` at the first occurrence of `separator`.
///
/// Returns the teaser (the exact text before the separator) and the
/// remainder after it. Without a separator the whole body is the teaser.
pub fn split_excerpt<'a>(body: &'a str, separator: &str) -> (&'a str, Option<&'a str>) {
    if separator.is_empty() {
        return (body, None);
    }
    match body.find(separator) {
        Some(pos) => (&body[..pos], Some(&body[pos + separator.len()..])),
        None => (body, None),
    }
}

/// Number of separator occurrences in `body`
pub fn separator_count(body: &str, separator: &str) -> usize {
    if separator.is_empty() {
        return 0;
    }
    body.matches(separator).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MORE: &str = "<!--more-->";

    #[test]
    fn test_split_at_separator() {
        let (teaser, rest) = split_excerpt("Intro<!--more-->Rest", MORE);
        assert_eq!(teaser, "Intro");
        assert_eq!(rest, Some("Rest"));
    }

    #[test]
    fn test_no_separator_is_whole_body() {
        let body = "Just one paragraph.\n";
        assert_eq!(split_excerpt(body, MORE), (body, None));
    }

    #[test]
    fn test_teaser_is_untrimmed_prefix() {
        let body = "\nFirst paragraph.\n\n<!--more-->\n\nSecond.\n";
        let (teaser, rest) = split_excerpt(body, MORE);
        assert!(body.starts_with(teaser));
        assert_eq!(teaser, "\nFirst paragraph.\n\n");
        assert_eq!(rest, Some("\n\nSecond.\n"));
    }

    #[test]
    fn test_splits_at_first_of_many() {
        let body = "a<!--more-->b<!--more-->c";
        assert_eq!(split_excerpt(body, MORE), ("a", Some("b<!--more-->c")));
        assert_eq!(separator_count(body, MORE), 2);
    }

    #[test]
    fn test_custom_and_empty_separator() {
        assert_eq!(
            split_excerpt("one <!-- more --> two", "<!-- more -->"),
            ("one ", Some(" two"))
        );
        assert_eq!(split_excerpt("a<!--more-->b", ""), ("a<!--more-->b", None));
        assert_eq!(separator_count("anything", ""), 0);
    }
}
