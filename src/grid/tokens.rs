//! Top-level splitting of grid template text.
//!
//! Track lists nest: `minmax(100px, 1fr)`, `fit-content(20%)` and `[a b]` line
//! name groups must stay whole while the list around them is split.

/// Split `text` on `is_sep` characters that are not inside `()` or `[]`.
///
/// Returns `None` when brackets are unbalanced. Empty pieces are dropped and
/// pieces are trimmed.
fn split_top_level(text: &str, is_sep: impl Fn(char) -> bool) -> Option<Vec<&str>> {
    let mut pieces = Vec::new();
    let mut depth_paren = 0usize;
    let mut depth_bracket = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '(' => depth_paren += 1,
            ')' => depth_paren = depth_paren.checked_sub(1)?,
            '[' => depth_bracket += 1,
            ']' => depth_bracket = depth_bracket.checked_sub(1)?,
            c if depth_paren == 0 && depth_bracket == 0 && is_sep(c) => {
                pieces.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }

    if depth_paren != 0 || depth_bracket != 0 {
        return None;
    }
    pieces.push(&text[start..]);

    Some(
        pieces
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect(),
    )
}

/// Split a track list on top-level whitespace.
///
/// ```
/// use costered::grid::split_tracks;
///
/// assert_eq!(
///     split_tracks("[full-start] minmax(1rem, 1fr) fit-content(20%)"),
///     Some(vec!["[full-start]", "minmax(1rem, 1fr)", "fit-content(20%)"])
/// );
/// assert_eq!(split_tracks("minmax(1px, 1fr"), None);
/// ```
pub fn split_tracks(text: &str) -> Option<Vec<&str>> {
    split_top_level(text, char::is_whitespace)
}

/// Split function arguments on top-level commas.
pub(crate) fn split_args(text: &str) -> Option<Vec<&str>> {
    split_top_level(text, |c| c == ',')
}

/// Whether `needle` occurs outside `()` and `[]`.
pub(crate) fn contains_top_level(text: &str, needle: char) -> bool {
    let mut depth = 0i32;
    text.chars().any(|c| {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth -= 1,
            _ => {}
        }
        depth == 0 && c == needle
    })
}

/// Whether a track token is a bracketed line-name group like `[a b]`.
pub(crate) fn is_line_names(token: &str) -> bool {
    token.starts_with('[') && token.ends_with(']')
}

/// If `token` is `name(args)`, return `args`.
pub(crate) fn function_args<'a>(token: &'a str, name: &str) -> Option<&'a str> {
    let rest = token.get(..name.len())?;
    if !rest.eq_ignore_ascii_case(name) {
        return None;
    }
    token[name.len()..]
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_tracks() {
        assert_eq!(split_tracks("1fr  2fr\t100px"), Some(vec!["1fr", "2fr", "100px"]));
        assert_eq!(split_tracks("   "), Some(vec![]));
    }

    #[test]
    fn test_split_keeps_functions_whole() {
        assert_eq!(
            split_tracks("repeat(3, minmax(100px, 1fr)) 2fr"),
            Some(vec!["repeat(3, minmax(100px, 1fr))", "2fr"])
        );
    }

    #[test]
    fn test_split_keeps_line_names_whole() {
        assert_eq!(
            split_tracks("[a b] 1fr [c]"),
            Some(vec!["[a b]", "1fr", "[c]"])
        );
    }

    #[test]
    fn test_unbalanced_is_none() {
        assert_eq!(split_tracks("1fr)"), None);
        assert_eq!(split_tracks("[a 1fr"), None);
    }

    #[test]
    fn test_split_args() {
        assert_eq!(
            split_args("auto-fill, minmax(10px, 1fr)"),
            Some(vec!["auto-fill", "minmax(10px, 1fr)"])
        );
    }

    #[test]
    fn test_contains_top_level() {
        assert!(contains_top_level("1fr, 2fr", ','));
        assert!(!contains_top_level("minmax(1px, 2px) 1fr", ','));
    }

    #[test]
    fn test_function_args() {
        assert_eq!(function_args("repeat(2, 1fr)", "repeat"), Some("2, 1fr"));
        assert_eq!(function_args("REPEAT (2, 1fr)", "repeat"), Some("2, 1fr"));
        assert_eq!(function_args("minmax(1px, 2px)", "repeat"), None);
        assert_eq!(function_args("rep", "repeat"), None);
    }
}
