//! Decoding of `grid-template-columns` / `grid-template-rows` values.

use std::sync::LazyLock;

use regex_lite::Regex;

use super::tokens::{
    contains_top_level, function_args, is_line_names, split_args, split_tracks,
};

/// Matches a pure `repeat(n, unit)` template.
static SIMPLE_REPEAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^repeat\(\s*(\d+)\s*,\s*([^)]+)\)$").unwrap());

/// Decoded form of one grid axis template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridAxisModel {
    /// `repeat(count, unit)` with `count > 0`.
    Simple { count: u32, unit: String },
    /// Explicit track list; bracketed line names are kept as their own tokens.
    Tracks { tokens: Vec<String> },
    /// Anything else, preserved verbatim.
    Raw(String),
}

impl GridAxisModel {
    /// Decode a template, trying `Simple`, then `Tracks`, else `Raw`.
    ///
    /// ```
    /// use costered::grid::GridAxisModel;
    ///
    /// assert_eq!(
    ///     GridAxisModel::decode("repeat(3, 1fr)"),
    ///     GridAxisModel::Simple { count: 3, unit: "1fr".into() }
    /// );
    /// assert!(matches!(GridAxisModel::decode("1fr 2fr"), GridAxisModel::Tracks { .. }));
    /// assert!(matches!(GridAxisModel::decode("1fr, 2fr"), GridAxisModel::Raw(_)));
    /// ```
    pub fn decode(template: &str) -> Self {
        let trimmed = template.trim();
        decode_simple(trimmed)
            .or_else(|| decode_tracks(trimmed))
            .unwrap_or_else(|| Self::Raw(template.to_string()))
    }

    /// Encode back to template text.
    pub fn to_template(&self) -> String {
        match self {
            Self::Simple { count, unit } => make_repeat(*count, unit).unwrap_or_default(),
            Self::Tracks { tokens } => tokens.join(" "),
            Self::Raw(raw) => raw.clone(),
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    /// Number of tracks this template defines (see [`count_tracks`]).
    pub fn track_count(&self) -> usize {
        match self {
            Self::Raw(_) => 0,
            other => count_tracks(&other.to_template()),
        }
    }
}

fn decode_simple(template: &str) -> Option<GridAxisModel> {
    let caps = SIMPLE_REPEAT_RE.captures(template)?;
    let count: u32 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str().trim();
    if count == 0 || unit.is_empty() {
        return None;
    }
    Some(GridAxisModel::Simple {
        count,
        unit: unit.to_string(),
    })
}

fn decode_tracks(template: &str) -> Option<GridAxisModel> {
    // Top-level commas or quotes mean this is not a track list
    if template.contains(['"', '\'']) || contains_top_level(template, ',') {
        return None;
    }
    let tokens = split_tracks(template)?;
    Some(GridAxisModel::Tracks {
        tokens: tokens.into_iter().map(String::from).collect(),
    })
}

/// Build `repeat(count, unit)`; the inverse of the simple decoder.
///
/// Returns `None` for a zero count or an empty unit.
pub fn make_repeat(count: u32, unit: &str) -> Option<String> {
    let unit = unit.trim();
    if count == 0 || unit.is_empty() {
        return None;
    }
    Some(format!("repeat({count}, {unit})"))
}

/// Auto-repeat flavour of a `repeat()` track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoRepeat {
    Fill,
    Fit,
}

/// What a template says about its track count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackSummary {
    /// Determinate track count; auto-repeats and `subgrid` contribute 0.
    pub count: usize,
    /// First track size found, as a hint for editor controls.
    pub unit: Option<String>,
    pub auto_repeat: Option<AutoRepeat>,
    pub subgrid: bool,
}

/// Analyse a template's tracks.
///
/// - `subgrid` is indeterminate: count 0
/// - `repeat(auto-fill | auto-fit, ...)` contributes 0 but still yields a unit
/// - `repeat(n, a b)` contributes `n * 2`, plain tokens contribute 1
/// - bracketed line names never count
pub fn summarize_tracks(template: &str) -> TrackSummary {
    let mut summary = TrackSummary::default();
    let Some(tokens) = split_tracks(template) else {
        return summary;
    };

    if tokens
        .first()
        .is_some_and(|t| t.eq_ignore_ascii_case("subgrid"))
    {
        summary.subgrid = true;
        return summary;
    }

    for token in tokens {
        if is_line_names(token) {
            continue;
        }
        if token.eq_ignore_ascii_case("none") || token.eq_ignore_ascii_case("masonry") {
            continue;
        }

        let Some(args) = function_args(token, "repeat") else {
            summary.count = summary.count.saturating_add(1);
            summary.unit.get_or_insert_with(|| token.to_string());
            continue;
        };

        let Some(parts) = split_args(args) else {
            continue;
        };
        let [times, list] = parts[..] else {
            continue;
        };
        let inner: Vec<&str> = split_tracks(list)
            .unwrap_or_default()
            .into_iter()
            .filter(|t| !is_line_names(t))
            .collect();

        if let Some(first) = inner.first() {
            summary.unit.get_or_insert_with(|| first.to_string());
        }

        match times.to_ascii_lowercase().as_str() {
            "auto-fill" => summary.auto_repeat = Some(AutoRepeat::Fill),
            "auto-fit" => summary.auto_repeat = Some(AutoRepeat::Fit),
            n => {
                if let Ok(n) = n.parse::<usize>() {
                    summary.count = summary.count.saturating_add(n.saturating_mul(inner.len()));
                }
            }
        }
    }

    summary
}

/// Count the tracks of a template.
///
/// ```
/// use costered::grid::count_tracks;
///
/// assert_eq!(count_tracks("repeat(3, minmax(100px,1fr)) 2fr"), 4);
/// assert_eq!(count_tracks("[full-start] 1fr [content-start] 2fr [full-end]"), 2);
/// assert_eq!(count_tracks("subgrid"), 0);
/// ```
pub fn count_tracks(template: &str) -> usize {
    summarize_tracks(template).count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_simple() {
        assert_eq!(
            GridAxisModel::decode(" repeat( 4 ,  200px ) "),
            GridAxisModel::Simple {
                count: 4,
                unit: "200px".to_string()
            }
        );
    }

    #[test]
    fn test_decode_zero_repeat_is_not_simple() {
        assert_eq!(
            GridAxisModel::decode("repeat(0, 1fr)"),
            GridAxisModel::Tracks {
                tokens: vec!["repeat(0, 1fr)".to_string()]
            }
        );
    }

    #[test]
    fn test_decode_nested_function_falls_to_tracks() {
        let model = GridAxisModel::decode("repeat(3, minmax(100px, 1fr))");
        assert_eq!(
            model,
            GridAxisModel::Tracks {
                tokens: vec!["repeat(3, minmax(100px, 1fr))".to_string()]
            }
        );
        assert_eq!(model.track_count(), 3);
    }

    #[test]
    fn test_decode_tracks_with_line_names() {
        let model = GridAxisModel::decode("[a] fit-content(20%) [b c] 1fr");
        assert_eq!(
            model,
            GridAxisModel::Tracks {
                tokens: vec![
                    "[a]".to_string(),
                    "fit-content(20%)".to_string(),
                    "[b c]".to_string(),
                    "1fr".to_string(),
                ]
            }
        );
        assert_eq!(model.track_count(), 2);
    }

    #[test]
    fn test_decode_raw_preserves_input() {
        let raw = " minmax(1px, 2px ";
        assert_eq!(GridAxisModel::decode(raw), GridAxisModel::Raw(raw.to_string()));
        assert_eq!(GridAxisModel::decode(raw).to_template(), raw);
        assert_eq!(GridAxisModel::decode(raw).track_count(), 0);
    }

    #[test]
    fn test_make_repeat() {
        assert_eq!(make_repeat(5, "1fr").as_deref(), Some("repeat(5, 1fr)"));
        assert_eq!(make_repeat(0, "1fr"), None);
        assert_eq!(make_repeat(2, "  "), None);
    }

    #[test]
    fn test_make_repeat_roundtrip() {
        let template = make_repeat(5, "1fr").unwrap();
        assert_eq!(
            GridAxisModel::decode(&template),
            GridAxisModel::Simple {
                count: 5,
                unit: "1fr".to_string()
            }
        );
        assert_eq!(GridAxisModel::decode(&template).to_template(), template);
    }

    #[test]
    fn test_count_mixed_repeat() {
        assert_eq!(count_tracks("repeat(3, minmax(100px,1fr)) 2fr"), 4);
        assert_eq!(count_tracks("100px repeat(2, 1fr [mid] 2fr) 100px"), 6);
        assert_eq!(count_tracks("repeat(2, 1fr) repeat(3, 50px)"), 5);
    }

    #[test]
    fn test_count_huge_repeat_saturates() {
        assert_eq!(
            count_tracks("repeat(18446744073709551615, 1fr 1fr)"),
            usize::MAX
        );
        assert_eq!(
            count_tracks("repeat(18446744073709551615, 1fr) 2fr"),
            usize::MAX
        );
    }

    #[test]
    fn test_count_auto_repeat() {
        let summary = summarize_tracks("repeat(auto-fill, minmax(200px, 1fr))");
        assert_eq!(summary.count, 0);
        assert_eq!(summary.unit.as_deref(), Some("minmax(200px, 1fr)"));
        assert_eq!(summary.auto_repeat, Some(AutoRepeat::Fill));

        let summary = summarize_tracks("200px repeat(auto-fit, 100px)");
        assert_eq!(summary.count, 1);
        assert_eq!(summary.unit.as_deref(), Some("200px"));
        assert_eq!(summary.auto_repeat, Some(AutoRepeat::Fit));
    }

    #[test]
    fn test_count_subgrid_and_keywords() {
        let summary = summarize_tracks("subgrid [a] [b]");
        assert!(summary.subgrid);
        assert_eq!(summary.count, 0);
        assert_eq!(count_tracks("none"), 0);
        assert_eq!(count_tracks(""), 0);
    }

    #[test]
    fn test_count_unbalanced_is_zero() {
        assert_eq!(count_tracks("repeat(3, 1fr"), 0);
    }
}
