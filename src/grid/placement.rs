//! `grid-column` / `grid-row` shorthands and grid-area names.
//!
//! Two codecs live here. The simple one drives the basic editor controls and
//! only knows `start / span n`. The advanced one also handles an explicit end
//! line (number or name) and accepts negative spans.
//!
//! Line and span values of `0` are invalid in CSS grid and are never written.

use std::fmt;

use super::areas::AreaBounds;

/// One grid line reference.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GridLine {
    #[default]
    Auto,
    /// Signed line number. `0` is invalid and replaced before output.
    Line(i32),
    /// A named line such as `content-start`.
    Named(String),
}

impl GridLine {
    /// Parse a single line token.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if token.is_empty() || token.eq_ignore_ascii_case("auto") {
            return Self::Auto;
        }
        match token.parse::<i32>() {
            Ok(n) => Self::Line(n),
            Err(_) => Self::Named(token.to_string()),
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Replace a zero line with `fallback`, or `auto` if the fallback is zero too.
    pub fn or_fallback(self, fallback: i32) -> Self {
        match self {
            Self::Line(0) if fallback == 0 => Self::Auto,
            Self::Line(0) => Self::Line(fallback),
            other => other,
        }
    }
}

impl fmt::Display for GridLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Line(n) => write!(f, "{n}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<i32> for GridLine {
    fn from(n: i32) -> Self {
        Self::Line(n)
    }
}

/// Parse `span N`, returning `N`.
fn parse_span(token: &str) -> Option<i32> {
    let token = token.trim();
    let rest = token.get(..4).filter(|s| s.eq_ignore_ascii_case("span"))?;
    token[rest.len()..].trim().parse().ok()
}

// ============================================================================
// Simple codec
// ============================================================================

/// Start line and positive span, as shown by the basic controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplePlacement {
    pub start: i32,
    pub span: i32,
}

impl Default for SimplePlacement {
    fn default() -> Self {
        Self { start: 1, span: 1 }
    }
}

/// Parse a shorthand for the basic controls.
///
/// `auto`, named and zero starts display as line `1`; missing, zero and
/// negative spans become `1`. An explicit numeric end is converted to a span.
///
/// ```
/// use costered::grid::{parse_placement_simple, SimplePlacement};
///
/// assert_eq!(parse_placement_simple("2 / span 3"), SimplePlacement { start: 2, span: 3 });
/// assert_eq!(parse_placement_simple("4"), SimplePlacement { start: 4, span: 1 });
/// assert_eq!(parse_placement_simple("auto"), SimplePlacement { start: 1, span: 1 });
/// ```
pub fn parse_placement_simple(value: &str) -> SimplePlacement {
    let mut parts = value.split('/').map(str::trim);
    let first = parts.next().unwrap_or_default();
    let second = parts.next();

    let mut placement = SimplePlacement::default();

    if let Some(span) = parse_span(first) {
        placement.span = span.max(1);
        return placement;
    }
    if let GridLine::Line(n) = GridLine::parse(first)
        && n != 0
    {
        placement.start = n;
    }

    placement.span = match second {
        Some(token) => match (parse_span(token), GridLine::parse(token)) {
            (Some(span), _) => span,
            (None, GridLine::Line(end)) if end != 0 => {
                end.checked_sub(placement.start).unwrap_or(1)
            }
            _ => 1,
        },
        None => 1,
    }
    .max(1);

    placement
}

/// Compose a shorthand from the basic controls.
///
/// `N / span 1` collapses to `N` when `collapse_span_one` is set and the start
/// is not `auto`. A zero start is written as `auto`; spans below 1 become 1.
///
/// ```
/// use costered::grid::compose_placement_simple;
///
/// assert_eq!(compose_placement_simple(2, 1, true), "2");
/// assert_eq!(compose_placement_simple(2, 1, false), "2 / span 1");
/// assert_eq!(compose_placement_simple(3, 2, true), "3 / span 2");
/// ```
pub fn compose_placement_simple(
    start: impl Into<GridLine>,
    span: i32,
    collapse_span_one: bool,
) -> String {
    let start = start.into().or_fallback(0);
    let span = span.max(1);

    if span == 1 && collapse_span_one && !start.is_auto() {
        start.to_string()
    } else {
        format!("{start} / span {span}")
    }
}

// ============================================================================
// Advanced codec
// ============================================================================

/// Which end representation the advanced controls serialise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementMode {
    #[default]
    Span,
    End,
}

/// A parsed placement shorthand: start plus a span or an end line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlacementShorthand {
    pub start: GridLine,
    pub span: Option<i32>,
    pub end: Option<GridLine>,
}

impl PlacementShorthand {
    /// The mode matching what was parsed.
    pub fn mode(&self) -> PlacementMode {
        if self.end.is_some() && self.span.is_none() {
            PlacementMode::End
        } else {
            PlacementMode::Span
        }
    }
}

/// Parse a shorthand for the advanced controls.
///
/// Zero lines and zero spans are treated as absent. Negative spans are kept.
///
/// ```
/// use costered::grid::{parse_placement, GridLine};
///
/// let p = parse_placement("2 / content-end");
/// assert_eq!(p.start, GridLine::Line(2));
/// assert_eq!(p.end, Some(GridLine::Named("content-end".into())));
/// assert_eq!(p.span, None);
/// ```
pub fn parse_placement(value: &str) -> PlacementShorthand {
    let mut parts = value.split('/').map(str::trim);
    let first = parts.next().unwrap_or_default();
    let second = parts.next();

    let mut placement = PlacementShorthand::default();

    if let Some(span) = parse_span(first) {
        placement.span = (span != 0).then_some(span);
    } else {
        placement.start = GridLine::parse(first).or_fallback(0);
    }

    if let Some(token) = second {
        match parse_span(token) {
            Some(span) => placement.span = (span != 0).then_some(span),
            None => {
                let end = GridLine::parse(token).or_fallback(0);
                if !end.is_auto() {
                    placement.end = Some(end);
                    placement.span = None;
                }
            }
        }
    }

    placement
}

/// Compose a shorthand for the advanced controls.
///
/// Exactly one of span or end is written, chosen by `mode`. When the other
/// one was supplied and both lines are numeric it is converted. Zero lines or
/// spans are replaced with `fallback` and dropped if `fallback` is zero.
///
/// ```
/// use costered::grid::{compose_placement, parse_placement, PlacementMode};
///
/// let p = parse_placement("2 / span 3");
/// assert_eq!(compose_placement(&p, PlacementMode::Span, 1), "2 / span 3");
/// assert_eq!(compose_placement(&p, PlacementMode::End, 1), "2 / 5");
/// ```
pub fn compose_placement(placement: &PlacementShorthand, mode: PlacementMode, fallback: i32) -> String {
    let start = placement.start.clone().or_fallback(fallback);
    let span = placement
        .span
        .map(|s| if s == 0 { fallback } else { s })
        .filter(|s| *s != 0);
    let end = placement.end.clone().map(|e| e.or_fallback(fallback));

    let tail = match mode {
        PlacementMode::Span => {
            let span = span.or_else(|| match (&start, &end) {
                (GridLine::Line(s), Some(GridLine::Line(e))) => {
                    e.checked_sub(*s).filter(|d| *d != 0)
                }
                _ => None,
            });
            span.map(|s| format!("span {s}"))
        }
        PlacementMode::End => {
            let end = end.filter(|e| !e.is_auto()).or_else(|| match (&start, span) {
                (GridLine::Line(s), Some(span)) => {
                    s.checked_add(span).filter(|e| *e != 0).map(GridLine::Line)
                }
                _ => None,
            });
            end.map(|e| e.to_string())
        }
    };

    match tail {
        Some(tail) => format!("{start} / {tail}"),
        None => start.to_string(),
    }
}

/// Simple `(grid-column, grid-row)` shorthands that place an item over a
/// named area's bounds.
pub fn placement_from_bounds(bounds: &AreaBounds) -> (String, String) {
    let to_i32 = |n: usize| i32::try_from(n).unwrap_or(i32::MAX);
    (
        compose_placement_simple(
            to_i32(bounds.column_start),
            to_i32(bounds.column_span()),
            true,
        ),
        compose_placement_simple(to_i32(bounds.row_start), to_i32(bounds.row_span()), true),
    )
}

// ============================================================================
// Area names
// ============================================================================

/// Keywords that cannot name a grid area.
const CSS_WIDE_KEYWORDS: [&str; 6] = ["auto", "inherit", "initial", "unset", "revert", "revert-layer"];

/// Check a `grid-area` name.
///
/// ```
/// use costered::grid::is_valid_area_name;
///
/// assert!(is_valid_area_name("sidebar"));
/// assert!(!is_valid_area_name("main area"));
/// assert!(!is_valid_area_name("Inherit"));
/// ```
pub fn is_valid_area_name(name: &str) -> bool {
    // Area names are identifiers, which cannot start with a digit
    let digit_start = name
        .trim_start_matches('-')
        .starts_with(|c: char| c.is_ascii_digit());
    !name.is_empty()
        && !digit_start
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '"' | '\''))
        && !CSS_WIDE_KEYWORDS
            .iter()
            .any(|k| k.eq_ignore_ascii_case(name))
}
