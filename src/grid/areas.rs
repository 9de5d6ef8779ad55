//! `grid-template-areas` matrices.
//!
//! An area matrix is always rectangular: every row has the same number of
//! cells. `.` marks an empty cell.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Matches one quoted row in either quote style.
static AREA_ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)"|'([^']*)'"#).unwrap());

/// The empty-cell token.
pub const EMPTY_AREA: &str = ".";

/// Rows of area names.
pub type AreaMatrix = Vec<Vec<String>>;

fn is_empty_cell(cell: &str) -> bool {
    // CSS treats any run of dots as a single null cell
    cell.is_empty() || cell.chars().all(|c| c == '.')
}

/// Parse `grid-template-areas` text into a rectangular matrix.
///
/// Rows shorter than the widest row are padded with `.`; rows with no cells
/// are skipped.
///
/// ```
/// use costered::grid::parse_areas;
///
/// let m = parse_areas(r#""head head" 'side main'"#);
/// assert_eq!(m, vec![vec!["head", "head"], vec!["side", "main"]]);
/// ```
pub fn parse_areas(template: &str) -> AreaMatrix {
    let mut rows: AreaMatrix = AREA_ROW_RE
        .captures_iter(template)
        .filter_map(|cap| cap.get(1).or_else(|| cap.get(2)))
        .map(|row| {
            row.as_str()
                .split_whitespace()
                .map(|cell| {
                    if is_empty_cell(cell) {
                        EMPTY_AREA.to_string()
                    } else {
                        cell.to_string()
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|row| !row.is_empty())
        .collect();

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, EMPTY_AREA.to_string());
    }
    rows
}

/// Serialise a matrix back to `grid-template-areas` text.
///
/// Returns an empty string, meaning "unset the property", when every cell is
/// empty.
///
/// ```
/// use costered::grid::serialise_areas;
///
/// let m = vec![vec!["a".to_string(), ".".to_string()]];
/// assert_eq!(serialise_areas(&m), r#""a .""#);
/// assert_eq!(serialise_areas(&[vec![".".to_string()]]), "");
/// ```
pub fn serialise_areas(matrix: &[Vec<String>]) -> String {
    if matrix.iter().flatten().all(|cell| is_empty_cell(cell.trim())) {
        return String::new();
    }

    matrix
        .iter()
        .map(|row| {
            let cells: Vec<&str> = row
                .iter()
                .map(|cell| {
                    let cell = cell.trim();
                    if is_empty_cell(cell) { EMPTY_AREA } else { cell }
                })
                .collect();
            format!("\"{}\"", cells.join(" "))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Grow or truncate a matrix to exactly `cols` x `rows`.
///
/// New cells get `fill`; excess rows and columns are dropped.
pub fn ensure_size(matrix: &[Vec<String>], cols: usize, rows: usize, fill: &str) -> AreaMatrix {
    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| {
                    matrix
                        .get(r)
                        .and_then(|row| row.get(c))
                        .cloned()
                        .unwrap_or_else(|| fill.to_string())
                })
                .collect()
        })
        .collect()
}

/// Distinct area names in reading order.
pub fn area_names(matrix: &[Vec<String>]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for cell in matrix.iter().flatten() {
        if !is_empty_cell(cell) && !names.contains(cell) {
            names.push(cell.clone());
        }
    }
    names
}

/// Grid lines bounding a named area (1-based, end exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaBounds {
    pub row_start: usize,
    pub row_end: usize,
    pub column_start: usize,
    pub column_end: usize,
}

impl AreaBounds {
    pub fn row_span(&self) -> usize {
        self.row_end - self.row_start
    }

    pub fn column_span(&self) -> usize {
        self.column_end - self.column_start
    }
}

/// Locate a named area.
///
/// Returns `None` when the name does not occur or its cells do not form a
/// single filled rectangle (CSS rejects such templates).
pub fn area_bounds(matrix: &[Vec<String>], name: &str) -> Option<AreaBounds> {
    let mut cells = matrix.iter().enumerate().flat_map(|(r, row)| {
        row.iter()
            .enumerate()
            .filter(move |(_, cell)| cell.as_str() == name)
            .map(move |(c, _)| (r, c))
    });

    let (r0, c0) = cells.next()?;
    let (mut r1, mut c1, mut min_c) = (r0, c0, c0);
    let mut count = 1;
    for (r, c) in cells {
        r1 = r1.max(r);
        c1 = c1.max(c);
        min_c = min_c.min(c);
        count += 1;
    }

    if min_c != c0 || count != (r1 - r0 + 1) * (c1 - c0 + 1) {
        return None;
    }

    Some(AreaBounds {
        row_start: r0 + 1,
        row_end: r1 + 2,
        column_start: c0 + 1,
        column_end: c1 + 2,
    })
}
