//! Breakpoint cascade for reading declarations.
//!
//! A value unset at a narrower breakpoint falls back to the next wider tier:
//! mobile reads tablet then desktop, tablet reads desktop. Raw reads look at
//! exactly one bucket.

use std::collections::BTreeMap;

use super::{Breakpoint, StyleDeclaration, StyleRecord, StyleValue};

/// How a read treats narrower tiers with no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Fall back to wider breakpoints.
    #[default]
    Cascade,
    /// Only the active breakpoint's bucket.
    Raw,
}

/// Options for [`get`] and [`get_many`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    pub breakpoint: Breakpoint,
    pub mode: ReadMode,
}

impl ReadOptions {
    pub fn cascade(breakpoint: Breakpoint) -> Self {
        Self {
            breakpoint,
            mode: ReadMode::Cascade,
        }
    }

    pub fn raw(breakpoint: Breakpoint) -> Self {
        Self {
            breakpoint,
            mode: ReadMode::Raw,
        }
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::cascade(Breakpoint::Desktop)
    }
}

/// Find the declaration that applies to `key` at `breakpoint`.
pub fn resolve<'a>(
    record: &'a StyleRecord,
    breakpoint: Breakpoint,
    key: &str,
    mode: ReadMode,
) -> Option<&'a StyleDeclaration> {
    // The cascade chain always starts at the active breakpoint
    let chain = match mode {
        ReadMode::Cascade => breakpoint.cascade(),
        ReadMode::Raw => &breakpoint.cascade()[..1],
    };

    chain.iter().find_map(|bp| record.bucket(*bp).get(key))
}

/// Read one value.
///
/// ```
/// use costered::style::{get, Breakpoint, ReadOptions, StyleDeclaration, StyleRecord};
///
/// let mut record = StyleRecord::new();
/// record.desktop.styles.push(StyleDeclaration::new("width", "80rem"));
///
/// let value = get(&record, "width", ReadOptions::cascade(Breakpoint::Mobile));
/// assert_eq!(value.map(|v| v.to_string()).as_deref(), Some("80rem"));
/// assert!(get(&record, "width", ReadOptions::raw(Breakpoint::Mobile)).is_none());
/// ```
pub fn get<'a>(record: &'a StyleRecord, key: &str, options: ReadOptions) -> Option<&'a StyleValue> {
    resolve(record, options.breakpoint, key, options.mode).map(|d| &d.value)
}

/// Read several values with the same options.
///
/// Keys with no value are left out of the map.
pub fn get_many<'k>(
    record: &StyleRecord,
    keys: impl IntoIterator<Item = &'k str>,
    options: ReadOptions,
) -> BTreeMap<String, StyleValue> {
    keys.into_iter()
        .filter_map(|key| get(record, key, options).map(|v| (key.to_string(), v.clone())))
        .collect()
}
