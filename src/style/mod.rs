//! Per-breakpoint style records and the cascade over them.
//!
//! This module contains:
//! - The data model ([`StyleRecord`], [`BreakpointBucket`], [`StyleDeclaration`])
//! - The shape normaliser that turns any attribute value into a record
//! - The cascade reader and the raw, non-mutating cascade writer
//! - Scope id generation and sanitisation
//! - Parsing of author-supplied inline declaration blocks

mod cascade;
mod inline;
mod scope;
mod shape;
mod value;
mod writer;

use std::fmt;

use serde_json::{Map, Value};

use crate::config::Config;

pub use cascade::{ReadMode, ReadOptions, get, get_many, resolve};
pub use inline::parse_inline_declarations;
pub use scope::{MAX_SCOPE_ID_LEN, generate_scope_id, sanitize_scope_id};
pub use shape::ensure_shape;
pub use value::{StyleValue, is_absent_text};
pub use writer::CascadeWriter;

/// One of the three responsive tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Breakpoint {
    Desktop,
    Tablet,
    Mobile,
}

impl Breakpoint {
    /// All breakpoints, widest first.
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Desktop, Breakpoint::Tablet, Breakpoint::Mobile];

    /// Parse a breakpoint name (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "desktop" => Some(Self::Desktop),
            "tablet" => Some(Self::Tablet),
            "mobile" => Some(Self::Mobile),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
            Self::Mobile => "mobile",
        }
    }

    /// Lookup order when reading with cascade, starting at this tier.
    ///
    /// The narrowest-to-widest order is `mobile, tablet, desktop`, truncated
    /// so it begins at `self`.
    pub fn cascade(self) -> &'static [Breakpoint] {
        const ORDER: [Breakpoint; 3] = [Breakpoint::Mobile, Breakpoint::Tablet, Breakpoint::Desktop];
        match self {
            Self::Mobile => &ORDER[0..],
            Self::Tablet => &ORDER[1..],
            Self::Desktop => &ORDER[2..],
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical lookup key for a property name.
///
/// `marginTop`, `margin-top` and `MarginTop` all map to `margin-top`, and
/// vendor prefixes written as `WebkitTransform` become `-webkit-transform`.
/// Custom properties (`--foo`) are case-sensitive and returned unchanged.
///
/// ```
/// use costered::style::property_key;
///
/// assert_eq!(property_key("gridTemplateColumns"), "grid-template-columns");
/// assert_eq!(property_key("WebkitLineClamp"), "-webkit-line-clamp");
/// assert_eq!(property_key("--Gap"), "--Gap");
/// ```
pub fn property_key(property: &str) -> String {
    let property = property.trim();
    if property.starts_with("--") {
        return property.to_string();
    }

    let mut key = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            key.push('-');
            key.push(c.to_ascii_lowercase());
        } else if c == '_' {
            key.push('-');
        } else {
            key.push(c);
        }
    }
    key
}

/// A single CSS declaration (property: value).
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDeclaration {
    /// Property name as written by the caller.
    pub property: String,
    pub value: StyleValue,
    pub important: bool,
}

impl StyleDeclaration {
    /// Create a declaration without any normalisation.
    pub fn new(property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important: false,
        }
    }

    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }

    /// Canonical key of this declaration's property.
    pub fn key(&self) -> String {
        property_key(&self.property)
    }

    /// Check whether this declaration addresses `property`.
    pub fn matches(&self, property: &str) -> bool {
        self.key() == property_key(property)
    }

    /// Value as stored on the wire, with the importance folded in.
    fn wire_value(&self) -> Value {
        match (&self.value, self.important) {
            (StyleValue::Number(n), false) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            (value, true) => Value::String(format!("{value} !important")),
            (StyleValue::Text(s), false) => Value::String(s.clone()),
        }
    }
}

/// Declarations for one breakpoint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BreakpointBucket {
    pub styles: Vec<StyleDeclaration>,
}

impl BreakpointBucket {
    /// Find the declaration for a property (camelCase-agnostic).
    pub fn get(&self, property: &str) -> Option<&StyleDeclaration> {
        let key = property_key(property);
        self.styles.iter().find(|d| d.key() == key)
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleDeclaration> {
        self.styles.iter()
    }

    /// Insert or replace a declaration, keeping the original position.
    pub(crate) fn upsert(&mut self, decl: StyleDeclaration) {
        let key = decl.key();
        match self.styles.iter_mut().find(|d| d.key() == key) {
            Some(existing) => *existing = decl,
            None => self.styles.push(decl),
        }
    }

    /// Remove a declaration. The bucket itself stays, even when emptied.
    pub(crate) fn remove(&mut self, property: &str) {
        let key = property_key(property);
        self.styles.retain(|d| d.key() != key);
    }

    fn to_wire(&self) -> Value {
        let styles: Map<String, Value> = self
            .styles
            .iter()
            .map(|d| (d.property.clone(), d.wire_value()))
            .collect();
        let mut bucket = Map::new();
        bucket.insert("styles".to_string(), Value::Object(styles));
        Value::Object(bucket)
    }
}

/// The responsive style record attached to one content node.
///
/// All three buckets are always present. The scope id is seeded by the first
/// write and joins the record to its generated CSS selector.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleRecord {
    pub id: Option<String>,
    pub desktop: BreakpointBucket,
    pub tablet: BreakpointBucket,
    pub mobile: BreakpointBucket,
}

impl StyleRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scope id. Invalid ids are ignored.
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = sanitize_scope_id(id);
        self
    }

    pub fn bucket(&self, breakpoint: Breakpoint) -> &BreakpointBucket {
        match breakpoint {
            Breakpoint::Desktop => &self.desktop,
            Breakpoint::Tablet => &self.tablet,
            Breakpoint::Mobile => &self.mobile,
        }
    }

    pub(crate) fn bucket_mut(&mut self, breakpoint: Breakpoint) -> &mut BreakpointBucket {
        match breakpoint {
            Breakpoint::Desktop => &mut self.desktop,
            Breakpoint::Tablet => &mut self.tablet,
            Breakpoint::Mobile => &mut self.mobile,
        }
    }

    /// True when no bucket holds a declaration.
    pub fn is_empty(&self) -> bool {
        Breakpoint::ALL.iter().all(|bp| self.bucket(*bp).is_empty())
    }

    /// Read a node's attribute record (scope id field plus styles field).
    pub fn from_attributes(attrs: &Value, config: &Config) -> Self {
        let mut record = ensure_shape(attrs.get(&config.styles_field).unwrap_or(&Value::Null));
        record.id = attrs
            .get(&config.scope_id_field)
            .and_then(Value::as_str)
            .and_then(sanitize_scope_id);
        record
    }

    /// Serialise the buckets to the object-map wire shape.
    pub fn to_wire(&self) -> Value {
        let mut map = Map::new();
        for bp in Breakpoint::ALL {
            map.insert(bp.as_str().to_string(), self.bucket(bp).to_wire());
        }
        Value::Object(map)
    }

    /// Serialise to the attribute fields the host persists.
    pub fn to_attributes(&self, config: &Config) -> Value {
        let mut map = Map::new();
        if let Some(id) = &self.id {
            map.insert(config.scope_id_field.clone(), Value::String(id.clone()));
        }
        map.insert(config.styles_field.clone(), self.to_wire());
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cascade_order() {
        assert_eq!(
            Breakpoint::Mobile.cascade(),
            &[Breakpoint::Mobile, Breakpoint::Tablet, Breakpoint::Desktop]
        );
        assert_eq!(
            Breakpoint::Tablet.cascade(),
            &[Breakpoint::Tablet, Breakpoint::Desktop]
        );
        assert_eq!(Breakpoint::Desktop.cascade(), &[Breakpoint::Desktop]);
    }

    #[test]
    fn test_parse_breakpoint() {
        assert_eq!(Breakpoint::parse("Tablet"), Some(Breakpoint::Tablet));
        assert_eq!(Breakpoint::parse(" mobile "), Some(Breakpoint::Mobile));
        assert_eq!(Breakpoint::parse("watch"), None);
    }

    #[test]
    fn test_property_key() {
        assert_eq!(property_key("marginTop"), "margin-top");
        assert_eq!(property_key("margin-top"), "margin-top");
        assert_eq!(property_key("zIndex"), "z-index");
        assert_eq!(property_key("--brandColor"), "--brandColor");
    }

    #[test]
    fn test_bucket_matching_is_case_agnostic() {
        let bucket = BreakpointBucket {
            styles: vec![StyleDeclaration::new("marginTop", "1rem")],
        };
        assert!(bucket.get("margin-top").is_some());
        assert!(bucket.get("marginTop").is_some());
        assert!(bucket.get("marginBottom").is_none());
    }

    #[test]
    fn test_upsert_keeps_position() {
        let mut bucket = BreakpointBucket::default();
        bucket.upsert(StyleDeclaration::new("width", "1px"));
        bucket.upsert(StyleDeclaration::new("color", "red"));
        bucket.upsert(StyleDeclaration::new("width", "2px"));
        assert_eq!(bucket.len(), 2);
        assert_eq!(bucket.styles[0].value, StyleValue::from("2px"));
    }

    #[test]
    fn test_to_wire_shape() {
        let mut record = StyleRecord::new().with_id("abc");
        record.desktop.upsert(StyleDeclaration::new("width", "80rem"));
        record
            .mobile
            .upsert(StyleDeclaration::new("opacity", 0.5).important());

        assert_eq!(
            record.to_wire(),
            json!({
                "desktop": { "styles": { "width": "80rem" } },
                "tablet": { "styles": {} },
                "mobile": { "styles": { "opacity": "0.5 !important" } },
            })
        );
    }

    #[test]
    fn test_attributes_roundtrip() {
        let config = Config::default();
        let mut record = StyleRecord::new().with_id("node-1");
        record.tablet.upsert(StyleDeclaration::new("gap", "2rem"));

        let attrs = record.to_attributes(&config);
        assert_eq!(attrs["costeredId"], "node-1");
        assert_eq!(StyleRecord::from_attributes(&attrs, &config), record);
    }

    #[test]
    fn test_empty_record() {
        assert!(StyleRecord::new().is_empty());
        let mut record = StyleRecord::new();
        record.tablet.upsert(StyleDeclaration::new("gap", "1px"));
        assert!(!record.is_empty());
    }
}
