//! Shape normalisation for attribute values.
//!
//! Editor attributes arrive in several historical shapes. [`ensure_shape`] is
//! the single place that turns any of them into a [`StyleRecord`] with all three
//! buckets present; everything downstream can rely on that invariant.

use serde_json::{Map, Value};

use super::{Breakpoint, BreakpointBucket, StyleDeclaration, StyleRecord};

/// Normalise an attribute value into a record with three buckets.
///
/// Accepted inputs:
/// - `null` or any non-object value: an empty record
/// - a legacy flat map `{ "width": "10px" }`: lifted into the desktop bucket
/// - `{ "desktop": {...}, "tablet": {...}, "mobile": {...} }` where each bucket
///   holds `styles` as either a property map or a declaration list
///
/// Absent values are dropped and duplicate properties collapse (last wins).
/// The returned record has no scope id; see [`StyleRecord::from_attributes`].
///
/// ```
/// use costered::style::{ensure_shape, Breakpoint};
/// use serde_json::json;
///
/// let record = ensure_shape(&json!({ "width": "10px" }));
/// assert_eq!(record.desktop.len(), 1);
/// assert!(record.bucket(Breakpoint::Mobile).is_empty());
/// ```
pub fn ensure_shape(input: &Value) -> StyleRecord {
    let Some(map) = input.as_object() else {
        return StyleRecord::default();
    };

    let has_breakpoints = Breakpoint::ALL
        .iter()
        .any(|bp| map.contains_key(bp.as_str()));

    if !has_breakpoints {
        return StyleRecord {
            desktop: bucket_from_map(map),
            ..StyleRecord::default()
        };
    }

    let mut record = StyleRecord::default();
    for bp in Breakpoint::ALL {
        if let Some(bucket) = map.get(bp.as_str()) {
            *record.bucket_mut(bp) = normalize_bucket(bucket);
        }
    }
    record
}

fn normalize_bucket(bucket: &Value) -> BreakpointBucket {
    let Some(map) = bucket.as_object() else {
        return BreakpointBucket::default();
    };

    match map.get("styles") {
        Some(Value::Object(styles)) => bucket_from_map(styles),
        Some(Value::Array(list)) => bucket_from_list(list),
        Some(_) => BreakpointBucket::default(),
        // A bucket without `styles` is treated as a bare property map
        None => bucket_from_map(map),
    }
}

fn bucket_from_map(map: &Map<String, Value>) -> BreakpointBucket {
    let mut bucket = BreakpointBucket::default();
    for (property, value) in map {
        if let Some(decl) = StyleDeclaration::from_wire(property, value) {
            bucket.upsert(decl);
        }
    }
    bucket
}

fn bucket_from_list(list: &[Value]) -> BreakpointBucket {
    let mut bucket = BreakpointBucket::default();
    for item in list {
        let Some(property) = item.get("property").and_then(Value::as_str) else {
            continue;
        };
        let Some(decl) =
            StyleDeclaration::from_wire(property, item.get("value").unwrap_or(&Value::Null))
        else {
            continue;
        };
        if item.get("important").and_then(Value::as_bool) == Some(true) {
            bucket.upsert(decl.into_important());
        } else {
            bucket.upsert(decl);
        }
    }
    bucket
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleValue;
    use proptest::prelude::*;
    use serde_json::json;

    fn assert_three_buckets(record: &StyleRecord) {
        for bp in Breakpoint::ALL {
            // Accessing each bucket must never fail; the list exists even when empty
            let _ = record.bucket(bp).styles.len();
        }
    }

    #[test]
    fn test_null_and_malformed() {
        for input in [json!(null), json!(42), json!("x"), json!([1, 2]), json!(true)] {
            let record = ensure_shape(&input);
            assert_three_buckets(&record);
            assert!(record.is_empty());
        }
    }

    #[test]
    fn test_legacy_flat_map_lifts_to_desktop() {
        let record = ensure_shape(&json!({ "width": "80rem", "zIndex": 3, "color": "" }));
        assert_eq!(record.desktop.len(), 2);
        assert_eq!(
            record.desktop.get("z-index").map(|d| &d.value),
            Some(&StyleValue::Number(3.0))
        );
        assert!(record.tablet.is_empty());
        assert!(record.mobile.is_empty());
    }

    #[test]
    fn test_proper_shape_object_styles() {
        let record = ensure_shape(&json!({
            "desktop": { "styles": { "width": "80rem" } },
            "tablet": { "styles": { "width": "60rem" } },
        }));
        assert_eq!(record.desktop.len(), 1);
        assert_eq!(record.tablet.len(), 1);
        assert!(record.mobile.is_empty());
    }

    #[test]
    fn test_declaration_list_styles() {
        let record = ensure_shape(&json!({
            "mobile": { "styles": [
                { "property": "gap", "value": "1rem" },
                { "property": "color", "value": "red", "important": true },
                { "property": "width", "value": null },
                { "value": "orphan" },
            ]}
        }));
        assert_eq!(record.mobile.len(), 2);
        assert!(record.mobile.get("color").unwrap().important);
    }

    #[test]
    fn test_malformed_buckets() {
        let record = ensure_shape(&json!({
            "desktop": "nope",
            "tablet": { "styles": 7 },
            "mobile": null,
        }));
        assert_three_buckets(&record);
        assert!(record.is_empty());
    }

    #[test]
    fn test_does_not_mutate_input() {
        let input = json!({ "desktop": { "styles": { "width": " 1px " } } });
        let before = input.clone();
        let _ = ensure_shape(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn test_idempotent_through_wire() {
        let record = ensure_shape(&json!({
            "desktop": { "styles": { "width": "80rem", "opacity": 0.5 } },
            "mobile": { "styles": [{ "property": "color", "value": "red", "important": true }] },
        }));
        assert_eq!(ensure_shape(&record.to_wire()), record);
    }

    #[test]
    fn test_flagged_number_in_list_is_canonical() {
        let record = ensure_shape(&json!({
            "desktop": { "styles": [{ "property": "opacity", "value": 0.5, "important": true }] },
        }));
        let decl = record.desktop.get("opacity").unwrap();
        assert_eq!(decl.value, StyleValue::from("0.5"));
        assert!(decl.important);
        assert_eq!(ensure_shape(&record.to_wire()), record);
    }

    fn wire_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            Just(json!("null")),
            Just(json!("")),
            "[a-z0-9 ]{0,8}".prop_map(Value::String),
            "[a-z0-9]{1,6} !important".prop_map(Value::String),
            (-1000i32..1000).prop_map(|n| json!(n)),
            (-1.0e6f64..1.0e6).prop_map(|n| json!(n)),
            Just(json!(true)),
        ]
    }

    // Includes unitless names so numbers survive normalisation as numbers
    fn wire_property() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-zA-Z]{1,10}",
            Just("opacity".to_string()),
            Just("zIndex".to_string()),
        ]
    }

    fn wire_bucket() -> impl Strategy<Value = Value> {
        let map = prop::collection::vec((wire_property(), wire_value()), 0..6).prop_map(
            |entries| {
                let styles: Map<String, Value> = entries.into_iter().collect();
                json!({ "styles": styles })
            },
        );
        let list = prop::collection::vec((wire_property(), wire_value(), any::<bool>()), 0..6)
            .prop_map(|entries| {
                let styles: Vec<Value> = entries
                    .into_iter()
                    .map(|(property, value, important)| {
                        json!({ "property": property, "value": value, "important": important })
                    })
                    .collect();
                json!({ "styles": styles })
            });
        prop_oneof![map, list]
    }

    proptest! {
        #[test]
        fn prop_ensure_shape_is_idempotent(
            desktop in wire_bucket(),
            tablet in wire_bucket(),
            mobile in wire_bucket(),
        ) {
            let input = json!({ "desktop": desktop, "tablet": tablet, "mobile": mobile });
            let once = ensure_shape(&input);
            let twice = ensure_shape(&once.to_wire());
            prop_assert_eq!(once, twice);
        }
    }
}
