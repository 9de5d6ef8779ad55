//! Grid codec tests through the public API, combining the template, area and
//! placement codecs the way the layout controls do.

use costered::grid::{
    GridAxisModel, GridLine, PlacementMode, SimplePlacement, area_bounds, compose_placement,
    compose_placement_simple, count_tracks, decode_axis, ensure_size, is_valid_area_name,
    make_repeat, parse_areas, parse_placement, parse_placement_simple, placement_from_bounds,
    serialise_areas, summarize_tracks,
};

#[test]
fn test_repeat_round_trip() {
    let template = make_repeat(5, "1fr").unwrap();
    assert_eq!(
        decode_axis(&template),
        GridAxisModel::Simple {
            count: 5,
            unit: "1fr".to_string()
        }
    );
    assert_eq!(decode_axis(&template).to_template(), template);
    assert!(make_repeat(0, "1fr").is_none());
}

#[test]
fn test_track_counting() {
    assert_eq!(count_tracks("repeat(3, minmax(100px,1fr)) 2fr"), 4);
    assert_eq!(count_tracks("[a] 100px [b] repeat(2, [c] 1fr 2fr) [d]"), 5);
    assert_eq!(count_tracks(""), 0);

    let summary = summarize_tracks("repeat(auto-fill, minmax(10rem, 1fr))");
    assert_eq!(summary.count, 0);
    assert_eq!(summary.unit.as_deref(), Some("minmax(10rem, 1fr)"));
}

#[test]
fn test_unparseable_templates_stay_raw() {
    let raw = "repeat(2, 1fr";
    let model = decode_axis(raw);
    assert!(model.is_raw());
    assert_eq!(model.to_template(), raw);
}

#[test]
fn test_editor_grid_resize_keeps_areas() {
    let matrix = parse_areas(r#""head head" "side main""#);
    let grown = ensure_size(&matrix, 3, 3, ".");
    assert_eq!(
        serialise_areas(&grown),
        r#""head head ." "side main ." ". . .""#
    );

    let shrunk = ensure_size(&grown, 1, 1, ".");
    assert_eq!(serialise_areas(&shrunk), r#""head""#);
    assert_eq!(serialise_areas(&ensure_size(&[], 3, 2, ".")), "");
}

#[test]
fn test_area_to_placement() {
    let matrix = parse_areas(r#""head head head" "side main main" "side main main""#);
    let main = area_bounds(&matrix, "main").unwrap();
    assert_eq!(
        placement_from_bounds(&main),
        ("2 / span 2".to_string(), "2 / span 2".to_string())
    );

    let head = area_bounds(&matrix, "head").unwrap();
    assert_eq!(
        placement_from_bounds(&head),
        ("1 / span 3".to_string(), "1".to_string())
    );
}

#[test]
fn test_simple_placement_round_trip() {
    for value in ["2", "2 / span 3", "auto / span 2", "span 4", "3 / 6", "-1"] {
        let parsed = parse_placement_simple(value);
        let composed = compose_placement_simple(parsed.start, parsed.span, true);
        assert_eq!(parse_placement_simple(&composed), parsed, "{value}");
    }
    assert_eq!(compose_placement_simple(2, 1, true), "2");
    assert_eq!(compose_placement_simple(2, 1, false), "2 / span 1");
}

#[test]
fn test_zero_never_written() {
    assert_eq!(compose_placement_simple(0, 0, true), "auto / span 1");
    assert_eq!(
        parse_placement_simple("0 / span 0"),
        SimplePlacement { start: 1, span: 1 }
    );

    let p = parse_placement("0 / 0");
    assert_eq!(p.start, GridLine::Auto);
    assert_eq!(p.end, None);
    assert_eq!(compose_placement(&p, PlacementMode::Span, 1), "auto");
}

#[test]
fn test_negative_spans() {
    // Basic controls clamp, advanced controls keep them
    assert_eq!(parse_placement_simple("3 / span -2").span, 1);
    let p = parse_placement("3 / span -2");
    assert_eq!(p.span, Some(-2));
    assert_eq!(compose_placement(&p, PlacementMode::Span, 1), "3 / span -2");
}

#[test]
fn test_area_names() {
    assert!(is_valid_area_name("sidebar"));
    assert!(!is_valid_area_name("auto"));
    assert!(!is_valid_area_name("1col"));
    assert!(!is_valid_area_name(""));
}
