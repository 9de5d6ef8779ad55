//! CSS grid template, area and placement codecs.
//!
//! This module contains:
//! - Axis templates (`grid-template-columns/rows`): decode, encode, count tracks
//! - Area matrices (`grid-template-areas`): parse, serialise, resize, locate
//! - Placement shorthands (`grid-column/row`) and `grid-area` name checks
//!
//! None of these fail: input they do not understand is kept verbatim or
//! replaced with a safe default.

mod areas;
mod axis;
mod placement;
mod tokens;

pub use areas::{
    AreaBounds, AreaMatrix, EMPTY_AREA, area_bounds, area_names, ensure_size, parse_areas,
    serialise_areas,
};
pub use axis::{
    AutoRepeat, GridAxisModel, TrackSummary, count_tracks, make_repeat, summarize_tracks,
};
pub use placement::{
    GridLine, PlacementMode, PlacementShorthand, SimplePlacement, compose_placement,
    compose_placement_simple, is_valid_area_name, parse_placement, parse_placement_simple,
    placement_from_bounds,
};
pub use tokens::split_tracks;

/// Decode one axis template (alias of [`GridAxisModel::decode`]).
pub fn decode_axis(template: &str) -> GridAxisModel {
    GridAxisModel::decode(template)
}
