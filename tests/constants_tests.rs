// Host-side tests for the page constants.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
#[path = "../src/constants.rs"]
mod constants;

use constants::*;
use lounge_core::{UiField, Variant};
use std::collections::HashSet;

const ALL_FIELDS: [UiField; 8] = [
    UiField::Amplitude,
    UiField::Frequency,
    UiField::SystemState,
    UiField::Clock,
    UiField::NodeA,
    UiField::NodeB,
    UiField::NodeResult,
    UiField::CurrentInsight,
];

#[test]
fn every_element_id_is_distinct() {
    let mut ids: HashSet<&str> = ALL_FIELDS.iter().map(|&f| field_id(f)).collect();
    assert_eq!(ids.len(), ALL_FIELDS.len());
    for id in [
        CANVAS_ID,
        FILE_INPUT_ID,
        DEMO_BUTTON_ID,
        QUERY_INPUT_ID,
        EVOLVE_BUTTON_ID,
        VIDEO_LAYER_ID,
    ] {
        assert!(ids.insert(id), "duplicate id {id}");
    }
}

#[test]
fn readout_ids_match_the_page() {
    assert_eq!(field_id(UiField::Amplitude), "amp-val");
    assert_eq!(field_id(UiField::Frequency), "freq-val");
    assert_eq!(field_id(UiField::CurrentInsight), "current-insight");
    assert_eq!(CANVAS_ID, "lounge-canvas");
}

#[test]
fn controls_follow_the_variant() {
    assert_eq!(
        control_ids(Variant::Librarian),
        &[QUERY_INPUT_ID, EVOLVE_BUTTON_ID]
    );
    for v in [Variant::Pulse, Variant::Spectrum] {
        assert_eq!(control_ids(v), &[FILE_INPUT_ID, DEMO_BUTTON_ID]);
    }
    assert_eq!(file_accept(Variant::Pulse), "audio/*");
    assert!(file_accept(Variant::Spectrum).contains("video/*"));
}

#[test]
fn backing_size_caps_pixel_ratio() {
    assert_eq!(backing_size(800.0, 600.0, 1.0), (800, 600));
    assert_eq!(backing_size(800.0, 600.0, 3.0), (1600, 1200));
    // fractional ratios below one still get a full pixel per CSS pixel
    assert_eq!(backing_size(800.0, 600.0, 0.5), (800, 600));
    assert_eq!(backing_size(0.0, 0.0, 2.0), (1, 1));
}
