//! Page element ids and small DOM-independent helpers.
//!
//! Kept free of `web_sys` so the host tests can `include!` it.

use lounge_core::{UiField, Variant};

pub const CANVAS_ID: &str = "lounge-canvas";
pub const FILE_INPUT_ID: &str = "file-input";
pub const DEMO_BUTTON_ID: &str = "demo-btn";
pub const QUERY_INPUT_ID: &str = "query-input";
pub const EVOLVE_BUTTON_ID: &str = "evolve-btn";
/// Container behind the canvas that hosts a playing video element.
pub const VIDEO_LAYER_ID: &str = "video-layer";

/// Backing store is capped at this device pixel ratio.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

pub fn field_id(field: UiField) -> &'static str {
    match field {
        UiField::Amplitude => "amp-val",
        UiField::Frequency => "freq-val",
        UiField::SystemState => "system-state",
        UiField::Clock => "clock",
        UiField::NodeA => "node-a",
        UiField::NodeB => "node-b",
        UiField::NodeResult => "node-result",
        UiField::CurrentInsight => "current-insight",
    }
}

/// Ids of the controls a variant wires up. All must exist on the page.
pub fn control_ids(variant: Variant) -> &'static [&'static str] {
    if variant.uses_signal() {
        &[FILE_INPUT_ID, DEMO_BUTTON_ID]
    } else {
        &[QUERY_INPUT_ID, EVOLVE_BUTTON_ID]
    }
}

/// Value for the file input's `accept` attribute.
pub fn file_accept(variant: Variant) -> &'static str {
    match variant {
        Variant::Spectrum => "audio/*,video/*",
        _ => "audio/*",
    }
}

/// Canvas backing size in physical pixels for a CSS box.
pub fn backing_size(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> (u32, u32) {
    let dpr = device_pixel_ratio.clamp(1.0, MAX_PIXEL_RATIO);
    (
        ((css_width * dpr) as u32).max(1),
        ((css_height * dpr) as u32).max(1),
    )
}
