// Whole-frame behaviour of the three variants through `App`.

use lounge_core::app::{DEMO_STATUS, IDLE_STATUS};
use lounge_core::constants::*;
use lounge_core::insight::INSIGHT_CATALOG;
use lounge_core::mapping::rotation_step;
use lounge_core::scheduler::{Scheduler, StepScheduler};
use lounge_core::variants::pulse;
use lounge_core::{
    App, AppConfig, FrequencyAnalyser, LoungeError, MediaKind, SignalMode, UiField, UiUpdate,
    Variant,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

struct Constant(u8);

impl FrequencyAnalyser for Constant {
    fn read_bytes(&mut self, out: &mut [u8]) {
        out.fill(self.0);
    }
}

fn app(variant: Variant) -> App {
    App::new(AppConfig {
        variant,
        seed: Some(42),
        ..AppConfig::default()
    })
    .unwrap()
}

fn live(app: &mut App, byte: u8) {
    let mut ui = Vec::new();
    app.go_live(Box::new(Constant(byte)), MediaKind::Audio, "test.wav", &mut ui)
        .unwrap();
}

fn text_of(ui: &[UiUpdate], field: UiField) -> Option<&str> {
    ui.iter().rev().find_map(|u| match u {
        UiUpdate::Text { field: f, text } if *f == field => Some(text.as_str()),
        _ => None,
    })
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn idle_app_reports_zero_and_keeps_base_scale() {
    for variant in [Variant::Pulse, Variant::Spectrum] {
        let mut app = app(variant);
        let mut ui = Vec::new();
        app.initial_updates(&mut ui);
        assert_eq!(text_of(&ui, UiField::SystemState), Some(IDLE_STATUS));
        for _ in 0..10 {
            app.frame(FRAME, &mut ui);
        }
        assert_eq!(app.mode(), SignalMode::Idle);
        assert!(app.snapshot().bins().iter().all(|&b| b == 0));
        assert_eq!(text_of(&ui, UiField::Amplitude), Some("0.0"));
        assert_eq!(text_of(&ui, UiField::Frequency), Some("0"));
        for obj in &app.scene().objects {
            assert_eq!(obj.transform.scale, glam::Vec3::ONE);
        }
    }
}

#[test]
fn pulse_full_scale_reaches_configured_maxima() {
    let mut app = app(Variant::Pulse);
    live(&mut app, 255);
    let mut ui = Vec::new();
    app.frame(FRAME, &mut ui);

    assert_eq!(app.snapshot().amplitude(), 255.0);
    assert_eq!(app.snapshot().frequency(), 510.0);
    assert_eq!(text_of(&ui, UiField::Amplitude), Some("255.0"));
    assert_eq!(text_of(&ui, UiField::Frequency), Some("510"));

    let scene = app.scene();
    assert!(close(scene.objects[pulse::CORE].transform.scale.x, 1.0 + PULSE_CORE_SCALE_COEF));
    assert!(close(scene.objects[pulse::SHELL].transform.scale.x, 1.0 + PULSE_SHELL_SCALE_COEF));
    for sat in &scene.objects[pulse::FIRST_SATELLITE..] {
        assert!(close(sat.transform.scale.y, 1.0 + PULSE_SATELLITE_SCALE_COEF));
    }
    assert!(close(scene.lights[0].intensity, PULSE_LIGHT_BASE + PULSE_LIGHT_SPAN));
    assert!(close(scene.post.bloom_strength, 2.4));
    assert!(close(scene.post.bloom_radius, 0.8));
    assert!(close(scene.post.bloom_threshold, 0.2));
}

#[test]
fn pulse_frames_advance_only_the_time_terms() {
    let mut app = app(Variant::Pulse);
    live(&mut app, 200);
    let mut ui = Vec::new();

    app.frame(FRAME, &mut ui);
    let first = app.scene().clone();
    app.frame(FRAME, &mut ui);
    let second = app.scene();

    assert!(close(app.time(), 2.0 * PULSE_TIME_STEP));
    assert_eq!(first.post, second.post);
    assert_eq!(first.lights, second.lights);
    let frequency = app.snapshot().frequency();
    for (i, (a, b)) in first.objects.iter().zip(&second.objects).enumerate() {
        assert_eq!(a.transform.scale, b.transform.scale);
        let step = rotation_step(PULSE_ROT_BASE[0], frequency, PULSE_ROT_FREQ_FACTOR, i);
        assert!(close(b.transform.rotation.x - a.transform.rotation.x, step));
    }
}

#[test]
fn spectrum_full_scale_reaches_configured_maxima() {
    let mut app = app(Variant::Spectrum);
    live(&mut app, 255);
    let mut ui = Vec::new();
    app.frame(Duration::from_millis(20), &mut ui);

    let scene = app.scene();
    assert_eq!(scene.objects.len(), 1 + SPECTRUM_BAR_COUNT);
    assert!(close(scene.objects[0].transform.scale.x, 1.0 + SPECTRUM_SPHERE_SCALE_COEF));
    for bar in &scene.objects[1..] {
        assert!(close(bar.transform.scale.y, 1.0 + SPECTRUM_BAR_COEF));
        assert_eq!(bar.transform.scale.x, 1.0);
    }
    assert!(close(scene.shader.level, 1.0));
    assert!(close(app.time(), 0.02));

    let particles = scene.particles.as_ref().unwrap();
    assert!(close(particles.transform.scale.x, 1.3));
    assert!(close(scene.lights[0].intensity, 0.8 + 3.0));
    assert!(close(scene.lights[1].intensity, 0.5 + 1.5));
    assert!(close(scene.post.bloom_strength, 2.6));
    assert!(close(scene.post.bloom_radius, 1.0));
    assert!(close(scene.post.bloom_threshold, 0.2));
}

#[test]
fn spectrum_video_clears_the_background() {
    let mut app = app(Variant::Spectrum);
    let mut ui = Vec::new();
    app.go_live(Box::new(Constant(10)), MediaKind::Video, "clip.mp4", &mut ui)
        .unwrap();
    assert_eq!(app.scene().clear_color[3], 0.0);
    assert_eq!(app.media_kind(), Some(MediaKind::Video));
    assert_eq!(text_of(&ui, UiField::SystemState), Some("LIVE // clip.mp4"));

    app.enter_demo(&mut ui);
    assert_eq!(app.scene().clear_color, CLEAR_COLOR);
    assert_eq!(app.media_kind(), None);
    assert_eq!(text_of(&ui, UiField::SystemState), Some(DEMO_STATUS));
}

#[test]
fn failed_switch_drops_a_dead_live_signal() {
    let mut app = app(Variant::Spectrum);
    let mut ui = Vec::new();
    app.go_live(Box::new(Constant(200)), MediaKind::Video, "a.mp4", &mut ui)
        .unwrap();
    app.frame(FRAME, &mut ui);
    assert_eq!(app.mode(), SignalMode::Live);

    // the front end has already torn down a.mp4 when b.mp4 fails to play
    app.media_failed(&mut ui);
    assert_eq!(app.mode(), SignalMode::Idle);
    assert_eq!(app.media_kind(), None);
    assert_eq!(app.scene().clear_color, CLEAR_COLOR);
    assert_eq!(text_of(&ui, UiField::SystemState), Some(IDLE_STATUS));
    assert_eq!(app.time(), 0.0);
}

#[test]
fn failed_file_keeps_a_running_demo() {
    let mut app = app(Variant::Pulse);
    let mut ui = Vec::new();
    app.enter_demo(&mut ui);
    app.frame(FRAME, &mut ui);
    ui.clear();

    app.media_failed(&mut ui);
    assert_eq!(app.mode(), SignalMode::Synthetic);
    assert!(app.time() > 0.0);
    assert!(ui.is_empty());
}

#[test]
fn pulse_refuses_video() {
    let mut app = app(Variant::Pulse);
    let mut ui = Vec::new();
    let err = app
        .go_live(Box::new(Constant(10)), MediaKind::Video, "clip.mp4", &mut ui)
        .unwrap_err();
    assert!(matches!(err, LoungeError::MediaNotAccepted { .. }));
    assert_eq!(app.mode(), SignalMode::Idle);
    assert!(ui.is_empty());
}

#[test]
fn switching_signal_mode_resets_time() {
    let mut app = app(Variant::Pulse);
    let mut ui = Vec::new();
    app.enter_demo(&mut ui);
    for _ in 0..5 {
        app.frame(FRAME, &mut ui);
    }
    assert!(app.time() > 0.0);
    assert!(app.snapshot().amplitude() > 0.0);

    // same mode again keeps the counter running
    app.enter_demo(&mut ui);
    assert!(app.time() > 0.0);

    live(&mut app, 0);
    assert_eq!(app.time(), 0.0);
}

#[test]
fn librarian_synthesizes_on_the_first_frame() {
    let mut app = app(Variant::Librarian);
    let mut ui = Vec::new();
    app.frame(FRAME, &mut ui);

    assert_eq!(app.scene().objects.len(), LIBRARIAN_NODE_COUNT);
    assert_eq!(app.scene().connectors.len(), 1);
    let result = text_of(&ui, UiField::NodeResult).unwrap();
    let record = INSIGHT_CATALOG
        .iter()
        .find(|r| r.result == result)
        .expect("result comes from the catalog");
    assert_eq!(text_of(&ui, UiField::NodeA), Some(record.concept_a));
    assert_eq!(text_of(&ui, UiField::NodeB), Some(record.concept_b));
    assert_eq!(
        text_of(&ui, UiField::CurrentInsight),
        Some(format!("SYNTHESIZING: {result}").as_str())
    );
    assert!(ui.contains(&UiUpdate::ClockTick));
    // no signal readouts for the librarian
    assert_eq!(text_of(&ui, UiField::Amplitude), None);
}

#[test]
fn librarian_query_spawns_a_node_and_fires_later() {
    let mut app = app(Variant::Librarian);
    let mut ui = Vec::new();
    app.frame(FRAME, &mut ui);

    ui.clear();
    app.submit_query("", &mut ui);
    assert!(ui.is_empty());
    assert_eq!(app.scene().objects.len(), LIBRARIAN_NODE_COUNT);

    app.submit_query("tidal energy", &mut ui);
    assert_eq!(
        text_of(&ui, UiField::SystemState),
        Some("ANALYZING: tidal energy...")
    );
    assert_eq!(
        text_of(&ui, UiField::CurrentInsight),
        Some("COLLIDING \"tidal energy\" WITH GLOBAL DATA...")
    );
    let scene = app.scene();
    assert_eq!(scene.objects.len(), LIBRARIAN_NODE_COUNT + 1);
    let query = scene.objects.last().unwrap();
    assert_eq!(query.transform.position, glam::Vec3::from(LIBRARIAN_QUERY_POSITION));
    assert_eq!(query.style.color, lounge_core::rgb_hex(LIBRARIAN_QUERY_COLOR));

    // 1.4s: not yet
    for _ in 0..14 {
        app.frame(Duration::from_millis(100), &mut ui);
    }
    assert_eq!(app.scene().connectors.len(), 1);
    app.frame(Duration::from_millis(100), &mut ui);
    assert_eq!(app.scene().connectors.len(), 2);
}

#[test]
fn librarian_connectors_fade_out_and_are_removed() {
    let mut app = app(Variant::Librarian);
    let mut ui = Vec::new();
    app.frame(FRAME, &mut ui);
    app.frame(Duration::from_secs(2), &mut ui);
    let c = &app.scene().connectors[0];
    assert!(close(c.opacity(), 0.5));
    app.frame(Duration::from_secs(2), &mut ui);
    assert!(app.scene().connectors.is_empty());
}

#[test]
fn librarian_nodes_stay_near_their_bounds() {
    let app = Rc::new(RefCell::new(app(Variant::Librarian)));
    let driver = app.clone();
    StepScheduler { frames: 20_000 }.run(Box::new(move || {
        let mut ui = Vec::new();
        driver.borrow_mut().frame(FRAME, &mut ui);
    }));
    let app = app.borrow();
    assert!((app.time() - 20_000.0 * LIBRARIAN_TIME_STEP).abs() < 0.1);
    for node in &app.scene().objects {
        let p = node.transform.position;
        assert!(p.x.abs() <= LIBRARIAN_BOUND_X + LIBRARIAN_DRIFT_RANGE, "x = {}", p.x);
        assert!(p.y.abs() <= LIBRARIAN_BOUND_Y + LIBRARIAN_DRIFT_RANGE, "y = {}", p.y);
    }
}

#[test]
fn librarian_ignores_media_and_demo() {
    let mut app = app(Variant::Librarian);
    let mut ui = Vec::new();
    assert!(app.check_media(MediaKind::Audio).is_err());
    app.enter_demo(&mut ui);
    assert_eq!(app.mode(), SignalMode::Idle);
    assert!(ui.is_empty());
}

#[test]
fn seeded_apps_build_identical_scenes() {
    let a = app(Variant::Pulse);
    let b = app(Variant::Pulse);
    assert_eq!(a.scene(), b.scene());
    assert_eq!(a.scene().particles.as_ref().unwrap().points.len(), PULSE_PARTICLE_COUNT);
}
