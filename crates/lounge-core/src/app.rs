//! Application state owned by the frame scheduler.
//!
//! One `App` per page or window. Front-ends call [`App::frame`] once per
//! refresh and forward user actions to the other methods; everything they
//! need to display comes back as [`UiUpdate`]s or through [`App::scene`].

use crate::config::{AppConfig, Variant};
use crate::constants::CLEAR_COLOR;
use crate::error::{LoungeError, Result};
use crate::media::MediaKind;
use crate::scene::Scene;
use crate::signal::{FrequencyAnalyser, SignalMode, SignalSnapshot, SignalSource};
use crate::ui::{format_amplitude, format_frequency, ReadoutClock, UiField, UiUpdate};
use crate::variants::{self, FrameCtx, Visualizer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

pub const IDLE_STATUS: &str = "IDLE // SELECT A FILE OR START DEMO";
pub const DEMO_STATUS: &str = "DEMO // SYNTHETIC SIGNAL";

pub struct App {
    config: AppConfig,
    visualizer: Box<dyn Visualizer>,
    scene: Scene,
    signal: SignalSource,
    snapshot: SignalSnapshot,
    time: f32,
    rng: StdRng,
    clock: ReadoutClock,
    media: Option<MediaKind>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut visualizer = variants::for_config(&config);
        let scene = visualizer.build(&mut rng);
        log::info!(
            "[app] {} ready: {} objects, {} signal bins",
            config.variant,
            scene.objects.len(),
            config.signal_bins
        );
        Ok(Self {
            snapshot: SignalSnapshot::zeroed(config.signal_bins),
            config,
            visualizer,
            scene,
            signal: SignalSource::default(),
            time: 0.0,
            rng,
            clock: ReadoutClock::default(),
            media: None,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn snapshot(&self) -> &SignalSnapshot {
        &self.snapshot
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn mode(&self) -> SignalMode {
        self.signal.mode()
    }

    pub fn media_kind(&self) -> Option<MediaKind> {
        self.media
    }

    /// Readouts to show before the first frame.
    pub fn initial_updates(&self, ui: &mut Vec<UiUpdate>) {
        if self.variant().uses_signal() {
            ui.push(UiUpdate::text(UiField::SystemState, IDLE_STATUS));
        }
    }

    /// One mapping pass. `dt` is the real time since the previous pass.
    pub fn frame(&mut self, dt: Duration, ui: &mut Vec<UiUpdate>) {
        self.time += self.visualizer.time_step(dt);
        self.signal.poll(self.time, &mut self.snapshot);
        self.scene.age_connectors(dt);

        let mut ctx = FrameCtx {
            scene: &mut self.scene,
            snapshot: &self.snapshot,
            time: self.time,
            dt,
            rng: &mut self.rng,
            ui: &mut *ui,
        };
        self.visualizer.update(&mut ctx);

        if self.variant().uses_signal() {
            ui.push(UiUpdate::text(
                UiField::Amplitude,
                format_amplitude(self.snapshot.amplitude()),
            ));
            ui.push(UiUpdate::text(
                UiField::Frequency,
                format_frequency(self.snapshot.frequency()),
            ));
        }
        if self.clock.tick(dt) {
            ui.push(UiUpdate::ClockTick);
        }
    }

    pub fn submit_query(&mut self, text: &str, ui: &mut Vec<UiUpdate>) {
        self.visualizer.submit_query(text, &mut self.scene, &mut self.rng, ui);
    }

    /// Whether this variant can play `kind`. Front-ends check before they
    /// build a playback element.
    pub fn check_media(&self, kind: MediaKind) -> Result<()> {
        if self.variant().accepts(kind) {
            Ok(())
        } else {
            Err(LoungeError::MediaNotAccepted {
                variant: self.variant().name(),
                kind: kind.label(),
            })
        }
    }

    /// Switch to live analysis of freshly started playback.
    pub fn go_live(
        &mut self,
        analyser: Box<dyn FrequencyAnalyser>,
        kind: MediaKind,
        label: &str,
        ui: &mut Vec<UiUpdate>,
    ) -> Result<()> {
        self.check_media(kind)?;
        let prev = self.signal.attach_live(analyser);
        self.on_mode_change(prev);
        self.media = Some(kind);
        self.scene.clear_color = match kind {
            // let the video element behind the canvas show through
            MediaKind::Video => [0.0; 4],
            MediaKind::Audio => CLEAR_COLOR,
        };
        log::info!("[signal] live {} input: {label}", kind.label());
        ui.push(UiUpdate::text(UiField::SystemState, format!("LIVE // {label}")));
        Ok(())
    }

    pub fn enter_demo(&mut self, ui: &mut Vec<UiUpdate>) {
        if !self.variant().uses_signal() {
            log::debug!("[signal] {} has no demo mode", self.variant());
            return;
        }
        let prev = self.signal.enter_synthetic();
        self.on_mode_change(prev);
        self.media = None;
        self.scene.clear_color = CLEAR_COLOR;
        log::info!("[signal] synthetic signal");
        ui.push(UiUpdate::text(UiField::SystemState, DEMO_STATUS));
    }

    /// Playback of a new selection could not start. The previous element
    /// was already torn down, so a live signal has nothing left to read:
    /// drop back to idle. A running demo keeps going.
    pub fn media_failed(&mut self, ui: &mut Vec<UiUpdate>) {
        self.media = None;
        self.scene.clear_color = CLEAR_COLOR;
        if self.signal.mode() != SignalMode::Live {
            return;
        }
        let prev = self.signal.go_idle();
        self.on_mode_change(prev);
        ui.push(UiUpdate::text(UiField::SystemState, IDLE_STATUS));
    }

    fn on_mode_change(&mut self, prev: SignalMode) {
        let mode = self.signal.mode();
        if prev != mode {
            log::debug!("[signal] {} -> {}", prev.label(), mode.label());
            self.time = 0.0;
        }
    }
}
