use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use lounge_core::constants::SIGNAL_BINS;
use lounge_core::{
    App, AppConfig, MediaKind, MediaSlot, PcmTap, SharedTap, SpectrumAnalyser, UiUpdate, Variant,
};
use lounge_gfx::GpuState;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

mod audio;
mod title;

use audio::NativeMedia;
use title::TitleReadouts;

/// Audio-reactive 3D visualizers.
#[derive(Parser, Debug)]
#[command(name = "lounge", version)]
struct Cli {
    /// librarian, pulse or spectrum (or 1, 2, 3)
    #[arg(long, default_value = "librarian")]
    variant: Variant,
    /// Seed for layout and synthesis choices
    #[arg(long)]
    seed: Option<u64>,
    /// Analyser frequency bins (power of two, 16..=1024)
    #[arg(long, default_value_t = SIGNAL_BINS)]
    bins: usize,
    /// WAV file to play; repeat to queue several (Tab cycles)
    #[arg(long = "file")]
    files: Vec<PathBuf>,
    /// Start in demo mode with the synthetic signal
    #[arg(long)]
    demo: bool,
    /// Start with microphone capture
    #[arg(long, conflicts_with = "demo")]
    mic: bool,
}

impl Cli {
    fn config(&self) -> AppConfig {
        AppConfig {
            variant: self.variant,
            seed: self.seed,
            signal_bins: self.bins,
        }
    }
}

/// Everything the event loop mutates besides the renderer.
struct Session {
    app: App,
    media: MediaSlot<NativeMedia>,
    tap: SharedTap,
    files: Vec<PathBuf>,
    next_file: usize,
    query: String,
    readouts: TitleReadouts,
    ui: Vec<UiUpdate>,
    started: Instant,
    last_frame: Instant,
}

impl Session {
    fn new(app: App, files: Vec<PathBuf>) -> Self {
        let tap = PcmTap::shared(app.config().fft_size() * 2);
        let mut ui = Vec::new();
        app.initial_updates(&mut ui);
        let now = Instant::now();
        Self {
            app,
            media: MediaSlot::default(),
            tap,
            files,
            next_file: 0,
            query: String::new(),
            readouts: TitleReadouts::default(),
            ui,
            started: now,
            last_frame: now,
        }
    }

    /// Run one frame pass. Returns true when the title needs refreshing.
    fn frame(&mut self) -> bool {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;
        self.app.frame(dt, &mut self.ui);
        self.drain_ui()
    }

    fn drain_ui(&mut self) -> bool {
        self.readouts.apply(&mut self.ui, self.started.elapsed())
    }

    fn title(&self) -> String {
        self.readouts.title(self.app.variant(), &self.query)
    }

    fn go_live(&mut self, open: impl FnOnce(SharedTap) -> anyhow::Result<NativeMedia>) {
        let tap = self.tap.clone();
        let started = self
            .media
            .replace_with(|| open(tap))
            .and_then(|media| media.play().map(|()| media.label().to_string()));
        let result = started.and_then(|label| {
            let analyser = SpectrumAnalyser::new(self.tap.clone(), self.app.config().fft_size());
            self.app
                .go_live(Box::new(analyser), MediaKind::Audio, &label, &mut self.ui)
                .map_err(anyhow::Error::from)
        });
        if let Err(e) = result {
            log::error!("[media] {e:#}");
            self.media.teardown();
            self.app.media_failed(&mut self.ui);
        }
    }

    fn play_next_file(&mut self) {
        if self.files.is_empty() {
            log::debug!("[media] no --file given");
            return;
        }
        let path = self.files[self.next_file % self.files.len()].clone();
        self.next_file += 1;
        self.go_live(|tap| audio::open_wav(&path, tap));
    }

    fn start_microphone(&mut self) {
        self.go_live(audio::open_microphone);
    }

    fn enter_demo(&mut self) {
        self.media.teardown();
        self.app.enter_demo(&mut self.ui);
    }

    /// Returns true when the title should be refreshed right away.
    fn on_key(&mut self, event: &KeyEvent) -> bool {
        if event.state != ElementState::Pressed {
            return false;
        }
        if self.app.variant().uses_signal() {
            match &event.logical_key {
                Key::Character(c) if c.eq_ignore_ascii_case("d") => self.enter_demo(),
                Key::Character(c) if c.eq_ignore_ascii_case("m") => self.start_microphone(),
                Key::Named(NamedKey::Tab) => self.play_next_file(),
                _ => return false,
            }
            self.drain_ui();
            return true;
        }
        match &event.logical_key {
            Key::Named(NamedKey::Enter) => {
                let query = std::mem::take(&mut self.query);
                self.app.submit_query(&query, &mut self.ui);
                self.drain_ui();
            }
            Key::Named(NamedKey::Backspace) => {
                self.query.pop();
            }
            Key::Named(NamedKey::Space) => self.query.push(' '),
            Key::Character(c) => self.query.push_str(c),
            _ => return false,
        }
        true
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let app = App::new(cli.config())?;
    let mut session = Session::new(app, cli.files.clone());
    if cli.demo {
        session.enter_demo();
    } else if cli.mic {
        session.start_microphone();
    } else if !cli.files.is_empty() {
        session.play_next_file();
    }

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(format!("lounge · {}", cli.variant))
        .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0))
        .build(&event_loop)?;
    let window = &window;
    let size = window.inner_size();
    let mut gpu = pollster::block_on(GpuState::new(window, size.width, size.height))?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => gpu.resize_if_needed(size.width, size.height),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event: WindowEvent::KeyboardInput { event, .. },
            ..
        } => {
            if event.state == ElementState::Pressed
                && event.logical_key == Key::Named(NamedKey::Escape)
            {
                elwt.exit();
            } else if session.on_key(&event) {
                window.set_title(&session.title());
            }
        }
        Event::AboutToWait => {
            if session.frame() {
                window.set_title(&session.title());
            }
            match gpu.render(session.app.scene()) {
                Ok(()) => window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("[gpu] frame skipped: {e:?}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lounge_core::app::{DEMO_STATUS, IDLE_STATUS};
    use lounge_core::{SignalMode, UiField};

    #[test]
    fn cli_builds_a_valid_config() {
        let cli = Cli::parse_from([
            "lounge", "--variant", "spectrum", "--seed", "9", "--bins", "64",
        ]);
        let config = cli.config();
        assert_eq!(config.variant, Variant::Spectrum);
        assert_eq!(config.seed, Some(9));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn cli_accepts_numbered_variants_and_repeated_files() {
        let cli = Cli::parse_from([
            "lounge", "--variant", "2", "--file", "a.wav", "--file", "b.wav",
        ]);
        assert_eq!(cli.variant, Variant::Pulse);
        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.bins, SIGNAL_BINS);
    }

    #[test]
    fn demo_and_mic_conflict() {
        assert!(Cli::try_parse_from(["lounge", "--demo", "--mic"]).is_err());
    }

    fn session(variant: Variant) -> Session {
        let config = AppConfig {
            variant,
            seed: Some(1),
            ..AppConfig::default()
        };
        Session::new(App::new(config).unwrap(), Vec::new())
    }

    #[test]
    fn demo_frames_fill_the_readouts() {
        let mut session = session(Variant::Pulse);
        session.enter_demo();
        session.frame();
        assert_eq!(session.readouts.get(UiField::SystemState), DEMO_STATUS);
        assert_ne!(session.readouts.get(UiField::Amplitude), "0.0");
        assert!(session.title().contains("amp "));
    }

    #[test]
    fn failed_input_drops_a_live_signal_to_idle() {
        let mut session = session(Variant::Pulse);
        let fft_size = session.app.config().fft_size();
        let analyser = SpectrumAnalyser::new(session.tap.clone(), fft_size);
        session
            .app
            .go_live(Box::new(analyser), MediaKind::Audio, "old.wav", &mut session.ui)
            .unwrap();
        session.drain_ui();
        assert_eq!(session.readouts.get(UiField::SystemState), "LIVE // old.wav");

        session.go_live(|_| Err(anyhow::anyhow!("no output device")));
        session.drain_ui();
        assert_eq!(session.app.mode(), SignalMode::Idle);
        assert_eq!(session.app.media_kind(), None);
        assert_eq!(session.readouts.get(UiField::SystemState), IDLE_STATUS);
    }

    #[test]
    fn missing_wav_keeps_the_demo_running() {
        let mut session = session(Variant::Spectrum);
        session.files.push(PathBuf::from("/nonexistent/lounge-test.wav"));
        session.enter_demo();
        session.play_next_file();
        assert_eq!(session.app.mode(), SignalMode::Synthetic);
        assert_eq!(session.next_file, 1);
    }

    #[test]
    fn query_typing_and_submit() {
        let config = AppConfig {
            seed: Some(1),
            ..AppConfig::default()
        };
        let mut session = Session::new(App::new(config).unwrap(), Vec::new());
        session.query.push_str("bees");
        let query = std::mem::take(&mut session.query);
        session.app.submit_query(&query, &mut session.ui);
        session.drain_ui();
        assert!(session.title().contains("ANALYZING: bees..."));
        assert!(session.query.is_empty());
    }
}
