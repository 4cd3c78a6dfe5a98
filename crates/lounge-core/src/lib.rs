pub mod analyser;
pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod insight;
pub mod mapping;
pub mod media;
pub mod scene;
pub mod scheduler;
pub mod signal;
pub mod state;
pub mod ui;
pub mod variants;

pub use analyser::{PcmTap, SharedTap, SpectrumAnalyser};
pub use app::App;
pub use config::{AppConfig, Variant};
pub use error::{LoungeError, Result};
pub use media::{MediaElement, MediaKind, MediaSlot};
pub use scene::*;
pub use scheduler::{FrameClock, Scheduler, StepScheduler};
pub use signal::{FrequencyAnalyser, SignalMode, SignalSnapshot, SignalSource, SyntheticWave};
pub use state::Camera;
pub use ui::{UiField, UiUpdate};
