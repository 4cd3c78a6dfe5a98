//! Start-up configuration shared by the front-ends.
//!
//! The web front-end reads it from the page query string, the native one
//! from its command line. Both end up with the same [`AppConfig`].

use crate::constants::{MAX_SIGNAL_BINS, MIN_SIGNAL_BINS, SIGNAL_BINS};
use crate::error::{LoungeError, Result};
use crate::media::MediaKind;
use std::fmt;
use std::str::FromStr;

/// Which of the three demos to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Floating knowledge nodes with timed insight synthesis.
    #[default]
    Librarian,
    /// Audio file or synthetic signal driving a pulsing core.
    Pulse,
    /// Audio/video file or synthetic signal driving a spectrum ring.
    Spectrum,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Librarian, Variant::Pulse, Variant::Spectrum];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Librarian => "librarian",
            Variant::Pulse => "pulse",
            Variant::Spectrum => "spectrum",
        }
    }

    /// Whether the variant reacts to a signal (and so has a file picker and
    /// a demo button).
    pub fn uses_signal(self) -> bool {
        !matches!(self, Variant::Librarian)
    }

    pub fn accepts(self, kind: MediaKind) -> bool {
        match self {
            Variant::Librarian => false,
            Variant::Pulse => kind == MediaKind::Audio,
            Variant::Spectrum => true,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = LoungeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "librarian" | "1" => Ok(Variant::Librarian),
            "pulse" | "2" => Ok(Variant::Pulse),
            "spectrum" | "3" => Ok(Variant::Spectrum),
            other => Err(LoungeError::UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub variant: Variant,
    /// Seed for the scene layout and discrete events; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Length of the signal snapshot (analyser frequency bin count).
    pub signal_bins: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            seed: None,
            signal_bins: SIGNAL_BINS,
        }
    }
}

impl AppConfig {
    /// Parse `?variant=pulse&seed=7&bins=128`. Unknown keys are ignored.
    pub fn from_query(query: &str) -> Result<Self> {
        let mut config = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "variant" => config.variant = value.parse()?,
                "seed" => {
                    let seed = value.parse::<u64>().map_err(|_| LoungeError::InvalidParam {
                        key: key.to_string(),
                        value: value.to_string(),
                    })?;
                    config.seed = Some(seed);
                }
                "bins" => {
                    let bins = value.parse::<usize>().map_err(|_| LoungeError::InvalidParam {
                        key: key.to_string(),
                        value: value.to_string(),
                    })?;
                    config.signal_bins = bins;
                }
                _ => {}
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let bins = self.signal_bins;
        if !bins.is_power_of_two() || !(MIN_SIGNAL_BINS..=MAX_SIGNAL_BINS).contains(&bins) {
            return Err(LoungeError::InvalidBins(bins));
        }
        Ok(())
    }

    /// FFT size of the analyser that produces `signal_bins` bins.
    pub fn fft_size(&self) -> usize {
        self.signal_bins * 2
    }
}
