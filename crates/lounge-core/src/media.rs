//! Playback element lifecycle.
//!
//! At most one media element is active at a time. Installing a new one
//! always pauses and detaches the previous one first, so no earlier
//! playback keeps its audio routing alive.

use crate::error::{LoungeError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }

    /// Classify a MIME type such as `audio/mpeg` or `video/mp4`.
    pub fn from_mime(mime: &str) -> Result<Self> {
        let top = mime.split('/').next().unwrap_or("").trim();
        match top.to_ascii_lowercase().as_str() {
            "audio" => Ok(MediaKind::Audio),
            "video" => Ok(MediaKind::Video),
            _ => Err(LoungeError::UnsupportedMedia(mime.to_string())),
        }
    }
}

/// A platform playback element that can be stopped and unhooked from the
/// analysis graph.
pub trait MediaElement {
    fn kind(&self) -> MediaKind;
    fn pause(&mut self);
    /// Disconnect from the audio graph and release the decoded source.
    fn detach(&mut self);
}

/// Holds the single active media element.
pub struct MediaSlot<M: MediaElement> {
    active: Option<M>,
}

impl<M: MediaElement> Default for MediaSlot<M> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<M: MediaElement> MediaSlot<M> {
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn kind(&self) -> Option<MediaKind> {
        self.active.as_ref().map(|m| m.kind())
    }

    /// Pause and detach the active element, if any. Returns whether one was
    /// torn down.
    pub fn teardown(&mut self) -> bool {
        match self.active.take() {
            Some(mut prev) => {
                prev.pause();
                prev.detach();
                log::info!("[media] released previous {} element", prev.kind().label());
                true
            }
            None => false,
        }
    }

    /// Tear down the active element, then build and install the next one.
    /// When construction fails the slot stays empty and the error is
    /// returned to the caller.
    pub fn replace_with<E>(
        &mut self,
        build: impl FnOnce() -> std::result::Result<M, E>,
    ) -> std::result::Result<&mut M, E> {
        self.teardown();
        let next = build()?;
        Ok(self.active.insert(next))
    }
}
