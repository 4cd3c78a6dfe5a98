use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoungeError {
    #[error("unknown variant `{0}` (expected librarian, pulse or spectrum)")]
    UnknownVariant(String),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidParam { key: String, value: String },
    #[error("signal bins must be a power of two in 16..=1024, got {0}")]
    InvalidBins(usize),
    #[error("unsupported media type `{0}`")]
    UnsupportedMedia(String),
    #[error("{variant} does not play {kind} media")]
    MediaNotAccepted {
        variant: &'static str,
        kind: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, LoungeError>;
