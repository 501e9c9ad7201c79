pub type MockupResult<T> = Result<T, MockupError>;

#[derive(thiserror::Error, Debug)]
pub enum MockupError {
    #[error("unsupported product kind: '{kind}' (expected one of mug, canvas, blanket)")]
    UnsupportedProductKind { kind: String },

    #[error("source image unavailable: {url}: {reason}")]
    SourceImageUnavailable { url: String, reason: String },

    #[error("drawing surface unavailable: {0}")]
    DrawingSurfaceUnavailable(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MockupError {
    pub fn unsupported_kind(kind: impl Into<String>) -> Self {
        Self::UnsupportedProductKind { kind: kind.into() }
    }

    pub fn source_unavailable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceImageUnavailable {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn surface(msg: impl Into<String>) -> Self {
        Self::DrawingSurfaceUnavailable(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}
