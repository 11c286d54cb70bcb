/// Convenience result type used across the crate.
pub type CaptionResult<T> = Result<T, CaptionError>;

/// Top-level error taxonomy used by editor, render and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum CaptionError {
    /// Invalid user-provided style, geometry or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The source image could not be read or decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A drawing surface could not be created for the requested size.
    #[error("surface error: {0}")]
    Surface(String),

    /// The composited frame could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// No usable font face could be resolved or shaped.
    #[error("font error: {0}")]
    Font(String),

    /// The system clipboard rejected the image.
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// Errors when serializing or deserializing style/config documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CaptionError {
    /// Build a [`CaptionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CaptionError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`CaptionError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`CaptionError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`CaptionError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`CaptionError::Clipboard`] value.
    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::Clipboard(msg.into())
    }

    /// Build a [`CaptionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Short message suitable for a blocking user-facing alert.
    ///
    /// `action` names what the user attempted, e.g. `"Export"` or `"Copy"`.
    pub fn user_message(&self, action: &str) -> String {
        match self {
            Self::Validation(msg) => format!("{action} failed: {msg}"),
            _ => format!("{action} failed. Please try again."),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
