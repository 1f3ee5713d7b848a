/// Convenience result type used across the crate.
pub type TransitionResult<T> = Result<T, TransitionError>;

/// Top-level error taxonomy used by planner, engine and media APIs.
#[derive(thiserror::Error, Debug)]
pub enum TransitionError {
    /// Invalid user-provided configuration, detected before any frame is processed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while applying frame effects.
    #[error("render error: {0}")]
    Render(String),

    /// Errors from frame/video IO and the external `ffmpeg` tools.
    #[error("media error: {0}")]
    Media(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TransitionError {
    /// Build a [`TransitionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TransitionError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TransitionError::Media`] value.
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`TransitionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
