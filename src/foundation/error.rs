/// Convenience result type used across the crate.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Rendering favors graceful degradation: the only condition that rejects a
/// row outright is a missing required field ([`CardError::Validation`]).
/// Everything else either degrades (placeholder avatars, skipped text) or is
/// a defined semantic (non-numeric scores render as a dash).
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Invalid caller-provided row or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A font face could not be registered from the supplied bytes.
    #[error("font error: {0}")]
    Font(String),

    /// Errors while rasterizing a composed card plan.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`CardError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
