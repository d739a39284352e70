/// Convenience result type used across bezconv.
pub type CurveResult<T> = Result<T, CurveError>;

/// Top-level error taxonomy used by curve APIs.
///
/// Numerical quality is never reported here: conversions degrade through RMSE gates and
/// iteration caps instead. Errors are reserved for malformed inputs and broken invariants.
#[derive(thiserror::Error, Debug)]
pub enum CurveError {
    /// Malformed curve shape or invalid caller-provided parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// A conversion step produced a candidate that could not be assembled.
    #[error("conversion error: {0}")]
    Conversion(String),

    /// Errors when serializing or deserializing curve data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CurveError {
    /// Build a [`CurveError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CurveError::Conversion`] value.
    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion(msg.into())
    }

    /// Build a [`CurveError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CurveError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
