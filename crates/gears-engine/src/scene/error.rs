use std::fmt;

/// Failure raised while building or rendering a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A construction parameter was rejected (non-finite scalar, unbounded skew).
    InvalidParameter {
        /// Which parameter, e.g. `"Scaling factor"`.
        what: &'static str,
        value: f32,
    },
    /// The backend could not carry out a command.
    BackendFailure(String),
}

impl SceneError {
    pub(crate) fn backend(msg: impl Into<String>) -> Self {
        Self::BackendFailure(msg.into())
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::InvalidParameter { what, value } => {
                write!(f, "invalid parameter: {what} = {value}")
            }
            SceneError::BackendFailure(msg) => write!(f, "backend failure: {msg}"),
        }
    }
}

impl std::error::Error for SceneError {}

/// Rejects NaN and infinities at construction time.
pub(crate) fn ensure_finite(what: &'static str, value: f32) -> Result<f32, SceneError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SceneError::InvalidParameter { what, value })
    }
}
