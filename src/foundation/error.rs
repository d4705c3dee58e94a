/// Convenience result alias used across the crate.
pub type ReelResult<T> = Result<T, ReelError>;

/// Errors produced by capture, record storage and playback.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// A capture run was requested while no subject is loaded in the render context.
    #[error("no subject loaded: load a model before capturing")]
    NoSubject,

    /// Fetching or parsing a stored record failed.
    #[error("failed to load record '{id}': {reason}")]
    RecordLoad {
        /// Subject identifier that was requested.
        id: String,
        /// Human-readable failure reason.
        reason: String,
    },

    /// A record's declared frame count does not match its frame array.
    #[error("corrupt record: {0}")]
    CorruptRecord(String),

    /// Invalid parameters or inputs.
    #[error("validation error: {0}")]
    Validation(String),

    /// The rendering collaborator failed.
    #[error("render error: {0}")]
    Render(String),

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other failure, carried with its source chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::RecordLoad`] value.
    pub fn record_load(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RecordLoad {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`ReelError::CorruptRecord`] value.
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::CorruptRecord(msg.into())
    }

    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Non-fatal annotation attached to an otherwise successful capture run.
///
/// Each listed frame index was stored as an explicit empty string because rendering or
/// rasterization produced nothing for it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartialCaptureWarning {
    /// 0-based indices of the frames that came back empty, in generation order.
    pub frames: Vec<usize>,
}

impl PartialCaptureWarning {
    /// Number of frames affected.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when no frames were affected.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl std::fmt::Display for PartialCaptureWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "partial capture: {} frame(s) came back empty: {:?}",
            self.frames.len(),
            self.frames
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
