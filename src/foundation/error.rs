/// Convenience result type used across the crate.
pub type FcpxResult<T> = Result<T, FcpxError>;

/// Top-level error taxonomy for document IO and timeline conversion.
#[derive(thiserror::Error, Debug)]
pub enum FcpxError {
    /// The byte stream is not well-formed FCPXML (or could not be written as such).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// No project could be resolved from the document.
    #[error("no project found in FCPXML document")]
    NoProjectFound,

    /// A `duration` attribute is not a rational time.
    #[error("malformed duration on <{element}>: '{value}'")]
    MalformedDuration {
        /// Tag of the element carrying the attribute.
        element: &'static str,
        /// Offending attribute text.
        value: String,
    },

    /// A `start` attribute is not a rational time.
    #[error("malformed start on <{element}>: '{value}'")]
    MalformedStart {
        /// Tag of the element carrying the attribute.
        element: &'static str,
        /// Offending attribute text.
        value: String,
    },

    /// The timeline has no root stack to encode.
    #[error("no tracks in timeline")]
    NoTracksInTimeline,

    /// An item being encoded has no computable duration.
    #[error("duration unset on {kind} '{name}'")]
    DurationUnset {
        /// Item kind (`clip`, `gap`, `stack`).
        kind: &'static str,
        /// Item name.
        name: String,
    },

    /// A track holds an item with no FCPXML representation.
    #[error("unsupported item kind: {kind} '{name}'")]
    UnsupportedItemKind {
        /// Item kind.
        kind: &'static str,
        /// Item name.
        name: String,
    },

    /// Errors when serializing or deserializing the timeline model.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FcpxError {
    /// Build a [`FcpxError::MalformedInput`] value.
    pub fn malformed_input(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Build a [`FcpxError::DurationUnset`] value.
    pub fn duration_unset(kind: &'static str, name: impl Into<String>) -> Self {
        Self::DurationUnset {
            kind,
            name: name.into(),
        }
    }

    /// Build a [`FcpxError::UnsupportedItemKind`] value.
    pub fn unsupported_item(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnsupportedItemKind {
            kind,
            name: name.into(),
        }
    }

    /// Build a [`FcpxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
