use thiserror::Error;

/// Convenient result alias for the wayfinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Required fields were missing or invalid in loaded geometry records,
    /// or the node collection was empty.
    #[error("malformed dataset: {message}")]
    MalformedDataset { message: String },

    /// Raised when a room label could not be matched to any node.
    #[error("unknown room: {name}")]
    UnknownRoom { name: String },

    /// Raised when a requested coordinate falls outside the serviceable area.
    #[error("{endpoint} coordinate is not within the building boundary")]
    OutOfBounds { endpoint: String },

    /// Raised when no traversable route exists between two locations.
    #[error("no path found between {start} and {goal}")]
    NoPathFound { start: String, goal: String },

    /// Raised when a computed route plan lacks any nodes.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a [`Error::MalformedDataset`] with a formatted message.
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedDataset {
            message: message.into(),
        }
    }
}
