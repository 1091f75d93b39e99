//! Error types for the geoplace-tiles crate.

use std::fmt;

/// Result type for placement operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or placing a tileset.
#[derive(Debug)]
pub enum Error {
    /// Reading or writing a file failed.
    Io {
        /// The path that failed.
        path: String,
        /// The error message.
        message: String,
    },
    /// JSON parsing or serialization failed.
    Json {
        /// Context for where the error occurred.
        context: &'static str,
        /// The error message.
        message: String,
    },
    /// A placement configuration field was rejected.
    InvalidConfig {
        /// The offending field.
        field: &'static str,
        /// Description of what was invalid.
        detail: String,
    },
    /// The tileset document is malformed.
    InvalidTileset {
        /// Context for where the error occurred.
        context: &'static str,
        /// Description of what was invalid.
        detail: String,
    },
    /// The bounding volume is none of `sphere`, `box` or `region`.
    UnsupportedBoundingVolume {
        /// The first key of the bounding volume object.
        kind: String,
    },
    /// The scene object's ready notification was dropped without firing.
    NotReady,
    /// Placement produced a transform containing NaN or infinity.
    NonFiniteTransform,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, message } => write!(f, "i/o on {path} failed: {message}"),
            Error::Json { context, message } => {
                write!(f, "failed to process {context} json: {message}")
            }
            Error::InvalidConfig { field, detail } => {
                write!(f, "invalid placement config field {field}: {detail}")
            }
            Error::InvalidTileset { context, detail } => {
                write!(f, "invalid tileset {context}: {detail}")
            }
            Error::UnsupportedBoundingVolume { kind } => {
                write!(f, "unsupported bounding volume: {kind}")
            }
            Error::NotReady => write!(f, "scene object never became ready"),
            Error::NonFiniteTransform => write!(f, "placement produced a non-finite transform"),
        }
    }
}

impl std::error::Error for Error {}
