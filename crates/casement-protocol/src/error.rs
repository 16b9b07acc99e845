//! Error taxonomy shared by the dispatcher and the registry.

use thiserror::Error;

use crate::id::WindowId;

/// Errors surfaced to command callers.
///
/// Every variant is a normal response value, never fatal: validation errors
/// are produced at the dispatch boundary before any state is touched, and a
/// registry-level [`ControlError::NotFound`] carries no side effects, so the
/// caller is free to retry, ignore, or report upward.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    /// A required argument was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The target id does not resolve to a live window. Recoverable: the
    /// window may simply have closed concurrently.
    #[error("no window with id {0}")]
    NotFound(WindowId),

    /// The command name has no vocabulary entry.
    #[error("method not implemented: {0}")]
    NotImplemented(String),

    /// Native window creation failed.
    #[error("window creation failed: {0}")]
    ResourceExhausted(String),
}

impl ControlError {
    /// Stable discriminant for transports that encode errors by kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::NotImplemented(_) => ErrorKind::NotImplemented,
            Self::ResourceExhausted(_) => ErrorKind::ResourceExhausted,
        }
    }
}

/// The distinguishing kind of a [`ControlError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or malformed argument, including non-positive geometry.
    InvalidArgument,
    /// Unknown target window id.
    NotFound,
    /// Unrecognized command name.
    NotImplemented,
    /// Native resource allocation failed.
    ResourceExhausted,
}

/// A specialized `Result` for protocol and registry operations.
pub type Result<T> = std::result::Result<T, ControlError>;
