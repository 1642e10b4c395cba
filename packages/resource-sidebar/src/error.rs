//! Error types for the sidebar.

use resource_types::DraftError;
use std::fmt;

/// Sidebar error type.
#[derive(Debug)]
pub enum Error {
    /// Configuration error.
    Config(String),
    /// Draft rejected locally; no request was sent.
    Draft(DraftError),
    /// Delete requested without a stored resource id.
    MissingId,
    /// Delete not confirmed by the user.
    Declined,
    /// Backend or image host request failed.
    Http(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Draft(err) => write!(f, "draft error: {err}"),
            Error::MissingId => write!(f, "missing resource id"),
            Error::Declined => write!(f, "delete not confirmed"),
            Error::Http(msg) => write!(f, "http error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Draft(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DraftError> for Error {
    fn from(err: DraftError) -> Self {
        Error::Draft(err)
    }
}
