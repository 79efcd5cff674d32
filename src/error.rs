//! Error types for pdfi.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::address::ObjectAddress;

/// Result type alias for pdfi operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting from a PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// The input file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input file exists but cannot be opened for reading.
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// I/O error while reading the input.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document structure could not be read.
    #[error("PDF parsing error: {0}")]
    Parse(String),

    /// A command-line token is not a valid object address.
    #[error("Malformed object address: {0:?} (expected N or N:G)")]
    MalformedAddress(String),

    /// A well-formed address names an object the document does not contain.
    #[error("Object {0} not found")]
    ReferenceNotFound(ObjectAddress),

    /// A stream's filter chain could not be decoded.
    #[error("Failed to decode stream {address}: {message}")]
    Decode {
        address: ObjectAddress,
        message: String,
    },

    /// The command identifier is not one of the known commands.
    #[error("Unrecognized command: {0:?}")]
    UnknownCommand(String),

    /// The command needs more positional arguments than were given.
    #[error("Command {command:?} requires at least {expected} argument(s)")]
    MissingArguments {
        command: &'static str,
        expected: usize,
    },

    /// The byte source was used after being closed.
    #[error("Source is closed")]
    Closed,

    /// Some objects of a batch could not be rendered.
    #[error("{failed} of {total} object(s) could not be rendered")]
    Incomplete { failed: usize, total: usize },

    /// Error while serializing output.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether the CLI should follow this error with the usage text.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::UnknownCommand(_) | Error::MissingArguments { .. }
        )
    }

    /// Map an `io::Error` raised while opening `path`.
    pub(crate) fn from_open(err: io::Error, path: PathBuf) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Error::NotFound(path),
            io::ErrorKind::PermissionDenied => Error::PermissionDenied(path),
            _ => Error::Io(err),
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Parse(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
