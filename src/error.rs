//! Error types for path coercion, directory access and handle closure.
//!
//! Each distinguishable cause is a zero-sized struct implementing [`Error`](std::error::Error),
//! composed into enums for static dispatch. The enums convert from their member structs via
//! [`From`], so fallible internals can propagate causes with `?`.

use derive_more::{Display, Error, From};
use libc::{EACCES, ELOOP, EMFILE, ENAMETOOLONG, ENFILE, ENOENT, ENOMEM, ENOTDIR, c_int};

#[derive(Debug, Display, Clone, Copy, Error)]
#[display("path is not valid unicode")]
pub struct NotUnicodeError;

#[derive(Debug, Display, Clone, Copy, Error)]
#[display("path contains an interior nul byte")]
pub struct NulByteError;

#[derive(Debug, Display, Clone, Copy, Error)]
#[display("no directory exists at the provided path")]
pub struct NotFoundError;

#[derive(Debug, Display, Clone, Copy, Error)]
#[display("the provided path is not a directory")]
pub struct NotDirectoryError;

#[derive(Debug, Display, Clone, Copy, Error)]
#[display("search permission is denied for the provided path")]
pub struct PermissionError;

#[derive(Debug, Display, Clone, Copy, Error)]
#[display("exceeded open file limit for the process or system")]
pub struct HandleLimitError;

#[derive(Debug, Display, Clone, Copy, Error)]
#[display("path contains too many symlinks")]
pub struct ExcessiveLinksError;

#[derive(Debug, Display, Clone, Copy, Error)]
#[display("path is too long")]
pub struct PathLengthError;

#[derive(Debug, Display, Clone, Copy, Error)]
#[display("out of memory")]
pub struct OOMError;

#[derive(Debug, Display, Clone, Copy, Error)]
#[display("interrupted by signal")]
pub struct InterruptError;

#[derive(Debug, Display, Clone, Copy, Error)]
#[display("error during I/O")]
pub struct IOError;

#[derive(Debug, Display, Clone, Copy, Error)]
#[display("available storage space exhausted")]
pub struct StorageExhaustedError;

#[derive(Debug, Display, Clone, Copy, Error)]
#[display("unexpected OS error with code: {_0}")]
pub struct UnexpectedError(#[error(not(source))] pub c_int);

/// A path-like input failed to produce path text. Raised before any filesystem call.
#[derive(Debug, Display, Clone, Copy, From, Error)]
pub enum PathConversionError {
    NotUnicode(NotUnicodeError),
    NulByte(NulByteError),
}

/// Opening a directory failed. The only fallible filesystem operation: once a directory is
/// open, reading runs to exhaustion and end-of-stream is a normal termination.
#[derive(Debug, Display, Clone, Copy, From, Error)]
pub enum DirectoryAccessError {
    NotFound(NotFoundError),
    NotDirectory(NotDirectoryError),
    Permission(PermissionError),
    HandleLimit(HandleLimitError),
    ExcessiveLinks(ExcessiveLinksError),
    PathLength(PathLengthError),
    OOM(OOMError),
    Unexpected(UnexpectedError),
}

impl DirectoryAccessError {
    pub(crate) const fn from_os_error(code: c_int) -> DirectoryAccessError {
        match code {
            ENOENT =>          DirectoryAccessError::NotFound(NotFoundError),
            ENOTDIR =>         DirectoryAccessError::NotDirectory(NotDirectoryError),
            EACCES =>          DirectoryAccessError::Permission(PermissionError),
            EMFILE | ENFILE => DirectoryAccessError::HandleLimit(HandleLimitError),
            ELOOP =>           DirectoryAccessError::ExcessiveLinks(ExcessiveLinksError),
            ENAMETOOLONG =>    DirectoryAccessError::PathLength(PathLengthError),
            ENOMEM =>          DirectoryAccessError::OOM(OOMError),
            code =>            DirectoryAccessError::Unexpected(UnexpectedError(code)),
        }
    }

    /// The OS error code underlying this error. [`HandleLimit`](DirectoryAccessError::HandleLimit)
    /// reports `EMFILE`, which also stands in for the system-wide `ENFILE`.
    pub const fn os_error(&self) -> c_int {
        match self {
            DirectoryAccessError::NotFound(_) => ENOENT,
            DirectoryAccessError::NotDirectory(_) => ENOTDIR,
            DirectoryAccessError::Permission(_) => EACCES,
            DirectoryAccessError::HandleLimit(_) => EMFILE,
            DirectoryAccessError::ExcessiveLinks(_) => ELOOP,
            DirectoryAccessError::PathLength(_) => ENAMETOOLONG,
            DirectoryAccessError::OOM(_) => ENOMEM,
            DirectoryAccessError::Unexpected(UnexpectedError(code)) => *code,
        }
    }
}

/// Union of everything an enumeration can fail with.
#[derive(Debug, Display, Clone, Copy, From, Error)]
pub enum EnumerateError {
    Conversion(PathConversionError),
    Access(DirectoryAccessError),
}

/// Explicitly closing a directory handle failed. The descriptor is released regardless.
#[derive(Debug, Display, Clone, Copy, From, Error)]
pub enum CloseError {
    Interrupt(InterruptError),
    IO(IOError),
    StorageExhausted(StorageExhaustedError),
}
