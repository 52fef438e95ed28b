//! Directory-entry enumeration for Linux: the names in a directory, `.` and `..` included,
//! delivered either eagerly through a per-entry callback or lazily through a pull-based
//! iterator.
//!
//! # Usage
//! [`for_each`] drives an entire directory through a callback and returns nothing on success;
//! [`entries`] returns an [`Entries`] iterator that does no filesystem work until its first
//! pull. Both accept anything implementing [`ToDirPath`] and both apply one [`Encoding`] to
//! every name they produce. Entries are surfaced in whatever order the kernel yields them;
//! this crate never sorts, filters or dedups.
//!
//! ```no_run
//! let mut names = Vec::new();
//! dirents::for_each("/etc", |name| names.push(name.into_string()))?;
//! # Ok::<(), dirents::EnumerateError>(())
//! ```
//!
//! # Error Handling
//! Failures are strongly typed: enums for static dispatch over zero-sized cause structs that
//! implement [`Error`](std::error::Error). Only two things can fail: coercing the path to
//! text ([`PathConversionError`]) and opening the directory ([`DirectoryAccessError`], which
//! reports the underlying OS error code). Once a directory is open, end-of-stream is a normal
//! termination rather than a failure, and the descriptor is released on every exit path.
//!
//! # Dependencies
//! The filesystem is reached through `libc`'s thin syscall wrappers (`open`, `close`,
//! `getdents64`); this crate is Linux-only as a result. Derive macros cover the repetitive
//! parts of the error types.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::unwrap_used)]

mod dir;
mod encoding;
mod entries;
mod enumerate;
mod error;
mod fd;
mod panic;
mod path;
mod syscall;

mod tests;

pub use dir::*;
pub use encoding::*;
pub use entries::*;
pub use enumerate::*;
pub use error::*;
pub use path::ToDirPath;
