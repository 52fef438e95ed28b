//! Path coercion at the API boundary.
//!
//! Enumeration accepts any value that can produce path text on demand. Text types convert
//! infallibly; OS-string types must hold valid unicode. The capability is invoked at most once
//! per enumeration, before any filesystem call, and its result is validated as a C path
//! (no interior nul).

use std::borrow::Cow;
use std::ffi::{CString, OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::error::{NotUnicodeError, NulByteError, PathConversionError};

/// A value that can produce a text path representation on demand.
///
/// Implement this to pass custom location types straight to [`for_each`](crate::for_each) and
/// [`entries`](crate::entries).
pub trait ToDirPath {
    fn to_dir_path(&self) -> Result<Cow<'_, str>, PathConversionError>;
}

impl ToDirPath for str {
    fn to_dir_path(&self) -> Result<Cow<'_, str>, PathConversionError> {
        Ok(Cow::Borrowed(self))
    }
}

impl ToDirPath for String {
    fn to_dir_path(&self) -> Result<Cow<'_, str>, PathConversionError> {
        Ok(Cow::Borrowed(self))
    }
}

impl ToDirPath for OsStr {
    fn to_dir_path(&self) -> Result<Cow<'_, str>, PathConversionError> {
        match self.to_str() {
            Some(text) => Ok(Cow::Borrowed(text)),
            None => Err(NotUnicodeError)?,
        }
    }
}

impl ToDirPath for OsString {
    fn to_dir_path(&self) -> Result<Cow<'_, str>, PathConversionError> {
        self.as_os_str().to_dir_path()
    }
}

impl ToDirPath for Path {
    fn to_dir_path(&self) -> Result<Cow<'_, str>, PathConversionError> {
        self.as_os_str().to_dir_path()
    }
}

impl ToDirPath for PathBuf {
    fn to_dir_path(&self) -> Result<Cow<'_, str>, PathConversionError> {
        self.as_os_str().to_dir_path()
    }
}

impl<T: ToDirPath + ?Sized> ToDirPath for &T {
    fn to_dir_path(&self) -> Result<Cow<'_, str>, PathConversionError> {
        (**self).to_dir_path()
    }
}

/// Coerce a path-like value into a C pathname, invoking its conversion capability exactly once.
pub(crate) fn to_pathname<P: ToDirPath>(dir_path: &P) -> Result<CString, PathConversionError> {
    let text = dir_path.to_dir_path()?;
    match CString::new(text.into_owned()) {
        Ok(pathname) => Ok(pathname),
        Err(_) => Err(NulByteError)?,
    }
}
