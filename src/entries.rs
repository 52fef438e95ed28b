//! The [`Entries`] iterator: pull-based enumeration with deferred open.
//!
//! An `Entries` value holds only the coerced pathname and the resolved encoding; the directory
//! is opened on the first pull, so both conversion and access failures surface at consumption
//! time, not at creation time. One instance is forward-only and single-pass; request a fresh
//! instance to read the directory again from the start.

use std::ffi::CString;
use std::iter::FusedIterator;

use crate::dir::Directory;
use crate::encoding::{Encoding, EntryName};
use crate::error::{EnumerateError, PathConversionError};

/// A lazy enumeration of one directory's entry names.
///
/// Yields `Result<EntryName, EnumerateError>`; at most one `Err` is produced (a failed
/// coercion or open), after which the iterator is exhausted. The number of entries is unknown
/// without reading the directory, so `size_hint` stays at `(0, None)` and no pre-scan is ever
/// performed to count.
#[derive(Debug)]
pub struct Entries {
    pathname: Result<CString, PathConversionError>,
    encoding: Encoding,
    state: State,
}

#[derive(Debug)]
enum State {
    Unopened,
    Reading(Directory),
    Finished,
}

impl Entries {
    pub(crate) fn new(pathname: Result<CString, PathConversionError>, encoding: Encoding) -> Entries {
        Entries {
            pathname,
            encoding,
            state: State::Unopened,
        }
    }
}

impl Iterator for Entries {
    type Item = Result<EntryName, EnumerateError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.state {
                State::Unopened => {
                    let pathname = match &self.pathname {
                        Ok(pathname) => pathname,
                        Err(error) => {
                            let error = *error;
                            self.state = State::Finished;
                            return Some(Err(error.into()));
                        },
                    };
                    match Directory::open(pathname) {
                        Ok(dir) => self.state = State::Reading(dir),
                        Err(error) => {
                            self.state = State::Finished;
                            return Some(Err(error.into()));
                        },
                    }
                },
                State::Reading(dir) => match dir.read_entry() {
                    Some(name) => return Some(Ok(EntryName::decode(&name, self.encoding))),
                    // Replacing the state drops the reader, closing the descriptor.
                    None => self.state = State::Finished,
                },
                State::Finished => return None,
            }
        }
    }
}

impl FusedIterator for Entries {}
