//! The enumeration entry points: eager [`for_each`] and lazy [`entries`], plus the
//! [`Enumeration`] options builder both are defined in terms of.
//!
//! Both modes share one open → read → decode → close path through [`Directory`]; they differ
//! only in who drives it. Eager mode drives the reader to exhaustion itself and reports
//! failures immediately; lazy mode hands the caller an [`Entries`] iterator that opens on
//! first pull.

use crate::dir::Directory;
use crate::encoding::{Encoding, EntryName};
use crate::entries::Entries;
use crate::error::EnumerateError;
use crate::path::{self, ToDirPath};

/// Options for one enumeration, builder style. One recognized option: the target
/// [`Encoding`] for produced names, defaulting to [`Encoding::system`].
///
/// ```no_run
/// use dirents::{Encoding, Enumeration};
///
/// let names = Enumeration::new()
///     .encoding(Encoding::Latin1)
///     .entries("/var/log")
///     .collect::<Result<Vec<_>, _>>()?;
/// # Ok::<(), dirents::EnumerateError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Enumeration {
    encoding: Option<Encoding>,
}

impl Enumeration {
    pub const fn new() -> Enumeration {
        Enumeration {
            encoding: None,
        }
    }

    /// Set the encoding applied to every produced name, `.` and `..` included.
    pub const fn encoding(mut self, encoding: Encoding) -> Enumeration {
        self.encoding = Some(encoding);
        self
    }

    const fn resolved_encoding(&self) -> Encoding {
        match self.encoding {
            Some(encoding) => encoding,
            None => Encoding::system(),
        }
    }

    /// Eagerly enumerate `dir_path`, invoking `entry_fn` once per entry in stream order.
    ///
    /// Coercion and open failures are reported before `entry_fn` is ever invoked. The
    /// directory handle is released on every exit path, including a panicking `entry_fn`.
    pub fn for_each<P, F>(&self, dir_path: P, mut entry_fn: F) -> Result<(), EnumerateError>
    where
        P: ToDirPath,
        F: FnMut(EntryName),
    {
        let pathname = path::to_pathname(&dir_path)?;
        let encoding = self.resolved_encoding();

        let mut dir = Directory::open(&pathname)?;
        while let Some(name) = dir.read_entry() {
            entry_fn(EntryName::decode(&name, encoding));
        }
        Ok(())
    }

    /// Lazily enumerate `dir_path`, returning the sequence without touching the filesystem.
    ///
    /// The coercion capability is invoked here, exactly once, but its outcome (like the
    /// deferred open) only surfaces on the first pull of the returned iterator.
    pub fn entries<P: ToDirPath>(&self, dir_path: P) -> Entries {
        Entries::new(path::to_pathname(&dir_path), self.resolved_encoding())
    }
}

/// Eagerly enumerate a directory with default options. See [`Enumeration::for_each`].
///
/// ```no_run
/// dirents::for_each("/etc", |name| println!("{name}"))?;
/// # Ok::<(), dirents::EnumerateError>(())
/// ```
pub fn for_each<P, F>(dir_path: P, entry_fn: F) -> Result<(), EnumerateError>
where
    P: ToDirPath,
    F: FnMut(EntryName),
{
    Enumeration::new().for_each(dir_path, entry_fn)
}

/// Lazily enumerate a directory with default options. See [`Enumeration::entries`].
pub fn entries<P: ToDirPath>(dir_path: P) -> Entries {
    Enumeration::new().entries(dir_path)
}
