#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::borrow::Cow;
use std::cell::Cell;
use std::ffi::{CString, OsString};
use std::fs::{self, File};
use std::os::unix::ffi::OsStringExt;
use std::path::{Path, PathBuf};

use libc::{EACCES, EMFILE, ENFILE, ENOENT, ENOTDIR};
use tempfile::TempDir;

use crate::dir::Directory;
use crate::encoding::Encoding;
use crate::entries;
use crate::enumerate::Enumeration;
use crate::error::{DirectoryAccessError, EnumerateError, PathConversionError};
use crate::for_each;
use crate::path::ToDirPath;

/// A mock directory tree:
/// ```text
/// <root>/
///   .dotfile
///   file_one.ext
///   subdir_one/
///   deeply/nested/
///     .dotfile.ext
///     directory/
/// ```
fn mock_dir() -> TempDir {
    let root = tempfile::tempdir().unwrap();

    File::create(root.path().join(".dotfile")).unwrap();
    File::create(root.path().join("file_one.ext")).unwrap();
    fs::create_dir(root.path().join("subdir_one")).unwrap();

    let nested = root.path().join("deeply/nested");
    fs::create_dir_all(&nested).unwrap();
    File::create(nested.join(".dotfile.ext")).unwrap();
    fs::create_dir(nested.join("directory")).unwrap();

    root
}

fn eager_names(enumeration: Enumeration, dir_path: &Path) -> Vec<String> {
    let mut names = Vec::new();
    enumeration
        .for_each(dir_path, |name| names.push(name.into_string()))
        .unwrap();
    names.sort();
    names
}

fn lazy_names(enumeration: Enumeration, dir_path: &Path) -> Vec<String> {
    let mut names = enumeration
        .entries(dir_path)
        .map(|name| name.unwrap().into_string())
        .collect::<Vec<_>>();
    names.sort();
    names
}

#[test]
fn for_each_yields_every_entry_name() {
    let root = mock_dir();

    assert_eq!(
        eager_names(Enumeration::new(), root.path()),
        [".", "..", ".dotfile", "deeply", "file_one.ext", "subdir_one"],
        "Eager enumeration should yield every entry, the self and parent entries included."
    );

    assert_eq!(
        eager_names(Enumeration::new(), &root.path().join("deeply/nested")),
        [".", "..", ".dotfile.ext", "directory"],
        "A nested directory should list exactly its own entries."
    );
}

#[test]
fn for_each_returns_nothing_on_success() {
    let root = tempfile::tempdir().unwrap();

    let result = for_each(root.path(), |_| {});
    assert!(
        matches!(result, Ok(())),
        "Eager enumeration should produce no result value, even with no real entries."
    );
}

#[test]
fn lazy_enumeration_matches_eager() {
    let root = mock_dir();

    assert_eq!(
        lazy_names(Enumeration::new(), root.path()),
        eager_names(Enumeration::new(), root.path()),
        "Materializing the lazy sequence should yield the same names as eager enumeration."
    );
}

#[test]
fn encoding_option_tags_every_name() {
    let root = mock_dir();
    let nested = root.path().join("deeply/nested");

    let tagged = Enumeration::new()
        .encoding(Encoding::Utf16Le)
        .entries(&nested)
        .map(|name| name.unwrap())
        .collect::<Vec<_>>();
    assert_eq!(tagged.len(), 4);
    assert!(
        tagged.iter().all(|name| name.encoding() == Encoding::Utf16Le),
        "Every name, including the self and parent entries, should carry the configured encoding."
    );

    Enumeration::new()
        .encoding(Encoding::Utf16Le)
        .for_each(&nested, |name| assert_eq!(name.encoding(), Encoding::Utf16Le))
        .unwrap();

    entries(&nested)
        .map(|name| name.unwrap())
        .for_each(|name| assert_eq!(
            name.encoding(),
            Encoding::system(),
            "With no option configured, names should carry the system default encoding."
        ));
}

#[test]
fn latin1_decodes_raw_name_bytes() {
    let root = tempfile::tempdir().unwrap();
    let raw_name = OsString::from_vec(vec![b'n', 0xE9]);
    File::create(root.path().join(&raw_name)).unwrap();

    let latin1 = lazy_names(Enumeration::new().encoding(Encoding::Latin1), root.path());
    assert!(
        latin1.contains(&"né".to_owned()),
        "Latin-1 should map each raw byte to the code point with the same value."
    );

    let utf8 = lazy_names(Enumeration::new(), root.path());
    assert!(
        utf8.contains(&"n\u{FFFD}".to_owned()),
        "UTF-8 should replace malformed bytes rather than fail."
    );
}

#[test]
fn missing_directory_fails_with_not_found() {
    let root = tempfile::tempdir().unwrap();
    let missing = root.path().join("nonexistent");

    let mut invoked = false;
    let error = for_each(&missing, |_| invoked = true).unwrap_err();
    assert!(
        matches!(error, EnumerateError::Access(DirectoryAccessError::NotFound(_))),
        "Eager enumeration of a missing path should fail before any callback invocation."
    );
    assert!(!invoked);
    if let EnumerateError::Access(access) = error {
        assert_eq!(access.os_error(), ENOENT);
    }

    let mut sequence = entries(&missing);
    assert!(
        matches!(
            sequence.next(),
            Some(Err(EnumerateError::Access(DirectoryAccessError::NotFound(_))))
        ),
        "The lazy sequence should fail on first consumption, not at creation."
    );
    assert!(sequence.next().is_none(), "A failed sequence should be exhausted.");
}

#[test]
fn non_directory_path_fails_with_not_directory() {
    let root = tempfile::tempdir().unwrap();
    let file_path = root.path().join("plain_file");
    File::create(&file_path).unwrap();

    let error = for_each(&file_path, |_| {}).unwrap_err();
    match error {
        EnumerateError::Access(access) => {
            assert!(matches!(access, DirectoryAccessError::NotDirectory(_)));
            assert_eq!(access.os_error(), ENOTDIR);
        },
        other => panic!("expected an access error, got: {other}"),
    }
}

#[test]
fn os_error_classification_round_trips() {
    for code in [ENOENT, ENOTDIR, EACCES, EMFILE] {
        assert_eq!(DirectoryAccessError::from_os_error(code).os_error(), code);
    }
    assert_eq!(
        DirectoryAccessError::from_os_error(ENFILE).os_error(),
        EMFILE,
        "The system-wide handle limit should classify with the per-process one."
    );
    assert!(matches!(
        DirectoryAccessError::from_os_error(-1),
        DirectoryAccessError::Unexpected(_)
    ));
}

struct CountingPath {
    dir_path: PathBuf,
    conversions: Cell<usize>,
}

impl ToDirPath for CountingPath {
    fn to_dir_path(&self) -> Result<Cow<'_, str>, PathConversionError> {
        self.conversions.set(self.conversions.get() + 1);
        self.dir_path.to_dir_path()
    }
}

#[test]
fn conversion_capability_is_invoked_exactly_once() {
    let root = mock_dir();
    let counting = CountingPath {
        dir_path: root.path().to_owned(),
        conversions: Cell::new(0),
    };

    let mut count = 0;
    for_each(&counting, |_| count += 1).unwrap();
    assert_eq!(counting.conversions.get(), 1);
    assert_eq!(count, 6, "Enumeration should cover the directory the conversion resolved to.");

    counting.conversions.set(0);
    let names = entries(&counting).collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(counting.conversions.get(), 1);
    assert_eq!(names.len(), 6);
}

#[test]
fn conversion_failures_surface_per_mode() {
    let not_unicode = OsString::from_vec(vec![0xFF, 0xFE]);
    let error = for_each(&not_unicode, |_| {}).unwrap_err();
    assert!(matches!(
        error,
        EnumerateError::Conversion(PathConversionError::NotUnicode(_))
    ));

    let mut sequence = entries(&not_unicode);
    assert!(
        matches!(
            sequence.next(),
            Some(Err(EnumerateError::Conversion(PathConversionError::NotUnicode(_))))
        ),
        "Lazy mode should defer the conversion failure to first consumption."
    );
    assert!(sequence.next().is_none());

    let error = for_each("with\0nul", |_| {}).unwrap_err();
    assert!(matches!(
        error,
        EnumerateError::Conversion(PathConversionError::NulByte(_))
    ));
}

#[test]
fn lazy_sequence_is_single_pass_but_restartable() {
    let root = mock_dir();

    let mut sequence = entries(root.path());
    let first_pass = sequence.by_ref().count();
    assert_eq!(first_pass, 6);
    assert_eq!(
        sequence.count(),
        0,
        "One sequence instance is single-pass; exhausting it leaves nothing to yield."
    );

    assert_eq!(
        entries(root.path()).count(),
        6,
        "A fresh sequence instance should re-read the directory from the start."
    );
}

#[test]
fn lazy_sequence_size_is_unknown() {
    let root = mock_dir();

    let mut sequence = entries(root.path());
    assert_eq!(sequence.size_hint(), (0, None));

    sequence.next().unwrap().unwrap();
    assert_eq!(
        sequence.size_hint(),
        (0, None),
        "Sizing the sequence should never trigger a counting scan of the directory."
    );
}

#[test]
fn early_abandonment_allows_fresh_enumeration() {
    let root = mock_dir();

    let partial = entries(root.path())
        .take(2)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(partial.len(), 2);

    assert_eq!(
        entries(root.path()).count(),
        6,
        "Abandoning a sequence early should release the handle and leave the directory readable."
    );
}

#[test]
fn reader_surfaces_raw_names_and_closes() {
    let root = mock_dir();
    let pathname = CString::new(root.path().to_str().unwrap()).unwrap();

    let mut dir = Directory::open(&pathname).unwrap();
    let mut raw_names = Vec::new();
    while let Some(name) = dir.read_entry() {
        raw_names.push(name);
    }
    dir.close().unwrap();

    assert_eq!(raw_names.len(), 6);
    assert!(raw_names.contains(&b".".to_vec()));
    assert!(raw_names.contains(&b"..".to_vec()));
    assert!(raw_names.contains(&b"file_one.ext".to_vec()));
}

#[test]
fn decoding_policies() {
    assert_eq!(Encoding::Utf8.decode(b"directory"), "directory");
    assert_eq!(Encoding::Utf8.decode(&[0xC3, 0xA9]), "é");
    assert_eq!(Encoding::Utf8.decode(&[0xE9]), "\u{FFFD}");

    assert_eq!(Encoding::Latin1.decode(&[0xE9]), "é");
    assert_eq!(Encoding::Latin1.decode(b".."), "..");

    assert_eq!(Encoding::Utf16Le.decode(&[0x2E, 0x00, 0x2E, 0x00]), "..");
    assert_eq!(
        Encoding::Utf16Le.decode(&[0x2E, 0x00, 0x2E]),
        ".\u{FFFD}",
        "An odd trailing byte cannot form a code unit and should decode to a replacement."
    );

    assert_eq!(Encoding::system(), Encoding::Utf8);
    assert_eq!(Encoding::default(), Encoding::system());
}
