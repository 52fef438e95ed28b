//! Decoding policies for raw entry-name bytes, and the [`EntryName`] values they produce.
//!
//! The kernel yields entry names as bytes with no declared encoding. Each enumeration resolves
//! one [`Encoding`] up front and applies it to every name it produces, `.` and `..` included.
//! Decoding is total: malformed input maps to U+FFFD rather than failing, so producing a name
//! is never an error path.

use std::fmt::{self, Display, Formatter};

use derive_more::Display;

/// A decoding policy for raw entry-name bytes.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Decode as UTF-8, replacing malformed sequences.
    #[display("UTF-8")]
    Utf8,
    /// Decode byte pairs as little-endian UTF-16 code units, replacing malformed sequences
    /// and any odd trailing byte.
    #[display("UTF-16LE")]
    Utf16Le,
    /// Map each byte to the code point with the same value. Total and lossless.
    #[display("ISO-8859-1")]
    Latin1,
}

impl Encoding {
    /// The encoding applied when none is configured. Linux stores names as bytes with a
    /// strong UTF-8 convention, so that is the system default.
    pub const fn system() -> Encoding {
        Encoding::Utf8
    }

    pub(crate) fn decode(self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Encoding::Utf16Le => {
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                let mut text = String::from_utf16_lossy(&units);
                if bytes.len() % 2 != 0 {
                    text.push(char::REPLACEMENT_CHARACTER);
                }
                text
            },
            Encoding::Latin1 => bytes.iter().map(|&byte| char::from(byte)).collect(),
        }
    }
}

impl Default for Encoding {
    fn default() -> Encoding {
        Encoding::system()
    }
}

/// One name from a directory listing, decoded from the raw bytes and tagged with the encoding
/// that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryName {
    name: String,
    encoding: Encoding,
}

impl EntryName {
    pub(crate) fn decode(bytes: &[u8], encoding: Encoding) -> EntryName {
        EntryName {
            name: encoding.decode(bytes),
            encoding,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The encoding this name was decoded with.
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn into_string(self) -> String {
        self.name
    }
}

impl Display for EntryName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.name, f)
    }
}

impl AsRef<str> for EntryName {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl PartialEq<str> for EntryName {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

impl PartialEq<&str> for EntryName {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}
