#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

//! Read, edit and write INI files without losing their comments.
//!
//! Parsing never fails on content: anything that is not a section header, a `key=value`
//! assignment or a comment line is kept as comment text on the nearest element, and written back
//! out by [`save`].

mod document;
mod error;
mod parser;
mod scanner;
mod typed;
mod writer;

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

pub use document::{Document, Key, Section};
pub use error::Error;

/// Byte Order Mark (BOM) is used to signal the endianness of an encoding. The order `0xFF 0xFE`
/// strongly suggests that the encoding is using little-endian byte order.
///
/// <https://en.wikipedia.org/wiki/Byte_order_mark>
const BOM_LE: &[u8] = &[0xFF, 0xFE];
const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Read and parse the file at `path`.
///
/// # Errors
///
/// Returns [`Error::ReadFailure`] if the file cannot be read. Malformed content is not an error.
pub fn load(path: impl AsRef<Path>) -> Result<Document, Error> {
    Document::load(path)
}

/// Write `document` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`Error::WriteFailure`] if the file cannot be created or written.
pub fn save(document: &Document, path: impl AsRef<Path>) -> Result<(), Error> {
    document.save(path)
}

impl Document {
    /// See [`load`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadFailure`] if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let buffer = fs::read(path).map_err(|source| Error::ReadFailure {
            path: path.to_owned(),
            source,
        })?;
        let document = Self::from_bytes(&buffer);

        log::debug!(
            "loaded {} section(s) from {}",
            document.sections.len(),
            path.display()
        );
        Ok(document)
    }

    /// See [`save`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::WriteFailure`] if the file cannot be created or written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let write = || -> io::Result<()> {
            let mut writer = BufWriter::new(fs::File::create(path)?);
            self.write_to(&mut writer)?;
            writer.flush()
        };

        write().map_err(|source| Error::WriteFailure {
            path: path.to_owned(),
            source,
        })?;

        log::debug!(
            "saved {} section(s) to {}",
            self.sections.len(),
            path.display()
        );
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading fails.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, Error> {
        let mut buffer = Vec::with_capacity(4096);
        reader.read_to_end(&mut buffer)?;
        Ok(Self::from_bytes(&buffer))
    }

    /// Decode `buffer` (UTF-16 LE if it starts with a BOM, UTF-8 otherwise) and parse it.
    #[must_use]
    pub fn from_bytes(buffer: &[u8]) -> Self {
        Self::parse(&decode_data(buffer))
    }

    /// # Errors
    ///
    /// Propagates any error from `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{self}")
    }
}

fn decode_data(data: &[u8]) -> String {
    if let Some(data) = data.strip_prefix(BOM_LE) {
        // Likely UTF-16 LE
        let utf16 = data
            .chunks_exact(2)
            .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
            .collect::<Vec<u16>>();

        char::decode_utf16(utf16)
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect::<String>()
    } else {
        let data = data.strip_prefix(BOM_UTF8).unwrap_or(data);
        String::from_utf8_lossy(data).into_owned()
    }
}
