//! Byte sources that can be split into blocks.
//!
//! - [`BlockSource`] - A name, a declared length and sequential reads
//! - [`NamedSource`] - Attaches a name and length to any reader

use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::Path;

use bytes::Bytes;

/// A named, finite byte stream with a known length.
///
/// The name is used verbatim in block ids. The length sizes the reads; the
/// stream itself decides where it ends.
pub trait BlockSource: Read {
    /// Name used in block ids (`"/" + name + "-" + ordinal`).
    fn name(&self) -> &str;

    /// Total length of the stream in bytes.
    fn len(&self) -> u64;

    /// Returns true if the declared length is zero.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: BlockSource + ?Sized> BlockSource for &mut S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn len(&self) -> u64 {
        (**self).len()
    }
}

impl<S: BlockSource + ?Sized> BlockSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn len(&self) -> u64 {
        (**self).len()
    }
}

/// Any reader with a name and declared length attached.
///
/// # Example
///
/// ```
/// use blocksplit::{BlockSource, NamedSource};
///
/// let source = NamedSource::from_bytes("a.txt", &b"HELLOWORLD"[..]);
/// assert_eq!(source.name(), "a.txt");
/// assert_eq!(source.len(), 10);
/// ```
#[derive(Debug)]
pub struct NamedSource<R> {
    name: String,
    len: u64,
    reader: R,
}

impl<R> NamedSource<R> {
    /// Wraps `reader`, declaring it `len` bytes long.
    pub fn new(name: impl Into<String>, len: u64, reader: R) -> Self {
        Self {
            name: name.into(),
            len,
            reader,
        }
    }

    /// Returns a reference to the wrapped reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Splits the source into (name, declared length, reader).
    pub fn into_parts(self) -> (String, u64, R) {
        (self.name, self.len, self.reader)
    }

    /// Consumes the source and returns the reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl NamedSource<File> {
    /// Opens a file for splitting.
    ///
    /// The name is the final path component and the length comes from the
    /// file's metadata. Block ids carry the name verbatim, so a name that is
    /// not valid UTF-8 is rejected with `InvalidInput`.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "path has no file name")
            })?
            .to_str()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "file name is not valid UTF-8")
            })?
            .to_owned();

        let file = File::open(path)?;
        let metadata = file.metadata()?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            ));
        }

        Ok(Self::new(name, metadata.len(), file))
    }
}

impl NamedSource<Cursor<Bytes>> {
    /// An in-memory source.
    pub fn from_bytes(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let len = data.len() as u64;
        Self::new(name, len, Cursor::new(data))
    }
}

impl<R: Read> Read for NamedSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl<R: Read> BlockSource for NamedSource<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> u64 {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_bytes() {
        let mut source = NamedSource::from_bytes("mem", &b"abc"[..]);
        assert_eq!(source.len(), 3);
        assert!(!source.is_empty());

        let mut out = String::new();
        source.read_to_string(&mut out).unwrap();
        assert_eq!(out, "abc");
    }

    #[test]
    fn test_open_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        File::create(&path).unwrap().write_all(&[1u8; 42]).unwrap();

        let source = NamedSource::open(&path).unwrap();
        assert_eq!(source.name(), "data.bin");
        assert_eq!(source.len(), 42);
    }

    #[test]
    fn test_open_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = NamedSource::open(dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    #[cfg(unix)]
    fn test_open_non_utf8_name_fails() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        // Rejected on the name alone, before the file is opened.
        let path = dir.path().join(OsStr::from_bytes(b"data-\xff.bin"));

        let err = NamedSource::open(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_borrowed_source() {
        let mut source = NamedSource::from_bytes("mem", &b"abc"[..]);
        let borrowed = &mut source;
        assert_eq!(BlockSource::name(&borrowed), "mem");
        assert_eq!(BlockSource::len(&borrowed), 3);
    }
}
