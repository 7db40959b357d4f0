//! Splitter - configuration plus the split entry points.
//!
//! A [`Splitter`] turns a named byte source into fixed-size blocks with
//! positional ids:
//!
//! - [`Splitter::split`] - lazy [`BlockIter`] over any [`BlockSource`]
//! - [`Splitter::split_all`] - the same, collected
//! - [`Splitter::split_file`] - lazy split of a file on disk
//! - [`Splitter::split_bytes`] - zero-copy split of an in-memory buffer
//! - [`Splitter::manifest`] - block layout without reading anything
//!
//! # Example
//!
//! ```
//! use blocksplit::{NamedSource, Splitter};
//!
//! let splitter = Splitter::with_block_size(4)?;
//! let blocks = splitter.split_all(NamedSource::from_bytes("a.txt", &b"HELLOWORLD"[..]))?;
//!
//! let ids: Vec<String> = blocks.iter().map(|b| b.identifier()).collect();
//! assert_eq!(ids, ["/a.txt-0", "/a.txt-1", "/a.txt-2"]);
//! assert_eq!(&blocks[2].data()[..], b"LD");
//! # Ok::<(), blocksplit::SplitError>(())
//! ```

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use log::debug;

use super::BlockIter;
use crate::block::{Block, BlockId, Manifest};
use crate::config::SplitConfig;
use crate::error::SplitError;
use crate::hash::block_digest;
use crate::source::{BlockSource, NamedSource};

/// Splits sources into blocks of at most `block_size` bytes.
///
/// A `Splitter` holds only configuration; it is `Copy` and each split owns
/// its own source and buffer, so independent sources can be split from
/// different threads with no coordination.
///
/// The configuration is checked at the start of every split, before the
/// source is touched, so a zero block size surfaces as
/// [`SplitError::InvalidConfiguration`] without any read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Splitter {
    config: SplitConfig,
}

impl Splitter {
    /// Creates a splitter with the given configuration.
    ///
    /// The configuration is validated when a split starts.
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    /// Creates a splitter for `block_size`-byte blocks.
    ///
    /// # Errors
    ///
    /// [`SplitError::InvalidConfiguration`] if `block_size` is zero.
    pub fn with_block_size(block_size: usize) -> Result<Self, SplitError> {
        SplitConfig::new(block_size).map(Self::new)
    }

    /// Returns the configuration used by this splitter.
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Number of blocks a `len`-byte source splits into.
    ///
    /// Zero when the block size is invalid.
    pub fn block_count(&self, len: u64) -> u64 {
        self.config.block_count(len)
    }

    /// Lazily splits `source` into blocks.
    ///
    /// The returned iterator reads one block per `next` call. Pass
    /// `&mut source` to keep ownership of the source.
    ///
    /// # Errors
    ///
    /// [`SplitError::InvalidConfiguration`] before any read if the
    /// configuration is invalid. I/O failures are yielded by the iterator.
    pub fn split<S: BlockSource>(&self, source: S) -> Result<BlockIter<S>, SplitError> {
        self.config.validate()?;
        Ok(BlockIter::new(source, self.config))
    }

    /// Splits `source` completely.
    ///
    /// All or nothing: on an I/O failure the blocks read so far are dropped
    /// and only the error is returned.
    pub fn split_all<S: BlockSource>(&self, source: S) -> Result<Vec<Block>, SplitError> {
        self.split(source)?.collect()
    }

    /// Opens `path` and lazily splits it.
    ///
    /// The final path component becomes the source name.
    ///
    /// # Errors
    ///
    /// [`SplitError::InvalidConfiguration`] (checked before opening) or
    /// [`SplitError::Open`] if the file cannot be opened.
    pub fn split_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<BlockIter<NamedSource<File>>, SplitError> {
        self.config.validate()?;
        let path = path.as_ref();
        let source = NamedSource::open(path).map_err(|source| SplitError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.split(source)
    }

    /// Splits an in-memory buffer.
    ///
    /// Payloads are zero-copy slices of `data`.
    pub fn split_bytes(&self, name: &str, data: impl Into<Bytes>) -> Result<Vec<Block>, SplitError> {
        self.config.validate()?;
        let data = data.into();
        let name: Arc<str> = Arc::from(name);
        let block_size = self.config.block_size();

        let blocks: Vec<Block> = (0..data.len())
            .step_by(block_size)
            .enumerate()
            .map(|(ordinal, start)| {
                let end = (start + block_size).min(data.len());
                let payload = data.slice(start..end);
                let hash = block_digest(self.config.hash_config(), &payload);
                let id = BlockId::new(Arc::clone(&name), ordinal as u64);
                Block::from_parts(id, payload, start as u64, hash)
            })
            .collect();

        debug!(
            "split {:?} in memory: {} bytes into {} blocks",
            name,
            data.len(),
            blocks.len()
        );
        Ok(blocks)
    }

    /// Block layout of a `len`-byte source called `name`.
    ///
    /// Reads nothing; this is what a write request to the coordination
    /// service needs before payloads are sent.
    pub fn manifest(&self, name: &str, len: u64) -> Result<Manifest, SplitError> {
        self.config.validate()?;
        Ok(Manifest::new(Arc::from(name), len, self.config.block_size()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HashConfig;
    use std::io::{self, Read};

    /// Fails the test if ever read.
    struct Untouchable;

    impl Read for Untouchable {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            panic!("source must not be read");
        }
    }

    #[test]
    fn test_zero_block_size_fails_before_read() {
        let splitter = Splitter::new(SplitConfig::default().with_block_size(0));
        let err = splitter
            .split(NamedSource::new("never", 10, Untouchable))
            .unwrap_err();
        assert!(matches!(err, SplitError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_with_block_size_rejects_zero() {
        assert!(Splitter::with_block_size(0).is_err());
    }

    #[test]
    fn test_split_bytes_is_zero_copy() {
        let splitter = Splitter::with_block_size(4).unwrap();
        let data = Bytes::from_static(b"HELLOWORLD");
        let blocks = splitter.split_bytes("a.txt", data.clone()).unwrap();

        assert_eq!(blocks.len(), 3);
        for block in &blocks {
            let start = block.data().as_ptr() as usize - data.as_ptr() as usize;
            assert_eq!(start as u64, block.offset());
        }
    }

    #[test]
    fn test_split_bytes_matches_reader_split() {
        let config = SplitConfig::new(3)
            .unwrap()
            .with_hash_config(HashConfig::enabled());
        let splitter = Splitter::new(config);
        let data: Vec<u8> = (0..100u8).collect();

        let in_memory = splitter.split_bytes("d", data.clone()).unwrap();
        let streamed = splitter
            .split_all(NamedSource::from_bytes("d", data))
            .unwrap();
        assert_eq!(in_memory, streamed);
    }

    #[test]
    fn test_split_bytes_empty() {
        let splitter = Splitter::with_block_size(4).unwrap();
        assert!(splitter.split_bytes("empty.bin", Bytes::new()).unwrap().is_empty());
    }

    #[test]
    fn test_block_count() {
        let splitter = Splitter::with_block_size(4).unwrap();
        assert_eq!(splitter.block_count(0), 0);
        assert_eq!(splitter.block_count(8), 2);
        assert_eq!(splitter.block_count(10), 3);
    }

    #[test]
    fn test_manifest_rejects_zero_block_size() {
        let splitter = Splitter::new(SplitConfig::default().with_block_size(0));
        assert!(splitter.manifest("x", 10).is_err());
    }

    #[test]
    fn test_split_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = Splitter::default()
            .split_file(dir.path().join("nope.bin"))
            .unwrap_err();
        match err {
            SplitError::Open { path, source } => {
                assert!(path.ends_with("nope.bin"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected open error, got {:?}", other),
        }
    }
}
