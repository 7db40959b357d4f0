//! Lazy, ordinal-ordered block iterator over a [`BlockSource`].

use std::iter::FusedIterator;
use std::sync::Arc;

use bytes::Bytes;
use log::{debug, trace, warn};

use crate::block::{Block, BlockId};
use crate::buffer::Buffer;
use crate::config::SplitConfig;
use crate::error::SplitError;
use crate::hash::block_digest;
use crate::source::BlockSource;

/// An iterator that reads a source one block at a time.
///
/// Created by [`Splitter::split`](crate::Splitter::split). Each call to
/// `next` fills one block-sized buffer from the source (accumulating short
/// reads) and yields a block holding exactly the bytes read.
///
/// The iterator owns the source and drops it as soon as the stream ends,
/// a read fails, or the iterator itself is dropped. After an `Err` the
/// iterator is finished; blocks yielded before it stay valid.
///
/// # Example
///
/// ```
/// use blocksplit::{NamedSource, Splitter};
///
/// let source = NamedSource::from_bytes("a.txt", &b"HELLOWORLD"[..]);
/// let mut blocks = Splitter::with_block_size(4)?.split(source)?;
///
/// let first = blocks.next().unwrap()?;
/// assert_eq!(first.identifier(), "/a.txt-0");
/// assert_eq!(&first.data()[..], b"HELL");
/// assert_eq!(blocks.next_ordinal(), 1);
/// # Ok::<(), blocksplit::SplitError>(())
/// ```
pub struct BlockIter<S> {
    source: Option<S>,
    name: Arc<str>,
    declared_len: u64,
    config: SplitConfig,
    buffer: Buffer,
    ordinal: u64,
    offset: u64,
}

impl<S: BlockSource> BlockIter<S> {
    /// `config` must already be validated.
    pub(crate) fn new(source: S, config: SplitConfig) -> Self {
        let name: Arc<str> = Arc::from(source.name());
        let declared_len = source.len();
        let block_size = config.block_size();
        let first_read = declared_len.min(block_size as u64) as usize;

        debug!(
            "splitting {:?}: {} bytes into {} blocks of at most {} bytes",
            name,
            declared_len,
            config.block_count(declared_len),
            block_size
        );

        Self {
            source: Some(source),
            name,
            declared_len,
            config,
            buffer: Buffer::take(first_read),
            ordinal: 0,
            offset: 0,
        }
    }

    fn emit(&mut self, len: usize) -> Block {
        // Right-sized copy: a short final block never sees stale bytes.
        let data = Bytes::copy_from_slice(self.buffer.filled(len));
        let hash = block_digest(self.config.hash_config(), &data);
        let id = BlockId::new(Arc::clone(&self.name), self.ordinal);
        let block = Block::from_parts(id, data, self.offset, hash);

        trace!("{}: {} bytes @ {}", block.id(), len, self.offset);

        self.ordinal += 1;
        self.offset += len as u64;
        block
    }

    fn finish(&mut self) {
        if self.source.take().is_some() {
            debug!(
                "split of {:?} done: {} blocks, {} bytes",
                self.name, self.ordinal, self.offset
            );
        }
    }
}

impl<S> BlockIter<S> {
    /// Name of the source being split.
    pub fn source_name(&self) -> &str {
        &self.name
    }

    /// Ordinal the next block will carry.
    pub fn next_ordinal(&self) -> u64 {
        self.ordinal
    }

    /// Bytes consumed from the source so far.
    pub fn bytes_read(&self) -> u64 {
        self.offset
    }

    /// Block count implied by the source's declared length.
    pub fn expected_blocks(&self) -> u64 {
        self.config.block_count(self.declared_len)
    }

    /// Returns true once the source has been exhausted or has failed.
    pub fn is_finished(&self) -> bool {
        self.source.is_none()
    }
}

impl<S: BlockSource> Iterator for BlockIter<S> {
    type Item = Result<Block, SplitError>;

    fn next(&mut self) -> Option<Self::Item> {
        let source = self.source.as_mut()?;
        let block_size = self.config.block_size();
        let mut filled = 0;

        let result = loop {
            let want = next_read_len(self.declared_len, self.offset, filled, block_size);
            if filled == want {
                break Ok(filled);
            }
            self.buffer.ensure(want);

            match self.buffer.fill_from(&mut *source, filled, want) {
                Ok(n) => {
                    if filled == 0 && n > 0 && self.offset == self.declared_len {
                        warn!(
                            "source {:?} continues past its declared {} bytes",
                            self.name, self.declared_len
                        );
                    }
                    let exhausted = n < want;
                    filled = n;
                    if exhausted {
                        break Ok(filled);
                    }
                }
                Err(e) => break Err(e),
            }
        };

        match result {
            Ok(0) => {
                if self.offset < self.declared_len {
                    warn!(
                        "source {:?} ended after {} of {} declared bytes",
                        self.name, self.offset, self.declared_len
                    );
                }
                self.finish();
                None
            }
            Ok(n) => Some(Ok(self.emit(n))),
            Err(e) => {
                debug!(
                    "split of {:?} failed at block {}: {}",
                    self.name, self.ordinal, e
                );
                let err = SplitError::Io {
                    source_name: self.name.to_string(),
                    ordinal: self.ordinal,
                    source: e,
                };
                self.finish();
                Some(Err(err))
            }
        }
    }
}

/// Bytes to have buffered before the block starting at `offset` is complete,
/// given `filled` bytes already buffered for it.
///
/// `min(remaining, block_size)` while the declared length lasts. Past it, a
/// single byte checks for EOF; only if that byte arrives does the block grow
/// to `block_size`.
pub(crate) fn next_read_len(
    declared_len: u64,
    offset: u64,
    filled: usize,
    block_size: usize,
) -> usize {
    match declared_len.saturating_sub(offset) {
        0 if filled == 0 => EOF_PROBE_LEN,
        0 => block_size,
        remaining => remaining.min(block_size as u64) as usize,
    }
}

/// Read size used to detect EOF once the declared length is used up.
const EOF_PROBE_LEN: usize = 1;

impl<S: BlockSource> FusedIterator for BlockIter<S> {}

impl<S> std::fmt::Debug for BlockIter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockIter")
            .field("source", &self.name)
            .field("declared_len", &self.declared_len)
            .field("block_size", &self.config.block_size())
            .field("next_ordinal", &self.ordinal)
            .field("bytes_read", &self.offset)
            .field("finished", &self.source.is_none())
            .finish()
    }
}
