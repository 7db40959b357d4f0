//! Async stream adapter for block splitting.
//!
//! Splits a `futures_io::AsyncRead` into the same blocks, ids and error
//! behavior as the synchronous [`BlockIter`](crate::BlockIter).
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use blocksplit::{split_async, NamedSource, SplitConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(name: &str, len: u64, reader: R) -> Result<(), blocksplit::SplitError> {
//!     let mut stream = split_async(NamedSource::new(name, len, reader), SplitConfig::default())?;
//!
//!     while let Some(block) = stream.next().await {
//!         let block = block?;
//!         println!("{}: {} bytes", block.id(), block.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::io::ErrorKind;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::AsyncRead;
use log::{debug, trace, warn};

use crate::block::{Block, BlockId};
use crate::buffer::Buffer;
use crate::config::SplitConfig;
use crate::error::SplitError;
use crate::hash::block_digest;
use crate::source::NamedSource;
use crate::splitter::{Splitter, next_read_len};

/// A stream that yields blocks from an async reader.
///
/// Partially filled blocks survive `Poll::Pending`: the stream keeps
/// filling the same buffer on the next poll. The reader is dropped as soon
/// as the stream ends or fails.
pub struct BlockStream<R> {
    reader: Option<R>,
    name: Arc<str>,
    declared_len: u64,
    config: SplitConfig,
    buffer: Buffer,
    filled: usize,
    ordinal: u64,
    offset: u64,
}

impl<R> BlockStream<R> {
    fn new(source: NamedSource<R>, config: SplitConfig) -> Self {
        let (name, declared_len, reader) = source.into_parts();
        let name: Arc<str> = Arc::from(name);
        let first_read = declared_len.min(config.block_size() as u64) as usize;

        debug!(
            "splitting {:?} (async): {} bytes into {} blocks of at most {} bytes",
            name,
            declared_len,
            config.block_count(declared_len),
            config.block_size()
        );

        Self {
            reader: Some(reader),
            name,
            declared_len,
            config,
            buffer: Buffer::take(first_read),
            filled: 0,
            ordinal: 0,
            offset: 0,
        }
    }

    fn emit(&mut self) -> Block {
        let len = std::mem::take(&mut self.filled);
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
        if self.reader.take().is_some() {
            debug!(
                "async split of {:?} done: {} blocks, {} bytes",
                self.name, self.ordinal, self.offset
            );
        }
    }

    /// Name of the source being split.
    pub fn source_name(&self) -> &str {
        &self.name
    }

    /// Ordinal the next block will carry.
    pub fn next_ordinal(&self) -> u64 {
        self.ordinal
    }

    /// Returns true once the reader has been exhausted or has failed.
    pub fn is_finished(&self) -> bool {
        self.reader.is_none()
    }
}

impl<R: AsyncRead + Unpin> Stream for BlockStream<R> {
    type Item = Result<Block, SplitError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if this.reader.is_none() {
                return Poll::Ready(None);
            }

            let want = next_read_len(
                this.declared_len,
                this.offset,
                this.filled,
                this.config.block_size(),
            );
            if this.filled == want {
                return Poll::Ready(Some(Ok(this.emit())));
            }
            this.buffer.ensure(want);

            let Some(reader) = this.reader.as_mut() else {
                return Poll::Ready(None);
            };
            let buf = &mut this.buffer.as_mut_slice()[this.filled..want];

            match Pin::new(reader).poll_read(cx, buf) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(0)) => {
                    if this.filled > 0 {
                        return Poll::Ready(Some(Ok(this.emit())));
                    }
                    if this.offset < this.declared_len {
                        warn!(
                            "source {:?} ended after {} of {} declared bytes",
                            this.name, this.offset, this.declared_len
                        );
                    }
                    this.finish();
                    return Poll::Ready(None);
                }
                Poll::Ready(Ok(n)) => {
                    if this.filled == 0 && this.offset == this.declared_len {
                        warn!(
                            "source {:?} continues past its declared {} bytes",
                            this.name, this.declared_len
                        );
                    }
                    this.filled += n;
                }
                Poll::Ready(Err(e)) if e.kind() == ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    debug!(
                        "async split of {:?} failed at block {}: {}",
                        this.name, this.ordinal, e
                    );
                    let err = SplitError::Io {
                        source_name: this.name.to_string(),
                        ordinal: this.ordinal,
                        source: e,
                    };
                    this.finish();
                    return Poll::Ready(Some(Err(err)));
                }
            }
        }
    }
}

impl<R> std::fmt::Debug for BlockStream<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockStream")
            .field("source", &self.name)
            .field("declared_len", &self.declared_len)
            .field("block_size", &self.config.block_size())
            .field("next_ordinal", &self.ordinal)
            .field("buffered", &self.filled)
            .field("finished", &self.reader.is_none())
            .finish()
    }
}

/// Creates a block stream from an async reader.
///
/// Uses `futures_io::AsyncRead`, so it works with any runtime. Tokio
/// readers can be adapted with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use blocksplit::{split_async, NamedSource, SplitConfig};
///
/// let file = tokio::fs::File::open("data.bin").await?;
/// let len = file.metadata().await?.len();
/// let stream = split_async(NamedSource::new("data.bin", len, file.compat()), SplitConfig::default())?;
/// ```
///
/// # Errors
///
/// [`SplitError::InvalidConfiguration`] if `config` is invalid; nothing is
/// read in that case.
pub fn split_async<R: AsyncRead + Unpin>(
    source: NamedSource<R>,
    config: SplitConfig,
) -> Result<BlockStream<R>, SplitError> {
    config.validate()?;
    Ok(BlockStream::new(source, config))
}

impl Splitter {
    /// Splits an async source with this splitter's configuration.
    ///
    /// See [`split_async`].
    pub fn split_async<R: AsyncRead + Unpin>(
        &self,
        source: NamedSource<R>,
    ) -> Result<BlockStream<R>, SplitError> {
        split_async(source, *self.config())
    }
}
