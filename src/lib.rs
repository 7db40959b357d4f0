//! blocksplit
//!
//! Client-side block splitting for distributed block storage.
//!
//! `blocksplit` cuts a file or byte stream into fixed-size blocks and gives
//! each one a deterministic, positional id, `"/" + source + "-" + ordinal`.
//! Every block except the last is exactly the configured size; the last
//! holds the remainder. Concatenating the payloads in ordinal order gives
//! back the source.
//!
//! The crate intentionally:
//! - does NOT send blocks anywhere
//! - does NOT track which node stores which block
//! - does NOT retry failed reads
//! - does NOT persist anything
//!
//! It only does one thing: **Read bytes → yield addressed blocks**
//!
//! # Sync
//!
//! ```no_run
//! use blocksplit::{SplitError, Splitter};
//!
//! fn main() -> Result<(), SplitError> {
//!     let splitter = Splitter::with_block_size(64 * 1024 * 1024)?;
//!
//!     for block in splitter.split_file("data.bin")? {
//!         let block = block?;
//!         println!("{} ({} bytes)", block.id(), block.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use blocksplit::{split_async, NamedSource, SplitConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(len: u64, reader: R) -> Result<(), blocksplit::SplitError> {
//!     let source = NamedSource::new("data.bin", len, reader);
//!     let mut stream = split_async(source, SplitConfig::default())?;
//!
//!     while let Some(block) = stream.next().await {
//!         let block = block?;
//!         println!("{}", block.id());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod block;
mod config;
mod error;
mod source;
mod splitter;

mod buffer; // internal (thread-local reuse)
mod hash; // internal blake3 digests

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use block::{Block, BlockHash, BlockId, Manifest, ManifestEntry};
pub use config::{DEFAULT_BLOCK_SIZE, HashConfig, SplitConfig};
pub use error::{ParseBlockIdError, SplitError};
pub use source::{BlockSource, NamedSource};
pub use splitter::{BlockIter, Splitter};

#[cfg(feature = "async-io")]
pub use async_stream::{BlockStream, split_async};
