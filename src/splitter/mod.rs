//! Block splitting.
//!
//! - [`Splitter`] - Configured entry point for every kind of source
//! - [`BlockIter`] - Lazy block iterator over a [`BlockSource`](crate::BlockSource)

mod engine;
mod iter;

pub use engine::Splitter;
pub use iter::BlockIter;

#[cfg(feature = "async-io")]
pub(crate) use iter::next_read_len;
