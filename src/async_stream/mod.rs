//! Async block splitting.
//!
//! Built on `futures-io::AsyncRead`, so it runs on tokio, async-std, smol
//! or any other futures-compatible runtime.
//!
//! - [`split_async`] - Creates an async stream of blocks from an async reader
//! - [`BlockStream`] - The stream itself
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{BlockStream, split_async};
