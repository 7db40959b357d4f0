//! Block types.
//!
//! - [`Block`] - Payload slice with its id, offset and optional digest
//! - [`BlockId`] - Positional `"/source-ordinal"` identifier
//! - [`BlockHash`] - 32-byte BLAKE3 digest
//! - [`Manifest`] - Block layout of a source, computed without reading it

mod data;
mod hash;
mod id;
mod manifest;

pub use data::Block;
pub use hash::BlockHash;
pub use id::BlockId;
pub use manifest::{Manifest, ManifestEntry};
