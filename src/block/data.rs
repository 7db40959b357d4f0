//! The Block type - one addressed slice of a source.

use bytes::Bytes;
use std::fmt;

use super::{BlockHash, BlockId};

/// A bounded, contiguous slice of a source together with its id.
///
/// Blocks are immutable values with no reference back to their source.
/// Whoever receives one owns it; cloning is cheap since the payload is
/// reference-counted [`Bytes`].
///
/// # Example
///
/// ```
/// use blocksplit::{Block, BlockId};
///
/// let block = Block::new(BlockId::new("a.txt", 0), &b"HELL"[..]);
///
/// assert_eq!(block.id().to_string(), "/a.txt-0");
/// assert_eq!(block.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    id: BlockId,
    data: Bytes,
    offset: u64,
    hash: Option<BlockHash>,
}

impl Block {
    /// Creates a block at offset 0 with no digest.
    pub fn new(id: BlockId, data: impl Into<Bytes>) -> Self {
        Self {
            id,
            data: data.into(),
            offset: 0,
            hash: None,
        }
    }

    pub(crate) fn from_parts(
        id: BlockId,
        data: Bytes,
        offset: u64,
        hash: Option<BlockHash>,
    ) -> Self {
        Self {
            id,
            data,
            offset,
            hash,
        }
    }

    /// The block id.
    pub fn id(&self) -> &BlockId {
        &self.id
    }

    /// The id in its string form, `"/" + source + "-" + ordinal`.
    pub fn identifier(&self) -> String {
        self.id.to_string()
    }

    /// Zero-based position of the block within its source.
    pub fn ordinal(&self) -> u64 {
        self.id.ordinal()
    }

    /// The payload bytes.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Length of the payload.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the payload is empty. Blocks produced by a split
    /// never are.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Byte offset of the payload within the source.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Byte range of the payload within the source.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.offset..self.offset + self.data.len() as u64
    }

    /// BLAKE3 digest of the payload, if hashing was enabled.
    pub fn hash(&self) -> Option<BlockHash> {
        self.hash
    }

    /// Consumes the block and returns the payload.
    pub fn into_data(self) -> Bytes {
        self.data
    }

    /// Splits the block into (id, payload).
    pub fn into_parts(self) -> (BlockId, Bytes) {
        (self.id, self.data)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({}, {} bytes @ {}", self.id, self.len(), self.offset)?;
        if let Some(hash) = self.hash {
            write!(f, ", hash={}", hash)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let block = Block::new(BlockId::new("a.txt", 1), &b"OWOR"[..]);
        assert_eq!(block.identifier(), "/a.txt-1");
        assert_eq!(block.ordinal(), 1);
        assert_eq!(block.len(), 4);
        assert!(!block.is_empty());
        assert_eq!(block.offset(), 0);
        assert!(block.hash().is_none());
    }

    #[test]
    fn test_range() {
        let block = Block::from_parts(
            BlockId::new("a.txt", 2),
            Bytes::from_static(b"LD"),
            8,
            None,
        );
        assert_eq!(block.range(), 8..10);
    }

    #[test]
    fn test_into_parts() {
        let block = Block::new(BlockId::new("x", 0), vec![1u8, 2, 3]);
        let (id, data) = block.into_parts();
        assert_eq!(id, BlockId::new("x", 0));
        assert_eq!(&data[..], &[1, 2, 3]);
    }

    #[test]
    fn test_display() {
        let block = Block::from_parts(
            BlockId::new("a.txt", 2),
            Bytes::from_static(b"LD"),
            8,
            Some(BlockHash::new([0u8; 32])),
        );
        let s = block.to_string();
        assert!(s.starts_with("Block(/a.txt-2, 2 bytes @ 8"));
        assert!(s.contains("hash=0000"));
    }
}
