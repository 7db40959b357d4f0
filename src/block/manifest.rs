//! Block layout of a source, computed without reading it.
//!
//! The coordination service needs the file name and block count (and
//! usually the ids) before any payload is transferred. A [`Manifest`]
//! answers those from the name, length and block size alone.

use std::sync::Arc;

use super::BlockId;

/// Where one block sits in its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// The block id.
    pub id: BlockId,
    /// Byte offset of the block within the source.
    pub offset: u64,
    /// Payload length in bytes.
    pub len: usize,
}

/// The block layout a split of `(source, len, block_size)` will produce.
///
/// # Example
///
/// ```
/// use blocksplit::Splitter;
///
/// let manifest = Splitter::with_block_size(4)?.manifest("a.txt", 10)?;
///
/// assert_eq!(manifest.block_count(), 3);
/// let ids: Vec<String> = manifest.block_ids().map(|id| id.to_string()).collect();
/// assert_eq!(ids, ["/a.txt-0", "/a.txt-1", "/a.txt-2"]);
/// assert_eq!(manifest.entry(2).unwrap().len, 2);
/// # Ok::<(), blocksplit::SplitError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    source: Arc<str>,
    len: u64,
    block_size: usize,
}

impl Manifest {
    /// `block_size` must be non-zero; [`Splitter::manifest`](crate::Splitter::manifest)
    /// validates it.
    pub(crate) fn new(source: Arc<str>, len: u64, block_size: usize) -> Self {
        debug_assert!(block_size > 0);
        Self {
            source,
            len,
            block_size,
        }
    }

    /// Name of the source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Total length of the source in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns true if the source is empty (and has no blocks).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum block size the layout was computed for.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of blocks.
    pub fn block_count(&self) -> u64 {
        self.len.div_ceil(self.block_size as u64)
    }

    /// Layout of block `ordinal`, or `None` past the end.
    pub fn entry(&self, ordinal: u64) -> Option<ManifestEntry> {
        if ordinal >= self.block_count() {
            return None;
        }
        let offset = ordinal * self.block_size as u64;
        let len = (self.len - offset).min(self.block_size as u64) as usize;
        Some(ManifestEntry {
            id: BlockId::new(Arc::clone(&self.source), ordinal),
            offset,
            len,
        })
    }

    /// Layout of the block containing byte `offset`.
    pub fn locate(&self, offset: u64) -> Option<ManifestEntry> {
        if offset >= self.len {
            return None;
        }
        self.entry(offset / self.block_size as u64)
    }

    /// All entries in ordinal order.
    pub fn entries(&self) -> impl Iterator<Item = ManifestEntry> + '_ {
        (0..self.block_count()).filter_map(|ordinal| self.entry(ordinal))
    }

    /// All block ids in ordinal order.
    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        (0..self.block_count()).map(|ordinal| BlockId::new(Arc::clone(&self.source), ordinal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(len: u64, block_size: usize) -> Manifest {
        Manifest::new(Arc::from("f"), len, block_size)
    }

    #[test]
    fn test_empty() {
        let m = manifest(0, 4);
        assert!(m.is_empty());
        assert_eq!(m.block_count(), 0);
        assert!(m.entry(0).is_none());
        assert_eq!(m.entries().count(), 0);
    }

    #[test]
    fn test_exact_multiple() {
        let m = manifest(8, 4);
        let entries: Vec<_> = m.entries().collect();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.len == 4));
        assert_eq!(entries[1].offset, 4);
    }

    #[test]
    fn test_short_tail() {
        let m = manifest(10, 4);
        let tail = m.entry(2).unwrap();
        assert_eq!(tail.id.to_string(), "/f-2");
        assert_eq!(tail.offset, 8);
        assert_eq!(tail.len, 2);
        assert!(m.entry(3).is_none());
    }

    #[test]
    fn test_locate() {
        let m = manifest(10, 4);
        assert_eq!(m.locate(0).unwrap().id.ordinal(), 0);
        assert_eq!(m.locate(3).unwrap().id.ordinal(), 0);
        assert_eq!(m.locate(4).unwrap().id.ordinal(), 1);
        assert_eq!(m.locate(9).unwrap().id.ordinal(), 2);
        assert!(m.locate(10).is_none());
    }
}
