//! Positional block identifiers.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ParseBlockIdError;

/// Identifies one block of a source: `"/" + source + "-" + ordinal`.
///
/// The string form is the key storage nodes and the coordination service
/// index blocks by, so [`Display`](fmt::Display) must stay bit-exact.
///
/// Ids order by source name first, then ordinal.
///
/// # Example
///
/// ```
/// use blocksplit::BlockId;
///
/// let id = BlockId::new("a.txt", 2);
/// assert_eq!(id.to_string(), "/a.txt-2");
///
/// let parsed: BlockId = "/my-file.bin-17".parse()?;
/// assert_eq!(parsed.source(), "my-file.bin");
/// assert_eq!(parsed.ordinal(), 17);
/// # Ok::<(), blocksplit::ParseBlockIdError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId {
    source: Arc<str>,
    ordinal: u64,
}

impl BlockId {
    /// Creates the id of block `ordinal` of `source`.
    pub fn new(source: impl Into<Arc<str>>, ordinal: u64) -> Self {
        Self {
            source: source.into(),
            ordinal,
        }
    }

    /// Name of the source this block was cut from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Zero-based position of the block within its source.
    pub fn ordinal(&self) -> u64 {
        self.ordinal
    }

    /// Id of the block that follows this one in the same source.
    pub fn next(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            ordinal: self.ordinal + 1,
        }
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}-{}", self.source, self.ordinal)
    }
}

impl FromStr for BlockId {
    type Err = ParseBlockIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix('/').ok_or(ParseBlockIdError::MissingPrefix)?;
        // Source names may contain '-', the ordinal never does.
        let (source, ordinal) = rest
            .rsplit_once('-')
            .ok_or(ParseBlockIdError::MissingSeparator)?;

        if source.is_empty() {
            return Err(ParseBlockIdError::EmptySourceName);
        }
        if ordinal.is_empty() || !ordinal.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseBlockIdError::InvalidOrdinal(ordinal.to_string()));
        }
        let ordinal = ordinal
            .parse()
            .map_err(|_| ParseBlockIdError::InvalidOrdinal(ordinal.to_string()))?;

        Ok(Self::new(source, ordinal))
    }
}

impl From<BlockId> for String {
    fn from(id: BlockId) -> Self {
        id.to_string()
    }
}
