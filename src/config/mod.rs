//! Configuration for block splitting.
//!
//! - [`SplitConfig`] - Maximum block size and hashing
//! - [`HashConfig`] - Per-block digest control
//!
//! # Example
//!
//! ```
//! use blocksplit::{HashConfig, SplitConfig};
//!
//! let config = SplitConfig::new(1024 * 1024)?
//!     .with_hash_config(HashConfig::enabled());
//! assert_eq!(config.block_count(3 * 1024 * 1024 + 1), 4);
//! # Ok::<(), blocksplit::SplitError>(())
//! ```

use crate::error::SplitError;

/// Default maximum block size (4 MiB).
pub const DEFAULT_BLOCK_SIZE: usize = 4 * 1024 * 1024;

/// Configuration for fixed-size block splitting.
///
/// Every block except the last of a source is exactly `block_size` bytes;
/// the last holds whatever remains (at least one byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SplitConfig {
    block_size: usize,
    hash_config: HashConfig,
}

impl SplitConfig {
    /// Creates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidConfiguration`] if `block_size` is zero.
    pub fn new(block_size: usize) -> Result<Self, SplitError> {
        if block_size == 0 {
            return Err(SplitError::invalid("block size must be non-zero"));
        }

        Ok(Self {
            block_size,
            hash_config: HashConfig::default(),
        })
    }

    /// Sets the maximum block size.
    ///
    /// Note: this does not validate. Splitting re-checks the configuration
    /// before reading, or call [`SplitConfig::validate`].
    pub fn with_block_size(mut self, size: usize) -> Self {
        self.block_size = size;
        self
    }

    /// Sets the hash configuration.
    pub fn with_hash_config(mut self, config: HashConfig) -> Self {
        self.hash_config = config;
        self
    }

    /// Returns the maximum block size.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns the hash configuration.
    pub fn hash_config(&self) -> &HashConfig {
        &self.hash_config
    }

    /// Number of blocks a source of `len` bytes splits into.
    ///
    /// Zero for an empty source. A zero block size also yields zero; such a
    /// config never reaches a split.
    pub fn block_count(&self, len: u64) -> u64 {
        if self.block_size == 0 {
            return 0;
        }
        len.div_ceil(self.block_size as u64)
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), SplitError> {
        Self::new(self.block_size).map(|_| ())
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            hash_config: HashConfig::default(),
        }
    }
}

/// Block sizes read from signed configuration sources (env vars, JSON
/// numbers, ...). Zero and negative values are rejected.
impl TryFrom<i64> for SplitConfig {
    type Error = SplitError;

    fn try_from(block_size: i64) -> Result<Self, Self::Error> {
        if block_size <= 0 {
            return Err(SplitError::invalid("block size must be positive"));
        }
        let block_size = usize::try_from(block_size)
            .map_err(|_| SplitError::invalid("block size does not fit in memory"))?;
        Self::new(block_size)
    }
}

/// Configuration for per-block hashing.
///
/// Controls whether a BLAKE3 digest of each payload is attached to the
/// block. Block identity is positional, so hashing is off by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HashConfig {
    /// Whether to compute BLAKE3 digests.
    pub enabled: bool,
}

impl HashConfig {
    /// Creates a new hash configuration.
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Enables hashing.
    pub const fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Disables hashing.
    pub const fn disabled() -> Self {
        Self { enabled: false }
    }
}
