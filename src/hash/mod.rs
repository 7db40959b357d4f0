//! Block payload digests.
//!
//! BLAKE3 via the `hash-blake3` feature. Without it, hashing requests are
//! ignored and blocks carry no digest.

#[cfg(feature = "hash-blake3")]
mod blake3;

use crate::block::BlockHash;
use crate::config::HashConfig;

/// Digest of `data` if `config` asks for one and a hash backend is compiled in.
pub(crate) fn block_digest(config: &HashConfig, data: &[u8]) -> Option<BlockHash> {
    if !config.enabled {
        return None;
    }
    #[cfg(feature = "hash-blake3")]
    return Some(self::blake3::digest(data));
    #[cfg(not(feature = "hash-blake3"))]
    {
        let _ = data;
        None
    }
}
