//! BLAKE3 block digests.

use crate::block::BlockHash;

/// One-shot BLAKE3 digest of a block payload.
pub(crate) fn digest(data: &[u8]) -> BlockHash {
    BlockHash::new(blake3::hash(data).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_reference_vector() {
        // BLAKE3 of the empty input.
        assert_eq!(
            digest(b"").to_hex(),
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }

    #[test]
    fn test_incremental_agrees_with_one_shot() {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"HELLO");
        hasher.update(b"WORLD");
        let incremental = BlockHash::new(hasher.finalize().into());
        assert_eq!(incremental, digest(b"HELLOWORLD"));
    }
}
