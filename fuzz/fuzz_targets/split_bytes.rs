#![no_main]

use libfuzzer_sys::fuzz_target;
use blocksplit::{BlockId, HashConfig, SplitConfig, Splitter};

fuzz_target!(|data: Vec<u8>| {
    for block_size in [1, 3, 64, 4096, SplitConfig::default().block_size()] {
        let config = SplitConfig::new(block_size)
            .unwrap()
            .with_hash_config(HashConfig::enabled());
        let splitter = Splitter::new(config);
        let blocks = splitter.split_bytes("fuzz.bin", data.clone()).unwrap();

        // Verify: block count is ceil(len / block_size)
        assert_eq!(blocks.len(), data.len().div_ceil(block_size));

        // Verify: only the last block may be short, and none are empty
        for (i, block) in blocks.iter().enumerate() {
            assert!(!block.is_empty());
            if i < blocks.len() - 1 {
                assert_eq!(block.len(), block_size);
            }
        }

        // Verify: ids are positional and parse back
        for (i, block) in blocks.iter().enumerate() {
            assert_eq!(block.ordinal(), i as u64);
            let parsed: BlockId = block.identifier().parse().unwrap();
            assert_eq!(&parsed, block.id());
        }

        // Verify: payloads reassemble the input
        let joined: Vec<u8> = blocks.iter().flat_map(|b| b.data().to_vec()).collect();
        assert_eq!(joined, data);

        // Verify: the manifest predicts the split
        let manifest = splitter.manifest("fuzz.bin", data.len() as u64).unwrap();
        assert_eq!(manifest.block_count(), blocks.len() as u64);
        for (entry, block) in manifest.entries().zip(&blocks) {
            assert_eq!(entry.offset, block.offset());
            assert_eq!(entry.len, block.len());
        }
    }
});
