#![no_main]

use std::io::{self, Read};

use libfuzzer_sys::fuzz_target;
use bytes::Bytes;
use blocksplit::{NamedSource, Splitter};

/// Serves the input in read sizes chosen by the fuzzer.
struct Choppy<'a> {
    data: &'a [u8],
    steps: &'a [u8],
    turn: usize,
}

impl Read for Choppy<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let step = match self.steps {
            [] => buf.len(),
            steps => steps[self.turn % steps.len()] as usize + 1,
        };
        self.turn += 1;
        let n = step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fuzz_target!(|input: (u8, Vec<u8>, Vec<u8>)| {
    let (size, steps, data) = input;
    let block_size = size as usize % 97 + 1;
    let splitter = Splitter::with_block_size(block_size).unwrap();

    let reader = Choppy {
        data: &data,
        steps: &steps,
        turn: 0,
    };
    let streamed = splitter
        .split_all(NamedSource::new("fuzz.bin", data.len() as u64, reader))
        .unwrap();

    // Verify: however the reads are chopped, the blocks match the in-memory split
    let expected = splitter
        .split_bytes("fuzz.bin", Bytes::from(data.clone()))
        .unwrap();
    assert_eq!(streamed, expected);
});
