//! Basic in-memory splitting example.
//!
//! Run with:
//!     cargo run --example split_basic

use blocksplit::{NamedSource, Splitter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data = b"HELLOWORLD";
    let splitter = Splitter::with_block_size(4)?;

    println!("Splitting {} bytes into blocks of {}...\n", data.len(), 4);

    for block in splitter.split(NamedSource::from_bytes("a.txt", &data[..]))? {
        let block = block?;
        println!(
            "{:<10} offset={:>2} len={} data={:?}",
            block.id().to_string(),
            block.offset(),
            block.len(),
            String::from_utf8_lossy(block.data())
        );
    }

    Ok(())
}
