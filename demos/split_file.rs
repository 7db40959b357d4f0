//! File splitting example.
//!
//! Run with:
//!     cargo run --example split_file -- /path/to/file [block_size]

use std::env;

use blocksplit::{HashConfig, SplitConfig, Splitter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "Cargo.toml".to_string());
    let block_size: i64 = match args.next() {
        Some(arg) => arg.parse()?,
        None => 64 * 1024,
    };

    let config = SplitConfig::try_from(block_size)?.with_hash_config(HashConfig::enabled());
    let splitter = Splitter::new(config);

    let blocks = splitter.split_file(&path)?;
    println!(
        "Splitting {} into {} blocks of at most {} bytes\n",
        path,
        blocks.expected_blocks(),
        config.block_size()
    );

    let mut total_blocks = 0;
    let mut total_bytes = 0;

    for block in blocks {
        let block = block?;
        total_blocks += 1;
        total_bytes += block.len();

        match block.hash() {
            Some(hash) => println!(
                "{}: offset={:>10}, len={:>8}, hash={}",
                block.id(),
                block.offset(),
                block.len(),
                hash
            ),
            None => println!(
                "{}: offset={:>10}, len={:>8}",
                block.id(),
                block.offset(),
                block.len()
            ),
        }
    }

    println!("\nTotal: {} blocks, {} bytes", total_blocks, total_bytes);

    Ok(())
}
