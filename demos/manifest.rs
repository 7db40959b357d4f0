//! Block layout example.
//!
//! Computes the ids a write request would announce for a file, without
//! reading it.
//!
//! Run with:
//!     cargo run --example manifest -- /path/to/file

use std::env;
use std::path::Path;

use blocksplit::{BlockId, Splitter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args().nth(1).unwrap_or_else(|| "Cargo.toml".to_string());
    let name = Path::new(&path)
        .file_name()
        .ok_or("path has no file name")?
        .to_string_lossy()
        .into_owned();
    let len = std::fs::metadata(&path)?.len();

    let manifest = Splitter::with_block_size(1024)?.manifest(&name, len)?;

    println!(
        "write {} ({} bytes): {} blocks\n",
        manifest.source(),
        manifest.len(),
        manifest.block_count()
    );

    for entry in manifest.entries() {
        println!("{:<24} offset={:>8} len={:>5}", entry.id.to_string(), entry.offset, entry.len);
    }

    // Ids round-trip through their text form.
    if let Some(last) = manifest.block_ids().last() {
        let parsed: BlockId = last.to_string().parse()?;
        println!("\nlast block: source={} ordinal={}", parsed.source(), parsed.ordinal());
    }

    Ok(())
}
