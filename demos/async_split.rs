//! Async file splitting with tokio.
//!
//! Several files are split concurrently; each stream owns its own reader
//! and buffer.
//!
//! Run with:
//!     cargo run --example async_split --features async-io -- FILE...

use std::path::Path;

use blocksplit::{NamedSource, SplitError, Splitter};
use futures_util::StreamExt;
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        paths = vec!["Cargo.toml".to_string(), "README.md".to_string()];
    }

    let splitter = Splitter::with_block_size(4096)?;

    println!("Splitting {} files concurrently...\n", paths.len());

    let handles: Vec<_> = paths
        .into_iter()
        .map(|path| tokio::spawn(async move { split_one(splitter, path).await }))
        .collect();

    for handle in handles {
        let (path, blocks, bytes) = handle.await??;
        println!("{}: {} blocks, {} bytes", path, blocks, bytes);
    }

    Ok(())
}

async fn split_one(
    splitter: Splitter,
    path: String,
) -> Result<(String, usize, u64), SplitError> {
    let open_err = |source| SplitError::Open {
        path: path.clone().into(),
        source,
    };
    let file = tokio::fs::File::open(&path).await.map_err(open_err)?;
    let len = file.metadata().await.map_err(open_err)?.len();
    let name = Path::new(&path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.clone());

    let mut stream = splitter.split_async(NamedSource::new(name, len, file.compat()))?;
    let mut blocks = 0;
    let mut bytes = 0;

    while let Some(block) = stream.next().await {
        let block = block?;
        blocks += 1;
        bytes += block.len() as u64;
    }

    Ok((path, blocks, bytes))
}
