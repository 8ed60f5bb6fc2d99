//! Inspect - dump every non-empty cached document

use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;

use crate::cache::scan::CacheScanner;
use crate::core::render::Block;

/// Write one block per non-empty cache file, returning the block count
pub fn inspect(scanner: &CacheScanner, out: &mut impl Write) -> Result<usize> {
    let mut count = 0;
    for entry in scanner.entries() {
        let entry = entry?;
        write!(out, "{}", Block::new(&entry.path, &entry.document))?;
        count += 1;
    }
    Ok(count)
}

/// Run the cache inspect command
pub fn run_inspect(cache_dir: &Path) -> Result<()> {
    let scanner = CacheScanner::new(cache_dir);
    let stdout = io::stdout();
    let count = inspect(&scanner, &mut stdout.lock())?;
    tracing::debug!("inspected {count} cache files under {:?}", scanner.root());
    Ok(())
}
