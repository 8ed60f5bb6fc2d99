//! Search - regex search over the scalar fields of cached documents

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use std::io::{self, Write};
use std::path::Path;

use crate::cache::scan::CacheScanner;
use crate::core::render::Block;

/// Compile a case-insensitive query
pub fn compile_query(query: &str) -> Result<Regex> {
    RegexBuilder::new(query)
        .case_insensitive(true)
        .build()
        .with_context(|| format!("Invalid search query: {}", query))
}

/// Write the blocks whose field lines match `query`, returning the match count.
/// The `file_path` title is not searched.
pub fn search(scanner: &CacheScanner, query: &Regex, out: &mut impl Write) -> Result<usize> {
    let mut count = 0;
    for entry in scanner.entries() {
        let entry = entry?;
        let block = Block::new(&entry.path, &entry.document);
        if query.is_match(&block.contents) {
            write!(out, "{}", block)?;
            count += 1;
        }
    }
    Ok(count)
}

/// Run the cache search command
pub fn run_search(cache_dir: &Path, query: &str) -> Result<()> {
    let regex = compile_query(query)?;
    let scanner = CacheScanner::new(cache_dir);
    let stdout = io::stdout();
    let count = search(&scanner, &regex, &mut stdout.lock())?;
    tracing::debug!("{count} cache files matched {query:?}");
    Ok(())
}
