//! Remove - delete cached documents, optionally only the empty ones

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::cache::scan::{accept_all, only_empty, CacheScanner, DocumentFilter};

/// Which cache files a removal targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveScope {
    All,
    OnlyEmpty,
}

impl RemoveScope {
    pub fn from_empty_flag(empty: bool) -> Self {
        if empty {
            RemoveScope::OnlyEmpty
        } else {
            RemoveScope::All
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            RemoveScope::All => "all cached data",
            RemoveScope::OnlyEmpty => "only empty JSON cached data",
        }
    }

    pub fn scanner(&self, cache_dir: &Path) -> CacheScanner {
        let filter: DocumentFilter = match self {
            RemoveScope::All => accept_all,
            RemoveScope::OnlyEmpty => only_empty,
        };
        CacheScanner::new(cache_dir).with_filter(filter)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RemoveOptions {
    pub scope: RemoveScope,
    pub force: bool,
    pub dry_run: bool,
}

/// Ask a yes/no question, defaulting to no.
///
/// EOF counts as no; unrecognized answers re-prompt.
pub fn confirm(question: &str, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    loop {
        write!(out, "{} {}: ", question, "[y/N]".bold())?;
        out.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            writeln!(out)?;
            return Ok(false);
        }

        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "" | "n" | "no" => return Ok(false),
            _ => writeln!(out, "Error: invalid input")?,
        }
    }
}

/// Delete every file the scanner yields, echoing each path.
///
/// Stops at the first failure; files deleted before it stay deleted.
pub fn remove_entries(
    scanner: &CacheScanner,
    dry_run: bool,
    out: &mut impl Write,
) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for entry in scanner.entries() {
        let entry = entry?;
        if dry_run {
            writeln!(out, "{} {}", "Would delete:".yellow(), entry.path.display())?;
        } else {
            fs::remove_file(&entry.path)
                .with_context(|| format!("Failed to delete cache file: {:?}", entry.path))?;
            writeln!(out, "{} {}", "Deleted:".red(), entry.path.display())?;
        }
        removed.push(entry.path);
    }
    Ok(removed)
}

/// Remove cache files, asking for confirmation unless forced
pub fn remove(
    cache_dir: &Path,
    options: RemoveOptions,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Vec<PathBuf>> {
    let scanner = options.scope.scanner(cache_dir);

    if options.dry_run {
        return remove_entries(&scanner, true, out);
    }

    if options.force {
        writeln!(out, "Now deleting ...")?;
    } else {
        let question = format!("Do you want to delete {}?", options.scope.describe());
        if !confirm(&question, input, out)? {
            bail!("Aborted!");
        }
        writeln!(out, "Confirmed. Now deleting ...")?;
    }

    remove_entries(&scanner, false, out)
}

/// Run the cache rm command
pub fn run_remove(cache_dir: &Path, options: RemoveOptions) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let removed = remove(cache_dir, options, &mut stdin.lock(), &mut stdout.lock())?;
    tracing::debug!("{} cache files targeted under {:?}", removed.len(), cache_dir);
    Ok(())
}
