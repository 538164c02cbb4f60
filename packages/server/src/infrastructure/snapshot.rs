//! Inventory snapshot written on the operator's `WRITE` command.

use std::{fs, io, path::Path};

/// Overwrite `path` with `listing` followed by a newline
pub fn write_snapshot(path: &Path, listing: &str) -> io::Result<()> {
    let mut contents = String::with_capacity(listing.len() + 1);
    contents.push_str(listing);
    if !listing.is_empty() {
        contents.push('\n');
    }
    fs::write(path, contents)?;
    tracing::info!("Wrote inventory snapshot to {}", path.display());
    Ok(())
}
