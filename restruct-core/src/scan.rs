// Source tree walking

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Collect every file with `extension` under `root`, recursively.
/// Sorted for deterministic processing; the rewrite passes do not
/// depend on order.
pub fn collect_source_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    visit(root, extension, &mut files)?;
    files.sort();

    Ok(files)
}

fn visit(dir: &Path, extension: &str, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            visit(&path, extension, files)?;
        } else if path.extension().and_then(|ext| ext.to_str()) == Some(extension) {
            files.push(path);
        }
    }

    Ok(())
}
