// Directory preparation, file relocation and reference substitution

use crate::config::MigrationConfig;
use crate::resolver::Resolver;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Create every destination parent directory plus the scaffold
/// directories. Idempotent; existing directories are not an error.
pub fn prepare_directories(config: &MigrationConfig) -> Result<()> {
    let mut dirs: BTreeSet<PathBuf> = config
        .moves
        .iter()
        .filter_map(|entry| Path::new(&entry.to).parent())
        .map(Path::to_path_buf)
        .collect();

    dirs.extend(config.scaffold_dirs.iter().map(PathBuf::from));

    for dir in dirs {
        let path = config.root.join(&dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }

    Ok(())
}

/// Move every mapped file that still exists at its old path. Entries
/// whose source is already gone are skipped, so a partially applied
/// plan can be re-run safely. Returns the number of files moved.
pub fn relocate_files(config: &MigrationConfig) -> Result<usize> {
    let mut moved = 0;

    for entry in &config.moves {
        let from = config.root.join(&entry.from);
        if !from.is_file() {
            continue;
        }

        let to = config.root.join(&entry.to);
        fs::rename(&from, &to).with_context(|| {
            format!("Failed to move {} -> {}", from.display(), to.display())
        })?;
        moved += 1;
    }

    Ok(moved)
}

/// Rewrite old canonical references to new ones across `files`.
///
/// Plain substring replacement: canonical references carry the scheme
/// prefix, so they cannot collide with relative targets. A reference
/// whose path is a strict prefix of another's would still over-match;
/// the plan is expected not to contain such pairs. Returns the number
/// of files rewritten.
pub fn substitute_references(
    config: &MigrationConfig,
    resolver: &Resolver,
    files: &[PathBuf],
) -> Result<usize> {
    let table: Vec<(String, String)> = config
        .moves
        .iter()
        .filter_map(|entry| {
            let old = resolver.canonical_for(&entry.from)?;
            let new = resolver.canonical_for(&entry.to)?;
            Some((old, new))
        })
        .collect();

    let mut rewritten = 0;

    for file in files {
        let content = fs::read_to_string(file)
            .with_context(|| format!("Failed to read source file: {}", file.display()))?;

        let mut updated = content.clone();
        for (old, new) in &table {
            updated = updated.replace(old.as_str(), new.as_str());
        }

        if updated != content {
            fs::write(file, updated)
                .with_context(|| format!("Failed to write source file: {}", file.display()))?;
            rewritten += 1;
        }
    }

    Ok(rewritten)
}

/// Remove a single legacy directory. Fails quietly when the directory
/// is absent or still has contents; the caller decides whether to care.
pub fn remove_legacy_dir(path: &Path) -> bool {
    fs::remove_dir(path).is_ok()
}

/// Best-effort removal of the configured legacy directories.
/// Returns how many were actually removed.
pub fn prune_legacy_dirs(config: &MigrationConfig) -> usize {
    let mut removed = 0;

    for dir in &config.legacy_dirs {
        let path = config.root.join(dir);
        if remove_legacy_dir(&path) {
            removed += 1;
        } else {
            log::debug!("Left legacy directory in place: {}", path.display());
        }
    }

    removed
}
