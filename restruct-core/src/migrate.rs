// Migration pipeline

use crate::config::MigrationConfig;
use crate::relocate::{prepare_directories, prune_legacy_dirs, relocate_files, substitute_references};
use crate::resolver::Resolver;
use crate::rewrite::Normalizer;
use crate::scan::collect_source_files;
use anyhow::Result;

/// What a migration run actually did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub files_normalized: usize,
    pub files_moved: usize,
    pub files_substituted: usize,
    pub dirs_removed: usize,
}

/// Run the full migration: normalize imports, prepare directories, move
/// files, substitute moved references, prune legacy directories.
///
/// The order is fixed. Normalization must precede substitution so every
/// reference is in canonical form before the move table is applied, and
/// relocation must precede the second scan so moved files are rewritten
/// at their new paths.
pub fn run_migration(config: &MigrationConfig) -> Result<MigrationReport> {
    config.validate()?;

    let module_root = config.module_root();
    if !module_root.is_dir() {
        anyhow::bail!("Module root not found: {}", module_root.display());
    }

    let resolver = Resolver::new(config);
    let normalizer = Normalizer::new(resolver.clone())?;
    let mut report = MigrationReport::default();

    let files = collect_source_files(&module_root, &config.extension)?;
    report.files_normalized = normalizer.normalize_tree(&files)?;
    log::info!(
        "Normalized {} of {} source files",
        report.files_normalized,
        files.len()
    );

    prepare_directories(config)?;

    report.files_moved = relocate_files(config)?;
    log::info!(
        "Moved {} of {} mapped files",
        report.files_moved,
        config.moves.len()
    );

    let files = collect_source_files(&module_root, &config.extension)?;
    report.files_substituted = substitute_references(config, &resolver, &files)?;
    log::info!("Updated references in {} files", report.files_substituted);

    report.dirs_removed = prune_legacy_dirs(config);
    log::info!("Removed {} legacy directories", report.dirs_removed);

    Ok(report)
}
