use anyhow::Result;
use restruct_core::{run_migration, MigrationConfig};
use std::path::Path;

/// Manifest the tool expects in the working directory. The migration is
/// a one-shot batch run; there are no flags.
const MANIFEST: &str = "migrate.json";

fn main() -> Result<()> {
    env_logger::init();

    let manifest = Path::new(MANIFEST);
    if !manifest.exists() {
        anyhow::bail!("{} not found in the current directory", MANIFEST);
    }

    let config = MigrationConfig::from_file(manifest)?;
    log::info!(
        "Migrating {} ({} planned moves)",
        config.module_root().display(),
        config.moves.len()
    );

    let report = run_migration(&config)?;

    println!("✅ Migration complete");
    println!("   {} files normalized", report.files_normalized);
    println!("   {} files moved", report.files_moved);
    println!("   {} files updated for moved references", report.files_substituted);
    println!("   {} legacy directories removed", report.dirs_removed);

    Ok(())
}
