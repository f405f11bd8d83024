// restruct-core - source-tree migration engine
// Rewrites imports to canonical form, relocates files, fixes references.

pub mod config;
pub mod migrate;
pub mod relocate;
pub mod resolver;
pub mod rewrite;
pub mod scan;

pub use config::{ConfigError, MigrationConfig, MoveEntry};
pub use migrate::{run_migration, MigrationReport};
pub use relocate::{
    prepare_directories, prune_legacy_dirs, relocate_files, remove_legacy_dir,
    substitute_references,
};
pub use resolver::Resolver;
pub use rewrite::Normalizer;
pub use scan::collect_source_files;

/// Engine version
pub const VERSION: &str = "0.1.0";
