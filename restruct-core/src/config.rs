// Migration manifest - migrate.json

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A single file relocation, both paths relative to the package root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveEntry {
    pub from: String,
    pub to: String,
}

/// Full migration plan (migrate.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Package root directory (the directory containing `lib/`).
    pub root: PathBuf,

    /// Package name used in canonical `package:` references.
    pub package: String,

    /// Module root directory name under `root`.
    #[serde(default = "default_source_dir")]
    pub source_dir: String,

    /// Recognized source file extension, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Ordered old-path -> new-path relocation table.
    #[serde(default)]
    pub moves: Vec<MoveEntry>,

    /// Directories created regardless of the move table.
    #[serde(default)]
    pub scaffold_dirs: Vec<String>,

    /// Directories removed after relocation if they end up empty.
    #[serde(default)]
    pub legacy_dirs: Vec<String>,
}

fn default_source_dir() -> String {
    "lib".to_string()
}

fn default_extension() -> String {
    "dart".to_string()
}

/// Validation failures for a migration plan
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("package name must not be empty")]
    EmptyPackageName,

    #[error("duplicate move source: {0}")]
    DuplicateSource(String),

    #[error("move path is outside the module root: {0}")]
    OutsideModuleRoot(String),
}

impl MigrationConfig {
    /// Load and validate a migration plan from a JSON manifest
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read manifest: {}", path.as_ref().display()))?;

        let config: MigrationConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse manifest: {}", path.as_ref().display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check the plan before any filesystem effect
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.package.is_empty() {
            return Err(ConfigError::EmptyPackageName);
        }

        let prefix = format!("{}/", self.source_dir);
        let mut seen = HashSet::new();

        for entry in &self.moves {
            if !seen.insert(entry.from.as_str()) {
                return Err(ConfigError::DuplicateSource(entry.from.clone()));
            }

            for path in [&entry.from, &entry.to] {
                if !path.starts_with(&prefix) {
                    return Err(ConfigError::OutsideModuleRoot(path.clone()));
                }
            }
        }

        Ok(())
    }

    /// Absolute path of the module root all canonical references anchor to
    pub fn module_root(&self) -> PathBuf {
        self.root.join(&self.source_dir)
    }
}
