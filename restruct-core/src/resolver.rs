// Canonical reference resolution for import targets

use crate::config::MigrationConfig;
use std::path::{Component, Path, PathBuf};

/// Scheme prefixes that identify targets outside the managed namespace.
/// These are never rewritten.
const PASSTHROUGH_PREFIXES: &[&str] = &["package:", "dart:"];

/// Translates import targets into canonical `package:` references
/// anchored at the module root.
#[derive(Debug, Clone)]
pub struct Resolver {
    module_root: PathBuf,
    source_dir: String,
    package: String,
}

impl Resolver {
    pub fn new(config: &MigrationConfig) -> Self {
        Self {
            module_root: config.module_root(),
            source_dir: config.source_dir.clone(),
            package: config.package.clone(),
        }
    }

    /// Resolve `target` as written in the file at `current_file`.
    ///
    /// Relative targets that land under the module root become canonical
    /// references. Everything else (external schemes, targets escaping the
    /// root, malformed paths) comes back unchanged; resolution is
    /// best-effort and never fails the batch rewrite.
    pub fn resolve(&self, current_file: &Path, target: &str) -> String {
        if is_external(target) {
            return target.to_string();
        }

        let dir = match current_file.parent() {
            Some(dir) => dir,
            None => return target.to_string(),
        };

        let absolute = normalize(&dir.join(target));

        let relative = match absolute.strip_prefix(&self.module_root) {
            Ok(relative) => relative,
            Err(_) => return target.to_string(),
        };

        match forward_slashes(relative) {
            Some(relative) => format!("package:{}/{}", self.package, relative),
            None => target.to_string(),
        }
    }

    /// Canonical reference for a path relative to the package root,
    /// e.g. `lib/a.dart` -> `package:app/a.dart`. `None` for paths
    /// outside the module root, which have no canonical form.
    pub fn canonical_for(&self, package_relative: &str) -> Option<String> {
        let prefix = format!("{}/", self.source_dir);
        let rest = package_relative.strip_prefix(&prefix)?;
        Some(format!("package:{}/{}", self.package, rest))
    }
}

/// Whether `target` uses an external or standard-library scheme
pub fn is_external(target: &str) -> bool {
    PASSTHROUGH_PREFIXES
        .iter()
        .any(|prefix| target.starts_with(prefix))
}

/// Lexical `.`/`..` normalization; never touches the filesystem.
/// A `..` that climbs past the top is kept, leaving a path that will
/// not match the module root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }

    out
}

/// Render a relative path with `/` separators regardless of platform
fn forward_slashes(path: &Path) -> Option<String> {
    let parts: Option<Vec<&str>> = path
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect();

    parts.map(|parts| parts.join("/"))
}
