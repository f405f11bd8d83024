// Line-anchored import/export/part rewriting

use crate::resolver::Resolver;
use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// Matches a single-line declaration: leading whitespace, keyword, quoted
/// target, arbitrary trailing content (`as`/`show`/`hide` clauses, `;`).
/// Multi-line and conditional declarations do not match and are left alone.
const DECLARATION_PATTERN: &str =
    r#"(?m)^([ \t]*(?:import|export|part)[ \t]+)(['"])(.+?)(['"].*)$"#;

/// Rewrites relative import targets into canonical references,
/// preserving everything around the target verbatim.
pub struct Normalizer {
    resolver: Resolver,
    pattern: Regex,
}

impl Normalizer {
    pub fn new(resolver: Resolver) -> Result<Self> {
        let pattern =
            Regex::new(DECLARATION_PATTERN).context("Invalid declaration pattern")?;

        Ok(Self { resolver, pattern })
    }

    /// Rewrite every recognized declaration in `content`, resolving targets
    /// against `file_path`. Returns `None` when nothing changed.
    pub fn normalize_source(&self, file_path: &Path, content: &str) -> Option<String> {
        let rewritten = self.pattern.replace_all(content, |caps: &Captures| {
            let target = &caps[3];
            let resolved = self.resolver.resolve(file_path, target);
            format!("{}{}{}{}", &caps[1], &caps[2], resolved, &caps[4])
        });

        match rewritten {
            Cow::Borrowed(_) => None,
            Cow::Owned(text) if text == content => None,
            Cow::Owned(text) => Some(text),
        }
    }

    /// Normalize a file on disk. Writes only when the text changed, so
    /// untouched files keep their modification time. Returns whether the
    /// file was rewritten.
    pub fn normalize_file(&self, path: &Path) -> Result<bool> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file: {}", path.display()))?;

        match self.normalize_source(path, &content) {
            Some(rewritten) => {
                fs::write(path, rewritten)
                    .with_context(|| format!("Failed to write source file: {}", path.display()))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Normalize every file in `files`; returns how many were rewritten.
    pub fn normalize_tree(&self, files: &[PathBuf]) -> Result<usize> {
        let mut rewritten = 0;

        for file in files {
            if self.normalize_file(file)? {
                rewritten += 1;
            }
        }

        Ok(rewritten)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MigrationConfig;

    fn normalizer() -> Normalizer {
        let config = MigrationConfig {
            root: PathBuf::from("/pkg"),
            package: "app".to_string(),
            source_dir: "lib".to_string(),
            extension: "dart".to_string(),
            moves: Vec::new(),
            scaffold_dirs: Vec::new(),
            legacy_dirs: Vec::new(),
        };
        Normalizer::new(Resolver::new(&config)).unwrap()
    }

    #[test]
    fn test_round_trip_example() {
        let n = normalizer();
        let file = Path::new("/pkg/lib/features/x/helper_user.dart");
        let source = "import 'utils/helper.dart';\n";

        assert_eq!(
            n.normalize_source(file, source).as_deref(),
            Some("import 'package:app/features/x/utils/helper.dart';\n")
        );
    }

    #[test]
    fn test_quote_and_trailing_content_preserved() {
        let n = normalizer();
        let file = Path::new("/pkg/lib/main.dart");
        let source = "import \"models/user.dart\" as user show User, Role;\n";

        assert_eq!(
            n.normalize_source(file, source).as_deref(),
            Some("import \"package:app/models/user.dart\" as user show User, Role;\n")
        );
    }

    #[test]
    fn test_export_and_part_keywords() {
        let n = normalizer();
        let file = Path::new("/pkg/lib/api.dart");
        let source = "export 'models/user.dart';\npart 'api_impl.dart';\n";

        assert_eq!(
            n.normalize_source(file, source).as_deref(),
            Some("export 'package:app/models/user.dart';\npart 'package:app/api_impl.dart';\n")
        );
    }

    #[test]
    fn test_indented_declaration() {
        let n = normalizer();
        let file = Path::new("/pkg/lib/main.dart");
        let source = "  import 'util.dart';\n";

        assert_eq!(
            n.normalize_source(file, source).as_deref(),
            Some("  import 'package:app/util.dart';\n")
        );
    }

    #[test]
    fn test_already_canonical_is_noop() {
        let n = normalizer();
        let file = Path::new("/pkg/lib/main.dart");
        let source = concat!(
            "import 'package:app/util.dart';\n",
            "import 'package:flutter/material.dart';\n",
            "import 'dart:async';\n",
        );

        assert_eq!(n.normalize_source(file, source), None);
    }

    #[test]
    fn test_unrecognized_declarations_untouched() {
        let n = normalizer();
        let file = Path::new("/pkg/lib/main.dart");
        // `part of` and multi-line imports fall outside the pattern.
        let source = concat!(
            "part of 'library.dart';\n",
            "import\n",
            "    'weird.dart';\n",
            "void main() {}\n",
        );

        assert_eq!(n.normalize_source(file, source), None);
    }

    #[test]
    fn test_non_import_lines_untouched() {
        let n = normalizer();
        let file = Path::new("/pkg/lib/main.dart");
        let source = concat!(
            "import 'util.dart';\n",
            "\n",
            "final label = 'util.dart';\n",
        );

        let rewritten = n.normalize_source(file, source).unwrap();
        assert!(rewritten.contains("import 'package:app/util.dart';"));
        assert!(rewritten.contains("final label = 'util.dart';"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let n = normalizer();
        let file = Path::new("/pkg/lib/screens/login.dart");
        let source = "import '../services/api.dart';\n";

        let first = n.normalize_source(file, source).unwrap();
        assert_eq!(n.normalize_source(file, &first), None);
    }
}
