//! Module identifier rebranding
//!
//! Rewrites the `go.mod` declaration and every `<old>/...` import path in the
//! project's source files to use the new module identifier.

use crate::config::GeneratorConfig;
use crate::error::{Result, ScaffoldError};
use crate::manifest;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into
const SKIPPED_DIRS: &[&str] = &[".git"];

/// A source file that could not be rewritten
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// What the tree-wide pass did
#[derive(Debug, Default)]
pub struct RewriteReport {
    pub files_scanned: usize,
    pub files_rewritten: Vec<PathBuf>,
    /// Per-file failures; the walk carried on past each of them
    pub failures: Vec<FileFailure>,
}

/// Replaces one module identifier with another across a project
#[derive(Debug, Clone)]
pub struct ModuleIdentifierRewriter {
    old_identifier: String,
    new_identifier: String,
    config: GeneratorConfig,
}

impl ModuleIdentifierRewriter {
    pub fn new(old_identifier: impl Into<String>, new_identifier: impl Into<String>) -> Self {
        Self {
            old_identifier: old_identifier.into(),
            new_identifier: new_identifier.into(),
            config: GeneratorConfig::default(),
        }
    }

    /// Use the project's configured source extensions
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Rewrite the manifest, then every source file under `project_root`
    pub fn rewrite(&self, project_root: &Path) -> Result<RewriteReport> {
        manifest::rewrite_manifest(project_root, &self.new_identifier)?;
        self.rewrite_tree(project_root)
    }

    /// Rewrite import references in source files only
    pub fn rewrite_tree(&self, project_root: &Path) -> Result<RewriteReport> {
        fs::read_dir(project_root).map_err(|e| ScaffoldError::RootUnreadable {
            path: project_root.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut report = RewriteReport::default();
        let walker = WalkDir::new(project_root)
            .into_iter()
            .filter_entry(|entry| !is_skipped_dir(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    report.failures.push(FileFailure {
                        path: e
                            .path()
                            .map(Path::to_path_buf)
                            .unwrap_or_else(|| project_root.to_path_buf()),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if !entry.file_type().is_file() || !self.config.is_source_file(entry.path()) {
                continue;
            }

            report.files_scanned += 1;
            match self.rewrite_file(entry.path()) {
                Ok(true) => report.files_rewritten.push(entry.into_path()),
                Ok(false) => {}
                Err(e) => report.failures.push(FileFailure {
                    path: entry.into_path(),
                    reason: e.to_string(),
                }),
            }
        }

        Ok(report)
    }

    /// Returns whether the file changed
    fn rewrite_file(&self, path: &Path) -> io::Result<bool> {
        let content = fs::read_to_string(path)?;
        match replace_module_references(&content, &self.old_identifier, &self.new_identifier) {
            Some(updated) => {
                fs::write(path, updated)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

/// Characters that can continue an import path or identifier to the left
fn is_path_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | '~')
}

/// Replace `old/` with `new/` wherever `old` is a whole leading path segment.
///
/// A match must be followed by `/` and must not be preceded by a path
/// character, so `oldmodx/pkg` and `github.com/oldmod/pkg` are left alone
/// while both `"oldmod/pkg"` and bare `oldmod/pkg` are rewritten.
/// Returns `None` when nothing matched.
pub fn replace_module_references(content: &str, old: &str, new: &str) -> Option<String> {
    if old.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(content.len());
    let mut last = 0;
    let mut changed = false;

    for (start, _) in content.match_indices(old) {
        if start < last {
            continue;
        }
        let end = start + old.len();
        let followed_by_separator = content[end..].starts_with('/');
        let left_boundary = content[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !is_path_char(c));

        if followed_by_separator && left_boundary {
            out.push_str(&content[last..start]);
            out.push_str(new);
            last = end;
            changed = true;
        }
    }

    if !changed {
        return None;
    }
    out.push_str(&content[last..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_boundary_safe_replacement() {
        let content = "import (\n\t\"oldmod/pkg\"\n\t\"oldmodx/pkg\"\n)\n";
        let updated = replace_module_references(content, "oldmod", "newmod").unwrap();
        assert_eq!(updated, "import (\n\t\"newmod/pkg\"\n\t\"oldmodx/pkg\"\n)\n");
    }

    #[test]
    fn test_aliased_and_bare_references() {
        let content = "import goNext \"goNext/app\"\n// see goNext/app/user for details\n";
        let updated = replace_module_references(content, "goNext", "shop").unwrap();
        assert_eq!(
            updated,
            "import goNext \"shop/app\"\n// see shop/app/user for details\n"
        );
    }

    #[test]
    fn test_identifier_without_separator_untouched() {
        assert_eq!(
            replace_module_references("var oldmod = 1\n", "oldmod", "newmod"),
            None
        );
    }

    #[test]
    fn test_longer_path_not_rewritten() {
        let content = "\"github.com/acme/oldmod/pkg\"\n\"myoldmod/pkg\"\n";
        assert_eq!(replace_module_references(content, "oldmod", "newmod"), None);
    }

    #[test]
    fn test_identifier_with_slashes() {
        let content = "\"github.com/acme/starter/app\"\n\"github.com/acme/starterkit/app\"\n";
        let updated =
            replace_module_references(content, "github.com/acme/starter", "example.com/shop")
                .unwrap();
        assert_eq!(
            updated,
            "\"example.com/shop/app\"\n\"github.com/acme/starterkit/app\"\n"
        );
    }

    #[test]
    fn test_single_pass_no_double_substitution() {
        // New identifier contains the old one followed by a separator
        let updated = replace_module_references("\"app/x\"", "app", "app/v2").unwrap();
        assert_eq!(updated, "\"app/v2/x\"");
    }

    fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_rewrite_project_tree() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "go.mod", "module oldmod\n\ngo 1.22\n");
        let main = write(root, "main.go", "package main\n\nimport \"oldmod/app\"\n");
        let user = write(
            root,
            "app/user/module.go",
            "package user\n\nimport \"oldmod/app/user/service\"\n",
        );
        let untouched = write(root, "app/util.go", "package app\n");
        let readme = write(root, "README.md", "see oldmod/app\n");
        write(root, ".git/hooks/x.go", "import \"oldmod/app\"\n");

        let report = ModuleIdentifierRewriter::new("oldmod", "newmod")
            .rewrite(root)
            .unwrap();

        assert_eq!(
            fs::read_to_string(root.join("go.mod")).unwrap(),
            "module newmod\n\ngo 1.22\n"
        );
        assert_eq!(
            fs::read_to_string(&main).unwrap(),
            "package main\n\nimport \"newmod/app\"\n"
        );
        assert!(fs::read_to_string(&user)
            .unwrap()
            .contains("\"newmod/app/user/service\""));
        assert_eq!(fs::read_to_string(&untouched).unwrap(), "package app\n");
        assert_eq!(fs::read_to_string(&readme).unwrap(), "see oldmod/app\n");
        assert_eq!(
            fs::read_to_string(root.join(".git/hooks/x.go")).unwrap(),
            "import \"oldmod/app\"\n"
        );

        assert_eq!(report.files_scanned, 3);
        assert_eq!(report.files_rewritten.len(), 2);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_missing_manifest_is_fatal() {
        let temp = TempDir::new().unwrap();
        let main = write(temp.path(), "main.go", "import \"oldmod/app\"\n");

        let err = ModuleIdentifierRewriter::new("oldmod", "newmod")
            .rewrite(temp.path())
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::ManifestNotFound { .. }));
        assert_eq!(
            fs::read_to_string(&main).unwrap(),
            "import \"oldmod/app\"\n"
        );
    }

    #[test]
    fn test_unreadable_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        let err = ModuleIdentifierRewriter::new("a", "b")
            .rewrite_tree(&temp.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::RootUnreadable { .. }));
    }

    #[test]
    fn test_per_file_failure_does_not_stop_walk() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        // Not valid UTF-8, so reading it as text fails
        let binary = root.join("a_binary.go");
        fs::write(&binary, [0xff, 0xfe, 0x00, 0x80]).unwrap();
        let good = write(root, "z_main.go", "import \"oldmod/app\"\n");

        let report = ModuleIdentifierRewriter::new("oldmod", "newmod")
            .rewrite_tree(root)
            .unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, binary);
        assert_eq!(
            fs::read_to_string(&good).unwrap(),
            "import \"newmod/app\"\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_write_failure_does_not_stop_walk() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let locked = write(root, "app/a_locked.go", "import \"oldmod/app\"\n");
        let first = write(root, "main.go", "import \"oldmod/app\"\n");
        let last = write(root, "z_tail/z_main.go", "import \"oldmod/app/user\"\n");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o444)).unwrap();

        // Permission bits do not bind root
        if fs::OpenOptions::new().write(true).open(&locked).is_ok() {
            return;
        }

        let report = ModuleIdentifierRewriter::new("oldmod", "newmod")
            .rewrite_tree(root)
            .unwrap();

        assert_eq!(report.files_scanned, 3);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, locked);
        assert_eq!(report.files_rewritten.len(), 2);
        assert_eq!(
            fs::read_to_string(&locked).unwrap(),
            "import \"oldmod/app\"\n"
        );
        assert_eq!(fs::read_to_string(&first).unwrap(), "import \"newmod/app\"\n");
        assert_eq!(
            fs::read_to_string(&last).unwrap(),
            "import \"newmod/app/user\"\n"
        );
    }

    #[test]
    fn test_configured_extensions() {
        let temp = TempDir::new().unwrap();
        let tmpl = write(temp.path(), "views/layout.tmpl", "{{/* oldmod/app */}}\n");

        let config = GeneratorConfig {
            source_extensions: vec!["go".to_string(), "tmpl".to_string()],
            ..GeneratorConfig::default()
        };
        ModuleIdentifierRewriter::new("oldmod", "newmod")
            .with_config(config)
            .rewrite_tree(temp.path())
            .unwrap();

        assert_eq!(
            fs::read_to_string(&tmpl).unwrap(),
            "{{/* newmod/app */}}\n"
        );
    }
}
