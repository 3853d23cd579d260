//! `go.mod` module declaration parsing and rewriting

use crate::error::{Result, ScaffoldError};
use std::fs;
use std::io;
use std::path::Path;

/// Manifest file name at the project root
pub const MANIFEST_FILE: &str = "go.mod";

const MODULE_KEYWORD: &str = "module";

/// A parsed `module` line: `module <identifier> [// comment]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Declaration<'a> {
    identifier: &'a str,
    comment: Option<&'a str>,
}

/// Parse one manifest line as a module declaration.
///
/// The keyword must be followed by whitespace. The identifier may be bare,
/// `"quoted"` or `` `raw` ``, and a trailing `//` comment is kept aside.
fn parse_declaration(line: &str) -> Option<Declaration<'_>> {
    let rest = line
        .trim_end_matches(['\r', '\n'])
        .trim_start()
        .strip_prefix(MODULE_KEYWORD)?;
    if !rest.starts_with([' ', '\t']) {
        return None;
    }

    let (value, comment) = match rest.find("//") {
        Some(at) => (&rest[..at], Some(rest[at..].trim_end())),
        None => (rest, None),
    };
    let identifier = unquote(value.trim());

    (!identifier.is_empty()).then_some(Declaration {
        identifier,
        comment,
    })
}

fn unquote(value: &str) -> &str {
    ['"', '`']
        .iter()
        .find_map(|q| value.strip_prefix(*q)?.strip_suffix(*q))
        .map_or(value, str::trim)
}

/// Extract the identifier from the first `module <identifier>` line
pub fn parse_module_identifier(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(parse_declaration)
        .map(|decl| decl.identifier.to_string())
}

/// Replace the declaration line with `module <new_identifier>`.
///
/// A trailing comment on that line survives. Every other line, including
/// line endings, is left byte-for-byte intact. Returns `None` when the
/// content has no declaration line.
pub fn replace_module_line(content: &str, new_identifier: &str) -> Option<String> {
    let mut replaced = false;
    let mut out = String::with_capacity(content.len() + new_identifier.len());

    for line in content.split_inclusive('\n') {
        let declaration = if replaced { None } else { parse_declaration(line) };
        let Some(declaration) = declaration else {
            out.push_str(line);
            continue;
        };

        let ending = if line.ends_with("\r\n") {
            "\r\n"
        } else if line.ends_with('\n') {
            "\n"
        } else {
            ""
        };
        out.push_str(MODULE_KEYWORD);
        out.push(' ');
        out.push_str(new_identifier);
        if let Some(comment) = declaration.comment {
            out.push(' ');
            out.push_str(comment);
        }
        out.push_str(ending);
        replaced = true;
    }

    replaced.then_some(out)
}

/// Rewrite the manifest under `project_root` to declare `new_identifier`
pub fn rewrite_manifest(project_root: &Path, new_identifier: &str) -> Result<()> {
    let path = project_root.join(MANIFEST_FILE);
    let content = read_manifest(&path)?;
    let updated = replace_module_line(&content, new_identifier)
        .ok_or_else(|| ScaffoldError::MissingModuleDirective { path: path.clone() })?;

    fs::write(&path, updated).map_err(|source| ScaffoldError::WriteFailed { path, source })
}

fn read_manifest(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ScaffoldError::ManifestNotFound {
            path: path.to_path_buf(),
        },
        _ => ScaffoldError::io(format!("failed to read {}", path.display()), e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_module_identifier() {
        let content = "module github.com/acme/shop\n\ngo 1.22\n";
        assert_eq!(
            parse_module_identifier(content).as_deref(),
            Some("github.com/acme/shop")
        );
    }

    #[test]
    fn test_parse_without_declaration() {
        assert_eq!(parse_module_identifier("go 1.22\n"), None);
        assert_eq!(parse_module_identifier("module \n"), None);
    }

    #[test]
    fn test_replace_keeps_other_lines() {
        let content = "module oldmod\n\ngo 1.22\n\nrequire github.com/gofiber/fiber/v2 v2.52.0\n";
        let updated = replace_module_line(content, "newmod").unwrap();
        assert_eq!(
            updated,
            "module newmod\n\ngo 1.22\n\nrequire github.com/gofiber/fiber/v2 v2.52.0\n"
        );
    }

    #[test]
    fn test_replace_preserves_crlf() {
        let updated = replace_module_line("module oldmod\r\ngo 1.22\r\n", "newmod").unwrap();
        assert_eq!(updated, "module newmod\r\ngo 1.22\r\n");
    }

    #[test]
    fn test_replace_without_trailing_newline() {
        assert_eq!(
            replace_module_line("module oldmod", "newmod").as_deref(),
            Some("module newmod")
        );
    }

    #[test]
    fn test_replace_only_first_declaration() {
        let updated = replace_module_line("module a\nmodule b\n", "c").unwrap();
        assert_eq!(updated, "module c\nmodule b\n");
    }

    #[test]
    fn test_parse_declaration_forms() {
        for content in [
            "module goNext // starter\n",
            "module \"goNext\"\n",
            "module `goNext`\n",
            "module\tgoNext\n",
            "module goNext\r\n",
            "  module goNext\n",
        ] {
            assert_eq!(
                parse_module_identifier(content).as_deref(),
                Some("goNext"),
                "content: {content:?}"
            );
        }
        assert_eq!(parse_module_identifier("modulegoNext\n"), None);
        assert_eq!(parse_module_identifier("module // only a comment\n"), None);
    }

    #[test]
    fn test_replace_keeps_trailing_comment() {
        let updated = replace_module_line("module goNext // starter\n\ngo 1.22\n", "shop").unwrap();
        assert_eq!(updated, "module shop // starter\n\ngo 1.22\n");
    }

    #[test]
    fn test_replace_quoted_and_tab_forms() {
        assert_eq!(
            replace_module_line("module \"goNext\"\ngo 1.22\n", "shop").as_deref(),
            Some("module shop\ngo 1.22\n")
        );
        assert_eq!(
            replace_module_line("module\tgoNext\r\ngo 1.22\r\n", "shop").as_deref(),
            Some("module shop\r\ngo 1.22\r\n")
        );
    }

    #[test]
    fn test_rewrite_missing_manifest() {
        let temp = TempDir::new().unwrap();
        let err = rewrite_manifest(temp.path(), "newmod").unwrap_err();
        assert!(matches!(err, ScaffoldError::ManifestNotFound { .. }));
    }

    #[test]
    fn test_rewrite_manifest_on_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(MANIFEST_FILE);
        fs::write(&path, "module oldmod\n\ngo 1.22\n").unwrap();

        rewrite_manifest(temp.path(), "newmod").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "module newmod\n\ngo 1.22\n"
        );
        assert_eq!(read_module_identifier(temp.path()).unwrap(), "newmod");
    }
}
