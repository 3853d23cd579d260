//! Bundled framework documentation (`gonext doc`)

use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};

/// File written into the working directory
pub const DOC_FILE_NAME: &str = "GoNext_Documentation.md";

const DOCUMENTATION: &str = include_str!("../docs/documentation.md");

/// Editor CLIs tried before the platform opener, keyed on the hosting terminal
const EDITORS: &[(&str, &[&str])] = &[
    ("cursor", &["cursor"]),
    ("vscode", &["code"]),
    ("jetbrains", &["goland", "idea"]),
    ("sublime", &["subl"]),
    ("zed", &["zed"]),
];

/// Write the bundled documentation into `dir`, replacing any previous copy
pub fn write_documentation(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(DOC_FILE_NAME);
    std::fs::write(&path, DOCUMENTATION).map_err(|source| ScaffoldError::WriteFailed {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Editor commands matching the current terminal, most specific first
pub fn detect_editors(term_program: Option<&str>, terminal_emulator: Option<&str>) -> &'static [&'static str] {
    let host = match (term_program, terminal_emulator) {
        (_, Some(emulator)) if emulator.contains("JetBrains") => "jetbrains".to_string(),
        (Some(program), _) => program.to_lowercase(),
        _ => return &[],
    };

    EDITORS
        .iter()
        .find(|(key, _)| *key == host)
        .map(|(_, commands)| *commands)
        .unwrap_or(&[])
}

/// Open `path` in the detected editor, falling back to the system default application
pub fn open_documentation(path: &Path) -> Result<()> {
    let term_program = std::env::var("TERM_PROGRAM").ok();
    let terminal_emulator = std::env::var("TERMINAL_EMULATOR").ok();

    for editor in detect_editors(term_program.as_deref(), terminal_emulator.as_deref()) {
        if open::with(path, *editor).is_ok() {
            return Ok(());
        }
    }

    open::that(path).map_err(|e| ScaffoldError::io(format!("could not open {}", path.display()), e))
}
