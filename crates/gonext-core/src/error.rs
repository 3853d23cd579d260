//! Error kinds raised by the scaffolding and generation pipeline

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the core library
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Every failure the core can report.
///
/// Only [`ScaffoldError::FileAlreadyExists`] is non-fatal: orchestrators
/// report it and move on to the next file.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("'{tool}' is required but not installed")]
    ToolMissing { tool: String },

    #[error("failed to clone {locator}: {reason}")]
    CloneFailed { locator: String, reason: String },

    #[error("failed to rename {} to {}: {reason}", from.display(), to.display())]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    #[error("manifest not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("no `module` declaration in {}", path.display())]
    MissingModuleDirective { path: PathBuf },

    #[error("file already exists: {}", path.display())]
    FileAlreadyExists { path: PathBuf },

    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory {}: {source}", path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read project root {}: {reason}", path.display())]
    RootUnreadable { path: PathBuf, reason: String },

    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("invalid starter template locator: {0}")]
    InvalidLocator(String),

    #[error("template '{template}' references unknown placeholder '{placeholder}'")]
    Render {
        template: &'static str,
        placeholder: String,
    },

    #[error("invalid {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("'{program}' exited with code {code}")]
    ProcessFailed { program: String, code: i32 },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl ScaffoldError {
    /// Whether the error must stop the running command
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ScaffoldError::FileAlreadyExists { .. })
    }

    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        ScaffoldError::Io {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_already_exists_is_non_fatal() {
        let exists = ScaffoldError::FileAlreadyExists {
            path: PathBuf::from("app/user/controller/userController.go"),
        };
        assert!(!exists.is_fatal());

        let missing = ScaffoldError::ToolMissing {
            tool: "git".to_string(),
        };
        assert!(missing.is_fatal());
    }

    #[test]
    fn test_messages_name_the_path() {
        let err = ScaffoldError::ManifestNotFound {
            path: PathBuf::from("demo/go.mod"),
        };
        assert_eq!(err.to_string(), "manifest not found: demo/go.mod");
    }
}
