//! External command-line tools the CLI delegates to
//!
//! Provides detection for tools like git, go and air, and a helper that runs
//! a child process while streaming its output line by line.

use colored::Colorize;
use std::io;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// Configuration for a CLI tool
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Name of the tool binary (e.g., "git")
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// Where to get the tool when it is missing
    pub install_hint: &'static str,
}

/// Checks availability of a CLI tool
#[derive(Debug, Clone)]
pub struct ToolManager {
    config: ToolConfig,
}

impl ToolManager {
    /// Create a new tool manager with the given configuration
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Get the tool configuration
    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn name(&self) -> &'static str {
        self.config.name
    }

    /// Check if the tool is installed and available in PATH
    pub fn is_installed(&self) -> bool {
        std::process::Command::new("which")
            .arg(self.config.name)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Get the installed tool version (if available)
    pub fn get_version(&self) -> Option<String> {
        std::process::Command::new(self.config.name)
            .arg("--version")
            .output()
            .ok()
            .and_then(|output| {
                if output.status.success() {
                    String::from_utf8(output.stdout)
                        .ok()
                        .map(|s| s.trim().to_string())
                } else {
                    None
                }
            })
    }

    /// Error message for a missing tool, including where to get it
    pub fn missing_message(&self) -> String {
        format!(
            "'{}' is required but not installed. Install it from {}",
            self.config.display_name, self.config.install_hint
        )
    }
}

/// Pre-configured tool manager for git (starter template cloning)
pub fn git_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "git",
        display_name: "git",
        install_hint: "https://git-scm.com/downloads",
    })
}

/// Pre-configured tool manager for the Go toolchain
pub fn go_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "go",
        display_name: "Go",
        install_hint: "https://go.dev/dl",
    })
}

/// Pre-configured tool manager for air (hot reload)
pub fn air_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "air",
        display_name: "air",
        install_hint: "`go install github.com/air-verse/air@latest`",
    })
}

/// Run a command, echoing stdout indented and stderr in yellow, and wait for it
pub async fn run_streaming(command: &mut TokioCommand) -> io::Result<ExitStatus> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other("child stdout was not captured"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| io::Error::other("child stderr was not captured"))?;

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();
    let mut stdout_open = true;
    let mut stderr_open = true;

    while stdout_open || stderr_open {
        tokio::select! {
            line = stdout_reader.next_line(), if stdout_open => {
                match line {
                    Ok(Some(line)) => println!("  {}", line),
                    Ok(None) => stdout_open = false,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stdout:".red(), e);
                        stdout_open = false;
                    }
                }
            }
            line = stderr_reader.next_line(), if stderr_open => {
                match line {
                    Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                    Ok(None) => stderr_open = false,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stderr:".red(), e);
                        stderr_open = false;
                    }
                }
            }
        }
    }

    child.wait().await
}
