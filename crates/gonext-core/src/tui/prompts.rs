//! Charm-style CLI prompts using cliclack

use crate::config::check_compatibility;
use crate::product::ProductConfig;
use crate::project::{self, ProjectSpec, RebrandOutcome, TemplateFetcher, TemplateSource};
use crate::runtime::tool::git_tool;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CLI arguments for the new command
#[derive(Debug, Clone, Default)]
pub struct NewArgs {
    /// Project directory to create
    pub project_name: String,

    /// Module identifier to declare (prompted for when absent)
    pub module: Option<String>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Create a new project with interactive prompts
pub async fn run_new<C: ProductConfig>(config: &C, args: NewArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Check clone tool
    check_clone_tool()?;

    // Step 2: Resolve starter template and target directory
    let source = setup_source(config)?;
    let target = select_target(&args.project_name)?;

    // Step 3: Choose the module identifier
    let module_identifier = select_module_identifier(&args, &target)?;

    let spec = ProjectSpec {
        target,
        module_identifier,
        source,
    };

    // Step 4: Clone and rename
    let project_dir = fetch_template(&spec).await?;

    // Step 5: Rebrand
    let outcome = rebrand_project(&spec, &project_dir)?;

    if let Some(min_version) = &outcome.config.min_cli_version {
        if let Some(warning) =
            check_compatibility(cli_version, min_version, config.upgrade_command())
        {
            cliclack::log::warning(format!(
                "Version warning: {}",
                warning.lines().next().unwrap_or(&warning)
            ))?;
        }
    }

    // Step 6: Show next steps
    print_next_steps(config, &project_dir)?;

    Ok(())
}

fn check_clone_tool() -> Result<()> {
    let tool = git_tool();
    if !tool.is_installed() {
        cliclack::log::error(tool.missing_message())?;
        anyhow::bail!(crate::error::ScaffoldError::ToolMissing {
            tool: tool.name().to_string(),
        });
    }

    let version = tool.get_version().unwrap_or_else(|| "unknown".to_string());
    cliclack::log::success(format!("{} installed ({})", tool.config().display_name, version))?;
    Ok(())
}

fn setup_source<C: ProductConfig>(config: &C) -> Result<TemplateSource> {
    let source = TemplateSource::from_config(config)?;
    if std::env::var(config.starter_repo_env()).is_ok() {
        cliclack::log::info(format!(
            "Using starter template from {} ({})",
            source.display(),
            config.starter_repo_env()
        ))?;
    }
    Ok(source)
}

fn select_target(project_name: &str) -> Result<PathBuf> {
    crate::naming::validate_name(
        Path::new(project_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(project_name),
    )?;

    let current_dir = std::env::current_dir().context("Failed to read current directory")?;
    let path = PathBuf::from(project_name);
    let path = if path.is_absolute() {
        path
    } else {
        current_dir.join(path)
    };

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    if path.exists() {
        anyhow::bail!("Directory already exists: {}", path.display());
    }

    Ok(path)
}

fn select_module_identifier(args: &NewArgs, target: &Path) -> Result<String> {
    let default_identifier = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.project_name.clone());

    if let Some(module) = &args.module {
        validate_module_identifier(module).map_err(anyhow::Error::msg)?;
        cliclack::log::info(format!("Using module path: {}", module))?;
        return Ok(module.clone());
    }

    if args.yes {
        cliclack::log::info(format!("Using module path: {}", default_identifier))?;
        return Ok(default_identifier);
    }

    let input: String = cliclack::input(format!(
        "Module path (e.g., github.com/yourorg/{})",
        default_identifier
    ))
    .placeholder(&default_identifier)
    .default_input(&default_identifier)
    .validate(|input: &String| validate_module_identifier(input))
    .interact()?;

    let input = input.trim();
    Ok(if input.is_empty() {
        default_identifier
    } else {
        input.to_string()
    })
}

fn validate_module_identifier(identifier: &str) -> std::result::Result<(), &'static str> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Ok(());
    }
    if identifier.chars().any(char::is_whitespace) {
        return Err("Module path must not contain whitespace");
    }
    if identifier.starts_with('/') || identifier.ends_with('/') {
        return Err("Module path must not start or end with '/'");
    }
    Ok(())
}

async fn fetch_template(spec: &ProjectSpec) -> Result<PathBuf> {
    cliclack::log::info(format!(
        "Cloning starter project from {}...",
        spec.source.display()
    ))?;

    let fetcher = TemplateFetcher::new(spec.source.clone());
    let outcome = fetcher.fetch_and_rename(&spec.target).await?;

    for warning in &outcome.warnings {
        cliclack::log::warning(format!("Warning: {}", warning))?;
    }
    cliclack::log::success(format!("Created {}", outcome.project_dir.display()))?;

    Ok(outcome.project_dir)
}

fn rebrand_project(spec: &ProjectSpec, project_dir: &Path) -> Result<RebrandOutcome> {
    let spinner = cliclack::spinner();
    spinner.start("Updating module path...");

    let outcome = match project::rebrand(project_dir, &spec.module_identifier) {
        Ok(outcome) => outcome,
        Err(e) => {
            spinner.stop("Module path not updated");
            cliclack::log::error(format!(
                "{} was created but still uses the starter's module path",
                project_dir.display()
            ))?;
            return Err(e.into());
        }
    };

    spinner.stop(format!(
        "Module path {} -> {} ({} of {} source files updated)",
        outcome.old_identifier,
        spec.module_identifier,
        outcome.report.files_rewritten.len(),
        outcome.report.files_scanned
    ));

    for failure in &outcome.report.failures {
        cliclack::log::warning(format!(
            "Could not update {}: {}",
            failure.path.display(),
            failure.reason
        ))?;
    }

    Ok(outcome)
}

fn print_next_steps<C: ProductConfig>(config: &C, project_dir: &Path) -> Result<()> {
    let steps = config.next_steps(project_dir);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
    println!();
    println!("  Docs: {}", config.docs_url());

    cliclack::outro("Happy coding!")?;

    Ok(())
}
