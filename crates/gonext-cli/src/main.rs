//! GoNext CLI - Project scaffolding and code generation for GoNext projects

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::Colorize;
use gonext_core::generate::{ComponentGenerator, ComponentKind, ComponentRequest, ModuleScaffolder};
use gonext_core::naming::validate_name;
use gonext_core::tui::NewArgs;
use gonext_core::{ProductConfig, ScaffoldError};
use std::path::{Path, PathBuf};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// GoNext product configuration
#[derive(Clone)]
pub struct GoNextConfig;

impl ProductConfig for GoNextConfig {
    fn display_name(&self) -> &'static str {
        "GoNext"
    }

    fn starter_repo(&self) -> &'static str {
        "https://github.com/Alexigbokwe/Go_Next.git"
    }

    fn starter_repo_env(&self) -> &'static str {
        "GONEXT_STARTER_REPO"
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/Alexigbokwe/Go_Next"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install gonext-cli --force"
    }

    fn next_steps(&self, dir: &Path) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(dir) {
            let shown = current
                .as_deref()
                .and_then(|cwd| dir.strip_prefix(cwd).ok())
                .unwrap_or(dir);
            steps.push(format!("cd {}", shown.display()));
        }
        steps.push("go mod tidy".to_string());
        steps.push("gonext start --watch".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "gonext")]
#[command(about = "GoNext CLI - Scaffolding and code generation for GoNext projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scaffold a new GoNext project from the official starter template
    New(CliNewArgs),
    /// Generate code from templates
    #[command(alias = "g", subcommand)]
    Generate(GenerateCommand),
    /// Start the GoNext project
    Start(StartArgs),
    /// Generate and open the full GoNext framework documentation
    Doc,
}

#[derive(ClapArgs, Debug)]
pub struct CliNewArgs {
    /// Project directory to create
    pub project_name: String,

    /// Module path to declare in go.mod (prompted for when omitted)
    #[arg(short, long)]
    pub module: Option<String>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliNewArgs> for NewArgs {
    fn from(args: CliNewArgs) -> Self {
        NewArgs {
            project_name: args.project_name,
            module: args.module,
            yes: args.yes,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum GenerateCommand {
    /// Generate a new module with controller, service, repository and route
    Module {
        /// Module name
        name: String,
    },
    /// Generate a controller in a module (creates module if needed)
    Controller(ComponentArgs),
    /// Generate a service in a module (creates module if needed)
    Service(ComponentArgs),
    /// Generate a repository in a module (creates module if needed)
    Repository(ComponentArgs),
    /// Generate a route file in a module (creates module if needed)
    Route(ComponentArgs),
    /// Generate a DTO struct in a module (creates module if needed)
    Dto(ComponentArgs),
    /// Generate a Fiber middleware in a module (creates module if needed)
    Middleware(ComponentArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ComponentArgs {
    /// Component name
    pub name: String,
    /// Module the component belongs to
    pub in_module: String,
}

#[derive(ClapArgs, Debug)]
pub struct StartArgs {
    /// Enable watch mode (hot reload)
    #[arg(long)]
    pub watch: bool,
}

impl GenerateCommand {
    fn into_request(self) -> ComponentRequest {
        let (kind, args) = match self {
            GenerateCommand::Module { name } => return ComponentRequest::module(name),
            GenerateCommand::Controller(args) => (ComponentKind::Controller, args),
            GenerateCommand::Service(args) => (ComponentKind::Service, args),
            GenerateCommand::Repository(args) => (ComponentKind::Repository, args),
            GenerateCommand::Route(args) => (ComponentKind::Route, args),
            GenerateCommand::Dto(args) => (ComponentKind::Dto, args),
            GenerateCommand::Middleware(args) => (ComponentKind::Middleware, args),
        };
        ComponentRequest::new(kind, args.name, args.in_module)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = GoNextConfig;

    let result = dispatch(&config, args.command).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

async fn dispatch(config: &GoNextConfig, command: Command) -> Result<()> {
    match command {
        Command::New(new_args) => gonext_core::run_new(config, new_args.into(), CLI_VERSION).await,
        Command::Generate(generate) => run_generate(generate.into_request()),
        Command::Start(start_args) => run_start(start_args.watch).await,
        Command::Doc => run_doc(),
    }
}

fn run_generate(request: ComponentRequest) -> Result<()> {
    validate_name(&request.name)?;
    validate_name(&request.owning_module)?;

    let generator = ComponentGenerator::for_project(PathBuf::from("."))?;

    if request.kind == ComponentKind::Module {
        return scaffold_module(&generator, &request.name);
    }

    match generator.generate(&request) {
        Ok(path) => {
            println!(
                "{} {} '{}' in {}",
                "Created".green().bold(),
                request.kind,
                request.name,
                relative(&generator, &path).display()
            );
            Ok(())
        }
        Err(ScaffoldError::FileAlreadyExists { path }) => {
            println!(
                "{} {} already exists: {}",
                "Skipped".yellow().bold(),
                request.kind,
                relative(&generator, &path).display()
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn scaffold_module(generator: &ComponentGenerator, name: &str) -> Result<()> {
    let report = ModuleScaffolder::new(generator).scaffold_module(name)?;

    for path in &report.created {
        println!("  {} {}", "created".green(), relative(generator, path).display());
    }
    for path in &report.skipped {
        println!(
            "  {} {} (already exists)",
            "skipped".yellow(),
            relative(generator, path).display()
        );
    }

    if let Some(failure) = report.failure {
        return Err(failure.into());
    }

    println!();
    println!(
        "{} Module '{}' ready in {}",
        "Done.".green().bold(),
        name,
        relative(generator, &report.module_dir).display()
    );
    Ok(())
}

async fn run_start(watch: bool) -> Result<()> {
    if watch {
        println!("{}", "Starting in watch mode (hot reload)...".cyan());
    } else {
        println!("{}", "Starting GoNext project...".cyan());
    }

    match gonext_core::runtime::start(Path::new("."), watch).await {
        Err(ScaffoldError::ToolMissing { .. }) => {
            let plan = gonext_core::runtime::launch_plan(watch);
            anyhow::bail!(plan.tool.missing_message())
        }
        other => Ok(other?),
    }
}

fn run_doc() -> Result<()> {
    let cwd = std::env::current_dir()?;
    let path = gonext_core::docs::write_documentation(&cwd)?;
    println!("{} Documentation generated at: {}", "✓".green(), path.display());

    if let Err(e) = gonext_core::docs::open_documentation(&path) {
        eprintln!("{} {}", "Warning:".yellow(), e);
        println!("Please open '{}' in your favorite editor.", gonext_core::docs::DOC_FILE_NAME);
    }
    Ok(())
}

fn relative<'a>(generator: &ComponentGenerator, path: &'a Path) -> &'a Path {
    path.strip_prefix(generator.project_root()).unwrap_or(path)
}
