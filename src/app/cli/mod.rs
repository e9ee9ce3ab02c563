//! CLI Adapter.

mod generate;
mod init;
mod logging;
mod plan;
mod validate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::api::ProjectInput;
use crate::domain::{AppError, ApplicationDescriptor};

#[derive(Parser)]
#[command(name = "fpmkit")]
#[command(version)]
#[command(
    about = "Generate an Nginx + PHP-FPM development environment from application descriptors",
    long_about = None
)]
struct Cli {
    /// Log pipeline steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Descriptor sources shared by validate, plan and generate.
#[derive(Args, Debug, Clone)]
struct ProjectArgs {
    /// Descriptor file (defaults to fpmkit.yml, fpmkit.yaml or fpmkit.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Application descriptor; replaces the file's apps when given
    #[arg(short, long = "app", value_name = "NAME:PORT:PATH[:DOCROOT]")]
    apps: Vec<ApplicationDescriptor>,
}

impl From<ProjectArgs> for ProjectInput {
    fn from(args: ProjectArgs) -> Self {
        ProjectInput { config: args.config, apps: args.apps }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter fpmkit.yml
    #[clap(visible_alias = "i")]
    Init {
        /// Directory to write into (defaults to the current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
    /// Check descriptors and stack settings
    #[clap(visible_alias = "v")]
    Validate {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Show which artifacts would be written
    #[clap(visible_alias = "p")]
    Plan {
        #[command(flatten)]
        project: ProjectArgs,
        /// Target directory (defaults to the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Include starter index.php pages
        #[arg(long)]
        starter: bool,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render and write every artifact
    #[clap(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        project: ProjectArgs,
        /// Target directory (defaults to the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
        /// Also write a starter index.php into each document root
        #[arg(long)]
        starter: bool,
        /// Render and check for conflicts without writing
        #[arg(long)]
        dry_run: bool,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    let result: Result<(), AppError> = match cli.command {
        Commands::Init { path } => init::run_init(path),
        Commands::Validate { project } => validate::run_validate(project.into()),
        Commands::Plan { project, output, starter, json } => {
            plan::run_plan(project.into(), output, starter, json)
        }
        Commands::Generate { project, output, force, starter, dry_run } => {
            let options = generate::GenerateFlags { force, starter, dry_run };
            generate::run_generate(project.into(), output, options)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn current_dir() -> Result<PathBuf, AppError> {
    Ok(std::env::current_dir()?)
}
