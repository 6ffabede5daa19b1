//! Main CLI application structure

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{build, catalog};
use crate::storage::{Config, Project};

#[derive(Parser)]
#[command(name = "bom")]
#[command(author, version, about = "BOM options engine and picklists for boat production")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Model and option selection shared by the build commands
#[derive(Args, Debug, Clone)]
pub struct Selection {
    /// Boat model (defaults to `default_model` in config)
    #[arg(long, short)]
    pub model: Option<String>,

    /// Option id to apply; repeat or comma-separate for several
    #[arg(long = "option", short = 'o', value_delimiter = ',')]
    pub options: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new BOM project with a sample catalog
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// List boat models in the catalog
    Models,

    /// List option rules
    Options,

    /// Print the final parts list for a model and option selection
    Merge(Selection),

    /// Print a department-grouped picklist
    Picklist(Selection),

    /// Show parts added by more than one selected option
    Conflicts {
        /// Option ids; repeat or comma-separate for several
        #[arg(long = "option", short = 'o', value_delimiter = ',', required = true)]
        options: Vec<String>,
    },

    /// Check that selected option ids exist in the catalog
    Validate {
        /// Option ids; repeat or comma-separate for several
        #[arg(long = "option", short = 'o', value_delimiter = ',', required = true)]
        options: Vec<String>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let format = match cli.format {
        Some(format) => format,
        None => Config::load()?.global.default_format.into(),
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("bom starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing project at: {}", path));
            let project = Project::init(&path)?;
            output.verbose_ctx(
                "init",
                &format!("Created .bom directory at: {}", project.bom_dir().display()),
            );
            output.success(&format!(
                "Initialized BOM project at {}",
                project.root().display()
            ));
        }

        Commands::Models => catalog::models(&output)?,
        Commands::Options => catalog::options(&output)?,

        Commands::Merge(selection) => {
            output.verbose_ctx("merge", &format!("Selection: {:?}", selection));
            build::merge(&output, &selection)?
        }
        Commands::Picklist(selection) => {
            output.verbose_ctx("picklist", &format!("Selection: {:?}", selection));
            build::picklist(&output, &selection)?
        }

        Commands::Conflicts { options } => catalog::conflicts(&output, &options)?,
        Commands::Validate { options } => catalog::validate(&output, &options)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
