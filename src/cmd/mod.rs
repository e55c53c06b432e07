mod generate;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "schema-atlas")]
#[command(version)]
#[command(about = "Render interactive HTML relationship diagrams from a SQL database project", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a database project and generate the diagram pages
    Generate {
        /// Project root directory (default: $BUILD_SOURCESDIRECTORY if set,
        /// otherwise the current directory)
        root: Option<PathBuf>,

        /// Output directory for generated HTML (default: <root>/documentation)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exclude tables matching these glob patterns (comma-separated)
        #[arg(short, long)]
        exclude: Option<String>,

        /// Random seed for layout and color assignment
        #[arg(long)]
        seed: Option<u64>,

        /// Show progress during scanning
        #[arg(short, long)]
        progress: bool,

        /// Scan and report without writing files (dry run)
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            root,
            output,
            exclude,
            seed,
            progress,
            dry_run,
        } => generate::run(root, output, exclude, seed, progress, dry_run),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "schema-atlas", &mut io::stdout());
            Ok(())
        }
    }
}
