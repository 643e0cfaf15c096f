//! Model Weights Visualizer CLI
//!
//! Renders the module hierarchy of a safetensors checkpoint as a
//! collapsible HTML tree with per-module parameter counts.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use model_weights_visualizer::commands::{
    default_output_path, display_version, execute_render, validate_args, validate_report_file,
    RenderArgs,
};

/// Model Weights Visualizer - parameter trees for safetensors files
#[derive(Parser, Debug)]
#[command(name = "weights-vis")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a checkpoint as a collapsible HTML tree
    Render {
        /// Path to the .safetensors file
        file: PathBuf,

        /// Output path for the HTML document (defaults to <file>.html)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output path for a JSON report (optional)
        #[arg(long)]
        json: Option<PathBuf>,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Print text tree to stdout
        #[arg(long)]
        summary: bool,

        /// Deepest level shown in the text tree
        #[arg(long)]
        depth: Option<usize>,
    },

    /// Validate a JSON report file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Render {
            file,
            output,
            json,
            title,
            summary,
            depth,
        } => {
            let args = RenderArgs {
                output_html: output.unwrap_or_else(|| default_output_path(&file)),
                input: file,
                output_json: json,
                title,
                print_summary: summary,
                summary_depth: depth,
            };

            // Validate args first
            validate_args(&args)?;

            execute_render(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
