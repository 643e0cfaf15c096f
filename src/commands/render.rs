//! Render command implementation.
//!
//! The render command:
//! 1. Reads tensor names and shapes from the file header
//! 2. Builds the name hierarchy
//! 3. Renders and writes the HTML document
//! 4. Optionally writes a JSON report and prints a text summary
//!
//! A load failure never aborts silently: the error page is written in
//! place of the visualization and the error is returned to the caller.

use crate::aggregator::{calculate_tree_stats, TreeStats};
use crate::hierarchy::{build_tree, Tree};
use crate::output::{validate_path, write_html, write_report};
use crate::reader::{is_supported_file, read_tensor_specs};
use crate::render::{render_error_page, render_html, render_text_tree, HtmlConfig};
use crate::report::build_report;
use crate::utils::config::DEFAULT_TITLE;
use crate::utils::error::LoadError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Checkpoint to visualize
    pub input: PathBuf,

    /// Output path for the HTML document
    pub output_html: PathBuf,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Document title (defaults to the file name)
    pub title: Option<String>,

    /// Print text tree to stdout
    pub print_summary: bool,

    /// Deepest level shown in the text tree
    pub summary_depth: Option<usize>,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("model.safetensors"),
            output_html: PathBuf::from("model.html"),
            output_json: None,
            title: None,
            print_summary: false,
            summary_depth: None,
        }
    }
}

/// A tree together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedTree {
    pub source: PathBuf,
    pub tree: Tree,
    pub stats: TreeStats,
}

/// HTML path next to the input (`model.safetensors` -> `model.html`)
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("html")
}

/// Read a file and build its tree
///
/// **Public** - the load boundary
///
/// The reader closes the file before the hierarchy is built. Each call
/// builds a fresh tree; nothing is cached between loads.
///
/// # Errors
/// * `LoadError::Read` - file missing, unsupported or corrupt
/// * `LoadError::Hierarchy` - conflicting tensor names
pub fn load_tree(path: &Path) -> Result<LoadedTree, LoadError> {
    let specs = read_tensor_specs(path)?;

    let tree = build_tree(specs.into_iter().map(|spec| (spec.name, spec.shape)))?;
    let stats = calculate_tree_stats(&tree);

    info!("Loaded {}: {}", path.display(), stats.summary());

    Ok(LoadedTree {
        source: path.to_path_buf(),
        tree,
        stats,
    })
}

/// Load a file and render it, substituting the error page on failure
///
/// **Public** - never fails; what a viewer shows for a path
pub fn load_document(path: &Path, config: &HtmlConfig) -> String {
    match load_tree(path) {
        Ok(loaded) => render_html(&loaded.tree, Some(config)),
        Err(e) => load_error_page(path, &e),
    }
}

/// Error document shown in place of a tree that failed to load
///
/// **Public** - the single error display path for load failures
pub fn load_error_page(path: &Path, error: &LoadError) -> String {
    warn!("Failed to load {}: {}", path.display(), error);
    render_error_page(&error.to_string())
}

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Load failures (after the error page has been written)
/// * File write errors
pub fn execute_render(args: RenderArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Rendering: {}", args.input.display());

    let config = HtmlConfig::new().with_title(document_title(&args));

    // Step 1: Read header and build the tree
    info!("Step 1/4: Loading tensor header...");
    let loaded = match load_tree(&args.input) {
        Ok(loaded) => loaded,
        Err(e) => {
            write_html(&load_error_page(&args.input, &e), &args.output_html)
                .context("Failed to write error page")?;
            warn!("Error page written to: {}", args.output_html.display());
            return Err(e).context(format!("Failed to load {}", args.input.display()));
        }
    };

    // Step 2: Render and write HTML
    info!("Step 2/4: Rendering HTML...");
    let html = render_html(&loaded.tree, Some(&config));
    write_html(&html, &args.output_html).context("Failed to write HTML document")?;
    info!("✓ HTML written to: {}", args.output_html.display());

    // Step 3: JSON report (if requested)
    if let Some(json_path) = &args.output_json {
        info!("Step 3/4: Writing JSON report...");
        let report = build_report(&loaded.tree, loaded.source.display().to_string());
        write_report(&report, json_path).context("Failed to write JSON report")?;
        info!("✓ Report written to: {}", json_path.display());
    } else {
        info!("Step 3/4: Skipping JSON report (not requested)");
    }

    // Step 4: Text summary (if requested)
    if args.print_summary {
        info!("Step 4/4: Printing summary...");
        print_summary(&loaded, args.summary_depth);
    } else {
        debug!("Step 4/4: Skipping summary (not requested)");
    }

    let elapsed = start_time.elapsed();
    info!("Render completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Title from the arguments or the input file name
///
/// **Private** - internal helper for execute_render
fn document_title(args: &RenderArgs) -> String {
    if let Some(title) = &args.title {
        return title.clone();
    }
    match args.input.file_name() {
        Some(name) => format!("{} - {}", DEFAULT_TITLE, name.to_string_lossy()),
        None => DEFAULT_TITLE.to_string(),
    }
}

fn print_summary(loaded: &LoadedTree, depth: Option<usize>) {
    println!("\n{}", "=".repeat(80));
    println!("PARAMETER TREE");
    println!("{}", "=".repeat(80));
    println!("File:     {}", loaded.source.display());
    println!("Tensors:  {}", loaded.stats.tensor_count);
    println!("Modules:  {}", loaded.stats.group_count);
    println!("Depth:    {}", loaded.stats.max_depth);
    if let Some((name, count)) = &loaded.stats.largest_tensor {
        println!("Largest:  {} ({})", name, count);
    }
    println!("\n{}", render_text_tree(&loaded.tree, depth));
    println!("{}", "=".repeat(80));
}

/// Validate render arguments
///
/// **Public** - can be called before execute_render for early validation
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &RenderArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !is_supported_file(&args.input) {
        anyhow::bail!(
            "Unsupported file type: {} (expected a .safetensors file)",
            args.input.display()
        );
    }

    validate_path(&args.output_html).context("Invalid HTML output path")?;

    if args.output_html == args.input {
        anyhow::bail!("HTML output would overwrite the input file");
    }

    if let Some(json_path) = &args.output_json {
        validate_path(json_path).context("Invalid JSON output path")?;
        if json_path == &args.output_html {
            anyhow::bail!("JSON and HTML outputs must be different files");
        }
    }

    if args.summary_depth == Some(0) {
        anyhow::bail!("summary depth must be greater than 0");
    }

    Ok(())
}
