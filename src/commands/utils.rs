use crate::output::read_report;
use crate::render::format_count;
use crate::report::validate_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::Path;

/// Validate a JSON report file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)
        .with_context(|| format!("Failed to read report {}", file_path.display()))?;
    validate_report(&report).context("Report is inconsistent")?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Source: {}", report.source);
    println!(
        "  Total Params: {} ({})",
        report.total_params,
        format_count(report.total_params)
    );
    println!("  Tensors: {}", report.tensor_count);
    println!("  Top-level Entries: {}", report.root.len());
    println!("  Generated: {}", report.generated_at);

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Model Weights Visualizer v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Collapsible parameter trees for safetensors checkpoints.");
}
