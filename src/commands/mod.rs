//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod render;
pub mod utils;

// Re-export main command functions
pub use render::{
    default_output_path, execute_render, load_document, load_error_page, load_tree,
    validate_args, LoadedTree, RenderArgs,
};
pub use utils::{display_version, validate_report_file};
