//! Rendering of parameter trees.
//!
//! This module turns a built tree into:
//! - A collapsible, self-contained HTML document
//! - A plain-text tree for terminals
//! - Human-readable counts ("1.23M") and shapes ("[4, 3]")

pub mod format;
pub mod html;
pub mod text;

// Re-export main types and functions
pub use format::{format_count, format_shape};
pub use html::{escape_html, render_error_page, render_html, render_tree_fragment, HtmlConfig};
pub use text::render_text_tree;
