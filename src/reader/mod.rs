//! Input boundary: tensor names and shapes from checkpoint files.
//!
//! This module handles:
//! - Filtering paths by supported extension
//! - Reading the safetensors JSON header without touching tensor data
//! - Validating header entries

pub mod safetensors;

// Re-export main types
pub use safetensors::{is_supported_file, parse_header, read_tensor_specs, TensorSpec};
