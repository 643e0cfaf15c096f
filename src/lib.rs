//! Model Weights Visualizer
//!
//! Collapsible parameter trees for safetensors model checkpoints.
//!
//! Tensor names such as `encoder.layers.0.attn.weight` are split on `.`
//! into a module hierarchy; every module is annotated with the total number
//! of parameters below it. Only the file header is read, never the tensor
//! data.
//!
//! ## Getting Started
//!
//! ```bash
//! weights-vis render model.safetensors -o model.html --summary
//! ```
//!
//! ## Library use
//!
//! ```ignore
//! use model_weights_visualizer::hierarchy::build_tree;
//! use model_weights_visualizer::render::render_html;
//!
//! let tree = build_tree(vec![("layer.weight", vec![4, 3]), ("layer.bias", vec![4])])?;
//! assert_eq!(tree.total_params(), 16);
//! let html = render_html(&tree, None);
//! ```

pub mod aggregator;
pub mod commands;
pub mod hierarchy;
pub mod output;
pub mod reader;
pub mod render;
pub mod report;
pub mod utils;
