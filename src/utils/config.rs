//! Configuration and constants for the CLI.

/// Current JSON report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// File extensions accepted by the reader (compared case-insensitively)
pub const SUPPORTED_FILE_EXTS: &[&str] = &[".safetensors"];

// safetensors layout: u64 little-endian header length, JSON header, raw data
pub const HEADER_LEN_BYTES: usize = 8;
pub const MAX_HEADER_SIZE: u64 = 100_000_000; // 100 MB, same cap as the reference loader

/// Reserved header key holding free-form string metadata
pub const METADATA_KEY: &str = "__metadata__";

/// Title used when none is given on the command line
pub const DEFAULT_TITLE: &str = "Model Weights Visualizer";

// Magnitude classes for parameter counts
pub const THOUSAND: u64 = 1_000;
pub const MILLION: u64 = 1_000_000;
