//! Human-readable parameter counts and shapes.

use crate::utils::config::{MILLION, THOUSAND};

/// Format a parameter count as K for thousands and M for millions
///
/// **Public** - shared by all renderers
///
/// Counts below 1000 are printed literally. Larger counts are divided by
/// 1000 or 1_000_000 and printed with exactly two decimals, rounded the way
/// `{:.2}` rounds the `f64` quotient: `1_015` -> `1.01K`,
/// `1_245_000` -> `1.25M`, `999_999` -> `1000.00K`.
pub fn format_count(n: u64) -> String {
    if n >= MILLION {
        format_scaled(n, MILLION, 'M')
    } else if n >= THOUSAND {
        format_scaled(n, THOUSAND, 'K')
    } else {
        n.to_string()
    }
}

/// **Private** - internal helper for format_count
fn format_scaled(n: u64, unit: u64, suffix: char) -> String {
    format!("{:.2}{}", n as f64 / unit as f64, suffix)
}

/// Render a shape as `[d1, d2, ...]`
///
/// Scalars render as `[]`.
pub fn format_shape(shape: &[usize]) -> String {
    let dims: Vec<String> = shape.iter().map(|d| d.to_string()).collect();
    format!("[{}]", dims.join(", "))
}
