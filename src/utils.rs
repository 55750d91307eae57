//! Formatting helpers shared by the pipeline and the batch summary.

/// Format a byte count as kilobytes with two decimals
///
/// # Arguments
/// * `bytes` - Size in bytes
///
/// # Returns
/// * Size string such as "866.21KB"
pub fn format_kb(bytes: u64) -> String {
    format!("{:.2}KB", bytes as f64 / 1024.0)
}

/// Reduction reported by the service's output ratio, as a percentage
///
/// A ratio of 0.885 means the output is 88.5% of the input, an 11.5% reduction.
pub fn reduction_percent(ratio: f64) -> f64 {
    (1.0 - ratio) * 100.0
}

/// Reduction computed from raw sizes, as a percentage
///
/// # Returns
/// * Positive for a reduction, negative for growth, 0 when nothing was measured
pub fn calculate_compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}
