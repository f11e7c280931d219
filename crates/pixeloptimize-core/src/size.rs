//! Human-readable byte sizes for display.

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count with two decimals, e.g. `1536` as `"1.5 KB"`.
pub fn format_bytes(bytes: u64) -> String {
    format_bytes_with_decimals(bytes, 2)
}

/// Format a byte count in 1024-based units.
///
/// The value is rounded half up to `decimals` places (negative counts as
/// zero) and trailing zeros are dropped. Sizes beyond GB stay in GB.
pub fn format_bytes_with_decimals(bytes: u64, decimals: i32) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    // Ties round up; `{}` then prints the shortest form
    let scale = 10f64.powi(decimals.max(0));
    let rounded = (value * scale).round() / scale;
    format!("{} {}", rounded, UNITS[unit])
}

/// Percentage saved going from `original` to `processed` bytes, rounded.
///
/// Positive means the output is smaller, negative means it grew. An empty
/// original gives 0.
pub fn size_change_percent(original: u64, processed: u64) -> i64 {
    if original == 0 {
        return 0;
    }
    ((1.0 - processed as f64 / original as f64) * 100.0).round() as i64
}
