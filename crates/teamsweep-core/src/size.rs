//! Human-readable byte sizes for report cells

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Format a byte count using 1024-based units.
///
/// The largest unit whose threshold the value reaches is used, rounded to two
/// decimals with trailing zeros dropped (`1 KB`, `1.5 MB`). Anything under a
/// kilobyte is reported as raw bytes.
pub fn format_size(bytes: u64) -> String {
    for (threshold, unit) in [(GB, "GB"), (MB, "MB"), (KB, "KB")] {
        if bytes >= threshold {
            return format!("{} {}", round2(bytes as f64 / threshold as f64), unit);
        }
    }
    format!("{} Bytes", bytes)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
