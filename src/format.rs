//! Number and bar formatting shared by the CLI report and TUI widgets

/// Format a number with thousand separators (e.g., 1234567 -> "1,234,567")
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let len = s.len();
    let mut result = String::with_capacity(len + len / 3);

    // Digits are ASCII, so byte indexing is safe
    for (i, ch) in s.bytes().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch as char);
    }

    result
}

/// Format a mean with one decimal and thousand separators ("4,504.3")
pub fn format_mean(value: f64) -> String {
    if !value.is_finite() || value < 0.0 {
        return format!("{:.1}", value);
    }
    let tenths = (value * 10.0).round() as u64;
    format!("{}.{}", format_number(tenths / 10), tenths % 10)
}

/// Proportional bar, e.g. value=500, max=1000, width=8 → "▓▓▓▓░░░░"
pub fn format_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || width == 0 {
        return "░".repeat(width);
    }
    let ratio = (value / max).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "▓".repeat(filled), "░".repeat(empty))
}
