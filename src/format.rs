//! Human-readable rendering of byte and token counts for run summaries.

/// Format a byte count as a human-readable string (`1.5 KB`, `3 MB`).
///
/// Uses 1024-based units up to GB. Two decimals, trailing zeros trimmed.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let i = (((bytes as f64).ln() / 1024f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(i as i32);
    format!("{} {}", trim_fixed(value), UNITS[i])
}

/// Format a token count as a human-readable string (`512 tokens`, `1.5K tokens`).
///
/// Negative counts keep their sign so "tokens spent back" reads naturally.
pub fn format_tokens(tokens: i64) -> String {
    if tokens == 0 {
        return "0 tokens".to_string();
    }
    if tokens.abs() < 1_000 {
        return format!("{} tokens", tokens);
    }
    if tokens.abs() < 1_000_000 {
        return format!("{:.1}K tokens", tokens as f64 / 1_000.0);
    }
    format!("{:.1}M tokens", tokens as f64 / 1_000_000.0)
}

/// Render with two decimals, then drop trailing zeros and a dangling dot.
fn trim_fixed(value: f64) -> String {
    let s = format!("{:.2}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
