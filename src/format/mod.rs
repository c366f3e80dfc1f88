//! Pure display formatting for amounts, byte sizes, and percentages.
//!
//! Shared by the dashboard probes so that alert descriptions and card stats
//! render consistently; carries no UI or locale framework dependency.

/// Format a monetary amount with a currency symbol, thousands grouping, and
/// two decimals. Falls back to `CODE 1,234.56` for currencies without a
/// well-known symbol.
pub fn currency(amount: f64, code: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = group_thousands(whole);
    match symbol(code) {
        Some(sym) => format!("{sign}{sym}{grouped}.{frac}"),
        None => format!("{sign}{code} {grouped}.{frac}"),
    }
}

/// Format a byte count using binary units, one decimal, `.0` trimmed.
pub fn bytes(size: i64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if size <= 0 {
        return "0 B".to_string();
    }

    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        return format!("{size} B");
    }

    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as i64, UNITS[unit])
    } else {
        format!("{rounded:.1} {}", UNITS[unit])
    }
}

/// Format an integer percentage, e.g. `67` → `"67%"`.
pub fn percent(value: u32) -> String {
    format!("{value}%")
}

/// Currency symbol for common ISO codes.
fn symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        _ => None,
    }
}

/// Insert a comma every three digits, right to left.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }
    out
}
