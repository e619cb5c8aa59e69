//! Display formatting shared by the summary views.

/// Format a USD amount the way the dashboard shows balances:
/// en-US digit grouping, no fraction digits (`$12,430`, `-$1,234`).
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_string();
    }
    let rounded = amount.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Format a percentage with an explicit sign and one decimal
/// (`+3.4%`, `-2.0%`, `0.0%`).
pub fn format_signed_percent(pct: f64) -> String {
    if !pct.is_finite() {
        return "0.0%".to_string();
    }
    let magnitude = format!("{:.1}", pct.abs());
    // Values that round to zero get no sign
    if magnitude == "0.0" {
        return "0.0%".to_string();
    }
    let sign = if pct > 0.0 { "+" } else { "-" };
    format!("{sign}{magnitude}%")
}
