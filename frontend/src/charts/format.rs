//! Tick and legend labels for the demo charts.

pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rounds to the nearest whole number and groups thousands, keeping the sign.
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let grouped = format_thousands(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// `12000.0` -> `$12k`; halves round up, so `2500.0` -> `$3k`.
pub fn dollars_in_thousands(value: f64) -> String {
    format!("${}k", (value / 1000.0).round())
}

/// `3500.0` -> `$3,500`
pub fn dollars(value: f64) -> String {
    format!("${}", format_amount(value))
}

pub fn percent(value: f64) -> String {
    format!("{}%", value)
}

/// Share of `value` in `total` with one decimal; `0.0` when the total is empty.
pub fn share_percent(value: f64, total: f64) -> String {
    if total > 0.0 {
        format!("{:.1}", value / total * 100.0)
    } else {
        "0.0".to_string()
    }
}

/// Legend entry for the doughnut charts: `production: $8,420 (38.3%)`.
pub fn share_label(label: &str, value: f64, total: f64) -> String {
    format!("{}: {} ({}%)", label, dollars(value), share_percent(value, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(12500), "12,500");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn amount_keeps_sign() {
        assert_eq!(format_amount(-4068.4), "-4,068");
        assert_eq!(format_amount(8419.6), "8,420");
    }

    #[test]
    fn cost_axis_ticks() {
        assert_eq!(dollars_in_thousands(12000.0), "$12k");
        assert_eq!(dollars_in_thousands(0.0), "$0k");
        assert_eq!(dollars_in_thousands(14_400.0), "$14k");
        assert_eq!(dollars_in_thousands(2500.0), "$3k");
        assert_eq!(dollars_in_thousands(12_500.0), "$13k");
    }

    #[test]
    fn savings_axis_ticks() {
        assert_eq!(dollars(3500.0), "$3,500");
        assert_eq!(dollars(400.0), "$400");
    }

    #[test]
    fn utilization_axis_ticks() {
        assert_eq!(percent(85.0), "85%");
        assert_eq!(percent(100.0), "100%");
    }

    #[test]
    fn doughnut_legend_labels() {
        let total = 8420.0 + 3280.0 + 6720.0 + 1200.0 + 800.0 + 1580.0;
        assert_eq!(share_label("production", 8420.0, total), "production: $8,420 (38.3%)");
        assert_eq!(share_label("staging", 0.0, 0.0), "staging: $0 (0.0%)");
    }
}
