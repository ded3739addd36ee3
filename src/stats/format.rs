//! Number formatting for metric tiles, labels and tooltips.

/// Round to an integer and group thousands: `1234567.4` -> `"1,234,567"`.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let rounded = value.round();
    let digits = (rounded.abs() as u64).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

const SI_SCALES: [(f64, &str); 4] = [(1.0, ""), (1e3, "k"), (1e6, "M"), (1e9, "G")];

/// Two significant digits with an SI suffix: `35400.0` -> `"35k"`.
pub fn format_si(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let mut scale = SI_SCALES
        .iter()
        .rposition(|(factor, _)| value.abs() >= *factor)
        .unwrap_or(0);
    loop {
        let (factor, suffix) = SI_SCALES[scale];
        let scaled = value / factor;
        let rounded = if scaled.abs() >= 10.0 {
            scaled.round()
        } else {
            (scaled * 10.0).round() / 10.0
        };
        // 999.5k rounds up to the next suffix
        if rounded.abs() >= 1000.0 && scale + 1 < SI_SCALES.len() {
            scale += 1;
            continue;
        }
        let text = if rounded.abs() >= 10.0 {
            format!("{:.0}", rounded)
        } else {
            format!("{:.1}", rounded)
        };
        let text = text.strip_suffix(".0").unwrap_or(&text);
        return format!("{}{}", text, suffix);
    }
}

/// Percentage without decimals: `33.3` -> `"33%"`.
pub fn format_percent(value: f64) -> String {
    format!("{:.0}%", value)
}
