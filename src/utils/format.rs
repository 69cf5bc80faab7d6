/// Group an integer with comma thousands separators: `9000` -> `9,000`.
pub fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Dollar amount in whole units: `300` -> `$300`, `12500` -> `$12,500`.
pub fn currency(value: i64) -> String {
    format!("${}", thousands(value))
}

/// Shortest round-trip digits of a rate: `0.85`, `1.0`.
///
/// Exponents below -4 or from 16 up switch to scientific form with a signed,
/// two-digit exponent (`1e-07`, `2.5e+16`). Other values are plain decimals
/// and always carry a fractional part.
pub fn rate(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let scientific = format!("{:e}", value);
    let parts = scientific
        .split_once('e')
        .and_then(|(mantissa, exp)| exp.parse::<i32>().ok().map(|exp| (mantissa, exp)));

    match parts {
        Some((mantissa, exp)) if !(-4..16).contains(&exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        _ => {
            let text = value.to_string();
            if text.contains('.') {
                text
            } else {
                format!("{}.0", text)
            }
        }
    }
}
