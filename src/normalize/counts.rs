//! Humanized number parsing ("1.2k", "1,234", "-3")

/// Parses a humanized non-negative count
///
/// `1.2k` → 1200 and `3.4m` → 3400000; otherwise every non-digit is stripped and
/// the rest parsed. Blank or digit-free input is 0.
pub fn parse_count(text: &str) -> u64 {
    let cleaned = text.trim().to_lowercase().replace(',', "");

    for (suffix, multiplier) in [('k', 1_000.0), ('m', 1_000_000.0)] {
        if let Some(number) = cleaned.strip_suffix(suffix) {
            if let Ok(value) = number.trim().parse::<f64>() {
                if value.is_finite() && value >= 0.0 {
                    return (value * multiplier).round() as u64;
                }
            }
        }
    }

    digits_only(&cleaned).parse().unwrap_or(0)
}

/// Parses a vote score, which may be negative
pub fn parse_score(text: &str) -> i64 {
    let trimmed = text.trim();
    match trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('\u{2212}'))
    {
        Some(rest) => -(parse_count(rest).min(i64::MAX as u64) as i64),
        None => parse_count(trimmed).min(i64::MAX as u64) as i64,
    }
}

/// First run of digits (commas inside the run allowed), e.g. "Viewed 1,234 times" → 1234
pub fn first_number(text: &str) -> Option<u64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let run: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(char::is_ascii_digit)
        .collect();
    run.parse().ok()
}

/// String-encoded reputation
///
/// Prefers the exact figure in a `reputation score 1,234` title attribute,
/// then the humanized text; falls back to `default` when neither has digits.
pub fn normalize_reputation(title: Option<&str>, text: Option<&str>, default: &str) -> String {
    if let Some(exact) = title.and_then(first_number) {
        return exact.to_string();
    }

    match text.map(str::trim).filter(|t| t.chars().any(|c| c.is_ascii_digit())) {
        Some(text) => parse_count(text).to_string(),
        None => default.to_string(),
    }
}

fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}
