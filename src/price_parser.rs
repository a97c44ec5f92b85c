use regex::Regex;
use once_cell::sync::Lazy;

static PRICE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$([0-9,]+\.?[0-9]*)").unwrap()
});

static CHANGE_PCT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(([+-]?[0-9]+\.?[0-9]*)%\)").unwrap()
});

/// Pulls the first `$` amount out of a combined display string such as
/// `"$580.41 +$17.81 (3.17%)"`. Thousands separators are dropped.
/// Returns 0.0 when nothing matches.
pub fn extract_price(text: &str) -> f64 {
    PRICE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| parse_leading_float(&m.as_str().replace(',', ""), false))
        .unwrap_or(0.0)
}

/// Pulls the parenthesised signed percentage, e.g. `(-1.25%)`.
/// Returns 0.0 when nothing matches.
pub fn extract_change_pct(text: &str) -> f64 {
    CHANGE_PCT_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| parse_leading_float(m.as_str().trim_start_matches('+'), true))
        .unwrap_or(0.0)
}

pub fn extract_price_and_change(text: &str) -> (f64, f64) {
    (extract_price(text), extract_change_pct(text))
}

/// Keeps only digits and `.` then parses, e.g. `"$1,234.50"` -> 1234.5.
pub fn parse_numeric(text: &str) -> f64 {
    let clean: String = text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    parse_leading_float(&clean, false)
}

/// Like [`parse_numeric`] but a leading minus survives, e.g. `"-2.34%"` -> -2.34.
pub fn parse_signed_numeric(text: &str) -> f64 {
    parse_leading_float(&clean_signed_numeric(text), true)
}

/// Drops everything but ASCII digits, `.` and `-`: `"-$1,234.50"` -> `"-1234.50"`.
pub fn clean_signed_numeric(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

/// Parses the longest numeric prefix (`-?\d*\.?\d*`) of an already cleaned
/// string. Anything unparsable or non-finite becomes 0.0.
fn parse_leading_float(text: &str, allow_sign: bool) -> f64 {
    let bytes = text.as_bytes();
    let mut end = 0;

    if allow_sign && bytes.first() == Some(&b'-') {
        end = 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    match text[..end].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forge_price_string() {
        let (price, change) = extract_price_and_change("$580.41 +$17.81 (3.17%)");
        assert_eq!(price, 580.41);
        assert_eq!(change, 3.17);
    }

    #[test]
    fn test_negative_change_and_thousands_separator() {
        let text = "$1,204.00 -$31.10 (-2.52%)";
        assert_eq!(extract_price(text), 1204.0);
        assert_eq!(extract_change_pct(text), -2.52);
    }

    #[test]
    fn test_explicit_plus_sign() {
        assert_eq!(extract_change_pct("(+0.5%)"), 0.5);
    }

    #[test]
    fn test_extractions_are_independent() {
        assert_eq!(extract_price("$12.5"), 12.5);
        assert_eq!(extract_change_pct("$12.5"), 0.0);
        assert_eq!(extract_price("no price (4%)"), 0.0);
        assert_eq!(extract_change_pct("no price (4%)"), 4.0);
    }

    #[test]
    fn test_missing_patterns_yield_zero() {
        for text in ["", "N/A", "580.41", "$", "$,", "3.17%", "(abc%)", "( 3%)"] {
            assert_eq!(extract_price(text), 0.0, "price for {:?}", text);
            assert_eq!(extract_change_pct(text), 0.0, "change for {:?}", text);
        }
    }

    #[test]
    fn test_trailing_dot_price() {
        assert_eq!(extract_price("$42."), 42.0);
    }

    #[test]
    fn test_parse_numeric_strips_symbols() {
        assert_eq!(parse_numeric("$1,234.50"), 1234.5);
        assert_eq!(parse_numeric("-2.34%"), 2.34);
        assert_eq!(parse_numeric("N/A"), 0.0);
        assert_eq!(parse_numeric(""), 0.0);
        assert_eq!(parse_numeric("1.2.3"), 1.2);
    }

    #[test]
    fn test_parse_signed_numeric_keeps_leading_minus() {
        assert_eq!(parse_signed_numeric("-2.34%"), -2.34);
        assert_eq!(parse_signed_numeric("+5.67%"), 5.67);
        assert_eq!(parse_signed_numeric("(-1.23%)"), -1.23);
        assert_eq!(parse_signed_numeric("--"), 0.0);
        assert_eq!(parse_signed_numeric("3-1"), 3.0);
    }

    #[test]
    fn test_only_ascii_digits_match() {
        assert_eq!(extract_change_pct("(3\u{663}%) (4%)"), 4.0);
        assert_eq!(extract_price("$\u{663}\u{664} $7.50"), 7.5);
    }

    #[test]
    fn test_clean_signed_numeric() {
        assert_eq!(clean_signed_numeric("-$1,234.50"), "-1234.50");
        assert_eq!(clean_signed_numeric("N/A"), "");
    }

    #[test]
    fn test_huge_values_never_become_infinite() {
        let huge = format!("${}", "9".repeat(400));
        assert_eq!(extract_price(&huge), 0.0);
        assert!(parse_numeric(&"9".repeat(400)).is_finite());
    }
}
