use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use crate::models::SparklinePoint;

/// `1234567` -> `"1,234,567"`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `580.41` -> `"$580.41"`.
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return "$0.00".to_string();
    }
    format!("${:.2}", price)
}

/// `3.17` -> `"+3.17%"`, `-1.2` -> `"-1.20%"`. Zero counts as positive.
pub fn format_change_pct(change: f64) -> String {
    let change = if change.is_finite() { change } else { 0.0 };
    if change >= 0.0 {
        format!("+{:.2}%", change)
    } else {
        format!("{:.2}%", change)
    }
}

/// Whole-dollar amount with separators, e.g. `dec!(79955.4)` -> `"$79,955"`.
/// Negative amounts keep their sign in front of the `$`.
pub fn format_usd_whole(amount: Decimal) -> String {
    let rounded = amount.round_dp(0);
    let whole = rounded.abs().to_u64().unwrap_or(0);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${}", format_thousands(whole))
    } else {
        format!("${}", format_thousands(whole))
    }
}

/// Signed whole-dollar delta, e.g. `"+$4,230"`.
pub fn format_usd_delta(amount: Decimal) -> String {
    let formatted = format_usd_whole(amount);
    if formatted.starts_with('-') {
        formatted
    } else {
        format!("+{}", formatted)
    }
}

/// SVG `points` attribute for a sparkline scaled into `width` x `height`.
/// Higher values sit nearer the top. A flat or single-point series is drawn
/// along the vertical middle.
pub fn sparkline_points(points: &[SparklinePoint], width: f64, height: f64) -> String {
    if points.is_empty() {
        return String::new();
    }
    let min = points.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let step = if points.len() > 1 { width / (points.len() - 1) as f64 } else { 0.0 };

    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let y = if span > 0.0 { height - (p.value - min) / span * height } else { height / 2.0 };
            format!("{:.1},{:.1}", i as f64 * step, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(5237), "5,237");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_format_price_and_change() {
        assert_eq!(format_price(580.41), "$580.41");
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(f64::NAN), "$0.00");
        assert_eq!(format_change_pct(3.17), "+3.17%");
        assert_eq!(format_change_pct(-1.2), "-1.20%");
        assert_eq!(format_change_pct(0.0), "+0.00%");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd_whole(dec!(79955)), "$79,955");
        assert_eq!(format_usd_whole(dec!(-291.6)), "-$292");
        assert_eq!(format_usd_delta(dec!(4230)), "+$4,230");
        assert_eq!(format_usd_delta(dec!(-12.2)), "-$12");
        assert_eq!(format_usd_delta(dec!(0)), "+$0");
    }

    #[test]
    fn test_sparkline_points() {
        let points: Vec<SparklinePoint> = [40.0, 60.0, 50.0].iter().map(|&value| SparklinePoint { value }).collect();
        assert_eq!(sparkline_points(&points, 100.0, 20.0), "0.0,20.0 50.0,0.0 100.0,10.0");

        let flat = vec![SparklinePoint { value: 5.0 }; 2];
        assert_eq!(sparkline_points(&flat, 10.0, 20.0), "0.0,10.0 10.0,10.0");
        assert_eq!(sparkline_points(&[], 10.0, 20.0), "");
    }
}
