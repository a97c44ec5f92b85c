use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::format::{format_change_pct, format_usd_delta, format_usd_whole};
use crate::models::Position;
use crate::price_parser::clean_signed_numeric;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PortfolioSummary {
    pub positions: Vec<Position>,
    pub total_value: Decimal,
    pub day_change: Decimal,
    pub day_change_pct: f64,
    pub total_value_display: String,
    /// e.g. `"+$2,224 (+2.86%)"`.
    pub day_change_display: String,
}

/// Position values arrive as display strings ("$27,825").
fn parse_money(text: &str) -> Decimal {
    Decimal::from_str(&clean_signed_numeric(text)).unwrap_or(Decimal::ZERO)
}

impl PortfolioSummary {
    pub fn from_positions(positions: Vec<Position>) -> Self {
        let mut total_value = Decimal::ZERO;
        let mut day_change = Decimal::ZERO;

        for pos in &positions {
            let value = parse_money(&pos.value);
            let change_pct = Decimal::from_f64(pos.change).unwrap_or(Decimal::ZERO);
            total_value += value;
            day_change += value * change_pct / Decimal::from(100);
        }

        // Percentage relative to yesterday's value
        let previous = total_value - day_change;
        let day_change_pct = if previous.is_zero() {
            0.0
        } else {
            (day_change / previous * Decimal::from(100))
                .round_dp(2)
                .to_f64()
                .unwrap_or(0.0)
        };

        let total_value = total_value.round_dp(2);
        let day_change = day_change.round_dp(2);

        PortfolioSummary {
            total_value_display: format_usd_whole(total_value),
            day_change_display: format!("{} ({})", format_usd_delta(day_change), format_change_pct(day_change_pct)),
            positions,
            total_value,
            day_change,
            day_change_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::{FallbackSource, MockData};
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("$27,825"), dec!(27825));
        assert_eq!(parse_money("$1,234.56"), dec!(1234.56));
        assert_eq!(parse_money("N/A"), Decimal::ZERO);
        assert_eq!(parse_money("-$291.60"), dec!(-291.60));
    }

    #[test]
    fn test_mock_portfolio_totals() {
        let summary = PortfolioSummary::from_positions(MockData.positions());
        assert_eq!(summary.total_value, dec!(79955));
        assert_eq!(summary.total_value_display, "$79,955");
        // 27825 * 3.24% + 28460 * 5.67% - 23670 * 1.23%
        assert_eq!(summary.day_change, dec!(2224.07));
        assert_eq!(summary.day_change_pct, 2.86);
        assert_eq!(summary.day_change_display, "+$2,224 (+2.86%)");
        assert_eq!(summary.positions.len(), 3);
    }

    #[test]
    fn test_empty_portfolio() {
        let summary = PortfolioSummary::from_positions(Vec::new());
        assert_eq!(summary.total_value, Decimal::ZERO);
        assert_eq!(summary.day_change_pct, 0.0);
        assert_eq!(summary.day_change_display, "+$0 (+0.00%)");
    }
}
