use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::category::normalize_category;
use crate::models::{Company, SparklinePoint, UnifiedCompanyData, NOT_AVAILABLE, PLACEHOLDER};
use crate::price_parser::extract_price_and_change;
use crate::slug::slugify;

pub const SPARKLINE_POINTS: usize = 8;

/// Supplies the trend series shown next to each company. The API carries no
/// price history yet, so every implementation here is a stand-in.
pub trait SparklineSource: Send + Sync {
    fn sparkline(&self, slug: &str) -> Vec<SparklinePoint>;

    /// Whether the series is made up. Copied onto `Company::sparkline_synthetic`
    /// so the renderer can label it.
    fn is_synthetic(&self) -> bool {
        true
    }
}

/// Eight points in `[40, 60)`, seeded from the slug so the same company always
/// gets the same line.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticSparkline;

impl SparklineSource for SyntheticSparkline {
    fn sparkline(&self, slug: &str) -> Vec<SparklinePoint> {
        let mut hasher = DefaultHasher::new();
        slug.hash(&mut hasher);
        let mut rng = StdRng::seed_from_u64(hasher.finish());

        (0..SPARKLINE_POINTS)
            .map(|_| SparklinePoint { value: 40.0 + rng.gen_range(0.0..20.0) })
            .collect()
    }
}

/// Flat line at a fixed value.
#[derive(Debug, Clone, Copy)]
pub struct FlatSparkline(pub f64);

impl SparklineSource for FlatSparkline {
    fn sparkline(&self, _slug: &str) -> Vec<SparklinePoint> {
        vec![SparklinePoint { value: self.0 }; SPARKLINE_POINTS]
    }
}

/// Turns one upstream summary into the display model. Total: missing or
/// malformed fields fall back to 0 / "--" / "N/A" / Enterprise.
pub fn transform_company(data: &UnifiedCompanyData, sparklines: &dyn SparklineSource) -> Company {
    let slug = slugify(&data.name);
    let ticker = resolve_ticker(data);

    let (price, change_24h) = match data.raw_str("forge_price") {
        Some(text) => extract_price_and_change(&text),
        None => (0.0, 0.0),
    };

    let sector = normalize_category(Some(data.sector.as_deref().unwrap_or("Enterprise")));

    Company {
        sparkline: sparklines.sparkline(&slug),
        sparkline_synthetic: sparklines.is_synthetic(),
        slug,
        name: data.name.clone(),
        ticker,
        logo_url: data.raw_str("logo_url").filter(|s| !s.is_empty()),
        sector,
        price,
        change_24h,
        amount_raised: data
            .raw_str("amount_raised")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        market_cap: data
            .valuation
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        description: String::new(),
        founded: String::new(),
        headquarters: String::new(),
        employees: String::new(),
        last_funding: data.raw_str("round").unwrap_or_default(),
        last_valuation: data.valuation.clone().unwrap_or_default(),
        volume_24h: NOT_AVAILABLE.to_string(),
    }
}

pub fn transform_company_default(data: &UnifiedCompanyData) -> Company {
    transform_company(data, &SyntheticSparkline)
}

/// Output order matches input order.
pub fn transform_page(items: &[UnifiedCompanyData], sparklines: &dyn SparklineSource) -> Vec<Company> {
    items.iter().map(|item| transform_company(item, sparklines)).collect()
}

fn resolve_ticker(data: &UnifiedCompanyData) -> String {
    if let Some(ticker) = data.raw_str("ticker").filter(|t| !t.is_empty()) {
        return ticker;
    }
    let derived: String = data.name.chars().take(4).collect::<String>().to_uppercase();
    if derived.trim().is_empty() {
        PLACEHOLDER.to_string()
    } else {
        derived
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use serde_json::json;

    fn summary(value: serde_json::Value) -> UnifiedCompanyData {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_summary() {
        let data = summary(json!({
            "name": "Databricks",
            "sector": "Enterprise SoftwareData Intelligence",
            "valuation": "$62B",
            "source": "forge",
            "raw_data": {
                "ticker": "DBRX",
                "logo_url": "https://img.example/databricks.png",
                "forge_price": "$580.41 +$17.81 (3.17%)",
                "amount_raised": "$4.1B",
                "round": "Series J"
            }
        }));

        let company = transform_company(&data, &FlatSparkline(50.0));
        assert_eq!(company.slug, "databricks");
        assert_eq!(company.ticker, "DBRX");
        assert_eq!(company.logo_url.as_deref(), Some("https://img.example/databricks.png"));
        assert_eq!(company.sector, Category::Enterprise);
        assert_eq!(company.price, 580.41);
        assert_eq!(company.change_24h, 3.17);
        assert_eq!(company.amount_raised, "$4.1B");
        assert_eq!(company.market_cap, "$62B");
        assert_eq!(company.last_funding, "Series J");
        assert_eq!(company.last_valuation, "$62B");
        assert_eq!(company.volume_24h, "N/A");
        assert_eq!(company.sparkline, vec![SparklinePoint { value: 50.0 }; SPARKLINE_POINTS]);
    }

    #[test]
    fn test_ticker_derived_from_name() {
        let company = transform_company_default(&summary(json!({"name": "OpenAI"})));
        assert_eq!(company.ticker, "OPEN");

        let short = transform_company_default(&summary(json!({"name": "X"})));
        assert_eq!(short.ticker, "X");
    }

    #[test]
    fn test_empty_ticker_string_is_ignored() {
        let company = transform_company_default(&summary(json!({"name": "Stripe", "raw_data": {"ticker": ""}})));
        assert_eq!(company.ticker, "STRI");
    }

    #[test]
    fn test_ticker_never_empty() {
        let company = transform_company_default(&summary(json!({"name": ""})));
        assert_eq!(company.ticker, "--");
        assert_eq!(company.slug, "");
    }

    #[test]
    fn test_sparse_summary_uses_placeholders() {
        let company = transform_company_default(&summary(json!({"name": "Ramp"})));
        assert_eq!(company.sector, Category::Enterprise);
        assert_eq!(company.price, 0.0);
        assert_eq!(company.change_24h, 0.0);
        assert_eq!(company.amount_raised, "--");
        assert_eq!(company.market_cap, "N/A");
        assert_eq!(company.last_funding, "");
        assert!(company.logo_url.is_none());
    }

    #[test]
    fn test_empty_strings_use_placeholders() {
        let company = transform_company_default(&summary(json!({
            "name": "Ramp",
            "valuation": "",
            "raw_data": {"amount_raised": ""}
        })));
        assert_eq!(company.amount_raised, "--");
        assert_eq!(company.market_cap, "N/A");
    }

    #[test]
    fn test_malformed_price_degrades_to_zero() {
        let company = transform_company_default(&summary(json!({
            "name": "Ramp",
            "raw_data": {"forge_price": "Price unavailable"}
        })));
        assert_eq!(company.price, 0.0);
        assert_eq!(company.change_24h, 0.0);
    }

    #[test]
    fn test_synthetic_sparkline_is_flagged_and_stable() {
        let data = summary(json!({"name": "Anduril"}));
        let a = transform_company_default(&data);
        let b = transform_company_default(&data);

        assert!(a.sparkline_synthetic);
        assert_eq!(a.sparkline.len(), SPARKLINE_POINTS);
        assert_eq!(a.sparkline, b.sparkline);
        assert!(a.sparkline.iter().all(|p| p.value >= 40.0 && p.value < 60.0));
    }

    #[test]
    fn test_page_preserves_order() {
        let items = vec![
            summary(json!({"name": "Zeta"})),
            summary(json!({"name": "Alpha"})),
            summary(json!({"name": "Mu"})),
        ];
        let names: Vec<_> = transform_page(&items, &FlatSparkline(1.0))
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mu"]);
    }
}
