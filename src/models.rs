use serde::{Deserialize, Deserializer, Serialize};
use chrono::{DateTime, NaiveDateTime};
use std::fmt;
use crate::category::Category;

pub const PLACEHOLDER: &str = "--";
pub const NOT_AVAILABLE: &str = "N/A";
pub const UNDISCLOSED: &str = "Undisclosed";

// ---------------------------------------------------------------------------
// Upstream payloads, as returned by the data API
// ---------------------------------------------------------------------------

/// Compact company record from `/data/forge`. `raw_data` is whatever the
/// scraper captured and is only read through [`UnifiedCompanyData::raw_str`].
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UnifiedCompanyData {
    pub name: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub valuation: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_datetime")]
    pub date_scraped: Option<NaiveDateTime>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub raw_data: serde_json::Map<String, serde_json::Value>,
}

impl UnifiedCompanyData {
    /// String view of a `raw_data` entry. Numbers are rendered as text, every
    /// other non-string shape counts as absent.
    pub fn raw_str(&self, key: &str) -> Option<String> {
        match self.raw_data.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct FundingRound {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub date: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub round_label: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub amount_raised: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub valuation: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub investors: Vec<String>,

    #[serde(default)]
    pub price_per_share: Option<String>,
    #[serde(default)]
    pub shares_outstanding: Option<String>,
    #[serde(default)]
    pub liquidation_preference_order: Option<String>,
    #[serde(default)]
    pub liquidation_preference_multiple: Option<String>,
    #[serde(default)]
    pub conversion_ratio: Option<String>,
    #[serde(default)]
    pub dividend_rate: Option<String>,
    #[serde(default)]
    pub dividend_type: Option<String>,
    #[serde(default)]
    pub participation_type: Option<String>,
    #[serde(default)]
    pub participation_cap: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct KeyPerson {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub role: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Expanded record from `/data/company/{slug}`. Market fields arrive already
/// formatted ("$580.41", "+3.17%").
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct CompanyDetail {
    #[serde(deserialize_with = "deserialize_null_default")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub slug: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub ticker: String,
    pub logo_url: Option<String>,

    #[serde(deserialize_with = "deserialize_null_default")]
    pub description: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub sector: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub subsector: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub founded: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub headquarters: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub website: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub employees: String,

    #[serde(deserialize_with = "deserialize_null_default")]
    pub price: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub price_change: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub price_change_pct: String,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub valuation: String,

    #[serde(deserialize_with = "deserialize_null_default")]
    pub funding_history: Vec<FundingRound>,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub key_people: Vec<KeyPerson>,
    #[serde(deserialize_with = "deserialize_null_default")]
    pub investors: Vec<String>,

    #[serde(deserialize_with = "deserialize_lenient_datetime")]
    pub scraped_at: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PaginatedResponse {
    #[serde(default)]
    pub items: Vec<UnifiedCompanyData>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default = "first_page")]
    pub pages: u32,
}

fn first_page() -> u32 {
    1
}

// ---------------------------------------------------------------------------
// Display models, consumed by the templates and the JSON endpoints
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SparklinePoint {
    pub value: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub slug: String,
    pub name: String,
    pub ticker: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub sector: Category,
    pub price: f64,
    #[serde(rename = "change24h")]
    pub change_24h: f64,
    pub amount_raised: String,
    pub market_cap: String,
    pub sparkline: Vec<SparklinePoint>,
    /// True when `sparkline` is placeholder data rather than real history.
    pub sparkline_synthetic: bool,
    pub description: String,
    pub founded: String,
    pub headquarters: String,
    pub employees: String,
    pub last_funding: String,
    pub last_valuation: String,
    #[serde(rename = "volume24h")]
    pub volume_24h: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FundingRoundView {
    pub date: String,
    pub round: String,
    pub amount: String,
    pub valuation: String,
    pub investors: String,
    pub price_per_share: String,
    pub shares_outstanding: String,
    pub liquidation_preference_order: String,
    pub liquidation_preference_multiple: String,
    pub conversion_ratio: String,
    pub dividend_rate: String,
    pub dividend_type: String,
    pub participation_type: String,
    pub participation_cap: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum InvestorType {
    Venture,
    Crossover,
    Strategic,
}

impl fmt::Display for InvestorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvestorType::Venture => "Venture",
            InvestorType::Crossover => "Crossover",
            InvestorType::Strategic => "Strategic",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Investor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InvestorType,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Leader {
    pub name: String,
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewsItem {
    pub headline: String,
    pub source: String,
    pub date: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Bid,
    Offer,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub date: String,
    pub price: f64,
    pub volume: String,
    pub structure: String,
    #[serde(rename = "type")]
    pub side: OrderSide,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Position {
    pub company: String,
    pub ticker: String,
    pub shares: u32,
    pub value: String,
    pub change: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketStats {
    pub total_volume: String,
    pub total_volume_change: String,
    pub active_markets: u32,
    pub active_markets_change: String,
    pub total_traders: String,
    pub total_traders_change: String,
    pub tvl: String,
    pub tvl_change: String,
}

/// Where a view's company data came from.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Api,
    Fallback,
}

fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_lenient_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let s = match value {
        Some(serde_json::Value::String(s)) => s,
        _ => return Ok(None),
    };
    // Try RFC 3339 with an offset first, then the naive ISO shapes Python emits
    if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
        return Ok(Some(dt.naive_utc()));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(dt));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(Some(dt));
    }
    Ok(None)
}
