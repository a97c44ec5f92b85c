use crate::category::Category;
use crate::models::{
    Company, MarketStats, NewsItem, Order, OrderSide, Position, SparklinePoint, NOT_AVAILABLE,
};

/// Data the dashboard shows when the API has nothing for a concern yet
/// (orders, news, positions) or cannot be reached at all.
pub trait FallbackSource: Send + Sync {
    fn companies(&self) -> Vec<Company>;
    fn orders_for(&self, slug: &str) -> Vec<Order>;
    fn news_for(&self, slug: &str) -> Vec<NewsItem>;
    fn positions(&self) -> Vec<Position>;
    fn market_stats(&self) -> MarketStats;

    fn company_by_slug(&self, slug: &str) -> Option<Company> {
        self.companies().into_iter().find(|c| c.slug == slug)
    }

    /// Up to four companies in `sector`, excluding `slug` itself.
    fn similar_to(&self, slug: &str, sector: Category) -> Vec<Company> {
        self.companies()
            .into_iter()
            .filter(|c| c.sector == sector && c.slug != slug)
            .take(4)
            .collect()
    }
}

/// Built-in demo dataset. Orders and news are the same for every company.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockData;

/// Empty source, used when the fallback is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

const SPARK_UP: [f64; 8] = [40.0, 42.0, 38.0, 45.0, 50.0, 48.0, 55.0, 60.0];
const SPARK_DOWN: [f64; 8] = [60.0, 55.0, 58.0, 50.0, 45.0, 48.0, 42.0, 38.0];
const SPARK_FLAT: [f64; 8] = [50.0, 52.0, 48.0, 51.0, 49.0, 53.0, 50.0, 52.0];

struct MockCompany {
    slug: &'static str,
    name: &'static str,
    ticker: &'static str,
    sector: Category,
    price: f64,
    change_24h: f64,
    volume: &'static str,
    valuation: &'static str,
    spark: &'static [f64; 8],
    description: &'static str,
    founded: &'static str,
    headquarters: &'static str,
    employees: &'static str,
    last_funding: &'static str,
}

const MOCK_COMPANIES: [MockCompany; 8] = [
    MockCompany {
        slug: "spacex", name: "SpaceX", ticker: "SPACEX", sector: Category::Space,
        price: 185.50, change_24h: 3.24, volume: "$12.4M", valuation: "$180B", spark: &SPARK_UP,
        description: "Space Exploration Technologies Corp. designs, manufactures, and launches advanced rockets and spacecraft.",
        founded: "2002", headquarters: "Hawthorne, CA", employees: "13,000+", last_funding: "$750M (Series N)",
    },
    MockCompany {
        slug: "openai", name: "OpenAI", ticker: "OPENAI", sector: Category::AI,
        price: 142.30, change_24h: 5.67, volume: "$8.9M", valuation: "$157B", spark: &SPARK_UP,
        description: "OpenAI is an AI research and deployment company dedicated to ensuring artificial general intelligence benefits all of humanity.",
        founded: "2015", headquarters: "San Francisco, CA", employees: "3,500+", last_funding: "$6.6B (Series E)",
    },
    MockCompany {
        slug: "stripe", name: "Stripe", ticker: "STRIPE", sector: Category::Fintech,
        price: 78.90, change_24h: -1.23, volume: "$5.6M", valuation: "$65B", spark: &SPARK_DOWN,
        description: "Stripe is a financial infrastructure platform for the internet, building economic infrastructure for businesses of all sizes.",
        founded: "2010", headquarters: "San Francisco, CA", employees: "8,000+", last_funding: "$600M (Series I)",
    },
    MockCompany {
        slug: "anthropic", name: "Anthropic", ticker: "ANTHR", sector: Category::AI,
        price: 96.40, change_24h: 8.12, volume: "$7.2M", valuation: "$61.5B", spark: &SPARK_UP,
        description: "Anthropic is an AI safety company focused on building reliable, interpretable, and steerable AI systems.",
        founded: "2021", headquarters: "San Francisco, CA", employees: "1,500+", last_funding: "$2B (Series D)",
    },
    MockCompany {
        slug: "databricks", name: "Databricks", ticker: "DBRKX", sector: Category::Enterprise,
        price: 65.20, change_24h: 2.45, volume: "$4.1M", valuation: "$62B", spark: &SPARK_UP,
        description: "Databricks is a unified analytics platform for massive-scale data engineering, data science, and machine learning.",
        founded: "2013", headquarters: "San Francisco, CA", employees: "7,000+", last_funding: "$500M (Series I)",
    },
    MockCompany {
        slug: "shein", name: "Shein", ticker: "SHEIN", sector: Category::Consumer,
        price: 45.80, change_24h: -2.34, volume: "$3.8M", valuation: "$45B", spark: &SPARK_DOWN,
        description: "Shein is a global online fashion and lifestyle retailer committed to making trendy fashion accessible.",
        founded: "2008", headquarters: "Singapore", employees: "16,000+", last_funding: "$2B (Series F)",
    },
    MockCompany {
        slug: "ripple", name: "Ripple", ticker: "XRP", sector: Category::Crypto,
        price: 32.10, change_24h: 1.89, volume: "$6.7M", valuation: "$11B", spark: &SPARK_FLAT,
        description: "Ripple provides global financial settlement solutions through blockchain technology.",
        founded: "2012", headquarters: "San Francisco, CA", employees: "900+", last_funding: "$200M (Series C)",
    },
    MockCompany {
        slug: "tempus-ai", name: "Tempus AI", ticker: "TMPUS", sector: Category::Health,
        price: 54.30, change_24h: 4.56, volume: "$2.3M", valuation: "$8.1B", spark: &SPARK_UP,
        description: "Tempus is a technology company advancing precision medicine through AI and data analytics.",
        founded: "2015", headquarters: "Chicago, IL", employees: "2,500+", last_funding: "$275M (Series G)",
    },
];

impl MockCompany {
    fn to_company(&self) -> Company {
        Company {
            slug: self.slug.to_string(),
            name: self.name.to_string(),
            ticker: self.ticker.to_string(),
            logo_url: None,
            sector: self.sector,
            price: self.price,
            change_24h: self.change_24h,
            amount_raised: self.volume.to_string(),
            market_cap: self.valuation.to_string(),
            sparkline: self.spark.iter().map(|&value| SparklinePoint { value }).collect(),
            sparkline_synthetic: true,
            description: self.description.to_string(),
            founded: self.founded.to_string(),
            headquarters: self.headquarters.to_string(),
            employees: self.employees.to_string(),
            last_funding: self.last_funding.to_string(),
            last_valuation: self.valuation.to_string(),
            volume_24h: self.volume.to_string(),
        }
    }
}

fn order(id: &str, date: &str, price: f64, volume: &str, structure: &str, side: OrderSide) -> Order {
    Order {
        id: id.to_string(),
        date: date.to_string(),
        price,
        volume: volume.to_string(),
        structure: structure.to_string(),
        side,
    }
}

fn news(headline: &str, source: &str, date: &str) -> NewsItem {
    NewsItem {
        headline: headline.to_string(),
        source: source.to_string(),
        date: date.to_string(),
        url: "#".to_string(),
    }
}

fn position(company: &str, ticker: &str, shares: u32, value: &str, change: f64) -> Position {
    Position {
        company: company.to_string(),
        ticker: ticker.to_string(),
        shares,
        value: value.to_string(),
        change,
    }
}

impl FallbackSource for MockData {
    fn companies(&self) -> Vec<Company> {
        MOCK_COMPANIES.iter().map(MockCompany::to_company).collect()
    }

    fn orders_for(&self, _slug: &str) -> Vec<Order> {
        vec![
            order("1", "2026-02-10", 184.00, "$250K", "Direct", OrderSide::Bid),
            order("2", "2026-02-09", 182.50, "$500K", "SPV", OrderSide::Bid),
            order("3", "2026-02-08", 180.00, "$1M", "Forward", OrderSide::Bid),
            order("4", "2026-02-07", 179.00, "$750K", "Direct", OrderSide::Bid),
            order("5", "2026-02-10", 188.00, "$300K", "Direct", OrderSide::Offer),
            order("6", "2026-02-09", 190.00, "$600K", "SPV", OrderSide::Offer),
            order("7", "2026-02-08", 192.50, "$450K", "Forward", OrderSide::Offer),
            order("8", "2026-02-07", 195.00, "$800K", "Direct", OrderSide::Offer),
        ]
    }

    fn news_for(&self, _slug: &str) -> Vec<NewsItem> {
        vec![
            news("Starship achieves successful orbital flight milestone", "Reuters", "2026-02-10"),
            news("SpaceX raises $750M at $180B valuation", "TechCrunch", "2026-02-08"),
            news("Starlink surpasses 5 million subscribers globally", "Bloomberg", "2026-02-05"),
        ]
    }

    fn positions(&self) -> Vec<Position> {
        vec![
            position("SpaceX", "SPACEX", 150, "$27,825", 3.24),
            position("OpenAI", "OPENAI", 200, "$28,460", 5.67),
            position("Stripe", "STRIPE", 300, "$23,670", -1.23),
        ]
    }

    fn market_stats(&self) -> MarketStats {
        MarketStats {
            total_volume: "$58.2M".to_string(),
            total_volume_change: "+12.4%".to_string(),
            active_markets: MOCK_COMPANIES.len() as u32,
            active_markets_change: "+3".to_string(),
            total_traders: "24.8K".to_string(),
            total_traders_change: "+890".to_string(),
            tvl: "$312M".to_string(),
            tvl_change: "+8.7%".to_string(),
        }
    }
}

impl FallbackSource for NoFallback {
    fn companies(&self) -> Vec<Company> {
        Vec::new()
    }

    fn orders_for(&self, _slug: &str) -> Vec<Order> {
        Vec::new()
    }

    fn news_for(&self, _slug: &str) -> Vec<NewsItem> {
        Vec::new()
    }

    fn positions(&self) -> Vec<Position> {
        Vec::new()
    }

    fn market_stats(&self) -> MarketStats {
        MarketStats {
            total_volume: NOT_AVAILABLE.to_string(),
            total_volume_change: NOT_AVAILABLE.to_string(),
            active_markets: 0,
            active_markets_change: NOT_AVAILABLE.to_string(),
            total_traders: NOT_AVAILABLE.to_string(),
            total_traders_change: NOT_AVAILABLE.to_string(),
            tvl: NOT_AVAILABLE.to_string(),
            tvl_change: NOT_AVAILABLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slug::slugify;

    #[test]
    fn test_mock_slugs_follow_slug_rule() {
        for company in MockData.companies() {
            assert_eq!(company.slug, slugify(&company.name), "{}", company.name);
        }
    }

    #[test]
    fn test_similar_excludes_self_and_other_sectors() {
        let similar = MockData.similar_to("openai", Category::AI);
        let slugs: Vec<_> = similar.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["anthropic"]);
    }

    #[test]
    fn test_orders_split_into_bids_and_offers() {
        let orders = MockData.orders_for("spacex");
        assert_eq!(orders.iter().filter(|o| o.side == OrderSide::Bid).count(), 4);
        assert_eq!(orders.iter().filter(|o| o.side == OrderSide::Offer).count(), 4);
    }

    #[test]
    fn test_company_by_slug() {
        assert_eq!(MockData.company_by_slug("stripe").unwrap().ticker, "STRIPE");
        assert!(MockData.company_by_slug("nope").is_none());
        assert!(NoFallback.company_by_slug("stripe").is_none());
    }
}
