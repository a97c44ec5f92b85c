use std::sync::Arc;
use tracing::{info, warn};

use crate::api_client::{ApiError, CompanySource};
use crate::category::Category;
use crate::detail::{build_deal_view, deal_view_from_company, DealView};
use crate::fallback::FallbackSource;
use crate::markets::{build_local_markets_view, build_markets_view, MarketsView};
use crate::models::MarketStats;
use crate::portfolio::PortfolioSummary;
use crate::transform::{SparklineSource, SyntheticSparkline};

/// Glues the company source, the fallback dataset and the view builders
/// together. Holds no mutable state.
pub struct DashboardService {
    source: Arc<dyn CompanySource>,
    fallback: Arc<dyn FallbackSource>,
    sparklines: Arc<dyn SparklineSource>,
    fallback_enabled: bool,
}

impl DashboardService {
    pub fn new(
        source: Arc<dyn CompanySource>,
        fallback: Arc<dyn FallbackSource>,
        fallback_enabled: bool,
    ) -> Self {
        Self {
            source,
            fallback,
            sparklines: Arc::new(SyntheticSparkline),
            fallback_enabled,
        }
    }

    pub fn with_sparklines(mut self, sparklines: Arc<dyn SparklineSource>) -> Self {
        self.sparklines = sparklines;
        self
    }

    pub async fn markets(
        &self,
        page: u32,
        category: Option<Category>,
        search: &str,
    ) -> Result<MarketsView, ApiError> {
        match self.source.get_companies(page, category, None).await {
            Ok(response) => {
                info!("Fetched page {} ({} items, {} total)", response.page, response.items.len(), response.total);
                Ok(build_markets_view(&response, search, category, self.sparklines.as_ref()))
            }
            Err(e) if self.fallback_enabled => {
                warn!("Company list unavailable, serving fallback data: {}", e);
                Ok(build_local_markets_view(self.fallback.companies(), page, search, category))
            }
            Err(e) => Err(e),
        }
    }

    /// `Ok(None)` when no source knows the slug.
    pub async fn deal(&self, slug: &str) -> Result<Option<DealView>, ApiError> {
        match self.source.get_company_detail(slug).await {
            Ok(detail) => Ok(Some(build_deal_view(&detail, self.fallback.as_ref()))),
            Err(e) if e.is_not_found() => {
                info!("Company {} not found upstream", slug);
                Ok(None)
            }
            Err(e) if self.fallback_enabled => {
                warn!("Detail for {} unavailable, trying fallback data: {}", slug, e);
                match self.fallback.company_by_slug(slug) {
                    Some(company) => Ok(Some(deal_view_from_company(&company, self.fallback.as_ref()))),
                    None => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    pub fn portfolio(&self) -> PortfolioSummary {
        PortfolioSummary::from_positions(self.fallback.positions())
    }

    pub fn market_stats(&self) -> MarketStats {
        self.fallback.market_stats()
    }
}
