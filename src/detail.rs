use serde::{Deserialize, Serialize};

use crate::category::{normalize_category, Category};
use crate::fallback::FallbackSource;
use crate::format::{format_change_pct, format_price};
use crate::models::{
    Company, CompanyDetail, FundingRound, FundingRoundView, Investor, InvestorType, Leader,
    NewsItem, Order, OrderSide, DataSource, NOT_AVAILABLE, PLACEHOLDER, UNDISCLOSED,
};
use crate::price_parser::{parse_numeric, parse_signed_numeric};

/// Everything the deal page renders for one company.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DealView {
    pub slug: String,
    pub name: String,
    pub ticker: String,
    pub avatar: String,
    pub logo_url: Option<String>,
    pub sector: Category,
    pub subsector: String,
    pub price: f64,
    pub change_24h: f64,
    pub price_display: String,
    pub change_display: String,
    pub is_positive: bool,
    pub description: String,
    pub founded: String,
    pub headquarters: String,
    pub employees: String,
    pub website: String,
    pub last_funding: String,
    pub market_cap: String,
    pub last_valuation: String,
    pub funding_rounds: Vec<FundingRoundView>,
    pub investors: Vec<Investor>,
    pub leadership: Vec<Leader>,
    pub bids: Vec<Order>,
    pub offers: Vec<Order>,
    pub news: Vec<NewsItem>,
    pub similar: Vec<Company>,
    pub data_source: DataSource,
}

fn or_placeholder(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn funding_round_view(round: &FundingRound) -> FundingRoundView {
    let investors = if round.investors.is_empty() {
        UNDISCLOSED.to_string()
    } else {
        round.investors.join(", ")
    };

    FundingRoundView {
        date: round.date.clone(),
        round: round.round_label.clone(),
        amount: round.amount_raised.clone(),
        valuation: round.valuation.clone(),
        investors,
        price_per_share: or_placeholder(&round.price_per_share),
        shares_outstanding: or_placeholder(&round.shares_outstanding),
        liquidation_preference_order: or_placeholder(&round.liquidation_preference_order),
        liquidation_preference_multiple: or_placeholder(&round.liquidation_preference_multiple),
        conversion_ratio: or_placeholder(&round.conversion_ratio),
        dividend_rate: or_placeholder(&round.dividend_rate),
        dividend_type: or_placeholder(&round.dividend_type),
        participation_type: or_placeholder(&round.participation_type),
        participation_cap: or_placeholder(&round.participation_cap),
    }
}

pub fn funding_rounds(detail: &CompanyDetail) -> Vec<FundingRoundView> {
    detail.funding_history.iter().map(funding_round_view).collect()
}

pub fn leadership(detail: &CompanyDetail) -> Vec<Leader> {
    detail
        .key_people
        .iter()
        .map(|p| Leader { name: p.name.clone(), title: p.role.clone() })
        .collect()
}

/// The API only sends investor names, so every investor is classed as Venture
/// until it carries a type.
pub fn investors(detail: &CompanyDetail) -> Vec<Investor> {
    detail
        .investors
        .iter()
        .map(|name| Investor { name: name.clone(), kind: InvestorType::Venture })
        .collect()
}

fn avatar(ticker: &str, name: &str) -> String {
    let source = if ticker.trim().is_empty() { name } else { ticker };
    source.chars().take(2).collect::<String>().to_uppercase()
}

fn split_orders(orders: Vec<Order>) -> (Vec<Order>, Vec<Order>) {
    orders.into_iter().partition(|o| o.side == OrderSide::Bid)
}

/// Composes the API detail record with the fallback source's orders, news and
/// similar companies.
pub fn build_deal_view(detail: &CompanyDetail, fallback: &dyn FallbackSource) -> DealView {
    let price = parse_numeric(&detail.price);
    let change_24h = parse_signed_numeric(&detail.price_change_pct);
    let sector = normalize_category(Some(&detail.sector));
    let (bids, offers) = split_orders(fallback.orders_for(&detail.slug));

    let last_funding = detail
        .funding_history
        .first()
        .map(|f| f.round_label.clone())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    DealView {
        slug: detail.slug.clone(),
        name: detail.name.clone(),
        ticker: detail.ticker.clone(),
        avatar: avatar(&detail.ticker, &detail.name),
        logo_url: detail.logo_url.clone().filter(|u| !u.is_empty()),
        sector,
        subsector: detail.subsector.clone(),
        price,
        change_24h,
        price_display: format_price(price),
        change_display: format_change_pct(change_24h),
        is_positive: change_24h >= 0.0,
        description: detail.description.clone(),
        founded: detail.founded.clone(),
        headquarters: detail.headquarters.clone(),
        employees: detail.employees.clone(),
        website: detail.website.clone(),
        last_funding,
        market_cap: detail.valuation.clone(),
        last_valuation: detail.valuation.clone(),
        funding_rounds: funding_rounds(detail),
        investors: investors(detail),
        leadership: leadership(detail),
        bids,
        offers,
        news: fallback.news_for(&detail.slug),
        similar: fallback.similar_to(&detail.slug, sector),
        data_source: DataSource::Api,
    }
}

/// Deal page for a company only the fallback source knows about.
pub fn deal_view_from_company(company: &Company, fallback: &dyn FallbackSource) -> DealView {
    let (bids, offers) = split_orders(fallback.orders_for(&company.slug));

    DealView {
        slug: company.slug.clone(),
        name: company.name.clone(),
        ticker: company.ticker.clone(),
        avatar: avatar(&company.ticker, &company.name),
        logo_url: company.logo_url.clone(),
        sector: company.sector,
        subsector: String::new(),
        price: company.price,
        change_24h: company.change_24h,
        price_display: format_price(company.price),
        change_display: format_change_pct(company.change_24h),
        is_positive: company.change_24h >= 0.0,
        description: company.description.clone(),
        founded: company.founded.clone(),
        headquarters: company.headquarters.clone(),
        employees: company.employees.clone(),
        website: String::new(),
        last_funding: if company.last_funding.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            company.last_funding.clone()
        },
        market_cap: company.market_cap.clone(),
        last_valuation: company.last_valuation.clone(),
        funding_rounds: Vec::new(),
        investors: Vec::new(),
        leadership: Vec::new(),
        bids,
        offers,
        news: fallback.news_for(&company.slug),
        similar: fallback.similar_to(&company.slug, company.sector),
        data_source: DataSource::Fallback,
    }
}
