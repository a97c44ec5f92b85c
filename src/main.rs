use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    routing::get,
    Json, Router,
};
use anyhow::Context;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, error};
use askama::Template;
use tower_http::trace::TraceLayer;

use private_markets_dashboard_rs::api_client::ForgeApiClient;
use private_markets_dashboard_rs::category::Category;
use private_markets_dashboard_rs::config::Config;
use private_markets_dashboard_rs::detail::DealView;
use private_markets_dashboard_rs::fallback::{FallbackSource, MockData, NoFallback};
use private_markets_dashboard_rs::format::{format_change_pct, format_price, sparkline_points};
use private_markets_dashboard_rs::markets::MarketsView;
use private_markets_dashboard_rs::models::{Company, DataSource, MarketStats};
use private_markets_dashboard_rs::portfolio::PortfolioSummary;
use private_markets_dashboard_rs::service::DashboardService;

struct CompanyRow {
    slug: String,
    name: String,
    ticker: String,
    sector: String,
    price: String,
    change: String,
    is_positive: bool,
    market_cap: String,
    amount_raised: String,
    sparkline: String,
    sparkline_synthetic: bool,
}

impl From<&Company> for CompanyRow {
    fn from(c: &Company) -> Self {
        CompanyRow {
            slug: c.slug.clone(),
            name: c.name.clone(),
            ticker: c.ticker.clone(),
            sector: c.sector.to_string(),
            price: format_price(c.price),
            change: format_change_pct(c.change_24h),
            is_positive: c.change_24h >= 0.0,
            market_cap: c.market_cap.clone(),
            amount_raised: c.amount_raised.clone(),
            sparkline: sparkline_points(&c.sparkline, 80.0, 24.0),
            sparkline_synthetic: c.sparkline_synthetic,
        }
    }
}

struct CategoryLink {
    label: String,
    href: String,
    active: bool,
}

struct PageLink {
    number: u32,
    href: String,
    active: bool,
}

#[derive(Template)]
#[template(path = "markets.html")]
struct MarketsTemplate {
    rows: Vec<CompanyRow>,
    categories: Vec<CategoryLink>,
    pages: Vec<PageLink>,
    prev_href: Option<String>,
    next_href: Option<String>,
    show_ellipsis: bool,
    search: String,
    range_label: String,
    from_fallback: bool,
    stats: MarketStats,
    portfolio: PortfolioSummary,
}

#[derive(Template)]
#[template(path = "deal.html")]
struct DealTemplate {
    deal: DealView,
    similar: Vec<CompanyRow>,
    from_fallback: bool,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    title: String,
    message: String,
}

struct AppState {
    service: DashboardService,
}

#[derive(Deserialize)]
struct MarketsQuery {
    page: Option<u32>,
    category: Option<String>,
    search: Option<String>,
}

impl MarketsQuery {
    fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// "All", empty, or an unknown label means no filter.
    fn category(&self) -> Option<Category> {
        self.category.as_deref().and_then(|c| c.parse().ok())
    }

    fn search(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

fn markets_href(page: u32, category: Option<Category>, search: &str) -> String {
    let mut href = format!("/markets?page={}", page);
    if let Some(c) = category {
        href.push_str(&format!("&category={}", urlencoding::encode(c.label())));
    }
    if !search.is_empty() {
        href.push_str(&format!("&search={}", urlencoding::encode(search)));
    }
    href
}

fn render<T: Template>(template: T, status: StatusCode) -> axum::response::Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Template error: {}", e)).into_response(),
    }
}

fn error_page(status: StatusCode, title: &str, message: String) -> axum::response::Response {
    render(ErrorTemplate { title: title.to_string(), message }, status)
}

async fn index_handler() -> impl IntoResponse {
    Redirect::to("/markets")
}

async fn markets_page_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketsQuery>,
) -> impl IntoResponse {
    let category = query.category();
    let view: MarketsView = match state.service.markets(query.page(), category, query.search()).await {
        Ok(v) => v,
        Err(e) => {
            error!("Error loading markets: {}", e);
            return error_page(StatusCode::BAD_GATEWAY, "Markets unavailable", e.to_string());
        }
    };

    let search = view.search.clone();
    let mut categories = vec![CategoryLink {
        label: "All".to_string(),
        href: markets_href(1, None, &search),
        active: category.is_none(),
    }];
    categories.extend(Category::ALL.iter().map(|c| CategoryLink {
        label: c.to_string(),
        href: markets_href(1, Some(*c), &search),
        active: category == Some(*c),
    }));

    let window = &view.pagination;
    let pages = window
        .pages
        .iter()
        .map(|&p| PageLink { number: p, href: markets_href(p, category, &search), active: p == window.current })
        .collect();

    let template = MarketsTemplate {
        rows: view.companies.iter().map(CompanyRow::from).collect(),
        categories,
        pages,
        prev_href: window.has_previous.then(|| markets_href(window.current - 1, category, &search)),
        next_href: window.has_next.then(|| markets_href(window.current + 1, category, &search)),
        show_ellipsis: window.show_ellipsis,
        search,
        range_label: view.range_label.clone(),
        from_fallback: view.data_source == DataSource::Fallback,
        stats: state.service.market_stats(),
        portfolio: state.service.portfolio(),
    };
    render(template, StatusCode::OK)
}

async fn deal_page_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    match state.service.deal(&slug).await {
        Ok(Some(deal)) => {
            let template = DealTemplate {
                similar: deal.similar.iter().map(CompanyRow::from).collect(),
                from_fallback: deal.data_source == DataSource::Fallback,
                deal,
            };
            render(template, StatusCode::OK)
        }
        Ok(None) => error_page(
            StatusCode::NOT_FOUND,
            "Company not found",
            format!("No company found for {}", slug),
        ),
        Err(e) => {
            error!("Error loading deal {}: {}", slug, e);
            error_page(StatusCode::BAD_GATEWAY, "Company unavailable", e.to_string())
        }
    }
}

async fn markets_api_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketsQuery>,
) -> impl IntoResponse {
    match state.service.markets(query.page(), query.category(), query.search()).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => {
            error!("Error loading markets: {}", e);
            (StatusCode::BAD_GATEWAY, Json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            }))).into_response()
        }
    }
}

async fn deal_api_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    match state.service.deal(&slug).await {
        Ok(Some(deal)) => Json(deal).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, Json(serde_json::json!({
            "success": false,
            "error": format!("No company found for {}", slug)
        }))).into_response(),
        Err(e) => {
            error!("Error loading deal {}: {}", slug, e);
            (StatusCode::BAD_GATEWAY, Json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            }))).into_response()
        }
    }
}

async fn portfolio_api_handler(
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    Json(state.service.portfolio())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    info!("Using data API at {} (fallback {})", config.api_url,
        if config.fallback_enabled { "enabled" } else { "disabled" });

    let client = ForgeApiClient::new(&config.api_url, config.http_timeout)
        .context("Failed to build HTTP client")?;
    let fallback: Arc<dyn FallbackSource> = if config.fallback_enabled {
        Arc::new(MockData)
    } else {
        Arc::new(NoFallback)
    };
    let service = DashboardService::new(Arc::new(client), fallback, config.fallback_enabled);
    let shared_state = Arc::new(AppState { service });

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/markets", get(markets_page_handler))
        .route("/deal/{slug}", get(deal_page_handler))
        .route("/api/markets", get(markets_api_handler))
        .route("/api/deal/{slug}", get(deal_api_handler))
        .route("/api/portfolio", get(portfolio_api_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
