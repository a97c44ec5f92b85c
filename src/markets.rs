use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::format::format_thousands;
use crate::models::{Company, DataSource, PaginatedResponse};
use crate::transform::{transform_page, SparklineSource};

/// Rows per page on the upstream listing.
pub const PAGE_SIZE: u32 = 24;
const WINDOW: u32 = 5;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub pages: Vec<u32>,
    pub current: u32,
    pub total_pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
    pub show_ellipsis: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MarketsView {
    pub companies: Vec<Company>,
    pub active_category: Option<Category>,
    pub search: String,
    pub total: u64,
    pub range_label: String,
    pub pagination: PageWindow,
    pub data_source: DataSource,
}

/// Case-insensitive match on name or ticker. Blank search keeps everything.
pub fn filter_companies(companies: Vec<Company>, search: &str) -> Vec<Company> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return companies;
    }
    companies
        .into_iter()
        .filter(|c| c.name.to_lowercase().contains(&needle) || c.ticker.to_lowercase().contains(&needle))
        .collect()
}

/// Up to five page links around `page`, shifted so the window never runs past
/// either end.
pub fn page_window(page: u32, total_pages: u32) -> PageWindow {
    let total_pages = total_pages.max(1);
    let page = page.clamp(1, total_pages);

    let pages = if total_pages <= WINDOW {
        (1..=total_pages).collect()
    } else {
        let start = page.saturating_sub(2).max(1).min(total_pages - WINDOW + 1);
        (start..=start + (WINDOW - 1)).collect()
    };

    PageWindow {
        pages,
        current: page,
        total_pages,
        has_previous: page > 1,
        has_next: page < total_pages,
        show_ellipsis: total_pages > WINDOW && page.saturating_add(2) < total_pages,
    }
}

/// `"25-48 of 5,237"` for page 2 of 5237 items.
pub fn range_label(page: u32, total: u64) -> String {
    if total == 0 {
        return "0-0 of 0".to_string();
    }
    let page = page.max(1) as u64;
    let start = ((page - 1) * PAGE_SIZE as u64 + 1).min(total);
    let end = (page * PAGE_SIZE as u64).min(total);
    format!("{}-{} of {}", format_thousands(start), format_thousands(end), format_thousands(total))
}

pub fn build_markets_view(
    response: &PaginatedResponse,
    search: &str,
    active_category: Option<Category>,
    sparklines: &dyn SparklineSource,
) -> MarketsView {
    let companies = filter_companies(transform_page(&response.items, sparklines), search);

    MarketsView {
        companies,
        active_category,
        search: search.to_string(),
        total: response.total,
        range_label: range_label(response.page, response.total),
        pagination: page_window(response.page, response.pages),
        data_source: DataSource::Api,
    }
}

/// Markets view over already-normalized companies (the fallback dataset),
/// filtered by category then paginated locally.
pub fn build_local_markets_view(
    companies: Vec<Company>,
    page: u32,
    search: &str,
    active_category: Option<Category>,
) -> MarketsView {
    let in_category: Vec<Company> = companies
        .into_iter()
        .filter(|c| active_category.map_or(true, |cat| c.sector == cat))
        .collect();

    let total = in_category.len() as u64;
    let total_pages = (total.div_ceil(PAGE_SIZE as u64) as u32).max(1);
    let page = page.clamp(1, total_pages);
    let skip = ((page - 1) * PAGE_SIZE) as usize;

    let page_items: Vec<Company> = in_category.into_iter().skip(skip).take(PAGE_SIZE as usize).collect();

    MarketsView {
        companies: filter_companies(page_items, search),
        active_category,
        search: search.to_string(),
        total,
        range_label: range_label(page, total),
        pagination: page_window(page, total_pages),
        data_source: DataSource::Fallback,
    }
}
