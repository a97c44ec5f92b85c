use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::category::Category;
use crate::models::{CompanyDetail, PaginatedResponse};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API Error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

/// Where company pages and detail records come from.
#[async_trait]
pub trait CompanySource: Send + Sync {
    async fn get_companies(
        &self,
        page: u32,
        sector: Option<Category>,
        valuation: Option<&str>,
    ) -> Result<PaginatedResponse, ApiError>;

    async fn get_company_detail(&self, slug: &str) -> Result<CompanyDetail, ApiError>;
}

pub struct ForgeApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ForgeApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        tracing::debug!("GET {}", url);

        let res = self
            .client
            .get(url.as_str())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|source| ApiError::Transport { url: url.clone(), source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| ApiError::Transport { url: url.clone(), source })?;

        if !status.is_success() {
            tracing::warn!("{} returned {}", url, status);
            return Err(ApiError::Status { status: status.as_u16(), body });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode { url, source })
    }
}

/// `{base}/data/forge?page=N&speed=fast[&sector=..][&valuation=..]`
pub fn companies_url(base_url: &str, page: u32, sector: Option<Category>, valuation: Option<&str>) -> String {
    let mut url = format!("{}/data/forge?page={}&speed=fast", base_url, page.max(1));
    if let Some(sector) = sector {
        url.push_str(&format!("&sector={}", urlencoding::encode(sector.label())));
    }
    if let Some(valuation) = valuation.filter(|v| !v.is_empty()) {
        url.push_str(&format!("&valuation={}", urlencoding::encode(valuation)));
    }
    url
}

pub fn company_detail_url(base_url: &str, slug: &str) -> String {
    format!("{}/data/company/{}", base_url, urlencoding::encode(slug))
}

#[async_trait]
impl CompanySource for ForgeApiClient {
    async fn get_companies(
        &self,
        page: u32,
        sector: Option<Category>,
        valuation: Option<&str>,
    ) -> Result<PaginatedResponse, ApiError> {
        self.fetch_json(companies_url(&self.base_url, page, sector, valuation)).await
    }

    async fn get_company_detail(&self, slug: &str) -> Result<CompanyDetail, ApiError> {
        self.fetch_json(company_detail_url(&self.base_url, slug)).await
    }
}
