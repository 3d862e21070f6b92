//! HTTP client for the summary and country endpoints.

use covid_dashboard_core::model::{decode_series, decode_summary};
use covid_dashboard_core::{
    ApiConfig, CaseStatus, CountrySeries, DashboardError, DetailRequest, DetailSeries, Summary,
};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    api: ApiConfig,
}

impl ApiClient {
    pub fn new(api: ApiConfig, timeout: Duration) -> Result<Self, DashboardError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::transport(api.base_url(), e))?;

        Ok(Self { http, api })
    }

    pub const fn api(&self) -> &ApiConfig {
        &self.api
    }

    pub async fn fetch_summary(&self) -> Result<Summary, DashboardError> {
        let body = self.get_text(&self.api.summary_url()).await?;
        decode_summary(&body)
    }

    pub async fn fetch_series(
        &self,
        slug: &str,
        status: CaseStatus,
    ) -> Result<CountrySeries, DashboardError> {
        let body = self.get_text(&self.api.country_url(slug, status)).await?;
        decode_series(&body)
    }

    /// Fetches every series the request names; the first failure ends the request.
    pub async fn fetch_detail(&self, request: &DetailRequest) -> Result<DetailSeries, DashboardError> {
        let mut detail = DetailSeries::default();
        for status in &request.statuses {
            let series = self.fetch_series(&request.slug, *status).await?;
            detail.insert(*status, series);
        }
        Ok(detail)
    }

    async fn get_text(&self, url: &str) -> Result<String, DashboardError> {
        debug!(url, "GET");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| DashboardError::transport(url, describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| DashboardError::transport(url, describe(&e)))
    }
}

fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "timed out".to_string()
    } else if error.is_connect() {
        "could not connect".to_string()
    } else {
        error.to_string()
    }
}
