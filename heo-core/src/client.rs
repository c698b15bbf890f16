//! HTTP client for the indicator service.
//!
//! Every call is a single GET with no retry, timeout or backoff; failures are
//! returned as [`FetchError`] for the caller to degrade or report.

use crate::{
    comparison::ComparisonResult,
    error::FetchError,
    export::ExportFormat,
    glof::GlofLake,
    indicator::Indicator,
    reading::IndicatorReading,
    region::Region,
    report::{EnvironmentalSummary, IndicatorReport},
    source::IndicatorSource,
    story::StoryRecord,
};
use log::{debug, warn};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// Default base URL of a locally running service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const ENVIRONMENTAL_PREFIX: &str = "api/environmental";

/// Client for the indicator REST service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response, FetchError> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, query);
        let response = self.http.get(&url).query(query).send().await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            FetchError::from(e)
        })?;
        if !response.status().is_success() {
            warn!("Bad response status for {}: {}", url, response.status());
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url,
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let body = self.get(path, query).await?.text().await?;
        if body.trim().is_empty() {
            return Err(FetchError::Empty);
        }
        serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Full report for one indicator, year and region.
    pub async fn report(
        &self,
        indicator: Indicator,
        year: i32,
        region: Region,
    ) -> Result<IndicatorReport, FetchError> {
        self.get_json(
            &format!("{ENVIRONMENTAL_PREFIX}/readings/{indicator}/{year}"),
            &[("region", region.to_string())],
        )
        .await
    }

    /// Every indicator for one year and region.
    pub async fn summary(&self, year: i32, region: Region) -> Result<EnvironmentalSummary, FetchError> {
        self.get_json(
            &format!("{ENVIRONMENTAL_PREFIX}/summary"),
            &[("year", year.to_string()), ("region", region.to_string())],
        )
        .await
    }

    /// All comparisons the service computes for the period, overall first.
    pub async fn comparisons(
        &self,
        indicator: Indicator,
        region: Region,
        baseline_year: i32,
        comparison_year: i32,
        include_intermediate: bool,
    ) -> Result<Vec<ComparisonResult>, FetchError> {
        self.get_json(
            &format!("{ENVIRONMENTAL_PREFIX}/compare/temporal"),
            &[
                ("indicator", indicator.to_string()),
                ("region", region.to_string()),
                ("start_year", baseline_year.to_string()),
                ("end_year", comparison_year.to_string()),
                ("include_intermediate", include_intermediate.to_string()),
            ],
        )
        .await
    }

    /// Download an export file; returns the raw bytes.
    pub async fn export(
        &self,
        indicator: Indicator,
        year: i32,
        region: Region,
        format: ExportFormat,
    ) -> Result<Vec<u8>, FetchError> {
        let response = self
            .get(
                &format!("{ENVIRONMENTAL_PREFIX}/export/{indicator}/{year}"),
                &[("region", region.to_string()), ("format", format.to_string())],
            )
            .await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(FetchError::Empty);
        }
        Ok(bytes.to_vec())
    }

    pub async fn stories(&self) -> Result<Vec<StoryRecord>, FetchError> {
        self.get_json("api/stories", &[]).await
    }

    pub async fn glof_lakes(&self) -> Result<Vec<GlofLake>, FetchError> {
        self.get_json("api/glof/lakes", &[]).await
    }
}

impl IndicatorSource for ApiClient {
    async fn reading(
        &self,
        indicator: Indicator,
        year: i32,
        region: Region,
    ) -> Result<IndicatorReading, FetchError> {
        let reading: IndicatorReading = self
            .get_json(
                &format!("{ENVIRONMENTAL_PREFIX}/readings/{indicator}/{year}"),
                &[("region", region.to_string())],
            )
            .await?;
        if reading.is_usable() {
            Ok(reading)
        } else {
            Err(FetchError::Empty)
        }
    }

    async fn trends(
        &self,
        indicator: Indicator,
        region: Region,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<IndicatorReading>, FetchError> {
        let mut readings: Vec<IndicatorReading> = self
            .get_json(
                &format!("{ENVIRONMENTAL_PREFIX}/trends/{indicator}"),
                &[
                    ("region", region.to_string()),
                    ("year_range", format!("{start_year}-{end_year}")),
                ],
            )
            .await?;
        readings.retain(IndicatorReading::is_usable);
        if readings.is_empty() {
            return Err(FetchError::Empty);
        }
        readings.sort_by_key(IndicatorReading::series_key);
        Ok(readings)
    }

    async fn comparison(
        &self,
        indicator: Indicator,
        region: Region,
        baseline_year: i32,
        comparison_year: i32,
    ) -> Result<ComparisonResult, FetchError> {
        self.comparisons(indicator, region, baseline_year, comparison_year, false)
            .await?
            .into_iter()
            .next()
            .ok_or(FetchError::Empty)
    }
}
