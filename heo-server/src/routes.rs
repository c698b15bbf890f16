//! Request handlers.

use crate::error::ApiError;
use crate::nasa::{GibsLayer, NasaStatus, DEFAULT_LAYER};
use crate::AppState;
use anyhow::Context;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use heo_core::{
    export::ExportFormat,
    glof::{lakes_at_risk, GlofLake, RiskLevel},
    indicator::IndicatorInfo,
    region::RegionInfo,
    report::{EnvironmentalSummary, IndicatorReport},
    story::StoryRecord,
    ComparisonResult, Indicator, IndicatorReading, Region,
};
use heo_data::{export, trends::step_comparisons};
use heo_utils::years::parse_year_range;
use log::debug;
use serde::{Deserialize, Serialize};

fn region_param(region: Option<&str>) -> Result<Region, ApiError> {
    Ok(region.map(str::parse::<Region>).transpose()?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
pub struct RegionQuery {
    region: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    year: i32,
    region: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    indicator: String,
    region: Option<String>,
    start_year: Option<i32>,
    end_year: Option<i32>,
    #[serde(default)]
    include_intermediate: bool,
}

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    region: Option<String>,
    year_range: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    region: Option<String>,
    format: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LakeQuery {
    min_risk: Option<RiskLevel>,
}

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    layer: Option<String>,
    region: Option<String>,
    #[serde(default = "default_image_year")]
    year: i32,
    #[serde(default = "default_image_month")]
    month: u32,
    #[serde(default = "default_image_day")]
    day: u32,
    #[serde(default = "default_image_width")]
    width: u32,
    #[serde(default = "default_image_height")]
    height: u32,
}

fn default_image_year() -> i32 {
    2020
}

fn default_image_month() -> u32 {
    6
}

fn default_image_day() -> u32 {
    15
}

fn default_image_width() -> u32 {
    600
}

fn default_image_height() -> u32 {
    400
}

#[derive(Debug, Serialize)]
pub struct Catalog {
    indicators: Vec<IndicatorInfo>,
    regions: Vec<RegionInfo>,
}

#[derive(Debug, Serialize)]
pub struct ImageUrl {
    url: String,
}

pub async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

/// Simulated report, confirmed against CMR when live data is enabled.
async fn build_report(
    state: &AppState,
    indicator: Indicator,
    year: i32,
    region: Region,
) -> IndicatorReport {
    state.simulate_latency().await;
    let mut report = state.simulator.report(indicator, region, year);
    state.nasa.confirm_live(&mut report).await;
    report
}

pub async fn reading(
    State(state): State<AppState>,
    Path((indicator, year)): Path<(String, i32)>,
    Query(query): Query<RegionQuery>,
) -> Result<Json<IndicatorReport>, ApiError> {
    let indicator: Indicator = indicator.parse()?;
    let year = state.bounds.check(year)?;
    let region = region_param(query.region.as_deref())?;
    Ok(Json(build_report(&state, indicator, year, region).await))
}

pub async fn summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<EnvironmentalSummary>, ApiError> {
    let year = state.bounds.check(query.year)?;
    let region = region_param(query.region.as_deref())?;
    state.simulate_latency().await;
    Ok(Json(state.simulator.summary(region, year)))
}

pub async fn compare_temporal(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<Vec<ComparisonResult>>, ApiError> {
    let indicator: Indicator = query.indicator.parse()?;
    let region = region_param(query.region.as_deref())?;
    let start_year = state.bounds.check(query.start_year.unwrap_or(state.bounds.min))?;
    let end_year = state.bounds.check(query.end_year.unwrap_or(state.bounds.max))?;
    if start_year >= end_year {
        return Err(ApiError::BadRequest(
            "start_year must be less than end_year".to_string(),
        ));
    }
    state.simulate_latency().await;

    let baseline = state.simulator.headline(indicator, region, start_year);
    let current = state.simulator.headline(indicator, region, end_year);
    let overall = ComparisonResult::between(
        indicator,
        region,
        start_year,
        end_year,
        baseline.value,
        current.value,
    )
    .context("comparison years out of order")?;

    let mut results = vec![overall];
    if query.include_intermediate {
        let series = state
            .simulator
            .trend_series(indicator, region, start_year, end_year);
        results.extend(step_comparisons(&series));
    }
    debug!("{} comparisons for {} {}-{}", results.len(), indicator, start_year, end_year);
    Ok(Json(results))
}

pub async fn trends(
    State(state): State<AppState>,
    Path(indicator): Path<String>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<Vec<IndicatorReading>>, ApiError> {
    let indicator: Indicator = indicator.parse()?;
    let region = region_param(query.region.as_deref())?;
    let (start_year, end_year) = match query.year_range.as_deref() {
        Some(range) => parse_year_range(range, &state.bounds)?,
        None => (state.bounds.min, state.bounds.max),
    };
    state.simulate_latency().await;
    Ok(Json(
        state
            .simulator
            .trend_series(indicator, region, start_year, end_year),
    ))
}

pub async fn indicators() -> Json<Catalog> {
    Json(Catalog {
        indicators: Indicator::ALL.iter().map(Indicator::info).collect(),
        regions: Region::ALL.iter().map(Region::info).collect(),
    })
}

pub async fn export_report(
    State(state): State<AppState>,
    Path((indicator, year)): Path<(String, i32)>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let indicator: Indicator = indicator.parse()?;
    let year = state.bounds.check(year)?;
    let region = region_param(query.region.as_deref())?;
    let format: ExportFormat = query
        .format
        .as_deref()
        .map(str::parse::<ExportFormat>)
        .transpose()?
        .unwrap_or_default();

    let report = build_report(&state, indicator, year, region).await;
    let body = export::render(&report, format)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export::file_name(&report, format)
    );
    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

pub async fn stories(State(state): State<AppState>) -> Json<Vec<StoryRecord>> {
    Json(state.stories.as_ref().clone())
}

pub async fn glof_lakes(
    State(state): State<AppState>,
    Query(query): Query<LakeQuery>,
) -> Json<Vec<GlofLake>> {
    Json(lakes_at_risk(
        &state.lakes,
        query.min_risk.unwrap_or(RiskLevel::Low),
    ))
}

pub async fn nasa_status(State(state): State<AppState>) -> Json<NasaStatus> {
    Json(state.nasa.status())
}

pub async fn nasa_layers(State(state): State<AppState>) -> Json<Vec<GibsLayer>> {
    Json(state.nasa.layers())
}

impl ImageQuery {
    fn layer(&self) -> &str {
        self.layer.as_deref().unwrap_or(DEFAULT_LAYER)
    }

    fn date(&self) -> Result<NaiveDate, ApiError> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or_else(|| {
            ApiError::BadRequest(format!(
                "invalid date {}-{}-{}",
                self.year, self.month, self.day
            ))
        })
    }
}

pub async fn satellite_image_url(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> Result<Json<ImageUrl>, ApiError> {
    let region = region_param(query.region.as_deref())?;
    let url = state.nasa.image_url(
        query.layer(),
        query.date()?,
        region.bounds(),
        query.width,
        query.height,
    )?;
    Ok(Json(ImageUrl { url }))
}

/// GIBS imagery proxied through the service, always PNG.
pub async fn satellite_image(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> Result<Response, ApiError> {
    let region = region_param(query.region.as_deref())?;
    let date = query.date()?;
    let image = state
        .nasa
        .fetch_image(query.layer(), date, region.bounds(), query.width, query.height)
        .await
        .map_err(|e| ApiError::BadGateway(format!("satellite imagery unavailable: {e}")))?
        .ok_or_else(|| {
            ApiError::BadGateway(format!(
                "no {} image from GIBS for {}",
                query.layer(),
                date
            ))
        })?;
    Ok(([(header::CONTENT_TYPE, "image/png")], image).into_response())
}
