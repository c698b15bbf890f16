//! Deterministic synthetic indicator values for Nepal's Himalayan regions.
//!
//! Values follow published 2000-2025 trends (vegetation greening, glacier
//! retreat, urban growth, warming) scaled per region. Jitter is derived from
//! a hash of (indicator, region, year, salt), so the same query always yields
//! the same answer.

use chrono::NaiveDate;
use heo_core::{
    comparison::{round_to, ComparisonResult},
    glof::RiskLevel,
    report::{DataSource, EnvironmentalSummary, IndicatorDetails, IndicatorReport, SpatialSample},
    FetchError, Indicator, IndicatorReading, IndicatorSource, Region, Trend,
};
use heo_utils::years::{YearSteps, TREND_STEP};
use log::debug;

/// Reference year the trend models are anchored on.
pub const BASE_YEAR: i32 = 2000;

const NDVI_BASE: f64 = 0.65;
const NDVI_TREND_PER_YEAR: f64 = 0.002;
const NDVI_VARIATION: f64 = 0.05;

const GLACIER_INITIAL_AREA_KM2: f64 = 1800.0;
const GLACIER_RETREAT_KM2_PER_YEAR: f64 = 25.0;
const GLACIER_VARIATION_FRACTION: f64 = 0.15;

const URBAN_INITIAL_AREA_KM2: f64 = 120.0;
const URBAN_GROWTH_RATE: f64 = 0.025;
const URBAN_VARIATION_FRACTION: f64 = 0.20;
const URBAN_REFERENCE_AREA_KM2: f64 = 5000.0;
const URBAN_PEOPLE_PER_KM2: f64 = 1500.0;

const TEMPERATURE_BASE_C: f64 = 17.5;
const TEMPERATURE_WARMING_PER_YEAR: f64 = 0.08;
const TEMPERATURE_VARIATION_C: f64 = 1.5;

const GLOF_LAKE_AREA_KM2: f64 = 1.5;
const GLOF_EXPANSION_RATE: f64 = 0.02;

/// Year of the Gorkha earthquake.
const GORKHA_YEAR: i32 = 2015;

const DEFAULT_SEED: u64 = 0x4e45_5041_4c5f_454f;

/// Per-region multipliers applied to the Nepal-wide trend models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionFactors {
    pub ndvi: f64,
    pub glacier: f64,
    pub urban: f64,
    pub temperature: f64,
}

impl RegionFactors {
    pub fn for_region(region: Region) -> Self {
        let (ndvi, glacier, urban, temperature) = match region {
            Region::KathmanduValley => (0.8, 0.0, 2.5, 1.2),
            Region::NepalHimalayas => (1.0, 1.0, 1.0, 1.0),
            Region::AnnapurnaRegion => (1.1, 1.2, 0.8, 0.9),
            Region::EverestRegion => (0.9, 1.5, 0.5, 0.8),
        };
        Self {
            ndvi,
            glacier,
            urban,
            temperature,
        }
    }
}

/// Generates synthetic indicator reports.
#[derive(Debug, Clone, Copy)]
pub struct Simulator {
    seed: u64,
}

impl Default for Simulator {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED }
    }
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

impl Simulator {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// Jitter in `[-1, 1)`, stable for a given key.
    fn noise(&self, indicator: Indicator, region: Region, year: i32, salt: u64) -> f64 {
        let key = [
            indicator.ordinal(),
            region.ordinal(),
            i64::from(year) as u64,
            salt,
        ];
        let hash = key.iter().fold(self.seed, |h, part| splitmix64(h ^ part));
        (hash >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0
    }

    /// Jitter in `[0, 1)`, stable for a given key.
    fn unit(&self, indicator: Indicator, region: Region, year: i32, salt: u64) -> f64 {
        (self.noise(indicator, region, year, salt) + 1.0) / 2.0
    }

    /// Full report for one indicator, region and year.
    pub fn report(&self, indicator: Indicator, region: Region, year: i32) -> IndicatorReport {
        debug!("simulating {} for {} in {}", indicator, region, year);
        match indicator {
            Indicator::Ndvi => self.ndvi(region, year),
            Indicator::Glacier => self.glacier(region, year),
            Indicator::Urban => self.urban(region, year),
            Indicator::Temperature => self.temperature(region, year),
            Indicator::Glof => self.glof(region, year),
            Indicator::Forest => self.forest(region, year),
            Indicator::Landslide => self.landslide(region, year),
            Indicator::Earthquake => self.earthquake(region, year),
        }
    }

    /// Headline reading only.
    pub fn headline(&self, indicator: Indicator, region: Region, year: i32) -> IndicatorReading {
        self.report(indicator, region, year).reading
    }

    /// Readings sampled every [`TREND_STEP`] years from `start_year`, always
    /// including `end_year`, oldest first.
    pub fn trend_series(
        &self,
        indicator: Indicator,
        region: Region,
        start_year: i32,
        end_year: i32,
    ) -> Vec<IndicatorReading> {
        YearSteps::new(start_year, end_year, TREND_STEP)
            .map(|year| self.headline(indicator, region, year))
            .collect()
    }

    /// Every indicator for one year and region.
    pub fn summary(&self, region: Region, year: i32) -> EnvironmentalSummary {
        EnvironmentalSummary {
            year,
            region,
            reports: Indicator::ALL
                .iter()
                .map(|indicator| self.report(*indicator, region, year))
                .collect(),
        }
    }

    fn ndvi(&self, region: Region, year: i32) -> IndicatorReport {
        let indicator = Indicator::Ndvi;
        let dy = f64::from(year - BASE_YEAR);
        let factor = RegionFactors::for_region(region).ndvi;
        let base = (NDVI_BASE + NDVI_TREND_PER_YEAR * dy) * factor;
        let average = (base + NDVI_VARIATION * self.noise(indicator, region, year, 1)).clamp(0.0, 1.0);
        let coverage =
            (average * 85.0 + 7.5 * self.noise(indicator, region, year, 2) + 2.5).clamp(0.0, 100.0);
        let trend = if average > 0.6 {
            Trend::Increasing
        } else {
            Trend::Stable
        };
        IndicatorReport {
            reading: IndicatorReading::new(indicator, year, region, round_to(average, 3), trend),
            source: DataSource::Modis,
            live: false,
            details: IndicatorDetails::Ndvi {
                min_ndvi: round_to((average - NDVI_VARIATION).max(0.0), 3),
                max_ndvi: round_to((average + NDVI_VARIATION).min(1.0), 3),
                vegetation_coverage_percent: round_to(coverage, 1),
            },
            data_points: self.samples(indicator, region, year, average, NDVI_VARIATION),
        }
    }

    fn glacier(&self, region: Region, year: i32) -> IndicatorReport {
        let indicator = Indicator::Glacier;
        let dy = f64::from(year - BASE_YEAR);
        let factor = RegionFactors::for_region(region).glacier;
        let retreat_factor = 1.0 + dy * 0.01;
        let total_retreat = GLACIER_RETREAT_KM2_PER_YEAR * dy * retreat_factor;
        let mut area = (GLACIER_INITIAL_AREA_KM2 - total_retreat).max(0.0) * factor;
        area += area * GLACIER_VARIATION_FRACTION * self.noise(indicator, region, year, 1);
        IndicatorReport {
            reading: IndicatorReading::new(indicator, year, region, round_to(area, 1), Trend::Decreasing),
            source: DataSource::Sentinel,
            live: false,
            details: IndicatorDetails::Glacier {
                ice_thickness_m: round_to((150.0 - dy * 2.0).max(0.0), 1),
                retreat_rate_m_per_year: round_to(GLACIER_RETREAT_KM2_PER_YEAR * retreat_factor, 1),
            },
            data_points: self.samples(indicator, region, year, 1.0, 0.2),
        }
    }

    fn urban(&self, region: Region, year: i32) -> IndicatorReport {
        let indicator = Indicator::Urban;
        let dy = year - BASE_YEAR;
        let factor = RegionFactors::for_region(region).urban;
        let base = URBAN_INITIAL_AREA_KM2 * (1.0 + URBAN_GROWTH_RATE).powi(dy) * factor;
        let area = base + base * URBAN_VARIATION_FRACTION * self.noise(indicator, region, year, 1);
        let built_up = (area / URBAN_REFERENCE_AREA_KM2 * 100.0).min(100.0);
        IndicatorReport {
            reading: IndicatorReading::new(indicator, year, region, round_to(area, 1), Trend::Expanding),
            source: DataSource::Landsat,
            live: false,
            details: IndicatorDetails::Urban {
                built_up_percentage: round_to(built_up, 1),
                population_estimate: (area * URBAN_PEOPLE_PER_KM2).max(0.0) as u64,
                nightlight_intensity: round_to((2.0 + f64::from(dy) * 0.2).min(10.0), 1),
            },
            data_points: self.samples(indicator, region, year, 1.0, 0.2),
        }
    }

    fn temperature(&self, region: Region, year: i32) -> IndicatorReport {
        let indicator = Indicator::Temperature;
        let dy = f64::from(year - BASE_YEAR);
        let factor = RegionFactors::for_region(region).temperature;
        let base = (TEMPERATURE_BASE_C + TEMPERATURE_WARMING_PER_YEAR * dy) * factor;
        let average = base + TEMPERATURE_VARIATION_C * self.noise(indicator, region, year, 1);
        IndicatorReport {
            reading: IndicatorReading::new(indicator, year, region, round_to(average, 1), Trend::Warming),
            source: DataSource::Modis,
            live: false,
            details: IndicatorDetails::Temperature {
                min_temperature_c: round_to(average - 5.0, 1),
                max_temperature_c: round_to(average + 5.0, 1),
                heat_island_effect: 0.5,
            },
            data_points: self.samples(indicator, region, year, average, TEMPERATURE_VARIATION_C),
        }
    }

    fn glof(&self, region: Region, year: i32) -> IndicatorReport {
        let area = GLOF_LAKE_AREA_KM2 * (1.0 + GLOF_EXPANSION_RATE).powi(year - BASE_YEAR);
        let risk_level = if year > GORKHA_YEAR {
            RiskLevel::High
        } else {
            RiskLevel::Medium
        };
        IndicatorReport {
            reading: IndicatorReading::new(
                Indicator::Glof,
                year,
                region,
                round_to(area, 3),
                risk_level.trend(),
            ),
            source: DataSource::Sentinel,
            live: false,
            details: IndicatorDetails::Glof {
                risk_level,
                expansion_rate: GLOF_EXPANSION_RATE,
            },
            data_points: Vec::new(),
        }
    }

    fn forest(&self, region: Region, year: i32) -> IndicatorReport {
        IndicatorReport {
            reading: IndicatorReading::new(Indicator::Forest, year, region, 5000.0, Trend::Stable),
            source: DataSource::Landsat,
            live: false,
            details: IndicatorDetails::Forest {
                deforestation_rate: 0.5,
                illegal_logging_hotspots: 2,
                community_forest_area: 1000.0,
            },
            data_points: Vec::new(),
        }
    }

    fn landslide(&self, region: Region, year: i32) -> IndicatorReport {
        IndicatorReport {
            reading: IndicatorReading::new(Indicator::Landslide, year, region, 0.4, Trend::Increasing),
            source: DataSource::Other,
            live: false,
            details: IndicatorDetails::Landslide {
                high_risk_area_km2: 50.0,
                rainfall_correlation: 0.8,
            },
            data_points: Vec::new(),
        }
    }

    fn earthquake(&self, region: Region, year: i32) -> IndicatorReport {
        let recovery = if year > GORKHA_YEAR { 80.0 } else { 100.0 };
        IndicatorReport {
            reading: IndicatorReading::new(Indicator::Earthquake, year, region, recovery, Trend::Recovering),
            source: DataSource::Modis,
            live: false,
            details: IndicatorDetails::Earthquake {
                scar_visibility_index: 0.2,
                vegetation_regrowth_rate: 0.5,
            },
            data_points: Vec::new(),
        }
    }

    /// 8 to 25 samples spread over the region's bounding box, dated in the
    /// June-September window of `year`.
    fn samples(
        &self,
        indicator: Indicator,
        region: Region,
        year: i32,
        base: f64,
        variation: f64,
    ) -> Vec<SpatialSample> {
        let bounds = region.bounds();
        let count = 8 + (self.unit(indicator, region, year, 100) * 18.0) as u64;
        (0..count)
            .filter_map(|i| {
                let salt = 1000 + i * 8;
                let u = |k: u64| self.unit(indicator, region, year, salt + k);
                let value = base + variation * self.noise(indicator, region, year, salt + 2);
                let value = match indicator {
                    Indicator::Ndvi => value.clamp(-1.0, 1.0),
                    Indicator::Temperature => value.clamp(-50.0, 50.0),
                    _ => value.max(0.0),
                };
                let month = 6 + (u(4) * 4.0) as u32;
                let day = 1 + (u(5) * 28.0) as u32;
                Some(SpatialSample {
                    longitude: bounds.min_lon + u(0) * (bounds.max_lon - bounds.min_lon),
                    latitude: bounds.min_lat + u(1) * (bounds.max_lat - bounds.min_lat),
                    value: round_to(value, 3),
                    confidence: round_to(0.75 + u(3) * 0.23, 2),
                    date: NaiveDate::from_ymd_opt(year, month, day)?,
                })
            })
            .collect()
    }
}

impl IndicatorSource for Simulator {
    async fn reading(
        &self,
        indicator: Indicator,
        year: i32,
        region: Region,
    ) -> Result<IndicatorReading, FetchError> {
        Ok(self.headline(indicator, region, year))
    }

    async fn trends(
        &self,
        indicator: Indicator,
        region: Region,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<IndicatorReading>, FetchError> {
        let series = self.trend_series(indicator, region, start_year, end_year);
        if series.is_empty() {
            Err(FetchError::Empty)
        } else {
            Ok(series)
        }
    }

    async fn comparison(
        &self,
        indicator: Indicator,
        region: Region,
        baseline_year: i32,
        comparison_year: i32,
    ) -> Result<ComparisonResult, FetchError> {
        let baseline = self.headline(indicator, region, baseline_year);
        let current = self.headline(indicator, region, comparison_year);
        ComparisonResult::between(
            indicator,
            region,
            baseline_year,
            comparison_year,
            baseline.value,
            current.value,
        )
        .ok_or(FetchError::Empty)
    }
}
