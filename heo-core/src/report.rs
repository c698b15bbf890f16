use crate::{indicator::Indicator, reading::IndicatorReading, region::Region};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Satellite programme a report's values are attributed to.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Modis,
    Landsat,
    Sentinel,
    Viirs,
    Other,
}

/// A single geolocated sample within a region.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SpatialSample {
    pub longitude: f64,
    pub latitude: f64,
    pub value: f64,
    pub confidence: f64,
    pub date: NaiveDate,
}

/// Indicator-specific figures that accompany the headline value.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorDetails {
    Ndvi {
        min_ndvi: f64,
        max_ndvi: f64,
        vegetation_coverage_percent: f64,
    },
    Glacier {
        ice_thickness_m: f64,
        retreat_rate_m_per_year: f64,
    },
    Urban {
        built_up_percentage: f64,
        population_estimate: u64,
        nightlight_intensity: f64,
    },
    Temperature {
        min_temperature_c: f64,
        max_temperature_c: f64,
        heat_island_effect: f64,
    },
    Glof {
        risk_level: crate::glof::RiskLevel,
        expansion_rate: f64,
    },
    Forest {
        deforestation_rate: f64,
        illegal_logging_hotspots: u32,
        community_forest_area: f64,
    },
    Landslide {
        high_risk_area_km2: f64,
        rainfall_correlation: f64,
    },
    Earthquake {
        scar_visibility_index: f64,
        vegetation_regrowth_rate: f64,
    },
}

/// Full answer for one (indicator, year, region): the headline reading plus
/// provenance, detail figures and spatial samples.
///
/// The reading fields are flattened so a report also decodes as a plain
/// [`IndicatorReading`].
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct IndicatorReport {
    #[serde(flatten)]
    pub reading: IndicatorReading,
    pub source: DataSource,
    /// True when NASA CMR confirmed granules exist for this year.
    #[serde(default)]
    pub live: bool,
    pub details: IndicatorDetails,
    #[serde(default)]
    pub data_points: Vec<SpatialSample>,
}

/// Every indicator for one year and region.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct EnvironmentalSummary {
    pub year: i32,
    pub region: Region,
    pub reports: Vec<IndicatorReport>,
}

impl EnvironmentalSummary {
    pub fn report(&self, indicator: Indicator) -> Option<&IndicatorReport> {
        self.reports.iter().find(|r| r.reading.indicator == indicator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::Trend;

    fn sample_report() -> IndicatorReport {
        IndicatorReport {
            reading: IndicatorReading::new(
                Indicator::Temperature,
                2012,
                Region::AnnapurnaRegion,
                16.8,
                Trend::Warming,
            ),
            source: DataSource::Modis,
            live: false,
            details: IndicatorDetails::Temperature {
                min_temperature_c: 11.8,
                max_temperature_c: 21.8,
                heat_island_effect: 0.5,
            },
            data_points: vec![SpatialSample {
                longitude: 83.9,
                latitude: 28.5,
                value: 16.2,
                confidence: 0.91,
                date: NaiveDate::from_ymd_opt(2012, 7, 14).unwrap(),
            }],
        }
    }

    #[test]
    fn test_report_decodes_as_reading() {
        let json = serde_json::to_string(&sample_report()).unwrap();
        let reading: IndicatorReading = serde_json::from_str(&json).unwrap();
        assert_eq!(reading.indicator, Indicator::Temperature);
        assert_eq!(reading.value, 16.8);
        assert_eq!(reading.unit, "°C");
    }

    #[test]
    fn test_report_json_layout() {
        let json = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(json["year"], 2012);
        assert_eq!(json["source"], "modis");
        assert_eq!(json["details"]["temperature"]["heat_island_effect"], 0.5);
        assert_eq!(json["data_points"][0]["date"], "2012-07-14");
    }

    #[test]
    fn test_summary_lookup() {
        let summary = EnvironmentalSummary {
            year: 2012,
            region: Region::AnnapurnaRegion,
            reports: vec![sample_report()],
        };
        assert!(summary.report(Indicator::Temperature).is_some());
        assert!(summary.report(Indicator::Ndvi).is_none());
    }
}
