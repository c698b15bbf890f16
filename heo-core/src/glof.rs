use crate::indicator::UnknownKey;
use crate::reading::Trend;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Embedded CSV registry of monitored glacial lakes.
pub static GLOF_LAKES_CSV: &str = include_str!("../../fixtures/glof_lakes.csv");

/// Outburst-flood risk classification, ordered from least to most severe.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    /// Trend reported for a lake at this risk level.
    pub fn trend(&self) -> Trend {
        match self {
            RiskLevel::Low | RiskLevel::Medium => Trend::Stable,
            RiskLevel::High | RiskLevel::Critical => Trend::Increasing,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

impl FromStr for RiskLevel {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        RiskLevel::ALL
            .into_iter()
            .find(|r| r.key() == lowered)
            .ok_or_else(|| UnknownKey {
                kind: "risk level",
                value: s.to_string(),
            })
    }
}

/// A glacial lake tracked for Glacial Lake Outburst Flood risk.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct GlofLake {
    pub name: String,
    pub district: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    pub elevation_m: i32,
    pub risk_level: RiskLevel,
    pub area_km2: f64,
    /// Annual growth of the lake surface in km²
    pub expansion_rate_km2_per_year: f64,
}

impl GlofLake {
    /// Parse a CSV string of lake data into a vector of GlofLakes.
    ///
    /// Expected CSV columns: name, district, latitude, longitude, elevation_m,
    /// risk_level, area_km2, expansion_rate_km2_per_year
    pub fn parse_glof_lake_csv(csv_object: &str) -> Result<Vec<GlofLake>, csv::Error> {
        ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_object.as_bytes())
            .deserialize()
            .collect()
    }

    /// Get the bundled lake registry.
    pub fn get_glof_lake_vector() -> Result<Vec<GlofLake>, csv::Error> {
        GlofLake::parse_glof_lake_csv(GLOF_LAKES_CSV)
    }

    /// Projected lake area `years` from the registry snapshot, assuming
    /// the current linear expansion rate holds.
    pub fn projected_area(&self, years: i32) -> f64 {
        (self.area_km2 + self.expansion_rate_km2_per_year * f64::from(years)).max(0.0)
    }
}

/// Lakes at or above `min_risk`, most dangerous first.
pub fn lakes_at_risk(lakes: &[GlofLake], min_risk: RiskLevel) -> Vec<GlofLake> {
    let mut selected: Vec<GlofLake> = lakes
        .iter()
        .filter(|lake| lake.risk_level >= min_risk)
        .cloned()
        .collect();
    selected.sort_by(|a, b| {
        b.risk_level
            .cmp(&a.risk_level)
            .then(b.area_km2.total_cmp(&a.area_km2))
    });
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glof_lake_vector() {
        let lakes = GlofLake::get_glof_lake_vector().unwrap();
        assert_eq!(lakes.len(), 8);
        let imja = lakes.iter().find(|l| l.name == "Imja Tsho").unwrap();
        assert_eq!(imja.risk_level, RiskLevel::High);
        assert_eq!(imja.elevation_m, 5010);
    }

    #[test]
    fn test_lakes_at_risk_ordering() {
        let lakes = GlofLake::get_glof_lake_vector().unwrap();
        let risky = lakes_at_risk(&lakes, RiskLevel::High);
        assert_eq!(risky.len(), 4);
        assert_eq!(risky[0].name, "Tsho Rolpa");
        // among the high-risk lakes the largest comes first
        assert_eq!(risky[1].name, "Lower Barun");
        assert!(risky.iter().all(|l| l.risk_level >= RiskLevel::High));
    }

    #[test]
    fn test_projected_area() {
        let lake = GlofLake {
            name: "Test".into(),
            district: "Test".into(),
            latitude: 27.9,
            longitude: 86.9,
            elevation_m: 5000,
            risk_level: RiskLevel::Low,
            area_km2: 1.0,
            expansion_rate_km2_per_year: 0.05,
        };
        assert!((lake.projected_area(10) - 1.5).abs() < 1e-12);
        assert_eq!(lake.projected_area(-100), 0.0);
    }

    #[test]
    fn test_risk_level_from_str() {
        assert_eq!("High".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert_eq!(RiskLevel::Critical.to_string(), "critical");
        assert!("extreme".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_risk_level_trend() {
        assert_eq!(RiskLevel::Medium.trend(), Trend::Stable);
        assert_eq!(RiskLevel::High.trend(), Trend::Increasing);
        assert_eq!(RiskLevel::Critical.trend(), Trend::Increasing);
    }

    #[test]
    fn test_bad_risk_level_is_an_error() {
        let csv = "name,district,latitude,longitude,elevation_m,risk_level,area_km2,expansion_rate_km2_per_year\nX,Y,27.0,86.0,4000,extreme,1.0,0.1\n";
        assert!(GlofLake::parse_glof_lake_csv(csv).is_err());
    }
}
