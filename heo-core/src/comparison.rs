use crate::{indicator::Indicator, region::Region};
use serde::{Deserialize, Serialize};

/// Change in an indicator between a baseline year and a later comparison year.
///
/// Always derived, never stored. `baseline_year < comparison_year` holds for
/// every value built through [`ComparisonResult::between`].
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub indicator: Indicator,
    pub region: Region,
    pub baseline_year: i32,
    pub comparison_year: i32,
    pub baseline_value: f64,
    pub comparison_value: f64,
    pub change_amount: f64,
    pub change_percentage: f64,
    pub summary: String,
    #[serde(default)]
    pub impact_assessment: String,
}

/// Absolute and percentage change from `baseline` to `current`.
///
/// A zero baseline yields a percentage of 0 rather than a division error.
pub fn change_between(baseline: f64, current: f64) -> (f64, f64) {
    let change_amount = current - baseline;
    let change_percentage = if baseline != 0.0 {
        change_amount / baseline * 100.0
    } else {
        0.0
    };
    (change_amount, change_percentage)
}

/// Round to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Human-readable sentence describing what changed over the period.
pub fn trend_summary(indicator: Indicator, region: Region, start_year: i32, end_year: i32) -> String {
    let years = end_year - start_year;
    let place = region.label();
    match indicator {
        Indicator::Ndvi => format!("Vegetation health changed over {years} years in {place}"),
        Indicator::Glacier => {
            format!("Glacier coverage retreated significantly over {years} years in {place}")
        }
        Indicator::Urban => format!("Urban areas expanded dramatically over {years} years in {place}"),
        Indicator::Temperature => {
            format!("Temperatures warmed consistently over {years} years in {place}")
        }
        _ => "Environmental changes observed over time".to_string(),
    }
}

impl ComparisonResult {
    /// Build a comparison from two headline values.
    ///
    /// Returns `None` unless `baseline_year < comparison_year`.
    pub fn between(
        indicator: Indicator,
        region: Region,
        baseline_year: i32,
        comparison_year: i32,
        baseline_value: f64,
        comparison_value: f64,
    ) -> Option<Self> {
        if comparison_year <= baseline_year {
            return None;
        }
        let (change_amount, change_percentage) = change_between(baseline_value, comparison_value);
        Some(Self {
            indicator,
            region,
            baseline_year,
            comparison_year,
            baseline_value: round_to(baseline_value, 3),
            comparison_value: round_to(comparison_value, 3),
            change_amount: round_to(change_amount, 3),
            change_percentage: round_to(change_percentage, 2),
            summary: trend_summary(indicator, region, baseline_year, comparison_year),
            impact_assessment: format!(
                "The {} indicator shows significant change over {} years",
                indicator,
                comparison_year - baseline_year
            ),
        })
    }

    pub fn years_spanned(&self) -> i32 {
        self.comparison_year - self.baseline_year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_baseline_has_zero_percentage() {
        let (amount, pct) = change_between(0.0, 12.5);
        assert_eq!(amount, 12.5);
        assert_eq!(pct, 0.0);
    }

    #[test]
    fn test_ndvi_change() {
        let result =
            ComparisonResult::between(Indicator::Ndvi, Region::default(), 2000, 2020, 0.48, 0.61)
                .unwrap();
        assert_eq!(result.change_amount, 0.13);
        assert!((result.change_percentage - 27.08).abs() < 1e-9);
        assert_eq!(result.years_spanned(), 20);
        assert_eq!(
            result.summary,
            "Vegetation health changed over 20 years in Nepal Himalayas"
        );
    }

    #[test]
    fn test_no_result_unless_years_increase() {
        assert!(ComparisonResult::between(Indicator::Urban, Region::default(), 2010, 2010, 1.0, 2.0)
            .is_none());
        assert!(ComparisonResult::between(Indicator::Urban, Region::default(), 2015, 2005, 1.0, 2.0)
            .is_none());
    }

    #[test]
    fn test_negative_change() {
        let result = ComparisonResult::between(
            Indicator::Glacier,
            Region::EverestRegion,
            2000,
            2025,
            2700.0,
            1890.0,
        )
        .unwrap();
        assert_eq!(result.change_amount, -810.0);
        assert_eq!(result.change_percentage, -30.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(27.083333, 2), 27.08);
        assert_eq!(round_to(0.13000000000000006, 3), 0.13);
    }
}
