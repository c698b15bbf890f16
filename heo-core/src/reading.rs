use crate::{indicator::Indicator, region::Region};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of change reported alongside a reading.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
    Warming,
    Cooling,
    Expanding,
    Contracting,
    Recovering,
    Variable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
            Trend::Warming => "warming",
            Trend::Cooling => "cooling",
            Trend::Expanding => "expanding",
            Trend::Contracting => "contracting",
            Trend::Recovering => "recovering",
            Trend::Variable => "variable",
        };
        f.write_str(s)
    }
}

/// A single headline value for an (indicator, year, region) tuple.
///
/// Produced fresh per request and owned by whoever asked for it.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct IndicatorReading {
    pub indicator: Indicator,
    pub year: i32,
    pub region: Region,
    pub value: f64,
    pub trend: Trend,
    pub unit: String,
}

impl IndicatorReading {
    pub fn new(indicator: Indicator, year: i32, region: Region, value: f64, trend: Trend) -> Self {
        Self {
            indicator,
            year,
            region,
            value,
            trend,
            unit: indicator.unit().to_string(),
        }
    }

    /// True when the reading is usable for charting and comparison.
    pub fn is_usable(&self) -> bool {
        self.value.is_finite()
    }

    /// Key for ordering a series chronologically, for use with
    /// `sort_by_key`. Readings sharing a key may still differ in value.
    pub fn series_key(&self) -> (i32, Indicator, Region) {
        (self.year, self.indicator, self.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_carries_indicator_unit() {
        let reading = IndicatorReading::new(
            Indicator::Glacier,
            2010,
            Region::EverestRegion,
            2430.5,
            Trend::Decreasing,
        );
        assert_eq!(reading.unit, "km²");
        assert!(reading.is_usable());
    }

    #[test]
    fn test_readings_sort_by_year() {
        let mut readings: Vec<IndicatorReading> = [2020, 2000, 2010]
            .into_iter()
            .map(|year| {
                IndicatorReading::new(Indicator::Ndvi, year, Region::default(), 0.6, Trend::Stable)
            })
            .collect();
        readings.sort_by_key(IndicatorReading::series_key);
        let years: Vec<i32> = readings.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2000, 2010, 2020]);
    }

    #[test]
    fn test_same_key_readings_are_not_equal() {
        let low = IndicatorReading::new(Indicator::Ndvi, 2010, Region::default(), 0.5, Trend::Stable);
        let high = IndicatorReading::new(Indicator::Ndvi, 2010, Region::default(), 0.7, Trend::Stable);
        assert_eq!(low.series_key(), high.series_key());
        assert_ne!(low, high);

        // the sort is stable, so equal keys keep their arrival order
        let mut readings = vec![
            high.clone(),
            IndicatorReading::new(Indicator::Ndvi, 2005, Region::default(), 0.4, Trend::Stable),
            low.clone(),
        ];
        readings.sort_by_key(IndicatorReading::series_key);
        assert_eq!(readings[0].year, 2005);
        assert_eq!(readings[1], high);
        assert_eq!(readings[2], low);
    }

    #[test]
    fn test_reading_json_shape() {
        let reading =
            IndicatorReading::new(Indicator::Ndvi, 2015, Region::KathmanduValley, 0.48, Trend::Stable);
        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["indicator"], "ndvi");
        assert_eq!(json["region"], "kathmandu_valley");
        assert_eq!(json["trend"], "stable");
        assert_eq!(json["unit"], "NDVI");
    }
}
