//! Dashboard state shared by the chart, map and comparison views.
//!
//! Each indicator owns a slot. Responses update only their own slot and
//! arrive in whatever order the fetches finish; a later response simply
//! overwrites an earlier one.

use heo_core::{ComparisonResult, FetchError, Indicator, IndicatorReading, Region};
use heo_utils::years::YearBounds;
use log::{debug, warn};
use std::collections::BTreeMap;

/// Latest data for one indicator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSlot {
    /// Last successful reading for the selected year.
    pub reading: Option<IndicatorReading>,
    /// Last successful trend series, oldest first.
    pub trend: Vec<IndicatorReading>,
    pub loading: bool,
    /// Short message shown next to stale data after a failed fetch.
    pub message: Option<&'static str>,
}

/// State for the whole dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub region: Region,
    pub year: i32,
    bounds: YearBounds,
    slots: BTreeMap<Indicator, IndicatorSlot>,
    baseline_year: i32,
    current_year: i32,
    comparison: Option<ComparisonResult>,
}

impl Default for DashboardState {
    fn default() -> Self {
        let bounds = YearBounds::default();
        Self {
            region: Region::default(),
            year: bounds.max,
            bounds,
            slots: Indicator::ALL
                .iter()
                .map(|indicator| (*indicator, IndicatorSlot::default()))
                .collect(),
            baseline_year: bounds.min,
            current_year: bounds.max,
            comparison: None,
        }
    }
}

impl DashboardState {
    pub fn slot(&self, indicator: Indicator) -> &IndicatorSlot {
        // every indicator gets a slot in Default
        &self.slots[&indicator]
    }

    fn slot_mut(&mut self, indicator: Indicator) -> &mut IndicatorSlot {
        self.slots.entry(indicator).or_default()
    }

    /// Move the time slider; the year is clamped to the data range.
    pub fn select_year(&mut self, year: i32) {
        self.year = self.bounds.clamp(year);
    }

    pub fn select_region(&mut self, region: Region) {
        self.region = region;
    }

    /// Mark a fetch for `indicator` as in flight.
    pub fn begin_fetch(&mut self, indicator: Indicator) {
        self.slot_mut(indicator).loading = true;
    }

    /// Apply the outcome of a reading fetch.
    ///
    /// Failures keep the previous reading and set a short message.
    pub fn apply_reading(&mut self, indicator: Indicator, result: Result<IndicatorReading, FetchError>) {
        let slot = self.slot_mut(indicator);
        slot.loading = false;
        match result {
            Ok(reading) => {
                debug!("{} reading updated: {}", indicator, reading.value);
                slot.reading = Some(reading);
                slot.message = None;
            }
            Err(e) => {
                warn!("{} reading failed: {}", indicator, e);
                slot.message = Some(e.user_message());
            }
        }
    }

    /// Apply the outcome of a trend fetch, with the same failure policy as
    /// [`DashboardState::apply_reading`].
    pub fn apply_trend(&mut self, indicator: Indicator, result: Result<Vec<IndicatorReading>, FetchError>) {
        let slot = self.slot_mut(indicator);
        slot.loading = false;
        match result {
            Ok(trend) if !trend.is_empty() => {
                slot.trend = trend;
                slot.message = None;
            }
            Ok(_) => slot.message = Some(FetchError::Empty.user_message()),
            Err(e) => {
                warn!("{} trend failed: {}", indicator, e);
                slot.message = Some(e.user_message());
            }
        }
    }

    pub fn comparison_years(&self) -> (i32, i32) {
        (self.baseline_year, self.current_year)
    }

    /// Change the comparison tool's years.
    ///
    /// Returns whether a comparison should be fetched, which is only when
    /// `current_year` is after `baseline_year`. The previous result is
    /// cleared either way.
    pub fn set_comparison_years(&mut self, baseline_year: i32, current_year: i32) -> bool {
        self.comparison = None;
        self.baseline_year = self.bounds.clamp(baseline_year);
        self.current_year = self.bounds.clamp(current_year);
        self.current_year > self.baseline_year
    }

    pub fn apply_comparison(&mut self, result: Option<ComparisonResult>) {
        self.comparison = result;
    }

    pub fn comparison(&self) -> Option<&ComparisonResult> {
        self.comparison.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heo_core::Trend;

    fn reading(value: f64) -> IndicatorReading {
        IndicatorReading::new(Indicator::Ndvi, 2020, Region::default(), value, Trend::Stable)
    }

    #[test]
    fn test_failed_fetch_keeps_previous_data() {
        let mut state = DashboardState::default();
        state.begin_fetch(Indicator::Ndvi);
        assert!(state.slot(Indicator::Ndvi).loading);
        state.apply_reading(Indicator::Ndvi, Ok(reading(0.61)));

        state.begin_fetch(Indicator::Ndvi);
        state.apply_reading(Indicator::Ndvi, Err(FetchError::Network("refused".into())));

        let slot = state.slot(Indicator::Ndvi);
        assert!(!slot.loading);
        assert_eq!(slot.reading.as_ref().unwrap().value, 0.61);
        assert_eq!(slot.message, Some("Could not reach the data service"));
    }

    #[test]
    fn test_success_clears_message() {
        let mut state = DashboardState::default();
        state.apply_trend(Indicator::Ndvi, Ok(Vec::new()));
        assert!(state.slot(Indicator::Ndvi).message.is_some());
        state.apply_trend(Indicator::Ndvi, Ok(vec![reading(0.5)]));
        assert!(state.slot(Indicator::Ndvi).message.is_none());
        assert_eq!(state.slot(Indicator::Ndvi).trend.len(), 1);
    }

    #[test]
    fn test_slots_are_independent() {
        let mut state = DashboardState::default();
        state.apply_reading(Indicator::Ndvi, Ok(reading(0.5)));
        state.apply_reading(Indicator::Urban, Err(FetchError::Empty));
        assert!(state.slot(Indicator::Ndvi).message.is_none());
        assert!(state.slot(Indicator::Urban).reading.is_none());
    }

    #[test]
    fn test_invalid_comparison_years_clear_result() {
        let mut state = DashboardState::default();
        assert!(state.set_comparison_years(2005, 2020));
        state.apply_comparison(ComparisonResult::between(
            Indicator::Ndvi,
            Region::default(),
            2005,
            2020,
            0.48,
            0.61,
        ));
        assert!(state.comparison().is_some());

        assert!(!state.set_comparison_years(2020, 2020));
        assert!(state.comparison().is_none());
    }

    #[test]
    fn test_new_comparison_years_drop_stale_result() {
        let mut state = DashboardState::default();
        assert!(state.set_comparison_years(2005, 2020));
        state.apply_comparison(ComparisonResult::between(
            Indicator::Glacier,
            Region::default(),
            2005,
            2020,
            2500.0,
            2300.0,
        ));
        assert!(state.comparison().is_some());

        // a valid pair still waits for its own fetch
        assert!(state.set_comparison_years(2000, 2025));
        assert!(state.comparison().is_none());
        assert_eq!(state.comparison_years(), (2000, 2025));
    }

    #[test]
    fn test_years_are_clamped() {
        let mut state = DashboardState::default();
        state.select_year(1990);
        assert_eq!(state.year, 2000);
        state.set_comparison_years(1990, 2040);
        assert_eq!(state.comparison_years(), (2000, 2025));
    }
}
