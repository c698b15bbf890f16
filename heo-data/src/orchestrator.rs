//! Fetch-and-compare coordination between a remote source and the local
//! simulator.
//!
//! Failures from the remote source are never surfaced here: each one is
//! logged and the simulator answers instead. There is no retry, timeout or
//! cancellation; overlapping calls resolve independently.

use crate::simulation::Simulator;
use heo_core::{
    ComparisonResult, FetchError, Indicator, IndicatorReading, IndicatorSource, Region,
};
use log::{debug, warn};

/// A value plus whether any part of it came from the local fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub value: T,
    pub degraded: bool,
}

impl<T> Fetched<T> {
    fn remote(value: T) -> Self {
        Self {
            value,
            degraded: false,
        }
    }

    fn fallback(value: T) -> Self {
        Self {
            value,
            degraded: true,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Coordinates the chart, map and comparison views' data needs.
#[derive(Debug, Clone)]
pub struct Orchestrator<S> {
    source: S,
    fallback: Simulator,
}

impl<S: IndicatorSource> Orchestrator<S> {
    pub fn new(source: S) -> Self {
        Self::with_fallback(source, Simulator::default())
    }

    pub fn with_fallback(source: S, fallback: Simulator) -> Self {
        Self { source, fallback }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Reading for one tuple, degrading to the simulator on any failure.
    pub async fn reading(
        &self,
        indicator: Indicator,
        year: i32,
        region: Region,
    ) -> Fetched<IndicatorReading> {
        match self.source.reading(indicator, year, region).await {
            Ok(reading) => Fetched::remote(reading),
            Err(e) => {
                warn!(
                    "{} reading for {} {} unavailable ({}), using simulated value",
                    indicator, region, year, e
                );
                Fetched::fallback(self.fallback.headline(indicator, region, year))
            }
        }
    }

    /// Trend series for a year range, degrading to the simulator on any failure.
    pub async fn trends(
        &self,
        indicator: Indicator,
        region: Region,
        start_year: i32,
        end_year: i32,
    ) -> Fetched<Vec<IndicatorReading>> {
        let failure = match self
            .source
            .trends(indicator, region, start_year, end_year)
            .await
        {
            Ok(series) if !series.is_empty() => return Fetched::remote(series),
            Ok(_) => FetchError::Empty,
            Err(e) => e,
        };
        warn!(
            "{} trends for {} unavailable ({}), using simulated series",
            indicator, region, failure
        );
        Fetched::fallback(self.fallback.trend_series(indicator, region, start_year, end_year))
    }

    /// Compare `current_year` against `baseline_year`.
    ///
    /// Returns `None` without fetching anything unless
    /// `baseline_year < current_year`. Otherwise tries the combined call
    /// first, then fetches both readings independently and derives the
    /// change locally.
    pub async fn compare(
        &self,
        indicator: Indicator,
        region: Region,
        baseline_year: i32,
        current_year: i32,
    ) -> Option<Fetched<ComparisonResult>> {
        if current_year <= baseline_year {
            debug!(
                "skipping comparison: {} is not after {}",
                current_year, baseline_year
            );
            return None;
        }

        match self
            .source
            .comparison(indicator, region, baseline_year, current_year)
            .await
        {
            Ok(result) => return Some(Fetched::remote(result)),
            Err(e) => warn!(
                "combined {} comparison {}-{} unavailable ({}), fetching years separately",
                indicator, baseline_year, current_year, e
            ),
        }

        let (baseline, current) = tokio::join!(
            self.reading(indicator, baseline_year, region),
            self.reading(indicator, current_year, region),
        );
        let degraded = baseline.degraded || current.degraded;
        ComparisonResult::between(
            indicator,
            region,
            baseline_year,
            current_year,
            baseline.value.value,
            current.value.value,
        )
        .map(|value| Fetched { value, degraded })
    }
}
