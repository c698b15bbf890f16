//! Yearly series helpers for the time slider and comparison views.

use heo_core::{comparison::round_to, ComparisonResult, IndicatorReading};
use heo_utils::years::{YearSteps, TREND_STEP};

/// Years the trend endpoint samples for a range: every [`TREND_STEP`]
/// years from `start`, always including `end`.
pub fn sample_years(start: i32, end: i32) -> Vec<i32> {
    YearSteps::new(start, end, TREND_STEP).collect()
}

/// Linearly interpolate between two readings, filling in one reading per year.
///
/// Returns a Vec with one reading for each year between start and end
/// (inclusive). If both readings share a year, returns just the start.
/// Interpolated readings carry the start reading's trend.
pub fn interpolate_pair(start: &IndicatorReading, end: &IndicatorReading) -> Vec<IndicatorReading> {
    let years = end.year - start.year;
    if years <= 0 {
        return vec![start.clone()];
    }

    let slope = (end.value - start.value) / f64::from(years);
    let mut result = Vec::with_capacity((years + 1) as usize);

    for i in 0..=years {
        let value = if i == years {
            end.value
        } else {
            round_to(start.value + slope * f64::from(i), 3)
        };
        result.push(IndicatorReading {
            year: start.year + i,
            value,
            ..start.clone()
        });
    }

    result
}

/// Fill gaps in a year-sorted series so the slider has a value for every year.
///
/// Input must be sorted by year; gaps larger than one year are filled.
pub fn fill_years(points: &[IndicatorReading]) -> Vec<IndicatorReading> {
    if points.is_empty() {
        return Vec::new();
    }

    let mut result = Vec::new();

    for window in points.windows(2) {
        let start = &window[0];
        let end = &window[1];

        if end.year - start.year <= 1 {
            result.push(start.clone());
        } else {
            // the end point opens the next window
            let interpolated = interpolate_pair(start, end);
            result.extend_from_slice(&interpolated[..interpolated.len() - 1]);
        }
    }

    if let Some(last) = points.last() {
        result.push(last.clone());
    }

    result
}

/// Comparisons between each consecutive pair of readings in a sorted series.
pub fn step_comparisons(series: &[IndicatorReading]) -> Vec<ComparisonResult> {
    series
        .windows(2)
        .filter_map(|pair| {
            ComparisonResult::between(
                pair[0].indicator,
                pair[0].region,
                pair[0].year,
                pair[1].year,
                pair[0].value,
                pair[1].value,
            )
        })
        .collect()
}
