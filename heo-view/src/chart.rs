//! Trend chart layout.
//!
//! Maps a year-ordered series of readings onto an SVG viewport: linear x by
//! position, y scaled between the series minimum and maximum.

use heo_core::IndicatorReading;
use serde::Serialize;

/// Viewport of the trend chart in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendChart {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for TrendChart {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 120.0,
            padding: 10.0,
        }
    }
}

/// One plotted point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub year: i32,
    pub value: f64,
    pub x: f64,
    pub y: f64,
}

/// Everything needed to draw the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub points: Vec<ChartPoint>,
    /// `M x,y L x,y ...` through every point.
    pub line_path: String,
    /// The line closed down to the baseline, for the filled area.
    pub area_path: String,
    pub min: f64,
    pub max: f64,
}

impl TrendChart {
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    fn baseline(&self) -> f64 {
        self.height - self.padding
    }

    fn x(&self, index: usize, count: usize) -> f64 {
        if count < 2 {
            return self.width / 2.0;
        }
        let span = self.width - 2.0 * self.padding;
        self.padding + span * index as f64 / (count - 1) as f64
    }

    fn y(&self, value: f64, min: f64, max: f64) -> f64 {
        if max == min {
            return self.height / 2.0;
        }
        let span = self.height - 2.0 * self.padding;
        self.padding + (1.0 - (value - min) / (max - min)) * span
    }

    /// Lay out `readings` in the order given. Returns `None` for an empty series.
    pub fn layout(&self, readings: &[IndicatorReading]) -> Option<ChartLayout> {
        if readings.is_empty() {
            return None;
        }

        let (min, max) = readings
            .iter()
            .map(|r| r.value)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        let points: Vec<ChartPoint> = readings
            .iter()
            .enumerate()
            .map(|(i, r)| ChartPoint {
                year: r.year,
                value: r.value,
                x: self.x(i, readings.len()),
                y: self.y(r.value, min, max),
            })
            .collect();

        let line_path = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let command = if i == 0 { 'M' } else { 'L' };
                format!("{} {:.1},{:.1}", command, p.x, p.y)
            })
            .collect::<Vec<_>>()
            .join(" ");

        let first_x = points[0].x;
        let last_x = points[points.len() - 1].x;
        let area_path = format!(
            "{} L {:.1},{:.1} L {:.1},{:.1} Z",
            line_path,
            last_x,
            self.baseline(),
            first_x,
            self.baseline()
        );

        Some(ChartLayout {
            points,
            line_path,
            area_path,
            min,
            max,
        })
    }
}
