//! Read-only queries against the indicator service or the local simulator.

use anyhow::bail;
use heo_core::client::ApiClient;
use heo_core::glof::{lakes_at_risk, GlofLake, RiskLevel};
use heo_core::story::StoryRecord;
use heo_core::{Indicator, IndicatorReading, IndicatorSource, Region};
use heo_data::trends::{fill_years, step_comparisons};
use heo_data::Orchestrator;
use heo_utils::years::{parse_year_range, YearBounds};
use log::{info, warn};

const FALLBACK_NOTE: &str = " (simulated: service unavailable)";

fn note(degraded: bool) -> &'static str {
    if degraded {
        FALLBACK_NOTE
    } else {
        ""
    }
}

pub async fn run_reading<S: IndicatorSource>(
    orchestrator: &Orchestrator<S>,
    indicator: Indicator,
    year: i32,
    region: Region,
) -> anyhow::Result<()> {
    YearBounds::default().check(year)?;
    let fetched = orchestrator.reading(indicator, year, region).await;
    let reading = &fetched.value;
    println!(
        "{} {} {}: {} {} ({}){}",
        indicator.name(),
        region.label(),
        year,
        reading.value,
        reading.unit,
        reading.trend,
        note(fetched.degraded)
    );
    Ok(())
}

#[derive(Debug, Clone)]
pub struct CompareRequest {
    pub indicator: Indicator,
    pub region: Region,
    pub baseline: i32,
    pub current: i32,
    pub intermediate: bool,
}

pub async fn run_compare<S: IndicatorSource>(
    orchestrator: &Orchestrator<S>,
    request: &CompareRequest,
) -> anyhow::Result<()> {
    let bounds = YearBounds::default();
    bounds.check(request.baseline)?;
    bounds.check(request.current)?;

    let Some(fetched) = orchestrator
        .compare(
            request.indicator,
            request.region,
            request.baseline,
            request.current,
        )
        .await
    else {
        bail!(
            "current year {} must be after baseline year {}",
            request.current,
            request.baseline
        );
    };

    let result = &fetched.value;
    println!("{}{}", result.summary, note(fetched.degraded));
    println!(
        "  {} -> {}: {} -> {} ({:+} {}, {:+}%)",
        result.baseline_year,
        result.comparison_year,
        result.baseline_value,
        result.comparison_value,
        result.change_amount,
        request.indicator.unit(),
        result.change_percentage
    );

    if request.intermediate {
        let series = orchestrator
            .trends(
                request.indicator,
                request.region,
                request.baseline,
                request.current,
            )
            .await;
        for step in step_comparisons(&series.value) {
            println!(
                "  {} -> {}: {:+} ({:+}%)",
                step.baseline_year, step.comparison_year, step.change_amount, step.change_percentage
            );
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct TrendRequest {
    pub indicator: Indicator,
    pub region: Region,
    /// `YYYY-YYYY`
    pub years: String,
    pub yearly: bool,
    pub output: Option<String>,
}

/// Write readings as CSV with a header row.
pub fn write_trend_csv(path: &str, readings: &[IndicatorReading]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for reading in readings {
        writer.serialize(reading)?;
    }
    writer.flush()?;
    Ok(())
}

pub async fn run_trends<S: IndicatorSource>(
    orchestrator: &Orchestrator<S>,
    request: &TrendRequest,
) -> anyhow::Result<()> {
    let (start, end) = parse_year_range(&request.years, &YearBounds::default())?;
    let fetched = orchestrator
        .trends(request.indicator, request.region, start, end)
        .await;
    if fetched.degraded {
        warn!("trend served from the local simulator");
    }
    let series = if request.yearly {
        fill_years(&fetched.value)
    } else {
        fetched.value
    };

    match &request.output {
        Some(path) => {
            write_trend_csv(path, &series)?;
            info!("Wrote {} readings to {}", series.len(), path);
        }
        None => {
            println!(
                "{} in {} ({}){}",
                request.indicator.name(),
                request.region.label(),
                request.indicator.unit(),
                note(fetched.degraded)
            );
            for reading in &series {
                println!("  {}  {:>10}  {}", reading.year, reading.value, reading.trend);
            }
        }
    }
    Ok(())
}

pub async fn run_stories(client: Option<&ApiClient>) -> anyhow::Result<()> {
    let stories = match client {
        Some(client) => match client.stories().await {
            Ok(stories) => stories,
            Err(e) => {
                warn!("stories unavailable ({}), using bundled list", e);
                StoryRecord::get_story_vector()?
            }
        },
        None => StoryRecord::get_story_vector()?,
    };

    for story in &stories {
        let (amount, pct) = story.delta();
        println!(
            "{:<18} {} ({})\n  {} {} -> {} {}: {} -> {} {} ({:+}, {:+}%)",
            story.id,
            story.title,
            story.location,
            story.indicator,
            story.before_year,
            story.after_year,
            story.unit,
            story.before_value,
            story.after_value,
            story.unit,
            amount,
            pct
        );
    }
    Ok(())
}

pub async fn run_lakes(client: Option<&ApiClient>, min_risk: RiskLevel) -> anyhow::Result<()> {
    let lakes = match client {
        Some(client) => match client.glof_lakes().await {
            Ok(lakes) => lakes,
            Err(e) => {
                warn!("lake registry unavailable ({}), using bundled list", e);
                GlofLake::get_glof_lake_vector()?
            }
        },
        None => GlofLake::get_glof_lake_vector()?,
    };

    for lake in lakes_at_risk(&lakes, min_risk) {
        println!(
            "{:<22} {:<14} {:<8} {:>5} m  {:.2} km²  (+{:.3} km²/yr)",
            lake.name,
            lake.district,
            lake.risk_level,
            lake.elevation_m,
            lake.area_km2,
            lake.expansion_rate_km2_per_year
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use heo_core::Trend;
    use heo_data::Simulator;

    #[tokio::test]
    async fn test_compare_rejects_non_increasing_years() {
        let orchestrator = Orchestrator::new(Simulator::default());
        let request = CompareRequest {
            indicator: Indicator::Ndvi,
            region: Region::default(),
            baseline: 2020,
            current: 2010,
            intermediate: false,
        };
        assert!(run_compare(&orchestrator, &request).await.is_err());
    }

    #[tokio::test]
    async fn test_trends_reject_bad_range() {
        let orchestrator = Orchestrator::new(Simulator::default());
        let request = TrendRequest {
            indicator: Indicator::Urban,
            region: Region::default(),
            years: "2025-2000".to_string(),
            yearly: false,
            output: None,
        };
        assert!(run_trends(&orchestrator, &request).await.is_err());
    }

    #[test]
    fn test_write_trend_csv() {
        let path = std::env::temp_dir().join(format!("heo-trend-{}.csv", std::process::id()));
        let path = path.to_str().unwrap();
        let readings = vec![
            IndicatorReading::new(Indicator::Glof, 2000, Region::default(), 1.5, Trend::Increasing),
            IndicatorReading::new(Indicator::Glof, 2005, Region::default(), 1.656, Trend::Increasing),
        ];
        write_trend_csv(path, &readings).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        std::fs::remove_file(path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "indicator,year,region,value,trend,unit");
        assert_eq!(lines[2], "glof,2005,nepal_himalayas,1.656,increasing,km²");
    }
}
