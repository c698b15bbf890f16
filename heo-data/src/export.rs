//! Render indicator reports as downloadable files.

use chrono::NaiveDate;
use heo_core::{export::ExportFormat, report::IndicatorReport, Indicator, Region, Trend};
use serde::Serialize;

/// One row of the tabular export: a spatial sample, or the aggregate value
/// when a report has no samples.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    indicator: Indicator,
    region: Region,
    year: i32,
    unit: &'a str,
    trend: Trend,
    longitude: Option<f64>,
    latitude: Option<f64>,
    value: f64,
    confidence: Option<f64>,
    date: Option<NaiveDate>,
}

/// Suggested download name, e.g. `ndvi_kathmandu_valley_2015.csv`.
pub fn file_name(report: &IndicatorReport, format: ExportFormat) -> String {
    format!(
        "{}_{}_{}.{}",
        report.reading.indicator,
        report.reading.region,
        report.reading.year,
        format.extension()
    )
}

/// Serialize a report in the requested format.
pub fn render(report: &IndicatorReport, format: ExportFormat) -> anyhow::Result<Vec<u8>> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_vec_pretty(report)?),
        ExportFormat::Csv | ExportFormat::Excel => render_table(report, format.delimiter()),
    }
}

fn render_table(report: &IndicatorReport, delimiter: u8) -> anyhow::Result<Vec<u8>> {
    let reading = &report.reading;
    let row = |longitude, latitude, value, confidence, date| ExportRow {
        indicator: reading.indicator,
        region: reading.region,
        year: reading.year,
        unit: &reading.unit,
        trend: reading.trend,
        longitude,
        latitude,
        value,
        confidence,
        date,
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    if report.data_points.is_empty() {
        writer.serialize(row(None, None, reading.value, None, None))?;
    } else {
        for sample in &report.data_points {
            writer.serialize(row(
                Some(sample.longitude),
                Some(sample.latitude),
                sample.value,
                Some(sample.confidence),
                Some(sample.date),
            ))?;
        }
    }

    Ok(writer.into_inner()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Simulator;

    #[test]
    fn test_csv_has_one_row_per_sample() {
        let report = Simulator::default().report(Indicator::Ndvi, Region::AnnapurnaRegion, 2010);
        let bytes = render(&report, ExportFormat::Csv).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "indicator,region,year,unit,trend,longitude,latitude,value,confidence,date"
        );
        assert_eq!(lines.count(), report.data_points.len());
    }

    #[test]
    fn test_csv_aggregate_row_without_samples() {
        let report = Simulator::default().report(Indicator::Forest, Region::default(), 2010);
        let text = String::from_utf8(render(&report, ExportFormat::Csv).unwrap()).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], "forest,nepal_himalayas,2010,km²,stable,,,5000.0,,");
    }

    #[test]
    fn test_excel_is_tab_separated() {
        let report = Simulator::default().report(Indicator::Landslide, Region::default(), 2012);
        let text = String::from_utf8(render(&report, ExportFormat::Excel).unwrap()).unwrap();
        assert!(text.starts_with("indicator\tregion\tyear"));
    }

    #[test]
    fn test_json_export_is_a_report() {
        let report = Simulator::default().report(Indicator::Glacier, Region::EverestRegion, 2019);
        let bytes = render(&report, ExportFormat::Json).unwrap();
        let decoded: IndicatorReport = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded.reading.indicator, Indicator::Glacier);
        assert_eq!(decoded.reading.year, 2019);
        assert_eq!(decoded.data_points.len(), report.data_points.len());
    }

    #[test]
    fn test_file_name() {
        let report = Simulator::default().report(Indicator::Ndvi, Region::KathmanduValley, 2015);
        assert_eq!(
            file_name(&report, ExportFormat::Csv),
            "ndvi_kathmandu_valley_2015.csv"
        );
    }
}
