//! Report downloads.

use heo_core::client::ApiClient;
use heo_core::export::ExportFormat;
use heo_core::{Indicator, Region};
use heo_data::{export, Simulator};
use heo_utils::years::YearBounds;
use log::{info, warn};

/// Render the simulated report locally.
fn render_local(
    indicator: Indicator,
    year: i32,
    region: Region,
    format: ExportFormat,
) -> anyhow::Result<Vec<u8>> {
    let report = Simulator::default().report(indicator, region, year);
    export::render(&report, format)
}

/// Download a report from the service, or render it locally when offline or
/// when the service fails, and write it to `output`.
pub async fn run_export(
    client: Option<&ApiClient>,
    indicator: Indicator,
    year: i32,
    region: Region,
    format: ExportFormat,
    output: &str,
) -> anyhow::Result<()> {
    YearBounds::default().check(year)?;
    let bytes = match client {
        Some(client) => match client.export(indicator, year, region, format).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("export from {} failed ({}), rendering locally", client.base_url(), e);
                render_local(indicator, year, region, format)?
            }
        },
        None => render_local(indicator, year, region, format)?,
    };
    std::fs::write(output, &bytes)?;
    info!("Wrote {} bytes of {} to {}", bytes.len(), format, output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_export_writes_file() {
        let path = std::env::temp_dir().join(format!("heo-export-{}.csv", std::process::id()));
        let path = path.to_str().unwrap();
        run_export(None, Indicator::Earthquake, 2016, Region::default(), ExportFormat::Csv, path)
            .await
            .unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        std::fs::remove_file(path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("earthquake,nepal_himalayas,2016,%,recovering,,,80.0,,"));
    }

    #[tokio::test]
    async fn test_export_rejects_out_of_range_year() {
        let result = run_export(
            None,
            Indicator::Ndvi,
            2031,
            Region::default(),
            ExportFormat::Json,
            "unused.json",
        )
        .await;
        assert!(result.is_err());
    }
}
