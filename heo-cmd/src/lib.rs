//! Command implementations for the HEO CLI.
//!
//! Provides subcommands for running the indicator service and for querying
//! it, with a local simulator standing in whenever the service is offline.

use clap::{Args, Subcommand};
use heo_core::client::{ApiClient, DEFAULT_BASE_URL};
use heo_core::export::ExportFormat;
use heo_core::glof::RiskLevel;
use heo_core::{Indicator, Region};
use heo_data::{Orchestrator, Simulator};
use heo_server::config::ServeArgs;

pub mod export;
pub mod query;

/// Where remote subcommands get their data.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Base URL of the HEO service
    #[arg(long, env = "HEO_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Answer from the local simulator without contacting the service
    #[arg(long)]
    pub offline: bool,
}

impl SourceArgs {
    /// Service client, or `None` when running offline.
    pub fn client(&self) -> Option<ApiClient> {
        (!self.offline).then(|| ApiClient::new(&self.api_url))
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the REST service
    Serve(ServeArgs),

    /// Show one indicator reading
    Reading {
        #[arg(short, long)]
        indicator: Indicator,

        #[arg(short, long)]
        year: i32,

        #[arg(short, long, default_value_t = Region::default())]
        region: Region,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Compare an indicator between two years
    Compare {
        #[arg(short, long)]
        indicator: Indicator,

        #[arg(short, long, default_value_t = Region::default())]
        region: Region,

        /// Baseline year
        #[arg(short, long)]
        baseline: i32,

        /// Year compared against the baseline
        #[arg(short, long)]
        current: i32,

        /// Also compare each consecutive sampled step in between
        #[arg(long)]
        intermediate: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show an indicator's trend over a year range
    Trends {
        #[arg(short, long)]
        indicator: Indicator,

        #[arg(short, long, default_value_t = Region::default())]
        region: Region,

        /// Year range as YYYY-YYYY
        #[arg(long, default_value = "2000-2025")]
        years: String,

        /// Interpolate a value for every year between samples
        #[arg(long)]
        yearly: bool,

        /// Write the series to this CSV file instead of printing it
        #[arg(short, long)]
        output: Option<String>,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Download a report as json, csv or excel
    Export {
        #[arg(short, long)]
        indicator: Indicator,

        #[arg(short, long)]
        year: i32,

        #[arg(short, long, default_value_t = Region::default())]
        region: Region,

        #[arg(short, long, default_value_t = ExportFormat::default())]
        format: ExportFormat,

        /// Output file path
        #[arg(short, long)]
        output: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// List the narrative stories
    Stories {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List monitored glacial lakes, most dangerous first
    Lakes {
        /// Only lakes at or above this risk level
        #[arg(long, default_value_t = RiskLevel::Low)]
        min_risk: RiskLevel,

        #[command(flatten)]
        source: SourceArgs,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve(args) => heo_server::serve(&args).await,
        Command::Reading {
            indicator,
            year,
            region,
            source,
        } => match source.client() {
            Some(client) => {
                query::run_reading(&Orchestrator::new(client), indicator, year, region).await
            }
            None => {
                query::run_reading(&Orchestrator::new(Simulator::default()), indicator, year, region)
                    .await
            }
        },
        Command::Compare {
            indicator,
            region,
            baseline,
            current,
            intermediate,
            source,
        } => {
            let request = query::CompareRequest {
                indicator,
                region,
                baseline,
                current,
                intermediate,
            };
            match source.client() {
                Some(client) => query::run_compare(&Orchestrator::new(client), &request).await,
                None => query::run_compare(&Orchestrator::new(Simulator::default()), &request).await,
            }
        }
        Command::Trends {
            indicator,
            region,
            years,
            yearly,
            output,
            source,
        } => {
            let request = query::TrendRequest {
                indicator,
                region,
                years,
                yearly,
                output,
            };
            match source.client() {
                Some(client) => query::run_trends(&Orchestrator::new(client), &request).await,
                None => query::run_trends(&Orchestrator::new(Simulator::default()), &request).await,
            }
        }
        Command::Export {
            indicator,
            year,
            region,
            format,
            output,
            source,
        } => {
            export::run_export(
                source.client().as_ref(),
                indicator,
                year,
                region,
                format,
                &output,
            )
            .await
        }
        Command::Stories { source } => query::run_stories(source.client().as_ref()).await,
        Command::Lakes { min_risk, source } => {
            query::run_lakes(source.client().as_ref(), min_risk).await
        }
    }
}
