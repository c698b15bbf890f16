use crate::{
    comparison::ComparisonResult, error::FetchError, indicator::Indicator,
    reading::IndicatorReading, region::Region,
};
use std::future::Future;

/// Anything that can answer indicator queries: the remote service client or
/// the local simulator used as its fallback.
pub trait IndicatorSource {
    /// Headline reading for one (indicator, year, region) tuple.
    fn reading(
        &self,
        indicator: Indicator,
        year: i32,
        region: Region,
    ) -> impl Future<Output = Result<IndicatorReading, FetchError>> + Send;

    /// Yearly readings sampled across `start_year..=end_year`, oldest first.
    fn trends(
        &self,
        indicator: Indicator,
        region: Region,
        start_year: i32,
        end_year: i32,
    ) -> impl Future<Output = Result<Vec<IndicatorReading>, FetchError>> + Send;

    /// Combined baseline/current comparison in one call.
    fn comparison(
        &self,
        indicator: Indicator,
        region: Region,
        baseline_year: i32,
        comparison_year: i32,
    ) -> impl Future<Output = Result<ComparisonResult, FetchError>> + Send;
}
