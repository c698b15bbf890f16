//! Core types for Himalayan earth-observation indicators.
//!
//! Readings, comparisons and reports are the wire types shared between the
//! mock service and its clients. The story and GLOF lake registries are
//! bundled CSV fixtures. The HTTP client lives behind the `api` feature.

#[cfg(feature = "api")]
pub mod client;
pub mod comparison;
pub mod error;
pub mod export;
pub mod glof;
pub mod indicator;
pub mod reading;
pub mod region;
pub mod report;
pub mod source;
pub mod story;

pub use comparison::ComparisonResult;
pub use error::FetchError;
pub use indicator::Indicator;
pub use reading::{IndicatorReading, Trend};
pub use region::Region;
pub use source::IndicatorSource;
