//! View state for the HEO dashboard.
//!
//! This crate provides:
//! - `chart`: trend chart layout as SVG path data
//! - `story`: the cyclic story slider
//! - `autoplay`: the fixed-interval ticker driving story auto-advance
//! - `compare_slider`: the before/after image comparison slider
//! - `state`: per-indicator dashboard slots fed by the orchestrator

pub mod autoplay;
pub mod chart;
pub mod compare_slider;
pub mod state;
pub mod story;

pub use autoplay::AutoPlay;
pub use chart::{ChartLayout, TrendChart};
pub use compare_slider::ImageCompareSlider;
pub use state::DashboardState;
pub use story::StorySlider;
