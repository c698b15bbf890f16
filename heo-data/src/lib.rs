//! Data processing for earth-observation indicators.
//!
//! This crate produces the synthetic indicator values the service answers
//! with, coordinates remote fetches with their local fallback, and turns
//! reports into downloadable files.

pub mod export;
pub mod orchestrator;
pub mod simulation;
pub mod trends;

pub use orchestrator::{Fetched, Orchestrator};
pub use simulation::Simulator;
