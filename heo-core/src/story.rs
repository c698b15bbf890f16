use crate::indicator::Indicator;
use crate::comparison::{change_between, round_to};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// Embedded CSV data for the narrative stories mode.
pub static STORIES_CSV: &str = include_str!("../../fixtures/stories.csv");

/// A bundled before/after narrative about one place.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct StoryRecord {
    pub id: String,
    pub title: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub indicator: Indicator,
    pub before_year: i32,
    pub after_year: i32,
    pub before_value: f64,
    pub after_value: f64,
    pub unit: String,
    /// Imagery reference for the "before" frame of the comparison slider
    pub before_image: String,
    /// Imagery reference for the "after" frame of the comparison slider
    pub after_image: String,
    pub summary: String,
}

impl StoryRecord {
    /// Parse a CSV string of stories.
    ///
    /// Expected CSV columns: id, title, location, latitude, longitude, indicator,
    /// before_year, after_year, before_value, after_value, unit, before_image,
    /// after_image, summary
    pub fn parse_story_csv(csv_object: &str) -> Result<Vec<StoryRecord>, csv::Error> {
        ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_object.as_bytes())
            .deserialize()
            .collect()
    }

    /// Get the bundled story list, in display order.
    pub fn get_story_vector() -> Result<Vec<StoryRecord>, csv::Error> {
        StoryRecord::parse_story_csv(STORIES_CSV)
    }

    /// Metric delta between the two frames: (amount, percentage).
    pub fn delta(&self) -> (f64, f64) {
        let (amount, pct) = change_between(self.before_value, self.after_value);
        (round_to(amount, 3), round_to(pct, 2))
    }
}
