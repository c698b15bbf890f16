//! Shared utility functions for HEO crates.

/// Observation-year utilities
pub mod years {
    use crate::error::YearRangeError;

    /// First year covered by the indicator datasets.
    pub const DATA_YEAR_MIN: i32 = 2000;

    /// Last year covered by the indicator datasets.
    pub const DATA_YEAR_MAX: i32 = 2025;

    /// Default sampling step (in years) for trend series.
    pub const TREND_STEP: i32 = 5;

    /// Inclusive bounds on the years a service will answer for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct YearBounds {
        pub min: i32,
        pub max: i32,
    }

    impl Default for YearBounds {
        fn default() -> Self {
            Self {
                min: DATA_YEAR_MIN,
                max: DATA_YEAR_MAX,
            }
        }
    }

    impl YearBounds {
        pub fn contains(&self, year: i32) -> bool {
            (self.min..=self.max).contains(&year)
        }

        /// Validate a single year, returning it unchanged when in bounds.
        pub fn check(&self, year: i32) -> Result<i32, YearRangeError> {
            if self.contains(year) {
                Ok(year)
            } else {
                Err(YearRangeError(format!(
                    "year {} must be between {} and {}",
                    year, self.min, self.max
                )))
            }
        }

        pub fn clamp(&self, year: i32) -> i32 {
            year.clamp(self.min, self.max)
        }
    }

    /// Parse a year range in "YYYY-YYYY" form, checking both ends against `bounds`.
    pub fn parse_year_range(s: &str, bounds: &YearBounds) -> Result<(i32, i32), YearRangeError> {
        let invalid = || YearRangeError(format!("invalid year range {s:?}, use 'YYYY-YYYY'"));
        let (start, end) = s.trim().split_once('-').ok_or_else(invalid)?;
        let start = start.trim().parse::<i32>().map_err(|_| invalid())?;
        let end = end.trim().parse::<i32>().map_err(|_| invalid())?;
        if start > end {
            return Err(YearRangeError(format!(
                "range start {start} is after range end {end}"
            )));
        }
        if start < bounds.min || end > bounds.max {
            return Err(YearRangeError(format!(
                "year range {}-{} out of bounds {}-{}",
                start, end, bounds.min, bounds.max
            )));
        }
        Ok((start, end))
    }

    /// An iterator that yields every `step`-th year from the start year,
    /// always finishing on the end year (inclusive).
    #[derive(Clone, Eq, PartialEq, Copy, Debug)]
    pub struct YearSteps {
        next: Option<i32>,
        end: i32,
        step: i32,
    }

    impl YearSteps {
        pub fn new(start: i32, end: i32, step: i32) -> Self {
            Self {
                next: (start <= end).then_some(start),
                end,
                step: step.max(1),
            }
        }
    }

    impl Iterator for YearSteps {
        type Item = i32;
        fn next(&mut self) -> Option<Self::Item> {
            let current = self.next?;
            let following = current + self.step;
            let upcoming = if current >= self.end {
                None
            } else if following >= self.end {
                Some(self.end)
            } else {
                Some(following)
            };
            self.next = upcoming;
            Some(current)
        }
    }

}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct YearRangeError(pub String);

    impl fmt::Display for YearRangeError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Year range error: {}", self.0)
        }
    }

    impl std::error::Error for YearRangeError {}
}
