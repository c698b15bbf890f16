use thiserror::Error;

/// Errors that can occur when fetching indicator data from a remote service.
///
/// None of these are fatal: callers either degrade to a local computation
/// or show a short message next to the last good data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Network(String),
    /// The service answered with a non-success status.
    #[error("{url} answered {status}")]
    Status { status: u16, url: String },
    /// The response body was not the expected shape.
    #[error("could not decode response: {0}")]
    Parse(String),
    /// Valid response, but no usable data in it.
    #[error("response contained no usable data")]
    Empty,
}

impl FetchError {
    /// Short text suitable for showing next to stale data.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "Could not reach the data service",
            FetchError::Status { .. } => "The data service returned an error",
            FetchError::Parse(_) => "The data service sent an unexpected response",
            FetchError::Empty => "No data available for this selection",
        }
    }
}

#[cfg(feature = "api")]
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            FetchError::Network(err.to_string())
        }
    }
}
