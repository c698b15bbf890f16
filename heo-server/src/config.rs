//! Service settings, from command-line flags or the environment.

use anyhow::bail;
use clap::Args;
use heo_utils::years::{YearBounds, DATA_YEAR_MAX, DATA_YEAR_MIN};
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CMR_BASE_URL: &str = "https://cmr.earthdata.nasa.gov";
pub const DEFAULT_GIBS_BASE_URL: &str = "https://gibs.earthdata.nasa.gov";

/// Values shipped in `.env` templates; treated as "no key".
const KEY_PLACEHOLDERS: [&str; 2] = ["your_nasa_api_key_here", "your_nasa_imagery_api_key_here"];

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "HEO_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// First year the service answers for
    #[arg(long, env = "HEO_YEAR_MIN", default_value_t = DATA_YEAR_MIN)]
    pub year_min: i32,

    /// Last year the service answers for
    #[arg(long, env = "HEO_YEAR_MAX", default_value_t = DATA_YEAR_MAX)]
    pub year_max: i32,

    /// Artificial latency added to each indicator response, in milliseconds
    #[arg(long, env = "HEO_SIMULATE_DELAY_MS", default_value_t = 0)]
    pub simulate_delay_ms: u64,

    /// Seed for the simulated values' jitter
    #[arg(long, env = "HEO_SEED")]
    pub seed: Option<u64>,

    /// Confirm data availability against NASA CMR when a key is configured
    #[arg(long, env = "HEO_LIVE_DATA")]
    pub live_data: bool,

    /// NASA Earthdata key or bearer token
    #[arg(long, env = "NASA_API_KEY", hide_env_values = true)]
    pub nasa_api_key: Option<String>,

    /// NASA GIBS imagery token
    #[arg(long, env = "NASA_IMAGERY_API_KEY", hide_env_values = true)]
    pub nasa_imagery_api_key: Option<String>,

    #[arg(long, env = "NASA_CMR_BASE_URL", default_value = DEFAULT_CMR_BASE_URL)]
    pub cmr_base_url: String,

    #[arg(long, env = "NASA_GIBS_BASE_URL", default_value = DEFAULT_GIBS_BASE_URL)]
    pub gibs_base_url: String,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            year_min: DATA_YEAR_MIN,
            year_max: DATA_YEAR_MAX,
            simulate_delay_ms: 0,
            seed: None,
            live_data: false,
            nasa_api_key: None,
            nasa_imagery_api_key: None,
            cmr_base_url: DEFAULT_CMR_BASE_URL.to_string(),
            gibs_base_url: DEFAULT_GIBS_BASE_URL.to_string(),
        }
    }
}

fn configured(key: &Option<String>) -> Option<String> {
    key.as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty() && !KEY_PLACEHOLDERS.contains(k))
        .map(str::to_string)
}

impl ServeArgs {
    pub fn bounds(&self) -> anyhow::Result<YearBounds> {
        if self.year_min > self.year_max {
            bail!(
                "year_min {} is after year_max {}",
                self.year_min,
                self.year_max
            );
        }
        Ok(YearBounds {
            min: self.year_min,
            max: self.year_max,
        })
    }

    pub fn delay(&self) -> Option<Duration> {
        (self.simulate_delay_ms > 0).then(|| Duration::from_millis(self.simulate_delay_ms))
    }

    pub fn api_key(&self) -> Option<String> {
        configured(&self.nasa_api_key)
    }

    pub fn imagery_api_key(&self) -> Option<String> {
        configured(&self.nasa_imagery_api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_keys_are_unset() {
        let args = ServeArgs {
            nasa_api_key: Some("your_nasa_api_key_here".into()),
            nasa_imagery_api_key: Some("  ".into()),
            ..ServeArgs::default()
        };
        assert_eq!(args.api_key(), None);
        assert_eq!(args.imagery_api_key(), None);

        let args = ServeArgs {
            nasa_api_key: Some(" abc123 ".into()),
            ..ServeArgs::default()
        };
        assert_eq!(args.api_key().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_bounds() {
        assert_eq!(ServeArgs::default().bounds().unwrap(), YearBounds::default());
        let args = ServeArgs {
            year_min: 2020,
            year_max: 2010,
            ..ServeArgs::default()
        };
        assert!(args.bounds().is_err());
    }

    #[test]
    fn test_delay() {
        assert_eq!(ServeArgs::default().delay(), None);
        let args = ServeArgs {
            simulate_delay_ms: 250,
            ..ServeArgs::default()
        };
        assert_eq!(args.delay(), Some(Duration::from_millis(250)));
    }
}
