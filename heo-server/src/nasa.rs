//! NASA Earthdata passthrough.
//!
//! CMR is only asked whether granules exist for a collection and year; the
//! served values stay simulated. GIBS serves imagery, either as a URL for
//! the browser or proxied through [`NasaClient::fetch_image`].

use crate::config::ServeArgs;
use chrono::NaiveDate;
use heo_core::{region::BoundingBox, report::IndicatorReport, Indicator};
use log::{debug, info, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const USER_AGENT: &str = concat!("heo-server/", env!("CARGO_PKG_VERSION"));

/// Layer used when an imagery request names none.
pub const DEFAULT_LAYER: &str = "MODIS_Terra_NDVI_16Day";

#[derive(Debug, Error)]
pub enum NasaError {
    #[error("NASA request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("no {0} collection in CMR")]
    NoCollection(&'static str),
}

/// CMR collection backing an indicator, if there is one.
pub fn collection_short_name(indicator: Indicator) -> Option<&'static str> {
    match indicator {
        Indicator::Ndvi => Some("MOD13Q1"),
        Indicator::Urban => Some("VNP46A2"),
        Indicator::Temperature => Some("MOD11A2"),
        Indicator::Glacier => Some("MOD10A2"),
        _ => None,
    }
}

/// The token to send as `Authorization: Bearer`, if `key` is one.
///
/// Earthdata JWTs are long; short keys are legacy API keys.
pub fn bearer_token(key: &str) -> Option<&str> {
    if let Some(token) = key.strip_prefix("Bearer ") {
        Some(token)
    } else if key.len() > 50 {
        Some(key)
    } else {
        None
    }
}

#[derive(Debug, Default, Deserialize)]
struct Feed {
    #[serde(default)]
    feed: FeedBody,
}

#[derive(Debug, Default, Deserialize)]
struct FeedBody {
    #[serde(default)]
    entry: Vec<FeedEntry>,
}

#[derive(Debug, Deserialize)]
struct FeedEntry {
    id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GibsLayer {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentalDataStatus {
    pub api_key_configured: bool,
    pub live_data: bool,
    pub cmr_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageryStatus {
    pub api_key_configured: bool,
    pub gibs_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NasaStatus {
    pub environmental_data: EnvironmentalDataStatus,
    pub satellite_imagery: ImageryStatus,
    pub live_indicators: Vec<Indicator>,
}

#[derive(Debug, Clone)]
pub struct NasaClient {
    http: Client,
    api_key: Option<String>,
    imagery_api_key: Option<String>,
    cmr_base_url: String,
    gibs_base_url: String,
    live_data: bool,
}

impl NasaClient {
    pub fn from_args(args: &ServeArgs) -> anyhow::Result<Self> {
        let api_key = args.api_key();
        let mut headers = HeaderMap::new();
        if let Some(token) = api_key.as_deref().and_then(bearer_token) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        let client = Self {
            http,
            api_key,
            imagery_api_key: args.imagery_api_key(),
            cmr_base_url: args.cmr_base_url.trim_end_matches('/').to_string(),
            gibs_base_url: args.gibs_base_url.trim_end_matches('/').to_string(),
            live_data: args.live_data,
        };
        if client.enabled() {
            info!("NASA CMR availability checks enabled ({})", client.cmr_base_url);
        } else {
            debug!("NASA CMR availability checks disabled");
        }
        Ok(client)
    }

    /// Whether reports are checked against CMR.
    pub fn enabled(&self) -> bool {
        self.live_data && self.api_key.is_some()
    }

    /// Whether CMR lists any granule of the indicator's collection in `year`.
    pub async fn granules_available(&self, indicator: Indicator, year: i32) -> Result<bool, NasaError> {
        let Some(short_name) = collection_short_name(indicator) else {
            return Ok(false);
        };

        let collections: Feed = self
            .http
            .get(format!("{}/search/collections.json", self.cmr_base_url))
            .query(&[("short_name", short_name), ("page_size", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let collection = collections
            .feed
            .entry
            .into_iter()
            .next()
            .ok_or(NasaError::NoCollection(short_name))?;

        let temporal = format!("{year}-01-01T00:00:00Z,{year}-12-31T23:59:59Z");
        let granules: Feed = self
            .http
            .get(format!("{}/search/granules.json", self.cmr_base_url))
            .query(&[
                ("collection_concept_id", collection.id.as_str()),
                ("temporal", temporal.as_str()),
                ("page_size", "10"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(
            "{} {} granules for {}",
            granules.feed.entry.len(),
            short_name,
            year
        );
        Ok(!granules.feed.entry.is_empty())
    }

    /// Flag `report` as live when CMR has granules for it. Failures leave the
    /// report as simulated.
    pub async fn confirm_live(&self, report: &mut IndicatorReport) {
        if !self.enabled() {
            return;
        }
        let indicator = report.reading.indicator;
        let year = report.reading.year;
        match self.granules_available(indicator, year).await {
            Ok(live) => report.live = live,
            Err(e) => warn!("{} {}: {}, serving simulated data", indicator, year, e),
        }
    }

    fn get_map_endpoint(&self) -> String {
        format!("{}/wms/epsg4326/best/wms.cgi", self.gibs_base_url)
    }

    /// WMS GetMap parameters for one layer, day and area, without credentials.
    fn get_map_params(
        layer: &str,
        date: NaiveDate,
        bounds: BoundingBox,
        width: u32,
        height: u32,
    ) -> Vec<(&'static str, String)> {
        // WMS 1.3.0 with EPSG:4326 takes latitude first
        let bbox = format!(
            "{},{},{},{}",
            bounds.min_lat, bounds.min_lon, bounds.max_lat, bounds.max_lon
        );
        vec![
            ("service", "WMS".to_string()),
            ("version", "1.3.0".to_string()),
            ("request", "GetMap".to_string()),
            ("layers", layer.to_string()),
            ("styles", String::new()),
            ("format", "image/png".to_string()),
            ("transparent", "true".to_string()),
            ("width", width.to_string()),
            ("height", height.to_string()),
            ("crs", "EPSG:4326".to_string()),
            ("bbox", bbox),
            ("time", date.format("%Y-%m-%d").to_string()),
        ]
    }

    /// GIBS WMS GetMap URL for one layer, day and area.
    pub fn image_url(
        &self,
        layer: &str,
        date: NaiveDate,
        bounds: BoundingBox,
        width: u32,
        height: u32,
    ) -> anyhow::Result<String> {
        let mut params = Self::get_map_params(layer, date, bounds, width, height);
        if let Some(token) = &self.imagery_api_key {
            params.push(("token", token.clone()));
        }
        let url = Url::parse_with_params(&self.get_map_endpoint(), &params)?;
        Ok(url.to_string())
    }

    /// Fetch the GetMap image server side.
    ///
    /// Long imagery keys go out as a bearer token, short ones as the `token`
    /// parameter. `None` means GIBS answered with something other than an
    /// image, typically a WMS exception document.
    pub async fn fetch_image(
        &self,
        layer: &str,
        date: NaiveDate,
        bounds: BoundingBox,
        width: u32,
        height: u32,
    ) -> Result<Option<Vec<u8>>, NasaError> {
        let mut params = Self::get_map_params(layer, date, bounds, width, height);
        let bearer = self.imagery_api_key.as_deref().and_then(bearer_token);
        if let (None, Some(key)) = (bearer, &self.imagery_api_key) {
            params.push(("token", key.clone()));
        }

        let mut request = self.http.get(self.get_map_endpoint()).query(&params);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?.error_for_status()?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("image/") {
            warn!("GIBS returned {:?} for {} on {}", content_type, layer, date);
            return Ok(None);
        }
        let image = response.bytes().await?;
        debug!("fetched {} byte {} image for {}", image.len(), layer, date);
        Ok(Some(image.to_vec()))
    }

    pub fn layers(&self) -> Vec<GibsLayer> {
        vec![
            GibsLayer {
                id: DEFAULT_LAYER,
                name: "MODIS Terra NDVI (16 Day)",
                description: "Vegetation Index",
            },
            GibsLayer {
                id: "MODIS_Terra_CorrectedReflectance_TrueColor",
                name: "MODIS Terra True Color",
                description: "True color satellite imagery",
            },
            GibsLayer {
                id: "MODIS_Terra_Land_Surface_Temp_Day",
                name: "MODIS Terra Land Surface Temperature",
                description: "Daytime land surface temperature",
            },
            GibsLayer {
                id: "VIIRS_SNPP_CorrectedReflectance_TrueColor",
                name: "VIIRS True Color",
                description: "High resolution true color imagery",
            },
        ]
    }

    pub fn status(&self) -> NasaStatus {
        NasaStatus {
            environmental_data: EnvironmentalDataStatus {
                api_key_configured: self.api_key.is_some(),
                live_data: self.enabled(),
                cmr_url: self.cmr_base_url.clone(),
            },
            satellite_imagery: ImageryStatus {
                api_key_configured: self.imagery_api_key.is_some(),
                gibs_url: self.gibs_base_url.clone(),
            },
            live_indicators: Indicator::ALL
                .into_iter()
                .filter(|i| collection_short_name(*i).is_some())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heo_core::Region;

    #[test]
    fn test_bearer_token_detection() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("short-key"), None);
        let jwt = "x".repeat(51);
        assert_eq!(bearer_token(&jwt), Some(jwt.as_str()));
    }

    #[test]
    fn test_disabled_without_key() {
        let args = ServeArgs {
            live_data: true,
            ..ServeArgs::default()
        };
        assert!(!NasaClient::from_args(&args).unwrap().enabled());

        let args = ServeArgs {
            nasa_api_key: Some("abc".into()),
            ..ServeArgs::default()
        };
        assert!(!NasaClient::from_args(&args).unwrap().enabled());
    }

    #[test]
    fn test_image_url_carries_token_and_bbox() {
        let args = ServeArgs {
            nasa_imagery_api_key: Some("tok".into()),
            ..ServeArgs::default()
        };
        let client = NasaClient::from_args(&args).unwrap();
        let date = NaiveDate::from_ymd_opt(2020, 6, 15).unwrap();
        let url = client
            .image_url(DEFAULT_LAYER, date, Region::KathmanduValley.bounds(), 600, 400)
            .unwrap();
        assert!(url.starts_with("https://gibs.earthdata.nasa.gov/wms/epsg4326/best/wms.cgi?"));
        assert!(url.contains("layers=MODIS_Terra_NDVI_16Day"));
        assert!(url.contains("time=2020-06-15"));
        assert!(url.contains("bbox=27.57%2C85.19%2C27.82%2C85.52"));
        assert!(url.contains("token=tok"));
    }

    #[test]
    fn test_status_lists_cmr_backed_indicators() {
        let status = NasaClient::from_args(&ServeArgs::default()).unwrap().status();
        assert!(!status.environmental_data.api_key_configured);
        assert_eq!(
            status.live_indicators,
            vec![
                Indicator::Ndvi,
                Indicator::Glacier,
                Indicator::Urban,
                Indicator::Temperature
            ]
        );
    }

    #[tokio::test]
    async fn test_unreachable_gibs_is_an_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let args = ServeArgs {
            nasa_imagery_api_key: Some("x".repeat(60)),
            gibs_base_url: format!("http://{addr}/"),
            ..ServeArgs::default()
        };
        let client = NasaClient::from_args(&args).unwrap();
        let date = NaiveDate::from_ymd_opt(2020, 6, 15).unwrap();
        let result = client
            .fetch_image(DEFAULT_LAYER, date, Region::default().bounds(), 600, 400)
            .await;
        assert!(matches!(result, Err(NasaError::Http(_))));
    }

    #[tokio::test]
    async fn test_unreachable_cmr_keeps_report_simulated() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let args = ServeArgs {
            live_data: true,
            nasa_api_key: Some("abc".into()),
            cmr_base_url: format!("http://{addr}"),
            ..ServeArgs::default()
        };
        let client = NasaClient::from_args(&args).unwrap();
        assert!(client.enabled());
        let mut report =
            heo_data::Simulator::default().report(Indicator::Ndvi, Region::default(), 2010);
        client.confirm_live(&mut report).await;
        assert!(!report.live);
    }
}
