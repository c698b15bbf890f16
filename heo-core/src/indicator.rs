use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// One of the tracked environmental metrics.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    /// Normalized Difference Vegetation Index
    Ndvi,
    Glacier,
    Urban,
    Temperature,
    /// Glacial Lake Outburst Flood risk
    Glof,
    Forest,
    Landslide,
    Earthquake,
}

/// Static description of an indicator, as served by the catalogue endpoint.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct IndicatorInfo {
    pub id: Indicator,
    pub name: String,
    pub description: String,
    pub unit: String,
    pub source: String,
    pub range: String,
}

impl Indicator {
    pub const ALL: [Indicator; 8] = [
        Indicator::Ndvi,
        Indicator::Glacier,
        Indicator::Urban,
        Indicator::Temperature,
        Indicator::Glof,
        Indicator::Forest,
        Indicator::Landslide,
        Indicator::Earthquake,
    ];

    /// Wire identifier, e.g. `"ndvi"`.
    pub fn id(&self) -> &'static str {
        match self {
            Indicator::Ndvi => "ndvi",
            Indicator::Glacier => "glacier",
            Indicator::Urban => "urban",
            Indicator::Temperature => "temperature",
            Indicator::Glof => "glof",
            Indicator::Forest => "forest",
            Indicator::Landslide => "landslide",
            Indicator::Earthquake => "earthquake",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Indicator::Ndvi => "Normalized Difference Vegetation Index",
            Indicator::Glacier => "Glacier Coverage",
            Indicator::Urban => "Urban Expansion",
            Indicator::Temperature => "Land Surface Temperature",
            Indicator::Glof => "GLOF Risk",
            Indicator::Forest => "Forest Cover",
            Indicator::Landslide => "Landslide Susceptibility",
            Indicator::Earthquake => "Earthquake Recovery",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Indicator::Ndvi => "Plant health and vegetation density",
            Indicator::Glacier => "Glacier extent and ice coverage",
            Indicator::Urban => "Built-up area and urban development",
            Indicator::Temperature => "Surface temperature monitoring",
            Indicator::Glof => "Glacial Lake Outburst Flood risk",
            Indicator::Forest => "Forest coverage and health",
            Indicator::Landslide => "Landslide risk zones",
            Indicator::Earthquake => "Post-earthquake vegetation recovery",
        }
    }

    /// Unit of the headline value carried in an [`crate::IndicatorReading`].
    pub fn unit(&self) -> &'static str {
        match self {
            Indicator::Ndvi => "NDVI",
            Indicator::Glacier | Indicator::Urban | Indicator::Glof | Indicator::Forest => "km²",
            Indicator::Temperature => "°C",
            Indicator::Landslide => "Index",
            Indicator::Earthquake => "%",
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            Indicator::Ndvi => "MODIS/Landsat",
            Indicator::Glacier => "Sentinel/Landsat",
            Indicator::Urban => "Landsat/Nightlight",
            Indicator::Temperature => "MODIS",
            Indicator::Glof => "Sentinel",
            Indicator::Forest => "Landsat",
            Indicator::Landslide => "Other",
            Indicator::Earthquake => "MODIS",
        }
    }

    pub fn range(&self) -> &'static str {
        match self {
            Indicator::Ndvi | Indicator::Landslide => "0.0 to 1.0",
            Indicator::Earthquake => "0 to 100",
            _ => "Variable",
        }
    }

    pub fn info(&self) -> IndicatorInfo {
        IndicatorInfo {
            id: *self,
            name: self.name().to_string(),
            description: self.description().to_string(),
            unit: self.unit().to_string(),
            source: self.source().to_string(),
            range: self.range().to_string(),
        }
    }

    /// Stable position of this indicator in [`Indicator::ALL`].
    pub fn ordinal(&self) -> u64 {
        Indicator::ALL
            .iter()
            .position(|i| i == self)
            .unwrap_or_default() as u64
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Raised when parsing an unknown indicator or region key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownKey {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for Indicator {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Indicator::ALL
            .into_iter()
            .find(|i| i.id() == lowered)
            .ok_or_else(|| UnknownKey {
                kind: "indicator",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_round_trips_through_str() {
        for indicator in Indicator::ALL {
            assert_eq!(indicator.id().parse::<Indicator>().unwrap(), indicator);
        }
        assert_eq!(" NDVI ".parse::<Indicator>().unwrap(), Indicator::Ndvi);
    }

    #[test]
    fn test_unknown_indicator() {
        let err = "rainfall".parse::<Indicator>().unwrap_err();
        assert_eq!(err.kind, "indicator");
        assert_eq!(err.to_string(), "unknown indicator \"rainfall\"");
    }

    #[test]
    fn test_serde_uses_wire_ids() {
        let json = serde_json::to_string(&Indicator::Temperature).unwrap();
        assert_eq!(json, "\"temperature\"");
        let glof: Indicator = serde_json::from_str("\"glof\"").unwrap();
        assert_eq!(glof, Indicator::Glof);
    }
}
