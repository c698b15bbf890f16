use crate::indicator::UnknownKey;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A named geographic area used to scope indicator queries.
#[derive(
    Debug, Default, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    #[default]
    NepalHimalayas,
    KathmanduValley,
    AnnapurnaRegion,
    EverestRegion,
}

/// Longitude/latitude bounding box in decimal degrees.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        (self.min_lon..=self.max_lon).contains(&lon) && (self.min_lat..=self.max_lat).contains(&lat)
    }
}

/// Static description of a region, as served by the catalogue endpoint.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RegionInfo {
    pub id: Region,
    pub name: String,
    pub description: String,
    pub bounds: BoundingBox,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::NepalHimalayas,
        Region::KathmanduValley,
        Region::AnnapurnaRegion,
        Region::EverestRegion,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Region::NepalHimalayas => "nepal_himalayas",
            Region::KathmanduValley => "kathmandu_valley",
            Region::AnnapurnaRegion => "annapurna_region",
            Region::EverestRegion => "everest_region",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Region::NepalHimalayas => "Nepal Himalayas",
            Region::KathmanduValley => "Kathmandu Valley",
            Region::AnnapurnaRegion => "Annapurna Region",
            Region::EverestRegion => "Everest Region",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Region::NepalHimalayas => "Entire Nepal Himalayan region",
            Region::KathmanduValley => "Urban valley region",
            Region::AnnapurnaRegion => "Mountain region with glaciers",
            Region::EverestRegion => "High altitude extreme environment",
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        let (min_lon, min_lat, max_lon, max_lat) = match self {
            Region::NepalHimalayas => (80.06, 26.35, 88.2, 30.45),
            Region::KathmanduValley => (85.19, 27.57, 85.52, 27.82),
            Region::AnnapurnaRegion => (83.5, 28.25, 84.3, 28.85),
            Region::EverestRegion => (86.5, 27.75, 87.15, 28.1),
        };
        BoundingBox {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    pub fn info(&self) -> RegionInfo {
        RegionInfo {
            id: *self,
            name: self.label().to_string(),
            description: self.description().to_string(),
            bounds: self.bounds(),
        }
    }

    /// Stable position of this region in [`Region::ALL`].
    pub fn ordinal(&self) -> u64 {
        Region::ALL
            .iter()
            .position(|r| r == self)
            .unwrap_or_default() as u64
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Region {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Region::ALL
            .into_iter()
            .find(|r| r.key() == lowered)
            .ok_or_else(|| UnknownKey {
                kind: "region",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_region() {
        assert_eq!(Region::default(), Region::NepalHimalayas);
    }

    #[test]
    fn test_region_parse() {
        assert_eq!(
            "kathmandu_valley".parse::<Region>().unwrap(),
            Region::KathmanduValley
        );
        assert!("pokhara".parse::<Region>().is_err());
    }

    #[test]
    fn test_sub_regions_inside_nepal() {
        let nepal = Region::NepalHimalayas.bounds();
        for region in Region::ALL {
            let (lon, lat) = region.bounds().center();
            assert!(nepal.contains(lon, lat), "{region} center outside Nepal");
        }
    }
}
