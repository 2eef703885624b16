use serde::Serialize;

use crate::geo::{GeoBounds, GeoPoint};

/// Administrative divisions of Bangladesh, in the order the filter panel lists them.
pub const BANGLADESH_DIVISIONS: [&str; 8] = [
    "Dhaka",
    "Chittagong",
    "Sylhet",
    "Rajshahi",
    "Barisal",
    "Rangpur",
    "Mymensingh",
    "Khulna",
];

pub const BANGLADESH_BOUNDS: GeoBounds = GeoBounds {
    north: 26.6382,
    south: 20.7404,
    east: 92.6727,
    west: 88.0844,
};

pub const BANGLADESH_CENTER: GeoPoint = GeoPoint::new(23.6850, 90.3563);

/// Static description of the region of interest: default framing and the
/// fixed division enumeration offered to the filter panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionConfig {
    pub name: String,
    pub center: GeoPoint,
    pub default_zoom: u8,
    pub bounds: GeoBounds,
    pub divisions: Vec<String>,
}

impl RegionConfig {
    pub fn bangladesh() -> Self {
        Self {
            name: "Bangladesh".into(),
            center: BANGLADESH_CENTER,
            default_zoom: 7,
            bounds: BANGLADESH_BOUNDS,
            divisions: BANGLADESH_DIVISIONS.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// Bounds the map may be panned within: the region plus a one degree margin.
    pub fn max_bounds(&self) -> GeoBounds {
        GeoBounds {
            north: self.bounds.north + 1.0,
            south: self.bounds.south - 1.0,
            east: self.bounds.east + 1.0,
            west: self.bounds.west - 1.0,
        }
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self::bangladesh()
    }
}
