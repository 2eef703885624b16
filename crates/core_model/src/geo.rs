use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned latitude/longitude box. Does not wrap the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    /// Smallest box enclosing every point, or `None` when there are none.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = GeoBounds {
            north: first.lat,
            south: first.lat,
            east: first.lng,
            west: first.lng,
        };
        for point in points {
            bounds.north = bounds.north.max(point.lat);
            bounds.south = bounds.south.min(point.lat);
            bounds.east = bounds.east.max(point.lng);
            bounds.west = bounds.west.min(point.lng);
        }
        Some(bounds)
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat <= self.north
            && point.lat >= self.south
            && point.lng <= self.east
            && point.lng >= self.west
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat: (self.north + self.south) / 2.0,
            lng: (self.east + self.west) / 2.0,
        }
    }

    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    pub fn lng_span(&self) -> f64 {
        self.east - self.west
    }

    /// Widens any axis thinner than `min_span` degrees around its midpoint.
    /// Axes already at least that wide keep their exact edges.
    pub fn expanded_to_min_span(&self, min_span: f64) -> Self {
        let (north, south) = widen_axis(self.north, self.south, min_span);
        let (east, west) = widen_axis(self.east, self.west, min_span);
        GeoBounds {
            north,
            south,
            east,
            west,
        }
    }

    /// Rejects boxes with inverted edges or non-finite values.
    pub fn is_valid(&self) -> bool {
        [self.north, self.south, self.east, self.west]
            .iter()
            .all(|v| v.is_finite())
            && self.north >= self.south
            && self.east >= self.west
    }
}

fn widen_axis(high: f64, low: f64, min_span: f64) -> (f64, f64) {
    if high - low >= min_span {
        return (high, low);
    }
    let mid = (high + low) / 2.0;
    let half = min_span / 2.0;
    ((mid + half).max(high), (mid - half).min(low))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclosing_box_covers_all_points() {
        let bounds = GeoBounds::enclosing([
            GeoPoint::new(23.8, 90.4),
            GeoPoint::new(22.3, 91.8),
            GeoPoint::new(24.9, 91.9),
        ])
        .unwrap();
        assert_eq!(bounds.north, 24.9);
        assert_eq!(bounds.south, 22.3);
        assert_eq!(bounds.east, 91.9);
        assert_eq!(bounds.west, 90.4);
        assert!(GeoBounds::enclosing(std::iter::empty()).is_none());
    }

    #[test]
    fn contains_is_inclusive_on_edges() {
        let bounds = GeoBounds {
            north: 26.0,
            south: 21.0,
            east: 92.0,
            west: 88.0,
        };
        assert!(bounds.contains(&GeoPoint::new(26.0, 88.0)));
        assert!(!bounds.contains(&GeoPoint::new(26.01, 90.0)));
    }

    #[test]
    fn zero_area_box_expands_around_its_point() {
        let point = GeoPoint::new(23.7, 90.4);
        let bounds = GeoBounds::enclosing([point]).unwrap().expanded_to_min_span(0.02);
        assert!((bounds.lat_span() - 0.02).abs() < 1e-9);
        assert!((bounds.lng_span() - 0.02).abs() < 1e-9);
        assert!(bounds.contains(&point));
        assert!(bounds.is_valid());
    }

    #[test]
    fn wide_axes_keep_their_exact_edges() {
        let points = [
            GeoPoint::new(22.3, 91.8),
            GeoPoint::new(24.9, 89.2),
            GeoPoint::new(23.1, 90.7),
        ];
        let bounds = GeoBounds::enclosing(points).unwrap().expanded_to_min_span(0.01);
        assert_eq!(bounds.south, 22.3);
        assert_eq!(bounds.north, 24.9);
        assert_eq!(bounds.west, 89.2);
        assert_eq!(bounds.east, 91.8);
        for point in &points {
            assert!(bounds.contains(point), "{point:?} outside {bounds:?}");
        }
    }

    #[test]
    fn only_the_thin_axis_is_widened() {
        let points = [GeoPoint::new(23.7, 90.1), GeoPoint::new(23.7, 91.3)];
        let bounds = GeoBounds::enclosing(points).unwrap().expanded_to_min_span(0.01);
        assert_eq!(bounds.west, 90.1);
        assert_eq!(bounds.east, 91.3);
        assert!(bounds.lat_span() >= 0.01 - 1e-12);
        for point in &points {
            assert!(bounds.contains(point));
        }
    }
}
