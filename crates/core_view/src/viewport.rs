use std::f64::consts::PI;

use core_model::geo::{GeoBounds, GeoPoint};
use core_model::incident::IncidentRecord;
use core_model::region::RegionConfig;
use serde::Serialize;

const TILE_SIZE_PX: f64 = 256.0;

/// Framing request handed to the map renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Viewport {
    Center {
        center: GeoPoint,
        zoom: u8,
    },
    Fit {
        bounds: GeoBounds,
        #[serde(rename = "paddingPx")]
        padding_px: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportPolicy {
    pub default_center: GeoPoint,
    pub default_zoom: u8,
    /// Margin kept free on every side when fitting bounds.
    pub padding_px: u32,
    /// Smallest span, in degrees, a fitted box may have on either axis.
    pub min_span_degrees: f64,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

impl ViewportPolicy {
    pub fn for_region(region: &RegionConfig) -> Self {
        Self {
            default_center: region.center,
            default_zoom: region.default_zoom,
            ..Self::default()
        }
    }
}

impl Default for ViewportPolicy {
    fn default() -> Self {
        let region = RegionConfig::bangladesh();
        Self {
            default_center: region.center,
            default_zoom: region.default_zoom,
            padding_px: 20,
            min_span_degrees: 0.01,
            min_zoom: 6,
            max_zoom: 18,
        }
    }
}

/// Concrete centre and zoom for a map of known pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedView {
    pub center: GeoPoint,
    pub zoom: u8,
}

/// Frames `records`: the region default when there are none, otherwise the
/// records' bounding box (never thinner than the policy's minimum span).
pub fn compute_viewport<'a, I>(records: I, policy: &ViewportPolicy) -> Viewport
where
    I: IntoIterator<Item = &'a IncidentRecord>,
{
    let points = records.into_iter().map(|record| record.location.point());
    match GeoBounds::enclosing(points) {
        None => Viewport::Center {
            center: policy.default_center,
            zoom: policy.default_zoom,
        },
        Some(bounds) => Viewport::Fit {
            bounds: bounds.expanded_to_min_span(policy.min_span_degrees),
            padding_px: policy.padding_px,
        },
    }
}

impl Viewport {
    /// Picks the deepest zoom at which the requested bounds fit inside a
    /// `width_px` x `height_px` map (Web Mercator, 256 px tiles), clamped to
    /// the policy's zoom range.
    pub fn resolve(
        &self,
        width_px: u32,
        height_px: u32,
        policy: &ViewportPolicy,
    ) -> ResolvedView {
        match *self {
            Viewport::Center { center, zoom } => ResolvedView {
                center,
                zoom: zoom.clamp(policy.min_zoom, policy.max_zoom),
            },
            Viewport::Fit { bounds, padding_px } => {
                let inner_w = f64::from(width_px) - 2.0 * f64::from(padding_px);
                let inner_h = f64::from(height_px) - 2.0 * f64::from(padding_px);
                let north_y = mercator_y(bounds.north);
                let south_y = mercator_y(bounds.south);
                let zoom = if inner_w <= 0.0 || inner_h <= 0.0 {
                    policy.min_zoom
                } else {
                    let zoom_x = fit_zoom(inner_w, bounds.lng_span() / 360.0);
                    let zoom_y = fit_zoom(inner_h, (north_y - south_y) / (2.0 * PI));
                    clamp_zoom(zoom_x.min(zoom_y).floor(), policy)
                };
                ResolvedView {
                    center: GeoPoint {
                        lat: mercator_lat((north_y + south_y) / 2.0),
                        lng: (bounds.east + bounds.west) / 2.0,
                    },
                    zoom,
                }
            }
        }
    }
}

fn fit_zoom(available_px: f64, world_fraction: f64) -> f64 {
    if world_fraction <= 0.0 {
        return f64::INFINITY;
    }
    (available_px / (TILE_SIZE_PX * world_fraction)).log2()
}

fn clamp_zoom(zoom: f64, policy: &ViewportPolicy) -> u8 {
    let min = f64::from(policy.min_zoom);
    let max = f64::from(policy.max_zoom);
    zoom.clamp(min, max) as u8
}

fn mercator_y(lat: f64) -> f64 {
    let lat = lat.clamp(-85.051_128_78, 85.051_128_78).to_radians();
    (PI / 4.0 + lat / 2.0).tan().ln()
}

fn mercator_lat(y: f64) -> f64 {
    (2.0 * y.exp().atan() - PI / 2.0).to_degrees()
}
