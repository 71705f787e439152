use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Whole-country view shown before any city is chosen
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(56.1304, -106.3468);
pub const DEFAULT_ZOOM: u8 = 4;
/// Zoom used when panning to a geocoded city
pub const CITY_ZOOM: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Suggested,
    Default,
}

/// Per-venue marker rendering state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerVisualState {
    pub emphasized: bool,
    pub color_class: MarkerColor,
}

impl MarkerVisualState {
    pub fn for_membership(suggested: bool) -> Self {
        Self {
            emphasized: suggested,
            color_class: if suggested {
                MarkerColor::Suggested
            } else {
                MarkerColor::Default
            },
        }
    }
}

/// Axis-aligned bounding box in lat/lng space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for an empty input
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        points.into_iter().fold(None, |acc: Option<Bounds>, p| {
            Some(match acc {
                None => Bounds {
                    south_west: p,
                    north_east: p,
                },
                Some(b) => Bounds {
                    south_west: Coordinate::new(
                        b.south_west.latitude.min(p.latitude),
                        b.south_west.longitude.min(p.longitude),
                    ),
                    north_east: Coordinate::new(
                        b.north_east.latitude.max(p.latitude),
                        b.north_east.longitude.max(p.longitude),
                    ),
                },
            })
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
    Satellite,
    Hybrid,
}

/// Live map state mirrored to the front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    pub map_type: MapType,
    pub show_labels: bool,
    pub viewport: Option<Bounds>,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            map_type: MapType::Satellite,
            show_labels: false,
            viewport: None,
        }
    }
}

impl MapView {
    pub fn pan_to_city(&mut self, center: Coordinate) {
        self.center = center;
        self.zoom = CITY_ZOOM;
        self.viewport = None;
    }

    /// Labels on means the hybrid (satellite + roads/labels) map type
    pub fn toggle_labels(&mut self) -> bool {
        self.show_labels = !self.show_labels;
        self.map_type = if self.show_labels {
            MapType::Hybrid
        } else {
            MapType::Satellite
        };
        self.show_labels
    }
}
