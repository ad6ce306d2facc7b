//! GeoJSON-like geometry and the lookup services that resolve named places to it.
//!
//! - `simplify` - ring down-sampling to bound request size
//! - `lookup` - the `GeometryLookup` trait consumed by the query builder
//! - `cache` - explicit get-or-load cache, one map per layer
//! - `source` - where layer files come from (local directory or HTTP)
//! - `catalog` - `GeometryLookup` backed by a source and a cache

pub mod cache;
pub mod catalog;
pub mod lookup;
pub mod simplify;
pub mod source;

pub use cache::{GeometryCache, LayerIndex};
pub use catalog::CatalogLookup;
pub use lookup::{BoundaryKind, GeometryLookup};
pub use simplify::{simplify_ring, MAX_RING_VERTICES, MIN_RING_VERTICES};
pub use source::{DirectorySource, GeometryError, GeometrySource, HttpSource, Layer};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A `[longitude, latitude]` pair.
pub type Position = [f64; 2];

/// Geometry payload carried in spatial expressions.
///
/// Serializes with a `type` tag and a `coordinates` member, matching GeoJSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::LineString { .. } => "LineString",
            Geometry::MultiLineString { .. } => "MultiLineString",
            Geometry::Polygon { .. } => "Polygon",
            Geometry::MultiPolygon { .. } => "MultiPolygon",
        }
    }

    /// Total number of positions across all parts.
    pub fn vertex_count(&self) -> usize {
        match self {
            Geometry::Point { .. } => 1,
            Geometry::LineString { coordinates } => coordinates.len(),
            Geometry::MultiLineString { coordinates } | Geometry::Polygon { coordinates } => {
                coordinates.iter().map(Vec::len).sum()
            }
            Geometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .flat_map(|polygon| polygon.iter())
                .map(Vec::len)
                .sum(),
        }
    }

    /// Down-sample every polygon ring; other geometries are returned unchanged.
    pub fn simplified(self) -> Self {
        match self {
            Geometry::Polygon { coordinates } => Geometry::Polygon {
                coordinates: coordinates.iter().map(|ring| simplify_ring(ring)).collect(),
            },
            Geometry::MultiPolygon { coordinates } => Geometry::MultiPolygon {
                coordinates: coordinates
                    .iter()
                    .map(|polygon| polygon.iter().map(|ring| simplify_ring(ring)).collect())
                    .collect(),
            },
            other => other,
        }
    }

    /// Line parts of a line geometry, used when merging road segments.
    pub fn into_lines(self) -> Vec<Vec<Position>> {
        match self {
            Geometry::LineString { coordinates } => vec![coordinates],
            Geometry::MultiLineString { coordinates } => coordinates,
            _ => Vec::new(),
        }
    }

    pub fn is_areal(&self) -> bool {
        matches!(self, Geometry::Polygon { .. } | Geometry::MultiPolygon { .. })
    }
}

/// A GeoJSON feature as published in the boundary layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry: Some(geometry),
            properties: Map::new(),
        }
    }

    /// Display name from the `name` or `NAME` property.
    pub fn name(&self) -> Option<&str> {
        self.properties
            .get("name")
            .or_else(|| self.properties.get("NAME"))
            .and_then(Value::as_str)
    }
}

/// A published layer file. Features stay raw so each one is parsed on its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Value>,
}

impl Feature {
    /// Parse one raw GeoJSON feature, dropping any altitude from its positions.
    pub fn from_value(mut value: Value) -> Result<Self, serde_json::Error> {
        if let Some(coordinates) = value
            .get_mut("geometry")
            .and_then(|geometry| geometry.get_mut("coordinates"))
        {
            drop_altitude(coordinates);
        }
        serde_json::from_value(value)
    }
}

/// Truncate every position (an array of 2 or more numbers) to `[lng, lat]`.
fn drop_altitude(value: &mut Value) {
    let Value::Array(items) = value else {
        return;
    };
    if items.len() > 2 && items.iter().all(Value::is_number) {
        items.truncate(2);
    } else {
        items.iter_mut().for_each(drop_altitude);
    }
}

/// A point of interest location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn to_point(self) -> Geometry {
        Geometry::Point {
            coordinates: [self.lng, self.lat],
        }
    }
}
