//! Location selections: the geographic constraints a user picks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Position;
use crate::query::Logic;

/// Separates the road and subdivision halves of an intersection label.
pub const INTERSECTION_SEPARATOR: char = '∩';

/// Radius used when a POI is given without one.
pub const DEFAULT_POI_RADIUS: f64 = 1.0;

#[derive(Error, Debug, PartialEq)]
pub enum SelectionParseError {
    #[error("Location '{input}' must look like kind:name (road, city, county, district, subdistrict, poi, polygon, intersection)")]
    MissingKind { input: String },

    #[error("Unknown location kind '{kind}'")]
    UnknownKind { kind: String },

    #[error("Location '{input}' has an empty name")]
    EmptyName { input: String },

    #[error("Invalid POI radius '{radius}': expected a non-negative number")]
    InvalidRadius { radius: String },

    #[error("Invalid coordinate '{coordinate}': expected lng,lat")]
    InvalidCoordinate { coordinate: String },

    #[error("Polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },

    #[error("Intersection '{input}' must look like '<Road> ∩ <Subdivision>'")]
    InvalidIntersection { input: String },
}

/// One user-chosen geographic constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LocationSelection {
    Road { name: String },
    City { name: String },
    County { name: String },
    District { name: String },
    Subdistrict { name: String },
    Poi {
        name: String,
        #[serde(default = "default_poi_radius")]
        radius: f64,
    },
    Polygon { coordinates: Vec<Position> },
    /// `"<Road> ∩ <Subdivision>"`, optionally with the precomputed line where
    /// the two meet.
    Intersection {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coordinates: Option<Vec<Position>>,
    },
}

fn default_poi_radius() -> f64 {
    DEFAULT_POI_RADIUS
}

impl LocationSelection {
    pub fn kind(&self) -> &'static str {
        match self {
            LocationSelection::Road { .. } => "road",
            LocationSelection::City { .. } => "city",
            LocationSelection::County { .. } => "county",
            LocationSelection::District { .. } => "district",
            LocationSelection::Subdistrict { .. } => "subdistrict",
            LocationSelection::Poi { .. } => "poi",
            LocationSelection::Polygon { .. } => "polygon",
            LocationSelection::Intersection { .. } => "intersection",
        }
    }

    pub fn intersection(name: impl Into<String>) -> Self {
        LocationSelection::Intersection {
            name: name.into(),
            coordinates: None,
        }
    }

    /// Road and subdivision halves of an intersection label.
    pub fn intersection_parts(&self) -> Option<(&str, &str)> {
        match self {
            LocationSelection::Intersection { name, .. } => split_intersection(name),
            _ => None,
        }
    }
}

fn split_intersection(label: &str) -> Option<(&str, &str)> {
    let (road, subdivision) = label.split_once(INTERSECTION_SEPARATOR)?;
    let (road, subdivision) = (road.trim(), subdivision.trim());
    if road.is_empty() || subdivision.is_empty() {
        return None;
    }
    Some((road, subdivision))
}

fn parse_coordinate(text: &str) -> Result<Position, SelectionParseError> {
    let invalid = || SelectionParseError::InvalidCoordinate {
        coordinate: text.trim().to_string(),
    };
    let (lng, lat) = text.split_once(',').ok_or_else(invalid)?;
    let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    if !lng.is_finite() || !lat.is_finite() {
        return Err(invalid());
    }
    Ok([lng, lat])
}

fn parse_ring(payload: &str) -> Result<Vec<Position>, SelectionParseError> {
    let mut ring = payload
        .split(';')
        .filter(|part| !part.trim().is_empty())
        .map(parse_coordinate)
        .collect::<Result<Vec<_>, _>>()?;

    if ring.len() < 3 {
        return Err(SelectionParseError::TooFewVertices { count: ring.len() });
    }
    if ring.first() != ring.last() {
        ring.push(ring[0]);
    }
    Ok(ring)
}

fn parse_poi(payload: &str) -> Result<LocationSelection, SelectionParseError> {
    let (name, radius) = match payload.rsplit_once('@') {
        Some((name, radius)) => {
            let parsed: f64 = radius.trim().parse().map_err(|_| SelectionParseError::InvalidRadius {
                radius: radius.trim().to_string(),
            })?;
            if !parsed.is_finite() || parsed < 0.0 {
                return Err(SelectionParseError::InvalidRadius {
                    radius: radius.trim().to_string(),
                });
            }
            (name.trim(), parsed)
        }
        None => (payload, DEFAULT_POI_RADIUS),
    };

    if name.is_empty() {
        return Err(SelectionParseError::EmptyName {
            input: payload.to_string(),
        });
    }
    Ok(LocationSelection::Poi {
        name: name.to_string(),
        radius,
    })
}

impl FromStr for LocationSelection {
    type Err = SelectionParseError;

    /// Parse `kind:payload`, or a bare `"<Road> ∩ <Subdivision>"` label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let Some((kind, payload)) = input.split_once(':') else {
            if split_intersection(input).is_some() {
                return Ok(LocationSelection::intersection(input));
            }
            return Err(SelectionParseError::MissingKind {
                input: input.to_string(),
            });
        };

        let payload = payload.trim();
        if payload.is_empty() {
            return Err(SelectionParseError::EmptyName {
                input: input.to_string(),
            });
        }
        let name = payload.to_string();

        match kind.trim().to_lowercase().as_str() {
            "road" => Ok(LocationSelection::Road { name }),
            "city" => Ok(LocationSelection::City { name }),
            "county" => Ok(LocationSelection::County { name }),
            "district" => Ok(LocationSelection::District { name }),
            "subdistrict" => Ok(LocationSelection::Subdistrict { name }),
            "poi" => parse_poi(payload),
            "polygon" => Ok(LocationSelection::Polygon {
                coordinates: parse_ring(payload)?,
            }),
            "intersection" => match split_intersection(payload) {
                Some(_) => Ok(LocationSelection::intersection(payload)),
                None => Err(SelectionParseError::InvalidIntersection { input: name }),
            },
            _ if split_intersection(input).is_some() => Ok(LocationSelection::intersection(input)),
            other => Err(SelectionParseError::UnknownKind {
                kind: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for LocationSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationSelection::Road { name }
            | LocationSelection::City { name }
            | LocationSelection::County { name }
            | LocationSelection::District { name }
            | LocationSelection::Subdistrict { name }
            | LocationSelection::Intersection { name, .. } => write!(f, "{}:{}", self.kind(), name),
            LocationSelection::Poi { name, radius } => write!(f, "poi:{}@{}", name, radius),
            LocationSelection::Polygon { coordinates } => {
                let ring = coordinates
                    .iter()
                    .map(|[lng, lat]| format!("{},{}", lng, lat))
                    .collect::<Vec<_>>()
                    .join(";");
                write!(f, "polygon:{}", ring)
            }
        }
    }
}

/// Location selections combined with a single logic operator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationFilter {
    #[serde(default)]
    pub selections: Vec<LocationSelection>,
    #[serde(default)]
    pub logic: Logic,
}

impl LocationFilter {
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}
