//! Shared test utilities for builder and command tests.
//!
//! Provides an in-memory `GeometryLookup` with a small Indiana gazetteer and
//! a fixed clock, so builds are deterministic without touching disk or network.

use std::collections::HashMap;
use std::f64::consts::PI;

use async_trait::async_trait;

use crate::builder::FixedClock;
use crate::geometry::cache::normalize_name;
use crate::geometry::{BoundaryKind, Feature, Geometry, GeometryLookup, LatLng, Position};

/// 2025-05-07 10:00 US Eastern daylight time (UTC-4).
pub const FIXED_NOW: &str = "2025-05-07T10:00:00-04:00";

pub fn fixed_clock() -> FixedClock {
    FixedClock::parse(FIXED_NOW).expect("FIXED_NOW is valid RFC 3339")
}

/// Closed ring of `points` distinct vertices around `center`.
pub fn circle_ring(center: Position, radius: f64, points: usize) -> Vec<Position> {
    let mut ring: Vec<Position> = (0..points)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / points as f64;
            [center[0] + radius * angle.cos(), center[1] + radius * angle.sin()]
        })
        .collect();
    ring.push(ring[0]);
    ring
}

/// Axis-aligned closed square ring.
pub fn square_ring(min: Position, max: Position) -> Vec<Position> {
    vec![
        [min[0], min[1]],
        [max[0], min[1]],
        [max[0], max[1]],
        [min[0], max[1]],
        [min[0], min[1]],
    ]
}

fn polygon_feature(ring: Vec<Position>) -> Feature {
    Feature::new(Geometry::Polygon {
        coordinates: vec![ring],
    })
}

/// In-memory lookup keyed by normalized name.
#[derive(Debug, Clone, Default)]
pub struct MockLookup {
    roads: HashMap<String, Vec<Vec<Position>>>,
    boundaries: HashMap<(BoundaryKind, String), Feature>,
    pois: HashMap<String, LatLng>,
}

impl MockLookup {
    /// A lookup that resolves nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Small gazetteer around Indianapolis.
    ///
    /// `Marion County` carries a 400-vertex ring; `Greenfield` exists only as
    /// a district.
    pub fn indiana() -> Self {
        Self::empty()
            .with_road(
                "I-65",
                vec![
                    vec![[-86.30, 39.60], [-86.20, 39.70], [-86.15, 39.76]],
                    vec![[-86.15, 39.76], [-86.10, 39.85], [-86.05, 39.95]],
                ],
            )
            .with_road("I-70", vec![vec![[-86.40, 39.70], [-86.15, 39.77], [-85.80, 39.80]]])
            .with_boundary(BoundaryKind::City, "Indianapolis", square_ring([-86.33, 39.63], [-85.94, 39.93]))
            .with_boundary(BoundaryKind::County, "Marion County", circle_ring([-86.15, 39.78], 0.2, 400))
            .with_boundary(BoundaryKind::District, "Greenfield", square_ring([-86.00, 39.60], [-85.60, 40.00]))
            .with_boundary(BoundaryKind::Subdistrict, "Indianapolis East", square_ring([-86.05, 39.70], [-85.90, 39.85]))
            .with_poi("Lucas Oil Stadium", LatLng { lat: 39.7601, lng: -86.1639 })
    }

    pub fn with_road(mut self, name: &str, lines: Vec<Vec<Position>>) -> Self {
        self.roads.insert(normalize_name(name), lines);
        self
    }

    pub fn with_boundary(mut self, kind: BoundaryKind, name: &str, ring: Vec<Position>) -> Self {
        self.boundaries.insert((kind, normalize_name(name)), polygon_feature(ring));
        self
    }

    pub fn with_poi(mut self, name: &str, location: LatLng) -> Self {
        self.pois.insert(normalize_name(name), location);
        self
    }

    fn boundary_for(&self, kind: BoundaryKind, name: &str) -> Option<Feature> {
        self.boundaries.get(&(kind, normalize_name(name))).cloned()
    }
}

#[async_trait]
impl GeometryLookup for MockLookup {
    async fn road_coordinates(&self, name: &str) -> Option<Vec<Vec<Position>>> {
        self.roads.get(&normalize_name(name)).cloned()
    }

    async fn city_boundary(&self, name: &str) -> Option<Feature> {
        self.boundary_for(BoundaryKind::City, name)
    }

    async fn county_boundary(&self, name: &str) -> Option<Feature> {
        self.boundary_for(BoundaryKind::County, name)
    }

    async fn district_boundary(&self, name: &str) -> Option<Feature> {
        self.boundary_for(BoundaryKind::District, name)
    }

    async fn subdistrict_boundary(&self, name: &str) -> Option<Feature> {
        self.boundary_for(BoundaryKind::Subdistrict, name)
    }

    async fn poi_coordinates(&self, name: &str) -> Option<LatLng> {
        self.pois.get(&normalize_name(name)).copied()
    }
}
