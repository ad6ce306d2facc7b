//! Shared setup for integration tests: GeoJSON layers on disk and a fixed clock.

#![allow(dead_code)]

use std::f64::consts::PI;
use std::sync::Arc;

use indot_query::builder::FixedClock;
use indot_query::geometry::{CatalogLookup, DirectorySource, GeometryCache, Layer};
use serde_json::{json, Value};
use tempfile::TempDir;

/// 2025-05-07 10:00 US Eastern daylight time (UTC-4).
pub fn fixed_clock() -> FixedClock {
    FixedClock::parse("2025-05-07T10:00:00-04:00").unwrap()
}

/// Closed ring with `points` distinct vertices.
pub fn circle_ring(center: [f64; 2], radius: f64, points: usize) -> Vec<[f64; 2]> {
    let mut ring: Vec<[f64; 2]> = (0..points)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / points as f64;
            [center[0] + radius * angle.cos(), center[1] + radius * angle.sin()]
        })
        .collect();
    ring.push(ring[0]);
    ring
}

fn feature(name: &str, geometry: Value) -> Value {
    json!({"type": "Feature", "properties": {"name": name}, "geometry": geometry})
}

fn polygon(ring: Vec<[f64; 2]>) -> Value {
    json!({"type": "Polygon", "coordinates": [ring]})
}

fn write_layer(dir: &TempDir, layer: Layer, features: Vec<Value>) {
    let collection = json!({"type": "FeatureCollection", "features": features});
    std::fs::write(dir.path().join(layer.file_name()), collection.to_string()).unwrap();
}

/// Geometry directory with every layer populated around Indianapolis.
///
/// `Marion County` has a 500-vertex boundary; `Greenfield` is only a district.
pub fn indiana_geo_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();

    write_layer(
        &dir,
        Layer::Roads,
        vec![
            feature("I-65", json!({"type": "LineString", "coordinates": [[-86.30, 39.60], [-86.15, 39.76]]})),
            feature("I-65", json!({"type": "LineString", "coordinates": [[-86.15, 39.76], [-86.05, 39.95]]})),
            feature("I-70", json!({"type": "LineString", "coordinates": [[-86.40, 39.70], [-85.80, 39.80]]})),
        ],
    );
    write_layer(
        &dir,
        Layer::Counties,
        vec![feature("Marion County", polygon(circle_ring([-86.15, 39.78], 0.2, 500)))],
    );
    write_layer(
        &dir,
        Layer::Cities,
        vec![feature(
            "Indianapolis",
            polygon(vec![[-86.33, 39.63], [-85.94, 39.63], [-85.94, 39.93], [-86.33, 39.93], [-86.33, 39.63]]),
        )],
    );
    write_layer(
        &dir,
        Layer::Districts,
        vec![feature(
            "Greenfield",
            polygon(vec![[-86.0, 39.6], [-85.6, 39.6], [-85.6, 40.0], [-86.0, 40.0], [-86.0, 39.6]]),
        )],
    );
    write_layer(&dir, Layer::Subdistricts, vec![]);
    write_layer(
        &dir,
        Layer::Pois,
        vec![feature("Lucas Oil Stadium", json!({"type": "Point", "coordinates": [-86.1639, 39.7601]}))],
    );

    dir
}

pub fn catalog_lookup(dir: &TempDir) -> CatalogLookup {
    CatalogLookup::new(
        Box::new(DirectorySource::new(dir.path())),
        Arc::new(GeometryCache::new()),
    )
}
