//! `GeometryLookup` backed by published layer files.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::cache::normalize_name;
use super::{
    Feature, FeatureCollection, Geometry, GeometryCache, GeometryError, GeometryLookup,
    GeometrySource, LatLng, Layer, LayerIndex, Position,
};

/// Resolves names against layer files fetched from a `GeometrySource`.
///
/// The cache is shared by reference so several lookups (or repeated CLI
/// invocations in the same process) reuse parsed layers.
pub struct CatalogLookup {
    source: Box<dyn GeometrySource>,
    cache: Arc<GeometryCache>,
}

impl CatalogLookup {
    pub fn new(source: Box<dyn GeometrySource>, cache: Arc<GeometryCache>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &Arc<GeometryCache> {
        &self.cache
    }

    async fn layer(&self, layer: Layer) -> Option<Arc<LayerIndex>> {
        let result = self
            .cache
            .get_or_load(layer, || async {
                debug!(layer = layer.file_stem(), source = %self.source.describe(), "loading geometry layer");
                let text = self.source.fetch(layer).await?;
                index_layer(layer, &text)
            })
            .await;

        match result {
            Ok(index) => Some(index),
            Err(e) => {
                warn!(layer = layer.file_stem(), error = %e, "geometry layer unavailable");
                None
            }
        }
    }

    async fn feature(&self, layer: Layer, name: &str) -> Option<Feature> {
        let index = self.layer(layer).await?;
        let found = index.get(&normalize_name(name)).cloned();
        if found.is_none() {
            debug!(layer = layer.file_stem(), name, "no feature with that name");
        }
        found
    }
}

#[async_trait]
impl GeometryLookup for CatalogLookup {
    async fn road_coordinates(&self, name: &str) -> Option<Vec<Vec<Position>>> {
        match self.feature(Layer::Roads, name).await?.geometry? {
            Geometry::MultiLineString { coordinates } => Some(coordinates),
            _ => None,
        }
    }

    async fn city_boundary(&self, name: &str) -> Option<Feature> {
        self.feature(Layer::Cities, name).await
    }

    async fn county_boundary(&self, name: &str) -> Option<Feature> {
        self.feature(Layer::Counties, name).await
    }

    async fn district_boundary(&self, name: &str) -> Option<Feature> {
        self.feature(Layer::Districts, name).await
    }

    async fn subdistrict_boundary(&self, name: &str) -> Option<Feature> {
        self.feature(Layer::Subdistricts, name).await
    }

    async fn poi_coordinates(&self, name: &str) -> Option<LatLng> {
        match self.feature(Layer::Pois, name).await?.geometry? {
            Geometry::Point { coordinates: [lng, lat] } => Some(LatLng { lat, lng }),
            _ => None,
        }
    }
}

/// Parse a layer's FeatureCollection into a name index.
///
/// Road segments sharing a name are merged into one MultiLineString. For the
/// other layers the first feature with a given name wins. Features without a
/// name or geometry, or whose geometry cannot be parsed, are dropped.
pub fn index_layer(layer: Layer, text: &str) -> Result<LayerIndex, GeometryError> {
    let collection: FeatureCollection =
        serde_json::from_str(text).map_err(|source| GeometryError::Parse {
            layer: layer.file_stem(),
            source,
        })?;

    let mut index = LayerIndex::new();
    for (position, raw) in collection.features.into_iter().enumerate() {
        let feature = match Feature::from_value(raw) {
            Ok(feature) => feature,
            Err(e) => {
                debug!(layer = layer.file_stem(), position, error = %e, "skipping unparseable feature");
                continue;
            }
        };
        let Some(key) = feature.name().map(normalize_name) else {
            continue;
        };
        let Some(geometry) = feature.geometry.clone() else {
            continue;
        };

        if layer == Layer::Roads {
            let lines = geometry.into_lines();
            if lines.is_empty() {
                continue;
            }
            let entry = index.entry(key).or_insert_with(|| Feature {
                geometry: Some(Geometry::MultiLineString { coordinates: Vec::new() }),
                properties: feature.properties.clone(),
            });
            if let Some(Geometry::MultiLineString { coordinates }) = entry.geometry.as_mut() {
                coordinates.extend(lines);
            }
        } else {
            index.entry(key).or_insert(feature);
        }
    }

    debug!(layer = layer.file_stem(), features = index.len(), "indexed geometry layer");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DirectorySource;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use tempfile::TempDir;

    fn write_layer(dir: &TempDir, layer: Layer, value: serde_json::Value) {
        std::fs::write(dir.path().join(layer.file_name()), value.to_string()).unwrap();
    }

    #[fixture]
    fn geo_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_layer(
            &dir,
            Layer::Roads,
            json!({"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {"name": "I-65"},
                 "geometry": {"type": "LineString", "coordinates": [[-86.2, 39.6], [-86.1, 39.7]]}},
                {"type": "Feature", "properties": {"name": "I-65"},
                 "geometry": {"type": "MultiLineString", "coordinates": [[[-86.1, 39.7], [-86.0, 39.9]]]}},
                {"type": "Feature", "properties": {"name": "US-31"}, "geometry": null}
            ]}),
        );
        write_layer(
            &dir,
            Layer::Counties,
            json!({"features": [
                {"properties": {"NAME": "Marion County"},
                 "geometry": {"type": "Polygon", "coordinates": [[[-86.3, 39.6], [-85.9, 39.6], [-85.9, 39.9], [-86.3, 39.6]]]}},
                {"properties": {"NAME": "Marion County"},
                 "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}}
            ]}),
        );
        write_layer(
            &dir,
            Layer::Pois,
            json!({"features": [
                {"properties": {"name": "Indianapolis International Airport"},
                 "geometry": {"type": "Point", "coordinates": [-86.2944, 39.7173]}}
            ]}),
        );
        dir
    }

    fn lookup_for(dir: &TempDir) -> CatalogLookup {
        CatalogLookup::new(
            Box::new(DirectorySource::new(dir.path())),
            Arc::new(GeometryCache::new()),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn test_road_segments_merge(geo_dir: TempDir) {
        let lookup = lookup_for(&geo_dir);
        let lines = lookup.road_coordinates("i-65").await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1][1], [-86.0, 39.9]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_road_without_geometry_is_miss(geo_dir: TempDir) {
        let lookup = lookup_for(&geo_dir);
        assert!(lookup.road_coordinates("US-31").await.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn test_first_boundary_wins(geo_dir: TempDir) {
        let lookup = lookup_for(&geo_dir);
        let feature = lookup.county_boundary("  marion   county ").await.unwrap();
        match feature.geometry.unwrap() {
            Geometry::Polygon { coordinates } => assert_eq!(coordinates[0][0], [-86.3, 39.6]),
            other => panic!("Expected Polygon, got {:?}", other),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_poi_coordinates(geo_dir: TempDir) {
        let lookup = lookup_for(&geo_dir);
        let poi = lookup
            .poi_coordinates("Indianapolis International Airport")
            .await
            .unwrap();
        assert_eq!(poi, LatLng { lat: 39.7173, lng: -86.2944 });
    }

    #[rstest]
    #[tokio::test]
    async fn test_missing_layer_is_miss(geo_dir: TempDir) {
        let lookup = lookup_for(&geo_dir);
        assert!(lookup.district_boundary("Greenfield").await.is_none());
        assert!(!lookup.cache().is_loaded(Layer::Districts));
    }

    #[rstest]
    #[tokio::test]
    async fn test_layer_cached_after_first_lookup(geo_dir: TempDir) {
        let lookup = lookup_for(&geo_dir);
        assert!(lookup.county_boundary("Marion County").await.is_some());

        std::fs::remove_file(geo_dir.path().join(Layer::Counties.file_name())).unwrap();
        assert!(lookup.county_boundary("Marion County").await.is_some());
        assert_eq!(lookup.cache().loaded_layers(), 1);
    }

    #[rstest]
    fn test_index_layer_rejects_invalid_json() {
        let err = index_layer(Layer::Cities, "{ not geojson").unwrap_err();
        assert!(matches!(err, GeometryError::Parse { layer: "cities", .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn test_bad_sibling_features_do_not_poison_layer() {
        let dir = tempfile::tempdir().unwrap();
        write_layer(
            &dir,
            Layer::Counties,
            json!({"features": [
                {"properties": {"NAME": "Hamilton County"},
                 "geometry": {"type": "Polygon", "coordinates": [[[-86.2, 40.0, 250.0], [-85.9, 40.0, 250.0], [-86.2, 40.0, 250.0]]]}},
                {"properties": {"NAME": "Boone County"},
                 "geometry": {"type": "GeometryCollection", "geometries": []}},
                {"properties": {"NAME": "Johnson County"},
                 "geometry": {"type": "Polygon", "coordinates": "not coordinates"}},
                {"properties": {"NAME": "Marion County"},
                 "geometry": {"type": "Polygon", "coordinates": [[[-86.3, 39.6], [-85.9, 39.6], [-85.9, 39.9], [-86.3, 39.6]]]}}
            ]}),
        );
        let lookup = lookup_for(&dir);

        assert!(lookup.county_boundary("Marion County").await.is_some());
        assert!(lookup.county_boundary("Boone County").await.is_none());
        assert!(lookup.county_boundary("Johnson County").await.is_none());
        match lookup.county_boundary("Hamilton County").await.unwrap().geometry.unwrap() {
            Geometry::Polygon { coordinates } => assert_eq!(coordinates[0][1], [-85.9, 40.0]),
            other => panic!("Expected Polygon, got {:?}", other),
        }
        assert!(lookup.cache().is_loaded(Layer::Counties));
    }

    #[rstest]
    fn test_boundary_dispatch_order() {
        assert_eq!(
            crate::geometry::BoundaryKind::FALLBACK_ORDER.map(|k| k.as_str()),
            ["city", "county", "district", "subdistrict"]
        );
    }
}
