//! Per-layer get-or-load cache.
//!
//! Each layer is fetched and parsed at most once per cache instance; entries
//! are never evicted. A failed load leaves the slot empty so the next lookup
//! tries again.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::OnceCell;

use super::{Feature, GeometryError, Layer};

/// Normalized feature name -> feature.
pub type LayerIndex = HashMap<String, Feature>;

#[derive(Debug, Default)]
pub struct GeometryCache {
    layers: [OnceCell<Arc<LayerIndex>>; 6],
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached index for `layer`, running `load` if it is not populated yet.
    ///
    /// Concurrent first callers share a single load.
    pub async fn get_or_load<F, Fut>(
        &self,
        layer: Layer,
        load: F,
    ) -> Result<Arc<LayerIndex>, GeometryError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<LayerIndex, GeometryError>>,
    {
        self.layers[layer.index()]
            .get_or_try_init(|| async { load().await.map(Arc::new) })
            .await
            .cloned()
    }

    pub fn is_loaded(&self, layer: Layer) -> bool {
        self.layers[layer.index()].initialized()
    }

    pub fn loaded_layers(&self) -> usize {
        self.layers.iter().filter(|cell| cell.initialized()).count()
    }
}

/// Key used for case-insensitive name matching.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
