//! Where geometry layer files are fetched from.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("Failed to read geometry layer '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch geometry layer from {url}: {message}")]
    Http { url: String, message: String },

    #[error("Invalid GeoJSON in {layer} layer: {source}")]
    Parse {
        layer: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// One published geometry layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Roads,
    Pois,
    Cities,
    Counties,
    Districts,
    Subdistricts,
}

impl Layer {
    pub const ALL: [Layer; 6] = [
        Layer::Roads,
        Layer::Pois,
        Layer::Cities,
        Layer::Counties,
        Layer::Districts,
        Layer::Subdistricts,
    ];

    /// File stem of the layer, e.g. `roads` for `roads.geojson`.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Layer::Roads => "roads",
            Layer::Pois => "pois",
            Layer::Cities => "cities",
            Layer::Counties => "counties",
            Layer::Districts => "districts",
            Layer::Subdistricts => "subdistricts",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.geojson", self.file_stem())
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Layer::Roads => 0,
            Layer::Pois => 1,
            Layer::Cities => 2,
            Layer::Counties => 3,
            Layer::Districts => 4,
            Layer::Subdistricts => 5,
        }
    }
}

/// Fetches the raw GeoJSON text of a layer.
#[async_trait]
pub trait GeometrySource: Send + Sync {
    async fn fetch(&self, layer: Layer) -> Result<String, GeometryError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Layers stored as `<root>/<layer>.geojson`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl GeometrySource for DirectorySource {
    async fn fetch(&self, layer: Layer) -> Result<String, GeometryError> {
        let path = self.root.join(layer.file_name());
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| GeometryError::Io {
                path: path.display().to_string(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Layers served as `<base_url>/<layer>.geojson`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    http: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GeometryError> {
        let base_url = base_url.into();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeometryError::Http {
                url: base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { base_url, http })
    }

    fn layer_url(&self, layer: Layer) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), layer.file_name())
    }
}

#[async_trait]
impl GeometrySource for HttpSource {
    async fn fetch(&self, layer: Layer) -> Result<String, GeometryError> {
        let url = self.layer_url(layer);
        let http_error = |message: String| GeometryError::Http {
            url: url.clone(),
            message,
        };

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| http_error(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(http_error(format!("HTTP {}", status)));
        }
        response.text().await.map_err(|e| http_error(e.to_string()))
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
