//! Geometry lookup contract consumed by the query builder.

use async_trait::async_trait;

use super::{Feature, LatLng, Position};

/// Kind of administrative boundary a name can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    City,
    County,
    District,
    Subdistrict,
}

impl BoundaryKind {
    /// Order in which the subdivision half of an intersection is tried.
    pub const FALLBACK_ORDER: [BoundaryKind; 4] = [
        BoundaryKind::City,
        BoundaryKind::County,
        BoundaryKind::District,
        BoundaryKind::Subdistrict,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryKind::City => "city",
            BoundaryKind::County => "county",
            BoundaryKind::District => "district",
            BoundaryKind::Subdistrict => "subdistrict",
        }
    }
}

/// Resolves named places to geometry.
///
/// Every method returns `None` on a miss; callers treat that as "no
/// constraint" rather than an error.
#[async_trait]
pub trait GeometryLookup: Send + Sync {
    /// Road centreline as MultiLineString coordinates.
    async fn road_coordinates(&self, name: &str) -> Option<Vec<Vec<Position>>>;

    async fn city_boundary(&self, name: &str) -> Option<Feature>;

    async fn county_boundary(&self, name: &str) -> Option<Feature>;

    async fn district_boundary(&self, name: &str) -> Option<Feature>;

    async fn subdistrict_boundary(&self, name: &str) -> Option<Feature>;

    async fn poi_coordinates(&self, name: &str) -> Option<LatLng>;

    /// Dispatch to the boundary lookup for `kind`.
    async fn boundary(&self, kind: BoundaryKind, name: &str) -> Option<Feature> {
        match kind {
            BoundaryKind::City => self.city_boundary(name).await,
            BoundaryKind::County => self.county_boundary(name).await,
            BoundaryKind::District => self.district_boundary(name).await,
            BoundaryKind::Subdistrict => self.subdistrict_boundary(name).await,
        }
    }
}
