//! Spatial join conditions from location selections.

use tracing::debug;

use crate::geometry::{simplify_ring, BoundaryKind, Geometry, GeometryLookup};
use crate::query::{Expression, Logic, QueryFilter};
use crate::types::{LocationFilter, LocationSelection};

/// Proximity distance applied around a precomputed intersection line.
pub const INTERSECTION_BUFFER: &str = "0.25";

/// Expressions produced by one location selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSelection {
    pub expressions: Vec<Expression>,
    /// The whole spatial group must combine with AND.
    pub forces_and: bool,
}

impl ResolvedSelection {
    fn single(expression: Expression) -> Self {
        Self {
            expressions: vec![expression],
            forces_and: false,
        }
    }
}

/// Radius rendered the way the API expects distances.
pub fn format_distance(radius: f64) -> String {
    radius.to_string()
}

async fn boundary_geometry(
    lookup: &dyn GeometryLookup,
    kind: BoundaryKind,
    name: &str,
) -> Option<Geometry> {
    let geometry = lookup.boundary(kind, name).await?.geometry?;
    Some(geometry.simplified())
}

async fn road_geometry(lookup: &dyn GeometryLookup, name: &str) -> Option<Geometry> {
    let lines = lookup.road_coordinates(name).await?;
    if lines.is_empty() {
        return None;
    }
    Some(Geometry::MultiLineString { coordinates: lines })
}

async fn resolve_intersection(
    lookup: &dyn GeometryLookup,
    road: &str,
    subdivision: &str,
) -> Option<ResolvedSelection> {
    let road_geometry = road_geometry(lookup, road).await?;

    let mut subdivision_geometry = None;
    for kind in BoundaryKind::FALLBACK_ORDER {
        if let Some(geometry) = boundary_geometry(lookup, kind, subdivision).await {
            debug!(subdivision, kind = kind.as_str(), "intersection subdivision resolved");
            subdivision_geometry = Some(geometry);
            break;
        }
    }

    Some(ResolvedSelection {
        expressions: vec![
            Expression::intersects(road_geometry),
            Expression::intersects(subdivision_geometry?),
        ],
        forces_and: true,
    })
}

/// Resolve one selection to its spatial expressions.
///
/// `None` means the selection could not be resolved and contributes nothing.
pub async fn resolve_selection(
    selection: &LocationSelection,
    lookup: &dyn GeometryLookup,
) -> Option<ResolvedSelection> {
    match selection {
        LocationSelection::Road { name } => {
            road_geometry(lookup, name).await.map(|g| ResolvedSelection::single(Expression::intersects(g)))
        }
        LocationSelection::City { name } => boundary_geometry(lookup, BoundaryKind::City, name)
            .await
            .map(|g| ResolvedSelection::single(Expression::intersects(g))),
        LocationSelection::County { name } => boundary_geometry(lookup, BoundaryKind::County, name)
            .await
            .map(|g| ResolvedSelection::single(Expression::intersects(g))),
        LocationSelection::District { name } => {
            boundary_geometry(lookup, BoundaryKind::District, name)
                .await
                .map(|g| ResolvedSelection::single(Expression::intersects(g)))
        }
        LocationSelection::Subdistrict { name } => {
            boundary_geometry(lookup, BoundaryKind::Subdistrict, name)
                .await
                .map(|g| ResolvedSelection::single(Expression::intersects(g)))
        }
        LocationSelection::Poi { name, radius } => {
            let point = lookup.poi_coordinates(name).await?.to_point();
            Some(ResolvedSelection::single(Expression::within_distance(
                point,
                format_distance(*radius),
            )))
        }
        LocationSelection::Polygon { coordinates } => {
            if coordinates.is_empty() {
                return None;
            }
            let polygon = Geometry::Polygon {
                coordinates: vec![simplify_ring(coordinates)],
            };
            Some(ResolvedSelection::single(Expression::intersects(polygon)))
        }
        LocationSelection::Intersection {
            coordinates: Some(line),
            ..
        } if !line.is_empty() => {
            let line = Geometry::LineString {
                coordinates: line.clone(),
            };
            Some(ResolvedSelection::single(Expression::within_distance(
                line,
                INTERSECTION_BUFFER,
            )))
        }
        LocationSelection::Intersection { .. } => {
            let (road, subdivision) = selection.intersection_parts()?;
            resolve_intersection(lookup, road, subdivision).await
        }
    }
}

/// Build the spatial join conditions.
///
/// Selections are resolved one at a time, in order. Unresolvable selections
/// are skipped. Returns `None` when nothing resolved.
pub async fn build_spatial_conditions(
    filter: &LocationFilter,
    lookup: &dyn GeometryLookup,
) -> Option<Vec<QueryFilter>> {
    let mut expressions = Vec::new();
    let mut forces_and = false;

    for selection in &filter.selections {
        match resolve_selection(selection, lookup).await {
            Some(resolved) => {
                forces_and |= resolved.forces_and;
                expressions.extend(resolved.expressions);
            }
            None => debug!(selection = %selection, "location did not resolve, skipping"),
        }
    }

    if expressions.is_empty() {
        return None;
    }

    let logic = if forces_and { Logic::And } else { filter.logic };
    Some(vec![QueryFilter::new(expressions, logic)])
}
