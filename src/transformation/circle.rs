//! Circle approximation around a center point.
//!
//! The circle lives in planar degree space: the radius is turned into an
//! angular offset once and applied equally to longitude and latitude, so
//! shapes stretch east-west as latitude grows.

use crate::compute::geojson::point_from_geometry;
use crate::compute::validation::{validate_point, validate_radius};
use crate::config::CircleOptions;
use crate::error::{Result, TransformError};
use crate::types::BoundingBox2D;
use crate::units::length_to_degrees;
use geo::Point;
use geojson::{Feature, Geometry, Position, Value};
use std::f64::consts::PI;

/// Ring of `steps` vertices plus the closing vertex.
fn circle_ring(center: &Point, radius_deg: f64, steps: usize) -> Vec<Position> {
    let mut ring = Vec::with_capacity(steps + 1);
    for i in 0..steps {
        let angle = i as f64 * 2.0 * PI / steps as f64;
        ring.push(vec![
            center.x() + radius_deg * angle.cos(),
            center.y() + radius_deg * angle.sin(),
        ]);
    }
    if let Some(first) = ring.first().cloned() {
        ring.push(first);
    }
    ring
}

/// Builds a polygon feature approximating a circle.
///
/// `radius` is measured in `options.units` (kilometers by default). The
/// feature carries a square bounding box circumscribing the circle and the
/// option properties, if any.
///
/// A zero radius collapses the ring onto the center. A negative radius
/// traces the same ring starting from the opposite side.
///
/// # Examples
///
/// ```
/// use spatio_transform::{circle, CircleOptions, Point, Units};
///
/// let options = CircleOptions::default().with_steps(16).with_units(Units::Miles);
/// let feature = circle(&Point::new(-75.343, 39.984), 5.0, Some(&options))?;
///
/// assert_eq!(feature.bbox.as_ref().map(Vec::len), Some(4));
/// # Ok::<(), spatio_transform::TransformError>(())
/// ```
pub fn circle(center: &Point, radius: f64, options: Option<&CircleOptions>) -> Result<Feature> {
    validate_point(center)?;
    validate_radius(radius)?;

    let defaults = CircleOptions::default();
    let options = options.unwrap_or(&defaults);
    let steps = options.effective_steps();
    let radius_deg = length_to_degrees(radius, options.units);

    log::trace!(
        "Building circle at ({}, {}) with radius {} {} ({} deg), {} steps",
        center.x(),
        center.y(),
        radius,
        options.units,
        radius_deg,
        steps
    );

    let ring = circle_ring(center, radius_deg, steps);
    let bbox = BoundingBox2D::around(center, radius_deg);

    Ok(Feature {
        bbox: Some(bbox.to_bbox()),
        geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
        id: None,
        properties: options.properties.clone(),
        foreign_members: None,
    })
}

/// [`circle`] centered on a `[lng, lat]` pair.
pub fn circle_from_coordinates(
    coordinates: &[f64],
    radius: f64,
    options: Option<&CircleOptions>,
) -> Result<Feature> {
    let [lng, lat] = coordinates else {
        return Err(TransformError::InvalidInput(format!(
            "Center must have exactly 2 coordinates, got {}",
            coordinates.len()
        )));
    };
    circle(&Point::new(*lng, *lat), radius, options)
}

/// [`circle`] centered on a Point feature.
///
/// A feature with a null geometry is rejected as `InvalidInput`.
pub fn circle_from_feature(
    feature: &Feature,
    radius: f64,
    options: Option<&CircleOptions>,
) -> Result<Feature> {
    let geometry = feature.geometry.as_ref().ok_or_else(|| {
        TransformError::InvalidInput("Feature has no geometry".to_string())
    })?;
    circle_from_geometry(geometry, radius, options)
}

/// [`circle`] centered on a Point geometry.
pub fn circle_from_geometry(
    geometry: &Geometry,
    radius: f64,
    options: Option<&CircleOptions>,
) -> Result<Feature> {
    let center = point_from_geometry(geometry)?;
    circle(&center, radius, options)
}
