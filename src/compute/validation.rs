//! Validation for coordinates and scalar inputs.
//!
//! Coordinates live in a planar degree space here, so only finiteness is
//! checked. Longitudes past 180 are accepted as-is.

use crate::error::{Result, TransformError};
use geo::{Coord, Point, Polygon};

/// Validates that a point has finite coordinates.
///
/// # Examples
///
/// ```
/// use spatio_transform::compute::validation::validate_point;
/// use geo::Point;
///
/// assert!(validate_point(&Point::new(-74.0060, 40.7128)).is_ok());
/// assert!(validate_point(&Point::new(f64::NAN, 40.0)).is_err());
/// ```
pub fn validate_point(point: &Point) -> Result<()> {
    let (x, y) = (point.x(), point.y());

    if !x.is_finite() {
        return Err(TransformError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            x
        )));
    }

    if !y.is_finite() {
        return Err(TransformError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            y
        )));
    }

    Ok(())
}

/// Validates a radius. Zero and negative values are allowed.
pub fn validate_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() {
        return Err(TransformError::InvalidInput(format!(
            "Radius must be finite, got: {}",
            radius
        )));
    }
    Ok(())
}

fn validate_coord(coord: &Coord, ring: &str, idx: usize) -> Result<()> {
    if coord.x.is_finite() && coord.y.is_finite() {
        return Ok(());
    }
    Err(TransformError::CoordinateFormat(format!(
        "{} point at index {} is not finite: ({}, {})",
        ring, idx, coord.x, coord.y
    )))
}

/// Validates all polygon coordinates (exterior and interior rings).
pub fn validate_polygon(polygon: &Polygon) -> Result<()> {
    for (idx, coord) in polygon.exterior().coords().enumerate() {
        validate_coord(coord, "Exterior ring", idx)?;
    }

    for (ring_idx, interior) in polygon.interiors().iter().enumerate() {
        let ring = format!("Interior ring {}", ring_idx);
        for (idx, coord) in interior.coords().enumerate() {
            validate_coord(coord, &ring, idx)?;
        }
    }

    Ok(())
}
