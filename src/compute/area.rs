//! Planar ring area and bounding-box helpers.
//!
//! Areas are in squared coordinate units (square degrees for lon/lat
//! input), not square meters.

use crate::types::BoundingBox2D;
use geo::{Coord, LineString, Polygon};

/// Signed shoelace area of a vertex loop.
///
/// Positive for counter-clockwise loops, negative for clockwise ones.
/// The loop may be open or closed; a closing vertex adds nothing. Fewer
/// than three vertices give zero.
///
/// Vertices are taken relative to the first one, so small rings far from
/// the origin keep their precision.
///
/// # Examples
///
/// ```
/// use spatio_transform::compute::area::signed_ring_area;
/// use geo::coord;
///
/// let ccw = [
///     coord! { x: 0.0, y: 0.0 },
///     coord! { x: 4.0, y: 0.0 },
///     coord! { x: 4.0, y: 3.0 },
///     coord! { x: 0.0, y: 3.0 },
/// ];
/// assert_eq!(signed_ring_area(&ccw), 12.0);
/// ```
pub fn signed_ring_area(ring: &[Coord]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }

    let origin = ring[0];
    let mut sum = 0.0;
    for i in 1..n - 1 {
        let (ax, ay) = (ring[i].x - origin.x, ring[i].y - origin.y);
        let (bx, by) = (ring[i + 1].x - origin.x, ring[i + 1].y - origin.y);
        sum += ax * by - bx * ay;
    }
    sum / 2.0
}

/// Unsigned area of a ring.
pub fn ring_area(ring: &LineString) -> f64 {
    signed_ring_area(&ring.0).abs()
}

/// Area of the exterior minus the areas of all holes.
pub fn polygon_area(polygon: &Polygon) -> f64 {
    let holes: f64 = polygon.interiors().iter().map(ring_area).sum();
    ring_area(polygon.exterior()) - holes
}

/// Bounding box of a polygon's exterior ring, `None` when the polygon is empty.
pub fn exterior_bbox(polygon: &Polygon) -> Option<BoundingBox2D> {
    BoundingBox2D::from_ring(polygon.exterior())
}

/// Union of the exterior bounding boxes of all polygons.
pub fn polygons_bbox(polygons: &[Polygon]) -> Option<BoundingBox2D> {
    polygons
        .iter()
        .filter_map(exterior_bbox)
        .reduce(|acc, bbox| acc.union(&bbox))
}
