//! Bounding boxes shared by the circle builder and the intersector.

use geo::{BoundingRect, LineString, Point, Rect};
use serde::{Deserialize, Serialize};

/// A 2D axis-aligned bounding box.
///
/// Wraps `geo::Rect`, so corners passed in the wrong order are normalized
/// and `min <= max` always holds. A single point gives a degenerate box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2D {
    /// The underlying geometric rectangle
    pub rect: Rect,
}

impl BoundingBox2D {
    /// Create a new bounding box from minimum and maximum coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use spatio_transform::types::BoundingBox2D;
    ///
    /// let bbox = BoundingBox2D::new(-74.0, 40.7, -73.9, 40.8);
    /// assert_eq!(bbox.to_bbox(), vec![-74.0, 40.7, -73.9, 40.8]);
    /// ```
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            rect: Rect::new(
                geo::coord! { x: min_x, y: min_y },
                geo::coord! { x: max_x, y: max_y },
            ),
        }
    }

    /// Create a bounding box from a `geo::Rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self { rect }
    }

    /// Bounding box of a ring, `None` for an empty ring.
    pub fn from_ring(ring: &LineString) -> Option<Self> {
        ring.bounding_rect().map(Self::from_rect)
    }

    /// Square box of half-width `radius` around `center`.
    pub fn around(center: &Point, radius: f64) -> Self {
        Self::new(
            center.x() - radius,
            center.y() - radius,
            center.x() + radius,
            center.y() + radius,
        )
    }

    /// GeoJSON `bbox` member: `[min_x, min_y, max_x, max_y]`.
    pub fn to_bbox(&self) -> Vec<f64> {
        vec![self.min_x(), self.min_y(), self.max_x(), self.max_y()]
    }

    pub fn min_x(&self) -> f64 {
        self.rect.min().x
    }

    pub fn min_y(&self) -> f64 {
        self.rect.min().y
    }

    pub fn max_x(&self) -> f64 {
        self.rect.max().x
    }

    pub fn max_y(&self) -> f64 {
        self.rect.max().y
    }

    pub fn width(&self) -> f64 {
        self.max_x() - self.min_x()
    }

    pub fn height(&self) -> f64 {
        self.max_y() - self.min_y()
    }

    /// Check if this bounding box intersects with another.
    ///
    /// Touching edges count as intersecting.
    pub fn intersects(&self, other: &BoundingBox2D) -> bool {
        !(self.max_x() < other.min_x()
            || other.max_x() < self.min_x()
            || self.max_y() < other.min_y()
            || other.max_y() < self.min_y())
    }

    /// Smallest box covering both boxes.
    pub fn union(&self, other: &BoundingBox2D) -> Self {
        Self::new(
            self.min_x().min(other.min_x()),
            self.min_y().min(other.min_y()),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }
}
