//! GeoJSON-level transformations: circle construction and polygon
//! intersection.

pub mod circle;
pub mod intersect;

pub use circle::{circle, circle_from_coordinates, circle_from_feature, circle_from_geometry};
pub use intersect::{PolygonInput, intersect, intersect_polygons};
