//! Circle construction and polygon intersection over GeoJSON features.
//!
//! ```rust
//! use spatio_transform::{CircleOptions, Point, Units, circle, intersect};
//!
//! let options = CircleOptions::default().with_units(Units::Kilometers);
//! let a = circle(&Point::new(-74.0060, 40.7128), 5.0, Some(&options))?;
//! let b = circle(&Point::new(-73.9500, 40.7128), 5.0, Some(&options))?;
//!
//! let overlap = intersect(&a, &b)?;
//! assert!(overlap.is_some());
//! # Ok::<(), spatio_transform::TransformError>(())
//! ```

pub mod compute;
pub mod config;
pub mod error;
pub mod transformation;
pub mod types;
pub mod units;

pub use config::CircleOptions;
pub use error::{Result, TransformError};
pub use types::BoundingBox2D;
pub use units::{Units, length_to_degrees};

pub use geo::{MultiPolygon, Point, Polygon};
pub use geojson::{Feature, Geometry};

pub use transformation::{
    PolygonInput, circle, circle_from_coordinates, circle_from_feature, circle_from_geometry,
    intersect,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{CircleOptions, Result, TransformError, Units};

    pub use geo::{MultiPolygon, Point, Polygon};

    pub use geojson::{Feature, Geometry};

    pub use crate::transformation::{
        PolygonInput, circle, circle_from_coordinates, circle_from_feature,
        circle_from_geometry, intersect,
    };
}
