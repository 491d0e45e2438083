//! Geometry computation behind the transformations.
//!
//! - `area`: shoelace areas and bounding boxes
//! - `clip`: polygon clipping
//! - `geojson`: GeoJSON to `geo` conversion
//! - `validation`: finiteness checks on inputs
//!
//! Everything here works on `geo` types; GeoJSON only appears at the
//! conversion boundary.

pub mod area;
pub mod clip;
pub mod geojson;
pub mod validation;
