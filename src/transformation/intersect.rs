//! Intersection of polygonal features and geometries.

use crate::compute::area::{exterior_bbox, polygons_bbox};
use crate::compute::clip::polygon_intersection;
use crate::compute::geojson::{polygons_from_geometry, polygons_to_value};
use crate::compute::validation::validate_polygon;
use crate::error::{Result, TransformError};
use geo::{MultiPolygon, Polygon};
use geojson::{Feature, Geometry};
use std::borrow::Cow;

/// A polygonal argument to [`intersect`].
///
/// Accepts a feature or geometry holding a Polygon or MultiPolygon, or the
/// `geo` types directly, owned or borrowed. Any other geometry kind is
/// rejected when the input is resolved.
#[derive(Debug, Clone)]
pub enum PolygonInput<'a> {
    Feature(Cow<'a, Feature>),
    Geometry(Cow<'a, Geometry>),
    Polygon(Cow<'a, Polygon>),
    MultiPolygon(Cow<'a, MultiPolygon>),
}

macro_rules! impl_polygon_input {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for PolygonInput<'static> {
                fn from(value: $ty) -> Self {
                    PolygonInput::$variant(Cow::Owned(value))
                }
            }

            impl<'a> From<&'a $ty> for PolygonInput<'a> {
                fn from(value: &'a $ty) -> Self {
                    PolygonInput::$variant(Cow::Borrowed(value))
                }
            }
        )*
    };
}

impl_polygon_input! {
    Feature => Feature,
    Geometry => Geometry,
    Polygon => Polygon,
    MultiPolygon => MultiPolygon,
}

impl PolygonInput<'_> {
    /// Resolves the input into its member polygons.
    pub fn into_polygons(self) -> Result<Vec<Polygon>> {
        let polygons = match self {
            PolygonInput::Feature(feature) => {
                let geometry = feature.geometry.as_ref().ok_or_else(|| {
                    TransformError::InvalidInput("Feature has no geometry".to_string())
                })?;
                polygons_from_geometry(geometry)?
            }
            PolygonInput::Geometry(geometry) => polygons_from_geometry(&geometry)?,
            PolygonInput::Polygon(polygon) => vec![polygon.into_owned()],
            PolygonInput::MultiPolygon(multi) => multi.into_owned().0,
        };

        for polygon in &polygons {
            validate_polygon(polygon)?;
        }
        Ok(polygons)
    }
}

/// Clips every polygon of `left` against every polygon of `right`.
///
/// Pairs whose exterior bounding boxes do not overlap are skipped without
/// clipping.
pub fn intersect_polygons(left: &[Polygon], right: &[Polygon]) -> Vec<Polygon> {
    let mut result = Vec::new();

    for (i, p) in left.iter().enumerate() {
        let Some(p_bbox) = exterior_bbox(p) else {
            continue;
        };
        for (j, q) in right.iter().enumerate() {
            let Some(q_bbox) = exterior_bbox(q) else {
                continue;
            };
            if !p_bbox.intersects(&q_bbox) {
                log::trace!("Skipping pair ({}, {}): bounding boxes are disjoint", i, j);
                continue;
            }
            result.extend(polygon_intersection(p, q));
        }
    }

    result
}

/// Computes the region shared by two polygonal inputs.
///
/// Returns `Ok(None)` when the inputs share no area, including when either
/// side is an empty polygon. A single resulting polygon comes back as a
/// Polygon feature, several as a MultiPolygon feature. The feature's bbox
/// spans all result polygons; input properties are not carried over.
///
/// # Errors
///
/// - `InvalidInput` for a feature without geometry
/// - `InvalidGeometryType` for anything but Polygon or MultiPolygon
/// - `CoordinateFormat` for malformed or non-finite positions
///
/// # Examples
///
/// ```
/// use spatio_transform::intersect;
/// use geo::polygon;
///
/// let a = polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0)];
/// let b = polygon![(x: 5.0, y: 5.0), (x: 15.0, y: 5.0), (x: 15.0, y: 15.0), (x: 5.0, y: 15.0)];
///
/// let feature = intersect(&a, &b)?.expect("squares overlap");
/// assert_eq!(feature.bbox, Some(vec![5.0, 5.0, 10.0, 10.0]));
/// # Ok::<(), spatio_transform::TransformError>(())
/// ```
pub fn intersect<'a, 'b>(
    a: impl Into<PolygonInput<'a>>,
    b: impl Into<PolygonInput<'b>>,
) -> Result<Option<Feature>> {
    let left = a.into().into_polygons()?;
    let right = b.into().into_polygons()?;

    let pieces = intersect_polygons(&left, &right);
    log::debug!(
        "Intersected {} x {} polygons into {} pieces",
        left.len(),
        right.len(),
        pieces.len()
    );

    let Some(bbox) = polygons_bbox(&pieces) else {
        return Ok(None);
    };

    Ok(Some(Feature {
        bbox: Some(bbox.to_bbox()),
        geometry: Some(Geometry::new(polygons_to_value(&pieces))),
        id: None,
        properties: None,
        foreign_members: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;
    use geojson::Value;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
        polygon![(x: x0, y: y0), (x: x1, y: y0), (x: x1, y: y1), (x: x0, y: y1)]
    }

    #[test]
    fn test_input_from_conversions() {
        let polygon = square(0.0, 0.0, 1.0, 1.0);
        assert!(matches!(
            PolygonInput::from(&polygon),
            PolygonInput::Polygon(Cow::Borrowed(_))
        ));
        assert!(matches!(
            PolygonInput::from(polygon.clone()),
            PolygonInput::Polygon(Cow::Owned(_))
        ));

        let multi = MultiPolygon::new(vec![polygon]);
        assert_eq!(PolygonInput::from(&multi).into_polygons().unwrap().len(), 1);
    }

    #[test]
    fn test_feature_without_geometry() {
        let err = PolygonInput::from(Feature::default())
            .into_polygons()
            .unwrap_err();
        assert!(matches!(err, TransformError::InvalidInput(_)));
    }

    #[test]
    fn test_point_geometry_rejected() {
        let point = Geometry::new(Value::Point(vec![0.0, 0.0]));
        let err = intersect(&point, square(0.0, 0.0, 1.0, 1.0)).unwrap_err();
        assert_eq!(
            err,
            TransformError::geometry_type("Polygon or MultiPolygon", "Point")
        );
    }

    #[test]
    fn test_non_finite_polygon_rejected() {
        let bad = square(0.0, 0.0, f64::NAN, 1.0);
        assert!(matches!(
            intersect(&bad, &square(0.0, 0.0, 1.0, 1.0)),
            Err(TransformError::CoordinateFormat(_))
        ));
    }

    #[test]
    fn test_bbox_reject_skips_clipping() {
        let left = [square(0.0, 0.0, 1.0, 1.0)];
        let right = [square(2.0, 2.0, 3.0, 3.0)];
        assert!(intersect_polygons(&left, &right).is_empty());
    }

    #[test]
    fn test_multipolygon_pairs() {
        let left = MultiPolygon::new(vec![square(0.0, 0.0, 4.0, 4.0), square(10.0, 0.0, 14.0, 4.0)]);
        let band = square(-1.0, 1.0, 15.0, 3.0);

        let feature = intersect(&left, &band).unwrap().unwrap();
        match feature.geometry.unwrap().value {
            Value::MultiPolygon(polygons) => assert_eq!(polygons.len(), 2),
            other => panic!("expected MultiPolygon, got {:?}", other),
        }
        assert_eq!(feature.bbox, Some(vec![0.0, 1.0, 14.0, 3.0]));
        assert!(feature.properties.is_none());
    }

    #[test]
    fn test_empty_polygon_gives_none() {
        let empty = Polygon::new(geo::LineString::new(Vec::new()), Vec::new());
        assert_eq!(intersect(&empty, &square(0.0, 0.0, 1.0, 1.0)).unwrap(), None);
        assert_eq!(intersect(&square(0.0, 0.0, 1.0, 1.0), &empty).unwrap(), None);
    }
}
