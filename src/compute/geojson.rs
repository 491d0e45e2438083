//! GeoJSON conversion for points and polygonal geometries.

use crate::error::{Result, TransformError};
use geo::{Coord, LineString, Point, Polygon};
use geojson::{Feature, Geometry, PolygonType, Position, Value};

/// GeoJSON type tag of a geometry value.
pub fn geometry_type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

/// Reads a position. Values past the second (altitude) are ignored.
pub fn coord_from_position(position: &[f64]) -> Result<Coord> {
    if position.len() < 2 {
        return Err(TransformError::CoordinateFormat(format!(
            "Position must have at least 2 values, got {}",
            position.len()
        )));
    }
    let (x, y) = (position[0], position[1]);
    if !x.is_finite() || !y.is_finite() {
        return Err(TransformError::CoordinateFormat(format!(
            "Position values must be finite, got [{}, {}]",
            x, y
        )));
    }
    Ok(Coord { x, y })
}

/// Extracts the point of a Point geometry.
pub fn point_from_geometry(geometry: &Geometry) -> Result<Point> {
    match &geometry.value {
        Value::Point(position) => Ok(Point::from(coord_from_position(position)?)),
        other => Err(TransformError::geometry_type(
            "Point",
            geometry_type_name(other),
        )),
    }
}

fn ring_from_positions(positions: &[Position]) -> Result<LineString> {
    positions
        .iter()
        .map(|position| coord_from_position(position))
        .collect::<Result<Vec<_>>>()
        .map(LineString::from)
}

/// Builds a polygon from GeoJSON rings. No rings gives an empty polygon.
pub fn polygon_from_rings(rings: &PolygonType) -> Result<Polygon> {
    let Some((exterior, interiors)) = rings.split_first() else {
        return Ok(Polygon::new(LineString::new(Vec::new()), Vec::new()));
    };

    let exterior = ring_from_positions(exterior)?;
    let interiors = interiors
        .iter()
        .map(|ring| ring_from_positions(ring))
        .collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, interiors))
}

/// Lists the polygons of a Polygon or MultiPolygon geometry.
pub fn polygons_from_geometry(geometry: &Geometry) -> Result<Vec<Polygon>> {
    match &geometry.value {
        Value::Polygon(rings) => Ok(vec![polygon_from_rings(rings)?]),
        Value::MultiPolygon(polygons) => polygons.iter().map(polygon_from_rings).collect(),
        other => Err(TransformError::geometry_type(
            "Polygon or MultiPolygon",
            geometry_type_name(other),
        )),
    }
}

fn ring_to_positions(ring: &LineString) -> Vec<Position> {
    ring.coords().map(|coord| vec![coord.x, coord.y]).collect()
}

/// GeoJSON rings of a polygon, exterior first. An empty polygon has no rings.
pub fn polygon_to_rings(polygon: &Polygon) -> PolygonType {
    if polygon.exterior().0.is_empty() {
        return Vec::new();
    }

    let mut rings = Vec::with_capacity(1 + polygon.interiors().len());
    rings.push(ring_to_positions(polygon.exterior()));
    rings.extend(polygon.interiors().iter().map(ring_to_positions));
    rings
}

/// Polygon value for a single polygon, MultiPolygon value otherwise.
pub fn polygons_to_value(polygons: &[Polygon]) -> Value {
    match polygons {
        [polygon] => Value::Polygon(polygon_to_rings(polygon)),
        _ => Value::MultiPolygon(polygons.iter().map(polygon_to_rings).collect()),
    }
}

/// Parses a GeoJSON Feature.
pub fn feature_from_geojson(geojson: &str) -> Result<Feature> {
    serde_json::from_str(geojson)
        .map_err(|e| TransformError::Serialization(format!("Failed to parse feature: {}", e)))
}

/// Parses a bare GeoJSON geometry.
pub fn geometry_from_geojson(geojson: &str) -> Result<Geometry> {
    serde_json::from_str(geojson)
        .map_err(|e| TransformError::Serialization(format!("Failed to parse geometry: {}", e)))
}

/// Serializes a feature to a GeoJSON string.
pub fn feature_to_geojson(feature: &Feature) -> Result<String> {
    serde_json::to_string(feature).map_err(|e| {
        TransformError::Serialization(format!("Failed to serialize feature: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    #[test]
    fn test_coord_from_position() {
        assert_eq!(
            coord_from_position(&[1.0, 2.0]).unwrap(),
            Coord { x: 1.0, y: 2.0 }
        );
        // Altitude is dropped.
        assert_eq!(
            coord_from_position(&[1.0, 2.0, 30.0]).unwrap(),
            Coord { x: 1.0, y: 2.0 }
        );
        assert!(matches!(
            coord_from_position(&[1.0]),
            Err(TransformError::CoordinateFormat(_))
        ));
        assert!(matches!(
            coord_from_position(&[1.0, f64::INFINITY]),
            Err(TransformError::CoordinateFormat(_))
        ));
    }

    #[test]
    fn test_point_from_geometry() {
        let geom = Geometry::new(Value::Point(vec![-75.343, 39.984]));
        let point = point_from_geometry(&geom).unwrap();
        assert_eq!(point.x(), -75.343);
        assert_eq!(point.y(), 39.984);

        let line = Geometry::new(Value::LineString(vec![vec![0.0, 0.0], vec![1.0, 1.0]]));
        assert_eq!(
            point_from_geometry(&line).unwrap_err(),
            TransformError::geometry_type("Point", "LineString")
        );
    }

    #[test]
    fn test_polygon_from_rings_with_hole() {
        let rings = vec![
            vec![
                vec![0.0, 0.0],
                vec![10.0, 0.0],
                vec![10.0, 10.0],
                vec![0.0, 10.0],
                vec![0.0, 0.0],
            ],
            vec![
                vec![2.0, 2.0],
                vec![2.0, 4.0],
                vec![4.0, 4.0],
                vec![2.0, 2.0],
            ],
        ];
        let polygon = polygon_from_rings(&rings).unwrap();
        assert_eq!(polygon.exterior().0.len(), 5);
        assert_eq!(polygon.interiors().len(), 1);
    }

    #[test]
    fn test_polygon_from_rings_malformed() {
        let rings = vec![vec![vec![0.0, 0.0], vec![10.0], vec![10.0, 10.0]]];
        assert!(matches!(
            polygon_from_rings(&rings),
            Err(TransformError::CoordinateFormat(_))
        ));
    }

    #[test]
    fn test_empty_polygon_has_no_rings() {
        let polygon = polygon_from_rings(&Vec::new()).unwrap();
        assert!(polygon.exterior().0.is_empty());
        assert!(polygon_to_rings(&polygon).is_empty());
    }

    #[test]
    fn test_polygons_from_geometry_rejects_points() {
        let geom = Geometry::new(Value::Point(vec![0.0, 0.0]));
        assert!(matches!(
            polygons_from_geometry(&geom),
            Err(TransformError::InvalidGeometryType { .. })
        ));
    }

    #[test]
    fn test_polygons_to_value() {
        let a: Polygon = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)];
        let b: Polygon = polygon![(x: 5.0, y: 5.0), (x: 6.0, y: 5.0), (x: 6.0, y: 6.0)];

        match polygons_to_value(std::slice::from_ref(&a)) {
            Value::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                // geo closes the ring.
                assert_eq!(rings[0].len(), 4);
                assert_eq!(rings[0][0], rings[0][3]);
            }
            other => panic!("expected Polygon, got {}", geometry_type_name(&other)),
        }

        match polygons_to_value(&[a, b]) {
            Value::MultiPolygon(polygons) => assert_eq!(polygons.len(), 2),
            other => panic!("expected MultiPolygon, got {}", geometry_type_name(&other)),
        }
    }

    #[test]
    fn test_feature_string_roundtrip() {
        let json = r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[1.5,2.5]},"properties":{"name":"here"}}"#;
        let feature = feature_from_geojson(json).unwrap();
        let text = feature_to_geojson(&feature).unwrap();
        assert!(text.contains("\"Point\""));
        assert!(text.contains("here"));

        assert!(matches!(
            feature_from_geojson("not json"),
            Err(TransformError::Serialization(_))
        ));
    }
}
