use geo::{Area, BooleanOps, MultiPolygon, Polygon, polygon};
use geojson::{Feature, Geometry, Value};
use serde_json::json;
use spatio_transform::compute::area::polygon_area;
use spatio_transform::compute::geojson::{feature_from_geojson, polygons_from_geometry};
use spatio_transform::{
    CircleOptions, Point, TransformError, Units, circle, circle_from_feature, intersect,
    length_to_degrees,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
    polygon![(x: x0, y: y0), (x: x1, y: y0), (x: x1, y: y1), (x: x0, y: y1)]
}

fn feature_area(feature: &Feature) -> f64 {
    let geometry = feature.geometry.as_ref().expect("result has geometry");
    polygons_from_geometry(geometry)
        .expect("result is polygonal")
        .iter()
        .map(polygon_area)
        .sum()
}

fn reference_area(a: &Polygon, b: &Polygon) -> f64 {
    MultiPolygon::new(vec![a.clone()])
        .intersection(&MultiPolygon::new(vec![b.clone()]))
        .unsigned_area()
}

#[test]
fn test_circle_ring_closed_with_step_count() {
    init_logger();

    for steps in [3, 10, 64, 100] {
        let options = CircleOptions::default().with_steps(steps);
        let feature = circle(&Point::new(-75.343, 39.984), 5.0, Some(&options)).unwrap();
        let Value::Polygon(rings) = feature.geometry.unwrap().value else {
            panic!("circle must be a Polygon");
        };
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), steps as usize + 1);
        assert_eq!(rings[0].first(), rings[0].last());
    }
}

#[test]
fn test_circle_bbox_matches_degree_radius() {
    let center = Point::new(-75.343, 39.984);
    for units in [Units::Kilometers, Units::Miles, Units::Meters, Units::Feet] {
        let options = CircleOptions::default().with_units(units);
        let feature = circle(&center, 5.0, Some(&options)).unwrap();
        let d = length_to_degrees(5.0, units);
        assert_eq!(
            feature.bbox.unwrap(),
            vec![center.x() - d, center.y() - d, center.x() + d, center.y() + d],
            "bbox for {}",
            units
        );
    }
}

#[test]
fn test_circle_non_positive_steps_match_default() {
    let center = Point::new(12.5, -8.25);
    let default = circle(&center, 3.0, None).unwrap();
    for steps in [0, -1, -64] {
        let options = CircleOptions::default().with_steps(steps);
        assert_eq!(circle(&center, 3.0, Some(&options)).unwrap(), default);
    }
}

#[test]
fn test_circle_from_parsed_feature() {
    let feature = feature_from_geojson(
        r#"{"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[-75.343,39.984]}}"#,
    )
    .unwrap();
    let options = CircleOptions::from_json(
        r##"{"steps": 10, "units": "kilometers", "properties": {"fill": "#F00"}}"##,
    )
    .unwrap();

    let result = circle_from_feature(&feature, 5.0, Some(&options)).unwrap();
    assert_eq!(result.property("fill"), Some(&json!("#F00")));
}

#[test]
fn test_circle_unknown_unit_name() {
    let err = CircleOptions::default().with_units_str("parsecs").unwrap_err();
    assert_eq!(err, TransformError::UnsupportedUnit("parsecs".to_string()));
}

#[test]
fn test_overlapping_squares() {
    init_logger();

    let result = intersect(square(0.0, 0.0, 10.0, 10.0), square(5.0, 5.0, 15.0, 15.0))
        .unwrap()
        .unwrap();
    assert_eq!(result.bbox, Some(vec![5.0, 5.0, 10.0, 10.0]));
    assert!((feature_area(&result) - 25.0).abs() < 1e-9);
    assert!(matches!(result.geometry.unwrap().value, Value::Polygon(_)));
}

#[test]
fn test_disjoint_squares() {
    let result = intersect(square(0.0, 0.0, 5.0, 5.0), square(10.0, 10.0, 15.0, 15.0)).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_self_intersection() {
    let shapes = [
        square(-3.0, -3.0, 3.0, 3.0),
        polygon![
            (x: 0.0, y: 0.0),
            (x: 30.0, y: 0.0),
            (x: 30.0, y: 20.0),
            (x: 20.0, y: 20.0),
            (x: 20.0, y: 5.0),
            (x: 10.0, y: 5.0),
            (x: 10.0, y: 20.0),
            (x: 0.0, y: 20.0),
        ],
    ];
    for shape in &shapes {
        let result = intersect(shape, shape).unwrap().expect("shape overlaps itself");
        assert!((feature_area(&result) - polygon_area(shape)).abs() < 1e-9);
    }
}

#[test]
fn test_intersection_is_commutative() {
    let options = CircleOptions::default().with_steps(32);
    let a = circle(&Point::new(0.0, 0.0), 100.0, Some(&options)).unwrap();
    let b = polygon![
        (x: 0.2, y: -2.0),
        (x: 2.0, y: -2.0),
        (x: 2.0, y: 2.0),
        (x: 0.2, y: 2.0),
        (x: 1.0, y: 0.0),
    ];

    let ab = intersect(&a, &b).unwrap().unwrap();
    let ba = intersect(&b, &a).unwrap().unwrap();
    assert!((feature_area(&ab) - feature_area(&ba)).abs() < 1e-9);

    let bbox_ab = ab.bbox.unwrap();
    let bbox_ba = ba.bbox.unwrap();
    for (x, y) in bbox_ab.iter().zip(&bbox_ba) {
        assert!((x - y).abs() < 1e-9);
    }
}

#[test]
fn test_concave_against_reference() {
    let comb = polygon![
        (x: 0.0, y: 0.0),
        (x: 10.0, y: 0.0),
        (x: 10.0, y: 10.0),
        (x: 8.0, y: 10.0),
        (x: 8.0, y: 3.0),
        (x: 6.0, y: 3.0),
        (x: 6.0, y: 10.0),
        (x: 4.0, y: 10.0),
        (x: 4.0, y: 3.0),
        (x: 2.0, y: 3.0),
        (x: 2.0, y: 10.0),
        (x: 0.0, y: 10.0),
    ];
    let diamond = polygon![
        (x: 5.0, y: 1.0),
        (x: 11.0, y: 6.0),
        (x: 5.0, y: 11.0),
        (x: -1.0, y: 6.0),
    ];

    let result = intersect(&comb, &diamond).unwrap().unwrap();
    let expected = reference_area(&comb, &diamond);
    assert!((feature_area(&result) - expected).abs() < 1e-6);

    // The comb's teeth come out as separate polygons.
    match result.geometry.unwrap().value {
        Value::MultiPolygon(polygons) => assert!(polygons.len() >= 2),
        other => panic!("expected MultiPolygon, got {:?}", other),
    }
}

#[test]
fn test_hole_carried_through() {
    let geometry: Geometry = serde_json::from_value(json!({
        "type": "Polygon",
        "coordinates": [
            [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
            [[3.0, 3.0], [3.0, 5.0], [5.0, 5.0], [5.0, 3.0], [3.0, 3.0]]
        ]
    }))
    .unwrap();
    let window = square(2.0, 2.0, 6.0, 6.0);

    let result = intersect(&geometry, &window).unwrap().unwrap();
    let Value::Polygon(rings) = result.geometry.as_ref().unwrap().value.clone() else {
        panic!("expected a single polygon");
    };
    assert_eq!(rings.len(), 2);
    assert!((feature_area(&result) - (16.0 - 4.0)).abs() < 1e-9);
}

#[test]
fn test_feature_inputs_drop_properties() {
    let mut a = Feature::from(Geometry::new(Value::Polygon(vec![vec![
        vec![0.0, 0.0],
        vec![4.0, 0.0],
        vec![4.0, 4.0],
        vec![0.0, 4.0],
        vec![0.0, 0.0],
    ]])));
    a.set_property("name", "left");

    let b = square(2.0, 2.0, 6.0, 6.0);
    let result = intersect(&a, &b).unwrap().unwrap();
    assert!(result.properties.is_none());
    assert!((feature_area(&result) - 4.0).abs() < 1e-9);
}

#[test]
fn test_overlapping_circles() {
    let options = CircleOptions::default().with_units(Units::Kilometers);
    let a = circle(&Point::new(-74.0060, 40.7128), 5.0, Some(&options)).unwrap();
    let b = circle(&Point::new(-73.9500, 40.7128), 5.0, Some(&options)).unwrap();
    let far = circle(&Point::new(-70.0, 40.7128), 5.0, Some(&options)).unwrap();

    let lens = intersect(&a, &b).unwrap().unwrap();
    let area = feature_area(&lens);
    assert!(area > 0.0);
    assert!(area < feature_area(&a));

    assert!(intersect(&a, &far).unwrap().is_none());
}
