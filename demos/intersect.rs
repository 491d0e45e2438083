use geo::polygon;
use spatio_transform::compute::geojson::{feature_to_geojson, geometry_from_geojson};
use spatio_transform::{CircleOptions, Point, circle, intersect};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug to see detailed logs)
    env_logger::init();

    println!("=== spatio-transform - Intersections ===\n");

    // Two overlapping squares
    let a = polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0)];
    let b = polygon![(x: 5.0, y: 5.0), (x: 15.0, y: 5.0), (x: 15.0, y: 15.0), (x: 5.0, y: 15.0)];
    match intersect(&a, &b)? {
        Some(feature) => println!("1. Squares overlap: {}\n", feature_to_geojson(&feature)?),
        None => println!("1. Squares do not overlap\n"),
    }

    // A holed polygon against a window covering the hole
    let holed = geometry_from_geojson(
        r#"{"type":"Polygon","coordinates":[
            [[0,0],[10,0],[10,10],[0,10],[0,0]],
            [[3,3],[3,5],[5,5],[5,3],[3,3]]
        ]}"#,
    )?;
    let window = polygon![(x: 2.0, y: 2.0), (x: 6.0, y: 2.0), (x: 6.0, y: 6.0), (x: 2.0, y: 6.0)];
    if let Some(feature) = intersect(&holed, &window)? {
        println!("2. Window over a hole: {}\n", feature_to_geojson(&feature)?);
    }

    // Two circles a few kilometers apart
    let options = CircleOptions::default().with_steps(32);
    let left = circle(&Point::new(-74.0060, 40.7128), 5.0, Some(&options))?;
    let right = circle(&Point::new(-73.9500, 40.7128), 5.0, Some(&options))?;
    let lens = intersect(&left, &right)?;
    println!(
        "3. Circle lens bbox: {:?}",
        lens.and_then(|f| f.bbox).unwrap_or_default()
    );

    Ok(())
}
