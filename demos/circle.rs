use spatio_transform::compute::geojson::{feature_from_geojson, feature_to_geojson};
use spatio_transform::{CircleOptions, Point, Units, circle, circle_from_feature};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=trace to see detailed logs)
    env_logger::init();

    println!("=== spatio-transform - Circles ===\n");

    // Circle around a point with default options (64 steps, kilometers)
    let center = Point::new(-75.343, 39.984);
    let feature = circle(&center, 5.0, None)?;
    println!("1. Default circle around ({}, {})", center.x(), center.y());
    println!("   bbox: {:?}\n", feature.bbox.unwrap_or_default());

    // Coarser circle in miles with properties attached
    let options = CircleOptions::default()
        .with_steps(10)
        .with_units(Units::Miles)
        .with_property("fill", "#F00")
        .with_property("fill-opacity", 0.3);
    let feature = circle(&center, 5.0, Some(&options))?;
    println!("2. Ten-step circle, 5 miles");
    println!("   {}\n", feature_to_geojson(&feature)?);

    // Center taken from a GeoJSON Point feature
    let point = feature_from_geojson(
        r#"{"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[2.3522,48.8566]}}"#,
    )?;
    let options = CircleOptions::from_json(r#"{"steps": 32, "units": "meters"}"#)?;
    let feature = circle_from_feature(&point, 500.0, Some(&options))?;
    println!("3. 500 m circle around a parsed feature");
    println!("   bbox: {:?}", feature.bbox.unwrap_or_default());

    Ok(())
}
