//! Length units and their conversion to angular distances.
//!
//! Conversions assume a spherical Earth with the mean radius
//! [`EARTH_RADIUS`]. Good enough for short distances, increasingly wrong
//! the further you stray from them.

use crate::error::{Result, TransformError};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS: f64 = 6_371_008.8;

/// Supported length units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Units {
    #[default]
    Kilometers,
    Miles,
    Meters,
    Feet,
    NauticalMiles,
    Yards,
    Inches,
    Centimeters,
    Millimeters,
    Radians,
    Degrees,
}

impl Units {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Kilometers => "kilometers",
            Units::Miles => "miles",
            Units::Meters => "meters",
            Units::Feet => "feet",
            Units::NauticalMiles => "nauticalmiles",
            Units::Yards => "yards",
            Units::Inches => "inches",
            Units::Centimeters => "centimeters",
            Units::Millimeters => "millimeters",
            Units::Radians => "radians",
            Units::Degrees => "degrees",
        }
    }

    /// Earth radius expressed in this unit (radians per unit, inverted).
    pub fn factor(&self) -> f64 {
        match self {
            Units::Kilometers => EARTH_RADIUS / 1000.0,
            Units::Miles => EARTH_RADIUS / 1609.344,
            Units::Meters => EARTH_RADIUS,
            Units::Feet => EARTH_RADIUS * 3.28084,
            Units::NauticalMiles => EARTH_RADIUS / 1852.0,
            Units::Yards => EARTH_RADIUS * 1.0936,
            Units::Inches => EARTH_RADIUS * 39.370,
            Units::Centimeters => EARTH_RADIUS * 100.0,
            Units::Millimeters => EARTH_RADIUS * 1000.0,
            Units::Radians => 1.0,
            Units::Degrees => EARTH_RADIUS / 111_325.0,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = TransformError;

    /// Parses a unit name. Matching is case-insensitive and accepts the
    /// British spellings and the usual abbreviations.
    fn from_str(s: &str) -> Result<Self> {
        let units = match s.trim().to_ascii_lowercase().as_str() {
            "kilometers" | "kilometres" | "km" => Units::Kilometers,
            "miles" | "mi" => Units::Miles,
            "meters" | "metres" | "m" => Units::Meters,
            "feet" | "ft" => Units::Feet,
            "nauticalmiles" | "nmi" => Units::NauticalMiles,
            "yards" | "yd" => Units::Yards,
            "inches" | "in" => Units::Inches,
            "centimeters" | "centimetres" | "cm" => Units::Centimeters,
            "millimeters" | "millimetres" | "mm" => Units::Millimeters,
            "radians" => Units::Radians,
            "degrees" => Units::Degrees,
            _ => return Err(TransformError::UnsupportedUnit(s.to_string())),
        };
        Ok(units)
    }
}

impl TryFrom<String> for Units {
    type Error = TransformError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Units> for String {
    fn from(units: Units) -> Self {
        units.as_str().to_string()
    }
}

/// Converts a length into radians of arc on the Earth's surface.
pub fn length_to_radians(length: f64, units: Units) -> f64 {
    length / units.factor()
}

/// Converts radians into degrees, wrapping at a full turn.
///
/// The sign of the input is kept, so `-π/2` becomes `-90.0`.
pub fn radians_to_degrees(radians: f64) -> f64 {
    (radians % (2.0 * PI)) * 180.0 / PI
}

/// Converts a length into an angular offset in degrees.
///
/// # Examples
///
/// ```
/// use spatio_transform::units::{length_to_degrees, Units};
///
/// let d = length_to_degrees(111.195, Units::Kilometers);
/// assert!((d - 1.0).abs() < 1e-3);
/// ```
pub fn length_to_degrees(length: f64, units: Units) -> f64 {
    radians_to_degrees(length_to_radians(length, units))
}

/// Same as [`length_to_degrees`] with the unit given by name.
pub fn length_to_degrees_named(length: f64, units: &str) -> Result<f64> {
    Ok(length_to_degrees(length, units.parse()?))
}
