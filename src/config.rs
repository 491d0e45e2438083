//! Options for circle construction.

use crate::error::{Result, TransformError};
use crate::units::Units;
use geojson::JsonObject;
use serde::{Deserialize, Serialize};

/// Number of ring vertices used when `steps` is not positive.
pub const DEFAULT_STEPS: usize = 64;

/// Circle construction options.
///
/// Every field is optional when deserialized:
///
/// ```
/// use spatio_transform::config::CircleOptions;
/// use spatio_transform::units::Units;
///
/// let options = CircleOptions::from_json(r#"{"steps": 16, "units": "miles"}"#).unwrap();
/// assert_eq!(options.steps, 16);
/// assert_eq!(options.units, Units::Miles);
/// assert!(options.properties.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CircleOptions {
    /// Ring vertex count, not counting the closing vertex. Values `<= 0`
    /// fall back to [`DEFAULT_STEPS`].
    #[serde(default = "CircleOptions::default_steps")]
    pub steps: i32,

    #[serde(default)]
    pub units: Units,

    /// Copied verbatim onto the output feature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<JsonObject>,
}

impl CircleOptions {
    const fn default_steps() -> i32 {
        DEFAULT_STEPS as i32
    }

    pub fn with_steps(mut self, steps: i32) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Sets the unit by name, failing with `UnsupportedUnit` for unknown names.
    pub fn with_units_str(mut self, units: &str) -> Result<Self> {
        self.units = units.parse()?;
        Ok(self)
    }

    pub fn with_properties(mut self, properties: JsonObject) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Adds a single property, creating the property map if needed.
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.properties
            .get_or_insert_with(JsonObject::new)
            .insert(key.into(), value.into());
        self
    }

    /// Vertex count actually used for tessellation.
    pub fn effective_steps(&self) -> usize {
        if self.steps > 0 {
            self.steps as usize
        } else {
            DEFAULT_STEPS
        }
    }

    /// Parses options from JSON. An unknown unit name is reported as
    /// `UnsupportedUnit` rather than as a generic parse failure.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(|e| {
            TransformError::Serialization(format!("Failed to parse options: {}", e))
        })?;

        if let Some(units) = value.get("units").and_then(|u| u.as_str()) {
            units.parse::<Units>()?;
        }

        serde_json::from_value(value).map_err(|e| {
            TransformError::Serialization(format!("Failed to parse options: {}", e))
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TransformError::Serialization(format!("Failed to serialize options: {}", e))
        })
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| {
            TransformError::Serialization(format!("Failed to parse options: {}", e))
        })
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            TransformError::Serialization(format!("Failed to serialize options: {}", e))
        })
    }
}

impl Default for CircleOptions {
    fn default() -> Self {
        Self {
            steps: Self::default_steps(),
            units: Units::default(),
            properties: None,
        }
    }
}
