//! Placement configuration.
//!
//! The on-disk form is a JSON object with camelCase keys:
//!
//! ```json
//! {
//!   "sourceUrl": "/tiles/tileset.json",
//!   "longitude": 9.2343,
//!   "latitude": 49.2005,
//!   "heightOffset": -260,
//!   "heading": 0,
//!   "pitch": 0,
//!   "roll": 0
//! }
//! ```
//!
//! [`RawPlacementConfig`] mirrors that form and may hold anything;
//! [`PlacementConfig`] can only be obtained through validation.

use std::path::Path;

use geoplace::{GeodeticPosition, HeadingPitchRoll};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Source of the reference placement.
pub const DEFAULT_SOURCE_URL: &str = "/tiles/tileset.json";
/// Longitude of the reference placement in degrees.
pub const DEFAULT_LONGITUDE: f64 = 9.2343;
/// Latitude of the reference placement in degrees.
pub const DEFAULT_LATITUDE: f64 = 49.2005;
/// Height offset of the reference placement in meters.
pub const DEFAULT_HEIGHT_OFFSET: f64 = -260.0;

/// Unvalidated placement configuration, as read from JSON or the command line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlacementConfig {
    /// Location of the tileset document.
    pub source_url: String,
    /// Target longitude in degrees.
    pub longitude: f64,
    /// Target latitude in degrees.
    pub latitude: f64,
    /// Target height above the ellipsoid in meters.
    #[serde(default)]
    pub height_offset: f64,
    /// Heading in degrees.
    #[serde(default)]
    pub heading: f64,
    /// Pitch in degrees.
    #[serde(default)]
    pub pitch: f64,
    /// Roll in degrees.
    #[serde(default)]
    pub roll: f64,
}

impl Default for RawPlacementConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            longitude: DEFAULT_LONGITUDE,
            latitude: DEFAULT_LATITUDE,
            height_offset: DEFAULT_HEIGHT_OFFSET,
            heading: 0.0,
            pitch: 0.0,
            roll: 0.0,
        }
    }
}

impl RawPlacementConfig {
    /// Parse a configuration from JSON without validating it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Json {
            context: "placement config",
            message: e.to_string(),
        })
    }

    /// Read a configuration file without validating it.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading placement config");
        let json = std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    /// Validate into a [`PlacementConfig`].
    pub fn validate(self) -> Result<PlacementConfig> {
        PlacementConfig::try_from(self)
    }
}

/// A validated placement: where the tileset lives, where it goes, and how it
/// faces.
///
/// The URL is non-empty, every number is finite, longitude lies in
/// [-180, 180] and latitude in [-90, 90].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawPlacementConfig")]
pub struct PlacementConfig {
    source_url: String,
    position: GeodeticPosition,
    orientation: HeadingPitchRoll,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            position: GeodeticPosition::from_degrees(
                DEFAULT_LONGITUDE,
                DEFAULT_LATITUDE,
                DEFAULT_HEIGHT_OFFSET,
            ),
            orientation: HeadingPitchRoll::default(),
        }
    }
}

impl PlacementConfig {
    /// Build and validate a configuration.
    pub fn new(
        source_url: impl Into<String>,
        position: GeodeticPosition,
        orientation: HeadingPitchRoll,
    ) -> Result<Self> {
        let source_url = source_url.into();
        if source_url.trim().is_empty() {
            return Err(Error::InvalidConfig {
                field: "sourceUrl",
                detail: "must not be empty".to_string(),
            });
        }

        check_finite("longitude", position.longitude)?;
        check_finite("latitude", position.latitude)?;
        check_finite("heightOffset", position.height)?;
        check_finite("heading", orientation.heading)?;
        check_finite("pitch", orientation.pitch)?;
        check_finite("roll", orientation.roll)?;

        if !(-180.0..=180.0).contains(&position.longitude) {
            return Err(Error::InvalidConfig {
                field: "longitude",
                detail: format!("{} is outside [-180, 180]", position.longitude),
            });
        }
        if !(-90.0..=90.0).contains(&position.latitude) {
            return Err(Error::InvalidConfig {
                field: "latitude",
                detail: format!("{} is outside [-90, 90]", position.latitude),
            });
        }

        Ok(Self {
            source_url,
            position,
            orientation,
        })
    }

    /// Parse and validate a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        RawPlacementConfig::from_json_str(json)?.validate()
    }

    /// Read and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        RawPlacementConfig::load(path)?.validate()
    }

    /// Location of the tileset document.
    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Target position.
    #[must_use]
    pub fn position(&self) -> GeodeticPosition {
        self.position
    }

    /// Target orientation.
    #[must_use]
    pub fn orientation(&self) -> HeadingPitchRoll {
        self.orientation
    }
}

impl TryFrom<RawPlacementConfig> for PlacementConfig {
    type Error = Error;

    fn try_from(raw: RawPlacementConfig) -> Result<Self> {
        Self::new(
            raw.source_url,
            GeodeticPosition::from_degrees(raw.longitude, raw.latitude, raw.height_offset),
            HeadingPitchRoll::from_degrees(raw.heading, raw.pitch, raw.roll),
        )
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            field,
            detail: format!("{value} is not a finite number"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_placement() {
        let config = PlacementConfig::default();
        assert_eq!(config.source_url(), "/tiles/tileset.json");
        assert_eq!(
            config.position(),
            GeodeticPosition::from_degrees(9.2343, 49.2005, -260.0)
        );
        assert_eq!(config.orientation(), HeadingPitchRoll::default());
        assert_eq!(RawPlacementConfig::default().validate().unwrap(), config);
    }

    #[test]
    fn test_parse_json() {
        let config = PlacementConfig::from_json_str(
            r#"{
                "sourceUrl": "tiles/city.json",
                "longitude": -74.0,
                "latitude": 40.7,
                "heightOffset": 12.5,
                "heading": 90,
                "pitch": -5,
                "roll": 1
            }"#,
        )
        .unwrap();
        assert_eq!(config.source_url(), "tiles/city.json");
        assert_eq!(config.position(), GeodeticPosition::from_degrees(-74.0, 40.7, 12.5));
        assert_eq!(
            config.orientation(),
            HeadingPitchRoll::from_degrees(90.0, -5.0, 1.0)
        );
    }

    #[test]
    fn test_orientation_defaults_to_zero() {
        let config = PlacementConfig::from_json_str(
            r#"{ "sourceUrl": "a.json", "longitude": 1, "latitude": 2 }"#,
        )
        .unwrap();
        assert!(config.position().height.abs() < f64::EPSILON);
        assert_eq!(config.orientation(), HeadingPitchRoll::default());
    }

    #[test]
    fn test_serde_try_from_validates() {
        let result: std::result::Result<PlacementConfig, _> = serde_json::from_str(
            r#"{ "sourceUrl": "a.json", "longitude": 1, "latitude": 91 }"#,
        );
        let message = result.unwrap_err().to_string();
        assert!(message.contains("latitude"), "{message}");
    }

    #[test]
    fn test_rejects_empty_url() {
        let result = PlacementConfig::new(
            "  ",
            GeodeticPosition::default(),
            HeadingPitchRoll::default(),
        );
        assert!(matches!(
            result,
            Err(Error::InvalidConfig {
                field: "sourceUrl",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let result = PlacementConfig::new(
            "a.json",
            GeodeticPosition::from_degrees(181.0, 0.0, 0.0),
            HeadingPitchRoll::default(),
        );
        assert!(matches!(
            result,
            Err(Error::InvalidConfig {
                field: "longitude",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_non_finite() {
        let result = PlacementConfig::new(
            "a.json",
            GeodeticPosition::default(),
            HeadingPitchRoll::from_degrees(0.0, f64::NAN, 0.0),
        );
        assert!(matches!(
            result,
            Err(Error::InvalidConfig { field: "pitch", .. })
        ));
    }

    #[test]
    fn test_missing_field_is_json_error() {
        let result = PlacementConfig::from_json_str(r#"{ "sourceUrl": "a.json" }"#);
        assert!(matches!(result, Err(Error::Json { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = PlacementConfig::load(Path::new("/nonexistent/placement.json"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
