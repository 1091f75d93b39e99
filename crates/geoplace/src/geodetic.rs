//! Geodetic positions.

/// A position relative to an ellipsoid surface.
///
/// Longitude and latitude are stored in degrees; height is in meters above
/// (positive) or below (negative) the ellipsoid surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeodeticPosition {
    /// Longitude in degrees, positive east.
    pub longitude: f64,
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Height above the ellipsoid in meters.
    pub height: f64,
}

impl GeodeticPosition {
    /// Create a position from longitude and latitude in degrees.
    #[must_use]
    pub const fn from_degrees(longitude: f64, latitude: f64, height: f64) -> Self {
        Self {
            longitude,
            latitude,
            height,
        }
    }

    /// Create a position from longitude and latitude in radians.
    #[must_use]
    pub fn from_radians(longitude: f64, latitude: f64, height: f64) -> Self {
        Self {
            longitude: longitude.to_degrees(),
            latitude: latitude.to_degrees(),
            height,
        }
    }

    /// Longitude in radians.
    #[must_use]
    pub fn longitude_radians(&self) -> f64 {
        self.longitude.to_radians()
    }

    /// Latitude in radians.
    #[must_use]
    pub fn latitude_radians(&self) -> f64 {
        self.latitude.to_radians()
    }
}
