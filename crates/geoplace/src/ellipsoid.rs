//! Ellipsoid model for geodetic to geocentric conversion.
//!
//! Positions are converted between geodetic coordinates (longitude, latitude,
//! height) and Earth-centered Cartesian coordinates (ECEF when the ellipsoid
//! is WGS84). The ellipsoid may be triaxial; WGS84 is an ellipsoid of
//! revolution with equal x and y radii.

use glam::DVec3;

use crate::GeodeticPosition;

/// Points closer to the center than this (in squared, radius-normalized
/// units) are projected radially instead of along the geodetic normal.
const CENTER_TOLERANCE_SQUARED: f64 = 0.1;

/// Convergence threshold for projecting a point onto the surface, in
/// radius-normalized units. On an Earth-sized ellipsoid this bounds the
/// surface point's error to a few nanometers.
const SURFACE_EPSILON: f64 = 1e-15;

/// Upper bound on Newton iterations when projecting onto the surface.
///
/// Convergence is quadratic and typically takes two or three steps.
const MAX_SURFACE_ITERATIONS: usize = 64;

/// A triaxial ellipsoid centered at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    radii: DVec3,
    radii_squared: DVec3,
    one_over_radii: DVec3,
    one_over_radii_squared: DVec3,
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

impl Ellipsoid {
    /// The WGS84 reference ellipsoid (meters).
    pub const WGS84: Self = Self::new(6_378_137.0, 6_378_137.0, 6_356_752.314_245_179);

    /// A sphere of radius one.
    pub const UNIT_SPHERE: Self = Self::new(1.0, 1.0, 1.0);

    /// Create an ellipsoid from its radii along the x, y and z axes.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            radii: DVec3::new(x, y, z),
            radii_squared: DVec3::new(x * x, y * y, z * z),
            one_over_radii: DVec3::new(1.0 / x, 1.0 / y, 1.0 / z),
            one_over_radii_squared: DVec3::new(1.0 / (x * x), 1.0 / (y * y), 1.0 / (z * z)),
        }
    }

    /// Create an ellipsoid of revolution from its semi-major (equatorial) and
    /// semi-minor (polar) axes.
    #[must_use]
    pub const fn from_semi_axes(semi_major: f64, semi_minor: f64) -> Self {
        Self::new(semi_major, semi_major, semi_minor)
    }

    /// Radii along the x, y and z axes.
    #[must_use]
    pub fn radii(&self) -> DVec3 {
        self.radii
    }

    /// Outward surface normal for a geodetic longitude and latitude.
    ///
    /// The geodetic normal depends only on the angles, so this needs no
    /// ellipsoid.
    #[must_use]
    pub fn geodetic_surface_normal_geodetic(position: GeodeticPosition) -> DVec3 {
        let (sin_lon, cos_lon) = position.longitude_radians().sin_cos();
        let (sin_lat, cos_lat) = position.latitude_radians().sin_cos();
        DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat).normalize()
    }

    /// Outward surface normal of the ellipsoid passing through `point`.
    ///
    /// The result is only meaningful for points on (or near) the surface.
    #[must_use]
    pub fn geodetic_surface_normal(&self, point: DVec3) -> DVec3 {
        (point * self.one_over_radii_squared).normalize()
    }

    /// Convert a geodetic position to Cartesian coordinates.
    ///
    /// NaN or infinite components propagate into the result.
    #[must_use]
    pub fn geodetic_to_cartesian(&self, position: GeodeticPosition) -> DVec3 {
        let normal = Self::geodetic_surface_normal_geodetic(position);
        let k = self.radii_squared * normal;
        let gamma = normal.dot(k).sqrt();
        k / gamma + normal * position.height
    }

    /// Project `point` onto the surface along the geodetic normal.
    ///
    /// Returns `None` when `point` is the ellipsoid's center, where no
    /// projection exists.
    #[must_use]
    pub fn scale_to_geodetic_surface(&self, point: DVec3) -> Option<DVec3> {
        let scaled = point * self.one_over_radii;
        let squared = scaled * scaled;
        let squared_norm = squared.element_sum();
        let ratio = (1.0 / squared_norm).sqrt();

        // Radial intersection, used as the initial guess.
        let intersection = point * ratio;
        if squared_norm < CENTER_TOLERANCE_SQUARED {
            return ratio.is_finite().then_some(intersection);
        }

        let gradient = intersection * self.one_over_radii_squared * 2.0;

        // Solve for the scalar `lambda` with Newton's method so that
        // `point / (1 + lambda / radii²)` lies on the surface.
        let mut lambda = (1.0 - ratio) * point.length() / (0.5 * gradient.length());
        let mut correction = 0.0;
        let mut multiplier = DVec3::ONE;

        for _ in 0..MAX_SURFACE_ITERATIONS {
            lambda -= correction;

            multiplier = DVec3::ONE / (DVec3::ONE + lambda * self.one_over_radii_squared);
            let multiplier_squared = multiplier * multiplier;
            let multiplier_cubed = multiplier_squared * multiplier;

            let func = (squared * multiplier_squared).element_sum() - 1.0;
            if func.abs() <= SURFACE_EPSILON {
                break;
            }

            let derivative =
                -2.0 * (squared * multiplier_cubed * self.one_over_radii_squared).element_sum();
            correction = func / derivative;
        }

        Some(point * multiplier)
    }

    /// Convert Cartesian coordinates to a geodetic position.
    ///
    /// Returns `None` when `point` is the ellipsoid's center.
    #[must_use]
    pub fn cartesian_to_geodetic(&self, point: DVec3) -> Option<GeodeticPosition> {
        let surface = self.scale_to_geodetic_surface(point)?;
        let normal = self.geodetic_surface_normal(surface);
        let offset = point - surface;

        let longitude = normal.y.atan2(normal.x);
        let latitude = normal.z.asin();
        let height = offset.dot(point).signum() * offset.length();

        Some(GeodeticPosition::from_radians(longitude, latitude, height))
    }
}

/// Convert a geodetic position to Cartesian coordinates on `ellipsoid`.
#[must_use]
pub fn geodetic_to_cartesian(position: GeodeticPosition, ellipsoid: &Ellipsoid) -> DVec3 {
    ellipsoid.geodetic_to_cartesian(position)
}
