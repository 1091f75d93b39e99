//! Local east-north-up frames.

use glam::{DMat3, DMat4, DQuat, DVec3};

use crate::Ellipsoid;

/// Points whose x and y are both within this distance of zero are treated as
/// lying on the polar axis, where east is undefined.
const POLE_EPSILON: f64 = 1e-14;

/// An orthonormal east-north-up basis anchored at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    /// The anchor point in Cartesian coordinates.
    pub origin: DVec3,
    /// Unit vector pointing east.
    pub east: DVec3,
    /// Unit vector pointing north.
    pub north: DVec3,
    /// Unit vector along the outward geodetic surface normal.
    pub up: DVec3,
}

impl LocalFrame {
    /// The basis as a rotation matrix with columns east, north, up.
    #[must_use]
    pub fn rotation_matrix(&self) -> DMat3 {
        DMat3::from_cols(self.east, self.north, self.up)
    }

    /// The basis as a unit quaternion.
    #[must_use]
    pub fn rotation(&self) -> DQuat {
        DQuat::from_mat3(&self.rotation_matrix())
    }

    /// Transform from the local frame to the ellipsoid-fixed frame.
    #[must_use]
    pub fn to_fixed_frame(&self) -> DMat4 {
        DMat4::from_cols(
            self.east.extend(0.0),
            self.north.extend(0.0),
            self.up.extend(0.0),
            self.origin.extend(1.0),
        )
    }
}

/// Build the east-north-up frame at `point`.
///
/// On the polar axis east is taken as +y and north as -x (north pole) or +x
/// (south pole), with up along ±z. This keeps the basis right-handed and
/// matches the limit of approaching the pole along the prime meridian.
#[must_use]
pub fn east_north_up(point: DVec3, ellipsoid: &Ellipsoid) -> LocalFrame {
    if point.x.abs() < POLE_EPSILON && point.y.abs() < POLE_EPSILON {
        let sign = if point.z < 0.0 { -1.0 } else { 1.0 };
        return LocalFrame {
            origin: point,
            east: DVec3::Y,
            north: DVec3::NEG_X * sign,
            up: DVec3::Z * sign,
        };
    }

    let up = ellipsoid.geodetic_surface_normal(point);
    let east = DVec3::new(-point.y, point.x, 0.0).normalize();
    let north = up.cross(east);

    LocalFrame {
        origin: point,
        east,
        north,
        up,
    }
}

/// Transform from the east-north-up frame at `point` to the fixed frame.
#[must_use]
pub fn east_north_up_to_fixed_frame(point: DVec3, ellipsoid: &Ellipsoid) -> DMat4 {
    east_north_up(point, ellipsoid).to_fixed_frame()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeodeticPosition;

    fn assert_vec_eq(actual: DVec3, expected: DVec3) {
        assert!(
            actual.abs_diff_eq(expected, 1e-12),
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_equator_prime_meridian() {
        let frame = east_north_up(DVec3::new(6_378_137.0, 0.0, 0.0), &Ellipsoid::WGS84);
        assert_vec_eq(frame.east, DVec3::Y);
        assert_vec_eq(frame.north, DVec3::Z);
        assert_vec_eq(frame.up, DVec3::X);
    }

    #[test]
    fn test_matches_closed_form() {
        let position = GeodeticPosition::from_degrees(9.2343, 49.2005, -260.0);
        let point = Ellipsoid::WGS84.geodetic_to_cartesian(position);
        let frame = east_north_up(point, &Ellipsoid::WGS84);

        let (sin_lat, cos_lat) = position.latitude_radians().sin_cos();
        let (sin_lon, cos_lon) = position.longitude_radians().sin_cos();
        assert_vec_eq(frame.east, DVec3::new(-sin_lon, cos_lon, 0.0));
        assert_vec_eq(
            frame.north,
            DVec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat),
        );
        assert_vec_eq(
            frame.up,
            DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat),
        );
    }

    #[test]
    fn test_basis_is_right_handed() {
        let point = Ellipsoid::WGS84
            .geodetic_to_cartesian(GeodeticPosition::from_degrees(-122.4, 37.8, 50.0));
        let m = east_north_up(point, &Ellipsoid::WGS84).rotation_matrix();
        assert!((m * m.transpose()).abs_diff_eq(DMat3::IDENTITY, 1e-12));
        assert!((m.determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_poles() {
        let north = east_north_up(DVec3::new(0.0, 0.0, 6_356_752.0), &Ellipsoid::WGS84);
        assert_vec_eq(north.east, DVec3::Y);
        assert_vec_eq(north.north, DVec3::NEG_X);
        assert_vec_eq(north.up, DVec3::Z);
        assert!((north.rotation_matrix().determinant() - 1.0).abs() < 1e-12);

        let south = east_north_up(DVec3::new(0.0, 0.0, -6_356_752.0), &Ellipsoid::WGS84);
        assert_vec_eq(south.east, DVec3::Y);
        assert_vec_eq(south.north, DVec3::X);
        assert_vec_eq(south.up, DVec3::NEG_Z);
        assert!((south.rotation_matrix().determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_frame() {
        let point = DVec3::new(1_329_866.0, -4_643_494.0, 4_154_677.0);
        let frame = east_north_up(point, &Ellipsoid::WGS84);
        let m = east_north_up_to_fixed_frame(point, &Ellipsoid::WGS84);
        assert_eq!(m.transform_point3(DVec3::ZERO), point);
        assert_vec_eq(m.transform_vector3(DVec3::Z), frame.up);
        assert_vec_eq(frame.rotation() * DVec3::X, frame.east);
    }
}
