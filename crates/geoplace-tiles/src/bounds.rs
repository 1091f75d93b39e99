//! Bounding spheres for camera framing.

use std::f64::consts::TAU;

use geoplace::transform::scale_of;
use geoplace::{Ellipsoid, GeodeticPosition};
use glam::{DMat4, DVec3};
use serde_json::Value;

use crate::error::{Error, Result};

/// A sphere enclosing a scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Center in the sphere's coordinate system.
    pub center: DVec3,
    /// Radius in meters.
    pub radius: f64,
}

impl BoundingSphere {
    /// Create a new bounding sphere.
    #[must_use]
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Smallest sphere centered at `center` that contains every point.
    #[must_use]
    pub fn from_center_and_points(center: DVec3, points: &[DVec3]) -> Self {
        let radius = points
            .iter()
            .map(|p| p.distance(center))
            .fold(0.0, f64::max);
        Self { center, radius }
    }

    /// Sphere enclosing a 3D Tiles `region`.
    ///
    /// `region` is `[west, south, east, north, minimum height, maximum
    /// height]` with angles in radians. A region whose east edge is less than
    /// its west edge crosses the antimeridian.
    #[must_use]
    pub fn from_region(region: [f64; 6], ellipsoid: &Ellipsoid) -> Self {
        let [west, south, mut east, north, min_height, max_height] = region;
        if east < west {
            east += TAU;
        }
        let mid_lon = 0.5 * (west + east);
        let mid_lat = 0.5 * (south + north);

        let at = |lon: f64, lat: f64, height: f64| {
            ellipsoid.geodetic_to_cartesian(GeodeticPosition::from_radians(lon, lat, height))
        };
        let center = at(mid_lon, mid_lat, 0.5 * (min_height + max_height));

        // Corners and edge midpoints at both heights; edge midpoints catch
        // the bulge of wide regions.
        let mut points = Vec::with_capacity(18);
        for lon in [west, mid_lon, east] {
            for lat in [south, mid_lat, north] {
                for height in [min_height, max_height] {
                    points.push(at(lon, lat, height));
                }
            }
        }
        Self::from_center_and_points(center, &points)
    }

    /// Apply `transform` to the sphere.
    ///
    /// The radius grows by the transform's largest axis scale so the result
    /// still encloses the object under non-uniform scale.
    #[must_use]
    pub fn transformed(&self, transform: &DMat4) -> Self {
        Self {
            center: transform.transform_point3(self.center),
            radius: self.radius * scale_of(transform).max_element(),
        }
    }
}

/// A tileset root's bounding volume and the frame it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RootVolume {
    /// A `sphere` or `box`, in the root tile's frame. Follows the root
    /// transform.
    Local(BoundingSphere),
    /// A `region`, fixed to the ellipsoid. The root transform does not apply.
    Geodetic(BoundingSphere),
}

impl RootVolume {
    /// Build from a 3D Tiles `boundingVolume` object.
    ///
    /// Supports `sphere` (`[x, y, z, radius]`), `box` (center followed by the
    /// x, y and z half-axis vectors) and `region` (geodetic bounds on WGS84).
    pub fn from_tileset_volume(volume: &Value) -> Result<Self> {
        if let Some(sphere) = volume.get("sphere") {
            let [x, y, z, radius] = read_numbers::<4>(sphere, "boundingVolume.sphere")?;
            return Ok(Self::Local(BoundingSphere::new(DVec3::new(x, y, z), radius)));
        }

        if let Some(obb) = volume.get("box") {
            let n = read_numbers::<12>(obb, "boundingVolume.box")?;
            let center = DVec3::new(n[0], n[1], n[2]);
            let half_axes = [
                DVec3::new(n[3], n[4], n[5]),
                DVec3::new(n[6], n[7], n[8]),
                DVec3::new(n[9], n[10], n[11]),
            ];

            // Half-axes are not required to be orthogonal, so check every corner.
            let mut corners = Vec::with_capacity(8);
            for sx in [-1.0, 1.0] {
                for sy in [-1.0, 1.0] {
                    for sz in [-1.0, 1.0] {
                        corners.push(
                            center + half_axes[0] * sx + half_axes[1] * sy + half_axes[2] * sz,
                        );
                    }
                }
            }
            return Ok(Self::Local(BoundingSphere::from_center_and_points(
                center, &corners,
            )));
        }

        if let Some(region) = volume.get("region") {
            let region = read_numbers::<6>(region, "boundingVolume.region")?;
            return Ok(Self::Geodetic(BoundingSphere::from_region(
                region,
                &Ellipsoid::WGS84,
            )));
        }

        let kind = volume
            .as_object()
            .and_then(|o| o.keys().next().cloned())
            .unwrap_or_else(|| "unknown".to_string());
        Err(Error::UnsupportedBoundingVolume { kind })
    }

    /// The world-space sphere under the root `transform`.
    #[must_use]
    pub fn world_bounds(&self, transform: &DMat4) -> BoundingSphere {
        match self {
            Self::Local(sphere) => sphere.transformed(transform),
            Self::Geodetic(sphere) => *sphere,
        }
    }

    /// The sphere as written in the document.
    #[must_use]
    pub fn sphere(&self) -> BoundingSphere {
        match self {
            Self::Local(sphere) | Self::Geodetic(sphere) => *sphere,
        }
    }
}

fn read_numbers<const N: usize>(value: &Value, context: &'static str) -> Result<[f64; N]> {
    let array = value.as_array().ok_or_else(|| Error::InvalidTileset {
        context,
        detail: "expected an array".to_string(),
    })?;
    if array.len() != N {
        return Err(Error::InvalidTileset {
            context,
            detail: format!("expected {N} numbers, got {}", array.len()),
        });
    }

    let mut numbers = [0.0; N];
    for (slot, item) in numbers.iter_mut().zip(array) {
        *slot = item.as_f64().ok_or_else(|| Error::InvalidTileset {
            context,
            detail: format!("expected a number, got {item}"),
        })?;
    }
    Ok(numbers)
}

/// Read a column-major 4x4 matrix from a 16 element JSON array.
pub(crate) fn read_matrix(value: &Value, context: &'static str) -> Result<DMat4> {
    let cols = read_numbers::<16>(value, context)?;
    Ok(DMat4::from_cols_array(&cols))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DQuat;
    use serde_json::json;

    #[test]
    fn test_sphere_volume() {
        let volume =
            RootVolume::from_tileset_volume(&json!({ "sphere": [1.0, 2.0, 3.0, 40.0] })).unwrap();
        assert_eq!(
            volume,
            RootVolume::Local(BoundingSphere::new(DVec3::new(1.0, 2.0, 3.0), 40.0))
        );
    }

    #[test]
    fn test_box_volume() {
        let volume = RootVolume::from_tileset_volume(&json!({
            "box": [10.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 12.0]
        }))
        .unwrap();
        assert!(matches!(volume, RootVolume::Local(_)));
        let sphere = volume.sphere();
        assert_eq!(sphere.center, DVec3::new(10.0, 0.0, 0.0));
        assert!((sphere.radius - 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_region_volume() {
        let region = [0.16, 0.858, 0.162, 0.860, -300.0, 100.0];
        let volume = RootVolume::from_tileset_volume(&json!({ "region": region })).unwrap();
        let RootVolume::Geodetic(sphere) = volume else {
            panic!("expected a geodetic volume, got {volume:?}");
        };

        let wgs84 = Ellipsoid::WGS84;
        for lon in [region[0], region[2]] {
            for lat in [region[1], region[3]] {
                for height in [region[4], region[5]] {
                    let corner =
                        wgs84.geodetic_to_cartesian(GeodeticPosition::from_radians(lon, lat, height));
                    assert!(corner.distance(sphere.center) <= sphere.radius + 1e-6);
                }
            }
        }

        let middle =
            wgs84.geodetic_to_cartesian(GeodeticPosition::from_radians(0.161, 0.859, -100.0));
        assert!(sphere.center.distance(middle) < 1e-6);
        // About 0.002 rad across on Earth, so a few kilometers.
        assert!(sphere.radius > 1_000.0 && sphere.radius < 20_000.0);
    }

    #[test]
    fn test_region_ignores_root_transform() {
        let volume = RootVolume::from_tileset_volume(&json!({
            "region": [0.16, 0.858, 0.162, 0.860, -300.0, 100.0]
        }))
        .unwrap();
        let moved = DMat4::from_translation(DVec3::new(1e5, -2e5, 3e5));
        assert_eq!(volume.world_bounds(&moved), volume.sphere());
    }

    #[test]
    fn test_region_across_antimeridian() {
        let sphere =
            BoundingSphere::from_region([3.1, -0.1, -3.1, 0.1, 0.0, 0.0], &Ellipsoid::WGS84);
        let antimeridian = Ellipsoid::WGS84
            .geodetic_to_cartesian(GeodeticPosition::from_radians(std::f64::consts::PI, 0.0, 0.0));
        assert!(sphere.center.distance(antimeridian) < 1e-6);
        assert!(sphere.radius < 1_000_000.0);
    }

    #[test]
    fn test_unknown_volume_is_unsupported() {
        let result = RootVolume::from_tileset_volume(&json!({ "cylinder": [0.0, 1.0] }));
        assert!(matches!(
            result,
            Err(Error::UnsupportedBoundingVolume { kind }) if kind == "cylinder"
        ));
    }

    #[test]
    fn test_wrong_length() {
        let result = RootVolume::from_tileset_volume(&json!({ "sphere": [1.0, 2.0] }));
        assert!(matches!(result, Err(Error::InvalidTileset { .. })));
        let result = RootVolume::from_tileset_volume(&json!({ "region": [0.1, 0.2, 0.3] }));
        assert!(matches!(
            result,
            Err(Error::InvalidTileset {
                context: "boundingVolume.region",
                ..
            })
        ));
    }

    #[test]
    fn test_non_numeric() {
        let result =
            RootVolume::from_tileset_volume(&json!({ "sphere": [1.0, "two", 3.0, 4.0] }));
        assert!(matches!(result, Err(Error::InvalidTileset { .. })));
    }

    #[test]
    fn test_transformed() {
        let sphere = BoundingSphere::new(DVec3::new(1.0, 0.0, 0.0), 5.0);
        let transform = DMat4::from_scale_rotation_translation(
            DVec3::new(2.0, 3.0, 1.0),
            DQuat::from_rotation_z(std::f64::consts::FRAC_PI_2),
            DVec3::new(100.0, 0.0, 0.0),
        );
        let moved = sphere.transformed(&transform);
        assert!(moved.center.abs_diff_eq(DVec3::new(100.0, 2.0, 0.0), 1e-12));
        assert!((moved.radius - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_read_matrix_is_column_major() {
        let m = read_matrix(
            &json!([
                1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 7.0, 8.0, 9.0, 1.0
            ]),
            "transform",
        )
        .unwrap();
        assert_eq!(m.w_axis.truncate(), DVec3::new(7.0, 8.0, 9.0));
    }
}
